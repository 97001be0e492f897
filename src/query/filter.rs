use crate::offer::FlightOffer;
use crate::query::validate::{validate_offers, ValidationError};
use crate::time::Time;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaxStops {
    #[default]
    #[serde(rename = "any")]
    Any,
    #[serde(rename = "nonstop")]
    Nonstop,
    #[serde(rename = "1-stop")]
    OneStopOrFewer,
}

impl MaxStops {
    pub fn allows(&self, stop_count: u32) -> bool {
        match self {
            MaxStops::Any => true,
            MaxStops::Nonstop => stop_count == 0,
            MaxStops::OneStopOrFewer => stop_count <= 1,
        }
    }
}

impl FromStr for MaxStops {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "any" => Ok(MaxStops::Any),
            "nonstop" | "0" => Ok(MaxStops::Nonstop),
            "1-stop" | "1" => Ok(MaxStops::OneStopOrFewer),
            other => Err(format!("unknown stops option: {}", other)),
        }
    }
}

impl fmt::Display for MaxStops {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaxStops::Any => write!(f, "any"),
            MaxStops::Nonstop => write!(f, "nonstop"),
            MaxStops::OneStopOrFewer => write!(f, "1-stop"),
        }
    }
}

/// Hour-of-day window `[start, end)`. A window whose start is after its end
/// wraps past midnight; equal bounds match nothing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HourWindow {
    #[default]
    Any,
    Hours { start: u8, end: u8 },
}

impl HourWindow {
    pub fn contains(&self, time: Time) -> bool {
        let hour = time.hour();
        match *self {
            HourWindow::Any => true,
            HourWindow::Hours { start, end } => {
                let (start, end) = (start as u64, end as u64);
                if start < end {
                    start <= hour && hour < end
                } else if start > end {
                    hour >= start || hour < end
                } else {
                    false
                }
            }
        }
    }

    fn validate(&self, name: &str) -> Result<(), ValidationError> {
        match *self {
            HourWindow::Hours { start, end } if start > 24 || end > 24 => Err(
                ValidationError::InvalidCriteria(format!("{} hours must be within 0..=24", name)),
            ),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for HourWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HourWindow::Any => write!(f, "any"),
            HourWindow::Hours { start, end } => write!(f, "{:02}-{:02}h", start, end),
        }
    }
}

/// User-chosen constraints. The default value accepts every offer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub max_price: Option<f64>,
    pub min_price: Option<f64>,
    pub max_duration_minutes: Option<u32>,
    pub max_stops: MaxStops,
    pub allowed_airlines: BTreeSet<Arc<str>>,
    pub time_window: HourWindow,
    pub arrival_window: HourWindow,
}

impl FilterCriteria {
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (name, bound) in [("max_price", self.max_price), ("min_price", self.min_price)] {
            match bound {
                Some(v) if !v.is_finite() || v < 0.0 => {
                    return Err(ValidationError::InvalidCriteria(format!(
                        "{} must be a non-negative number, got {}",
                        name, v
                    )));
                }
                _ => {}
            }
        }
        self.time_window.validate("departure window")?;
        self.arrival_window.validate("arrival window")
    }

    pub fn matches(&self, offer: &FlightOffer) -> bool {
        self.max_price.is_none_or(|max| offer.price <= max)
            && self.min_price.is_none_or(|min| offer.price >= min)
            && self
                .max_duration_minutes
                .is_none_or(|max| offer.duration_minutes <= max)
            && self.max_stops.allows(offer.stop_count)
            && (self.allowed_airlines.is_empty()
                || self.allowed_airlines.contains(&*offer.airline))
            && self.time_window.contains(offer.departure.time)
            && self.arrival_window.contains(offer.arrival.time)
    }
}

impl fmt::Display for FilterCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let price = match (self.min_price, self.max_price) {
            (None, None) => "any".to_string(),
            (Some(min), None) => format!(">= ${:.0}", min),
            (None, Some(max)) => format!("<= ${:.0}", max),
            (Some(min), Some(max)) => format!("${:.0}-${:.0}", min, max),
        };
        let duration = self
            .max_duration_minutes
            .map(|m| format!("<= {}m", m))
            .unwrap_or_else(|| "any".to_string());
        let airlines = if self.allowed_airlines.is_empty() {
            "any".to_string()
        } else {
            self.allowed_airlines
                .iter()
                .map(|a| &**a)
                .collect::<Vec<&str>>()
                .join(", ")
        };
        write!(
            f,
            "price {} | duration {} | stops {} | airlines {} | depart {} | arrive {}",
            price, duration, self.max_stops, airlines, self.time_window, self.arrival_window
        )
    }
}

/// Keeps the offers that satisfy every criterion, in their input order.
pub fn filter(
    offers: &[FlightOffer],
    criteria: &FilterCriteria,
) -> Result<Vec<FlightOffer>, ValidationError> {
    validate_offers(offers)?;
    criteria.validate()?;

    let matched: Vec<FlightOffer> = offers
        .iter()
        .filter(|offer| criteria.matches(offer))
        .cloned()
        .collect();
    debug!(input = offers.len(), matched = matched.len(), "filtered offers");
    Ok(matched)
}
