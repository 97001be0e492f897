use crate::time::{format_duration, Time};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Formatter;
use std::sync::Arc;
use tabled::Tabled;

pub type OfferId = Arc<str>;
pub type AirportId = Arc<str>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    pub time: Time,
    pub airport: AirportId,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.time, self.airport)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Recommendation {
    Buy,
    Watch,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::Buy => write!(f, "{}", "BUY".green().bold()),
            Recommendation::Watch => write!(f, "{}", "WATCH".yellow().bold()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    #[serde(alias = "med")]
    Medium,
    High,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Confidence::Low => write!(f, "low"),
            Confidence::Medium => write!(f, "med"),
            Confidence::High => write!(f, "high"),
        }
    }
}

/// One priced itinerary option as shown in a results list or on the watchlist.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlightOffer {
    pub id: OfferId,
    pub airline: Arc<str>,
    pub departure: Endpoint,
    pub arrival: Endpoint,
    pub duration_minutes: u32,
    pub stop_count: u32,
    pub price: f64,
    pub recommendation: Recommendation,
    pub confidence: Confidence,
    #[serde(default)]
    pub price_change_since_last_check: f64,
    /// Alert threshold, only set for watched offers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_price: Option<f64>,
    /// Observed prices, oldest first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub price_history: Vec<f64>,
}

impl FlightOffer {
    pub fn stops_label(&self) -> String {
        match self.stop_count {
            0 => "Nonstop".to_string(),
            1 => "1 stop".to_string(),
            n => format!("{} stops", n),
        }
    }
}

/// Table row for the results and compare views.
#[derive(Tabled)]
pub struct OfferRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Airline")]
    pub airline: String,
    #[tabled(rename = "Depart")]
    pub departure: String,
    #[tabled(rename = "Arrive")]
    pub arrival: String,
    #[tabled(rename = "Duration")]
    pub duration: String,
    #[tabled(rename = "Stops")]
    pub stops: String,
    #[tabled(rename = "Price")]
    pub price: String,
    #[tabled(rename = "Change")]
    pub change: String,
    #[tabled(rename = "Advice")]
    pub advice: String,
}

fn format_change(change: f64) -> String {
    if change < 0.0 {
        format!("↓${:.0}", change.abs()).green().to_string()
    } else if change > 0.0 {
        format!("↑${:.0}", change).red().to_string()
    } else {
        "-".to_string()
    }
}

impl From<&FlightOffer> for OfferRow {
    fn from(offer: &FlightOffer) -> Self {
        OfferRow {
            id: offer.id.to_string(),
            airline: offer.airline.to_string(),
            departure: offer.departure.to_string(),
            arrival: offer.arrival.to_string(),
            duration: format_duration(offer.duration_minutes),
            stops: offer.stops_label(),
            price: format!("${:.0}", offer.price),
            change: format_change(offer.price_change_since_last_check),
            advice: format!("{} ({} conf)", offer.recommendation, offer.confidence),
        }
    }
}
