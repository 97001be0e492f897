use crate::offer::FlightOffer;
use crate::query::validate::{validate_offers, ValidationError};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Best,
    PriceAsc,
    DurationAsc,
    DepartureTimeAsc,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "best" => Ok(SortKey::Best),
            "price" => Ok(SortKey::PriceAsc),
            "duration" => Ok(SortKey::DurationAsc),
            "departure" => Ok(SortKey::DepartureTimeAsc),
            other => Err(format!("unknown sort key: {}", other)),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Best => write!(f, "best"),
            SortKey::PriceAsc => write!(f, "price"),
            SortKey::DurationAsc => write!(f, "duration"),
            SortKey::DepartureTimeAsc => write!(f, "departure"),
        }
    }
}

/// Weights of the composite "best" score. Lower scores rank first.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingWeights {
    pub price: f64,
    pub duration: f64,
    pub stops: f64,
}

impl Default for RankingWeights {
    fn default() -> Self {
        RankingWeights {
            price: 0.5,
            duration: 0.3,
            stops: 0.2,
        }
    }
}

impl RankingWeights {
    pub fn validate(&self) -> Result<(), ValidationError> {
        [("price", self.price), ("duration", self.duration), ("stops", self.stops)]
            .into_iter()
            .find(|(_, w)| !w.is_finite() || *w < 0.0)
            .map_or(Ok(()), |(name, w)| {
                Err(ValidationError::InvalidWeights(format!(
                    "{} weight must be a non-negative number, got {}",
                    name, w
                )))
            })
    }
}

/// Divides each value by the maximum of the set. An all-equal set (which
/// includes a single offer) or a zero maximum normalizes to 0.
fn normalize(values: &[f64]) -> Vec<f64> {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    if values.is_empty() || max == 0.0 || max == min {
        return vec![0.0; values.len()];
    }
    values.iter().map(|v| v / max).collect()
}

fn stop_penalties(offers: &[FlightOffer]) -> Vec<f64> {
    let max_stops = offers.iter().map(|o| o.stop_count).max().unwrap_or(0);
    offers
        .iter()
        .map(|o| {
            if max_stops == 0 {
                0.0
            } else {
                o.stop_count as f64 / max_stops as f64
            }
        })
        .collect()
}

/// Composite score of every offer relative to the rest of the set, in input order.
pub fn best_scores(offers: &[FlightOffer], weights: &RankingWeights) -> Vec<f64> {
    let prices = normalize(&offers.iter().map(|o| o.price).collect::<Vec<_>>());
    let durations = normalize(
        &offers
            .iter()
            .map(|o| o.duration_minutes as f64)
            .collect::<Vec<_>>(),
    );
    let stops = stop_penalties(offers);

    prices
        .iter()
        .zip(&durations)
        .zip(&stops)
        .map(|((p, d), s)| p * weights.price + d * weights.duration + s * weights.stops)
        .collect()
}

fn by_float(a: f64, b: f64) -> Ordering {
    // Inputs are validated, so no NaN reaches here.
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

pub fn sort(offers: &[FlightOffer], key: SortKey) -> Result<Vec<FlightOffer>, ValidationError> {
    sort_with(offers, key, &RankingWeights::default())
}

/// Returns a reordered copy of `offers`. Every key uses a stable sort, so
/// ties keep their input order.
pub fn sort_with(
    offers: &[FlightOffer],
    key: SortKey,
    weights: &RankingWeights,
) -> Result<Vec<FlightOffer>, ValidationError> {
    validate_offers(offers)?;
    weights.validate()?;

    let mut sorted = offers.to_vec();
    match key {
        SortKey::PriceAsc => sorted.sort_by(|a, b| by_float(a.price, b.price)),
        SortKey::DurationAsc => sorted.sort_by_key(|o| o.duration_minutes),
        SortKey::DepartureTimeAsc => sorted.sort_by_key(|o| o.departure.time),
        SortKey::Best => {
            let mut ranked: Vec<(f64, FlightOffer)> =
                best_scores(offers, weights).into_iter().zip(sorted).collect();
            ranked.sort_by(|a, b| by_float(a.0, b.0));
            sorted = ranked.into_iter().map(|(_, offer)| offer).collect();
        }
    }
    debug!(count = sorted.len(), %key, "sorted offers");
    Ok(sorted)
}
