use crate::offer::{FlightOffer, Recommendation};
use crate::query::validate::{validate_offers, ValidationError};
use serde::Serialize;
use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct WatchSummary {
    pub buy_count: usize,
    pub watch_count: usize,
    /// Mean of `price - target_price` over offers that carry a target.
    pub avg_above_target: f64,
}

impl fmt::Display for WatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to buy, {} to watch, avg ${:.2} above target",
            self.buy_count, self.watch_count, self.avg_above_target
        )
    }
}

pub fn summarize(offers: &[FlightOffer]) -> Result<WatchSummary, ValidationError> {
    validate_offers(offers)?;

    let count = |rec: Recommendation| offers.iter().filter(|o| o.recommendation == rec).count();
    let gaps: Vec<f64> = offers
        .iter()
        .filter_map(|o| o.target_price.map(|target| o.price - target))
        .collect();
    let avg_above_target = if gaps.is_empty() {
        0.0
    } else {
        gaps.iter().sum::<f64>() / gaps.len() as f64
    };

    Ok(WatchSummary {
        buy_count: count(Recommendation::Buy),
        watch_count: count(Recommendation::Watch),
        avg_above_target,
    })
}
