use crate::offer::FlightOffer;
use crate::query::validate::validate_offers;
use crate::query::{RankingWeights, ValidationError};
use serde::Deserialize;
use std::io;
use std::path::Path;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error("cannot read scenario: {0}")]
    Io(#[from] io::Error),

    #[error("malformed scenario: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid scenario: {0}")]
    Invalid(#[from] ValidationError),
}

/// Fixture data: one search's results, the user's watchlist and the
/// ranking weights to use for them.
#[derive(Debug, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub ranking: RankingWeights,
    pub offers: Vec<FlightOffer>,
    #[serde(default)]
    pub watchlist: Vec<FlightOffer>,
}

impl Scenario {
    pub fn from_json(data: &str) -> Result<Self, ScenarioError> {
        let scenario: Scenario = serde_json::from_str(data)?;
        scenario.ranking.validate()?;
        validate_offers(&scenario.offers)?;
        validate_offers(&scenario.watchlist)?;
        Ok(scenario)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let data = std::fs::read_to_string(path.as_ref())?;
        let scenario = Scenario::from_json(&data)?;
        info!(
            path = %path.as_ref().display(),
            offers = scenario.offers.len(),
            watched = scenario.watchlist.len(),
            "loaded scenario"
        );
        Ok(scenario)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OFFER: &str = r#"{
        "id": "1", "airline": "Alaska Airlines",
        "departure": { "time": "7:30 AM", "airport": "SEA" },
        "arrival": { "time": "3:45 PM", "airport": "JFK" },
        "duration_minutes": 315, "stop_count": 0, "price": 285,
        "recommendation": "WATCH", "confidence": "med"
    }"#;

    #[test]
    fn test_defaults_for_optional_sections() {
        let scenario = Scenario::from_json(&format!(r#"{{ "offers": [{}] }}"#, OFFER)).unwrap();
        assert_eq!(RankingWeights::default(), scenario.ranking);
        assert_eq!(1, scenario.offers.len());
        assert!(scenario.watchlist.is_empty());
    }

    #[test]
    fn test_partial_ranking_override() {
        let scenario =
            Scenario::from_json(r#"{ "ranking": { "price": 1.0 }, "offers": [] }"#).unwrap();
        assert_eq!(1.0, scenario.ranking.price);
        assert_eq!(0.3, scenario.ranking.duration);
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let json = format!(r#"{{ "offers": [{}, {}] }}"#, OFFER, OFFER);
        assert!(matches!(
            Scenario::from_json(&json),
            Err(ScenarioError::Invalid(ValidationError::DuplicateId(_)))
        ));
    }

    #[test]
    fn test_rejects_negative_weights() {
        assert!(matches!(
            Scenario::from_json(r#"{ "ranking": { "stops": -1 }, "offers": [] }"#),
            Err(ScenarioError::Invalid(ValidationError::InvalidWeights(_)))
        ));
    }

    #[test]
    fn test_rejects_bad_wall_clock() {
        let json = format!(r#"{{ "offers": [{}] }}"#, OFFER.replace("7:30 AM", "breakfast"));
        assert!(matches!(Scenario::from_json(&json), Err(ScenarioError::Parse(_))));
    }

    #[test]
    fn test_bundled_scenario_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/default.json");
        let scenario = Scenario::load_from_file(path).unwrap();
        assert_eq!(3, scenario.offers.len());
        assert_eq!(3, scenario.watchlist.len());
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Scenario::load_from_file("does/not/exist.json"),
            Err(ScenarioError::Io(_))
        ));
    }
}
