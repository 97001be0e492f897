use crate::offer::FlightOffer;
use crate::query::{
    filter, sort_with, toggle_compare, CompareSet, FilterCriteria, RankingWeights, SortKey,
    ValidationError,
};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("no offer with id {0}")]
pub struct UnknownOffer(pub String);

/// State owned by a results view: the offers on screen plus the user's
/// current filter, sort and compare choices.
pub struct Session {
    pub offers: Vec<FlightOffer>,
    pub criteria: FilterCriteria,
    pub sort_key: SortKey,
    pub compare: CompareSet,
    pub weights: RankingWeights,
}

impl Session {
    pub fn new(offers: Vec<FlightOffer>, weights: RankingWeights) -> Session {
        Session {
            offers,
            criteria: FilterCriteria::default(),
            sort_key: SortKey::default(),
            compare: CompareSet::new(),
            weights,
        }
    }

    /// The offers as the list should currently show them.
    pub fn view(&self) -> Result<Vec<FlightOffer>, ValidationError> {
        let matched = filter(&self.offers, &self.criteria)?;
        sort_with(&matched, self.sort_key, &self.weights)
    }

    /// Returns whether the compare set changed. Toggling a new id into a
    /// full set leaves it as is.
    pub fn toggle_compare(&mut self, id: &str) -> Result<bool, UnknownOffer> {
        let offer = self
            .offers
            .iter()
            .find(|o| *o.id == *id)
            .ok_or_else(|| UnknownOffer(id.to_string()))?;
        let next = toggle_compare(&self.compare, offer.id.clone());
        let changed = next != self.compare;
        self.compare = next;
        Ok(changed)
    }

    /// Compared offers in the order they were picked.
    pub fn compared(&self) -> Vec<&FlightOffer> {
        self.compare
            .iter()
            .filter_map(|id| self.offers.iter().find(|o| o.id == *id))
            .collect()
    }

    pub fn reset_filters(&mut self) {
        self.criteria = FilterCriteria::default();
    }

    pub fn reset(&mut self) {
        self.reset_filters();
        self.sort_key = SortKey::default();
        self.compare.clear();
    }
}
