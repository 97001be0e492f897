use crate::offer::OfferId;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Offers picked for side-by-side viewing, in the order they were picked.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<OfferId>", into = "Vec<OfferId>")]
pub struct CompareSet {
    ids: Vec<OfferId>,
}

impl CompareSet {
    pub const CAPACITY: usize = 3;

    pub fn new() -> CompareSet {
        CompareSet::default()
    }

    /// Builds a set from ids in order, dropping repeats and anything past capacity.
    pub fn from_ids(ids: impl IntoIterator<Item = OfferId>) -> CompareSet {
        ids.into_iter()
            .fold(CompareSet::new(), |set, id| {
                if set.contains(&id) || set.is_full() {
                    set
                } else {
                    set.toggled(id)
                }
            })
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.ids.len() >= Self::CAPACITY
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|x| **x == *id)
    }

    /// False when toggling `id` would be a no-op, i.e. the set is full and
    /// `id` is not in it. Views use this to render a disabled checkbox.
    pub fn can_toggle(&self, id: &str) -> bool {
        self.contains(id) || !self.is_full()
    }

    pub fn ids(&self) -> &[OfferId] {
        &self.ids
    }

    pub fn iter(&self) -> impl Iterator<Item = &OfferId> {
        self.ids.iter()
    }

    /// Removes `id` if present, appends it if there is room, and otherwise
    /// returns an unchanged copy.
    pub fn toggled(&self, id: OfferId) -> CompareSet {
        if self.contains(&id) {
            CompareSet {
                ids: self.ids.iter().filter(|x| **x != id).cloned().collect(),
            }
        } else if !self.is_full() {
            let mut ids = self.ids.clone();
            ids.push(id);
            CompareSet { ids }
        } else {
            debug!(%id, "compare set full, ignoring toggle");
            self.clone()
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

impl From<Vec<OfferId>> for CompareSet {
    fn from(ids: Vec<OfferId>) -> Self {
        CompareSet::from_ids(ids)
    }
}

impl From<CompareSet> for Vec<OfferId> {
    fn from(set: CompareSet) -> Self {
        set.ids
    }
}

pub fn toggle_compare(current: &CompareSet, id: OfferId) -> CompareSet {
    current.toggled(id)
}
