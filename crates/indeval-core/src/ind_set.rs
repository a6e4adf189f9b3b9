use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use crate::model::Ind;

/// Working set of dependencies keyed by canonical id, ordered by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndSet {
    inds: BTreeMap<String, Ind>,
}

impl IndSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a dependency, replacing any entry with the same id.
    pub fn insert(&mut self, ind: Ind) -> Option<Ind> {
        self.inds.insert(ind.id().to_string(), ind)
    }

    /// Insert a dependency only when its id is not present yet.
    /// Returns `true` when the dependency was inserted.
    pub fn insert_if_absent(&mut self, ind: Ind) -> bool {
        match self.inds.entry(ind.id().to_string()) {
            Entry::Vacant(slot) => {
                slot.insert(ind);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    pub fn get(&self, id: &str) -> Option<&Ind> {
        self.inds.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.inds.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.inds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inds.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ind> {
        self.inds.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.inds.keys().map(String::as_str)
    }
}

impl FromIterator<Ind> for IndSet {
    fn from_iter<I: IntoIterator<Item = Ind>>(iter: I) -> Self {
        let mut set = IndSet::new();
        for ind in iter {
            set.insert(ind);
        }
        set
    }
}

impl IntoIterator for IndSet {
    type Item = Ind;
    type IntoIter = std::collections::btree_map::IntoValues<String, Ind>;

    fn into_iter(self) -> Self::IntoIter {
        self.inds.into_values()
    }
}

impl Extend<Ind> for IndSet {
    fn extend<I: IntoIterator<Item = Ind>>(&mut self, iter: I) {
        for ind in iter {
            self.insert(ind);
        }
    }
}
