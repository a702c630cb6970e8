//! In-memory traffic state.
//!
//! Owned by the poll loop; never shared across tasks. Entries are created on
//! first sighting and kept for the life of the process, including entities
//! that later disappear from the backend.

use std::collections::BTreeMap;

use tracing::debug;

use crate::delta;
use crate::types::{Category, Direction, EntityKey, TrafficDelta, TrafficRecord};

/// Cumulative counters per entity.
#[derive(Debug, Default)]
pub struct TrafficStore {
    records: BTreeMap<EntityKey, TrafficRecord>,
}

impl TrafficStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the cumulative total for one direction of an entity,
    /// creating the entity if needed. Last write wins.
    pub fn upsert(&mut self, category: Category, identity: &str, direction: Direction, value: i64) {
        let key = EntityKey::new(category, identity);
        let record = self.records.entry(key).or_insert_with(|| {
            debug!(%category, %identity, "tracking new entity");
            TrafficRecord::default()
        });
        match direction {
            Direction::Uplink => record.up_total = value,
            Direction::Downlink => record.down_total = value,
        }
    }

    pub fn get(&self, category: Category, identity: &str) -> Option<&TrafficRecord> {
        self.records.get(&EntityKey::new(category, identity))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of tracked entities in one category.
    pub fn count(&self, category: Category) -> usize {
        self.records.keys().filter(|k| k.category == category).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EntityKey, &TrafficRecord)> {
        self.records.iter()
    }

    /// Compute this interval's deltas for every entity of `category` and
    /// move their watermarks forward.
    ///
    /// Must only be called once all records of the current cycle have been
    /// applied with [`upsert`](Self::upsert).
    pub fn advance(&mut self, category: Category) -> Vec<(EntityKey, TrafficDelta)> {
        self.records
            .iter_mut()
            .filter(|(k, _)| k.category == category)
            .map(|(k, record)| (k.clone(), delta::advance(record)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_creates_and_overwrites() {
        let mut store = TrafficStore::new();
        assert!(store.is_empty());

        store.upsert(Category::User, "bob", Direction::Uplink, 100);
        store.upsert(Category::User, "bob", Direction::Downlink, 40);
        assert_eq!(store.len(), 1);

        let rec = store.get(Category::User, "bob").unwrap();
        assert_eq!(rec.up_total, 100);
        assert_eq!(rec.down_total, 40);
        assert_eq!(rec.last_up, 0);

        store.upsert(Category::User, "bob", Direction::Uplink, 90);
        assert_eq!(store.get(Category::User, "bob").unwrap().up_total, 90);
    }

    #[test]
    fn duplicate_report_last_write_wins() {
        let mut store = TrafficStore::new();
        store.upsert(Category::User, "bob", Direction::Uplink, 10);
        store.upsert(Category::User, "bob", Direction::Uplink, 25);

        let deltas = store.advance(Category::User);
        assert_eq!(deltas.len(), 1);
        assert_eq!(deltas[0].1.up, 25);
    }

    #[test]
    fn categories_are_separate_entities() {
        let mut store = TrafficStore::new();
        store.upsert(Category::User, "api", Direction::Uplink, 1);
        store.upsert(Category::Inbound, "api", Direction::Uplink, 2);

        assert_eq!(store.len(), 2);
        assert_eq!(store.count(Category::User), 1);
        assert_eq!(store.count(Category::Inbound), 1);
        assert_eq!(store.get(Category::Inbound, "api").unwrap().up_total, 2);
    }

    #[test]
    fn advance_only_touches_requested_category() {
        let mut store = TrafficStore::new();
        store.upsert(Category::User, "alice", Direction::Uplink, 50);
        store.upsert(Category::Inbound, "socks", Direction::Uplink, 70);

        let deltas = store.advance(Category::User);
        assert_eq!(deltas.len(), 1);
        assert_eq!(deltas[0].0, EntityKey::new(Category::User, "alice"));

        assert_eq!(store.get(Category::User, "alice").unwrap().last_up, 50);
        assert_eq!(store.get(Category::Inbound, "socks").unwrap().last_up, 0);
    }

    #[test]
    fn identities_are_case_sensitive() {
        let mut store = TrafficStore::new();
        store.upsert(Category::User, "Bob", Direction::Uplink, 1);
        store.upsert(Category::User, "bob", Direction::Uplink, 1);
        store.upsert(Category::User, "bob ", Direction::Uplink, 1);
        assert_eq!(store.len(), 3);
    }
}
