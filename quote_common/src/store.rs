//! In-memory quote store.
//!
//! `QuoteStore` owns the session's quote collection and the active filter selection.
//! The collection is append-only: `add_quote` pushes to the end without validation or
//! deduplication. `update_filters` shallow-merges a partial update into the selection.
//! Readers get borrowed snapshots; the store itself never applies the filters.
//!
//! The store is not synchronized. It is meant to be owned by one event loop that
//! serializes all mutations.

use chrono::{DateTime, Utc};
use log::{debug, info};
use rand::Rng;
use serde::Serialize;

use crate::filter::{FilterSelection, FilterUpdate};
use crate::generator::QuoteGenerator;
use crate::quote::Quote;

/// Read-only view of the store handed to consumers after each change.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StoreSnapshot<'a> {
    /// Full collection, in insertion order.
    pub quotes: &'a [Quote],
    /// Active filter selection.
    pub filters: &'a FilterSelection,
}

impl<'a> StoreSnapshot<'a> {
    /// Quotes admitted by the active filters, in collection order.
    pub fn visible(&self) -> Vec<&'a Quote> {
        self.filters.apply(self.quotes)
    }
}

/// Consumer that re-reads the store whenever it changes.
pub trait StoreListener {
    /// Called with the current snapshot after every mutation.
    fn on_change(&mut self, snapshot: &StoreSnapshot<'_>);
}

/// Owner of the quote collection and filter selection for one session.
#[derive(Debug, Clone, Default)]
pub struct QuoteStore {
    quotes: Vec<Quote>,
    filters: FilterSelection,
}

impl QuoteStore {
    /// Create a store holding `quotes`, with every filter set to `"all"`.
    pub fn new(quotes: Vec<Quote>) -> Self {
        Self {
            quotes,
            filters: FilterSelection::default(),
        }
    }

    /// Create a store filled with `count` generated quotes.
    pub fn generated<R: Rng>(
        generator: &QuoteGenerator,
        count: usize,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> Self {
        let store = Self::new(generator.generate(count, rng, now));
        info!("Store initialized with {} generated quotes", store.len());
        store
    }

    /// Append `quote` to the end of the collection.
    pub fn add_quote(&mut self, quote: Quote) {
        debug!("Adding quote {} ({}, ${})", quote.id, quote.service, quote.price);
        self.quotes.push(quote);
    }

    /// Merge a partial filter update into the current selection.
    pub fn update_filters(&mut self, update: FilterUpdate) {
        self.filters.merge(&update);
        debug!("Filters now {}", self.filters);
    }

    /// Full collection, in insertion order.
    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    /// Active filter selection.
    pub fn filters(&self) -> &FilterSelection {
        &self.filters
    }

    /// Borrow both the collection and the selection.
    pub fn snapshot(&self) -> StoreSnapshot<'_> {
        StoreSnapshot {
            quotes: &self.quotes,
            filters: &self.filters,
        }
    }

    /// First quote with the given id.
    pub fn find(&self, id: u32) -> Option<&Quote> {
        self.quotes.iter().find(|quote| quote.id == id)
    }

    /// Id for the next submitted quote: one past the highest id held.
    pub fn next_id(&self) -> u32 {
        self.quotes
            .iter()
            .map(|quote| quote.id)
            .max()
            .map_or(1, |max| max.saturating_add(1))
    }

    /// Number of quotes held.
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn next_id_starts_at_one_and_follows_the_maximum() {
        let mut store = QuoteStore::default();
        assert_eq!(store.next_id(), 1);

        let generated = QuoteGenerator::default().generate(3, &mut StdRng::seed_from_u64(1), Utc::now());
        let mut late = generated[0].clone();
        late.id = 40;
        store.add_quote(late);
        store.add_quote(generated[1].clone());
        assert_eq!(store.next_id(), 41);
    }

    #[test]
    fn find_returns_first_match_for_duplicate_ids() {
        let quotes = QuoteGenerator::default().generate(2, &mut StdRng::seed_from_u64(8), Utc::now());
        let mut store = QuoteStore::new(quotes.clone());
        let mut dup = quotes[1].clone();
        dup.id = 1;
        store.add_quote(dup);
        assert_eq!(store.find(1), Some(&quotes[0]));
        assert_eq!(store.find(99), None);
    }
}
