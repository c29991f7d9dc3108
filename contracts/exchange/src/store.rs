//! Offer Store and per-side active-set indexes.
//!
//! The store is append-only: records are flagged inactive, never deleted,
//! so any id ever allocated stays resolvable for history lookups. The
//! indexes keep enumeration of tradable offers proportional to the number
//! of active offers rather than the number ever created.

use near_sdk::store::{LookupMap, Vector};
use near_sdk::{env, near, IntoStorageKey};

use crate::types::Offer;

/// Durable `id -> Offer` mapping plus the strictly increasing id counter.
#[near(serializers = [borsh])]
pub struct OfferStore {
    offers: LookupMap<u64, Offer>,
    next_id: u64,
}

impl OfferStore {
    pub fn new<S: IntoStorageKey>(prefix: S) -> Self {
        Self {
            offers: LookupMap::new(prefix),
            // Ids start at 1; 0 is never a valid offer id.
            next_id: 1,
        }
    }

    /// Returns the next unused id and advances the counter. Ids are never
    /// reused, even after the offer becomes inactive.
    pub fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn put(&mut self, offer: Offer) {
        self.offers.insert(offer.id, offer);
    }

    pub fn get(&self, id: u64) -> Option<&Offer> {
        self.offers.get(&id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut Offer> {
        self.offers.get_mut(&id)
    }
}

/// Ordered ids of currently active offers for one side.
#[near(serializers = [borsh])]
pub struct ActiveIndex {
    ids: Vector<u64>,
}

impl ActiveIndex {
    pub fn new<S: IntoStorageKey>(prefix: S) -> Self {
        Self {
            ids: Vector::new(prefix),
        }
    }

    /// Called exactly once per offer, at creation.
    pub fn add(&mut self, id: u64) {
        self.ids.push(id);
    }

    /// Swap-with-last removal, O(1) mutation after the scan; the order of
    /// the remaining ids is unspecified. An absent id means the
    /// active-membership invariant was broken, so fail fast.
    pub fn remove(&mut self, id: u64) {
        let pos = self
            .ids
            .iter()
            .position(|existing| *existing == id)
            .unwrap_or_else(|| env::panic_str("Active index is missing an active offer id"));
        self.ids.swap_remove(pos as u32);
    }

    /// Read-only snapshot.
    pub fn list(&self) -> Vec<u64> {
        self.ids.iter().copied().collect()
    }
}
