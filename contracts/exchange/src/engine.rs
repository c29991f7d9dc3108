//! Offer lifecycle engine: create, cancel, accept.
//!
//! Each operation runs as one indivisible unit under the runtime's total
//! order of calls. Every precondition is checked before any mutation, so a
//! rejected call leaves the store, the indexes, and both ledgers exactly as
//! they were. The `active` flag is the single source of truth that makes
//! accept-vs-cancel and double-accept conflicts resolve to exactly one
//! winner: the later call observes `active == false` and is rejected.
//!
//! Caller identity is always an explicit parameter here; only the entry
//! points in `lib.rs` read it from the runtime context.

use near_sdk::json_types::U128;
use near_sdk::{env, AccountId};

use crate::errors::ExchangeError;
use crate::events::ExchangeEvent;
use crate::types::{Offer, Side};
use crate::Exchange;

impl Exchange {
    /// Funds and records a new offer. The custody debit comes first: id
    /// allocation and the record are conditioned on it succeeding, so a
    /// failed debit consumes nothing.
    pub(crate) fn internal_create_offer(
        &mut self,
        caller: &AccountId,
        side: Side,
        amount_offered: u128,
        amount_wanted: u128,
    ) -> Result<u64, ExchangeError> {
        if amount_offered == 0 || amount_wanted == 0 {
            return Err(ExchangeError::zero_amount());
        }

        let custody = env::current_account_id();
        self.ledger_mut(side.offered_asset())
            .transfer_from(&custody, caller, &custody, amount_offered)?;

        let id = self.offers.allocate_id();
        self.offers.put(Offer {
            id,
            creator: caller.clone(),
            side,
            amount_offered,
            amount_wanted,
            active: true,
            created_at: env::block_timestamp(),
        });
        self.index_mut(side).add(id);

        ExchangeEvent::OfferCreated {
            id,
            creator: caller.clone(),
            side,
            amount_offered: U128(amount_offered),
            amount_wanted: U128(amount_wanted),
        }
        .emit();
        Ok(id)
    }

    /// Refunds custody to the creator and retires the offer.
    pub(crate) fn internal_cancel_offer(
        &mut self,
        caller: &AccountId,
        id: u64,
    ) -> Result<(), ExchangeError> {
        let offer = self
            .offers
            .get(id)
            .cloned()
            .ok_or_else(|| ExchangeError::offer_not_found(id))?;
        if &offer.creator != caller {
            return Err(ExchangeError::only_creator());
        }
        if !offer.active {
            return Err(ExchangeError::offer_inactive(id));
        }

        let custody = env::current_account_id();
        self.ledger_mut(offer.side.offered_asset())
            .transfer(&custody, &offer.creator, offer.amount_offered)?;

        self.retire(id, offer.side);

        ExchangeEvent::OfferCancelled {
            id,
            creator: offer.creator,
        }
        .emit();
        Ok(())
    }

    /// Settles the two-sided trade: counter asset caller -> creator
    /// (debiting the caller's allowance), offered asset custody -> caller,
    /// then retires the offer. All-or-nothing; an offer settles at most
    /// once because retirement flips `active`.
    pub(crate) fn internal_accept_offer(
        &mut self,
        caller: &AccountId,
        id: u64,
    ) -> Result<(), ExchangeError> {
        let offer = self
            .offers
            .get(id)
            .cloned()
            .ok_or_else(|| ExchangeError::offer_not_found(id))?;
        if !offer.active {
            return Err(ExchangeError::offer_inactive(id));
        }

        let custody = env::current_account_id();
        self.ledger_mut(offer.side.wanted_asset()).transfer_from(
            &custody,
            caller,
            &offer.creator,
            offer.amount_wanted,
        )?;
        // Custody holds amount_offered for every active offer, so this
        // cannot fail once the offer passed the active check.
        self.ledger_mut(offer.side.offered_asset())
            .transfer(&custody, caller, offer.amount_offered)?;

        self.retire(id, offer.side);

        ExchangeEvent::OfferAccepted {
            id,
            creator: offer.creator,
            acceptor: caller.clone(),
            amount_offered: U128(offer.amount_offered),
            amount_wanted: U128(offer.amount_wanted),
        }
        .emit();
        Ok(())
    }

    /// Flips `active` and deindexes. The record itself is kept for history.
    fn retire(&mut self, id: u64, side: Side) {
        let record = self
            .offers
            .get_mut(id)
            .unwrap_or_else(|| env::panic_str("Retiring an offer that was never stored"));
        record.active = false;
        self.index_mut(side).remove(id);
    }
}
