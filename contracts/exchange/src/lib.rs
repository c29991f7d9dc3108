//! Two-asset order book exchange — funded offers, explicit two-party
//! acceptance, typed errors, NEP-297 JSON events.
//!
//! The contract is the custodian: posting an offer moves the offered amount
//! into exchange custody via an allowance-debiting transfer, and the funds
//! stay there until the offer is cancelled (refund) or accepted (two-sided
//! settlement). There is no automatic matching; every trade is an explicit
//! `accept_offer` naming one offer id.
//!
//! The two asset ledgers are embedded [`TokenLedger`] instances so every
//! funds movement commits or aborts atomically with the offer bookkeeping
//! inside a single call.

use near_sdk::json_types::U128;
use near_sdk::{env, near, AccountId, BorshStorageKey, PanicOnDefault};
use token_ledger::{TokenLedger, TokenMetadata};

// --- Modules ---

mod engine;
mod errors;
mod events;
mod store;
pub mod types;

pub use errors::ExchangeError;
pub use types::{AssetConfig, AssetId, Offer, Side};

use events::ExchangeEvent;
use store::{ActiveIndex, OfferStore};

// --- Storage Keys ---

#[near]
#[derive(BorshStorageKey)]
enum StorageKey {
    AssetABalances,
    AssetAAllowances,
    AssetBBalances,
    AssetBAllowances,
    Offers,
    ActiveSideA,
    ActiveSideB,
}

// --- Contract State ---

#[near(contract_state)]
#[derive(PanicOnDefault)]
pub struct Exchange {
    owner_id: AccountId,
    asset_a: TokenLedger,
    asset_b: TokenLedger,
    offers: OfferStore,
    active_side_a: ActiveIndex,
    active_side_b: ActiveIndex,
}

#[near]
impl Exchange {
    /// Initializes both asset ledgers and mints each initial supply to the
    /// contract owner for distribution.
    #[init]
    pub fn new(owner_id: AccountId, asset_a: AssetConfig, asset_b: AssetConfig) -> Self {
        let mut ledger_a = TokenLedger::new(
            asset_a.name,
            asset_a.symbol,
            asset_a.decimals,
            StorageKey::AssetABalances,
            StorageKey::AssetAAllowances,
        );
        ledger_a.mint(&owner_id, asset_a.initial_supply.0);

        let mut ledger_b = TokenLedger::new(
            asset_b.name,
            asset_b.symbol,
            asset_b.decimals,
            StorageKey::AssetBBalances,
            StorageKey::AssetBAllowances,
        );
        ledger_b.mint(&owner_id, asset_b.initial_supply.0);

        Self {
            owner_id,
            asset_a: ledger_a,
            asset_b: ledger_b,
            offers: OfferStore::new(StorageKey::Offers),
            active_side_a: ActiveIndex::new(StorageKey::ActiveSideA),
            active_side_b: ActiveIndex::new(StorageKey::ActiveSideB),
        }
    }

    // --- Offer Lifecycle ---

    /// Posts a funded offer. The caller must have approved the exchange for
    /// at least `amount_offered` of the offered asset beforehand. Returns
    /// the new offer id.
    #[handle_result]
    pub fn create_offer(
        &mut self,
        side: Side,
        amount_offered: U128,
        amount_wanted: U128,
    ) -> Result<u64, ExchangeError> {
        let caller = env::predecessor_account_id();
        self.internal_create_offer(&caller, side, amount_offered.0, amount_wanted.0)
    }

    /// Only the offer creator can cancel. Refunds the custody deposit.
    #[handle_result]
    pub fn cancel_offer(&mut self, id: u64) -> Result<(), ExchangeError> {
        let caller = env::predecessor_account_id();
        self.internal_cancel_offer(&caller, id)
    }

    /// Settles an active offer. The caller must have approved the exchange
    /// for at least `amount_wanted` of the counter asset beforehand.
    #[handle_result]
    pub fn accept_offer(&mut self, id: u64) -> Result<(), ExchangeError> {
        let caller = env::predecessor_account_id();
        self.internal_accept_offer(&caller, id)
    }

    // --- Token Surface ---

    /// Issues new supply. Owner only.
    #[handle_result]
    pub fn mint(
        &mut self,
        asset: AssetId,
        account_id: AccountId,
        amount: U128,
    ) -> Result<(), ExchangeError> {
        if env::predecessor_account_id() != self.owner_id {
            return Err(ExchangeError::only_owner());
        }
        self.ledger_mut(asset).mint(&account_id, amount.0);

        ExchangeEvent::TokensMinted {
            asset,
            account: account_id,
            amount,
        }
        .emit();
        Ok(())
    }

    /// Moves tokens out of the caller's own balance.
    #[handle_result]
    pub fn transfer(
        &mut self,
        asset: AssetId,
        receiver_id: AccountId,
        amount: U128,
    ) -> Result<(), ExchangeError> {
        let caller = env::predecessor_account_id();
        self.ledger_mut(asset)
            .transfer(&caller, &receiver_id, amount.0)?;
        Ok(())
    }

    /// Lets `spender_id` move up to `amount` of the caller's tokens.
    /// Replaces any prior approval for that spender.
    pub fn approve(&mut self, asset: AssetId, spender_id: AccountId, amount: U128) {
        let caller = env::predecessor_account_id();
        self.ledger_mut(asset).approve(&caller, &spender_id, amount.0);
    }

    // --- Views ---

    pub fn get_offer(&self, id: u64) -> Option<Offer> {
        self.offers.get(id).cloned()
    }

    /// Ids of currently tradable offers for one side. Order changes across
    /// removals; callers must not rely on it.
    pub fn active_offer_ids(&self, side: Side) -> Vec<u64> {
        self.index(side).list()
    }

    pub fn balance_of(&self, asset: AssetId, account_id: AccountId) -> U128 {
        U128(self.ledger(asset).balance_of(&account_id))
    }

    pub fn allowance_of(&self, asset: AssetId, owner_id: AccountId, spender_id: AccountId) -> U128 {
        U128(self.ledger(asset).allowance(&owner_id, &spender_id))
    }

    pub fn total_supply(&self, asset: AssetId) -> U128 {
        U128(self.ledger(asset).total_supply())
    }

    pub fn token_metadata(&self, asset: AssetId) -> TokenMetadata {
        self.ledger(asset).metadata()
    }

    /// Funds the exchange currently holds on behalf of active offers.
    pub fn custody_of(&self, asset: AssetId) -> U128 {
        U128(self.ledger(asset).balance_of(&env::current_account_id()))
    }

    pub fn get_owner(&self) -> AccountId {
        self.owner_id.clone()
    }
}

// --- Internal plumbing ---

impl Exchange {
    pub(crate) fn ledger(&self, asset: AssetId) -> &TokenLedger {
        match asset {
            AssetId::A => &self.asset_a,
            AssetId::B => &self.asset_b,
        }
    }

    pub(crate) fn ledger_mut(&mut self, asset: AssetId) -> &mut TokenLedger {
        match asset {
            AssetId::A => &mut self.asset_a,
            AssetId::B => &mut self.asset_b,
        }
    }

    pub(crate) fn index(&self, side: Side) -> &ActiveIndex {
        match side {
            Side::OffersAssetA => &self.active_side_a,
            Side::OffersAssetB => &self.active_side_b,
        }
    }

    pub(crate) fn index_mut(&mut self, side: Side) -> &mut ActiveIndex {
        match side {
            Side::OffersAssetA => &mut self.active_side_a,
            Side::OffersAssetB => &mut self.active_side_b,
        }
    }
}
