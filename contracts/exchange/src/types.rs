//! Exchange domain types.

use near_sdk::json_types::U128;
use near_sdk::{near, AccountId};

/// Names one of the two traded assets.
#[near(serializers = [borsh, json])]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetId {
    A,
    B,
}

/// Which asset the offer's creator is giving up. The counter asset is
/// implied: an `OffersAssetA` offer asks for asset B, and vice versa.
#[near(serializers = [borsh, json])]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    OffersAssetA,
    OffersAssetB,
}

impl Side {
    /// The asset the creator deposits into custody at creation.
    pub fn offered_asset(self) -> AssetId {
        match self {
            Side::OffersAssetA => AssetId::A,
            Side::OffersAssetB => AssetId::B,
        }
    }

    /// The asset an acceptor must supply.
    pub fn wanted_asset(self) -> AssetId {
        match self {
            Side::OffersAssetA => AssetId::B,
            Side::OffersAssetB => AssetId::A,
        }
    }
}

/// A posted, funded trade proposal. Everything but `active` is immutable
/// after creation, and `active` only ever flips true -> false.
#[near(serializers = [borsh, json])]
#[derive(Clone)]
pub struct Offer {
    pub id: u64,
    pub creator: AccountId,
    pub side: Side,
    /// Quantity of the offered asset, held in exchange custody while active.
    pub amount_offered: u128,
    /// Quantity of the counter asset required to accept.
    pub amount_wanted: u128,
    pub active: bool,
    /// Block timestamp (ns) at creation.
    pub created_at: u64,
}

/// Per-asset init parameters.
#[near(serializers = [json])]
#[derive(Clone)]
pub struct AssetConfig {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Minted to the contract owner at init.
    pub initial_supply: U128,
}
