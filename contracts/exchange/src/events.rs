use near_sdk::json_types::U128;
use near_sdk::{near, AccountId};

use crate::types::{AssetId, Side};

#[near(event_json(standard = "nep297"))]
pub enum ExchangeEvent {
    #[event_version("1.0.0")]
    OfferCreated {
        id: u64,
        creator: AccountId,
        side: Side,
        amount_offered: U128,
        amount_wanted: U128,
    },
    #[event_version("1.0.0")]
    OfferCancelled { id: u64, creator: AccountId },
    #[event_version("1.0.0")]
    OfferAccepted {
        id: u64,
        creator: AccountId,
        acceptor: AccountId,
        amount_offered: U128,
        amount_wanted: U128,
    },
    #[event_version("1.0.0")]
    TokensMinted {
        asset: AssetId,
        account: AccountId,
        amount: U128,
    },
}
