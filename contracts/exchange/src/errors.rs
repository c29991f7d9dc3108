//! Typed error handling for the exchange contract.
//!
//! Uses `#[derive(near_sdk::FunctionError)]` from the NEAR SDK to enable
//! `#[handle_result]` on public methods. When a method returns
//! `Err(ExchangeError::Xxx)`, the SDK calls `env::panic_str()` with the
//! Display message — same on-wire behaviour as raw panics, but with
//! structured, testable code. Every failure kind a client reacts to
//! differently (re-approve, top up, refresh) is its own variant.

use near_sdk_macros::NearSchema;
use token_ledger::LedgerError;

#[derive(NearSchema, near_sdk::FunctionError)]
#[abi(borsh, json)]
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub enum ExchangeError {
    /// Zero amount where a positive one is required.
    InvalidAmount(String),
    /// Requested offer id was never allocated.
    NotFound(String),
    /// Caller lacks permission (non-creator cancel, non-owner mint).
    Unauthorized(String),
    /// Offer was already cancelled or accepted.
    AlreadyInactive(String),
    /// Ledger rejected a transfer for lack of balance.
    InsufficientFunds(String),
    /// Ledger rejected a transfer for lack of allowance.
    InsufficientAllowance(String),
}

impl std::fmt::Display for ExchangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidAmount(msg) => write!(f, "Invalid amount: {}", msg),
            Self::NotFound(msg) => write!(f, "Not found: {}", msg),
            Self::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            Self::AlreadyInactive(msg) => write!(f, "Already inactive: {}", msg),
            Self::InsufficientFunds(msg) => write!(f, "Insufficient funds: {}", msg),
            Self::InsufficientAllowance(msg) => write!(f, "Insufficient allowance: {}", msg),
        }
    }
}

// ── Factory helpers for common errors ────────────────────────────────────────

impl ExchangeError {
    pub fn offer_not_found(id: u64) -> Self {
        Self::NotFound(format!("Offer {} does not exist", id))
    }
    pub fn offer_inactive(id: u64) -> Self {
        Self::AlreadyInactive(format!("Offer {} was already cancelled or accepted", id))
    }
    pub fn only_creator() -> Self {
        Self::Unauthorized("Only the offer creator can cancel".into())
    }
    pub fn only_owner() -> Self {
        Self::Unauthorized("Only the contract owner can mint".into())
    }
    pub fn zero_amount() -> Self {
        Self::InvalidAmount("Offer amounts must be positive".into())
    }
}

impl From<LedgerError> for ExchangeError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InsufficientFunds => {
                Self::InsufficientFunds("Balance too low for transfer".into())
            }
            LedgerError::InsufficientAllowance => {
                Self::InsufficientAllowance("Approve the exchange for this amount first".into())
            }
        }
    }
}
