//! Balance and allowance bookkeeping for a single fungible asset.
//!
//! One `TokenLedger` instance holds the full accounting for one token:
//! per-account balances, per-(owner, spender) allowances, and the total
//! supply. The exchange contract embeds one instance per traded asset and
//! moves funds only through the transfer primitives here — it never touches
//! balances directly.
//!
//! Transfers check everything before mutating anything, so a rejected call
//! leaves the ledger untouched.

use near_sdk::borsh::{BorshDeserialize, BorshSerialize};
use near_sdk::store::LookupMap;
use near_sdk::{near, AccountId, IntoStorageKey};

/// Rejection from a transfer primitive. Callers surface these unchanged so
/// clients can tell "top up your balance" apart from "re-approve the spender".
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum LedgerError {
    InsufficientFunds,
    InsufficientAllowance,
}

/// Token descriptor, fixed at construction.
#[near(serializers = [borsh, json])]
#[derive(Clone)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

#[near(serializers = [borsh])]
pub struct TokenLedger {
    name: String,
    symbol: String,
    decimals: u8,
    total_supply: u128,
    balances: LookupMap<AccountId, u128>,
    /// Keyed by (owner, spender).
    allowances: LookupMap<(AccountId, AccountId), u128>,
}

impl TokenLedger {
    pub fn new<B, A>(
        name: impl Into<String>,
        symbol: impl Into<String>,
        decimals: u8,
        balances_prefix: B,
        allowances_prefix: A,
    ) -> Self
    where
        B: IntoStorageKey,
        A: IntoStorageKey,
    {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            decimals,
            total_supply: 0,
            balances: LookupMap::new(balances_prefix),
            allowances: LookupMap::new(allowances_prefix),
        }
    }

    // --- Views ---

    pub fn balance_of(&self, account_id: &AccountId) -> u128 {
        self.balances.get(account_id).copied().unwrap_or(0)
    }

    pub fn allowance(&self, owner_id: &AccountId, spender_id: &AccountId) -> u128 {
        self.allowances
            .get(&(owner_id.clone(), spender_id.clone()))
            .copied()
            .unwrap_or(0)
    }

    pub fn total_supply(&self) -> u128 {
        self.total_supply
    }

    pub fn metadata(&self) -> TokenMetadata {
        TokenMetadata {
            name: self.name.clone(),
            symbol: self.symbol.clone(),
            decimals: self.decimals,
        }
    }

    // --- Mutations ---

    /// Issues new supply to `account_id`.
    pub fn mint(&mut self, account_id: &AccountId, amount: u128) {
        let balance = self.balance_of(account_id);
        self.balances.insert(account_id.clone(), balance + amount);
        self.total_supply += amount;
    }

    /// Sets (not adds to) the amount `spender_id` may move out of
    /// `owner_id`'s balance.
    pub fn approve(&mut self, owner_id: &AccountId, spender_id: &AccountId, amount: u128) {
        self.allowances
            .insert((owner_id.clone(), spender_id.clone()), amount);
    }

    /// Moves `amount` from `from` to `to`. Fails without mutation if `from`
    /// holds less than `amount`.
    pub fn transfer(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        amount: u128,
    ) -> Result<(), LedgerError> {
        let from_balance = self.balance_of(from);
        if from_balance < amount {
            return Err(LedgerError::InsufficientFunds);
        }

        self.balances.insert(from.clone(), from_balance - amount);
        let to_balance = self.balance_of(to);
        self.balances.insert(to.clone(), to_balance + amount);
        Ok(())
    }

    /// Moves `amount` from `owner_id` to `to` on the authority of
    /// `spender_id`, debiting the (owner, spender) allowance. Checks the
    /// allowance and the balance before mutating either.
    pub fn transfer_from(
        &mut self,
        spender_id: &AccountId,
        owner_id: &AccountId,
        to: &AccountId,
        amount: u128,
    ) -> Result<(), LedgerError> {
        let approved = self.allowance(owner_id, spender_id);
        if approved < amount {
            return Err(LedgerError::InsufficientAllowance);
        }
        if self.balance_of(owner_id) < amount {
            return Err(LedgerError::InsufficientFunds);
        }

        self.allowances
            .insert((owner_id.clone(), spender_id.clone()), approved - amount);
        self.transfer(owner_id, to, amount)
    }
}
