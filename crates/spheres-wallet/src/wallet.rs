//! Wallet aggregate
//!
//! A wallet is owned exclusively by its user and lives exactly as long as
//! the user does. Its history is append-only and chronological.

use crate::error::WalletError;
use crate::transaction::Transaction;
use serde::{Deserialize, Serialize};
use spheres_core::WalletAddress;

/// A user's wallet: balance plus chronological transaction history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    /// Primary key; equals the owning user's `wallet_address`
    pub address: WalletAddress,
    /// Current balance; never negative
    balance: u64,
    /// Append-only history, ordered by `created_at`
    transactions: Vec<Transaction>,
}

impl Wallet {
    /// Open an empty wallet at an externally derived address.
    pub fn new(address: WalletAddress) -> Self {
        Self {
            address,
            balance: 0,
            transactions: Vec::new(),
        }
    }

    /// Current balance.
    pub fn balance(&self) -> u64 {
        self.balance
    }

    /// Full history, oldest first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Append a transaction to the history.
    ///
    /// The wallet must be one side of the transfer, and the entry must not
    /// be older than the newest recorded one. There is no removal path.
    pub fn record(&mut self, transaction: Transaction) -> Result<(), WalletError> {
        if !transaction.involves(&self.address) {
            return Err(WalletError::ForeignTransaction {
                address: self.address.clone(),
                transaction_id: transaction.id,
            });
        }
        if let Some(last) = self.transactions.last() {
            if transaction.created_at.is_before(last.created_at) {
                return Err(WalletError::NonChronologicalAppend {
                    transaction_id: transaction.id,
                });
            }
        }
        self.transactions.push(transaction);
        Ok(())
    }

    /// Look up a recorded transaction.
    pub fn transaction(&self, id: &spheres_core::TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == *id)
    }

    /// Mutable access to a recorded transaction, for settlement updates.
    pub fn transaction_mut(
        &mut self,
        id: &spheres_core::TransactionId,
    ) -> Option<&mut Transaction> {
        self.transactions.iter_mut().find(|t| t.id == *id)
    }

    /// Credit settled incoming funds.
    pub fn credit(&mut self, amount: u64) {
        self.balance = self.balance.saturating_add(amount);
    }

    /// Debit settled outgoing funds.
    ///
    /// The authoritative overdraw check runs at the external ledger before
    /// settlement; this local floor only keeps the balance non-negative.
    pub fn debit(&mut self, amount: u64) -> Result<(), WalletError> {
        if amount > self.balance {
            return Err(WalletError::InsufficientFunds {
                balance: self.balance,
                requested: amount,
            });
        }
        self.balance -= amount;
        Ok(())
    }
}
