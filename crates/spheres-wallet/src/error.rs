//! Wallet error types

use spheres_core::{TransactionId, WalletAddress};
use thiserror::Error;

/// Errors from wallet and transaction operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    /// Transactions must move a positive amount.
    #[error("transaction amount must be positive")]
    ZeroAmount,

    /// The transaction has already reached a terminal status.
    #[error("transaction {transaction_id} is terminal and cannot change")]
    TerminalTransaction {
        /// The transaction in question
        transaction_id: TransactionId,
    },

    /// The transaction involves neither side of this wallet.
    #[error("transaction {transaction_id} does not involve wallet {address}")]
    ForeignTransaction {
        /// The wallet the record was offered to
        address: WalletAddress,
        /// The transaction in question
        transaction_id: TransactionId,
    },

    /// History is append-only in chronological order.
    #[error("transaction {transaction_id} is older than the wallet's newest entry")]
    NonChronologicalAppend {
        /// The transaction in question
        transaction_id: TransactionId,
    },

    /// Local mirror of the ledger's balance floor; the authoritative
    /// overdraw check runs at the external ledger boundary.
    #[error("insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds {
        /// Current balance
        balance: u64,
        /// Requested debit
        requested: u64,
    },
}
