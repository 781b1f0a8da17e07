//! Wallet transactions
//!
//! A transaction's kind carries its platform context in the variant: an
//! entry fee names the sphere it buys into, a tip names the post it rewards.
//! Status moves pending to completed or failed exactly once; terminal rows
//! are immutable.

use crate::error::WalletError;
use serde::{Deserialize, Serialize};
use spheres_core::{PostId, SphereId, Timestamp, TransactionId, WalletAddress};

/// What a transaction pays for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Plain wallet-to-wallet transfer
    Transfer,
    /// One-time fee to enter a sphere
    EntryFee {
        /// The sphere being joined
        sphere_id: SphereId,
    },
    /// Tip attached to a post
    Tip {
        /// The post being tipped
        post_id: PostId,
    },
    /// Unlock payment for premium content
    PremiumUnlock {
        /// The post being unlocked
        post_id: PostId,
    },
}

/// Settlement state of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TransactionStatus {
    /// Submitted, not yet settled
    #[default]
    Pending,
    /// Settled on the ledger
    Completed,
    /// Rejected or dropped by the ledger
    Failed,
}

impl TransactionStatus {
    /// True once the status can never change again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Short label for logs and errors.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

/// A value transfer between two wallets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,
    /// Paying wallet
    pub sender: WalletAddress,
    /// Receiving wallet
    pub receiver: WalletAddress,
    /// Amount moved; always positive
    pub amount: u64,
    /// What the transfer pays for
    pub kind: TransactionKind,
    /// Settlement state
    pub status: TransactionStatus,
    /// On-chain hash once the ledger has one
    pub chain_tx_hash: Option<String>,
    /// Submission instant
    pub created_at: Timestamp,
    /// Last status-change instant
    pub updated_at: Timestamp,
}

impl Transaction {
    /// Create a pending transaction.
    ///
    /// Both addresses must resolve to existing wallets; that lookup, like
    /// the overdraw check, belongs to the external ledger boundary.
    pub fn new(
        id: TransactionId,
        sender: WalletAddress,
        receiver: WalletAddress,
        amount: u64,
        kind: TransactionKind,
        now: Timestamp,
    ) -> Result<Self, WalletError> {
        if amount == 0 {
            return Err(WalletError::ZeroAmount);
        }
        Ok(Self {
            id,
            sender,
            receiver,
            amount,
            kind,
            status: TransactionStatus::Pending,
            chain_tx_hash: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Record the ledger's settlement hash. Only a pending row can take one.
    pub fn record_chain_hash(
        &mut self,
        hash: impl Into<String>,
        now: Timestamp,
    ) -> Result<(), WalletError> {
        self.ensure_pending()?;
        self.chain_tx_hash = Some(hash.into());
        self.updated_at = now;
        Ok(())
    }

    /// Settle the transaction. One-way; a terminal row never changes.
    pub fn complete(&mut self, now: Timestamp) -> Result<(), WalletError> {
        self.ensure_pending()?;
        self.status = TransactionStatus::Completed;
        self.updated_at = now;
        Ok(())
    }

    /// Mark the transaction failed. One-way; a terminal row never changes.
    pub fn fail(&mut self, now: Timestamp) -> Result<(), WalletError> {
        self.ensure_pending()?;
        self.status = TransactionStatus::Failed;
        self.updated_at = now;
        Ok(())
    }

    /// True if `address` pays or receives in this transaction.
    pub fn involves(&self, address: &WalletAddress) -> bool {
        self.sender == *address || self.receiver == *address
    }

    fn ensure_pending(&self) -> Result<(), WalletError> {
        if self.status.is_terminal() {
            return Err(WalletError::TerminalTransaction {
                transaction_id: self.id,
            });
        }
        Ok(())
    }
}
