//! Transaction view projection
//!
//! Screens render history relative to the wallet looking at it: the same
//! transfer is "sent" in one wallet and "received" in the other. That
//! viewer-relative shape is a projection of the canonical [`Transaction`],
//! never a second entity.

use crate::transaction::{Transaction, TransactionStatus};
use serde::{Deserialize, Serialize};
use spheres_core::{Timestamp, TransactionId, WalletAddress};

/// Direction of a transfer relative to the viewing wallet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransferDirection {
    /// The viewer paid
    Sent,
    /// The viewer was paid
    Received,
    /// Both sides are the viewer
    SelfTransfer,
}

/// Viewer-relative rendering of a transaction for history screens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionSummary {
    /// The underlying transaction
    pub id: TransactionId,
    /// Direction relative to the viewer
    pub direction: TransferDirection,
    /// The other wallet involved
    pub counterparty: WalletAddress,
    /// Amount moved
    pub amount: u64,
    /// Settlement state
    pub status: TransactionStatus,
    /// Submission instant
    pub timestamp: Timestamp,
}

impl TransactionSummary {
    /// Project a transaction relative to `viewer`.
    ///
    /// Returns `None` when the viewer is on neither side; such rows never
    /// reach a wallet's history in the first place.
    pub fn project(transaction: &Transaction, viewer: &WalletAddress) -> Option<Self> {
        let (direction, counterparty) = if transaction.sender == *viewer
            && transaction.receiver == *viewer
        {
            (TransferDirection::SelfTransfer, transaction.sender.clone())
        } else if transaction.sender == *viewer {
            (TransferDirection::Sent, transaction.receiver.clone())
        } else if transaction.receiver == *viewer {
            (TransferDirection::Received, transaction.sender.clone())
        } else {
            return None;
        };
        Some(Self {
            id: transaction.id,
            direction,
            counterparty,
            amount: transaction.amount,
            status: transaction.status,
            timestamp: transaction.created_at,
        })
    }
}
