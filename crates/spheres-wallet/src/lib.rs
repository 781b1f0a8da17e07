//! Spheres Wallet - Ledger-Facing Records
//!
//! Wallet-side records for the Spheres platform:
//!
//! - [`Wallet`]: balance plus append-only chronological history, owned
//!   exclusively by its user
//! - [`Transaction`]: value transfers whose kind carries the platform
//!   context (entry fee, tip, premium unlock) and whose status settles
//!   exactly once
//! - [`TransactionSummary`]: the viewer-relative projection history screens
//!   render
//!
//! Address derivation, signing, and the authoritative overdraw check all
//! live at the external ledger boundary; this crate keeps the local
//! invariants (positive amounts, one-way settlement, non-negative balance,
//! ordered history).

pub mod error;
pub mod summary;
pub mod transaction;
pub mod wallet;

pub use error::WalletError;
pub use summary::{TransactionSummary, TransferDirection};
pub use transaction::{Transaction, TransactionKind, TransactionStatus};
pub use wallet::Wallet;
