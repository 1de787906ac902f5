//! # Storage Traits
//!
//! Storage abstraction for the donor collection, so the domain layer can
//! work against different backends (the in-memory store used today, or a
//! durable one later) without modification.

use anyhow::Result;

use crate::domain::commands::donors::DonorPatch;
use crate::domain::models::donor::Donor;

/// Interface for donor storage operations.
///
/// Insertion order is part of the contract: `list_donors` returns records in
/// the order they were added, and `add_donor`/`add_donors` append. No
/// uniqueness check is performed at this layer; id allocation is the
/// caller's responsibility.
pub trait DonorStorage: Send + Sync {
    /// Current full list, insertion order.
    fn list_donors(&self) -> Result<Vec<Donor>>;

    /// Append a single donor.
    fn add_donor(&self, donor: Donor) -> Result<()>;

    /// Append a batch of donors, preserving the batch's order.
    fn add_donors(&self, donors: Vec<Donor>) -> Result<()>;

    /// Shallow-merge `patch` into the first donor with a matching id.
    /// Returns the updated donor, or `None` when no record matched.
    fn update_donor(&self, donor_id: &str, patch: DonorPatch) -> Result<Option<Donor>>;

    /// Remove every donor with a matching id (normally at most one).
    /// Returns whether anything was removed.
    fn delete_donor(&self, donor_id: &str) -> Result<bool>;

    /// Wholesale overwrite of the collection. Used by JSON import, which
    /// replaces rather than appends.
    fn replace_all(&self, donors: Vec<Donor>) -> Result<()>;
}
