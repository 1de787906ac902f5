//! # Storage Module
//!
//! Data access for the donor directory: the storage trait the domain layer
//! programs against, the in-memory donor repository, and the file-backed
//! preference store.

pub mod memory;
pub mod preferences;
pub mod traits;

pub use memory::MemoryDonorRepository;
pub use preferences::{PreferenceStore, Preferences};
pub use traits::DonorStorage;
