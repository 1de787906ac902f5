//! REST handlers, grouped by resource, plus the DTO mappers.

pub mod auth_apis;
pub mod donor_apis;
pub mod mappers;
pub mod preference_apis;
pub mod reference_apis;
pub mod request_apis;
pub mod transfer_apis;

pub use auth_apis::*;
pub use donor_apis::*;
pub use preference_apis::*;
pub use reference_apis::*;
pub use request_apis::*;
pub use transfer_apis::*;
