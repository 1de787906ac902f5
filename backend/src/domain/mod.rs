//! # Domain Module
//!
//! Business logic for the blood-donor directory.
//!
//! This module encapsulates the core rules, entities and services of the
//! directory. It operates independently of any specific UI framework or
//! storage mechanism.
//!
//! ## Module Organization
//!
//! - **donor_service**: donor CRUD, filtering/sorting, defaulting, id allocation
//! - **import_export_service**: CSV and JSON codecs for the admin panel
//! - **validation**: field-level validation with accumulated errors
//! - **generator**: synthetic seed data for each process start
//! - **reference**: static district/division/blood-group tables
//! - **request_service**: blood request intake
//! - **auth_service**: mock login/registration flow
//!
//! ## Key Rules
//!
//! - A donor becomes eligible again 90 days after their last donation
//! - A donor's division is derived from their district at creation time
//! - CSV import appends; JSON import replaces the whole collection
//! - Validation collects every failing rule rather than stopping early

pub mod auth_service;
pub mod commands;
pub mod donor_service;
pub mod generator;
pub mod import_export_service;
pub mod models;
pub mod reference;
pub mod request_service;
pub mod validation;

pub use auth_service::AuthService;
pub use donor_service::DonorService;
pub use import_export_service::ImportExportService;
pub use request_service::BloodRequestService;
