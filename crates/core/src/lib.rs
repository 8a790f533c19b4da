//! Framework-free domain logic for the Civica report platform.
//!
//! - [`error`] -- domain error taxonomy shared by all crates.
//! - [`types`] -- common type aliases (timestamps, role ids).
//! - [`roles`] -- well-known role name constants.
//! - [`report_state`] -- the closed report lifecycle enumeration.
//! - [`validation`] -- explicit validator functions run at the HTTP boundary.
//! - [`uploads`] -- stored-filename derivation and mime allow-list for photo evidence.

pub mod error;
pub mod report_state;
pub mod roles;
pub mod types;
pub mod uploads;
pub mod validation;
