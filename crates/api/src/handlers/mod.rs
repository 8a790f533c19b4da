//! HTTP request handlers, grouped by resource.

pub mod auth;
pub mod images;
pub mod report_types;
pub mod reports;
