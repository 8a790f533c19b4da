//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod image_repo;
pub mod report_repo;
pub mod report_type_repo;
pub mod role_repo;
pub mod user_repo;

pub use image_repo::ImageRepo;
pub use report_repo::ReportRepo;
pub use report_type_repo::ReportTypeRepo;
pub use role_repo::RoleRepo;
pub use user_repo::UserRepo;
