/// Role primary keys are PostgreSQL BIGSERIAL.
pub type RoleId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
