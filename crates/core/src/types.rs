/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// 1-based rank within a display sequence (`display_order` columns).
/// Not unique; ties fall back to id order.
pub type DisplayOrder = i32;
