/// Opaque supplier identifier assigned by the backend.
pub type SupplierId = String;

/// All timestamps are local wall-clock times.
pub type Timestamp = chrono::NaiveDateTime;
