//! Clock constants and input guard limits.

pub const HOURS_PER_DAY: u8 = 24;
pub const MINUTES_PER_HOUR: u8 = 60;

/// Upper bound on records preallocated from a header count. Larger batches
/// still parse; the vectors just grow as lines are read.
pub const MAX_PREALLOC_RECORDS: usize = 65_536;

pub const MAX_PRODUCT_ID_LEN: usize = 256;
