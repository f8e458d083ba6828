pub const OK: i32 = 0;
/// The call completed but the batch reported success=false.
pub const BATCH_FAILED: i32 = 1;
pub const CONFIG_ERROR: i32 = 2;
