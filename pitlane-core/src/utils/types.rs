/// Alias to a scalar floating type.
///
/// NOTE: Currently, prefer to use `f64` as a default floating type: lap time predictions
/// accumulate over a full race distance and `f32` loses milliseconds there.
pub type Float = f64;
