/// Minimum pixel count (h*w) to use lane-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Default absolute flatness tolerance for the overscan plateau, in counts.
pub const DEFAULT_UNIFORMITY_TOLERANCE: f64 = 2.0;

/// Default flatness tolerance as a fraction of the plateau level (1%).
pub const DEFAULT_RELATIVE_TOLERANCE: f64 = 0.01;

/// Default number of trailing overscan values used to estimate the plateau level.
pub const DEFAULT_TAIL_WINDOW: usize = 8;

/// Default number of flat lines at the end of the strip at or below which
/// leakage makes the overscan unusable.
pub const DEFAULT_LEAKAGE_MARGIN: usize = 2;

/// Default spread (counts) below which plateaus of different frame kinds agree.
pub const DEFAULT_CONSISTENCY_TOLERANCE: f64 = 5.0;

/// Default spread (counts) above which the overscan absorbs a frame-kind offset.
pub const DEFAULT_LARGE_OFFSET_THRESHOLD: f64 = 20.0;

/// Default window (counts) around `rate * exposure` accepted as dark current.
pub const DEFAULT_DARK_CURRENT_TOLERANCE: f64 = 3.0;

/// Largest value representable in a 16-bit output image.
pub const MAX_U16_COUNT: f32 = 65_535.0;
