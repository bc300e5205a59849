/// Diameter at which border widths, bulb sizes and pointer geometry are
/// authored. Everything scales linearly from this.
pub const REFERENCE_WHEEL_SIZE: f64 = 200.0;

/// Guaranteed number of full turns per spin so short hops still read as a
/// real spin.
pub const FULL_ROTATIONS_BASE: f64 = 3.0 * 360.0;

/// Subtracted from the target angle so the wheel never settles exactly on
/// a wedge boundary.
pub const BOUNDARY_EPSILON_DEG: f64 = 0.5;

/// Grace period added to the spin duration before the fallback timer
/// forces completion.
pub const SETTLE_FALLBACK_GRACE_MS: u32 = 1000;

pub const SPIN_DURATION_SLOW_MS: f64 = 9000.0;
pub const SPIN_DURATION_NORMAL_MS: f64 = 6000.0;
pub const SPIN_DURATION_FAST_MS: f64 = 3500.0;
