/// Invisible ratchet notches around the rim. Deliberately independent of
/// both the visible segment count and the decorative bulb count.
pub const NOTCH_COUNT: u32 = 24;

const NOTCH_ARC_DEG: f64 = 360.0 / NOTCH_COUNT as f64;

/// Rest deflection, biased slightly below the horizontal mount.
pub const REST_ANGLE_DEG: f64 = 6.0;

/// Maximum excursion either side of the rest angle.
pub const MAX_DEFLECTION_DEG: f64 = 28.0;

const STIFFNESS: f64 = 220.0;
const DAMPING: f64 = 14.0;

const IMPULSE_BASE_DEG_PER_S: f64 = 80.0;
const IMPULSE_SPEED_GAIN: f64 = 0.35;
const IMPULSE_MAX_DEG_PER_S: f64 = 900.0;

/// Frame gaps above this are treated as this, so a background-tab stall
/// cannot blow up the integrator.
const MAX_STEP_S: f64 = 0.05;

/// One-degree-of-freedom damped spring on the pointer tip's deflection
/// angle, excited by notch-crossing impulses while the wheel spins.
/// Purely cosmetic; nothing downstream reads it but the renderer.
#[derive(Debug, Clone)]
pub struct PointerPhysics {
    angle_deg: f64,
    velocity_deg_per_s: f64,
    /// Rotation seen on the previous spinning frame; `None` whenever
    /// tracking has been reset.
    last_rotation_deg: Option<f64>,
}

impl Default for PointerPhysics {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerPhysics {
    pub fn new() -> Self {
        Self {
            angle_deg: REST_ANGLE_DEG,
            velocity_deg_per_s: 0.0,
            last_rotation_deg: None,
        }
    }

    /// Current deflection in degrees.
    pub fn deflection_deg(&self) -> f64 {
        self.angle_deg
    }

    /// Advances the simulation by `dt_s` given the wheel's current
    /// rotation. Impulses fire only while `wheel_spinning`; tracking
    /// resets whenever the wheel is idle so the next spin cannot kick
    /// from stale state. When `enabled` is false the pointer holds the
    /// rest angle exactly.
    pub fn step(&mut self, rotation_deg: f64, wheel_spinning: bool, enabled: bool, dt_s: f64) -> f64 {
        if !enabled {
            self.hold_rest();
            return self.angle_deg;
        }

        let dt = dt_s.clamp(0.0, MAX_STEP_S);
        if dt == 0.0 {
            return self.angle_deg;
        }

        if wheel_spinning {
            self.apply_notch_impulses(rotation_deg, dt);
        } else {
            self.last_rotation_deg = None;
        }

        // Semi-implicit Euler on accel = -k*(x - rest) - c*v.
        let displacement = self.angle_deg - REST_ANGLE_DEG;
        let accel = -STIFFNESS * displacement - DAMPING * self.velocity_deg_per_s;
        self.velocity_deg_per_s += accel * dt;
        self.angle_deg += self.velocity_deg_per_s * dt;

        let low = REST_ANGLE_DEG - MAX_DEFLECTION_DEG;
        let high = REST_ANGLE_DEG + MAX_DEFLECTION_DEG;
        if self.angle_deg <= low || self.angle_deg >= high {
            self.angle_deg = self.angle_deg.clamp(low, high);
            self.velocity_deg_per_s = 0.0;
        }
        self.angle_deg
    }

    fn apply_notch_impulses(&mut self, rotation_deg: f64, dt: f64) {
        let Some(last) = self.last_rotation_deg else {
            // First spinning frame only seeds tracking.
            self.last_rotation_deg = Some(rotation_deg);
            return;
        };
        self.last_rotation_deg = Some(rotation_deg);

        let previous_notch = (last / NOTCH_ARC_DEG).floor() as i64;
        let current_notch = (rotation_deg / NOTCH_ARC_DEG).floor() as i64;
        let crossings = (current_notch - previous_notch).unsigned_abs();
        if crossings == 0 {
            return;
        }

        let speed = (rotation_deg - last).abs() / dt;
        let magnitude =
            (IMPULSE_BASE_DEG_PER_S + speed * IMPULSE_SPEED_GAIN).min(IMPULSE_MAX_DEG_PER_S);
        // The tip is shoved back against the direction of rotation, then
        // recoils on the spring.
        let direction = if rotation_deg >= last { -1.0 } else { 1.0 };
        for _ in 0..crossings.min(8) {
            self.velocity_deg_per_s += direction * magnitude;
        }
    }

    fn hold_rest(&mut self) {
        self.angle_deg = REST_ANGLE_DEG;
        self.velocity_deg_per_s = 0.0;
        self.last_rotation_deg = None;
    }
}
