/// Fraction of the misalignment removed per yaw update.
pub const YAW_RELAXATION: f64 = 0.2;

/// Yaw state of one turbine and its update schedule.
///
/// Updates happen on a fixed cadence: each update advances the schedule by
/// one period from the previous scheduled time, not from the time the update
/// actually ran.
#[derive(Debug, Clone, PartialEq)]
pub struct YawTracker {
    angle: f64,
    next_update: f64,
    period: f64,
}

impl YawTracker {
    /// Creates a tracker at zero yaw, first due at `first_update`.
    pub fn new(first_update: f64, period: f64) -> Self {
        Self {
            angle: 0.0,
            next_update: first_update,
            period,
        }
    }

    /// Current yaw angle (rad).
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Time of the next scheduled update (s).
    pub fn next_update(&self) -> f64 {
        self.next_update
    }

    /// Returns `true` when an update is due at `time`.
    pub fn is_due(&self, time: f64) -> bool {
        time >= self.next_update
    }

    /// Point `distance` upstream of `(x, y)` along the current yaw.
    pub fn upstream_of(&self, x: f64, y: f64, distance: f64) -> (f64, f64) {
        let (sin, cos) = self.angle.sin_cos();
        (x - distance * cos, y - distance * sin)
    }

    /// Relaxes the yaw toward the direction of the sampled wind `(u, v)` and
    /// schedules the next update. Returns the target direction.
    pub fn update(&mut self, u: f64, v: f64) -> f64 {
        let target = v.atan2(u);
        self.angle += (target - self.angle) * YAW_RELAXATION;
        self.next_update += self.period;
        target
    }
}
