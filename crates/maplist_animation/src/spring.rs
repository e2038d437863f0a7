//! Spring physics
//!
//! Damped harmonic springs integrated with RK4 for stability at large
//! stiffness values. Used for the elastic settle-back after an overscroll
//! release.

/// Spring parameters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    /// Restoring force per unit displacement
    pub stiffness: f32,
    /// Velocity damping coefficient
    pub damping: f32,
    /// Mass of the animated value
    pub mass: f32,
}

impl SpringConfig {
    pub const fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// Stiff spring with little wobble
    pub const fn stiff() -> Self {
        Self::new(400.0, 40.0, 1.0)
    }

    /// Soft spring with visible wobble
    pub const fn gentle() -> Self {
        Self::new(120.0, 14.0, 1.0)
    }

    /// Elastic snap-back: very stiff, slightly overdamped so the value
    /// returns fast with no rebound. Critical damping for stiffness 3000
    /// and mass 1 is 2 * sqrt(3000) ≈ 109.5.
    pub const fn snap() -> Self {
        Self::new(3000.0, 110.0, 1.0)
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::new(170.0, 26.0, 1.0)
    }
}

/// Settle thresholds: the spring is considered at rest when both the
/// displacement and the velocity drop below these.
const REST_DISPLACEMENT: f32 = 0.1;
const REST_VELOCITY: f32 = 0.1;

/// A damped spring animating a single f32 value toward a target
#[derive(Clone, Copy, Debug)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
    settled: bool,
}

impl Spring {
    /// Create a spring at rest at the given value
    pub fn new(config: SpringConfig, value: f32) -> Self {
        Self {
            config,
            value,
            velocity: 0.0,
            target: value,
            settled: true,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Retarget the spring. The current velocity is kept so an interrupted
    /// animation continues smoothly.
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
        self.settled = false;
    }

    /// Inject velocity (e.g. from a gesture release)
    pub fn set_velocity(&mut self, velocity: f32) {
        self.velocity = velocity;
        if velocity.abs() > REST_VELOCITY {
            self.settled = false;
        }
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Acceleration at a given displacement and velocity
    fn accel(&self, value: f32, velocity: f32) -> f32 {
        let displacement = value - self.target;
        (-self.config.stiffness * displacement - self.config.damping * velocity) / self.config.mass
    }

    /// Advance the spring by `dt` seconds using RK4 integration
    pub fn step(&mut self, dt: f32) {
        if self.settled || dt <= 0.0 {
            return;
        }

        // RK4 over the (value, velocity) pair
        let (x, v) = (self.value, self.velocity);

        let k1_v = self.accel(x, v);
        let k1_x = v;

        let k2_v = self.accel(x + k1_x * dt * 0.5, v + k1_v * dt * 0.5);
        let k2_x = v + k1_v * dt * 0.5;

        let k3_v = self.accel(x + k2_x * dt * 0.5, v + k2_v * dt * 0.5);
        let k3_x = v + k2_v * dt * 0.5;

        let k4_v = self.accel(x + k3_x * dt, v + k3_v * dt);
        let k4_x = v + k3_v * dt;

        self.value = x + (k1_x + 2.0 * k2_x + 2.0 * k3_x + k4_x) * dt / 6.0;
        self.velocity = v + (k1_v + 2.0 * k2_v + 2.0 * k3_v + k4_v) * dt / 6.0;

        if (self.value - self.target).abs() < REST_DISPLACEMENT
            && self.velocity.abs() < REST_VELOCITY
        {
            // Snap exactly onto the target so callers can compare values
            self.value = self.target;
            self.velocity = 0.0;
            self.settled = true;
        }
    }
}
