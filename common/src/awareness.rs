use crate::constants::{AWARENESS_DECAY, AWARENESS_PULLBACK, AWARENESS_RAMP_UP, SENTINEL_RADIUS};

// ============================================================================
// Proximity Sensor
// ============================================================================

/// Asymmetric tracking filter turning target distance into an awareness level.
///
/// Inside the radius, awareness chases `urgency = 1 - distance / radius` with a
/// fast step up and a slow step down. Outside the radius it decays toward zero.
/// The result is always clamped to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximitySensor {
    pub radius: f32,
    pub ramp_up: f32,
    pub pullback: f32,
    pub decay: f32,
}

impl Default for ProximitySensor {
    fn default() -> Self {
        Self {
            radius: SENTINEL_RADIUS,
            ramp_up: AWARENESS_RAMP_UP,
            pullback: AWARENESS_PULLBACK,
            decay: AWARENESS_DECAY,
        }
    }
}

impl ProximitySensor {
    /// Instantaneous awareness target for `distance`, or `None` when out of range.
    #[must_use]
    pub fn urgency(&self, distance: f32) -> Option<f32> {
        (distance < self.radius).then(|| 1.0 - distance / self.radius)
    }

    #[must_use]
    pub fn update(&self, distance: f32, awareness: f32) -> f32 {
        let next = match self.urgency(distance) {
            Some(urgency) if awareness < urgency => awareness + self.ramp_up,
            Some(_) => awareness - self.pullback,
            None => awareness - self.decay,
        };
        next.clamp(0.0, 1.0)
    }
}
