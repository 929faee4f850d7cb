//! Easing curves mapping progress in [0, 1] onto [0, 1]

/// Ease-out curve for tweens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// power1.out
    #[default]
    Quad,
    /// power3.out
    Cubic,
}

impl Easing {
    /// Apply the curve to a progress value, clamped to [0, 1]
    #[inline]
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Quad => power_ease_out(t, 2),
            Easing::Cubic => power_ease_out(t, 3),
        }
    }
}

/// f(t) = 1 - (1-t)^n
#[inline]
fn power_ease_out(t: f64, n: i32) -> f64 {
    1.0 - (1.0 - t).powi(n)
}
