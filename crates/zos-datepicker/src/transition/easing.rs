//! Easing curves applied on top of linear tween progress

/// Shape of a tween
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    /// Constant velocity
    Linear,
    /// Fast start, smooth deceleration into the snapped row
    #[default]
    EaseOutCubic,
    /// Slow start and end
    EaseInOutCubic,
}

impl Easing {
    /// Map linear progress to eased progress; input is clamped to `[0, 1]`
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}
