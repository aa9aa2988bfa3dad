//! Easing curves for tweens.
//!
//! [`Easing`] names a curve and [`ease`] maps a linear `t` in `[0, 1]` onto it.
//! Tweens are scheduled on a [`Timer`](super::timer::Timer) with
//! [`Timer::tween`](super::timer::Timer::tween); this module only holds the
//! math.

/// Easing functions for smooth interpolation.
///
/// These functions transform a linear `t` value (0.0 to 1.0) to create
/// different acceleration/deceleration curves.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant speed (no easing).
    #[default]
    Linear,
    /// Starts slow, accelerates (quadratic).
    QuadIn,
    /// Starts fast, decelerates (quadratic).
    QuadOut,
    /// Slow start and end (quadratic).
    QuadInOut,
    /// Starts slow, accelerates (cubic).
    CubicIn,
    /// Starts fast, decelerates (cubic).
    CubicOut,
    /// Slow start and end (cubic).
    CubicInOut,
}

/// Apply an easing function to a normalized time value.
///
/// The input `t` is clamped to [0.0, 1.0] and transformed according to the
/// easing curve.
pub fn ease(e: Easing, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    match e {
        Easing::Linear => t,
        Easing::QuadIn => t * t,
        Easing::QuadOut => t * (2.0 - t),
        Easing::QuadInOut => {
            if t < 0.5 {
                2.0 * t * t
            } else {
                -1.0 + (4.0 - 2.0 * t) * t
            }
        }
        Easing::CubicIn => t * t * t,
        Easing::CubicOut => {
            let p = t - 1.0;
            p * p * p + 1.0
        }
        Easing::CubicInOut => {
            if t < 0.5 {
                4.0 * t * t * t
            } else {
                let p = 2.0 * t - 2.0;
                0.5 * p * p * p + 1.0
            }
        }
    }
}

/// Linearly interpolate between two floats.
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    const ALL: [Easing; 7] = [
        Easing::Linear,
        Easing::QuadIn,
        Easing::QuadOut,
        Easing::QuadInOut,
        Easing::CubicIn,
        Easing::CubicOut,
        Easing::CubicInOut,
    ];

    #[test]
    fn test_ease_all_types_hit_endpoints() {
        for e in ALL {
            assert!(approx_eq(ease(e, 0.0), 0.0), "{e:?} at 0");
            assert!(approx_eq(ease(e, 1.0), 1.0), "{e:?} at 1");
        }
    }

    #[test]
    fn test_ease_clamps_input() {
        for e in ALL {
            assert!(approx_eq(ease(e, -3.0), ease(e, 0.0)));
            assert!(approx_eq(ease(e, 7.0), ease(e, 1.0)));
        }
    }

    #[test]
    fn test_ease_midpoints() {
        assert!(approx_eq(ease(Easing::Linear, 0.5), 0.5));
        assert!(approx_eq(ease(Easing::QuadIn, 0.5), 0.25));
        assert!(approx_eq(ease(Easing::QuadOut, 0.5), 0.75));
        assert!(approx_eq(ease(Easing::CubicIn, 0.5), 0.125));
        assert!(approx_eq(ease(Easing::CubicOut, 0.5), 0.875));
        assert!(approx_eq(ease(Easing::QuadInOut, 0.5), 0.5));
        assert!(approx_eq(ease(Easing::CubicInOut, 0.5), 0.5));
    }

    #[test]
    fn test_lerp_f32() {
        assert!(approx_eq(lerp_f32(1.0, 16.0, 0.0), 1.0));
        assert!(approx_eq(lerp_f32(1.0, 16.0, 1.0), 16.0));
        assert!(approx_eq(lerp_f32(-2.0, 2.0, 0.5), 0.0));
    }

    #[test]
    fn test_easing_default_is_linear() {
        assert_eq!(Easing::default(), Easing::Linear);
    }
}
