//! Easing functions for animations
//!
//! Every curve maps progress in `[0, 1]` to an interpolant. Input at or below
//! 0 returns exactly 0 and input at or above 1 returns exactly 1, whatever the
//! curve; between the endpoints some curves (back, elastic) overshoot.
//!
//! The named families share one construction: each defines an `in` curve,
//! `out(p) = 1 - in(1 - p)`, and `in_out` plays `in` over the first half of
//! the timeline and the mirrored curve over the second half.

use std::f64::consts::PI;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::bezier::UnitBezier;
use crate::error::ConfigError;

/// Overshoot of the back family's `in`/`out` curves.
const BACK_OVERSHOOT: f64 = 1.7;
/// Overshoot of `InOutBack`.
const BACK_OVERSHOOT_IN_OUT: f64 = 2.5925;

/// Caller-supplied easing curve
#[derive(Clone)]
pub struct CustomCurve(Arc<dyn Fn(f64) -> f64 + Send + Sync>);

impl CustomCurve {
    pub fn new<F: Fn(f64) -> f64 + Send + Sync + 'static>(curve: F) -> Self {
        Self(Arc::new(curve))
    }

    pub fn apply(&self, progress: f64) -> f64 {
        (self.0)(progress)
    }
}

impl fmt::Debug for CustomCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomCurve(..)")
    }
}

/// Control points of a cubic bezier curve, as written in configuration
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ControlPoints {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Cubic bezier easing with its solver coefficients precomputed.
///
/// X control values are clamped to `[0, 1]` so the curve stays a function
/// of progress.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "ControlPoints", into = "ControlPoints")]
pub struct CubicBezier {
    points: ControlPoints,
    solver: UnitBezier,
}

impl CubicBezier {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::from(ControlPoints { x1, y1, x2, y2 })
    }

    pub fn control_points(&self) -> ControlPoints {
        self.points
    }

    pub fn solve(&self, progress: f64) -> f64 {
        self.solver.solve(progress)
    }
}

impl From<ControlPoints> for CubicBezier {
    fn from(points: ControlPoints) -> Self {
        let points = ControlPoints {
            x1: points.x1.clamp(0.0, 1.0),
            x2: points.x2.clamp(0.0, 1.0),
            ..points
        };
        Self {
            points,
            solver: UnitBezier::new(points.x1, points.y1, points.x2, points.y2),
        }
    }
}

impl From<CubicBezier> for ControlPoints {
    fn from(curve: CubicBezier) -> Self {
        curve.points
    }
}

/// Easing function type
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant rate.
    #[default]
    Linear,
    /// Discrete jumps: progress is floored to the nearest multiple of `1 / count`.
    Steps { count: u32 },
    /// Caller-supplied curve.
    #[serde(skip)]
    Custom(CustomCurve),
    /// Cubic bezier with control points `(x1, y1)` and `(x2, y2)`.
    Bezier(CubicBezier),

    InPow { exponent: f64 },
    OutPow { exponent: f64 },
    InOutPow { exponent: f64 },

    InSine,
    OutSine,
    InOutSine,

    InExpo,
    OutExpo,
    InOutExpo,

    InBack,
    OutBack,
    InOutBack,

    InCirc,
    OutCirc,
    InOutCirc,

    InBounce,
    OutBounce,
    InOutBounce,

    InElastic,
    OutElastic,
    InOutElastic,
}

/// The `in` half of a curve family, with the constants that family uses.
#[derive(Clone, Copy)]
enum Shape {
    Pow(f64),
    Sine,
    Expo,
    Back(f64),
    Circ,
    Bounce,
    Elastic { offset: f64, period: f64 },
}

const ELASTIC: Shape = Shape::Elastic {
    offset: 10.75,
    period: 2.0 * PI / 3.0,
};

const ELASTIC_IN_OUT: Shape = Shape::Elastic {
    offset: 11.125,
    period: 2.0 * PI / 4.5,
};

impl Shape {
    fn ease_in(self, p: f64) -> f64 {
        match self {
            Shape::Pow(exponent) => p.powf(exponent),
            Shape::Sine => 1.0 - (p * PI / 2.0).cos(),
            Shape::Expo => 1024f64.powf(p - 1.0),
            Shape::Back(overshoot) => p * p * ((overshoot + 1.0) * p - overshoot),
            Shape::Circ => 1.0 - (1.0 - p * p).max(0.0).sqrt(),
            Shape::Bounce => 1.0 - bounce_out(1.0 - p),
            Shape::Elastic { offset, period } => {
                -(2f64.powf(10.0 * p - 10.0)) * ((p * 10.0 - offset) * period).sin()
            }
        }
    }

    fn ease_out(self, p: f64) -> f64 {
        1.0 - self.ease_in(1.0 - p)
    }

    fn ease_in_out(self, p: f64) -> f64 {
        if p < 0.5 {
            self.ease_in(p * 2.0) / 2.0
        } else {
            1.0 - self.ease_in((1.0 - p) * 2.0) / 2.0
        }
    }
}

/// Four-segment piecewise quadratic bounce
fn bounce_out(p: f64) -> f64 {
    const N: f64 = 7.5625;
    const D: f64 = 2.75;

    if p < 1.0 / D {
        N * p * p
    } else if p < 2.0 / D {
        let p = p - 1.5 / D;
        N * p * p + 0.75
    } else if p < 2.5 / D {
        let p = p - 2.25 / D;
        N * p * p + 0.9375
    } else {
        let p = p - 2.625 / D;
        N * p * p + 0.984375
    }
}

impl Easing {
    /// Apply the easing function to a progress value (0.0 to 1.0)
    pub fn apply(&self, progress: f64) -> f64 {
        // Endpoints are always exact; NaN reads as the start
        if progress.is_nan() || progress <= 0.0 {
            return 0.0;
        }
        if progress >= 1.0 {
            return 1.0;
        }

        let p = progress;
        match self {
            Easing::Linear => p,
            Easing::Steps { count } => {
                if *count == 0 {
                    return p;
                }
                let count = *count as f64;
                (p * count).floor() / count
            }
            Easing::Custom(curve) => curve.apply(p),
            Easing::Bezier(curve) => curve.solve(p),

            Easing::InPow { exponent } => Shape::Pow(*exponent).ease_in(p),
            Easing::OutPow { exponent } => Shape::Pow(*exponent).ease_out(p),
            Easing::InOutPow { exponent } => Shape::Pow(*exponent).ease_in_out(p),

            Easing::InSine => Shape::Sine.ease_in(p),
            Easing::OutSine => Shape::Sine.ease_out(p),
            Easing::InOutSine => Shape::Sine.ease_in_out(p),

            Easing::InExpo => Shape::Expo.ease_in(p),
            Easing::OutExpo => Shape::Expo.ease_out(p),
            Easing::InOutExpo => Shape::Expo.ease_in_out(p),

            Easing::InBack => Shape::Back(BACK_OVERSHOOT).ease_in(p),
            Easing::OutBack => Shape::Back(BACK_OVERSHOOT).ease_out(p),
            Easing::InOutBack => Shape::Back(BACK_OVERSHOOT_IN_OUT).ease_in_out(p),

            Easing::InCirc => Shape::Circ.ease_in(p),
            Easing::OutCirc => Shape::Circ.ease_out(p),
            Easing::InOutCirc => Shape::Circ.ease_in_out(p),

            Easing::InBounce => Shape::Bounce.ease_in(p),
            Easing::OutBounce => Shape::Bounce.ease_out(p),
            Easing::InOutBounce => Shape::Bounce.ease_in_out(p),

            Easing::InElastic => ELASTIC.ease_in(p),
            Easing::OutElastic => ELASTIC.ease_out(p),
            Easing::InOutElastic => ELASTIC_IN_OUT.ease_in_out(p),
        }
    }

    /// Wrap a caller-supplied curve.
    pub fn custom<F: Fn(f64) -> f64 + Send + Sync + 'static>(curve: F) -> Self {
        Easing::Custom(CustomCurve::new(curve))
    }

    /// Cubic bezier easing; control point X values are clamped to `[0, 1]`.
    pub fn bezier(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Easing::Bezier(CubicBezier::new(x1, y1, x2, y2))
    }

    /// Reject curve parameters that would make `apply` produce NaN or infinity
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Easing::Bezier(curve) => {
                let ControlPoints { x1, y1, x2, y2 } = curve.control_points();
                if [x1, y1, x2, y2].iter().all(|v| v.is_finite()) {
                    Ok(())
                } else {
                    Err(ConfigError::Invalid(format!(
                        "bezier control points must be finite, got ({x1}, {y1}), ({x2}, {y2})"
                    )))
                }
            }
            Easing::InPow { exponent }
            | Easing::OutPow { exponent }
            | Easing::InOutPow { exponent } => {
                if exponent.is_finite() && *exponent > 0.0 {
                    Ok(())
                } else {
                    Err(ConfigError::Invalid(format!(
                        "easing exponent must be a positive number, got {exponent}"
                    )))
                }
            }
            _ => Ok(()),
        }
    }

    pub fn steps(count: u32) -> Self {
        Easing::Steps { count }
    }

    pub fn in_quad() -> Self {
        Easing::InPow { exponent: 2.0 }
    }

    pub fn out_quad() -> Self {
        Easing::OutPow { exponent: 2.0 }
    }

    pub fn in_out_quad() -> Self {
        Easing::InOutPow { exponent: 2.0 }
    }

    pub fn in_cubic() -> Self {
        Easing::InPow { exponent: 3.0 }
    }

    pub fn out_cubic() -> Self {
        Easing::OutPow { exponent: 3.0 }
    }

    pub fn in_out_cubic() -> Self {
        Easing::InOutPow { exponent: 3.0 }
    }

    pub fn in_quart() -> Self {
        Easing::InPow { exponent: 4.0 }
    }

    pub fn out_quart() -> Self {
        Easing::OutPow { exponent: 4.0 }
    }

    pub fn in_out_quart() -> Self {
        Easing::InOutPow { exponent: 4.0 }
    }

    pub fn in_quint() -> Self {
        Easing::InPow { exponent: 5.0 }
    }

    pub fn out_quint() -> Self {
        Easing::OutPow { exponent: 5.0 }
    }

    pub fn in_out_quint() -> Self {
        Easing::InOutPow { exponent: 5.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    fn all_curves() -> Vec<Easing> {
        vec![
            Easing::Linear,
            Easing::steps(4),
            Easing::custom(|p| p * p),
            Easing::bezier(0.25, 0.1, 0.25, 1.0),
            Easing::in_quad(),
            Easing::out_cubic(),
            Easing::in_out_quint(),
            Easing::InSine,
            Easing::OutSine,
            Easing::InOutSine,
            Easing::InExpo,
            Easing::OutExpo,
            Easing::InOutExpo,
            Easing::InBack,
            Easing::OutBack,
            Easing::InOutBack,
            Easing::InCirc,
            Easing::OutCirc,
            Easing::InOutCirc,
            Easing::InBounce,
            Easing::OutBounce,
            Easing::InOutBounce,
            Easing::InElastic,
            Easing::OutElastic,
            Easing::InOutElastic,
        ]
    }

    #[test]
    fn test_endpoints_are_exact() {
        for easing in all_curves() {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?} at 0");
            assert_eq!(easing.apply(1.0), 1.0, "{easing:?} at 1");
            assert_eq!(easing.apply(-0.5), 0.0, "{easing:?} below 0");
            assert_eq!(easing.apply(1.5), 1.0, "{easing:?} above 1");
        }
    }

    #[test]
    fn test_custom_endpoints_ignore_curve() {
        let easing = Easing::custom(|_| 0.3);
        assert_eq!(easing.apply(0.0), 0.0);
        assert_eq!(easing.apply(0.5), 0.3);
        assert_eq!(easing.apply(1.0), 1.0);
    }

    #[test]
    fn test_power_family() {
        assert!(approx_eq(Easing::in_quad().apply(0.5), 0.25));
        assert!(approx_eq(Easing::out_quad().apply(0.5), 0.75));
        assert!(approx_eq(Easing::in_out_cubic().apply(0.25), 0.0625));
        assert!(approx_eq(Easing::in_out_cubic().apply(0.75), 0.9375));
        assert!(approx_eq(Easing::in_out_quad().apply(0.5), 0.5));
    }

    #[test]
    fn test_out_mirrors_in() {
        let pairs = [
            (Easing::InSine, Easing::OutSine),
            (Easing::InExpo, Easing::OutExpo),
            (Easing::InCirc, Easing::OutCirc),
            (Easing::InBounce, Easing::OutBounce),
            (Easing::InElastic, Easing::OutElastic),
        ];
        for (ease_in, ease_out) in pairs {
            for step in 1..10 {
                let p = step as f64 / 10.0;
                assert!(
                    approx_eq(ease_out.apply(p), 1.0 - ease_in.apply(1.0 - p)),
                    "{ease_out:?} at {p}"
                );
            }
        }
    }

    #[test]
    fn test_closed_forms() {
        let p = 0.3;
        assert!(approx_eq(Easing::OutSine.apply(p), (p * PI / 2.0).sin()));
        assert!(approx_eq(Easing::InOutSine.apply(p), (1.0 - (PI * p).cos()) / 2.0));
        assert!(approx_eq(Easing::OutExpo.apply(p), 1.0 - 2f64.powf(-10.0 * p)));
        assert!(approx_eq(
            Easing::OutBack.apply(p),
            (p - 1.0).powi(2) * (2.7 * (p - 1.0) + 1.7) + 1.0
        ));
        assert!(approx_eq(
            Easing::OutElastic.apply(p),
            2f64.powf(-10.0 * p) * ((p * 10.0 - 0.75) * (2.0 * PI / 3.0)).sin() + 1.0
        ));

        let q = 0.8 * 2.0;
        assert!(approx_eq(
            Easing::InOutElastic.apply(0.8),
            (2f64.powf(-10.0 * q + 10.0) * ((10.0 * q - 11.125) * (2.0 * PI / 4.5)).sin()) / 2.0
                + 1.0
        ));
        assert!(approx_eq(
            Easing::InOutBack.apply(0.8),
            ((q - 2.0).powi(2) * (3.5925 * (q - 2.0) + 2.5925)) / 2.0 + 1.0
        ));
    }

    #[test]
    fn test_back_overshoots() {
        assert!(Easing::InBack.apply(0.2) < 0.0);
        assert!(Easing::OutBack.apply(0.8) > 1.0);
    }

    #[test]
    fn test_bounce_breakpoints_are_continuous() {
        for breakpoint in [1.0 / 2.75, 2.0 / 2.75, 2.5 / 2.75] {
            let before = Easing::OutBounce.apply(breakpoint - 1e-9);
            let after = Easing::OutBounce.apply(breakpoint + 1e-9);
            assert!((before - after).abs() < 1e-6, "jump at {breakpoint}");
        }
        assert!(approx_eq(Easing::InOutBounce.apply(0.5), 0.5));
    }

    #[test]
    fn test_steps() {
        let ease = Easing::steps(4);

        assert!(approx_eq(ease.apply(0.24), 0.0));
        assert!(approx_eq(ease.apply(0.25), 0.25));
        assert!(approx_eq(ease.apply(0.49), 0.25));
        assert!(approx_eq(ease.apply(0.74), 0.5));
        assert!(approx_eq(ease.apply(0.99), 0.75));
        assert!(approx_eq(Easing::steps(0).apply(0.4), 0.4));
    }

    #[test]
    fn test_bezier_linear_equivalent() {
        let ease = Easing::bezier(0.0, 0.0, 1.0, 1.0);
        for step in 0..=20 {
            let p = step as f64 / 20.0;
            assert!((ease.apply(p) - p).abs() < 1e-4);
        }
    }

    #[test]
    fn test_bezier_clamps_x_control_points() {
        match Easing::bezier(-0.5, 2.0, 1.5, -1.0) {
            Easing::Bezier(curve) => {
                let ControlPoints { x1, y1, x2, y2 } = curve.control_points();
                assert_eq!((x1, y1, x2, y2), (0.0, 2.0, 1.0, -1.0));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_deserialized_bezier_is_clamped() {
        #[derive(Deserialize)]
        struct Doc {
            e: Easing,
        }

        let doc: Doc =
            toml::from_str("e = { bezier = { x1 = -1.0, y1 = 0.5, x2 = 3.0, y2 = 0.5 } }")
                .unwrap();

        let Easing::Bezier(curve) = &doc.e else {
            panic!("unexpected {:?}", doc.e);
        };
        assert_eq!(curve.control_points().x1, 0.0);
        assert_eq!(curve.control_points().x2, 1.0);
        assert_eq!(*curve, CubicBezier::new(0.0, 0.5, 1.0, 0.5));
    }

    #[test]
    fn test_validate_rejects_non_finite_parameters() {
        assert!(Easing::bezier(0.2, f64::NAN, 0.8, 1.0).validate().is_err());
        assert!(Easing::InPow { exponent: f64::NAN }.validate().is_err());
        assert!(Easing::OutPow { exponent: -2.0 }.validate().is_err());
        assert!(Easing::bezier(0.2, 1.4, 0.8, 1.0).validate().is_ok());
        assert!(Easing::in_out_cubic().validate().is_ok());
        assert!(Easing::OutBounce.validate().is_ok());
    }

    #[test]
    fn test_deserialize_from_toml() {
        #[derive(Deserialize)]
        struct Doc {
            a: Easing,
            b: Easing,
            c: Easing,
        }

        let doc: Doc = toml::from_str(
            r#"
            a = "out_bounce"
            b = { steps = { count = 5 } }
            c = { bezier = { x1 = 0.4, y1 = 0.0, x2 = 0.2, y2 = 1.0 } }
            "#,
        )
        .unwrap();

        assert!(matches!(doc.a, Easing::OutBounce));
        assert!(matches!(doc.b, Easing::Steps { count: 5 }));
        assert!(matches!(doc.c, Easing::Bezier(_)));
    }
}
