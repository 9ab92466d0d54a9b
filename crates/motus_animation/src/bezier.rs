//! Unit cubic-bezier solver
//!
//! A unit bezier runs from `(0, 0)` to `(1, 1)` with two caller-supplied
//! control points, the same curve shape CSS `cubic-bezier()` uses. Solving for
//! a progress value means finding the curve parameter whose X equals the
//! progress, then reading Y at that parameter.

/// X residual accepted as a solution.
const EPSILON: f64 = 1e-4;

/// Slope below which a Newton step is no longer trusted.
const MIN_SLOPE: f64 = 1e-6;

const NEWTON_ITERATIONS: usize = 8;

/// Bisection halves `[0, 1]`; well past f64 resolution of the 1e-4 target.
const BISECTION_ITERATIONS: usize = 32;

/// Polynomial form of a unit cubic bezier: `((a·t + b)·t + c)·t` per axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnitBezier {
    ax: f64,
    bx: f64,
    cx: f64,
    ay: f64,
    by: f64,
    cy: f64,
}

impl UnitBezier {
    /// Build the curve from control points `(x1, y1)` and `(x2, y2)`.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        let cx = 3.0 * x1;
        let bx = 3.0 * (x2 - x1) - cx;
        let ax = 1.0 - cx - bx;

        let cy = 3.0 * y1;
        let by = 3.0 * (y2 - y1) - cy;
        let ay = 1.0 - cy - by;

        Self {
            ax,
            bx,
            cx,
            ay,
            by,
            cy,
        }
    }

    #[inline]
    fn sample_x(&self, t: f64) -> f64 {
        ((self.ax * t + self.bx) * t + self.cx) * t
    }

    #[inline]
    fn sample_y(&self, t: f64) -> f64 {
        ((self.ay * t + self.by) * t + self.cy) * t
    }

    #[inline]
    fn slope_x(&self, t: f64) -> f64 {
        (3.0 * self.ax * t + 2.0 * self.bx) * t + self.cx
    }

    /// Find the curve parameter whose X component equals `x`.
    ///
    /// Newton-Raphson first (usually converges in a few steps), then bisection
    /// over `[0, 1]` when the slope is too flat or Newton does not settle.
    pub fn solve_x(&self, x: f64) -> f64 {
        let mut t = x;
        for _ in 0..NEWTON_ITERATIONS {
            let err = self.sample_x(t) - x;
            if err.abs() < EPSILON {
                return t;
            }
            let slope = self.slope_x(t);
            if slope.abs() < MIN_SLOPE {
                break;
            }
            t -= err / slope;
        }

        let mut lo = 0.0_f64;
        let mut hi = 1.0_f64;
        t = x.clamp(lo, hi);
        for _ in 0..BISECTION_ITERATIONS {
            let sample = self.sample_x(t);
            if (sample - x).abs() < EPSILON {
                break;
            }
            if x > sample {
                lo = t;
            } else {
                hi = t;
            }
            t = lo + (hi - lo) * 0.5;
        }

        t
    }

    /// Eased value for `progress`.
    pub fn solve(&self, progress: f64) -> f64 {
        self.sample_y(self.solve_x(progress))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_curve_is_linear() {
        let bezier = UnitBezier::new(0.0, 0.0, 1.0, 1.0);
        for step in 0..=100 {
            let p = step as f64 / 100.0;
            assert!(
                (bezier.solve(p) - p).abs() < 1e-4,
                "solve({p}) = {}",
                bezier.solve(p)
            );
        }
    }

    #[test]
    fn test_x_root_is_within_tolerance() {
        let bezier = UnitBezier::new(0.42, 0.0, 0.58, 1.0);
        for step in 1..100 {
            let x = step as f64 / 100.0;
            let t = bezier.solve_x(x);
            assert!((bezier.sample_x(t) - x).abs() < 1e-4);
        }
    }

    #[test]
    fn test_css_ease_in_out_is_symmetric() {
        let bezier = UnitBezier::new(0.42, 0.0, 0.58, 1.0);
        assert!((bezier.solve(0.5) - 0.5).abs() < 1e-3);
        assert!((bezier.solve(0.25) + bezier.solve(0.75) - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_flat_start_falls_back_to_bisection() {
        // near-flat slope at the start throws Newton far outside [0, 1]
        let bezier = UnitBezier::new(0.0, 0.0, 0.0, 1.0);
        let t = bezier.solve_x(0.001);
        assert!((bezier.sample_x(t) - 0.001).abs() < 1e-4);
    }
}
