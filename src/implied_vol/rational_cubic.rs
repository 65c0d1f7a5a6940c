//! Rational cubic Hermite interpolation (Delbourgo & Gregory, 1985).
//!
//! On `[x0, x1]` the interpolant matches values and first derivatives at both ends; the
//! control parameter `r` bends it between the cubic Hermite spline (`r = 3`) and the
//! straight line (`r → ∞`). The `shape_*` methods choose `r` so that the interpolant
//! additionally reproduces a prescribed second derivative at one end; the `convex_shape_*`
//! variants raise it further where needed to keep the data's monotonicity and convexity.

/// `√ε` for IEEE-754 doubles (2⁻²⁶).
const SQRT_EPSILON: f64 = 1.490_116_119_384_765_6e-8;

/// Smallest admissible control parameter, `−(1 − √ε)`.
pub const MIN_R: f64 = -(1.0 - SQRT_EPSILON);

/// Largest admissible control parameter, `2/ε²`.
pub const MAX_R: f64 = 2.0 / (f64::EPSILON * f64::EPSILON);

/// Free-function form of [`RationalCubic::interpolate`].
#[allow(clippy::too_many_arguments)]
pub fn rational_cubic_interpolate(
    x: f64,
    x0: f64,
    x1: f64,
    y0: f64,
    y1: f64,
    dy0: f64,
    dy1: f64,
    r: f64,
) -> f64 {
    RationalCubic::new(x0, x1, y0, y1, dy0, dy1).interpolate(x, r)
}

/// One interpolation segment with end values and end slopes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RationalCubic {
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
    pub dy0: f64,
    pub dy1: f64,
}

impl RationalCubic {
    pub fn new(x0: f64, x1: f64, y0: f64, y1: f64, dy0: f64, dy1: f64) -> Self {
        Self {
            x0,
            x1,
            y0,
            y1,
            dy0,
            dy1,
        }
    }

    /// Evaluates the interpolant at `x` for control parameter `r`.
    pub fn interpolate(&self, x: f64, r: f64) -> f64 {
        let h = self.x1 - self.x0;
        let s = (x - self.x0) / h;
        let one_minus_s = 1.0 - s;

        let numerator = self.y1 * s * s * s
            + (r * self.y1 - h * self.dy1) * s * s * one_minus_s
            + (r * self.y0 + h * self.dy0) * s * one_minus_s * one_minus_s
            + self.y0 * one_minus_s * one_minus_s * one_minus_s;
        let denominator = 1.0 + (r - 3.0) * s * one_minus_s;

        numerator / denominator
    }

    /// Control parameter reproducing the second derivative `ddy0` at `x0`.
    pub fn shape_from_left_curvature(&self, ddy0: f64) -> f64 {
        let h = self.x1 - self.x0;
        let secant = (self.y1 - self.y0) / h;
        let numerator = 0.5 * h * ddy0 + self.dy1 - self.dy0;
        let denominator = secant - self.dy0;
        control_parameter(numerator, denominator)
    }

    /// Control parameter reproducing the second derivative `ddy1` at `x1`.
    pub fn shape_from_right_curvature(&self, ddy1: f64) -> f64 {
        let h = self.x1 - self.x0;
        let secant = (self.y1 - self.y0) / h;
        let numerator = 0.5 * h * ddy1 + self.dy1 - self.dy0;
        let denominator = self.dy1 - secant;
        control_parameter(numerator, denominator)
    }

    /// [`Self::shape_from_left_curvature`], raised to the shape-preserving minimum.
    pub fn convex_shape_from_left_curvature(&self, ddy0: f64, prefer_shape: bool) -> f64 {
        self.shape_from_left_curvature(ddy0)
            .max(self.minimum_shape_preserving(prefer_shape))
            .clamp(MIN_R, MAX_R)
    }

    /// [`Self::shape_from_right_curvature`], raised to the shape-preserving minimum.
    pub fn convex_shape_from_right_curvature(&self, ddy1: f64, prefer_shape: bool) -> f64 {
        self.shape_from_right_curvature(ddy1)
            .max(self.minimum_shape_preserving(prefer_shape))
            .clamp(MIN_R, MAX_R)
    }

    /// Smallest `r` for which the interpolant is monotone and convex (or concave)
    /// whenever the end data are. With `prefer_shape` a degenerate secant forces the
    /// linear limit instead of giving up on shape preservation.
    pub fn minimum_shape_preserving(&self, prefer_shape: bool) -> f64 {
        let secant = (self.y1 - self.y0) / (self.x1 - self.x0);
        let (d0, d1) = (self.dy0, self.dy1);

        let monotonic = d0 * secant >= 0.0 && d1 * secant >= 0.0;
        let convex = d0 <= secant && secant <= d1;
        let concave = d0 >= secant && secant >= d1;
        if !monotonic && !convex && !concave {
            return MIN_R;
        }

        let mut r_monotonic = f64::MIN;
        let mut r_convex = f64::MIN;
        if monotonic {
            if secant.abs() > 0.0 {
                r_monotonic = (d1 + d0) / secant;
            } else if prefer_shape {
                r_monotonic = MAX_R;
            }
        }
        if convex || concave {
            let (left_gap, right_gap) = (secant - d0, d1 - secant);
            if left_gap.abs() > 0.0 && right_gap.abs() > 0.0 {
                r_convex = ((d1 - d0) / right_gap)
                    .abs()
                    .max(((d1 - d0) / left_gap).abs());
            } else if prefer_shape {
                r_convex = MAX_R;
            }
        } else if monotonic && prefer_shape {
            r_convex = MAX_R;
        }

        MIN_R.max(r_monotonic.max(r_convex))
    }
}

fn control_parameter(numerator: f64, denominator: f64) -> f64 {
    if denominator.abs() < f64::MIN_POSITIVE {
        return if numerator > 0.0 { MAX_R } else { MIN_R };
    }
    (numerator / denominator).clamp(MIN_R, MAX_R)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_end_values() {
        let segment = RationalCubic::new(0.5, 2.0, 1.0, 3.0, 0.2, 4.0);
        for r in [MIN_R + 1e-3, 0.0, 3.0, 10.0] {
            assert!((segment.interpolate(0.5, r) - 1.0).abs() < 1e-15);
            assert!((segment.interpolate(2.0, r) - 3.0).abs() < 1e-15);
        }
    }

    #[test]
    fn test_r_equal_three_is_cubic_hermite() {
        // y = x³ on [0, 1] is reproduced exactly by the cubic Hermite spline
        let segment = RationalCubic::new(0.0, 1.0, 0.0, 1.0, 0.0, 3.0);
        for &x in &[0.1, 0.37, 0.5, 0.8] {
            assert!((segment.interpolate(x, 3.0) - x * x * x).abs() < 1e-15);
        }
    }

    #[test]
    fn test_sqrt_epsilon() {
        assert_eq!(SQRT_EPSILON, f64::EPSILON.sqrt());
    }

    #[test]
    fn test_free_function_matches_segment() {
        let segment = RationalCubic::new(0.5, 2.0, 1.0, 3.0, 0.2, 4.0);
        let direct = rational_cubic_interpolate(1.1, 0.5, 2.0, 1.0, 3.0, 0.2, 4.0, 1.7);
        assert_eq!(direct, segment.interpolate(1.1, 1.7));
    }

    #[test]
    fn test_large_r_tends_to_linear() {
        let segment = RationalCubic::new(0.0, 1.0, 0.0, 1.0, 0.0, 3.0);
        assert!((segment.interpolate(0.5, 1e12) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_shape_parameter_is_clamped() {
        // linear data: zero denominator
        let linear = RationalCubic::new(0.0, 1.0, 0.0, 1.0, 1.0, 1.0);
        assert_eq!(linear.shape_from_left_curvature(1.0), MAX_R);
        assert_eq!(linear.shape_from_right_curvature(-1.0), MIN_R);

        let steep = RationalCubic::new(0.0, 1.0, 0.0, 1.0, 0.0, 3.0);
        let r = steep.shape_from_left_curvature(-1e6);
        assert!(r >= MIN_R && r <= MAX_R);
        // x³ has zero curvature at 0 and 6 at 1; both give the Hermite value r = 3
        assert!((steep.shape_from_left_curvature(0.0) - 3.0).abs() < 1e-15);
        assert!((steep.shape_from_right_curvature(6.0) - 3.0).abs() < 1e-15);
    }

    #[test]
    fn test_convex_shape_keeps_interpolant_convex() {
        // convex increasing data; fitting a strongly negative curvature would bend it
        let segment = RationalCubic::new(0.0, 1.0, 0.0, 1.0, 0.2, 3.0);
        let r_min = segment.minimum_shape_preserving(true);
        let r = segment.convex_shape_from_right_curvature(-50.0, true);
        assert!(segment.shape_from_right_curvature(-50.0) < r_min);
        assert_eq!(r, r_min);

        let values: Vec<f64> = (0..=20)
            .map(|i| segment.interpolate(i as f64 / 20.0, r))
            .collect();
        for w in values.windows(3) {
            assert!(w[1] >= w[0]);
            assert!(w[2] - w[1] >= w[1] - w[0] - 1e-12);
        }
    }

    #[test]
    fn test_minimum_shape_without_structure() {
        // both slopes against a positive secant: neither monotone, convex nor concave
        let segment = RationalCubic::new(0.0, 1.0, 0.0, 1.0, -1.0, -1.0);
        assert_eq!(segment.minimum_shape_preserving(true), MIN_R);
    }
}
