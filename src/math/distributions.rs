//! Standard normal distribution primitives.
//!
//! The closed-form Black regions evaluate these functions deep in the tails, so the
//! CDF is taken from `erfc` (no `1 - x` cancellation for negative arguments) and the
//! quantile from `erfc_inv`. `erfcx` follows W. J. Cody's rational Chebyshev
//! approximations ("Rational Chebyshev approximations for the error function",
//! Math. Comp. 1969), which keep full relative precision for large arguments where
//! `exp(x²)·erfc(x)` would overflow/underflow term by term.

use statrs::function::erf::erfc_inv;

use super::{ONE_OVER_SQRT_TWO, ONE_OVER_SQRT_TWO_PI};

/// Standard normal density.
#[inline]
pub fn norm_pdf(x: f64) -> f64 {
    ONE_OVER_SQRT_TWO_PI * (-0.5 * x * x).exp()
}

/// Standard normal cumulative distribution function.
#[inline]
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * libm::erfc(-x * ONE_OVER_SQRT_TWO)
}

/// Inverse of the standard normal CDF.
///
/// Returns `-inf` for `p <= 0`, `+inf` for `p >= 1` and propagates NaN.
pub fn norm_quantile(p: f64) -> f64 {
    if p.is_nan() {
        return f64::NAN;
    }
    if p <= 0.0 {
        return f64::NEG_INFINITY;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }
    -std::f64::consts::SQRT_2 * erfc_inv(2.0 * p)
}

// Cody's coefficients, |x| <= 0.46875
const A: [f64; 5] = [
    3.161_123_743_870_565_6,
    113.864_154_151_050_16,
    377.485_237_685_302_02,
    3_209.377_589_138_469_5,
    0.185_777_706_184_603_15,
];
const B: [f64; 4] = [
    23.601_290_952_344_122,
    244.024_637_934_444_17,
    1_282.616_526_077_372_3,
    2_844.236_833_439_170_6,
];

// 0.46875 < |x| <= 4
const C: [f64; 9] = [
    0.564_188_496_988_670_1,
    8.883_149_794_388_376,
    66.119_190_637_141_63,
    298.635_138_197_400_1,
    881.952_221_241_769_1,
    1_712.047_612_634_070_6,
    2_051.078_377_826_071_5,
    1_230.339_354_797_997_2,
    2.153_115_354_744_038_5e-8,
];
const D: [f64; 8] = [
    15.744_926_110_709_835,
    117.693_950_891_312_5,
    537.181_101_862_009_9,
    1_621.389_574_566_690_2,
    3_290.799_235_733_459_6,
    4_362.619_090_143_247,
    3_439.367_674_143_721_6,
    1_230.339_354_803_749_4,
];

// |x| > 4
const P: [f64; 6] = [
    0.305_326_634_961_232_34,
    0.360_344_899_949_804_44,
    0.125_781_726_111_229_25,
    0.016_083_785_148_742_277,
    6.587_491_615_298_378e-4,
    0.016_315_387_137_302_097,
];
const Q: [f64; 5] = [
    2.568_520_192_289_822_4,
    1.872_952_849_923_467_3,
    0.527_905_102_951_428_4,
    0.060_518_341_312_441_32,
    0.002_335_204_976_268_691_8,
];

const THRESHOLD: f64 = 0.46875;
const X_SMALL: f64 = 1.11e-16;
const X_HUGE: f64 = 6.71e7;
const X_NEG: f64 = -26.628;
/// 1/√π
const ONE_OVER_SQRT_PI: f64 = 0.564_189_583_547_756_3;

/// Scaled complementary error function `exp(x²)·erfc(x)`.
pub fn erfcx(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    let y = x.abs();

    if y <= THRESHOLD {
        let ysq = if y > X_SMALL { y * y } else { 0.0 };
        let mut xnum = A[4] * ysq;
        let mut xden = ysq;
        for i in 0..3 {
            xnum = (xnum + A[i]) * ysq;
            xden = (xden + B[i]) * ysq;
        }
        let erf = x * (xnum + A[3]) / (xden + B[3]);
        return ysq.exp() * (1.0 - erf);
    }

    let scaled = if y <= 4.0 {
        let mut xnum = C[8] * y;
        let mut xden = y;
        for i in 0..7 {
            xnum = (xnum + C[i]) * y;
            xden = (xden + D[i]) * y;
        }
        (xnum + C[7]) / (xden + D[7])
    } else if y >= X_HUGE {
        ONE_OVER_SQRT_PI / y
    } else {
        let ysq = 1.0 / (y * y);
        let mut xnum = P[5] * ysq;
        let mut xden = ysq;
        for i in 0..4 {
            xnum = (xnum + P[i]) * ysq;
            xden = (xden + Q[i]) * ysq;
        }
        let tail = ysq * (xnum + P[4]) / (xden + Q[4]);
        (ONE_OVER_SQRT_PI - tail) / y
    };

    if x >= 0.0 {
        return scaled;
    }

    // erfcx(-y) = 2·exp(y²) - erfcx(y), with exp(y²) split to limit rounding
    if x < X_NEG {
        return f64::INFINITY;
    }
    let ysq = (x * 16.0).trunc() / 16.0;
    let del = (x - ysq) * (x + ysq);
    let twice = 2.0 * (ysq * ysq).exp() * del.exp();
    twice - scaled
}
