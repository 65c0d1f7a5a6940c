//! The four closed-form evaluations of the normalized Black call price.
//!
//! All functions take `h = x/s ≤ 0` and `t = s/2 > 0` and return the undiscounted call
//! price divided by `√(F·K)`. Regions 1 and 2 are series expansions from P. Jäckel,
//! "Let's Be Rational" (2015); the coefficients are exact rationals and must not be
//! re-associated.

use crate::math::{erfcx, norm_cdf, ONE_OVER_SQRT_TWO, ONE_OVER_SQRT_TWO_PI, SQRT_TWO_PI};

/// Lower bound of `h` for the asymptotic expansion region.
pub const H_LARGE: f64 = -10.0;
/// Upper bound of `t` for the small-variance expansion region.
pub const T_SMALL: f64 = 0.21;
/// Slope of the `x + s²/2 > 0.85·s` test selecting the direct CDF form.
pub const DIRECT_REGION_SLOPE: f64 = 0.85;

/// Evaluation region of [`super::call_price`] for reduced inputs `x ≤ 0`, `s > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// Deep out-of-the-money: asymptotic series in `(h, t)`.
    AsymptoticExpansion,
    /// Small total variance: Taylor series in `t` around zero.
    SmallVariance,
    /// `Φ(h+t)e^{ht} − Φ(h−t)e^{-ht}`, no cancellation.
    Direct,
    /// Same quantity rearranged through `erfcx`.
    ScaledComplementary,
}

impl Region {
    /// Selects the region for `x ≤ 0`, `s > 0`.
    pub fn classify(x: f64, s: f64) -> Self {
        if x < s * H_LARGE && 0.5 * s * s + x < s * (T_SMALL + H_LARGE) {
            Region::AsymptoticExpansion
        } else if 0.5 * s < T_SMALL {
            Region::SmallVariance
        } else if x + 0.5 * s * s > s * DIRECT_REGION_SLOPE {
            Region::Direct
        } else {
            Region::ScaledComplementary
        }
    }

    /// Evaluates the region formula at `h = x/s`, `t = s/2`.
    pub fn call_price(self, h: f64, t: f64) -> f64 {
        match self {
            Region::AsymptoticExpansion => asymptotic_expansion(h, t),
            Region::SmallVariance => small_variance_expansion(h, t),
            Region::Direct => direct(h, t),
            Region::ScaledComplementary => scaled_complementary(h, t),
        }
    }
}

/// Region 1.
#[rustfmt::skip]
pub fn asymptotic_expansion(h: f64, t: f64) -> f64 {
    let e = (t / h) * (t / h);
    let r = (h + t) * (h - t);
    let q = (h / r) * (h / r);
    let sum = 2.0+q*(-6.0E0-2.0*e+3.0*q*(1.0E1+e*(2.0E1+2.0*e)+5.0*q*(-1.4E1+e*(-7.0E1+e*(-4.2E1-2.0*e))+7.0*q*(1.8E1+e*(1.68E2+e*(2.52E2+e*(7.2E1+2.0*e)))+9.0*q*(-2.2E1+e*(-3.3E2+e*(-9.24E2+e*(-6.6E2+e*(-1.1E2-2.0*e))))+1.1E1*q*(2.6E1+e*(5.72E2+e*(2.574E3+e*(3.432E3+e*(1.43E3+e*(1.56E2+2.0*e)))))+1.3E1*q*(-3.0E1+e*(-9.1E2+e*(-6.006E3+e*(-1.287E4+e*(-1.001E4+e*(-2.73E3+e*(-2.1E2-2.0*e))))))+1.5E1*q*(3.4E1+e*(1.36E3+e*(1.2376E4+e*(3.8896E4+e*(4.862E4+e*(2.4752E4+e*(4.76E3+e*(2.72E2+2.0*e)))))))+1.7E1*q*(-3.8E1+e*(-1.938E3+e*(-2.3256E4+e*(-1.00776E5+e*(-1.84756E5+e*(-1.51164E5+e*(-5.4264E4+e*(-7.752E3+e*(-3.42E2-2.0*e))))))))+1.9E1*q*(4.2E1+e*(2.66E3+e*(4.0698E4+e*(2.3256E5+e*(5.8786E5+e*(7.05432E5+e*(4.0698E5+e*(1.08528E5+e*(1.197E4+e*(4.2E2+2.0*e)))))))))+2.1E1*q*(-4.6E1+e*(-3.542E3+e*(-6.7298E4+e*(-4.90314E5+e*(-1.63438E6+e*(-2.704156E6+e*(-2.288132E6+e*(-9.80628E5+e*(-2.01894E5+e*(-1.771E4+e*(-5.06E2-2.0*e))))))))))+2.3E1*q*(5.0E1+e*(4.6E3+e*(1.0626E5+e*(9.614E5+e*(4.08595E6+e*(8.9148E6+e*(1.04006E7+e*(6.53752E6+e*(2.16315E6+e*(3.542E5+e*(2.53E4+e*(6.0E2+2.0*e)))))))))))+2.5E1*q*(-5.4E1+e*(-5.85E3+e*(-1.6146E5+e*(-1.77606E6+e*(-9.37365E6+e*(-2.607579E7+e*(-4.01166E7+e*(-3.476772E7+e*(-1.687257E7+e*(-4.44015E6+e*(-5.9202E5+e*(-3.51E4+e*(-7.02E2-2.0*e))))))))))))+2.7E1*q*(5.8E1+e*(7.308E3+e*(2.3751E5+e*(3.12156E6+e*(2.003001E7+e*(6.919458E7+e*(1.3572783E8+e*(1.5511752E8+e*(1.0379187E8+e*(4.006002E7+e*(8.58429E6+e*(9.5004E5+e*(4.7502E4+e*(8.12E2+2.0*e)))))))))))))+2.9E1*q*(-6.2E1+e*(-8.99E3+e*(-3.39822E5+e*(-5.25915E6+e*(-4.032015E7+e*(-1.6934463E8+e*(-4.1250615E8+e*(-6.0108039E8+e*(-5.3036505E8+e*(-2.8224105E8+e*(-8.870433E7+e*(-1.577745E7+e*(-1.472562E6+e*(-6.293E4+e*(-9.3E2-2.0*e))))))))))))))+3.1E1*q*(6.6E1+e*(1.0912E4+e*(4.74672E5+e*(8.544096E6+e*(7.71342E7+e*(3.8707344E8+e*(1.14633288E9+e*(2.07431664E9+e*(2.33360622E9+e*(1.6376184E9+e*(7.0963464E8+e*(1.8512208E8+e*(2.7768312E7+e*(2.215136E6+e*(8.184E4+e*(1.056E3+2.0*e)))))))))))))))+3.3E1*(-7.0E1+e*(-1.309E4+e*(-6.49264E5+e*(-1.344904E7+e*(-1.4121492E8+e*(-8.344518E8+e*(-2.9526756E9+e*(-6.49588632E9+e*(-9.0751353E9+e*(-8.1198579E9+e*(-4.6399188E9+e*(-1.6689036E9+e*(-3.67158792E8+e*(-4.707164E7+e*(-3.24632E6+e*(-1.0472E5+e*(-1.19E3-2.0*e)))))))))))))))))*q))))))))))))))));
    ONE_OVER_SQRT_TWO_PI * (-0.5 * (h * h + t * t)).exp() * (t / r) * sum
}

/// Region 2.
#[rustfmt::skip]
pub fn small_variance_expansion(h: f64, t: f64) -> f64 {
    let a = 1.0 + h * (0.5 * SQRT_TWO_PI) * erfcx(-ONE_OVER_SQRT_TWO * h);
    let w = t * t;
    let h2 = h * h;
    let expansion = 2.0*t*(a+w*((-1.0+3.0*a+a*h2)/6.0+w*((-7.0+15.0*a+h2*(-1.0+10.0*a+a*h2))/120.0+w*((-57.0+105.0*a+h2*(-18.0+105.0*a+h2*(-1.0+21.0*a+a*h2)))/5040.0+w*((-561.0+945.0*a+h2*(-285.0+1260.0*a+h2*(-33.0+378.0*a+h2*(-1.0+36.0*a+a*h2))))/362880.0+w*((-6555.0+10395.0*a+h2*(-4680.0+17325.0*a+h2*(-840.0+6930.0*a+h2*(-52.0+990.0*a+h2*(-1.0+55.0*a+a*h2)))))/39916800.0+((-89055.0+135135.0*a+h2*(-82845.0+270270.0*a+h2*(-20370.0+135135.0*a+h2*(-1926.0+25740.0*a+h2*(-75.0+2145.0*a+h2*(-1.0+78.0*a+a*h2))))))*w)/6227020800.0))))));
    ONE_OVER_SQRT_TWO_PI * (-0.5 * (h * h + t * t)).exp() * expansion
}

/// Region 3.
pub fn direct(h: f64, t: f64) -> f64 {
    let eht = (h * t).exp();
    norm_cdf(h + t) * eht - norm_cdf(h - t) / eht
}

/// Region 4.
pub fn scaled_complementary(h: f64, t: f64) -> f64 {
    0.5 * (-0.5 * (h * h + t * t)).exp()
        * (erfcx(-ONE_OVER_SQRT_TWO * (h + t)) - erfcx(-ONE_OVER_SQRT_TWO * (h - t)))
}
