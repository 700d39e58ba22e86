//! # Special
//!
//! $$
//! \log\sum_i e^{x_i}=m+\log\sum_i e^{x_i-m},\qquad m=\max_i x_i
//! $$
//!
//! Log-domain helpers used by the generator closed forms, the sign of the
//! falling-factorial series terms, plus exact combinatorial coefficients in
//! [`stirling`].
//!
pub mod stirling;

pub use stirling::stirling_first;
pub use stirling::stirling_first_all;
pub use stirling::stirling_first_signed;
pub use stirling::stirling_second;
pub use stirling::stirling_second_all;

use std::f64::consts::LN_2;

use crate::error::CopulaError;
use crate::error::Result;

/// `ln(1 - e^{-x})` for `x >= 0`.
///
/// Switches between `ln(-expm1(-x))` and `ln1p(-exp(-x))` at `ln 2`
/// (Mächler, "Accurately Computing log(1 - exp(-|a|))", 2012).
pub fn log1mexp(x: f64) -> f64 {
  if x <= LN_2 {
    (-(-x).exp_m1()).ln()
  } else {
    (-(-x).exp()).ln_1p()
  }
}

/// `ln(1 + e^{x})` without overflow for large `x`.
pub fn log1pexp(x: f64) -> f64 {
  if x <= -37.0 {
    x.exp()
  } else if x <= 18.0 {
    x.exp().ln_1p()
  } else if x <= 33.3 {
    x + (-x).exp()
  } else {
    x
  }
}

/// `ln|e^{x} - 1|`, accurate for small `|x|` and free of overflow for large `x`.
pub fn log_abs_expm1(x: f64) -> f64 {
  if x > 0.0 {
    x + log1mexp(x)
  } else {
    log1mexp(-x)
  }
}

/// Log-sum-exp of a slice of log-values.
///
/// Returns `-inf` for an empty slice or when every term is `-inf`.
pub fn log_sum(x: &[f64]) -> f64 {
  let m = x.iter().copied().fold(f64::NEG_INFINITY, f64::max);
  if !m.is_finite() {
    return m;
  }

  m + x.iter().map(|&xi| (xi - m).exp()).sum::<f64>().ln()
}

/// Polynomial evaluation via the Horner scheme.
///
/// Evaluates `coef[0] + coef[1] x + ... + coef[p] x^p`; an empty
/// coefficient slice is the zero polynomial.
pub fn polyn_eval(coef: &[f64], x: f64) -> f64 {
  coef.iter().rev().fold(0.0, |acc, &c| c + acc * x)
}

/// Sign of `binom(alpha j, d) (-1)^(d - j)`, one of `-1`, `0` or `1`.
///
/// This is the sign of the `j`-th term in the series expansions of the
/// higher-order Gumbel and Joe generator derivatives. The binomial vanishes
/// when `alpha j` is an integer below `d`.
///
/// # Errors
/// [`CopulaError::InvalidAlpha`] unless `0 < alpha <= 1`.
pub fn sign_ff(alpha: f64, j: u64, d: u64) -> Result<f64> {
  if !(alpha > 0.0 && alpha <= 1.0) {
    return Err(CopulaError::InvalidAlpha(alpha));
  }

  let x = alpha * j as f64;
  // negative factors among x, x - 1, ..., x - d + 1
  let negative = if x.fract() == 0.0 {
    if x < d as f64 {
      return Ok(0.0);
    }
    0
  } else {
    d.saturating_sub(x.ceil() as u64)
  };

  Ok(if (negative % 2 + d.abs_diff(j) % 2) % 2 == 0 {
    1.0
  } else {
    -1.0
  })
}
