//! # Frailty
//!
//! $$
//! \psi(s)=\mathbb E\left[e^{-sV}\right],\qquad U_j=\psi(E_j/V),\ E_j\sim\mathrm{Exp}(1)
//! $$
//!
//! Mixing distributions whose Laplace transforms are the Archimedean generators.
//!
use std::f64::consts::PI;

use rand::Rng;
use rand_distr::Distribution;
use rand_distr::Exp1;
use rand_distr::Gamma;
use rand_distr::Geometric;
use rand_distr::Open01;
use statrs::function::beta::ln_beta;

use crate::error::CopulaError;
use crate::error::Result;

/// `Gamma(shape, scale)` variate (Clayton: shape `1/theta`, scale `theta`).
pub fn gamma<R: Rng + ?Sized>(shape: f64, scale: f64, rng: &mut R) -> Result<f64> {
  let dist = Gamma::new(shape, scale).map_err(|e| CopulaError::Distribution(e.to_string()))?;
  Ok(dist.sample(rng))
}

/// `1 + Geometric(p)` variate on `{1, 2, ...}` (AMH with `p = 1 - theta`).
pub fn shifted_geometric<R: Rng + ?Sized>(p: f64, rng: &mut R) -> Result<f64> {
  let dist = Geometric::new(p).map_err(|e| CopulaError::Distribution(e.to_string()))?;
  Ok(1.0 + dist.sample(rng) as f64)
}

/// Logarithmic series variate, `P(V = k) = -p^k / (k ln(1 - p))` (Frank with
/// `p = 1 - e^{-theta}`), by Kemp's LK algorithm.
pub fn logarithmic<R: Rng + ?Sized>(p: f64, rng: &mut R) -> f64 {
  let v: f64 = rng.sample(Open01);
  if v >= p {
    return 1.0;
  }

  let u: f64 = rng.sample(Open01);
  let q = -(u * (-p).ln_1p()).exp_m1();
  if v <= q * q {
    (1.0 + v.ln() / q.ln()).floor()
  } else if v <= q {
    2.0
  } else {
    1.0
  }
}

/// One-sided stable variate with Laplace transform `exp(-s^alpha)`,
/// `alpha` in `(0, 1]` (Gumbel with `alpha = 1/theta`), by Kanter's
/// representation.
pub fn positive_stable<R: Rng + ?Sized>(alpha: f64, rng: &mut R) -> f64 {
  if alpha >= 1.0 {
    return 1.0;
  }

  let u = PI * rng.sample::<f64, _>(Open01);
  let e: f64 = rng.sample(Exp1);
  let a = (alpha * u).sin() / u.sin().powf(1.0 / alpha);
  let b = ((1.0 - alpha) * u).sin() / e;
  a * b.powf((1.0 - alpha) / alpha)
}

/// Sibuya variate with `P(V > k) = 1 / (k B(k, 1 - alpha))`, `alpha` in
/// `(0, 1]` (Joe with `alpha = 1/theta`), by inverting the survival function.
pub fn sibuya<R: Rng + ?Sized>(alpha: f64, rng: &mut R) -> f64 {
  let u: f64 = rng.sample(Open01);
  if alpha >= 1.0 || u <= alpha {
    return 1.0;
  }

  let target = (-u).ln_1p();
  let ln_survival = |k: f64| -k.ln() - ln_beta(k, 1.0 - alpha);

  // S(lo) > 1 - u >= S(hi)
  let mut lo = 1.0;
  let mut hi = 2.0;
  while ln_survival(hi) > target {
    lo = hi;
    hi *= 2.0;
    if hi > 2f64.powi(53) {
      return hi;
    }
  }

  while hi - lo > 1.0 {
    let mid = ((lo + hi) / 2.0).floor();
    if ln_survival(mid) > target {
      lo = mid;
    } else {
      hi = mid;
    }
  }

  hi
}

#[cfg(test)]
mod tests {
  use approx::assert_relative_eq;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  use super::*;

  const N: usize = 20_000;

  fn mean_of(mut draw: impl FnMut(&mut StdRng) -> f64) -> f64 {
    let mut rng = StdRng::seed_from_u64(3);
    (0..N).map(|_| draw(&mut rng)).sum::<f64>() / N as f64
  }

  #[test]
  fn logarithmic_mean() {
    let p: f64 = 0.8;
    let expected = -p / ((1.0 - p) * (-p).ln_1p());
    assert_relative_eq!(
      mean_of(|rng| logarithmic(p, rng)),
      expected,
      max_relative = 0.05
    );
  }

  #[test]
  fn geometric_mean() {
    let p = 0.4;
    assert_relative_eq!(
      mean_of(|rng| shifted_geometric(p, rng).unwrap()),
      1.0 / p,
      max_relative = 0.05
    );
  }

  #[test]
  fn positive_stable_laplace_transform() {
    // E[exp(-s V)] = exp(-s^alpha)
    let alpha = 0.5;
    let s: f64 = 1.3;
    assert_relative_eq!(
      mean_of(|rng| (-s * positive_stable(alpha, rng)).exp()),
      (-s.powf(alpha)).exp(),
      max_relative = 0.03
    );
  }

  #[test]
  fn sibuya_laplace_transform_and_support() {
    // E[exp(-s V)] = 1 - (1 - e^{-s})^alpha
    let alpha = 0.5;
    let s: f64 = 0.7;
    let mut rng = StdRng::seed_from_u64(11);
    let draws: Vec<f64> = (0..N).map(|_| sibuya(alpha, &mut rng)).collect();
    assert!(draws.iter().all(|&v| v >= 1.0 && v.fract() == 0.0));

    let lt = draws.iter().map(|&v| (-s * v).exp()).sum::<f64>() / N as f64;
    assert_relative_eq!(
      lt,
      1.0 - (1.0 - (-s).exp()).powf(alpha),
      max_relative = 0.03
    );
  }

  #[test]
  fn invalid_parameters_surface_as_errors() {
    let mut rng = StdRng::seed_from_u64(1);
    assert!(gamma(-1.0, 1.0, &mut rng).is_err());
    assert!(shifted_geometric(1.5, &mut rng).is_err());
  }
}
