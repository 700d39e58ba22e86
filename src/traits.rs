//! # Traits
//!
//! $$
//! C(u_1,\dots,u_d)=\psi\left(\sum_{j=1}^d \psi^{-1}(u_j)\right)
//! $$
//!
use ndarray::Array1;
use ndarray::Array2;
use ndarray::Axis;
use ndarray::Zip;
use ndarray_rand::RandomExt;
use rand::Rng;
use rand_distr::Exp1;
use rand_distr::Uniform;
use roots::find_root_brent;
use roots::SimpleConvergency;
use tracing::debug;
use tracing::warn;

use crate::copulas::archimedean::ArchimedeanFamily;
use crate::copulas::archimedean::Derivative;
use crate::copulas::summary::Summary;
use crate::error::CopulaError;
use crate::error::Result;
use crate::EPSILON;

/// Contract shared by every copula in the crate.
pub trait CopulaExt {
  /// Display name of the copula.
  fn name(&self) -> &'static str;

  /// Number of margins.
  fn dim(&self) -> usize;

  /// Dependence parameters, `None` for nonparametric copulas.
  fn params(&self) -> Option<Array1<f64>>;

  /// Copula distribution function, one value per row of `u`.
  fn cdf(&self, u: &Array2<f64>, log: bool) -> Result<Array1<f64>>;

  /// Copula density, one value per row of `u`.
  fn pdf(&self, u: &Array2<f64>, log: bool) -> Result<Array1<f64>>;

  /// Draws `n` observations using the caller's generator.
  fn random<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Result<Array2<f64>>;

  fn summary(&self) -> Summary;
}

/// Archimedean generator pair and the algorithms built on top of it.
///
/// Families implement `psi`, `ipsi`, `dipsi` and `frailty`; the
/// distribution function, bivariate density and sampler are written once
/// here against those four.
pub trait ArchimedeanExt: CopulaExt {
  fn family(&self) -> ArchimedeanFamily;

  fn theta(&self) -> f64;

  /// Generator `psi: [0, inf) -> (0, 1]`, monotonically decreasing.
  fn psi(&self, s: f64) -> f64;

  /// Inverse generator; `log` returns `ln(ipsi(u))`.
  fn ipsi(&self, u: f64, log: bool) -> f64;

  /// Derivative of the inverse generator.
  ///
  /// With `log` the natural log of the absolute value is returned (the
  /// first derivative is negative, the second positive).
  fn dipsi(&self, u: f64, degree: Derivative, log: bool) -> f64;

  /// Draws the Marshall-Olkin mixing variable `V` whose Laplace transform is `psi`.
  ///
  /// Only called for non-negative `theta`.
  fn frailty<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<f64>;

  /// `psi(sum_j ipsi(u_ij))` for every row `i`.
  fn generator_cdf(&self, u: &Array2<f64>, log: bool) -> Result<Array1<f64>> {
    check_columns(self.dim(), u)?;

    let cdf = u
      .mapv(|x| self.ipsi(x, false))
      .sum_axis(Axis(1))
      .mapv(|s| self.psi(s));

    Ok(if log { cdf.ln() } else { cdf })
  }

  /// Bivariate density
  /// `c(u, v) = -ipsi''(C) ipsi'(u) ipsi'(v) / ipsi'(C)^3`, evaluated in log space.
  fn generator_pdf(&self, u: &Array2<f64>, log: bool) -> Result<Array1<f64>> {
    if self.dim() != 2 {
      return Err(CopulaError::BivariateOnly {
        op: "density",
        dim: self.dim(),
      });
    }

    let cdf = self.generator_cdf(u, false)?;
    let log_pdf = Zip::from(u.rows()).and(&cdf).map_collect(|row, &c| {
      // zero set of a copula with negative dependence
      if c <= 0.0 {
        return f64::NEG_INFINITY;
      }

      self.dipsi(c, Derivative::Second, true)
        + self.dipsi(row[0], Derivative::First, true)
        + self.dipsi(row[1], Derivative::First, true)
        - 3.0 * self.dipsi(c, Derivative::First, true)
    });

    Ok(if log { log_pdf } else { log_pdf.exp() })
  }

  /// `P(V <= v | U = u) = ipsi'(u) / ipsi'(C(u, v))` for bivariate copulas.
  fn conditional_cdf(&self, u: f64, v: f64) -> Result<f64> {
    if self.dim() != 2 {
      return Err(CopulaError::BivariateOnly {
        op: "conditional distribution",
        dim: self.dim(),
      });
    }

    Ok(h_function(self, u, v))
  }

  /// Marshall-Olkin sampling `U_j = psi(E_j / V)`; bivariate copulas with
  /// negative `theta` have no frailty and are sampled by conditional inversion.
  fn generator_random<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Result<Array2<f64>> {
    debug!(
      family = %self.family(),
      theta = self.theta(),
      dim = self.dim(),
      n,
      "sampling archimedean copula"
    );

    if self.theta() < 0.0 {
      return conditional_inversion(self, n, rng);
    }

    let mut out = Array2::<f64>::zeros((n, self.dim()));
    for mut row in out.rows_mut() {
      let v = self.frailty(rng)?;
      for x in row.iter_mut() {
        let e: f64 = rng.sample(Exp1);
        *x = self.psi(e / v);
      }
    }

    Ok(out)
  }
}

pub(crate) fn check_columns(dim: usize, u: &Array2<f64>) -> Result<()> {
  if u.ncols() != dim {
    return Err(CopulaError::DimensionMismatch {
      expected: dim,
      got: u.ncols(),
    });
  }

  Ok(())
}

fn h_function<C: ArchimedeanExt + ?Sized>(copula: &C, u: f64, v: f64) -> f64 {
  let c = copula.psi(copula.ipsi(u, false) + copula.ipsi(v, false));
  if c <= 0.0 {
    return 0.0;
  }

  let log_h =
    copula.dipsi(u, Derivative::First, true) - copula.dipsi(c, Derivative::First, true);
  log_h.exp().clamp(0.0, 1.0)
}

fn conditional_inversion<C, R>(copula: &C, n: usize, rng: &mut R) -> Result<Array2<f64>>
where
  C: ArchimedeanExt + ?Sized,
  R: Rng + ?Sized,
{
  let mut out = Array2::<f64>::random_using((n, 2), Uniform::new(0.0, 1.0), rng);

  for mut row in out.rows_mut() {
    let (u, w) = (row[0], row[1]);
    let f = |v: f64| h_function(copula, u, v) - w;

    if f(EPSILON) >= 0.0 {
      row[1] = EPSILON;
      continue;
    }
    if f(1.0) <= 0.0 {
      row[1] = 1.0;
      continue;
    }

    let mut convergency = SimpleConvergency {
      eps: 1e-12,
      max_iter: 100,
    };
    row[1] = find_root_brent(EPSILON, 1.0, f, &mut convergency).map_err(|e| {
      warn!(u, w, "conditional inversion did not converge: {e:?}");
      CopulaError::RootSearch(format!("{e:?}"))
    })?;
  }

  Ok(out)
}
