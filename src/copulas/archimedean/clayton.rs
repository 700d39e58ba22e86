//! # Clayton
//!
//! $$
//! \psi(s)=(1+\theta s)^{-1/\theta},\qquad \psi^{-1}(u)=\frac{u^{-\theta}-1}{\theta}
//! $$
//!
use rand::Rng;

use crate::copulas::archimedean::frailty;
use crate::copulas::archimedean::signed;
use crate::copulas::archimedean::validate_params;
use crate::copulas::archimedean::ArchimedeanFamily;
use crate::copulas::archimedean::Derivative;
use crate::error::Result;
use crate::special::log_abs_expm1;
use crate::traits::ArchimedeanExt;

/// Lower-tail dependent family, `theta` in `[-1, inf)` for two margins and
/// `[0, inf)` otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct Clayton {
  pub dim: usize,
  pub theta: f64,
}

impl Clayton {
  pub fn new(dim: usize, theta: f64) -> Result<Self> {
    validate_params(ArchimedeanFamily::Clayton, dim, theta)?;
    Ok(Self { dim, theta })
  }

  pub fn set_theta(&mut self, theta: f64) -> Result<()> {
    validate_params(ArchimedeanFamily::Clayton, self.dim, theta)?;
    self.theta = theta;
    Ok(())
  }
}

impl ArchimedeanExt for Clayton {
  fn family(&self) -> ArchimedeanFamily {
    ArchimedeanFamily::Clayton
  }

  fn theta(&self) -> f64 {
    self.theta
  }

  fn psi(&self, s: f64) -> f64 {
    let theta = self.theta;
    if theta == 0.0 {
      return (-s).exp();
    }

    let t = theta * s;
    if t <= -1.0 {
      return 0.0;
    }
    (-t.ln_1p() / theta).exp()
  }

  fn ipsi(&self, u: f64, log: bool) -> f64 {
    let theta = self.theta;
    if theta == 0.0 {
      let s = -u.ln();
      return if log { s.ln() } else { s };
    }

    let x = -theta * u.ln();
    if log {
      log_abs_expm1(x) - theta.abs().ln()
    } else {
      x.exp_m1() / theta
    }
  }

  fn dipsi(&self, u: f64, degree: Derivative, log: bool) -> f64 {
    let theta = self.theta;
    match degree {
      Derivative::First => signed(-(1.0 + theta) * u.ln(), true, log),
      Derivative::Second => signed(theta.ln_1p() - (2.0 + theta) * u.ln(), false, log),
    }
  }

  fn frailty<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<f64> {
    if self.theta == 0.0 {
      return Ok(1.0);
    }
    frailty::gamma(1.0 / self.theta, self.theta, rng)
  }
}

impl_copula_ext!(Clayton);
