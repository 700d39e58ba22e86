//! # Gumbel
//!
//! $$
//! \psi(s)=\exp\left(-s^{1/\theta}\right),\qquad \psi^{-1}(u)=(-\ln u)^{\theta}
//! $$
//!
use rand::Rng;

use crate::copulas::archimedean::frailty;
use crate::copulas::archimedean::scaled_ln;
use crate::copulas::archimedean::signed;
use crate::copulas::archimedean::validate_params;
use crate::copulas::archimedean::ArchimedeanFamily;
use crate::copulas::archimedean::Derivative;
use crate::error::Result;
use crate::traits::ArchimedeanExt;

/// Upper-tail dependent extreme-value family, `theta` in `[1, inf)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Gumbel {
  pub dim: usize,
  pub theta: f64,
}

impl Gumbel {
  pub fn new(dim: usize, theta: f64) -> Result<Self> {
    validate_params(ArchimedeanFamily::Gumbel, dim, theta)?;
    Ok(Self { dim, theta })
  }

  pub fn set_theta(&mut self, theta: f64) -> Result<()> {
    validate_params(ArchimedeanFamily::Gumbel, self.dim, theta)?;
    self.theta = theta;
    Ok(())
  }
}

impl ArchimedeanExt for Gumbel {
  fn family(&self) -> ArchimedeanFamily {
    ArchimedeanFamily::Gumbel
  }

  fn theta(&self) -> f64 {
    self.theta
  }

  fn psi(&self, s: f64) -> f64 {
    (-s.powf(1.0 / self.theta)).exp()
  }

  fn ipsi(&self, u: f64, log: bool) -> f64 {
    let l = -u.ln();
    if log {
      self.theta * l.ln()
    } else {
      l.powf(self.theta)
    }
  }

  fn dipsi(&self, u: f64, degree: Derivative, log: bool) -> f64 {
    let theta = self.theta;
    let l = -u.ln();
    match degree {
      Derivative::First => signed(theta.ln() + scaled_ln(theta - 1.0, l) + l, true, log),
      Derivative::Second => signed(
        theta.ln() + scaled_ln(theta - 2.0, l) + (theta - 1.0 + l).ln() + 2.0 * l,
        false,
        log,
      ),
    }
  }

  fn frailty<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<f64> {
    Ok(frailty::positive_stable(1.0 / self.theta, rng))
  }
}

impl_copula_ext!(Gumbel);
