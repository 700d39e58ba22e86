//! # Joe
//!
//! $$
//! \psi(s)=1-\left(1-e^{-s}\right)^{1/\theta},\qquad \psi^{-1}(u)=-\ln\left(1-(1-u)^{\theta}\right)
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
use crate::special::log1mexp;
use crate::traits::ArchimedeanExt;

#[derive(Debug, Clone, PartialEq)]
pub struct Joe {
  pub dim: usize,
  pub theta: f64,
}

impl Joe {
  pub fn new(dim: usize, theta: f64) -> Result<Self> {
    validate_params(ArchimedeanFamily::Joe, dim, theta)?;
    Ok(Self { dim, theta })
  }

  pub fn set_theta(&mut self, theta: f64) -> Result<()> {
    validate_params(ArchimedeanFamily::Joe, self.dim, theta)?;
    self.theta = theta;
    Ok(())
  }
}

impl ArchimedeanExt for Joe {
  fn family(&self) -> ArchimedeanFamily {
    ArchimedeanFamily::Joe
  }

  fn theta(&self) -> f64 {
    self.theta
  }

  fn psi(&self, s: f64) -> f64 {
    -(log1mexp(s) / self.theta).exp_m1()
  }

  fn ipsi(&self, u: f64, log: bool) -> f64 {
    let s = -(-(1.0 - u).powf(self.theta)).ln_1p();
    if log {
      s.ln()
    } else {
      s
    }
  }

  fn dipsi(&self, u: f64, degree: Derivative, log: bool) -> f64 {
    let theta = self.theta;
    let a = 1.0 - u;
    // ln(1 - a^theta)
    let ln_tail = log1mexp(-theta * a.ln());
    match degree {
      Derivative::First => signed(
        theta.ln() + scaled_ln(theta - 1.0, a) - ln_tail,
        true,
        log,
      ),
      Derivative::Second => signed(
        theta.ln() + scaled_ln(theta - 2.0, a) + (theta - 1.0 + a.powf(theta)).ln()
          - 2.0 * ln_tail,
        false,
        log,
      ),
    }
  }

  fn frailty<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<f64> {
    Ok(frailty::sibuya(1.0 / self.theta, rng))
  }
}

impl_copula_ext!(Joe);
