//! # Frank
//!
//! $$
//! \psi(s)=-\frac{1}{\theta}\ln\left(1-(1-e^{-\theta})e^{-s}\right),\qquad
//! \psi^{-1}(u)=-\ln\frac{e^{-\theta u}-1}{e^{-\theta}-1}
//! $$
//!
use rand::Rng;

use crate::copulas::archimedean::frailty;
use crate::copulas::archimedean::signed;
use crate::copulas::archimedean::validate_params;
use crate::copulas::archimedean::ArchimedeanFamily;
use crate::copulas::archimedean::Derivative;
use crate::error::Result;
use crate::special::log1mexp;
use crate::special::log1pexp;
use crate::special::log_abs_expm1;
use crate::traits::ArchimedeanExt;

/// Radially symmetric family without tail dependence.
#[derive(Debug, Clone, PartialEq)]
pub struct Frank {
  pub dim: usize,
  pub theta: f64,
}

impl Frank {
  pub fn new(dim: usize, theta: f64) -> Result<Self> {
    validate_params(ArchimedeanFamily::Frank, dim, theta)?;
    Ok(Self { dim, theta })
  }

  pub fn set_theta(&mut self, theta: f64) -> Result<()> {
    validate_params(ArchimedeanFamily::Frank, self.dim, theta)?;
    self.theta = theta;
    Ok(())
  }
}

impl ArchimedeanExt for Frank {
  fn family(&self) -> ArchimedeanFamily {
    ArchimedeanFamily::Frank
  }

  fn theta(&self) -> f64 {
    self.theta
  }

  fn psi(&self, s: f64) -> f64 {
    let theta = self.theta;
    if theta > 0.0 {
      -log1mexp(s - log1mexp(theta)) / theta
    } else if theta < 0.0 {
      -log1pexp(log_abs_expm1(-theta) - s) / theta
    } else {
      (-s).exp()
    }
  }

  fn ipsi(&self, u: f64, log: bool) -> f64 {
    let theta = self.theta;
    let s = if theta == 0.0 {
      -u.ln()
    } else {
      log_abs_expm1(-theta) - log_abs_expm1(-theta * u)
    };

    if log {
      s.ln()
    } else {
      s
    }
  }

  fn dipsi(&self, u: f64, degree: Derivative, log: bool) -> f64 {
    let theta = self.theta;
    if theta == 0.0 {
      return match degree {
        Derivative::First => signed(-u.ln(), true, log),
        Derivative::Second => signed(-2.0 * u.ln(), false, log),
      };
    }

    let x = theta * u;
    match degree {
      Derivative::First => signed(theta.abs().ln() - log_abs_expm1(x), true, log),
      Derivative::Second => signed(
        2.0 * theta.abs().ln() + x - 2.0 * log_abs_expm1(x),
        false,
        log,
      ),
    }
  }

  fn frailty<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<f64> {
    if self.theta == 0.0 {
      return Ok(1.0);
    }
    Ok(frailty::logarithmic(-(-self.theta).exp_m1(), rng))
  }
}

impl_copula_ext!(Frank);
