//! # Ali-Mikhail-Haq
//!
//! $$
//! \psi(s)=\frac{1-\theta}{e^{s}-\theta},\qquad \psi^{-1}(u)=\ln\frac{1-\theta(1-u)}{u}
//! $$
//!
use rand::Rng;

use crate::copulas::archimedean::frailty;
use crate::copulas::archimedean::signed;
use crate::copulas::archimedean::validate_params;
use crate::copulas::archimedean::ArchimedeanFamily;
use crate::copulas::archimedean::Derivative;
use crate::error::Result;
use crate::traits::ArchimedeanExt;

#[derive(Debug, Clone, PartialEq)]
pub struct Amh {
  pub dim: usize,
  pub theta: f64,
}

impl Amh {
  pub fn new(dim: usize, theta: f64) -> Result<Self> {
    validate_params(ArchimedeanFamily::Amh, dim, theta)?;
    Ok(Self { dim, theta })
  }

  pub fn set_theta(&mut self, theta: f64) -> Result<()> {
    validate_params(ArchimedeanFamily::Amh, self.dim, theta)?;
    self.theta = theta;
    Ok(())
  }
}

impl ArchimedeanExt for Amh {
  fn family(&self) -> ArchimedeanFamily {
    ArchimedeanFamily::Amh
  }

  fn theta(&self) -> f64 {
    self.theta
  }

  fn psi(&self, s: f64) -> f64 {
    (1.0 - self.theta) / (s.exp() - self.theta)
  }

  fn ipsi(&self, u: f64, log: bool) -> f64 {
    let s = (-self.theta * (1.0 - u)).ln_1p() - u.ln();
    if log {
      s.ln()
    } else {
      s
    }
  }

  fn dipsi(&self, u: f64, degree: Derivative, log: bool) -> f64 {
    let theta = self.theta;
    let denom = 1.0 - theta * (1.0 - u);
    match degree {
      Derivative::First => signed((-theta).ln_1p() - u.ln() - denom.ln(), true, log),
      Derivative::Second => {
        let d2 = 1.0 / (u * u) - (theta * theta) / (denom * denom);
        if log {
          d2.ln()
        } else {
          d2
        }
      }
    }
  }

  fn frailty<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<f64> {
    frailty::shifted_geometric(1.0 - self.theta, rng)
  }
}

impl_copula_ext!(Amh);

#[cfg(test)]
mod tests {
  use approx::assert_relative_eq;
  use ndarray::array;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  use super::*;
  use crate::copulas::archimedean::tests::sample_tau;
  use crate::traits::CopulaExt;

  #[test]
  fn cdf_matches_closed_form() {
    let theta = 0.7;
    let copula = Amh::new(2, theta).unwrap();
    let u = array![[0.2, 0.6], [0.9, 0.45]];
    let cdf = copula.cdf(&u, false).unwrap();
    for (row, c) in u.rows().into_iter().zip(cdf.iter()) {
      let (a, b) = (row[0], row[1]);
      let expected = a * b / (1.0 - theta * (1.0 - a) * (1.0 - b));
      assert_relative_eq!(*c, expected, max_relative = 1e-12);
    }
  }

  #[test]
  fn name_is_uppercase() {
    let copula = Amh::new(2, 0.3).unwrap();
    assert_eq!(copula.name(), "AMH");
    assert_eq!(copula.summary().name(), "AMH");
  }

  #[test]
  fn sample_tau_is_weak_and_positive() {
    // tau = 1 - 2((1 - theta)^2 ln(1 - theta) + theta) / (3 theta^2)
    let theta: f64 = 0.9;
    let tau = 1.0
      - 2.0 * ((1.0 - theta).powi(2) * (1.0 - theta).ln() + theta) / (3.0 * theta * theta);
    let copula = Amh::new(2, theta).unwrap();
    let sample = copula.random(1500, &mut StdRng::seed_from_u64(5)).unwrap();
    assert!((sample_tau(&sample) - tau).abs() < 0.06);
  }
}
