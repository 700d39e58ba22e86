//! # Archimedean
//!
//! $$
//! C(u_1,\dots,u_d)=\psi\left(\psi^{-1}(u_1)+\dots+\psi^{-1}(u_d)\right)
//! $$
//!
use std::fmt;
use std::str::FromStr;

use rand::Rng;
use tracing::debug;

use crate::copulas::summary::Summary;
use crate::error::CopulaError;
use crate::error::Result;
use crate::traits::ArchimedeanExt;
use crate::traits::CopulaExt;

pub mod amh;
pub mod clayton;
pub mod frailty;
pub mod frank;
pub mod gumbel;
pub mod joe;

pub use amh::Amh;
pub use clayton::Clayton;
pub use frank::Frank;
pub use gumbel::Gumbel;
pub use joe::Joe;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchimedeanFamily {
  Clayton,
  Frank,
  Amh,
  Gumbel,
  Joe,
}

impl ArchimedeanFamily {
  pub const ALL: [ArchimedeanFamily; 5] = [
    ArchimedeanFamily::Clayton,
    ArchimedeanFamily::Frank,
    ArchimedeanFamily::Amh,
    ArchimedeanFamily::Gumbel,
    ArchimedeanFamily::Joe,
  ];

  pub fn name(&self) -> &'static str {
    match self {
      ArchimedeanFamily::Clayton => "Clayton",
      ArchimedeanFamily::Frank => "Frank",
      ArchimedeanFamily::Amh => "AMH",
      ArchimedeanFamily::Gumbel => "Gumbel",
      ArchimedeanFamily::Joe => "Joe",
    }
  }

  /// Inclusive parameter interval for a copula of dimension `dim`.
  pub fn theta_bounds(&self, dim: usize) -> (f64, f64) {
    let bivariate = dim == 2;
    match self {
      ArchimedeanFamily::Clayton if bivariate => (-1.0, f64::INFINITY),
      ArchimedeanFamily::Clayton => (0.0, f64::INFINITY),
      ArchimedeanFamily::Frank if bivariate => (f64::NEG_INFINITY, f64::INFINITY),
      ArchimedeanFamily::Frank => (0.0, f64::INFINITY),
      ArchimedeanFamily::Amh if bivariate => (-1.0, 1.0),
      ArchimedeanFamily::Amh => (0.0, 1.0),
      ArchimedeanFamily::Gumbel | ArchimedeanFamily::Joe => (1.0, f64::INFINITY),
    }
  }

  /// Values inside the bounds the generator is not defined for.
  pub fn invalid_thetas(&self) -> Vec<f64> {
    match self {
      ArchimedeanFamily::Amh => vec![1.0],
      _ => vec![],
    }
  }

  /// `theta` at which the family reduces to the independence copula.
  pub fn independence_theta(&self) -> f64 {
    match self {
      ArchimedeanFamily::Clayton | ArchimedeanFamily::Frank | ArchimedeanFamily::Amh => 0.0,
      ArchimedeanFamily::Gumbel | ArchimedeanFamily::Joe => 1.0,
    }
  }
}

impl FromStr for ArchimedeanFamily {
  type Err = CopulaError;

  fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "clayton" => Ok(ArchimedeanFamily::Clayton),
      "frank" => Ok(ArchimedeanFamily::Frank),
      "amh" => Ok(ArchimedeanFamily::Amh),
      "gumbel" => Ok(ArchimedeanFamily::Gumbel),
      "joe" => Ok(ArchimedeanFamily::Joe),
      other => Err(CopulaError::UnknownFamily(other.to_string())),
    }
  }
}

impl fmt::Display for ArchimedeanFamily {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// Order of the inverse-generator derivative returned by `dipsi`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Derivative {
  First,
  Second,
}

impl TryFrom<usize> for Derivative {
  type Error = CopulaError;

  fn try_from(degree: usize) -> Result<Self> {
    match degree {
      1 => Ok(Derivative::First),
      2 => Ok(Derivative::Second),
      d => Err(CopulaError::UnsupportedDerivative(d)),
    }
  }
}

/// Validates `(dim, theta)` for `family`.
///
/// Checks run in order: `theta` is a finite real, `dim >= 2`, `theta >= 0`
/// when `dim > 2`, then the family's own parameter interval.
pub fn validate_params(family: ArchimedeanFamily, dim: usize, theta: f64) -> Result<()> {
  if !theta.is_finite() {
    return Err(CopulaError::InvalidTheta(theta));
  }
  if dim < 2 {
    return Err(CopulaError::InvalidDimension(dim));
  }
  if dim > 2 && theta < 0.0 {
    return Err(CopulaError::NegativeTheta { theta, dim });
  }

  let (lower, upper) = family.theta_bounds(dim);
  let invalid = family.invalid_thetas();
  if !(lower <= theta && theta <= upper) || invalid.contains(&theta) {
    return Err(CopulaError::ThetaOutOfBounds {
      family: family.name(),
      theta,
      lower,
      upper,
      invalid,
    });
  }

  debug!(family = %family, dim, theta, "validated archimedean parameters");
  Ok(())
}

pub(crate) fn summarize<C: ArchimedeanExt + ?Sized>(copula: &C) -> Summary {
  Summary::new(copula.name())
    .with("Family", copula.family())
    .with("Dimensions", copula.dim())
    .with("Theta", copula.theta())
}

/// Archimedean copula whose family is chosen at construction.
#[derive(Debug, Clone, PartialEq)]
pub enum ArchimedeanCopula {
  Clayton(Clayton),
  Frank(Frank),
  Amh(Amh),
  Gumbel(Gumbel),
  Joe(Joe),
}

macro_rules! dispatch {
  ($self:expr, $c:ident => $body:expr) => {
    match $self {
      ArchimedeanCopula::Clayton($c) => $body,
      ArchimedeanCopula::Frank($c) => $body,
      ArchimedeanCopula::Amh($c) => $body,
      ArchimedeanCopula::Gumbel($c) => $body,
      ArchimedeanCopula::Joe($c) => $body,
    }
  };
}

impl ArchimedeanCopula {
  pub fn new(family: ArchimedeanFamily, dim: usize, theta: f64) -> Result<Self> {
    Ok(match family {
      ArchimedeanFamily::Clayton => ArchimedeanCopula::Clayton(Clayton::new(dim, theta)?),
      ArchimedeanFamily::Frank => ArchimedeanCopula::Frank(Frank::new(dim, theta)?),
      ArchimedeanFamily::Amh => ArchimedeanCopula::Amh(Amh::new(dim, theta)?),
      ArchimedeanFamily::Gumbel => ArchimedeanCopula::Gumbel(Gumbel::new(dim, theta)?),
      ArchimedeanFamily::Joe => ArchimedeanCopula::Joe(Joe::new(dim, theta)?),
    })
  }

  /// Builds a copula from a case-insensitive family name.
  pub fn from_name(family: &str, dim: usize, theta: f64) -> Result<Self> {
    Self::new(family.parse()?, dim, theta)
  }

  /// Replaces `theta` after re-validating it; family and dimension are fixed.
  pub fn set_theta(&mut self, theta: f64) -> Result<()> {
    dispatch!(self, c => c.set_theta(theta))
  }
}

impl ArchimedeanExt for ArchimedeanCopula {
  fn family(&self) -> ArchimedeanFamily {
    dispatch!(self, c => c.family())
  }

  fn theta(&self) -> f64 {
    dispatch!(self, c => c.theta())
  }

  fn psi(&self, s: f64) -> f64 {
    dispatch!(self, c => c.psi(s))
  }

  fn ipsi(&self, u: f64, log: bool) -> f64 {
    dispatch!(self, c => c.ipsi(u, log))
  }

  fn dipsi(&self, u: f64, degree: Derivative, log: bool) -> f64 {
    dispatch!(self, c => c.dipsi(u, degree, log))
  }

  fn frailty<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<f64> {
    dispatch!(self, c => c.frailty(rng))
  }
}

impl_copula_ext!(ArchimedeanCopula, |copula| dispatch!(copula, c => c.dim));

/// Finishes a derivative evaluated as `(ln|d|, sign)`.
pub(crate) fn signed(log_abs: f64, negative: bool, log: bool) -> f64 {
  if log {
    log_abs
  } else if negative {
    -log_abs.exp()
  } else {
    log_abs.exp()
  }
}

/// `w ln(x)`, zero when the exponent vanishes so that `0 * ln(0)` stays finite.
pub(crate) fn scaled_ln(w: f64, x: f64) -> f64 {
  if w == 0.0 {
    0.0
  } else {
    w * x.ln()
  }
}
