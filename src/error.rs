//! Error types for copula construction and evaluation

use thiserror::Error;

/// Result type alias using the crate's [`CopulaError`]
pub type Result<T> = std::result::Result<T, CopulaError>;

/// Broad class of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  /// An argument had the wrong type (e.g. a fractional Stirling index).
  Type,
  /// An argument had the right type but an invalid value.
  Value,
  /// The operation is not defined for the copula's current configuration.
  Precondition,
}

/// Errors that can occur while building or evaluating copulas
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CopulaError {
  /// Stirling arguments that are not integers
  #[error("<k> and <n> must both be integers")]
  NotInteger,

  /// Stirling `k` outside `[0, n]`
  #[error("<k> must be in the range of [0, <n>] (got k = {k}, n = {n})")]
  OutOfRange {
    /// Number of elements
    n: i64,
    /// Number of cycles / blocks
    k: i64,
  },

  /// Stirling number too large for 128-bit integers
  #[error("Stirling number for n = {n}, k = {k} overflows 128-bit integers")]
  Overflow {
    /// Number of elements
    n: u64,
    /// Number of cycles / blocks
    k: u64,
  },

  /// Theta is not a real number
  #[error("theta must be a float, got {0}")]
  InvalidTheta(f64),

  /// Exponent of the `sign_ff` binomial outside `(0, 1]`
  #[error("alpha must be in (0, 1], got {0}")]
  InvalidAlpha(f64),

  /// Copula dimension below two
  #[error("dim must be >= 2, got {0}")]
  InvalidDimension(usize),

  /// Negative theta requested for a copula of dimension above two
  #[error("theta can only be negative when dim = 2 (got theta = {theta}, dim = {dim})")]
  NegativeTheta {
    /// Requested theta
    theta: f64,
    /// Copula dimension
    dim: usize,
  },

  /// Theta outside the family's parameter space
  #[error("theta for the {family} copula must be in [{lower}, {upper}] and not in {invalid:?}, got {theta}")]
  ThetaOutOfBounds {
    /// Family name
    family: &'static str,
    /// Requested theta
    theta: f64,
    /// Lower bound (inclusive)
    lower: f64,
    /// Upper bound (inclusive)
    upper: f64,
    /// Excluded values inside the bounds
    invalid: Vec<f64>,
  },

  /// Unsupported Archimedean family name
  #[error("Unknown family of Archimedean copula: {0}. Use one of clayton, frank, amh, gumbel, joe")]
  UnknownFamily(String),

  /// Unsupported smoothing mode
  #[error("Smoothing must be 'none', 'beta' or 'checkerboard', got '{0}'")]
  UnknownSmoothing(String),

  /// Unsupported tie-breaking method
  #[error("ties must be one of 'average', 'min', 'max', 'dense' or 'ordinal', got '{0}'")]
  UnknownTies(String),

  /// Unsupported derivative degree for `dipsi`
  #[error("only the first two derivatives of ipsi are available, got degree {0}")]
  UnsupportedDerivative(usize),

  /// Input outside `[-EPSILON, 1 + EPSILON]`
  #[error("input array must be pseudo observations")]
  NotPseudoObservations,

  /// Density requested from an empirical copula without beta smoothing
  #[error("Empirical Copula only has density (PDF) for 'beta' smoothing")]
  PdfRequiresBetaSmoothing,

  /// Operation only defined for bivariate copulas
  #[error("{op} is only available for bivariate copulas, got dim = {dim}")]
  BivariateOnly {
    /// Operation name
    op: &'static str,
    /// Copula dimension
    dim: usize,
  },

  /// Input column count does not match the copula dimension
  #[error("input has {got} columns but the copula has dimension {expected}")]
  DimensionMismatch {
    /// Copula dimension
    expected: usize,
    /// Columns supplied
    got: usize,
  },

  /// Data set without observations
  #[error("data must contain at least one observation")]
  EmptyData,

  /// Column labels that do not match the matrix width
  #[error("{labels} column labels supplied for a matrix with {width} columns")]
  LabelMismatch {
    /// Number of labels
    labels: usize,
    /// Matrix width
    width: usize,
  },

  /// A distribution could not be built from the derived parameters
  #[error("invalid distribution parameters: {0}")]
  Distribution(String),

  /// Root search failed while inverting a conditional distribution
  #[error("root search failed: {0}")]
  RootSearch(String),
}

impl CopulaError {
  /// Classifies the failure.
  pub fn kind(&self) -> ErrorKind {
    match self {
      CopulaError::NotInteger | CopulaError::InvalidTheta(_) => ErrorKind::Type,
      CopulaError::PdfRequiresBetaSmoothing | CopulaError::BivariateOnly { .. } => {
        ErrorKind::Precondition
      }
      _ => ErrorKind::Value,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::CopulaError;
  use super::ErrorKind;

  #[test]
  fn messages_keep_contract_wording() {
    assert_eq!(
      CopulaError::NotInteger.to_string(),
      "<k> and <n> must both be integers"
    );
    assert!(CopulaError::OutOfRange { n: 4, k: 6 }
      .to_string()
      .contains("<k> must be in the range of [0, <n>]"));
    assert!(CopulaError::UnknownFamily("student".into())
      .to_string()
      .contains("clayton, frank, amh, gumbel, joe"));
  }

  #[test]
  fn kinds_follow_failure_class() {
    assert_eq!(CopulaError::NotInteger.kind(), ErrorKind::Type);
    assert_eq!(CopulaError::InvalidTheta(f64::NAN).kind(), ErrorKind::Type);
    assert_eq!(CopulaError::OutOfRange { n: 4, k: -1 }.kind(), ErrorKind::Value);
    assert_eq!(CopulaError::NotPseudoObservations.kind(), ErrorKind::Value);
    assert_eq!(
      CopulaError::PdfRequiresBetaSmoothing.kind(),
      ErrorKind::Precondition
    );
  }
}
