//! # Empirical
//!
//! $$
//! C_n(u)=\frac{1}{n+o}\sum_{i=1}^n \prod_{j=1}^d \mathbf 1\{\hat U_{ij}\le u_j\}
//! $$
//!
//! Nonparametric copula defined by a reference sample. The indicator can be
//! replaced by Beta kernels (empirical beta copula, Segers, Sibuya and
//! Tsukahara 2017) or by checkerboard cells.
//!
use std::fmt;
use std::str::FromStr;

use ndarray::Array1;
use ndarray::Array2;
use ndarray::Axis;
use rand::Rng;
use tracing::debug;
use tracing::warn;

use crate::copulas::summary::Summary;
use crate::error::CopulaError;
use crate::error::Result;
use crate::frame::LabeledMatrix;
use crate::stats::ranks::pseudo_obs;
use crate::stats::ranks::rank_data;
use crate::stats::ranks::Ties;
use crate::traits::check_columns;
use crate::traits::CopulaExt;
use crate::EPSILON;

pub mod distribution;

/// Kernel replacing the indicator of the empirical distribution function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Smoothing {
  #[default]
  None,
  Beta,
  Checkerboard,
}

impl FromStr for Smoothing {
  type Err = CopulaError;

  fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "none" => Ok(Smoothing::None),
      "beta" => Ok(Smoothing::Beta),
      "checkerboard" => Ok(Smoothing::Checkerboard),
      _ => Err(CopulaError::UnknownSmoothing(s.to_string())),
    }
  }
}

impl fmt::Display for Smoothing {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Smoothing::None => "none",
      Smoothing::Beta => "beta",
      Smoothing::Checkerboard => "checkerboard",
    };
    f.write_str(name)
  }
}

/// Configuration for [`EmpiricalCopula`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmpiricalOptions {
  /// Kernel used by `cdf`; only `Beta` has a density.
  pub smoothing: Smoothing,
  /// Tie policy for the reference ranks.
  pub ties: Ties,
  /// Added to `n` in the normalisation of `cdf` and `pdf`.
  pub offset: f64,
}

impl Default for EmpiricalOptions {
  fn default() -> Self {
    Self {
      smoothing: Smoothing::None,
      ties: Ties::Average,
      offset: 0.0,
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmpiricalCopula {
  data: Array2<f64>,
  pobs: Array2<f64>,
  ranks: Array2<f64>,
  options: EmpiricalOptions,
  columns: Option<Vec<String>>,
}

impl EmpiricalCopula {
  /// Builds the copula from raw margins data (one row per observation).
  ///
  /// The data need not be pseudo-observations; ranks are taken within columns.
  pub fn new(data: Array2<f64>, options: EmpiricalOptions) -> Result<Self> {
    if data.nrows() == 0 {
      return Err(CopulaError::EmptyData);
    }
    if data.ncols() < 2 {
      return Err(CopulaError::InvalidDimension(data.ncols()));
    }

    let pobs = pseudo_obs(&data.view(), options.ties);
    let ranks = rank_data(&data.view(), Axis(0), options.ties);
    debug!(
      n = data.nrows(),
      dim = data.ncols(),
      smoothing = %options.smoothing,
      ties = %options.ties,
      offset = options.offset,
      "built empirical copula"
    );

    Ok(Self {
      data,
      pobs,
      ranks,
      options,
      columns: None,
    })
  }

  /// Same as [`EmpiricalCopula::new`], keeping the column names for [`EmpiricalCopula::label`].
  pub fn from_labeled(frame: LabeledMatrix, options: EmpiricalOptions) -> Result<Self> {
    let (columns, values) = frame.into_parts();
    let mut copula = Self::new(values, options)?;
    copula.columns = Some(columns);
    Ok(copula)
  }

  pub fn data(&self) -> &Array2<f64> {
    &self.data
  }

  /// Reference pseudo-observations of the stored data.
  pub fn pobs(&self) -> &Array2<f64> {
    &self.pobs
  }

  pub fn smoothing(&self) -> Smoothing {
    self.options.smoothing
  }

  pub fn ties(&self) -> Ties {
    self.options.ties
  }

  pub fn offset(&self) -> f64 {
    self.options.offset
  }

  pub fn columns(&self) -> Option<&[String]> {
    self.columns.as_deref()
  }

  /// There is nothing to estimate; the copula is returned unchanged.
  pub fn fit(&self) -> &Self {
    warn!("EmpiricalCopula has no concept of 'fitting'");
    self
  }

  /// Maps pseudo-observations back onto the scale of the stored margins.
  ///
  /// Each value selects the order statistic at `floor(u n)` (clamped to the
  /// column maximum) of its column; there is no interpolation between order
  /// statistics.
  pub fn to_marginals(&self, u: &Array2<f64>) -> Result<Array2<f64>> {
    check_columns(self.dim(), u)?;
    check_domain(u)?;

    let n = self.data.nrows();
    let mut sorted = self.data.clone();
    for mut column in sorted.columns_mut() {
      let mut values = column.to_vec();
      values.sort_by(f64::total_cmp);
      column.assign(&Array1::from(values));
    }

    let mut out = Array2::<f64>::zeros(u.raw_dim());
    for ((i, j), x) in u.indexed_iter() {
      let index = ((x * n as f64).floor().max(0.0) as usize).min(n - 1);
      out[[i, j]] = sorted[[index, j]];
    }

    Ok(out)
  }

  /// Attaches the stored column names to `values`.
  ///
  /// Copulas built from plain matrices get positional names `"0"`, `"1"`, ...
  pub fn label(&self, values: Array2<f64>) -> Result<LabeledMatrix> {
    let columns = match &self.columns {
      Some(columns) => columns.clone(),
      None => (0..self.dim()).map(|j| j.to_string()).collect(),
    };
    LabeledMatrix::new(columns, values)
  }
}

/// Every entry must lie in `[-EPSILON, 1 + EPSILON]`.
fn check_domain(u: &Array2<f64>) -> Result<()> {
  if u.iter().all(|&x| (-EPSILON..=1.0 + EPSILON).contains(&x)) {
    Ok(())
  } else {
    Err(CopulaError::NotPseudoObservations)
  }
}

impl CopulaExt for EmpiricalCopula {
  fn name(&self) -> &'static str {
    "Empirical"
  }

  fn dim(&self) -> usize {
    self.data.ncols()
  }

  fn params(&self) -> Option<Array1<f64>> {
    None
  }

  fn cdf(&self, u: &Array2<f64>, log: bool) -> Result<Array1<f64>> {
    check_domain(u)?;
    check_columns(self.dim(), u)?;

    let cdf = distribution::emp_dist_func(
      &u.view(),
      &self.pobs.view(),
      &self.ranks,
      self.options.smoothing,
      self.options.offset,
    )?;
    Ok(if log { cdf.ln() } else { cdf })
  }

  /// Beta-copula density. The query is evaluated at its raw coordinates, it is not re-ranked.
  fn pdf(&self, u: &Array2<f64>, log: bool) -> Result<Array1<f64>> {
    if self.options.smoothing != Smoothing::Beta {
      return Err(CopulaError::PdfRequiresBetaSmoothing);
    }
    check_domain(u)?;
    check_columns(self.dim(), u)?;

    distribution::beta_density(&u.view(), &self.ranks, self.options.offset, log)
  }

  /// Bootstrap: `n` rows drawn with replacement from the stored data.
  fn random<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Result<Array2<f64>> {
    debug!(n, rows = self.data.nrows(), "bootstrapping empirical copula");
    let indices = (0..n)
      .map(|_| rng.gen_range(0..self.data.nrows()))
      .collect::<Vec<_>>();
    Ok(self.data.select(Axis(0), &indices))
  }

  fn summary(&self) -> Summary {
    Summary::new(self.name())
      .with("Dimensions", self.dim())
      .with("Ties method", self.options.ties)
      .with("Offset", self.options.offset)
      .with("Smoothing", self.options.smoothing)
  }
}

#[cfg(test)]
mod tests {
  use approx::assert_relative_eq;
  use ndarray::array;
  use rand::rngs::StdRng;
  use rand::SeedableRng;
  use tracing_test::traced_test;

  use super::*;
  use crate::error::ErrorKind;

  fn data() -> Array2<f64> {
    array![[1.0, 1.0, 3.0], [2.0, 2.0, 2.0], [3.0, 3.0, 1.0]]
  }

  fn copula(smoothing: Smoothing) -> EmpiricalCopula {
    EmpiricalCopula::new(
      data(),
      EmpiricalOptions {
        smoothing,
        ..Default::default()
      },
    )
    .unwrap()
  }

  #[test]
  fn construction_validates_shape() {
    assert_eq!(
      EmpiricalCopula::new(array![[1.0], [2.0]], EmpiricalOptions::default()).unwrap_err(),
      CopulaError::InvalidDimension(1)
    );
    assert_eq!(
      EmpiricalCopula::new(Array2::zeros((0, 3)), EmpiricalOptions::default()).unwrap_err(),
      CopulaError::EmptyData
    );
  }

  #[test]
  fn smoothing_parses_from_strings() {
    assert_eq!("Beta".parse::<Smoothing>().unwrap(), Smoothing::Beta);
    assert_eq!(
      "CHECKERBOARD".parse::<Smoothing>().unwrap(),
      Smoothing::Checkerboard
    );
    assert!("kernel".parse::<Smoothing>().is_err());
    assert_eq!(Smoothing::default(), Smoothing::None);
  }

  #[test]
  fn cdf_for_each_smoothing() {
    let u = array![[0.5, 0.5, 0.5]];
    assert_relative_eq!(
      copula(Smoothing::None).cdf(&u, false).unwrap()[0],
      1.0 / 3.0,
      max_relative = 1e-12
    );
    assert_relative_eq!(
      copula(Smoothing::Beta).cdf(&u, false).unwrap()[0],
      0.078125,
      max_relative = 1e-10
    );
    assert_relative_eq!(
      copula(Smoothing::Checkerboard).cdf(&u, true).unwrap()[0],
      (0.125f64 / 3.0).ln(),
      max_relative = 1e-12
    );
  }

  #[test]
  fn offset_enters_the_normalisation() {
    let copula = EmpiricalCopula::new(
      data(),
      EmpiricalOptions {
        offset: 1.0,
        ..Default::default()
      },
    )
    .unwrap();
    let cdf = copula.cdf(&array![[0.5, 0.5, 0.5]], false).unwrap();
    assert_relative_eq!(cdf[0], 0.25, max_relative = 1e-12);
  }

  #[test]
  fn cdf_rejects_values_outside_unit_cube() {
    let copula = copula(Smoothing::None);
    for bad in [1.0 + 1e-6, -1e-6, f64::NAN] {
      let err = copula.cdf(&array![[0.5, bad, 0.5]], false).unwrap_err();
      assert_eq!(err, CopulaError::NotPseudoObservations);
      assert_eq!(err.kind(), ErrorKind::Value);
    }

    let edges = copula.cdf(&array![[0.0, 0.5, 1.0], [1.0, 1.0, 1.0]], false).unwrap();
    assert_eq!(edges[0], 0.0);
    assert_relative_eq!(edges[1], 1.0, max_relative = 1e-12);
  }

  #[test]
  fn cdf_checks_width() {
    let err = copula(Smoothing::None)
      .cdf(&array![[0.5, 0.5]], false)
      .unwrap_err();
    assert_eq!(
      err,
      CopulaError::DimensionMismatch {
        expected: 3,
        got: 2
      }
    );
  }

  #[test]
  fn beta_density_fixture() {
    let copula = copula(Smoothing::Beta);
    let u = array![[0.5, 0.5, 0.5]];
    assert_relative_eq!(
      copula.pdf(&u, false).unwrap()[0],
      1.40625,
      max_relative = 1e-10
    );
    assert_relative_eq!(
      copula.pdf(&u, true).unwrap()[0],
      1.40625f64.ln(),
      max_relative = 1e-10
    );
  }

  #[test]
  fn density_uses_query_coordinates_as_given() {
    let copula = copula(Smoothing::Beta);
    let single = copula.pdf(&array![[0.5, 0.5, 0.5]], false).unwrap();
    let batch = copula
      .pdf(&array![[0.9, 0.1, 0.3], [0.5, 0.5, 0.5]], false)
      .unwrap();
    assert_relative_eq!(batch[1], single[0], max_relative = 1e-12);
    assert_relative_eq!(batch[1], 1.40625, max_relative = 1e-10);
  }

  #[test]
  fn tied_columns_under_dense_and_max_ties() {
    let tied = array![[1.0, 1.0], [1.0, 2.0], [2.0, 2.0], [3.0, 1.0]];
    let u = array![[0.5, 0.5], [1.0, 1.0]];

    // (ties, none, beta, checkerboard, beta pdf) at (0.5, 0.5)
    let cases = [
      (Ties::Dense, 0.75, 0.572265625, 0.75, 1.0),
      (Ties::Max, 0.25, 0.14453125, 0.25, 1.125),
    ];
    for (ties, none, beta, checkerboard, density) in cases {
      let build = |smoothing| {
        EmpiricalCopula::new(
          tied.clone(),
          EmpiricalOptions {
            smoothing,
            ties,
            ..Default::default()
          },
        )
        .unwrap()
      };

      for (smoothing, expected) in [
        (Smoothing::None, none),
        (Smoothing::Beta, beta),
        (Smoothing::Checkerboard, checkerboard),
      ] {
        let cdf = build(smoothing).cdf(&u, false).unwrap();
        assert_relative_eq!(cdf[0], expected, max_relative = 1e-10);
        assert_relative_eq!(cdf[1], 1.0, max_relative = 1e-12);
      }

      let pdf = build(Smoothing::Beta).pdf(&array![[0.5, 0.5]], false).unwrap();
      assert_relative_eq!(pdf[0], density, max_relative = 1e-10);
    }

    let dense = EmpiricalCopula::new(
      tied,
      EmpiricalOptions {
        ties: Ties::Dense,
        ..Default::default()
      },
    )
    .unwrap();
    assert_relative_eq!(
      *dense.pobs(),
      array![[0.2, 0.2], [0.2, 0.4], [0.4, 0.4], [0.6, 0.2]],
      max_relative = 1e-12
    );
  }

  #[test]
  fn log_density_survives_underflow() {
    let n = 400;
    let data = Array2::from_shape_fn((n, 2), |(i, j)| {
      if j == 0 {
        i as f64
      } else {
        (n - i) as f64
      }
    });
    let copula = EmpiricalCopula::new(
      data,
      EmpiricalOptions {
        smoothing: Smoothing::Beta,
        ..Default::default()
      },
    )
    .unwrap();

    // far from the anti-diagonal every kernel product underflows
    let log_pdf = copula.pdf(&array![[0.001, 0.001]], true).unwrap();
    assert!(log_pdf[0].is_finite());
    assert!(log_pdf[0] < -300.0);
  }

  #[test]
  fn pdf_requires_beta_smoothing() {
    for smoothing in [Smoothing::None, Smoothing::Checkerboard] {
      let err = copula(smoothing)
        .pdf(&array![[0.5, 0.5, 0.5]], false)
        .unwrap_err();
      assert_eq!(err, CopulaError::PdfRequiresBetaSmoothing);
      assert_eq!(err.kind(), ErrorKind::Precondition);
      assert_eq!(
        err.to_string(),
        "Empirical Copula only has density (PDF) for 'beta' smoothing"
      );
    }
  }

  #[test]
  fn bootstrap_is_reproducible_and_draws_stored_rows() {
    let copula = copula(Smoothing::None);
    let a = copula.random(50, &mut StdRng::seed_from_u64(10)).unwrap();
    let b = copula.random(50, &mut StdRng::seed_from_u64(10)).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.dim(), (50, 3));

    let stored = data();
    for row in a.rows() {
      assert!(stored.rows().into_iter().any(|r| r == row));
    }
  }

  #[test]
  fn to_marginals_uses_lower_order_statistic() {
    let copula = EmpiricalCopula::new(
      array![[5.0, 40.0], [1.0, 10.0], [3.0, 30.0], [2.0, 20.0]],
      EmpiricalOptions::default(),
    )
    .unwrap();
    let u = array![[0.0, 0.5], [0.3, 0.99], [1.0, 0.26]];
    let x = copula.to_marginals(&u).unwrap();
    assert_eq!(x, array![[1.0, 30.0], [2.0, 40.0], [5.0, 20.0]]);

    assert!(copula.to_marginals(&array![[1.5, 0.5]]).is_err());
  }

  #[test]
  fn labels_round_trip() {
    let frame = LabeledMatrix::new(vec!["student", "norm", "exp"], data()).unwrap();
    let copula = EmpiricalCopula::from_labeled(frame, EmpiricalOptions::default()).unwrap();
    assert_eq!(copula.columns().unwrap()[2], "exp");

    let sample = copula.random(4, &mut StdRng::seed_from_u64(1)).unwrap();
    let labeled = copula.label(sample).unwrap();
    assert_eq!(labeled.columns(), &["student", "norm", "exp"]);

    let plain = EmpiricalCopula::new(data(), EmpiricalOptions::default()).unwrap();
    let labeled = plain.label(data()).unwrap();
    assert_eq!(labeled.columns(), &["0", "1", "2"]);
  }

  #[test]
  fn nonparametric_summary() {
    let copula = copula(Smoothing::Beta);
    assert!(copula.params().is_none());
    assert_eq!(copula.name(), "Empirical");

    let summary = copula.summary();
    assert_eq!(summary.get("Dimensions"), Some("3"));
    assert_eq!(summary.get("Ties method"), Some("average"));
    assert_eq!(summary.get("Smoothing"), Some("beta"));
    assert_eq!(summary.get("Offset"), Some("0"));
  }

  #[traced_test]
  #[test]
  fn fit_warns_and_keeps_state() {
    let copula = copula(Smoothing::None);
    let fitted = copula.fit();
    assert_eq!(fitted, &copula);
    assert!(logs_contain("EmpiricalCopula has no concept of 'fitting'"));
  }
}
