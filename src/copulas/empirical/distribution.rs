//! # Distribution
//!
//! $$
//! C_n^{\beta}(u)=\frac{1}{n+o}\sum_{i=1}^n\prod_{j=1}^d F_{n,R_{ij}}(u_j),\qquad
//! F_{n,r}=\mathrm{Beta}(r,\,n+1-r)
//! $$
//!
//! Empirical distribution function of a reference sample with the three
//! smoothing kernels, and the density of the empirical beta copula.
//!
use ndarray::Array1;
use ndarray::Array2;
use ndarray::ArrayView1;
use ndarray::ArrayView2;
use ndarray::Zip;
use rayon::iter::IntoParallelIterator;
use rayon::iter::ParallelIterator;
use statrs::distribution::Beta;
use statrs::distribution::Continuous;
use statrs::distribution::ContinuousCDF;

use super::Smoothing;
use crate::error::CopulaError;
use crate::error::Result;
use crate::special::log_sum;

/// `Beta(r, n + 1 - r)` for every rank of the reference sample.
pub(crate) fn beta_kernels(ranks: &Array2<f64>) -> Result<Array2<Beta>> {
  let n = ranks.nrows() as f64;
  let kernels = ranks
    .iter()
    .map(|&r| Beta::new(r, n + 1.0 - r).map_err(|e| CopulaError::Distribution(e.to_string())))
    .collect::<Result<Vec<_>>>()?;

  Array2::from_shape_vec(ranks.raw_dim(), kernels)
    .map_err(|e| CopulaError::Distribution(e.to_string()))
}

/// Empirical distribution function of `reference` evaluated at every row of `x`.
///
/// * `None`: share of reference rows dominated componentwise by the query.
/// * `Beta`: indicator replaced by the product of `Beta(r, n + 1 - r)` CDFs.
/// * `Checkerboard`: indicator replaced by `prod_j clamp(n u_j - r_j + 1, 0, 1)`.
///
/// Every variant is normalised by `n + offset`.
pub fn emp_dist_func(
  x: &ArrayView2<f64>,
  reference: &ArrayView2<f64>,
  ranks: &Array2<f64>,
  smoothing: Smoothing,
  offset: f64,
) -> Result<Array1<f64>> {
  let n = reference.nrows() as f64;
  let mut out = Array1::<f64>::zeros(x.nrows());

  match smoothing {
    Smoothing::None => {
      Zip::from(&mut out)
        .and(x.rows())
        .into_par_iter()
        .for_each(|(o, row)| {
          *o = reference
            .rows()
            .into_iter()
            .filter(|r| r.iter().zip(row.iter()).all(|(a, b)| a <= b))
            .count() as f64;
        });
    }
    Smoothing::Beta => {
      let kernels = beta_kernels(ranks)?;
      Zip::from(&mut out)
        .and(x.rows())
        .into_par_iter()
        .for_each(|(o, row)| {
          *o = kernels
            .rows()
            .into_iter()
            .map(|k| k.iter().zip(row.iter()).map(|(b, &u)| b.cdf(u)).product::<f64>())
            .sum();
        });
    }
    Smoothing::Checkerboard => {
      Zip::from(&mut out)
        .and(x.rows())
        .into_par_iter()
        .for_each(|(o, row)| {
          *o = ranks
            .rows()
            .into_iter()
            .map(|r| checkerboard_cell(n, &r, &row))
            .sum();
        });
    }
  }

  Ok(out / (n + offset))
}

fn checkerboard_cell(n: f64, ranks: &ArrayView1<f64>, u: &ArrayView1<f64>) -> f64 {
  ranks
    .iter()
    .zip(u.iter())
    .map(|(&r, &u)| (n * u - r + 1.0).clamp(0.0, 1.0))
    .product()
}

/// Density of the empirical beta copula at every row of `x`.
///
/// The log branch is a log-sum-exp over the per-observation kernel log-densities.
pub fn beta_density(
  x: &ArrayView2<f64>,
  ranks: &Array2<f64>,
  offset: f64,
  log: bool,
) -> Result<Array1<f64>> {
  let n = ranks.nrows() as f64;
  let kernels = beta_kernels(ranks)?;
  let mut out = Array1::<f64>::zeros(x.nrows());

  Zip::from(&mut out)
    .and(x.rows())
    .into_par_iter()
    .for_each(|(o, row)| {
      *o = if log {
        let terms = kernels
          .rows()
          .into_iter()
          .map(|k| k.iter().zip(row.iter()).map(|(b, &u)| b.ln_pdf(u)).sum::<f64>())
          .collect::<Vec<f64>>();
        log_sum(&terms) - (n + offset).ln()
      } else {
        kernels
          .rows()
          .into_iter()
          .map(|k| k.iter().zip(row.iter()).map(|(b, &u)| b.pdf(u)).product::<f64>())
          .sum::<f64>()
          / (n + offset)
      };
    });

  Ok(out)
}
