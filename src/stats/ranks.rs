//! # Ranks
//!
//! $$
//! R_{ij}=\sum_{k=1}^n \mathbf 1\{X_{kj}\le X_{ij}\},\qquad \hat U_{ij}=\frac{R_{ij}}{n+1}
//! $$
//!
use std::fmt;
use std::str::FromStr;

use ndarray::Array1;
use ndarray::Array2;
use ndarray::ArrayView2;
use ndarray::Axis;
use ndarray::Zip;

use crate::error::CopulaError;

/// Method used to assign ranks to tied elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ties {
  /// Mean of the ranks the tied block would occupy.
  #[default]
  Average,
  /// Lowest rank of the block ("competition" ranking).
  Min,
  /// Highest rank of the block.
  Max,
  /// Like `Min`, but the next distinct value gets the following integer.
  Dense,
  /// Distinct ranks in order of appearance.
  Ordinal,
}

impl FromStr for Ties {
  type Err = CopulaError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "average" => Ok(Ties::Average),
      "min" => Ok(Ties::Min),
      "max" => Ok(Ties::Max),
      "dense" => Ok(Ties::Dense),
      "ordinal" => Ok(Ties::Ordinal),
      _ => Err(CopulaError::UnknownTies(s.to_string())),
    }
  }
}

impl fmt::Display for Ties {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Ties::Average => "average",
      Ties::Min => "min",
      Ties::Max => "max",
      Ties::Dense => "dense",
      Ties::Ordinal => "ordinal",
    };
    f.write_str(name)
  }
}

/// Ranks (1-based) of a single sequence.
pub fn rank_1d(values: &[f64], ties: Ties) -> Vec<f64> {
  let n = values.len();
  let mut order: Vec<usize> = (0..n).collect();
  // stable sort keeps order of appearance inside tie blocks
  order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

  let mut ranks = vec![0.0; n];
  let mut dense = 0.0;
  let mut start = 0;

  while start < n {
    let mut end = start + 1;
    while end < n && values[order[end]] == values[order[start]] {
      end += 1;
    }
    dense += 1.0;

    for (offset, &idx) in order[start..end].iter().enumerate() {
      ranks[idx] = match ties {
        Ties::Average => (start + end + 1) as f64 / 2.0,
        Ties::Min => (start + 1) as f64,
        Ties::Max => end as f64,
        Ties::Dense => dense,
        Ties::Ordinal => (start + offset + 1) as f64,
      };
    }

    start = end;
  }

  ranks
}

/// Ranks every lane of `data` along `axis`.
///
/// `Axis(0)` ranks each column independently (the layout used for
/// observations-by-margins matrices), `Axis(1)` ranks each row.
pub fn rank_data(data: &ArrayView2<f64>, axis: Axis, ties: Ties) -> Array2<f64> {
  let mut ranks = Array2::<f64>::zeros(data.raw_dim());

  Zip::from(ranks.lanes_mut(axis))
    .and(data.lanes(axis))
    .for_each(|mut out, lane| {
      let values = lane.to_vec();
      out.assign(&Array1::from(rank_1d(&values, ties)));
    });

  ranks
}

/// Pseudo-observations: column ranks divided by `n + 1`, strictly inside `(0, 1)`.
pub fn pseudo_obs(data: &ArrayView2<f64>, ties: Ties) -> Array2<f64> {
  let n = data.nrows() as f64;
  rank_data(data, Axis(0), ties) / (n + 1.0)
}
