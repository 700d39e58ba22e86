//! # Frame
//!
//! $$
//! X\in\mathbb R^{n\times d},\qquad \text{columns}=(c_1,\dots,c_d)
//! $$
//!
//! Numeric matrix with column names, used only at the public boundary.
//!
use ndarray::Array2;
use ndarray::ArrayView1;

use crate::error::CopulaError;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq)]
pub struct LabeledMatrix {
  columns: Vec<String>,
  values: Array2<f64>,
}

impl LabeledMatrix {
  pub fn new<S: Into<String>>(columns: Vec<S>, values: Array2<f64>) -> Result<Self> {
    let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
    if columns.len() != values.ncols() {
      return Err(CopulaError::LabelMismatch {
        labels: columns.len(),
        width: values.ncols(),
      });
    }

    Ok(Self { columns, values })
  }

  pub fn columns(&self) -> &[String] {
    &self.columns
  }

  pub fn values(&self) -> &Array2<f64> {
    &self.values
  }

  /// Column by name.
  pub fn column(&self, name: &str) -> Option<ArrayView1<'_, f64>> {
    self
      .columns
      .iter()
      .position(|c| c == name)
      .map(|j| self.values.column(j))
  }

  pub fn into_parts(self) -> (Vec<String>, Array2<f64>) {
    (self.columns, self.values)
  }
}

#[cfg(test)]
mod tests {
  use ndarray::array;

  use super::*;

  #[test]
  fn labels_must_match_width() {
    let err = LabeledMatrix::new(vec!["a"], array![[1.0, 2.0]]).unwrap_err();
    assert_eq!(err, CopulaError::LabelMismatch { labels: 1, width: 2 });
  }

  #[test]
  fn columns_are_addressable_by_name() {
    let frame = LabeledMatrix::new(vec!["x", "y"], array![[1.0, 2.0], [3.0, 4.0]]).unwrap();
    assert_eq!(frame.column("y").unwrap().to_vec(), vec![2.0, 4.0]);
    assert!(frame.column("z").is_none());

    let (columns, values) = frame.into_parts();
    assert_eq!(columns, vec!["x".to_string(), "y".to_string()]);
    assert_eq!(values.dim(), (2, 2));
  }
}
