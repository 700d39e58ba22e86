//! # Summary
//!
//! $$
//! \mathcal S = \{(k_i, v_i)\}_{i=1}^m
//! $$
//!
//! Named parameter table shared by every copula's `summary`.
//!
use std::fmt;

use prettytable::format;
use prettytable::row;
use prettytable::Table;

/// Key/value description of a copula, rendered as a table.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
  name: String,
  rows: Vec<(String, String)>,
}

impl Summary {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      rows: Vec::new(),
    }
  }

  /// Appends a parameter row.
  pub fn with(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
    self.rows.push((key.into(), value.to_string()));
    self
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  /// Value recorded under `key`, if any.
  pub fn get(&self, key: &str) -> Option<&str> {
    self
      .rows
      .iter()
      .find(|(k, _)| k == key)
      .map(|(_, v)| v.as_str())
  }

  pub fn table(&self) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    table.set_titles(row!["Parameter", "Value"]);
    for (key, value) in &self.rows {
      table.add_row(row![key, value]);
    }
    table
  }
}

impl fmt::Display for Summary {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "{} Copula Summary", self.name)?;
    write!(f, "{}", self.table())
  }
}

#[cfg(test)]
mod tests {
  use super::Summary;

  #[test]
  fn renders_rows_in_order() {
    let summary = Summary::new("Clayton")
      .with("Dimensions", 3)
      .with("Theta", 1.5);

    assert_eq!(summary.get("Theta"), Some("1.5"));
    assert_eq!(summary.get("Offset"), None);

    let text = summary.to_string();
    assert!(text.starts_with("Clayton Copula Summary"));
    let dims = text.find("Dimensions").unwrap();
    let theta = text.find("Theta").unwrap();
    assert!(dims < theta);
  }
}
