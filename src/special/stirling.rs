//! # Stirling numbers
//!
//! $$
//! \left[{n \atop k}\right]=\left[{n-1 \atop k-1}\right]+(n-1)\left[{n-1 \atop k}\right],\qquad
//! \left\{{n \atop k}\right\}=\left\{{n-1 \atop k-1}\right\}+k\left\{{n-1 \atop k}\right\}
//! $$
//!
//! Exact values in `u128` with checked arithmetic. Arguments may be any
//! primitive number; floats are accepted only when they hold an integer.
//!
use num_traits::ToPrimitive;

use crate::error::CopulaError;
use crate::error::Result;

#[derive(Debug, Clone, Copy)]
enum Kind {
  First,
  Second,
}

/// Integral value of `x`, `None` for fractions and non-finite values.
fn as_integer<T: ToPrimitive>(x: &T) -> Option<i128> {
  let f = x.to_f64().filter(|f| f.is_finite())?;
  match x.to_i128() {
    Some(i) => (i as f64 == f).then_some(i),
    // finite values beyond the i128 range carry no fraction
    None => Some(if f > 0.0 { i128::MAX } else { i128::MIN }),
  }
}

fn saturating_i64(x: i128) -> i64 {
  x.clamp(i64::MIN as i128, i64::MAX as i128) as i64
}

fn saturating_u64(x: i128) -> u64 {
  x.clamp(0, u64::MAX as i128) as u64
}

/// `n` above `i64::MAX` is reported as [`CopulaError::Overflow`].
fn validate<N: ToPrimitive, K: ToPrimitive>(n: N, k: K) -> Result<(usize, usize)> {
  let (n, k) = match (as_integer(&n), as_integer(&k)) {
    (Some(n), Some(k)) => (n, k),
    _ => return Err(CopulaError::NotInteger),
  };

  if k < 0 || k > n {
    return Err(CopulaError::OutOfRange {
      n: saturating_i64(n),
      k: saturating_i64(k),
    });
  }
  if n > i64::MAX as i128 {
    return Err(CopulaError::Overflow {
      n: saturating_u64(n),
      k: saturating_u64(k),
    });
  }

  Ok((n as usize, k as usize))
}

/// Row `n` of the recurrence, truncated after column `k_max`.
fn recurrence_row(kind: Kind, n: usize, k_max: usize) -> Result<Vec<u128>> {
  let overflow = || CopulaError::Overflow {
    n: n as u64,
    k: k_max as u64,
  };

  let mut row = vec![0u128; k_max + 1];
  row[0] = 1;

  for i in 1..=n {
    for j in (1..=i.min(k_max)).rev() {
      let weight = match kind {
        Kind::First => (i - 1) as u128,
        Kind::Second => j as u128,
      };
      row[j] = weight
        .checked_mul(row[j])
        .and_then(|v| v.checked_add(row[j - 1]))
        .ok_or_else(overflow)?;
    }
    row[0] = 0;
  }

  Ok(row)
}

/// Unsigned Stirling number of the first kind: permutations of `n`
/// elements with exactly `k` cycles.
///
/// # Errors
/// [`CopulaError::NotInteger`] unless both arguments hold integers,
/// [`CopulaError::OutOfRange`] unless `0 <= k <= n`,
/// [`CopulaError::Overflow`] when `n` exceeds `i64::MAX`.
pub fn stirling_first<N: ToPrimitive, K: ToPrimitive>(n: N, k: K) -> Result<u128> {
  let (n, k) = validate(n, k)?;
  Ok(recurrence_row(Kind::First, n, k)?[k])
}

/// Signed Stirling number of the first kind, `(-1)^(n-k)` times
/// [`stirling_first`].
pub fn stirling_first_signed<N: ToPrimitive, K: ToPrimitive>(n: N, k: K) -> Result<i128> {
  let (n, k) = validate(n, k)?;
  let magnitude = recurrence_row(Kind::First, n, k)?[k];
  let magnitude = i128::try_from(magnitude).map_err(|_| CopulaError::Overflow {
    n: n as u64,
    k: k as u64,
  })?;

  Ok(if (n - k) % 2 == 0 { magnitude } else { -magnitude })
}

/// Stirling number of the second kind: partitions of an `n`-set into
/// `k` nonempty blocks.
///
/// # Errors
/// Same contract as [`stirling_first`].
pub fn stirling_second<N: ToPrimitive, K: ToPrimitive>(n: N, k: K) -> Result<u128> {
  let (n, k) = validate(n, k)?;
  Ok(recurrence_row(Kind::Second, n, k)?[k])
}

/// Unsigned Stirling numbers of the first kind for `k = 1..=n`.
pub fn stirling_first_all<N: ToPrimitive>(n: N) -> Result<Vec<u128>> {
  let (n, _) = validate(n, 0)?;
  Ok(recurrence_row(Kind::First, n, n)?.split_off(1))
}

/// Stirling numbers of the second kind for `k = 1..=n`.
pub fn stirling_second_all<N: ToPrimitive>(n: N) -> Result<Vec<u128>> {
  let (n, _) = validate(n, 0)?;
  Ok(recurrence_row(Kind::Second, n, n)?.split_off(1))
}
