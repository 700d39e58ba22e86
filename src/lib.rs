//! # copula-rs
//!
//! $$
//! F(x_1,\dots,x_d)=C\left(F_1(x_1),\dots,F_d(x_d)\right)
//! $$
//!
//! Archimedean copulas built from a generator pair `(psi, ipsi)` and the
//! nonparametric empirical copula with beta and checkerboard smoothing.
//!
#[macro_use]
mod macros;

pub mod copulas;
pub mod error;
pub mod frame;
pub mod special;
pub mod stats;
pub mod traits;

pub use copulas::archimedean::ArchimedeanCopula;
pub use copulas::archimedean::ArchimedeanFamily;
pub use copulas::empirical::EmpiricalCopula;
pub use copulas::empirical::EmpiricalOptions;
pub use copulas::empirical::Smoothing;
pub use error::CopulaError;
pub use error::Result;
pub use stats::ranks::Ties;
pub use traits::ArchimedeanExt;
pub use traits::CopulaExt;

/// Tolerance applied at the `[0, 1]` boundary when validating pseudo-observations.
pub const EPSILON: f64 = f64::EPSILON;
