//! # Stats
//!
//! $$
//! \hat U_{ij}=\frac{R_{ij}}{n+1}
//! $$
//!
pub mod ranks;
