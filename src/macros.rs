//! # Macros
//!
//! $$
//! \text{macro expansion} : (\psi,\psi^{-1}) \mapsto \text{CopulaExt}
//! $$
//!

/// Implements `CopulaExt` for an `ArchimedeanExt` type by routing every
/// operation through the generator template methods.
///
/// The optional closure reads the dimension; by default the `dim` field is used.
macro_rules! impl_copula_ext {
  ($ty:ty) => {
    impl_copula_ext!($ty, |copula| copula.dim);
  };
  ($ty:ty, |$c:ident| $dim:expr) => {
    impl $crate::traits::CopulaExt for $ty {
      fn name(&self) -> &'static str {
        $crate::traits::ArchimedeanExt::family(self).name()
      }

      fn dim(&self) -> usize {
        let $c = self;
        $dim
      }

      fn params(&self) -> Option<ndarray::Array1<f64>> {
        Some(ndarray::array![$crate::traits::ArchimedeanExt::theta(self)])
      }

      fn cdf(
        &self,
        u: &ndarray::Array2<f64>,
        log: bool,
      ) -> $crate::error::Result<ndarray::Array1<f64>> {
        $crate::traits::ArchimedeanExt::generator_cdf(self, u, log)
      }

      fn pdf(
        &self,
        u: &ndarray::Array2<f64>,
        log: bool,
      ) -> $crate::error::Result<ndarray::Array1<f64>> {
        $crate::traits::ArchimedeanExt::generator_pdf(self, u, log)
      }

      fn random<R: rand::Rng + ?Sized>(
        &self,
        n: usize,
        rng: &mut R,
      ) -> $crate::error::Result<ndarray::Array2<f64>> {
        $crate::traits::ArchimedeanExt::generator_random(self, n, rng)
      }

      fn summary(&self) -> $crate::copulas::summary::Summary {
        $crate::copulas::archimedean::summarize(self)
      }
    }
  };
}
