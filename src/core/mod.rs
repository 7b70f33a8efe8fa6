//! Shared numeric foundations, constants, and error types.

pub mod constants;
pub mod error;
pub mod fraction;

pub use error::{CatalogError, FractionError, RunError};
pub use fraction::Fraction;
