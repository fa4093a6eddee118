pub mod amortization;
pub mod error;
pub mod types;
pub mod validation;

pub use error::{CalcError, FieldError, ValidationErrors};
pub use types::*;

/// Standard result type for all EMI operations
pub type CalcResult<T> = Result<T, CalcError>;
