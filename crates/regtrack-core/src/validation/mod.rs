//! Pre-flight validation of tool arguments
//!
//! Checks required fields and primitive kinds against a tool's declared
//! schema before any remote call is attempted. Unknown keys are allowed.

mod validator;

pub use validator::{validate, ValidationResult, ValueKind, Violation};
