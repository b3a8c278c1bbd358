//! pulmoprobe-schema
//!
//! Intake field schema and the pure transforms driven by it: structural
//! checks, validation of form input, one-hot feature encoding and request
//! payload building. No network dependency.

pub mod encoder;
pub mod error;
pub mod field;
pub mod payload;
pub mod schema;
pub mod validation;

pub use encoder::encode;
pub use error::{EncodeError, SchemaError};
pub use field::{FieldDescriptor, FieldKind, NumericRange};
pub use payload::{build_payload, PayloadFormat};
pub use schema::{diff, IntakeSchema, SchemaDifference};
pub use validation::{validate, ValidationError, ValidationErrorKind};
