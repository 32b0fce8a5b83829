//! Schema descriptions and validation.
//!
//! The loader does not hard-code how resources are validated. It describes
//! the expected shape with a [`Schema`](definition::Schema) and hands the
//! assembled value to a [`SchemaValidator`](validator::SchemaValidator).

pub mod definition;
pub mod validator;

pub use definition::{core_module_schema, KeySchema, ObjectSchema, Schema};
pub use validator::{BuiltinValidator, SchemaValidator, ValidationContext};
