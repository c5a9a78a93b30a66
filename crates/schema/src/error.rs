use thiserror::Error;

use crate::FieldKind;

/// Errors raised while constructing descriptors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
	/// A collection kind was passed where a scalar was expected.
	#[error("{0} is a collection and requires an element type")]
	MissingElement(FieldKind),
	/// `Object` was passed where a scalar was expected; use `FieldDescriptor::object`.
	#[error("object field requires a schema")]
	MissingSchema,
	/// Two fields of the same object share a name.
	#[error("duplicate field {name:?} in schema {schema}")]
	DuplicateField { schema: &'static str, name: String },
}
