//! Schema descriptors for metadata fields and objects.
//!
//! This crate provides the descriptor side of widget dispatch:
//! - [`FieldKind`]: The closed set of field shapes
//! - [`Capability`]: Registry key component derived from a descriptor
//! - [`FieldDescriptor`] / [`ObjectDescriptor`]: Validated descriptions of data
//! - [`Describe`]: Common access to a descriptor's capability and element type

mod capability;
mod descriptor;
mod error;

pub use capability::{Capability, FieldKind, SchemaId};
pub use descriptor::{Describe, FieldDescriptor, ObjectDescriptor};
pub use error::SchemaError;
