use std::collections::BTreeMap;
use std::sync::Arc;

use metawidget_schema::{Capability, Describe, FieldDescriptor, ObjectDescriptor};

use crate::context::LookupContext;
use crate::error::RenderError;
use crate::registry::Role;

/// Validation messages keyed by field name, passed through to handlers.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// The data a handler is being resolved for.
#[derive(Debug, Clone, Copy)]
pub enum Subject<'a> {
	Field(&'a FieldDescriptor),
	Object(&'a ObjectDescriptor),
}

impl Subject<'_> {
	/// Role a handler for this subject is registered under.
	pub fn role(&self) -> Role {
		match self {
			Self::Field(_) => Role::FieldHandler,
			Self::Object(_) => Role::ObjectHandler,
		}
	}

	pub fn describe(&self) -> String {
		match self {
			Self::Field(field) => field.describe(),
			Self::Object(object) => object.describe(),
		}
	}
}

/// Everything a factory receives to build a handler instance.
#[derive(Debug)]
pub struct HandlerInit<'a> {
	/// The field or object being adapted.
	pub subject: Subject<'a>,
	/// The capability vector that matched the registration.
	pub adaptee: &'a [Capability],
	/// Requested and provided actions for this lookup.
	pub context: LookupContext,
	/// Validation errors supplied by the caller.
	pub errors: FieldErrors,
}

/// A resolved widget.
pub trait Handler: Send {
	/// Returns the context this handler was resolved with.
	fn context(&self) -> &LookupContext;

	/// Produces markup for the subject under `name_prefix`.
	///
	/// `data` is opaque to the resolver.
	fn render(&self, name_prefix: &str, data: &serde_json::Value) -> Result<String, RenderError>;
}

/// Constructs a handler for a successful lookup.
pub type HandlerFactory = Arc<dyn Fn(HandlerInit<'_>) -> Box<dyn Handler> + Send + Sync>;

/// Wraps a closure as a [`HandlerFactory`].
pub fn handler_factory<F>(f: F) -> HandlerFactory
where
	F: Fn(HandlerInit<'_>) -> Box<dyn Handler> + Send + Sync + 'static,
{
	Arc::new(f)
}
