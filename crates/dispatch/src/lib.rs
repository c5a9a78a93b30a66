//! Qualified capability-adapter resolution.
//!
//! Handlers (widgets) are registered against an exact key of required
//! capabilities, a [`Role`] and a qualified action name. The [`Resolver`]
//! finds the best registration for a request by relaxing two dimensions:
//!
//! - qualifier specificity: `render:a.b` falls back to `render:a`, then `render`
//! - capability specificity: `[list, choice]` falls back to `[list]`
//!
//! By default every qualifier is tried against the full capability vector
//! before the vector is truncated, so a longer vector under a general
//! qualifier wins over a shorter one under a specific qualifier. Set
//! [`Precedence::Qualifier`] to make the most specific qualifier win instead.
//!
//! Registration happens once, at startup, through [`register_handlers`] or
//! [`CapabilityRegistry::register`]; the registry is then frozen inside the
//! resolver and shared freely.

mod action;
mod adaptee;
mod config;
mod context;
mod error;
mod handler;
mod registration;
mod registry;
mod resolver;

pub use action::{IntoRequest, QualifiedAction, is_valid_segment};
pub use adaptee::{AdapteeBuilder, AdapteeVector};
pub use config::{FallbackMode, Precedence, ResolverConfig};
pub use context::LookupContext;
pub use error::{ActionError, ConfigError, MarkupError, NotFound, RegistryError, RenderError};
pub use handler::{FieldErrors, Handler, HandlerFactory, HandlerInit, Subject, handler_factory};
pub use metawidget_schema::{
	Capability, Describe, FieldDescriptor, FieldKind, ObjectDescriptor, SchemaId,
};
pub use registration::{HandlerSpec, register_handlers};
pub use registry::{CapabilityRegistry, Role};
pub use resolver::Resolver;
