use std::sync::Arc;

use metawidget_schema::{FieldDescriptor, ObjectDescriptor};

use crate::action::{IntoRequest, QualifiedAction};
use crate::adaptee::{AdapteeBuilder, AdapteeVector};
use crate::config::{Precedence, ResolverConfig};
use crate::context::LookupContext;
use crate::error::{MarkupError, NotFound, RegistryError};
use crate::handler::{FieldErrors, Handler, HandlerFactory, HandlerInit, Subject};
use crate::registration::{HandlerSpec, register_handlers};
use crate::registry::{CapabilityRegistry, Role};

/// Finds the best registered handler for a qualified action and a subject.
///
/// Holds the registry behind an `Arc`; cloning a resolver is cheap and every
/// clone sees the same frozen registrations.
#[derive(Debug, Clone)]
pub struct Resolver {
	registry: Arc<CapabilityRegistry>,
	adaptee: AdapteeBuilder,
	precedence: Precedence,
}

/// A successful registry search.
struct Hit<'r> {
	factory: &'r HandlerFactory,
	provided: QualifiedAction,
	adaptee: AdapteeVector,
}

impl Resolver {
	/// Creates a resolver with the default configuration.
	pub fn new(registry: impl Into<Arc<CapabilityRegistry>>) -> Self {
		Self::with_config(registry, &ResolverConfig::default())
	}

	pub fn with_config(registry: impl Into<Arc<CapabilityRegistry>>, config: &ResolverConfig) -> Self {
		Self {
			registry: registry.into(),
			adaptee: AdapteeBuilder::new(config.max_adaptee_depth),
			precedence: config.precedence,
		}
	}

	/// Startup routine: registers `specs` into a fresh registry and freezes it.
	pub fn from_specs(specs: &[HandlerSpec], config: &ResolverConfig) -> Result<Self, RegistryError> {
		let mut registry = CapabilityRegistry::new();
		register_handlers(&mut registry, specs, config)?;
		Ok(Self::with_config(registry, config))
	}

	pub fn registry(&self) -> &CapabilityRegistry {
		&self.registry
	}

	/// Resolves a handler for an object. Objects are never expanded.
	pub fn resolve_object_handler(
		&self,
		requested: &QualifiedAction,
		object: &ObjectDescriptor,
	) -> Result<Box<dyn Handler>, NotFound> {
		self.resolve_object_handler_with_errors(requested, object, FieldErrors::new())
	}

	pub fn resolve_object_handler_with_errors(
		&self,
		requested: &QualifiedAction,
		object: &ObjectDescriptor,
		errors: FieldErrors,
	) -> Result<Box<dyn Handler>, NotFound> {
		let adaptee = self.adaptee.build(object, false);
		self.resolve(requested, Subject::Object(object), adaptee, errors)
	}

	/// Resolves a handler for a field, expanding collection element types.
	pub fn resolve_field_handler(
		&self,
		requested: &QualifiedAction,
		field: &FieldDescriptor,
	) -> Result<Box<dyn Handler>, NotFound> {
		self.resolve_field_handler_with_errors(requested, field, FieldErrors::new())
	}

	pub fn resolve_field_handler_with_errors(
		&self,
		requested: &QualifiedAction,
		field: &FieldDescriptor,
		errors: FieldErrors,
	) -> Result<Box<dyn Handler>, NotFound> {
		let adaptee = self.adaptee.build(field, true);
		self.resolve(requested, Subject::Field(field), adaptee, errors)
	}

	/// Resolves a field handler and renders it.
	pub fn markup_for_field(
		&self,
		requested: impl IntoRequest,
		field: &FieldDescriptor,
		errors: &FieldErrors,
		name_prefix: &str,
		data: &serde_json::Value,
	) -> Result<String, MarkupError> {
		let requested = requested.into_request()?;
		let handler = self.resolve_field_handler_with_errors(&requested, field, errors.clone())?;
		Ok(handler.render(name_prefix, data)?)
	}

	/// Resolves an object handler and renders it.
	pub fn markup_for_object(
		&self,
		requested: impl IntoRequest,
		object: &ObjectDescriptor,
		errors: &FieldErrors,
		name_prefix: &str,
		data: &serde_json::Value,
	) -> Result<String, MarkupError> {
		let requested = requested.into_request()?;
		let handler = self.resolve_object_handler_with_errors(&requested, object, errors.clone())?;
		Ok(handler.render(name_prefix, data)?)
	}

	fn resolve(
		&self,
		requested: &QualifiedAction,
		subject: Subject<'_>,
		adaptee: AdapteeVector,
		errors: FieldErrors,
	) -> Result<Box<dyn Handler>, NotFound> {
		let role = subject.role();
		let Some(hit) = self.search(requested, role, adaptee) else {
			tracing::debug!(%role, requested = %requested, "no handler found");
			return Err(NotFound {
				requested: requested.clone(),
				role,
				subject: subject.describe(),
			});
		};

		let init = HandlerInit {
			subject,
			adaptee: &hit.adaptee,
			context: LookupContext::new(requested.clone(), hit.provided),
			errors,
		};
		Ok((hit.factory)(init))
	}

	/// Walks the (qualifier, adaptee) grid in precedence order.
	fn search(&self, requested: &QualifiedAction, role: Role, adaptee: AdapteeVector) -> Option<Hit<'_>> {
		let candidates: Vec<(QualifiedAction, String)> = requested
			.candidates()
			.into_iter()
			.map(|q| {
				let name = q.to_string();
				(q, name)
			})
			.collect();

		let registry: &CapabilityRegistry = &self.registry;
		let probe = |adaptee: &AdapteeVector, (candidate, name): &(QualifiedAction, String)| {
			let factory = registry.lookup_exact(adaptee, role, name);
			tracing::debug!(%role, ?adaptee, name = %name, found = factory.is_some(), "trying handler");
			factory.map(|factory| Hit {
				factory,
				provided: candidate.clone(),
				adaptee: adaptee.clone(),
			})
		};

		match self.precedence {
			Precedence::Capability => {
				let mut adaptee = adaptee;
				while !adaptee.is_empty() {
					if let Some(hit) = candidates.iter().find_map(|c| probe(&adaptee, c)) {
						return Some(hit);
					}
					// Fall back to a more general version of this adaptee.
					adaptee.pop();
				}
				None
			}
			Precedence::Qualifier => candidates.iter().find_map(|c| {
				(1..=adaptee.len())
					.rev()
					.find_map(|len| probe(&AdapteeVector::from_slice(&adaptee[..len]), c))
			}),
		}
	}
}
