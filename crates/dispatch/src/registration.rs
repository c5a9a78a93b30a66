use std::sync::Arc;

use metawidget_schema::Capability;

use crate::action::QualifiedAction;
use crate::config::{FallbackMode, ResolverConfig};
use crate::error::RegistryError;
use crate::handler::{Handler, HandlerFactory, HandlerInit};
use crate::registry::{CapabilityRegistry, Role};

/// Static description of a handler and how it wires into the registry.
///
/// Specs are plain data, usually collected into a `static` slice and fed to
/// [`register_handlers`] once at startup.
#[derive(Debug, Clone, Copy)]
pub struct HandlerSpec {
	/// Action the handler performs (e.g. `edit`, `read`).
	pub action: &'static str,
	pub role: Role,
	/// Capability vector the handler adapts.
	pub required: &'static [Capability],
	/// Dotted qualifiers the handler is specialized for.
	pub qualifiers: &'static [&'static str],
	/// Also serve the bare action when qualifiers are declared.
	pub is_fallback: bool,
	pub factory: fn(HandlerInit<'_>) -> Box<dyn Handler>,
}

impl HandlerSpec {
	/// Describes a field handler.
	pub const fn field(
		action: &'static str,
		required: &'static [Capability],
		factory: fn(HandlerInit<'_>) -> Box<dyn Handler>,
	) -> Self {
		Self {
			action,
			role: Role::FieldHandler,
			required,
			qualifiers: &[],
			is_fallback: false,
			factory,
		}
	}

	/// Describes an object handler.
	pub const fn object(
		action: &'static str,
		required: &'static [Capability],
		factory: fn(HandlerInit<'_>) -> Box<dyn Handler>,
	) -> Self {
		Self {
			role: Role::ObjectHandler,
			..Self::field(action, required, factory)
		}
	}

	pub const fn qualifiers(mut self, qualifiers: &'static [&'static str]) -> Self {
		self.qualifiers = qualifiers;
		self
	}

	pub const fn fallback(mut self) -> Self {
		self.is_fallback = true;
		self
	}

	/// Names this spec is registered under, in registration order.
	///
	/// A spec without qualifiers registers the bare action. Qualified specs
	/// register `action:qualifier` for each qualifier; fallback specs add the
	/// bare action too, or only the bare action under
	/// [`FallbackMode::Exclusive`].
	pub fn names(&self, mode: FallbackMode) -> Result<Vec<String>, RegistryError> {
		let bare = QualifiedAction::new(self.action)?;
		let qualified = self
			.qualifiers
			.iter()
			.map(|qualifier| QualifiedAction::with_qualifier(self.action, *qualifier))
			.collect::<Result<Vec<_>, _>>()?;

		let mut names = Vec::with_capacity(qualified.len() + 1);
		if self.is_fallback || qualified.is_empty() {
			names.push(bare.to_string());
		}
		if self.is_fallback && mode == FallbackMode::Exclusive {
			return Ok(names);
		}

		for name in qualified.iter().map(ToString::to_string) {
			if !names.contains(&name) {
				names.push(name);
			}
		}
		Ok(names)
	}
}

/// Wires every spec into `registry`, returning the number of registrations.
///
/// Requirements longer than `config.max_adaptee_depth` are rejected, since
/// no adaptee vector built under that config could ever match them.
/// Stops at the first error; callers should treat any error as fatal.
pub fn register_handlers(
	registry: &mut CapabilityRegistry,
	specs: &[HandlerSpec],
	config: &ResolverConfig,
) -> Result<usize, RegistryError> {
	let mode = config.fallback_mode;
	let mut count = 0;
	for spec in specs {
		if spec.required.len() > config.max_adaptee_depth {
			return Err(RegistryError::InvalidRequirement {
				required: spec.required.to_vec(),
				role: spec.role,
				reason: "longer than max_adaptee_depth",
			});
		}
		let factory: HandlerFactory = Arc::new(spec.factory);
		for name in spec.names(mode)? {
			registry.register(spec.required, spec.role, name, Arc::clone(&factory))?;
			count += 1;
		}
	}
	tracing::debug!(specs = specs.len(), registrations = count, ?mode, "handlers registered");
	Ok(count)
}

#[cfg(test)]
mod tests {
	use metawidget_schema::FieldKind;
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::context::LookupContext;
	use crate::error::{ActionError, RenderError};

	struct Nop(LookupContext);

	impl Handler for Nop {
		fn context(&self) -> &LookupContext {
			&self.0
		}

		fn render(&self, _: &str, _: &serde_json::Value) -> Result<String, RenderError> {
			Ok(String::new())
		}
	}

	fn nop(init: HandlerInit<'_>) -> Box<dyn Handler> {
		Box::new(Nop(init.context))
	}

	const TEXT: &[Capability] = &[Capability::Field(FieldKind::Text)];

	#[test]
	fn unqualified_registers_bare_action() {
		let spec = HandlerSpec::field("edit", TEXT, nop);
		assert_eq!(spec.names(FallbackMode::Additional).unwrap(), vec!["edit"]);
		assert_eq!(spec.names(FallbackMode::Exclusive).unwrap(), vec!["edit"]);
	}

	#[test]
	fn qualified_registers_each_qualifier() {
		let spec = HandlerSpec::field("edit", TEXT, nop).qualifiers(&["markdown", "notes.short"]);
		assert_eq!(
			spec.names(FallbackMode::Additional).unwrap(),
			vec!["edit:markdown", "edit:notes.short"]
		);
	}

	#[test]
	fn fallback_mode_decides_qualified_names() {
		let spec = HandlerSpec::field("edit", TEXT, nop)
			.qualifiers(&["markdown", "markdown"])
			.fallback();
		assert_eq!(
			spec.names(FallbackMode::Additional).unwrap(),
			vec!["edit", "edit:markdown"]
		);
		assert_eq!(spec.names(FallbackMode::Exclusive).unwrap(), vec!["edit"]);
	}

	#[test]
	fn invalid_qualifier_is_reported() {
		let spec = HandlerSpec::field("edit", TEXT, nop).qualifiers(&["Markdown"]);
		assert_eq!(
			spec.names(FallbackMode::Additional),
			Err(RegistryError::Action(ActionError::InvalidQualifier(
				"Markdown".into()
			)))
		);
	}

	#[test]
	fn invalid_qualifier_is_reported_in_every_mode() {
		let spec = HandlerSpec::field("edit", TEXT, nop)
			.qualifiers(&["Markdown"])
			.fallback();
		for mode in [FallbackMode::Additional, FallbackMode::Exclusive] {
			assert_eq!(
				spec.names(mode),
				Err(RegistryError::Action(ActionError::InvalidQualifier(
					"Markdown".into()
				)))
			);
		}
	}

	#[test]
	fn register_handlers_counts_names() {
		static SPECS: &[HandlerSpec] = &[
			HandlerSpec::field("edit", TEXT, nop),
			HandlerSpec::field("read", TEXT, nop)
				.qualifiers(&["summary", "full"])
				.fallback(),
		];
		let mut registry = CapabilityRegistry::new();
		let count = register_handlers(&mut registry, SPECS, &ResolverConfig::default()).unwrap();
		assert_eq!(count, 4);
		assert_eq!(registry.len(), 4);
		assert!(registry.contains(TEXT, Role::FieldHandler, "read:full"));
		assert!(registry.contains(TEXT, Role::FieldHandler, "read"));
	}

	#[test]
	fn register_handlers_rejects_requirements_deeper_than_config() {
		const LIST: Capability = Capability::Field(FieldKind::List);
		static SPECS: &[HandlerSpec] = &[HandlerSpec::field(
			"read",
			&[LIST, LIST, LIST, LIST, Capability::Field(FieldKind::Text)],
			nop,
		)];
		let mut registry = CapabilityRegistry::new();
		let err = register_handlers(&mut registry, SPECS, &ResolverConfig::default()).unwrap_err();
		assert_eq!(
			err,
			RegistryError::InvalidRequirement {
				required: SPECS[0].required.to_vec(),
				role: Role::FieldHandler,
				reason: "longer than max_adaptee_depth",
			}
		);
		assert!(registry.is_empty());

		let config = ResolverConfig {
			max_adaptee_depth: 5,
			..ResolverConfig::default()
		};
		assert_eq!(register_handlers(&mut registry, SPECS, &config), Ok(1));
	}

	#[test]
	fn register_handlers_rejects_duplicates() {
		static SPECS: &[HandlerSpec] = &[
			HandlerSpec::field("edit", TEXT, nop),
			HandlerSpec::field("edit", TEXT, nop).qualifiers(&["markdown"]).fallback(),
		];
		let mut registry = CapabilityRegistry::new();
		let err = register_handlers(&mut registry, SPECS, &ResolverConfig::default()).unwrap_err();
		assert!(matches!(err, RegistryError::DuplicateRegistration { ref name, .. } if name == "edit"));
	}
}
