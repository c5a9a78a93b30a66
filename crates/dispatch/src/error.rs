use metawidget_schema::Capability;
use thiserror::Error;

use crate::action::QualifiedAction;
use crate::registry::Role;

/// Errors raised while building a [`QualifiedAction`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
	/// The action part is empty.
	#[error("action name must not be empty")]
	EmptyAction,
	/// The action part contains the qualifier separator.
	#[error("invalid action name {0:?}")]
	InvalidAction(String),
	/// A full dotted qualifier is malformed.
	#[error("invalid qualifier {0:?}")]
	InvalidQualifier(String),
	/// A single qualifier segment does not match `[a-z][_a-z0-9]+`.
	#[error("invalid qualifier segment {0:?}")]
	InvalidQualifierSegment(String),
}

/// Setup-time registration failures. These abort initialization.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
	/// The exact key is already taken.
	#[error("duplicate registration: {role} [{}] {name:?}", join_caps(.required))]
	DuplicateRegistration {
		required: Vec<Capability>,
		role: Role,
		name: String,
	},
	/// The required capabilities cannot match any adaptee for this role.
	#[error("invalid requirement for {role} [{}]: {reason}", join_caps(.required))]
	InvalidRequirement {
		required: Vec<Capability>,
		role: Role,
		reason: &'static str,
	},
	/// A handler declared a malformed action or qualifier.
	#[error(transparent)]
	Action(#[from] ActionError),
}

/// No registration matched any qualifier and capability combination.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot find a {role} for {subject} for action \"{requested}\"")]
pub struct NotFound {
	/// The action as originally requested.
	pub requested: QualifiedAction,
	/// Which kind of handler was searched for.
	pub role: Role,
	/// Description of the field or object being adapted.
	pub subject: String,
}

/// Failure reported by a handler while producing markup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
	/// Supplementary data has the wrong shape for this handler.
	#[error("unexpected data at {path}: {message}")]
	InvalidData { path: String, message: String },
	/// General render failure with message.
	#[error("{0}")]
	Failed(String),
}

/// Errors from the resolve-then-render helpers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarkupError {
	#[error(transparent)]
	Request(#[from] ActionError),
	#[error(transparent)]
	NotFound(#[from] NotFound),
	#[error(transparent)]
	Render(#[from] RenderError),
}

/// Errors while loading a [`ResolverConfig`](crate::ResolverConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
	#[error("failed to parse resolver config: {0}")]
	Parse(#[from] toml::de::Error),
	#[error("invalid resolver config: {0}")]
	Invalid(&'static str),
}

pub(crate) fn join_caps(caps: &[Capability]) -> String {
	caps.iter()
		.map(ToString::to_string)
		.collect::<Vec<_>>()
		.join(", ")
}
