use serde::Deserialize;

use crate::error::ConfigError;

/// Whether a fallback handler with qualifiers also keeps its qualified names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackMode {
	/// Register under the bare action in addition to every qualifier.
	#[default]
	Additional,
	/// Register under the bare action only.
	Exclusive,
}

/// Which dimension is relaxed last, i.e. which one wins a tie.
///
/// With `[list] "render:xx"` and `[list, choice] "render"` registered, a
/// `render:xx.yy` lookup for a list of choices picks the `[list, choice]`
/// handler under [`Precedence::Capability`] and the `[list]` handler under
/// [`Precedence::Qualifier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Precedence {
	/// Capability vector in the outer loop, qualifiers in the inner loop: all
	/// qualifiers are tried against the full vector before it is truncated,
	/// so a precisely typed handler under a general qualifier beats a loosely
	/// typed one under a precise qualifier.
	#[default]
	Capability,
	/// Qualifiers in the outer loop: all vector truncations are tried for a
	/// qualifier before moving on to its parent, so a shorter vector under a
	/// more specific qualifier beats a longer one under a general qualifier.
	Qualifier,
}

/// Resolver tuning, usually loaded once at startup.
///
/// ```toml
/// fallback_mode = "exclusive"
/// precedence = "capability"
/// max_adaptee_depth = 3
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverConfig {
	pub fallback_mode: FallbackMode,
	pub precedence: Precedence,
	/// Longest adaptee vector built for nested collections.
	///
	/// [`register_handlers`](crate::register_handlers) rejects requirements
	/// longer than this. Registrations made directly through
	/// [`CapabilityRegistry::register`](crate::CapabilityRegistry::register)
	/// are not checked against it and never match if longer.
	pub max_adaptee_depth: usize,
}

impl Default for ResolverConfig {
	fn default() -> Self {
		Self {
			fallback_mode: FallbackMode::default(),
			precedence: Precedence::default(),
			max_adaptee_depth: 4,
		}
	}
}

impl ResolverConfig {
	/// Parses and validates a TOML document.
	pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
		let config: Self = toml::from_str(source)?;
		config.validate()?;
		Ok(config)
	}

	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.max_adaptee_depth == 0 {
			return Err(ConfigError::Invalid("max_adaptee_depth must be at least 1"));
		}
		Ok(())
	}
}
