use std::fmt;

use metawidget_schema::Capability;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::error::RegistryError;
use crate::handler::HandlerFactory;

/// Distinguishes what kind of handler a registration provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
	/// Adapts a field, keyed by its adaptee vector.
	FieldHandler,
	/// Adapts an object, keyed by its schema.
	ObjectHandler,
}

impl fmt::Display for Role {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Role::FieldHandler => write!(f, "field handler"),
			Role::ObjectHandler => write!(f, "object handler"),
		}
	}
}

type Requirement = SmallVec<[Capability; 4]>;
type Table<F> = FxHashMap<Requirement, FxHashMap<String, F>>;

/// Exact-match store of handler factories.
///
/// Keys are `(required capabilities, role, name)`. There is no fallback or
/// partial matching here; see [`Resolver`](crate::Resolver) for that.
/// Registration takes `&mut self`, so once the registry is shared behind an
/// `Arc` it is read-only.
pub struct CapabilityRegistry<F = HandlerFactory> {
	fields: Table<F>,
	objects: Table<F>,
	len: usize,
}

impl<F> Default for CapabilityRegistry<F> {
	fn default() -> Self {
		Self {
			fields: FxHashMap::default(),
			objects: FxHashMap::default(),
			len: 0,
		}
	}
}

impl<F> fmt::Debug for CapabilityRegistry<F> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CapabilityRegistry")
			.field("len", &self.len)
			.finish_non_exhaustive()
	}
}

impl<F> CapabilityRegistry<F> {
	pub fn new() -> Self {
		Self::default()
	}

	fn table(&self, role: Role) -> &Table<F> {
		match role {
			Role::FieldHandler => &self.fields,
			Role::ObjectHandler => &self.objects,
		}
	}

	/// Registers `factory` under the exact key.
	///
	/// Fails with [`RegistryError::DuplicateRegistration`] if the key is
	/// taken, or [`RegistryError::InvalidRequirement`] if no adaptee vector
	/// for `role` could ever equal `required`.
	pub fn register(
		&mut self,
		required: &[Capability],
		role: Role,
		name: impl Into<String>,
		factory: F,
	) -> Result<(), RegistryError> {
		check_requirement(required, role)?;

		let name = name.into();
		let table = match role {
			Role::FieldHandler => &mut self.fields,
			Role::ObjectHandler => &mut self.objects,
		};
		let names = table.entry(Requirement::from_slice(required)).or_default();
		if names.contains_key(&name) {
			return Err(RegistryError::DuplicateRegistration {
				required: required.to_vec(),
				role,
				name,
			});
		}

		tracing::trace!(%role, ?required, name = %name, "registered handler");
		names.insert(name, factory);
		self.len += 1;
		Ok(())
	}

	/// Returns the factory registered under exactly this key.
	pub fn lookup_exact(&self, required: &[Capability], role: Role, name: &str) -> Option<&F> {
		self.table(role).get(required)?.get(name)
	}

	pub fn contains(&self, required: &[Capability], role: Role, name: &str) -> bool {
		self.lookup_exact(required, role, name).is_some()
	}

	/// Number of registrations.
	pub fn len(&self) -> usize {
		self.len
	}

	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	/// Iterates all registered keys in unspecified order.
	pub fn keys(&self) -> impl Iterator<Item = (Role, &[Capability], &str)> {
		let fields = self.fields.iter().map(|e| (Role::FieldHandler, e));
		let objects = self.objects.iter().map(|e| (Role::ObjectHandler, e));
		fields.chain(objects).flat_map(|(role, (required, names))| {
			names
				.keys()
				.map(move |name| (role, required.as_slice(), name.as_str()))
		})
	}
}

/// Rejects requirements no adaptee vector can match.
///
/// Object adaptees are always a single object capability. Field adaptees are
/// collection chains, so every element but the last must be a collection.
fn check_requirement(required: &[Capability], role: Role) -> Result<(), RegistryError> {
	let reason = match role {
		_ if required.is_empty() => Some("no capabilities"),
		Role::ObjectHandler => match required {
			[Capability::Object(_)] => None,
			[_] => Some("object handlers require an object capability"),
			_ => Some("object handlers take exactly one capability"),
		},
		Role::FieldHandler => {
			let init = &required[..required.len() - 1];
			if !required.iter().all(|c| c.is_field()) {
				Some("field handlers require field capabilities")
			} else if !init.iter().all(|c| c.is_collection()) {
				Some("only the last capability may be a non-collection")
			} else {
				None
			}
		}
	};

	match reason {
		Some(reason) => Err(RegistryError::InvalidRequirement {
			required: required.to_vec(),
			role,
			reason,
		}),
		None => Ok(()),
	}
}

#[cfg(test)]
mod tests;
