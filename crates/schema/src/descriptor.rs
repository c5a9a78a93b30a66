use crate::{Capability, FieldKind, SchemaError, SchemaId};

/// Access to the dispatch-relevant parts of a descriptor.
pub trait Describe {
	/// Returns the capability this descriptor presents.
	fn capability(&self) -> Capability;

	/// Returns the element type for collection descriptors.
	fn element(&self) -> Option<&FieldDescriptor> {
		None
	}

	/// Short description for diagnostics.
	fn describe(&self) -> String {
		self.capability().to_string()
	}
}

/// Validated description of a schema field.
///
/// Each constructor fixes the shape, so a descriptor that exists always
/// agrees with its [`FieldKind`]:
/// - collections carry an element (dicts also carry a key)
/// - object fields carry a schema
/// - scalars carry neither; [`FieldDescriptor::scalar`] rejects other kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
	kind: FieldKind,
	title: Option<String>,
	required: bool,
	element: Option<Box<FieldDescriptor>>,
	key: Option<Box<FieldDescriptor>>,
	schema: Option<SchemaId>,
}

impl FieldDescriptor {
	fn bare(kind: FieldKind) -> Self {
		Self {
			kind,
			title: None,
			required: false,
			element: None,
			key: None,
			schema: None,
		}
	}

	/// Creates a scalar field.
	pub fn scalar(kind: FieldKind) -> Result<Self, SchemaError> {
		match kind {
			FieldKind::List | FieldKind::Tuple | FieldKind::Dict => {
				Err(SchemaError::MissingElement(kind))
			}
			FieldKind::Object => Err(SchemaError::MissingSchema),
			_ => Ok(Self::bare(kind)),
		}
	}

	/// Creates a list of `element`.
	pub fn list(element: FieldDescriptor) -> Self {
		Self {
			element: Some(Box::new(element)),
			..Self::bare(FieldKind::List)
		}
	}

	/// Creates a tuple of `element`.
	pub fn tuple(element: FieldDescriptor) -> Self {
		Self {
			element: Some(Box::new(element)),
			..Self::bare(FieldKind::Tuple)
		}
	}

	/// Creates a dict mapping `key` to `value`.
	pub fn dict(key: FieldDescriptor, value: FieldDescriptor) -> Self {
		Self {
			key: Some(Box::new(key)),
			element: Some(Box::new(value)),
			..Self::bare(FieldKind::Dict)
		}
	}

	/// Creates a field holding an object of `schema`.
	pub fn object(schema: SchemaId) -> Self {
		Self {
			schema: Some(schema),
			..Self::bare(FieldKind::Object)
		}
	}

	/// Sets the display title.
	pub fn with_title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());
		self
	}

	/// Marks the field as required.
	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}

	pub fn kind(&self) -> FieldKind {
		self.kind
	}

	pub fn title(&self) -> Option<&str> {
		self.title.as_deref()
	}

	pub fn is_required(&self) -> bool {
		self.required
	}

	/// Dict key type.
	pub fn key(&self) -> Option<&FieldDescriptor> {
		self.key.as_deref()
	}

	/// Schema of an object field.
	pub fn schema(&self) -> Option<SchemaId> {
		self.schema
	}
}

impl Describe for FieldDescriptor {
	fn capability(&self) -> Capability {
		Capability::Field(self.kind)
	}

	fn element(&self) -> Option<&FieldDescriptor> {
		self.element.as_deref()
	}

	fn describe(&self) -> String {
		match (&self.title, self.element.as_deref(), self.schema) {
			(Some(title), _, _) => format!("{} {title:?}", self.kind),
			(None, Some(element), _) => format!("{} of {}", self.kind, element.describe()),
			(None, None, Some(schema)) => format!("{} {schema}", self.kind),
			(None, None, None) => self.kind.to_string(),
		}
	}
}

/// Description of an object: its schema and its ordered fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectDescriptor {
	schema: SchemaId,
	fields: Vec<(String, FieldDescriptor)>,
}

impl ObjectDescriptor {
	pub fn new(schema: SchemaId) -> Self {
		Self {
			schema,
			fields: Vec::new(),
		}
	}

	/// Appends a named field, rejecting duplicate names.
	pub fn with_field(
		mut self,
		name: impl Into<String>,
		field: FieldDescriptor,
	) -> Result<Self, SchemaError> {
		let name = name.into();
		if self.field(&name).is_some() {
			return Err(SchemaError::DuplicateField {
				schema: self.schema.as_str(),
				name,
			});
		}
		self.fields.push((name, field));
		Ok(self)
	}

	pub fn schema(&self) -> SchemaId {
		self.schema
	}

	/// Looks up a field by name.
	pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
		self.fields
			.iter()
			.find(|(n, _)| n == name)
			.map(|(_, field)| field)
	}

	/// Iterates fields in declaration order.
	pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldDescriptor)> {
		self.fields.iter().map(|(n, f)| (n.as_str(), f))
	}
}

impl Describe for ObjectDescriptor {
	fn capability(&self) -> Capability {
		Capability::Object(self.schema)
	}

	fn describe(&self) -> String {
		format!("object {}", self.schema)
	}
}
