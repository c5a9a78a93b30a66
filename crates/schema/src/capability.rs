use std::fmt;

/// Shape of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldKind {
	/// Single line of text.
	TextLine,
	/// Multi-line text.
	Text,
	/// Masked text line.
	Password,
	/// Absolute URI.
	Url,
	/// Email address.
	Email,
	/// Signed integer.
	Int,
	/// Floating point number.
	Float,
	/// Boolean flag.
	Bool,
	/// Calendar date.
	Date,
	/// Time of day.
	Time,
	/// Date and time.
	DateTime,
	/// One term out of a vocabulary.
	Choice,
	/// Ordered, homogeneous collection.
	List,
	/// Fixed, homogeneous collection.
	Tuple,
	/// Keyed collection; its value type is the element.
	Dict,
	/// Nested object described by a schema.
	Object,
}

impl FieldKind {
	/// Returns true for kinds that carry an element type.
	#[inline]
	pub const fn is_collection(self) -> bool {
		matches!(self, Self::List | Self::Tuple | Self::Dict)
	}

	/// Stable lowercase name.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::TextLine => "text_line",
			Self::Text => "text",
			Self::Password => "password",
			Self::Url => "url",
			Self::Email => "email",
			Self::Int => "int",
			Self::Float => "float",
			Self::Bool => "bool",
			Self::Date => "date",
			Self::Time => "time",
			Self::DateTime => "datetime",
			Self::Choice => "choice",
			Self::List => "list",
			Self::Tuple => "tuple",
			Self::Dict => "dict",
			Self::Object => "object",
		}
	}
}

impl fmt::Display for FieldKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Name of an object schema (e.g. `contact_info`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SchemaId(pub &'static str);

impl SchemaId {
	/// Returns the schema name.
	#[inline]
	pub const fn as_str(self) -> &'static str {
		self.0
	}
}

impl fmt::Display for SchemaId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.0)
	}
}

/// One shape a piece of data presents to the handler registry.
///
/// Fields present their kind; objects present their schema. A field of kind
/// [`FieldKind::Object`] is still a field and dispatches as one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Capability {
	/// A schema field of the given kind.
	Field(FieldKind),
	/// An object implementing the given schema.
	Object(SchemaId),
}

impl Capability {
	/// Returns true if this capability describes a field.
	#[inline]
	pub const fn is_field(self) -> bool {
		matches!(self, Self::Field(_))
	}

	/// Returns true if this is a collection field capability.
	#[inline]
	pub const fn is_collection(self) -> bool {
		matches!(self, Self::Field(kind) if kind.is_collection())
	}
}

impl fmt::Display for Capability {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Field(kind) => write!(f, "field:{kind}"),
			Self::Object(schema) => write!(f, "object:{schema}"),
		}
	}
}
