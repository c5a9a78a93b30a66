use metawidget_schema::{Capability, Describe};
use smallvec::{SmallVec, smallvec};

/// Capability chain of a descriptor, outermost (most specific) first.
///
/// A list of choices is `[field:list, field:choice]`. During fallback search
/// it is only ever truncated from the tail.
pub type AdapteeVector = SmallVec<[Capability; 4]>;

/// Builds [`AdapteeVector`]s, bounding how deep collections are expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdapteeBuilder {
	max_depth: usize,
}

impl Default for AdapteeBuilder {
	fn default() -> Self {
		Self { max_depth: 4 }
	}
}

impl AdapteeBuilder {
	/// Creates a builder producing vectors of at most `max_depth` elements.
	pub fn new(max_depth: usize) -> Self {
		Self {
			max_depth: max_depth.max(1),
		}
	}

	pub fn max_depth(&self) -> usize {
		self.max_depth
	}

	/// Builds the vector for `descriptor`.
	///
	/// With `expand_collections`, element types of collections are appended
	/// until a non-collection is reached. Otherwise the vector holds the
	/// descriptor's own capability only.
	pub fn build<D: Describe + ?Sized>(
		&self,
		descriptor: &D,
		expand_collections: bool,
	) -> AdapteeVector {
		let mut adaptee: AdapteeVector = smallvec![descriptor.capability()];
		if !expand_collections {
			return adaptee;
		}

		let mut next = descriptor.element();
		while let Some(element) = next
			&& adaptee.len() < self.max_depth
		{
			adaptee.push(element.capability());
			next = element.element();
		}
		adaptee
	}
}

#[cfg(test)]
mod tests {
	use metawidget_schema::{FieldDescriptor, FieldKind, ObjectDescriptor, SchemaId};
	use pretty_assertions::assert_eq;

	use super::*;

	const POLYGON: SchemaId = SchemaId("polygon");

	fn scalar(kind: FieldKind) -> FieldDescriptor {
		FieldDescriptor::scalar(kind).unwrap()
	}

	fn geometry() -> FieldDescriptor {
		FieldDescriptor::list(FieldDescriptor::list(FieldDescriptor::object(POLYGON)))
	}

	#[test]
	fn scalar_has_single_element() {
		let adaptee = AdapteeBuilder::default().build(&scalar(FieldKind::Int), true);
		assert_eq!(adaptee.as_slice(), &[Capability::Field(FieldKind::Int)]);
	}

	#[test]
	fn list_of_choice_expands() {
		let tags = FieldDescriptor::list(scalar(FieldKind::Choice));
		let adaptee = AdapteeBuilder::default().build(&tags, true);
		assert_eq!(
			adaptee.as_slice(),
			&[
				Capability::Field(FieldKind::List),
				Capability::Field(FieldKind::Choice),
			]
		);
	}

	#[test]
	fn nested_collections_expand_outermost_first() {
		let adaptee = AdapteeBuilder::default().build(&geometry(), true);
		assert_eq!(
			adaptee.as_slice(),
			&[
				Capability::Field(FieldKind::List),
				Capability::Field(FieldKind::List),
				Capability::Field(FieldKind::Object),
			]
		);
	}

	#[test]
	fn dict_expands_to_value_type() {
		let contacts = FieldDescriptor::dict(scalar(FieldKind::Choice), scalar(FieldKind::Email));
		let adaptee = AdapteeBuilder::default().build(&contacts, true);
		assert_eq!(
			adaptee.as_slice(),
			&[
				Capability::Field(FieldKind::Dict),
				Capability::Field(FieldKind::Email),
			]
		);
	}

	#[test]
	fn no_expansion_keeps_head_only() {
		let adaptee = AdapteeBuilder::default().build(&geometry(), false);
		assert_eq!(adaptee.as_slice(), &[Capability::Field(FieldKind::List)]);
	}

	#[test]
	fn depth_is_bounded() {
		let adaptee = AdapteeBuilder::new(2).build(&geometry(), true);
		assert_eq!(adaptee.len(), 2);
		assert_eq!(AdapteeBuilder::new(0).max_depth(), 1);
	}

	#[test]
	fn object_is_never_expanded() {
		let obj = ObjectDescriptor::new(POLYGON);
		let adaptee = AdapteeBuilder::default().build(&obj, true);
		assert_eq!(adaptee.as_slice(), &[Capability::Object(POLYGON)]);
	}
}
