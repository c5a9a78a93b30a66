use crate::action::QualifiedAction;

/// How a handler was found: what was asked for and what actually matched.
///
/// Created fresh for every successful lookup and handed to the handler on
/// instantiation. `provided` differs from `requested` when the lookup fell
/// back to a more general qualifier.
#[derive(Debug, PartialEq, Eq)]
pub struct LookupContext {
	requested: QualifiedAction,
	provided: QualifiedAction,
}

impl LookupContext {
	pub fn new(requested: QualifiedAction, provided: QualifiedAction) -> Self {
		Self {
			requested,
			provided,
		}
	}

	pub fn requested(&self) -> &QualifiedAction {
		&self.requested
	}

	pub fn provided(&self) -> &QualifiedAction {
		&self.provided
	}

	/// Returns true if the match came from a more general qualifier.
	pub fn is_fallback(&self) -> bool {
		self.requested != self.provided
	}
}
