use std::fmt;
use std::str::FromStr;

use crate::error::ActionError;

/// An action to perform, optionally narrowed by a dotted qualifier.
///
/// The canonical string form is `action` or `action:qualifier`, e.g.
/// `edit:contacts.office`. Every qualifier segment matches `[a-z][_a-z0-9]+`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QualifiedAction {
	action: String,
	qualifier: Option<String>,
}

/// Returns true if `segment` is a valid qualifier path component.
pub fn is_valid_segment(segment: &str) -> bool {
	let mut bytes = segment.bytes();
	let Some(first) = bytes.next() else {
		return false;
	};
	first.is_ascii_lowercase()
		&& segment.len() > 1
		&& bytes.all(|b| b == b'_' || b.is_ascii_lowercase() || b.is_ascii_digit())
}

fn check_action(action: &str) -> Result<(), ActionError> {
	if action.is_empty() {
		return Err(ActionError::EmptyAction);
	}
	if action.contains(':') {
		return Err(ActionError::InvalidAction(action.to_owned()));
	}
	Ok(())
}

impl QualifiedAction {
	/// Creates a bare action without a qualifier.
	pub fn new(action: impl Into<String>) -> Result<Self, ActionError> {
		let action = action.into();
		check_action(&action)?;
		Ok(Self {
			action,
			qualifier: None,
		})
	}

	/// Creates an action narrowed by a dotted qualifier.
	pub fn with_qualifier(
		action: impl Into<String>,
		qualifier: impl Into<String>,
	) -> Result<Self, ActionError> {
		let action = action.into();
		check_action(&action)?;
		let qualifier = qualifier.into();
		if !qualifier.split('.').all(is_valid_segment) {
			return Err(ActionError::InvalidQualifier(qualifier));
		}
		Ok(Self {
			action,
			qualifier: Some(qualifier),
		})
	}

	pub fn action(&self) -> &str {
		&self.action
	}

	pub fn qualifier(&self) -> Option<&str> {
		self.qualifier.as_deref()
	}

	/// Iterates qualifier segments, outermost first.
	pub fn segments(&self) -> impl Iterator<Item = &str> {
		self.qualifier.as_deref().into_iter().flat_map(|q| q.split('.'))
	}

	/// Number of qualifier segments.
	pub fn depth(&self) -> usize {
		self.segments().count()
	}

	/// Returns the more general forms of this action, most general first.
	///
	/// `render:a.b.c` yields `[render, render:a, render:a.b]`. The action
	/// itself is never included.
	pub fn parents(&self) -> Vec<QualifiedAction> {
		let Some(qualifier) = self.qualifier.as_deref() else {
			return Vec::new();
		};

		let mut parents = vec![self.bare()];
		parents.extend(
			qualifier
				.match_indices('.')
				.map(|(end, _)| self.narrowed(&qualifier[..end])),
		);
		parents
	}

	/// Returns this action followed by its parents, most specific first.
	pub fn candidates(&self) -> Vec<QualifiedAction> {
		let mut candidates = self.parents();
		candidates.push(self.clone());
		candidates.reverse();
		candidates
	}

	/// Extends the qualifier with one more segment.
	pub fn make_child(&self, segment: &str) -> Result<QualifiedAction, ActionError> {
		if !is_valid_segment(segment) {
			return Err(ActionError::InvalidQualifierSegment(segment.to_owned()));
		}
		Ok(match self.qualifier.as_deref() {
			Some(qualifier) => self.narrowed(&format!("{qualifier}.{segment}")),
			None => self.narrowed(segment),
		})
	}

	fn bare(&self) -> QualifiedAction {
		QualifiedAction {
			action: self.action.clone(),
			qualifier: None,
		}
	}

	/// Builds a sibling with an already validated qualifier.
	fn narrowed(&self, qualifier: &str) -> QualifiedAction {
		QualifiedAction {
			action: self.action.clone(),
			qualifier: Some(qualifier.to_owned()),
		}
	}
}

impl fmt::Display for QualifiedAction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.qualifier {
			Some(qualifier) => write!(f, "{}:{qualifier}", self.action),
			None => f.write_str(&self.action),
		}
	}
}

impl FromStr for QualifiedAction {
	type Err = ActionError;

	/// Parses `action` or `action:qualifier`, splitting on the first `:`.
	///
	/// An empty qualifier (`render:`) is treated as absent.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.split_once(':') {
			Some((action, "")) => Self::new(action),
			Some((action, qualifier)) => Self::with_qualifier(action, qualifier),
			None => Self::new(s),
		}
	}
}

impl TryFrom<&str> for QualifiedAction {
	type Error = ActionError;

	fn try_from(s: &str) -> Result<Self, Self::Error> {
		s.parse()
	}
}

/// Anything a caller may pass as a request: a [`QualifiedAction`] or its
/// canonical string form.
pub trait IntoRequest {
	fn into_request(self) -> Result<QualifiedAction, ActionError>;
}

impl IntoRequest for QualifiedAction {
	fn into_request(self) -> Result<QualifiedAction, ActionError> {
		Ok(self)
	}
}

impl IntoRequest for &QualifiedAction {
	fn into_request(self) -> Result<QualifiedAction, ActionError> {
		Ok(self.clone())
	}
}

impl IntoRequest for &str {
	fn into_request(self) -> Result<QualifiedAction, ActionError> {
		self.parse()
	}
}

impl IntoRequest for String {
	fn into_request(self) -> Result<QualifiedAction, ActionError> {
		self.parse()
	}
}
