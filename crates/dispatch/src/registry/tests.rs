use metawidget_schema::{FieldKind, SchemaId};
use pretty_assertions::assert_eq;

use super::*;

const LIST: Capability = Capability::Field(FieldKind::List);
const CHOICE: Capability = Capability::Field(FieldKind::Choice);
const TEXT: Capability = Capability::Field(FieldKind::TextLine);
const CONTACT: Capability = Capability::Object(SchemaId("contact_info"));

#[test]
fn test_exact_lookup() {
	let mut registry = CapabilityRegistry::new();
	registry.register(&[LIST], Role::FieldHandler, "read", "list").unwrap();
	registry
		.register(&[LIST, CHOICE], Role::FieldHandler, "read", "list-of-choice")
		.unwrap();
	registry
		.register(&[CONTACT], Role::ObjectHandler, "read", "contact")
		.unwrap();

	assert_eq!(registry.len(), 3);
	assert_eq!(
		registry.lookup_exact(&[LIST], Role::FieldHandler, "read"),
		Some(&"list")
	);
	assert_eq!(
		registry.lookup_exact(&[LIST, CHOICE], Role::FieldHandler, "read"),
		Some(&"list-of-choice")
	);
	assert_eq!(
		registry.lookup_exact(&[CONTACT], Role::ObjectHandler, "read"),
		Some(&"contact")
	);
}

#[test]
fn test_no_partial_matching() {
	let mut registry = CapabilityRegistry::new();
	registry.register(&[LIST], Role::FieldHandler, "read", ()).unwrap();

	// Longer vector, qualified name and other role are all distinct keys.
	assert!(!registry.contains(&[LIST, CHOICE], Role::FieldHandler, "read"));
	assert!(!registry.contains(&[LIST], Role::FieldHandler, "read:aa"));
	assert!(!registry.contains(&[LIST], Role::ObjectHandler, "read"));
	assert!(registry.contains(&[LIST], Role::FieldHandler, "read"));
}

#[test]
fn test_duplicate_registration() {
	let mut registry = CapabilityRegistry::new();
	registry.register(&[TEXT], Role::FieldHandler, "edit", 1).unwrap();
	let err = registry
		.register(&[TEXT], Role::FieldHandler, "edit", 2)
		.unwrap_err();

	assert_eq!(
		err,
		RegistryError::DuplicateRegistration {
			required: vec![TEXT],
			role: Role::FieldHandler,
			name: "edit".into(),
		}
	);
	assert_eq!(
		err.to_string(),
		"duplicate registration: field handler [field:text_line] \"edit\""
	);
	// First registration is untouched.
	assert_eq!(registry.lookup_exact(&[TEXT], Role::FieldHandler, "edit"), Some(&1));
	assert_eq!(registry.len(), 1);
}

#[test]
fn test_invalid_requirements() {
	let mut registry = CapabilityRegistry::new();
	let cases: &[(&[Capability], Role)] = &[
		(&[], Role::FieldHandler),
		(&[], Role::ObjectHandler),
		(&[TEXT], Role::ObjectHandler),
		(&[CONTACT, CONTACT], Role::ObjectHandler),
		(&[CONTACT], Role::FieldHandler),
		(&[TEXT, CHOICE], Role::FieldHandler),
		(&[LIST, CONTACT], Role::FieldHandler),
	];
	for &(required, role) in cases {
		let err = registry.register(required, role, "edit", ()).unwrap_err();
		assert!(
			matches!(err, RegistryError::InvalidRequirement { .. }),
			"{required:?} as {role} should be rejected, got {err}"
		);
	}
	assert!(registry.is_empty());
}

#[test]
fn test_keys_lists_everything() {
	let mut registry = CapabilityRegistry::new();
	registry.register(&[LIST], Role::FieldHandler, "read", ()).unwrap();
	registry.register(&[LIST], Role::FieldHandler, "read:aa", ()).unwrap();
	registry.register(&[CONTACT], Role::ObjectHandler, "edit", ()).unwrap();

	let mut keys: Vec<_> = registry
		.keys()
		.map(|(role, required, name)| (role.to_string(), required.to_vec(), name.to_owned()))
		.collect();
	keys.sort();
	assert_eq!(
		keys,
		vec![
			("field handler".to_owned(), vec![LIST], "read".to_owned()),
			("field handler".to_owned(), vec![LIST], "read:aa".to_owned()),
			("object handler".to_owned(), vec![CONTACT], "edit".to_owned()),
		]
	);
}
