use gantry_core::{ResolvedName, RootSet};
use proptest::prelude::*;

/// Generate relative path fragments that are valid unqualified names
fn relative_path() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_\\-\\.]{1,20}(/[a-zA-Z0-9_\\-\\.]{1,20}){0,4}"
}

/// Generate root identifiers
fn root_id() -> impl Strategy<Value = String> {
    "[A-Z][A-Z0-9]{0,10}"
}

proptest! {
    /// Resolution is idempotent: resolving a resolved name returns it
    /// unchanged, however many times it round-trips.
    #[test]
    fn resolution_is_idempotent(path in relative_path()) {
        let roots = RootSet::default();
        let once = roots.resolve(&path).unwrap();
        let twice = roots.resolve(once.as_str()).unwrap();
        let thrice = roots.resolve(twice.as_str()).unwrap();
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(&twice, &thrice);
    }

    /// Unqualified names always land under the default root's prefix.
    #[test]
    fn unqualified_names_use_default_prefix(path in relative_path()) {
        let roots = RootSet::default();
        let resolved = roots.resolve(&path).unwrap();
        prop_assert_eq!(resolved.as_str(), format!("//./{path}"));
    }

    /// Root-qualified resolution is deterministic: the same name under
    /// the same namespace resolves to the same canonical form, and the
    /// resolved file name starts with the root's prefix.
    #[test]
    fn qualified_resolution_is_deterministic(
        id in root_id(),
        prefix in "[a-z]{1,10}",
        path in relative_path(),
    ) {
        let mut roots = RootSet::default();
        roots.insert(&id, format!("{prefix}/")).unwrap();

        let name = format!("/{id}/{path}");
        let a = roots.resolve(&name).unwrap();
        let b = roots.resolve(&name).unwrap();
        prop_assert_eq!(&a, &b);
        // Bound outside the assertion: prop_assert! treats its condition
        // as a format string, so inline captures would not compile.
        let expected = format!("{prefix}/");
        prop_assert!(a.file_name().starts_with(&expected));
    }

    /// Every successfully resolved name parses back as resolved form.
    #[test]
    fn resolved_form_round_trips(path in relative_path()) {
        let roots = RootSet::default();
        let resolved = roots.resolve(&path).unwrap();
        let reparsed = ResolvedName::parse(resolved.as_str()).unwrap();
        prop_assert_eq!(resolved, reparsed);
    }
}
