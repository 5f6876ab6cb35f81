use super::*;
use crate::fixture::{ClassBuilder, function, int, property, string};
use symres_model::LocalVariableData;

fn scope(store: &DeclarationStore) -> SyntheticScope {
    let owner = ClassBuilder::new(store, "Owner").build();
    let declarations = vec![
        store.insert(function(store.reserve(), owner, "f", vec![], int())),
        store.insert(function(store.reserve(), owner, "f", vec![int()], int())),
        store.insert(property(store.reserve(), owner, "p", string(), false)),
        store.get(ClassBuilder::new(store, "Nested").build()).unwrap(),
        store.get(ClassBuilder::new(store, "Twice").build()).unwrap(),
        store.get(ClassBuilder::new(store, "Twice").build()).unwrap(),
    ];
    SyntheticScope::new(declarations)
}

#[test]
fn test_lookup_functions_and_properties() {
    let store = DeclarationStore::new();
    let scope = scope(&store);

    assert_eq!(scope.lookup_functions("f").len(), 2);
    assert!(scope.lookup_functions("p").is_empty());
    let properties = scope.lookup_properties("p");
    assert_eq!(properties.len(), 1);
    assert_eq!(properties[0].name, "p");
    assert!(scope.lookup_properties("missing").is_empty());
}

#[test]
fn test_lookup_properties_skips_local_variables() {
    let store = DeclarationStore::new();
    let owner = ClassBuilder::new(&store, "Owner").build();
    let local = store.insert(Declaration::new(
        store.reserve(),
        Name::new("p"),
        Some(owner),
        DeclKind::LocalVariable(LocalVariableData {
            ty: int(),
            is_var: false,
            is_delegated: false,
        }),
    ));
    let member = store.insert(property(store.reserve(), owner, "p", int(), true));
    let scope = SyntheticScope::new(vec![local, Arc::clone(&member)]);

    let properties = scope.lookup_properties("p");
    assert_eq!(properties.len(), 1);
    assert_eq!(properties[0].id, member.id);
    assert_eq!(scope.lookup_all(DeclKindFilter::ALL, &|_| true).len(), 2);
}

#[test]
fn test_lookup_type() {
    let store = DeclarationStore::new();
    let scope = scope(&store);

    let nested = scope.lookup_type("Nested").unwrap().unwrap();
    assert_eq!(nested.kind.label(), "class");
    assert!(scope.lookup_type("f").unwrap().is_none());
    assert_eq!(
        scope.lookup_type("Twice").unwrap_err(),
        SymbolError::AmbiguousLookup {
            name: Name::new("Twice"),
            count: 2,
        }
    );
}

#[test]
fn test_lookup_all_filters_kind_and_name() {
    let store = DeclarationStore::new();
    let scope = scope(&store);

    assert_eq!(scope.lookup_all(DeclKindFilter::ALL, &|_| true).len(), 6);
    assert_eq!(scope.lookup_all(DeclKindFilter::CALLABLES, &|_| true).len(), 3);
    assert_eq!(scope.lookup_all(DeclKindFilter::CLASSIFIERS, &|_| true).len(), 3);
    let named_f = scope.lookup_all(DeclKindFilter::ALL, &|name| name == "f");
    assert_eq!(named_f.len(), 2);
    assert!(scope
        .lookup_all(DeclKindFilter::CONSTRUCTORS, &|_| true)
        .is_empty());
}

#[test]
fn test_from_ids_requires_registered_declarations() {
    let store = DeclarationStore::new();
    let owner = ClassBuilder::new(&store, "Owner").build();
    let f = store.insert(function(store.reserve(), owner, "f", vec![], int()));

    let scope = SyntheticScope::from_ids(&store, [f.id]).unwrap();
    assert_eq!(scope.declarations().len(), 1);
    assert_eq!(
        SyntheticScope::from_ids(&store, [DeclId(4242)]).unwrap_err(),
        SymbolError::UnknownDeclaration(DeclId(4242))
    );
}
