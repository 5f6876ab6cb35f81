//! Resolving local declarations nested inside other local declarations.

use serde_json::json;
use std::sync::Arc;
use symres::deserializer::LoadedModule;
use symres::model::{ClassId, builtins, render_declaration};
use symres::{
    DeclId, DeclKind, Declaration, DeclarationStore, LocalDeclarationDeserializer,
    MemorySymbolTable, RecordRef, SymbolError, Type, find_member_path, load_all, resolve_local,
};

/// `class A { fun foo(x: Int): Int }` with local records:
///
/// 0. `class Local { fun bar(): String }`, declared in `A.foo`
/// 1. `val x: <table 0>`
/// 2. `var q: <table 0>`, used as a variable
///
/// Index 0 is `Unit` in the package table, `Int` in A's table and `String`
/// in Local's table.
fn dump() -> serde_json::Value {
    json!({
        "module": "main",
        "fragments": [{
            "fq_name": "pkg",
            "strings": ["pkg", "A", "foo", "lang", "Int", "String", "Local", "bar", "x", "q", "Unit"],
            "qualified_names": [
                { "short_name": 0, "kind": "package" },
                { "parent": 0, "short_name": 1, "kind": "class" },
                { "short_name": 3, "kind": "package" },
                { "parent": 2, "short_name": 4, "kind": "class" },
                { "parent": 2, "short_name": 5, "kind": "class" },
                { "parent": 0, "short_name": 6, "kind": "local" },
                { "parent": 2, "short_name": 10, "kind": "class" }
            ],
            "package": { "type_table": { "types": [
                { "classifier": { "class_name": 6 } }
            ] } },
            "classes": [{
                "fq_name": 1,
                "type_table": { "types": [ { "classifier": { "class_name": 3 } } ] },
                "constructors": [ {} ],
                "functions": [{
                    "name": 2,
                    "value_parameters": [ { "name": 8, "ty": { "table": 0 } } ],
                    "return_type": { "table": 0 }
                }]
            }],
            "local_declarations": [
                { "class": {
                    "fq_name": 5,
                    "visibility": "local",
                    "type_table": { "types": [ { "classifier": { "class_name": 4 } } ] },
                    "functions": [ { "name": 7, "return_type": { "table": 0 } } ]
                } },
                { "property": { "name": 8, "return_type": { "table": 0 } } },
                { "property": {
                    "flags": "IS_VAR | HAS_GETTER | HAS_SETTER",
                    "name": 9,
                    "return_type": { "table": 0 },
                    "used_as_variable": true
                } }
            ]
        }]
    })
}

/// Honors `RUST_LOG` when debugging a scenario.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

struct Fixture {
    table: MemorySymbolTable,
    store: DeclarationStore,
    module: LoadedModule,
}

impl Fixture {
    fn load() -> Self {
        init_tracing();
        let table = MemorySymbolTable::from_json(&dump().to_string()).expect("dump loads");
        let store = DeclarationStore::new();
        let module = load_all(&store, &table).expect("module loads");
        Self {
            table,
            store,
            module,
        }
    }

    fn fragment(&self) -> DeclId {
        self.module.fragment("pkg").expect("fragment pkg").id
    }

    fn member(&self, path: &str) -> DeclId {
        let fragment = self.module.fragment("pkg").expect("fragment pkg");
        find_member_path(&self.store, fragment, path).expect("member path resolves")
    }

    fn resolve(&self, parent: DeclId, index: u32) -> Result<Arc<Declaration>, SymbolError> {
        let chain = self.store.ownership_chain(parent)?;
        let id = resolve_local(&self.store, &self.table, &RecordRef::new("pkg", index), &chain)?;
        self.store.resolve(id)
    }

    /// `Local.bar`, reached by resolving `Local` inside `A.foo`.
    fn local_bar(&self) -> (Arc<Declaration>, DeclId) {
        let local = self.resolve(self.member("A.foo"), 0).expect("local class resolves");
        let bar = self
            .store
            .class_members(local.id)
            .expect("members load")
            .into_iter()
            .find(|id| self.store.get(*id).is_some_and(|member| member.name == "bar"))
            .expect("bar is a member of Local");
        (local, bar)
    }
}

fn property_type(declaration: &Declaration) -> Type {
    match &declaration.kind {
        DeclKind::Property(property) => property.ty.clone(),
        DeclKind::LocalVariable(variable) => variable.ty.clone(),
        other => panic!("expected a property or variable, got {}", other.label()),
    }
}

#[test]
fn test_same_index_resolves_against_nearest_table() {
    let fixture = Fixture::load();
    let (_, bar) = fixture.local_bar();

    let in_package = fixture.resolve(fixture.fragment(), 1).unwrap();
    let in_function = fixture.resolve(fixture.member("A.foo"), 1).unwrap();
    let in_local_member = fixture.resolve(bar, 1).unwrap();

    assert_eq!(property_type(&in_package), builtins::unit_type());
    assert_eq!(property_type(&in_function), Type::class(builtins::int()));
    assert_eq!(property_type(&in_local_member), Type::class(builtins::string()));
}

#[test]
fn test_chain_runs_through_local_declarations() {
    let fixture = Fixture::load();
    let (local, bar) = fixture.local_bar();
    assert_eq!(local.as_class().unwrap().class_id, ClassId::local("pkg", "Local"));

    let chain = fixture.store.ownership_chain(bar).unwrap();
    assert!(chain[0].is_module());
    let names: Vec<&str> = chain[1..].iter().map(|declaration| declaration.name.as_str()).collect();
    assert_eq!(names, ["pkg", "A", "foo", "Local", "bar"]);

    let deserializer = LocalDeclarationDeserializer::new(&fixture.store, bar).unwrap();
    assert_eq!(deserializer.parent().id, bar);
}

#[test]
fn test_variable_inside_local_member() {
    let fixture = Fixture::load();
    let (_, bar) = fixture.local_bar();
    let variable = fixture.resolve(bar, 2).unwrap();

    let DeclKind::LocalVariable(data) = &variable.kind else {
        panic!("expected a local variable, got {}", variable.kind.label());
    };
    assert!(data.is_var);
    assert_eq!(data.ty, Type::class(builtins::string()));
    assert_eq!(variable.containing, Some(bar));
    assert_eq!(render_declaration(&variable), "var q: lang/String");
}

#[test]
fn test_reversed_chain_is_malformed() {
    let fixture = Fixture::load();
    let fragment = fixture.store.resolve(fixture.fragment()).unwrap();
    let module = fixture.store.resolve(fixture.module.module).unwrap();

    let result = LocalDeclarationDeserializer::from_chain(&fixture.store, &[fragment, module]);
    assert!(matches!(result, Err(SymbolError::MalformedChain { .. })));
}

#[test]
fn test_record_of_another_package_is_rejected() {
    let fixture = Fixture::load();
    let chain = fixture.store.ownership_chain(fixture.member("A.foo")).unwrap();
    let before = fixture.store.len();
    let result = resolve_local(
        &fixture.store,
        &fixture.table,
        &RecordRef::new("other", 1),
        &chain,
    );
    assert!(matches!(result, Err(SymbolError::MalformedChain { .. })));
    assert_eq!(fixture.store.len(), before);
}

#[test]
fn test_parallel_resolution_registers_independent_declarations() {
    let fixture = Fixture::load();
    let foo = fixture.member("A.foo");

    let resolved: Vec<Arc<Declaration>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| fixture.resolve(foo, 1).unwrap()))
            .collect();
        handles.into_iter().map(|handle| handle.join().unwrap()).collect()
    });

    let mut ids: Vec<DeclId> = resolved.iter().map(|declaration| declaration.id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 8);
    for declaration in &resolved {
        assert_eq!(render_declaration(declaration), "val x: lang/Int");
        assert_eq!(declaration.containing, Some(foo));
    }
}
