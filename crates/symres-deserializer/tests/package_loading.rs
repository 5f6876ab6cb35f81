//! Loading modules, package fragments and top-level classes.

use serde_json::json;
use std::sync::Arc;
use symres_deserializer::{
    find_member_path, load_all, load_module, load_package_fragment, load_top_level_classes,
};
use symres_metadata::{
    ClassId, MemorySymbolTable, ScopeRef, SymbolTableReader, Variance, Visibility,
};
use symres_model::{
    ClassMembers, DeclKind, DeclarationStore, SymbolError, Type, TypeArgument, builtins,
};

fn dump() -> serde_json::Value {
    json!({
        "module": "lib",
        "fragments": [
            {
                "fq_name": "pkg",
                "strings": ["pkg", "Base", "Derived", "lang", "Int", "T", "get", "Inner", "size", "set"],
                "qualified_names": [
                    { "short_name": 0, "kind": "package" },
                    { "parent": 0, "short_name": 1, "kind": "class" },
                    { "parent": 0, "short_name": 2, "kind": "class" },
                    { "short_name": 3, "kind": "package" },
                    { "parent": 3, "short_name": 4, "kind": "class" },
                    { "parent": 1, "short_name": 7, "kind": "class" }
                ],
                "classes": [
                    {
                        "fq_name": 1,
                        "modality": "open",
                        "type_parameters": [ { "id": 0, "name": 5, "variance": "in" } ],
                        "type_table": { "types": [
                            { "classifier": { "type_parameter": 0 } },
                            { "classifier": { "class_name": 4 } }
                        ] },
                        "functions": [{
                            "modality": "open",
                            "name": 6,
                            "return_type": { "table": 0 }
                        }, {
                            "visibility": "private",
                            "name": 9,
                            "value_parameters": [ { "name": 5, "ty": { "table": 0 } } ],
                            "return_type": { "table": 1 }
                        }],
                        "nested_classes": [{
                            "fq_name": 5,
                            "type_table": { "types": [ { "classifier": { "class_name": 4 } } ] },
                            "properties": [ { "name": 8, "return_type": { "table": 0 } } ]
                        }]
                    },
                    {
                        "fq_name": 2,
                        "supertypes": [ { "table": 0 } ],
                        "type_table": { "types": [
                            { "classifier": { "class_name": 1 }, "arguments": [
                                { "ty": { "table": 1 } }
                            ] },
                            { "classifier": { "class_name": 4 } }
                        ] }
                    }
                ]
            },
            {
                "fq_name": "empty",
                "strings": [],
                "qualified_names": []
            }
        ]
    })
}

fn table() -> MemorySymbolTable {
    MemorySymbolTable::from_json(&dump().to_string()).expect("dump loads")
}

#[test]
fn test_load_all_registers_module_fragments_and_classes() {
    let table = table();
    let store = DeclarationStore::new();
    let loaded = load_all(&store, &table).expect("module loads");

    let module = store.get(loaded.module).unwrap();
    assert!(module.is_module());
    assert_eq!(module.name, "lib");

    let names: Vec<&str> = loaded.fragments.keys().map(|name| name.as_str()).collect();
    assert_eq!(names, ["pkg", "empty"]);
    assert_eq!(loaded.fragment("pkg").unwrap().classes.len(), 2);
    assert!(loaded.fragment("empty").unwrap().classes.is_empty());
    assert!(loaded.fragment("missing").is_none());

    // Module, two fragments, two classes; members stay unloaded.
    assert_eq!(store.len(), 5);
}

#[test]
fn test_top_level_classes_share_reader_type_tables() {
    let table = table();
    let store = DeclarationStore::new();
    let module = load_module(&store, &table);
    let fragment = load_package_fragment(&store, &table, module.id, "pkg").unwrap();
    let classes = load_top_level_classes(&store, &table, &fragment).unwrap();

    let base = store.get(classes[0]).unwrap();
    let data = base.as_class().unwrap();
    let reader_table = table
        .read_type_table(&ScopeRef::Class {
            fragment: "pkg".into(),
            class: 0,
        })
        .unwrap();
    assert!(Arc::ptr_eq(&data.type_table, &reader_table));
    assert_eq!(store.find_class(&ClassId::new("pkg", "Base")), Some(base.id));
    assert_eq!(base.containing, Some(fragment.id));

    let package_data = fragment.as_package_fragment().unwrap();
    let reader_package_table = table
        .read_type_table(&ScopeRef::Package("pkg".into()))
        .unwrap();
    assert!(Arc::ptr_eq(&package_data.type_table, &reader_package_table));
}

#[test]
fn test_class_signature_and_supertypes() {
    let table = table();
    let store = DeclarationStore::new();
    let loaded = load_all(&store, &table).unwrap();
    let classes = &loaded.fragment("pkg").unwrap().classes;

    let base = store.get(classes[0]).unwrap();
    let base_data = base.as_class().unwrap();
    assert_eq!(base_data.type_parameters.len(), 1);
    assert_eq!(base_data.type_parameters[0].variance, Variance::In);
    assert_eq!(base_data.supertypes, vec![Type::class(builtins::any())]);
    assert!(matches!(base_data.members, ClassMembers::Lazy(_)));

    let derived = store.get(classes[1]).unwrap();
    let derived_data = derived.as_class().unwrap();
    assert_eq!(
        derived_data.supertypes,
        vec![Type::class(ClassId::new("pkg", "Base"))
            .with_arguments(vec![TypeArgument::invariant(Type::class(builtins::int()))])]
    );
}

#[test]
fn test_members_load_with_class_context() {
    let table = table();
    let store = DeclarationStore::new();
    let loaded = load_all(&store, &table).unwrap();
    let base = loaded.fragment("pkg").unwrap().classes[0];

    let members = store.class_members(base).unwrap();
    let members: Vec<_> = members.iter().map(|id| store.get(*id).unwrap()).collect();
    let labels: Vec<(&str, &str)> = members
        .iter()
        .map(|member| (member.name.as_str(), member.kind.label()))
        .collect();
    assert_eq!(
        labels,
        [("get", "function"), ("set", "function"), ("Inner", "class")]
    );

    let get = members[0].as_function().unwrap();
    assert_eq!(get.return_type, Type::parameter(base, 0, "T".into()));
    assert_eq!(members[1].visibility(), Visibility::Private);

    let inner = members[2].as_class().unwrap();
    assert_eq!(inner.class_id, ClassId::new("pkg", "Base.Inner"));
    let inner_members = store.class_members(members[2].id).unwrap();
    let size = store.get(inner_members[0]).unwrap();
    assert_eq!(size.as_property().unwrap().ty, Type::class(builtins::int()));
}

#[test]
fn test_find_member_path() {
    let table = table();
    let store = DeclarationStore::new();
    let loaded = load_all(&store, &table).unwrap();
    let fragment = loaded.fragment("pkg").unwrap();

    let inner = find_member_path(&store, fragment, "Base.Inner").unwrap();
    let size = find_member_path(&store, fragment, "Base.Inner.size").unwrap();
    assert_eq!(store.get(size).unwrap().containing, Some(inner));

    assert!(matches!(
        find_member_path(&store, fragment, "Base.missing"),
        Err(SymbolError::MalformedChain { .. })
    ));
    assert!(matches!(
        find_member_path(&store, fragment, "Base.get.x"),
        Err(SymbolError::MalformedChain { .. })
    ));
}

#[test]
fn test_unknown_fragment_and_wrong_declaration_kind() {
    let table = table();
    let store = DeclarationStore::new();
    let module = load_module(&store, &table);
    assert!(matches!(
        load_package_fragment(&store, &table, module.id, "nope"),
        Err(SymbolError::CorruptTable(_))
    ));
    assert!(matches!(
        load_top_level_classes(&store, &table, &module),
        Err(SymbolError::MalformedChain { .. })
    ));
    assert!(matches!(module.kind, DeclKind::Module));
}
