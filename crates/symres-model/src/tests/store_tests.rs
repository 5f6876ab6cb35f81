use super::*;
use crate::decl::{ClassData, ClassMembers, FunctionData, LocalVariableData, PackageFragmentData};
use crate::types::Type;
use crate::builtins;
use symres_metadata::{
    ClassFlags, ClassKind, FunctionFlags, Modality, Name, NameResolver, QualifiedNameTable,
    StringTable, TypeTable, Visibility,
};

fn module(store: &DeclarationStore) -> Arc<Declaration> {
    store.register(|id| Declaration::new(id, Name::new("app"), None, DeclKind::Module))
}

fn fragment(store: &DeclarationStore, module: DeclId) -> Arc<Declaration> {
    store.register(|id| {
        Declaration::new(
            id,
            Name::new("pkg"),
            Some(module),
            DeclKind::PackageFragment(PackageFragmentData {
                fq_name: Name::new("pkg"),
                name_resolver: Arc::new(NameResolver::new(
                    &StringTable::default(),
                    &QualifiedNameTable::default(),
                )),
                type_table: Arc::new(TypeTable::empty()),
            }),
        )
    })
}

fn class(store: &DeclarationStore, owner: DeclId, name: &str) -> Arc<Declaration> {
    store.register(|id| {
        Declaration::new(
            id,
            Name::new(name),
            Some(owner),
            DeclKind::Class(ClassData {
                class_id: ClassId::new("pkg", name),
                kind: ClassKind::Class,
                modality: Modality::Final,
                visibility: Visibility::Public,
                flags: ClassFlags::empty(),
                type_parameters: Vec::new(),
                supertypes: vec![Type::class(builtins::any())],
                type_table: Arc::new(TypeTable::empty()),
                members: ClassMembers::Eager(Vec::new()),
            }),
        )
    })
}

fn function(store: &DeclarationStore, owner: DeclId, name: &str) -> Arc<Declaration> {
    store.register(|id| {
        Declaration::new(
            id,
            Name::new(name),
            Some(owner),
            DeclKind::Function(FunctionData {
                type_parameters: Vec::new(),
                receiver: None,
                value_parameters: Vec::new(),
                return_type: builtins::unit_type(),
                modality: Modality::Final,
                visibility: Visibility::Public,
                flags: FunctionFlags::empty(),
                overridden: Vec::new(),
            }),
        )
    })
}

#[test]
fn test_reserve_allocates_increasing_valid_ids() {
    let store = DeclarationStore::new();
    let first = store.reserve();
    let second = store.reserve();
    assert!(first.is_valid());
    assert!(second.0 > first.0);
    assert!(!store.contains(first));
    assert!(store.is_empty());
}

#[test]
fn test_register_and_get() {
    let store = DeclarationStore::new();
    let module = module(&store);
    assert_eq!(store.len(), 1);
    let fetched = store.get(module.id).expect("registered");
    assert!(Arc::ptr_eq(&fetched, &module));
    assert_eq!(
        store.resolve(DeclId(999)).unwrap_err(),
        SymbolError::UnknownDeclaration(DeclId(999))
    );
}

#[test]
fn test_classes_are_indexed_by_class_id() {
    let store = DeclarationStore::new();
    let module = module(&store);
    let fragment = fragment(&store, module.id);
    let a = class(&store, fragment.id, "A");
    assert_eq!(store.find_class(&ClassId::new("pkg", "A")), Some(a.id));
    assert_eq!(store.find_class(&ClassId::new("pkg", "B")), None);
}

#[test]
fn test_ownership_chain_runs_module_to_declaration() {
    let store = DeclarationStore::new();
    let module = module(&store);
    let fragment = fragment(&store, module.id);
    let a = class(&store, fragment.id, "A");
    let foo = function(&store, a.id, "foo");

    let chain = store.ownership_chain(foo.id).expect("well-formed chain");
    let names: Vec<&str> = chain.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, ["app", "pkg", "A", "foo"]);
}

#[test]
fn test_ownership_chain_must_end_at_module() {
    let store = DeclarationStore::new();
    let module = module(&store);
    let fragment = fragment(&store, module.id);
    let orphan = store.register(|id| {
        Declaration::new(
            id,
            Name::new("x"),
            None,
            DeclKind::LocalVariable(LocalVariableData {
                ty: Type::class(builtins::int()),
                is_var: false,
                is_delegated: false,
            }),
        )
    });
    assert!(store.ownership_chain(fragment.id).is_ok());
    assert!(matches!(
        store.ownership_chain(orphan.id),
        Err(SymbolError::MalformedChain { .. })
    ));
}

#[test]
fn test_ownership_chain_detects_cycles() {
    let store = DeclarationStore::new();
    let first = store.reserve();
    let second = store.reserve();
    store.insert(Declaration::new(
        first,
        Name::new("a"),
        Some(second),
        DeclKind::TypeParameterHolder(crate::decl::TypeParameterHolderData {
            type_parameters: Vec::new(),
        }),
    ));
    store.insert(Declaration::new(
        second,
        Name::new("b"),
        Some(first),
        DeclKind::TypeParameterHolder(crate::decl::TypeParameterHolderData {
            type_parameters: Vec::new(),
        }),
    ));
    let err = store.ownership_chain(first).unwrap_err();
    match err {
        SymbolError::MalformedChain { reason } => assert!(reason.contains("cyclic"), "{reason}"),
        other => panic!("expected MalformedChain, got {other:?}"),
    }
}

#[test]
fn test_ownership_chain_reports_dangling_owner() {
    let store = DeclarationStore::new();
    let foo = function(&store, DeclId(4242), "foo");
    assert_eq!(
        store.ownership_chain(foo.id).unwrap_err(),
        SymbolError::UnknownDeclaration(DeclId(4242))
    );
}

#[test]
fn test_class_members_of_eager_class_and_non_class() {
    let store = DeclarationStore::new();
    let module = module(&store);
    let fragment = fragment(&store, module.id);
    let a = class(&store, fragment.id, "A");
    assert_eq!(store.class_members(a.id).unwrap(), Vec::<DeclId>::new());
    assert!(matches!(
        store.class_members(fragment.id),
        Err(SymbolError::MalformedChain { .. })
    ));
}

#[test]
fn test_lazy_members_load_once() {
    use crate::context::ScopeContext;
    use crate::decl::LazyMembers;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use symres_metadata::ClassRecord;

    static LOADS: AtomicUsize = AtomicUsize::new(0);

    fn loader(
        _store: &DeclarationStore,
        _class: DeclId,
        _record: &ClassRecord,
        _context: &ScopeContext,
    ) -> Result<Vec<DeclId>, SymbolError> {
        LOADS.fetch_add(1, Ordering::SeqCst);
        Ok(vec![DeclId(77)])
    }

    let store = DeclarationStore::new();
    let module = module(&store);
    let fragment = fragment(&store, module.id);
    let data = fragment.as_package_fragment().unwrap();
    let context = ScopeContext::package(
        fragment.id,
        Arc::clone(&data.name_resolver),
        Arc::clone(&data.type_table),
    );
    let record: ClassRecord = empty_class_record();
    let lazy = store.register(|id| {
        Declaration::new(
            id,
            Name::new("L"),
            Some(fragment.id),
            DeclKind::Class(ClassData {
                class_id: ClassId::local("pkg", "L"),
                kind: ClassKind::Class,
                modality: Modality::Final,
                visibility: Visibility::Local,
                flags: ClassFlags::empty(),
                type_parameters: Vec::new(),
                supertypes: Vec::new(),
                type_table: Arc::new(TypeTable::empty()),
                members: ClassMembers::Lazy(LazyMembers::new(Arc::new(record), context, loader)),
            }),
        )
    });

    assert_eq!(store.class_members(lazy.id).unwrap(), vec![DeclId(77)]);
    assert_eq!(store.class_members(lazy.id).unwrap(), vec![DeclId(77)]);
    assert_eq!(LOADS.load(Ordering::SeqCst), 1);
}

fn empty_class_record() -> symres_metadata::ClassRecord {
    symres_metadata::ClassRecord {
        flags: ClassFlags::empty(),
        kind: ClassKind::Class,
        modality: Modality::Final,
        visibility: Visibility::Local,
        fq_name: 0,
        type_parameters: Vec::new(),
        supertypes: Vec::new(),
        constructors: Vec::new(),
        functions: Vec::new(),
        properties: Vec::new(),
        nested_classes: Vec::new(),
        type_table: Default::default(),
        annotations: Vec::new(),
    }
}
