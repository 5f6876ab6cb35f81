use super::*;
use std::sync::Arc;
use symres_metadata::{
    ClassId, Name, NameResolver, QualifiedNameKind, QualifiedNameProto, QualifiedNameTable,
    StringTable, TypeArgumentProto, TypeTable, TypeTableProto,
};
use symres_model::{DeclId, TypeParameter, builtins};

fn resolver() -> Arc<NameResolver> {
    let strings = StringTable {
        strings: ["lang", "Int", "List", "T"].map(String::from).to_vec(),
    };
    let names = QualifiedNameTable {
        names: vec![
            QualifiedNameProto {
                parent: None,
                short_name: 0,
                kind: QualifiedNameKind::Package,
            },
            QualifiedNameProto {
                parent: Some(0),
                short_name: 1,
                kind: QualifiedNameKind::Class,
            },
            QualifiedNameProto {
                parent: Some(0),
                short_name: 2,
                kind: QualifiedNameKind::Class,
            },
        ],
    };
    Arc::new(NameResolver::new(&strings, &names))
}

fn class(index: u32) -> TypeProto {
    TypeProto {
        classifier: Classifier::ClassName(index),
        arguments: Vec::new(),
        nullable: false,
    }
}

fn list_of(argument: TypeRef) -> TypeProto {
    TypeProto {
        classifier: Classifier::ClassName(2),
        arguments: vec![TypeArgumentProto {
            projection: Projection::Inv,
            ty: Some(argument),
        }],
        nullable: false,
    }
}

fn context() -> ScopeContext {
    let table = TypeTableProto {
        types: vec![class(1), list_of(TypeRef::Table(0)), list_of(TypeRef::Table(2))],
        first_nullable: None,
    };
    ScopeContext::package(DeclId(2), resolver(), Arc::new(TypeTable::new(&table)))
}

fn list_type(argument: Type) -> Type {
    Type::class(ClassId::new("lang", "List")).with_arguments(vec![TypeArgument::invariant(argument)])
}

#[test]
fn test_table_and_inline_references() {
    let context = context();
    let types = TypeDeserializer::new(&context);
    assert_eq!(types.type_ref(&TypeRef::Table(0)).unwrap(), Type::class(builtins::int()));
    assert_eq!(
        types.type_ref(&TypeRef::Table(1)).unwrap(),
        list_type(Type::class(builtins::int()))
    );
    let mut nullable = class(1);
    nullable.nullable = true;
    assert_eq!(
        types.type_ref(&TypeRef::Inline(Box::new(nullable))).unwrap(),
        Type::class(builtins::int()).make_nullable()
    );
}

#[test]
fn test_star_projection() {
    let context = context();
    let proto = TypeProto {
        classifier: Classifier::ClassName(2),
        arguments: vec![TypeArgumentProto {
            projection: Projection::Star,
            ty: None,
        }],
        nullable: false,
    };
    let ty = TypeDeserializer::new(&context).type_proto(&proto).unwrap();
    assert_eq!(ty.arguments, vec![TypeArgument::Star]);
}

#[test]
fn test_type_parameters_by_id_and_name() {
    let owner = DeclId(9);
    let context = context().with_type_parameters(vec![TypeParameter {
        id: 4,
        name: Name::new("T"),
        index: 0,
        owner,
        variance: Variance::Invariant,
        reified: false,
        upper_bounds: Vec::new(),
    }]);
    let types = TypeDeserializer::new(&context);
    let expected = Type::parameter(owner, 0, Name::new("T"));
    let by_id = TypeProto {
        classifier: Classifier::TypeParameter(4),
        arguments: Vec::new(),
        nullable: false,
    };
    let by_name = TypeProto {
        classifier: Classifier::TypeParameterName(3),
        arguments: Vec::new(),
        nullable: false,
    };
    assert_eq!(types.type_proto(&by_id).unwrap(), expected);
    assert_eq!(types.type_proto(&by_name).unwrap(), expected);
}

#[test]
fn test_unresolved_references() {
    let context = context();
    let types = TypeDeserializer::new(&context);
    assert!(matches!(
        types.type_ref(&TypeRef::Table(17)),
        Err(SymbolError::UnresolvedTypeReference { index: 17, .. })
    ));
    assert!(matches!(
        types.type_proto(&class(40)),
        Err(SymbolError::UnresolvedNameReference { index: 40, .. })
    ));
    let missing_parameter = TypeProto {
        classifier: Classifier::TypeParameter(8),
        arguments: Vec::new(),
        nullable: false,
    };
    assert!(matches!(
        types.type_proto(&missing_parameter),
        Err(SymbolError::UnresolvedTypeReference { index: 8, .. })
    ));
    // A package name is not a class.
    assert!(matches!(
        types.type_proto(&class(0)),
        Err(SymbolError::CorruptTable(MetadataError::NotAClassName(0)))
    ));
}

#[test]
fn test_self_referential_table_is_corrupt() {
    let context = context();
    assert!(matches!(
        TypeDeserializer::new(&context).type_ref(&TypeRef::Table(2)),
        Err(SymbolError::CorruptTable(MetadataError::Corrupt { table: "type", .. }))
    ));
}
