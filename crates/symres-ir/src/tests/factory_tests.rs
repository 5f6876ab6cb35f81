use super::*;
use crate::node::Walk;
use symres_model::{Accessor, LocalVariableData, Modality, Name, Visibility};

fn property(is_var: bool) -> Declaration {
    Declaration::new(
        DeclId(10),
        Name::new("count"),
        Some(DeclId(1)),
        DeclKind::Property(PropertyData {
            type_parameters: Vec::new(),
            receiver: None,
            ty: Type::class(builtins::int()),
            is_var,
            is_delegated: false,
            is_const: false,
            is_lateinit: false,
            getter: Some(Accessor::default()),
            setter: is_var.then(Accessor::default),
            modality: Modality::Final,
            visibility: Visibility::Public,
            overridden: Vec::new(),
        }),
    )
}

fn variable(name: &str, ty: Type) -> Declaration {
    Declaration::new(
        DeclId(20),
        Name::new(name),
        Some(DeclId(2)),
        DeclKind::LocalVariable(LocalVariableData {
            ty,
            is_var: false,
            is_delegated: false,
        }),
    )
}

fn builder() -> IrBuilder {
    IrBuilder::new(DeclId(2)).at(Span::new(4, 9))
}

#[test]
fn test_nodes_carry_builder_span() {
    let b = builder();
    let unit = b.unit();
    assert_eq!(unit.span, Span::new(4, 9));
    assert_eq!(unit.kind, NodeKind::UnitValue);
    assert!(unit.ty.is_unit());

    let moved = b.at(Span::new(20, 30)).boolean(true);
    assert_eq!(moved.span, Span::new(20, 30));
    assert_eq!(IrBuilder::new(DeclId(2)).unit().span, Span::UNDEFINED);
}

#[test]
fn test_control_flow_types() {
    let b = builder();
    let if_then = b.if_then(b.boolean(true), b.int(1));
    assert!(if_then.ty.is_unit());
    let NodeKind::If { else_branch, .. } = &if_then.kind else {
        panic!("expected an if");
    };
    assert!(else_branch.is_none());

    let not = b.not(b.boolean(false));
    assert_eq!(not.ty, builtins::boolean_type());
    assert!(matches!(
        not.kind,
        NodeKind::PrimitiveCall {
            op: PrimitiveOp::BooleanNot,
            ..
        }
    ));

    let throw = b.throw(b.string("boom"));
    assert!(throw.ty.is_nothing());
}

#[test]
fn test_type_operators() {
    let b = builder();
    let any = builtins::nullable_any_type();
    let cast = b.cast(b.null(any), Type::class(builtins::string()), Type::class(builtins::string()));
    assert_eq!(cast.ty, Type::class(builtins::string()));
    assert!(matches!(
        cast.kind,
        NodeKind::TypeOperator {
            operator: TypeOperator::Cast,
            ..
        }
    ));

    let coerced = b.implicit_coercion_to_unit(b.int(3));
    assert!(coerced.ty.is_unit());
    let NodeKind::TypeOperator {
        operator,
        type_operand,
        argument,
    } = coerced.kind
    else {
        panic!("expected a type operator");
    };
    assert_eq!(operator, TypeOperator::ImplicitCoercionToUnit);
    assert!(type_operand.is_unit());
    assert_eq!(argument.kind, NodeKind::Const(Constant::Int(3)));
}

#[test]
fn test_catch_requires_local_variable() {
    let b = builder();
    let exception = variable("e", Type::class(builtins::throwable()));
    let catch = b.catch(&exception, b.unit()).unwrap();
    assert_eq!(catch.parameter, exception.id);
    assert_eq!(catch.parameter_type, Type::class(builtins::throwable()));

    let error = b.catch(&property(false), b.unit()).unwrap_err();
    assert!(matches!(
        error,
        IrError::UnexpectedDeclaration {
            expected: "a local variable",
            found: "property",
            ..
        }
    ));

    let tried = b.try_catch(builtins::unit_type(), b.unit(), vec![catch], None);
    assert_eq!(tried.children().len(), 2);
}

#[test]
fn test_property_access_through_accessors() {
    let b = builder();
    let receiver = b.get_value(&variable("self", Type::class(builtins::any()))).unwrap();

    let read = b.get(Some(receiver.clone()), &property(false)).unwrap();
    assert_eq!(read.ty, Type::class(builtins::int()));
    assert!(matches!(
        &read.kind,
        NodeKind::AccessorCall {
            accessor: AccessorKind::Getter,
            receiver: Some(_),
            ..
        }
    ));

    let write = b.set(Some(receiver.clone()), &property(true), b.int(2)).unwrap();
    assert!(write.ty.is_unit());
    assert_eq!(write.children().len(), 2);

    assert_eq!(
        b.set(Some(receiver), &property(false), b.int(2)).unwrap_err(),
        IrError::MissingAccessor {
            property: Name::new("count"),
            accessor: "setter",
        }
    );
}

#[test]
fn test_field_access() {
    let b = builder();
    let read = b.get_field(None, &property(false)).unwrap();
    assert_eq!(read.ty, Type::class(builtins::int()));
    assert!(matches!(read.kind, NodeKind::GetField { receiver: None, .. }));

    let write = b.set_field(None, &property(false), b.int(1)).unwrap();
    assert!(write.ty.is_unit());

    let not_a_property = variable("x", Type::class(builtins::int()));
    assert!(b.get_field(None, &not_a_property).is_err());
}

#[test]
fn test_block_replacing_keeps_span_and_type() {
    let b = IrBuilder::new(DeclId(2));
    let original = builder().int(7);
    let block = b.block_replacing(&original, vec![b.unit(), original.clone()]);
    assert_eq!(block.span, original.span);
    assert_eq!(block.ty, original.ty);
    assert_eq!(block.children().len(), 2);
}

#[test]
fn test_walk_visits_in_pre_order() {
    let b = builder();
    let tree = b.block(
        vec![b.if_then(b.not(b.boolean(true)), b.throw(b.string("x")))],
        builtins::unit_type(),
    );
    let mut kinds = Vec::new();
    tree.walk(&mut |node| {
        kinds.push(match &node.kind {
            NodeKind::Block(_) => "block",
            NodeKind::If { .. } => "if",
            NodeKind::PrimitiveCall { .. } => "not",
            NodeKind::Const(_) => "const",
            NodeKind::Throw(_) => "throw",
            _ => "other",
        });
        Walk::Continue
    });
    assert_eq!(kinds, ["block", "if", "not", "const", "throw", "const"]);
}
