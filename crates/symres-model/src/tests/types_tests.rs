use super::*;

fn list_of(argument: Type) -> Type {
    Type::class(ClassId::new("lang", "List")).with_arguments(vec![TypeArgument::invariant(argument)])
}

#[test]
fn test_display() {
    let t = Type::parameter(DeclId(3), 0, Name::new("T"));
    assert_eq!(list_of(t.clone()).to_string(), "lang/List<T>");
    assert_eq!(list_of(t).make_nullable().to_string(), "lang/List<T>?");
    let star = Type::class(ClassId::new("lang", "List")).with_arguments(vec![
        TypeArgument::Star,
        TypeArgument::Projection {
            variance: Variance::Out,
            ty: builtins::nullable_any_type(),
        },
    ]);
    assert_eq!(star.to_string(), "lang/List<*, out lang/Any?>");
}

#[test]
fn test_builtin_predicates() {
    assert!(builtins::nothing_type().is_nothing());
    assert!(builtins::nullable_any_type().is_any());
    assert!(builtins::unit_type().is_unit());
    assert!(!builtins::unit_type().make_nullable().is_unit());
}

#[test]
fn test_substitution_for_supertype() {
    let owner = DeclId(10);
    let t = Type::parameter(owner, 0, Name::new("T"));
    let supertype = Type::class(ClassId::new("pkg", "Box"))
        .with_arguments(vec![TypeArgument::invariant(Type::class(builtins::int()))]);
    let substitution = Substitution::for_supertype(owner, &supertype);

    assert_eq!(t.substitute(&substitution), Type::class(builtins::int()));
    assert_eq!(
        list_of(t.clone().make_nullable()).substitute(&substitution),
        list_of(Type::class(builtins::int()).make_nullable())
    );

    // Parameters of another owner are untouched.
    let other = Type::parameter(DeclId(11), 0, Name::new("T"));
    assert_eq!(other.substitute(&substitution), other);
}

#[test]
fn test_star_argument_substitutes_nullable_any() {
    let owner = DeclId(10);
    let supertype = Type::class(ClassId::new("pkg", "Box")).with_arguments(vec![TypeArgument::Star]);
    let substitution = Substitution::for_supertype(owner, &supertype);
    assert_eq!(
        Type::parameter(owner, 0, Name::new("T")).substitute(&substitution),
        builtins::nullable_any_type()
    );
}

#[test]
fn test_compose_applies_inner_then_outer() {
    // class C : B<Int>, class B<U> : A<List<U>>, class A<T>
    let a = DeclId(1);
    let b = DeclId(2);
    let u = Type::parameter(b, 0, Name::new("U"));
    let mut inner = Substitution::new();
    inner.insert(a, 0, list_of(u));
    let mut outer = Substitution::new();
    outer.insert(b, 0, Type::class(builtins::int()));

    let composed = outer.compose(&inner);
    let t = Type::parameter(a, 0, Name::new("T"));
    assert_eq!(t.substitute(&composed), list_of(Type::class(builtins::int())));
}

#[test]
fn test_mentions_parameters_of() {
    let owner = DeclId(4);
    assert!(list_of(Type::parameter(owner, 0, Name::new("T"))).mentions_parameters_of(owner));
    assert!(!list_of(Type::class(builtins::int())).mentions_parameters_of(owner));
}
