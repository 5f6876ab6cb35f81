//! Class ids of the builtin classes the resolver needs to name directly.

use crate::types::Type;
use symres_metadata::ClassId;

/// Package holding the builtin classes.
pub const LANG_PACKAGE: &str = "lang";

pub fn any() -> ClassId {
    ClassId::new(LANG_PACKAGE, "Any")
}

pub fn nothing() -> ClassId {
    ClassId::new(LANG_PACKAGE, "Nothing")
}

pub fn unit() -> ClassId {
    ClassId::new(LANG_PACKAGE, "Unit")
}

pub fn int() -> ClassId {
    ClassId::new(LANG_PACKAGE, "Int")
}

pub fn boolean() -> ClassId {
    ClassId::new(LANG_PACKAGE, "Boolean")
}

pub fn string() -> ClassId {
    ClassId::new(LANG_PACKAGE, "String")
}

pub fn throwable() -> ClassId {
    ClassId::new(LANG_PACKAGE, "Throwable")
}

pub fn unit_type() -> Type {
    Type::class(unit())
}

pub fn nothing_type() -> Type {
    Type::class(nothing())
}

pub fn boolean_type() -> Type {
    Type::class(boolean())
}

/// `Any?`, the top of the type hierarchy.
pub fn nullable_any_type() -> Type {
    Type::class(any()).make_nullable()
}
