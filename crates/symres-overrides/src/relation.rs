//! Return-type compatibility between an overriding member and the member it
//! overrides.

use std::fmt;
use symres_common::limits::MAX_TYPE_DEPTH;
use symres_model::{DeclarationStore, Substitution, Type, TypeArgument, Variance};

/// Decides whether `sub` may stand where `sup` is expected.
///
/// The store is passed in so relations that consult class hierarchies can
/// be shared through `SynthesisOptions` without borrowing it.
pub trait TypeRelation: fmt::Debug + Send + Sync {
    fn is_subtype(&self, store: &DeclarationStore, sub: &Type, sup: &Type) -> bool;
}

/// Equality only.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExactRelation;

impl TypeRelation for ExactRelation {
    fn is_subtype(&self, _store: &DeclarationStore, sub: &Type, sup: &Type) -> bool {
        sub == sup
    }
}

/// Equality, `Nothing` as bottom, `Any?` as top, and `T` below `T?`.
#[derive(Clone, Copy, Debug, Default)]
pub struct StructuralRelation;

impl StructuralRelation {
    fn holds(sub: &Type, sup: &Type) -> bool {
        if sub == sup {
            return true;
        }
        if sub.is_nothing() && (!sub.nullable || sup.nullable) {
            return true;
        }
        if sup.is_any() && sup.nullable {
            return true;
        }
        !sub.nullable && sup.nullable && sub.clone().make_nullable() == *sup
    }
}

impl TypeRelation for StructuralRelation {
    fn is_subtype(&self, _store: &DeclarationStore, sub: &Type, sup: &Type) -> bool {
        Self::holds(sub, sup)
    }
}

/// `StructuralRelation` extended with declared supertypes: a class type is a
/// subtype of every supertype its class declaration lists, with the class's
/// type arguments substituted through, and arguments are compared according
/// to their projection.
///
/// Classes missing from the store only relate structurally.
#[derive(Clone, Copy, Debug, Default)]
pub struct HierarchyRelation;

impl HierarchyRelation {
    fn holds(store: &DeclarationStore, sub: &Type, sup: &Type, depth: u32) -> bool {
        if StructuralRelation::holds(sub, sup) {
            return true;
        }
        if depth >= MAX_TYPE_DEPTH || (sub.nullable && !sup.nullable) {
            return false;
        }
        if sup.is_any() && !sub.nullable {
            return true;
        }
        let (Some(sub_class), Some(sup_class)) = (sub.class_id(), sup.class_id()) else {
            return false;
        };
        if sub_class == sup_class {
            return sub.arguments.len() == sup.arguments.len()
                && sub
                    .arguments
                    .iter()
                    .zip(&sup.arguments)
                    .all(|(sub_arg, sup_arg)| Self::argument_holds(store, sub_arg, sup_arg, depth));
        }

        let Some(class_id) = store.find_class(sub_class) else {
            return false;
        };
        let Some(declaration) = store.get(class_id) else {
            return false;
        };
        let Some(class) = declaration.as_class() else {
            return false;
        };
        let substitution = Substitution::for_supertype(class_id, sub);
        class.supertypes.iter().any(|supertype| {
            let mut supertype = supertype.substitute(&substitution);
            supertype.nullable = sub.nullable;
            Self::holds(store, &supertype, sup, depth + 1)
        })
    }

    fn argument_holds(
        store: &DeclarationStore,
        sub: &TypeArgument,
        sup: &TypeArgument,
        depth: u32,
    ) -> bool {
        match (sub, sup) {
            (_, TypeArgument::Star) => true,
            (TypeArgument::Star, TypeArgument::Projection { .. }) => false,
            (
                TypeArgument::Projection {
                    variance: sub_variance,
                    ty: sub_ty,
                },
                TypeArgument::Projection {
                    variance: sup_variance,
                    ty: sup_ty,
                },
            ) => match sup_variance {
                Variance::Out => {
                    *sub_variance != Variance::In && Self::holds(store, sub_ty, sup_ty, depth + 1)
                }
                Variance::In => {
                    *sub_variance != Variance::Out && Self::holds(store, sup_ty, sub_ty, depth + 1)
                }
                Variance::Invariant => sub_variance == sup_variance && sub_ty == sup_ty,
            },
        }
    }
}

impl TypeRelation for HierarchyRelation {
    fn is_subtype(&self, store: &DeclarationStore, sub: &Type, sup: &Type) -> bool {
        Self::holds(store, sub, sup, 0)
    }
}

#[cfg(test)]
#[path = "tests/relation_tests.rs"]
mod tests;
