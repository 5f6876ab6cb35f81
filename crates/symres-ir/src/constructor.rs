//! Delegating-constructor analysis.

use crate::error::IrError;
use crate::node::{Node, NodeKind, Walk};
use symres_model::{
    ClassId, ClassKind, DeclKind, Declaration, DeclarationStore, Type, builtins,
};

/// Whether `constructor`'s body delegates to the superclass rather than to
/// another constructor of its own class.
///
/// The body must contain exactly one delegating constructor call outside
/// nested classes, and it must target either the constructed class or its
/// superclass. The superclass is the first supertype registered in the
/// store that is not an interface, or `lang.Any` when there is none.
pub fn calls_super(
    store: &DeclarationStore,
    constructor: &Declaration,
    body: &Node,
) -> Result<bool, IrError> {
    if !matches!(constructor.kind, DeclKind::Constructor(_)) {
        return Err(IrError::UnexpectedDeclaration {
            name: constructor.name.clone(),
            expected: "a constructor",
            found: constructor.kind.label(),
        });
    }
    let class = match constructor.containing {
        Some(owner) => store.resolve(owner)?,
        None => {
            return Err(IrError::UnexpectedDeclaration {
                name: constructor.name.clone(),
                expected: "a constructor inside a class",
                found: constructor.kind.label(),
            });
        }
    };
    let Some(class_data) = class.as_class() else {
        return Err(IrError::UnexpectedDeclaration {
            name: class.name.clone(),
            expected: "a class",
            found: class.kind.label(),
        });
    };
    let constructed = &class_data.class_id;
    let superclass = superclass_of(store, &class_data.supertypes);

    let mut targets: Vec<ClassId> = Vec::new();
    body.walk(&mut |node| match &node.kind {
        NodeKind::Class { .. } => Walk::SkipChildren,
        NodeKind::DelegatingConstructorCall { class, .. } => {
            targets.push(class.clone());
            Walk::Continue
        }
        _ => Walk::Continue,
    });

    match targets.as_slice() {
        [] => Err(IrError::NoDelegatingCall {
            class: constructed.to_string(),
        }),
        [target] if *target == superclass => Ok(true),
        [target] if target == constructed => Ok(false),
        [target] => Err(IrError::UnrelatedDelegatingCall {
            class: constructed.to_string(),
            target: target.to_string(),
            superclass: superclass.to_string(),
        }),
        _ => Err(IrError::MultipleDelegatingCalls {
            class: constructed.to_string(),
        }),
    }
}

fn superclass_of(store: &DeclarationStore, supertypes: &[Type]) -> ClassId {
    supertypes
        .iter()
        .filter_map(|supertype| supertype.class_id())
        .find(|class_id| {
            store
                .find_class(class_id)
                .and_then(|id| store.get(id))
                .and_then(|declaration| declaration.as_class().map(|class| class.kind))
                .is_some_and(|kind| kind != ClassKind::Interface)
        })
        .cloned()
        .unwrap_or_else(builtins::any)
}

#[cfg(test)]
#[path = "tests/constructor_tests.rs"]
mod tests;
