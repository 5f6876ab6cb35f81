//! Lazy loading of deserialized class members.

use crate::materializer::MemberMaterializer;
use std::sync::Arc;
use symres_metadata::{ClassRecord, TypeTable};
use symres_model::{DeclId, DeclarationStore, ScopeContext, SymbolError};
use tracing::debug;

/// Reads every member of a deserialized class: constructors, functions,
/// properties and nested classes, in that order.
///
/// `context` is the class's own context. Nothing is inserted unless every
/// member reads successfully.
pub fn load_class_members(
    store: &DeclarationStore,
    class: DeclId,
    record: &ClassRecord,
    context: &ScopeContext,
) -> Result<Vec<DeclId>, SymbolError> {
    let materializer = MemberMaterializer::new(store, context.clone());
    let mut declarations = Vec::with_capacity(
        record.constructors.len()
            + record.functions.len()
            + record.properties.len()
            + record.nested_classes.len(),
    );
    for constructor in &record.constructors {
        declarations.push(materializer.load_constructor(constructor, constructor.is_primary())?);
    }
    for function in &record.functions {
        declarations.push(materializer.load_function(function)?);
    }
    for property in &record.properties {
        declarations.push(materializer.load_property(property)?);
    }
    for nested in &record.nested_classes {
        let type_table = Arc::new(TypeTable::new(&nested.type_table));
        declarations.push(materializer.load_class(Arc::new(nested.clone()), type_table)?);
    }

    debug!(class = %class, members = declarations.len(), "loaded class members");
    Ok(declarations
        .into_iter()
        .map(|declaration| store.insert(declaration).id)
        .collect())
}
