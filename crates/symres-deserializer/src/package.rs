//! Loading the module, package fragment and top-level class declarations
//! that local enclosing chains start from.

use crate::materializer::MemberMaterializer;
use indexmap::IndexMap;
use std::sync::Arc;
use symres_metadata::{Name, ScopeRef, SymbolTableReader};
use symres_model::{
    DeclId, DeclKind, Declaration, DeclarationStore, PackageFragmentData, ScopeContext,
    SymbolError,
};
use tracing::{debug, info};

/// Registers the module declaration of `reader`'s symbol table.
pub fn load_module(store: &DeclarationStore, reader: &dyn SymbolTableReader) -> Arc<Declaration> {
    let name = reader.module_name();
    store.register(|id| Declaration::new(id, name, None, DeclKind::Module))
}

/// Registers the package fragment `fq_name` under `module`.
pub fn load_package_fragment(
    store: &DeclarationStore,
    reader: &dyn SymbolTableReader,
    module: DeclId,
    fq_name: &str,
) -> Result<Arc<Declaration>, SymbolError> {
    let name_resolver = reader.read_name_table(fq_name)?;
    let type_table = reader.read_type_table(&ScopeRef::Package(Name::new(fq_name)))?;
    Ok(store.register(|id| {
        Declaration::new(
            id,
            Name::new(fq_name),
            Some(module),
            DeclKind::PackageFragment(PackageFragmentData {
                fq_name: Name::new(fq_name),
                name_resolver,
                type_table,
            }),
        )
    }))
}

/// Registers the top-level classes of a package fragment, in record order.
///
/// Either every class is registered or none is.
pub fn load_top_level_classes(
    store: &DeclarationStore,
    reader: &dyn SymbolTableReader,
    fragment: &Declaration,
) -> Result<Vec<DeclId>, SymbolError> {
    let Some(package) = fragment.as_package_fragment() else {
        return Err(SymbolError::MalformedChain {
            reason: format!(
                "top-level classes requested from {} `{}`",
                fragment.kind.label(),
                fragment.name
            ),
        });
    };
    let context = ScopeContext::package(
        fragment.id,
        Arc::clone(&package.name_resolver),
        Arc::clone(&package.type_table),
    );
    let materializer = MemberMaterializer::new(store, context);

    let records = reader.read_fragment_classes(&package.fq_name)?;
    let mut classes = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        let type_table = reader.read_type_table(&ScopeRef::Class {
            fragment: package.fq_name.clone(),
            class: index as u32,
        })?;
        classes.push(materializer.load_class(record, type_table)?);
    }
    debug!(fragment = %package.fq_name, classes = classes.len(), "loaded top-level classes");
    Ok(classes
        .into_iter()
        .map(|class| store.insert(class).id)
        .collect())
}

#[derive(Clone, Debug)]
pub struct LoadedFragment {
    pub id: DeclId,
    pub classes: Vec<DeclId>,
}

/// Everything `load_all` registered.
#[derive(Clone, Debug)]
pub struct LoadedModule {
    pub module: DeclId,
    pub fragments: IndexMap<Name, LoadedFragment>,
}

impl LoadedModule {
    pub fn fragment(&self, fq_name: &str) -> Option<&LoadedFragment> {
        self.fragments.get(fq_name)
    }
}

/// Registers the module, every package fragment and every top-level class.
#[tracing::instrument(level = "info", skip_all, fields(module = %reader.module_name()))]
pub fn load_all(
    store: &DeclarationStore,
    reader: &dyn SymbolTableReader,
) -> Result<LoadedModule, SymbolError> {
    let module = load_module(store, reader);
    let mut fragments = IndexMap::new();
    for fq_name in reader.fragments() {
        let fragment = load_package_fragment(store, reader, module.id, &fq_name)?;
        let classes = load_top_level_classes(store, reader, &fragment)?;
        fragments.insert(
            fq_name,
            LoadedFragment {
                id: fragment.id,
                classes,
            },
        );
    }
    info!(fragments = fragments.len(), declarations = store.len(), "module loaded");
    Ok(LoadedModule {
        module: module.id,
        fragments,
    })
}

/// Follows a dotted member path such as `A.foo` from a package fragment:
/// the first segment names a top-level class, every later one a member of
/// the class reached so far.
///
/// Overloads are not distinguished; the first member with a matching name wins.
pub fn find_member_path(
    store: &DeclarationStore,
    fragment: &LoadedFragment,
    path: &str,
) -> Result<DeclId, SymbolError> {
    let mut candidates = fragment.classes.clone();
    let mut found = fragment.id;
    for segment in path.split('.') {
        found = candidates
            .iter()
            .copied()
            .find(|id| store.get(*id).is_some_and(|declaration| declaration.name == segment))
            .ok_or_else(|| SymbolError::MalformedChain {
                reason: format!("no declaration `{segment}` on path `{path}`"),
            })?;
        let is_class = store
            .get(found)
            .is_some_and(|declaration| declaration.as_class().is_some());
        candidates = if is_class {
            store.class_members(found)?
        } else {
            Vec::new()
        };
    }
    Ok(found)
}
