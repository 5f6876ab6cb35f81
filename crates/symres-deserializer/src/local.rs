//! Deserialization of local declarations.

use crate::materializer::MemberMaterializer;
use crate::tower::ContextTower;
use crate::type_deserializer::TypeDeserializer;
use std::sync::Arc;
use symres_metadata::{
    ClassRecord, ConstructorRecord, FunctionRecord, LocalDeclarationRecord, PropertyRecord,
    RecordRef, SymbolTableReader, TypeRef, TypeTable,
};
use symres_model::{DeclId, Declaration, DeclarationStore, ScopeContext, SymbolError, Type};
use tracing::debug;

/// Deserializes records declared directly inside one parent declaration.
///
/// Construction builds the context tower once; every record deserialized
/// afterwards shares it.
pub struct LocalDeclarationDeserializer<'a> {
    store: &'a DeclarationStore,
    tower: ContextTower,
    materializer: MemberMaterializer<'a>,
}

impl<'a> LocalDeclarationDeserializer<'a> {
    /// A deserializer for declarations whose parent is `parent`, whose
    /// ownership chain is read from the store.
    pub fn new(store: &'a DeclarationStore, parent: DeclId) -> Result<Self, SymbolError> {
        let chain = store.ownership_chain(parent)?;
        Self::from_chain(store, &chain)
    }

    /// A deserializer for an explicit chain, module first, parent last.
    pub fn from_chain(
        store: &'a DeclarationStore,
        chain: &[Arc<Declaration>],
    ) -> Result<Self, SymbolError> {
        let tower = ContextTower::build(chain)?;
        let materializer = MemberMaterializer::new(store, tower.context().clone());
        Ok(Self {
            store,
            tower,
            materializer,
        })
    }

    pub fn context(&self) -> &ScopeContext {
        self.tower.context()
    }

    pub fn parent(&self) -> &Arc<Declaration> {
        self.tower.parent()
    }

    /// Deserializes `record` and registers the result in the store.
    ///
    /// A failed record registers nothing.
    pub fn deserialize(&self, record: &LocalDeclarationRecord) -> Result<DeclId, SymbolError> {
        let declaration = match record {
            LocalDeclarationRecord::Class(class) => self.deserialize_class(class)?,
            LocalDeclarationRecord::Function(function) => self.deserialize_function(function)?,
            LocalDeclarationRecord::Constructor(constructor) => {
                self.deserialize_constructor(constructor)?
            }
            LocalDeclarationRecord::Property(property) => self.deserialize_property(property)?,
        };
        debug!(
            decl = %declaration.id,
            name = %declaration.name,
            kind = declaration.kind.label(),
            scope = %self.tower.path(),
            "deserialized local declaration"
        );
        Ok(self.store.insert(declaration).id)
    }

    pub fn deserialize_class(&self, record: &ClassRecord) -> Result<Declaration, SymbolError> {
        let type_table = Arc::new(TypeTable::new(&record.type_table));
        self.materializer
            .load_class(Arc::new(record.clone()), type_table)
    }

    pub fn deserialize_function(&self, record: &FunctionRecord) -> Result<Declaration, SymbolError> {
        self.materializer.load_function(record)
    }

    pub fn deserialize_constructor(
        &self,
        record: &ConstructorRecord,
    ) -> Result<Declaration, SymbolError> {
        self.materializer
            .load_constructor(record, record.is_primary())
    }

    /// A property record flagged `used_as_variable` comes back as a local
    /// variable.
    pub fn deserialize_property(&self, record: &PropertyRecord) -> Result<Declaration, SymbolError> {
        let property = self.materializer.load_property(record)?;
        Ok(if record.used_as_variable {
            MemberMaterializer::property_to_variable(property)
        } else {
            property
        })
    }

    /// Resolves a standalone type reference in the parent's context.
    pub fn deserialize_inline_type(&self, ty: &TypeRef) -> Result<Type, SymbolError> {
        TypeDeserializer::new(self.tower.context())
            .type_ref(ty)
            .map_err(|error| error.at("<inline type>", &self.tower.path()))
    }
}

/// Resolves the local record `target`, declared directly inside the last
/// declaration of `chain`, and registers it.
///
/// `chain` runs from the module down to the target's immediate container.
#[tracing::instrument(level = "debug", skip_all, fields(fragment = %target.fragment, record = target.index))]
pub fn resolve_local(
    store: &DeclarationStore,
    reader: &dyn SymbolTableReader,
    target: &RecordRef,
    chain: &[Arc<Declaration>],
) -> Result<DeclId, SymbolError> {
    let deserializer = LocalDeclarationDeserializer::from_chain(store, chain)?;
    let fragment = &chain[1];
    if fragment.name != target.fragment {
        return Err(SymbolError::MalformedChain {
            reason: format!(
                "record of package `{}` requested under package `{}`",
                target.fragment, fragment.name
            ),
        });
    }
    let record = reader.read_record(target)?;
    deserializer.deserialize(&record)
}
