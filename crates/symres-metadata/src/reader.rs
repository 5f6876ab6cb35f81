//! The symbol-table reader seam and its in-memory implementation.

use crate::error::MetadataError;
use crate::names::Name;
use crate::protos::{ClassRecord, LocalDeclarationRecord};
use crate::tables::{NameResolver, QualifiedNameTable, StringTable, TypeTable, TypeTableProto};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::sync::Arc;
use tracing::{debug, trace};

/// Address of a local declaration record inside one package fragment.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordRef {
    pub fragment: Name,
    pub index: u32,
}

impl RecordRef {
    pub fn new(fragment: &str, index: u32) -> Self {
        Self {
            fragment: Name::new(fragment),
            index,
        }
    }
}

/// The owner of a type table: a package fragment or one of its top-level classes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScopeRef {
    Package(Name),
    Class { fragment: Name, class: u32 },
}

/// Read-only access to one module's serialized symbols.
///
/// Implementations must be side-effect free for valid references; every
/// decoding failure is a `MetadataError`, never a default value.
pub trait SymbolTableReader: Send + Sync {
    /// Name of the module the symbol table belongs to.
    fn module_name(&self) -> Name;

    /// Fully-qualified names of the package fragments, in declaration order.
    fn fragments(&self) -> Vec<Name>;

    fn read_record(&self, record: &RecordRef) -> Result<Arc<LocalDeclarationRecord>, MetadataError>;

    fn read_name_table(&self, fragment: &str) -> Result<Arc<NameResolver>, MetadataError>;

    fn read_type_table(&self, scope: &ScopeRef) -> Result<Arc<TypeTable>, MetadataError>;

    /// The top-level class records of a package fragment.
    fn read_fragment_classes(&self, fragment: &str) -> Result<Vec<Arc<ClassRecord>>, MetadataError>;
}

// =============================================================================
// Dump format
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageProto {
    #[serde(default)]
    pub type_table: TypeTableProto,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageFragmentProto {
    pub fq_name: String,
    #[serde(default)]
    pub strings: StringTable,
    #[serde(default)]
    pub qualified_names: QualifiedNameTable,
    #[serde(default)]
    pub package: PackageProto,
    #[serde(default)]
    pub classes: Vec<ClassRecord>,
    #[serde(default)]
    pub local_declarations: Vec<LocalDeclarationRecord>,
}

/// A whole module's symbol table in dump form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolTableDump {
    pub module: String,
    #[serde(default)]
    pub fragments: Vec<PackageFragmentProto>,
}

// =============================================================================
// MemorySymbolTable
// =============================================================================

struct LoadedFragment {
    name_resolver: Arc<NameResolver>,
    type_table: Arc<TypeTable>,
    classes: Vec<Arc<ClassRecord>>,
    class_type_tables: Vec<Arc<TypeTable>>,
    records: Vec<Arc<LocalDeclarationRecord>>,
}

/// A symbol table held in memory, with tables decoded once at load time.
pub struct MemorySymbolTable {
    module: Name,
    fragments: IndexMap<Name, LoadedFragment>,
}

impl MemorySymbolTable {
    pub fn from_dump(dump: SymbolTableDump) -> Result<Self, MetadataError> {
        let mut fragments = IndexMap::with_capacity(dump.fragments.len());
        for fragment in dump.fragments {
            let fq_name = Name::from(fragment.fq_name);
            let name_resolver = NameResolver::new(&fragment.strings, &fragment.qualified_names);
            name_resolver.validate()?;

            let class_type_tables = fragment
                .classes
                .iter()
                .map(|class| Arc::new(TypeTable::new(&class.type_table)))
                .collect();
            let loaded = LoadedFragment {
                name_resolver: Arc::new(name_resolver),
                type_table: Arc::new(TypeTable::new(&fragment.package.type_table)),
                classes: fragment.classes.into_iter().map(Arc::new).collect(),
                class_type_tables,
                records: fragment
                    .local_declarations
                    .into_iter()
                    .map(Arc::new)
                    .collect(),
            };
            trace!(
                fragment = %fq_name,
                classes = loaded.classes.len(),
                records = loaded.records.len(),
                "loaded package fragment"
            );
            if fragments.insert(fq_name.clone(), loaded).is_some() {
                return Err(MetadataError::corrupt(
                    "fragment",
                    format!("package fragment `{fq_name}` appears twice"),
                ));
            }
        }
        debug!(module = %dump.module, fragments = fragments.len(), "symbol table loaded");
        Ok(Self {
            module: Name::from(dump.module),
            fragments,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, MetadataError> {
        let dump: SymbolTableDump = serde_json::from_str(text)?;
        Self::from_dump(dump)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, MetadataError> {
        let dump: SymbolTableDump = serde_json::from_reader(reader)?;
        Self::from_dump(dump)
    }

    fn fragment(&self, fq_name: &str) -> Result<&LoadedFragment, MetadataError> {
        self.fragments
            .get(fq_name)
            .ok_or_else(|| MetadataError::UnknownFragment(Name::new(fq_name)))
    }
}

impl SymbolTableReader for MemorySymbolTable {
    fn module_name(&self) -> Name {
        self.module.clone()
    }

    fn fragments(&self) -> Vec<Name> {
        self.fragments.keys().cloned().collect()
    }

    fn read_record(&self, record: &RecordRef) -> Result<Arc<LocalDeclarationRecord>, MetadataError> {
        let fragment = self.fragment(&record.fragment)?;
        fragment
            .records
            .get(record.index as usize)
            .cloned()
            .ok_or_else(|| MetadataError::UnknownRecord {
                fragment: record.fragment.clone(),
                index: record.index,
            })
    }

    fn read_name_table(&self, fragment: &str) -> Result<Arc<NameResolver>, MetadataError> {
        Ok(self.fragment(fragment)?.name_resolver.clone())
    }

    fn read_type_table(&self, scope: &ScopeRef) -> Result<Arc<TypeTable>, MetadataError> {
        match scope {
            ScopeRef::Package(fq_name) => Ok(self.fragment(fq_name)?.type_table.clone()),
            ScopeRef::Class { fragment, class } => self
                .fragment(fragment)?
                .class_type_tables
                .get(*class as usize)
                .cloned()
                .ok_or_else(|| MetadataError::UnknownClass {
                    fragment: fragment.clone(),
                    index: *class,
                }),
        }
    }

    fn read_fragment_classes(&self, fragment: &str) -> Result<Vec<Arc<ClassRecord>>, MetadataError> {
        Ok(self.fragment(fragment)?.classes.clone())
    }
}
