//! Symbol-table records and readers.
//!
//! A module's symbols are persisted per package fragment: a string table, a
//! qualified-name table, a package-level type table, the top-level class
//! records and the records of local declarations that have no top-level
//! entry. This crate owns the record shapes, the resolved lookup tables
//! (`NameResolver`, `TypeTable`) and the `SymbolTableReader` seam through
//! which the rest of the workspace reads them.
//!
//! The on-disk binary format is versioned and owned elsewhere; the
//! in-memory reader here loads the same records from a JSON dump.

pub mod error;
pub use error::MetadataError;

pub mod flags;
pub use flags::{
    AccessorFlags, ClassFlags, ConstructorFlags, FunctionFlags, PropertyFlags, ValueParameterFlags,
};

pub mod names;
pub use names::{ClassId, Name};

pub mod protos;
pub use protos::{
    AccessorRecord, AnnotationRecord, ClassKind, ClassRecord, Classifier, ConstructorRecord,
    FunctionRecord, LocalDeclarationRecord, Modality, Projection, PropertyRecord, RecordKind,
    TypeArgumentProto, TypeParameterProto, TypeProto, TypeRef, ValueParameterRecord, Variance,
    Visibility,
};

pub mod tables;
pub use tables::{
    NameResolver, QualifiedNameKind, QualifiedNameProto, QualifiedNameTable, StringTable,
    TypeTable, TypeTableProto,
};

pub mod reader;
pub use reader::{
    MemorySymbolTable, PackageFragmentProto, PackageProto, RecordRef, ScopeRef, SymbolTableDump,
    SymbolTableReader,
};
