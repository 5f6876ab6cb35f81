//! Name and type tables of one package fragment or class.

use crate::error::MetadataError;
use crate::names::{ClassId, Name};
use crate::protos::TypeProto;
use serde::{Deserialize, Serialize};
use symres_common::limits::MAX_QUALIFIED_NAME_DEPTH;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StringTable {
    pub strings: Vec<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualifiedNameKind {
    Class,
    #[default]
    Package,
    /// A class declared inside a function body.
    Local,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualifiedNameProto {
    #[serde(default)]
    pub parent: Option<u32>,
    pub short_name: u32,
    #[serde(default)]
    pub kind: QualifiedNameKind,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QualifiedNameTable {
    pub names: Vec<QualifiedNameProto>,
}

/// Maps compact name references of one package fragment to names and
/// class ids.
#[derive(Debug)]
pub struct NameResolver {
    strings: Vec<Name>,
    qualified_names: Vec<QualifiedNameProto>,
}

impl NameResolver {
    pub fn new(strings: &StringTable, qualified_names: &QualifiedNameTable) -> Self {
        Self {
            strings: strings.strings.iter().map(|s| Name::new(s)).collect(),
            qualified_names: qualified_names.names.clone(),
        }
    }

    /// Check that every index stored in the qualified-name table is in range.
    pub fn validate(&self) -> Result<(), MetadataError> {
        for (index, proto) in self.qualified_names.iter().enumerate() {
            if proto.short_name as usize >= self.strings.len() {
                return Err(MetadataError::corrupt(
                    "qualified name",
                    format!("entry #{index} names missing string #{}", proto.short_name),
                ));
            }
            if let Some(parent) = proto.parent {
                if parent as usize >= self.qualified_names.len() || parent as usize == index {
                    return Err(MetadataError::corrupt(
                        "qualified name",
                        format!("entry #{index} has invalid parent #{parent}"),
                    ));
                }
            }
        }
        Ok(())
    }

    pub fn string(&self, index: u32) -> Result<Name, MetadataError> {
        self.strings
            .get(index as usize)
            .cloned()
            .ok_or(MetadataError::MissingString(index))
    }

    fn qualified(&self, index: u32) -> Result<&QualifiedNameProto, MetadataError> {
        self.qualified_names
            .get(index as usize)
            .ok_or(MetadataError::MissingQualifiedName(index))
    }

    /// Resolve a qualified-name index to the class id it names.
    pub fn class_id(&self, index: u32) -> Result<ClassId, MetadataError> {
        let mut packages = Vec::new();
        let mut classes = Vec::new();
        let mut local = false;
        let mut current = Some(index);
        let mut depth = 0;

        while let Some(id) = current {
            depth += 1;
            if depth > MAX_QUALIFIED_NAME_DEPTH {
                return Err(MetadataError::corrupt(
                    "qualified name",
                    format!("parent links of entry #{index} form a cycle"),
                ));
            }
            let proto = self.qualified(id)?;
            let short_name = self.string(proto.short_name)?;
            match proto.kind {
                QualifiedNameKind::Class => classes.push(short_name),
                QualifiedNameKind::Local => {
                    local = true;
                    classes.push(short_name);
                }
                QualifiedNameKind::Package => packages.push(short_name),
            }
            current = proto.parent;
        }

        if classes.is_empty() {
            return Err(MetadataError::NotAClassName(index));
        }
        packages.reverse();
        classes.reverse();
        Ok(ClassId {
            package: Name::from(join(&packages)),
            relative: Name::from(join(&classes)),
            local,
        })
    }

    pub fn string_count(&self) -> usize {
        self.strings.len()
    }
}

fn join(segments: &[Name]) -> String {
    segments
        .iter()
        .map(Name::as_str)
        .collect::<Vec<_>>()
        .join(".")
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeTableProto {
    #[serde(default)]
    pub types: Vec<TypeProto>,
    /// Entries at or after this index are nullable regardless of their flag.
    #[serde(default)]
    pub first_nullable: Option<u32>,
}

/// The types a package or class refers to by index.
///
/// Classes and packages each own one; every other declaration uses the
/// table of its nearest enclosing class or package.
#[derive(Debug, Default)]
pub struct TypeTable {
    types: Vec<TypeProto>,
}

impl TypeTable {
    pub fn new(proto: &TypeTableProto) -> Self {
        let mut types = proto.types.clone();
        if let Some(first) = proto.first_nullable {
            for ty in types.iter_mut().skip(first as usize) {
                ty.nullable = true;
            }
        }
        Self { types }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, index: u32) -> Result<&TypeProto, MetadataError> {
        self.types
            .get(index as usize)
            .ok_or(MetadataError::MissingType(index))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
#[path = "tests/tables_tests.rs"]
mod tests;
