//! Serialized record shapes.
//!
//! Records refer to names through indices into the fragment's string table
//! (`name`) or qualified-name table (`fq_name`, `class_name`), and to types
//! either inline or through an index into the type table of the scope that
//! owns them (`TypeRef::Table`).

use crate::flags::{
    AccessorFlags, ClassFlags, ConstructorFlags, FunctionFlags, PropertyFlags, ValueParameterFlags,
};
use crate::tables::TypeTableProto;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Internal,
    Private,
    Protected,
    #[default]
    Public,
    PrivateToThis,
    Local,
}

impl Visibility {
    /// Whether a member with this visibility is inherited by subclasses.
    pub const fn is_inheritable(self) -> bool {
        !matches!(self, Self::Private | Self::PrivateToThis | Self::Local)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modality {
    #[default]
    Final,
    Open,
    Abstract,
    Sealed,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassKind {
    #[default]
    Class,
    Interface,
    EnumClass,
    EnumEntry,
    AnnotationClass,
    Object,
    CompanionObject,
}

/// Declaration-site variance of a type parameter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variance {
    In,
    Out,
    #[default]
    Invariant,
}

/// Use-site projection of a type argument.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Projection {
    In,
    Out,
    #[default]
    Inv,
    Star,
}

/// A type, either stored inline or by index into the owning type table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeRef {
    Table(u32),
    Inline(Box<TypeProto>),
}

/// What a serialized type is built on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classifier {
    /// Index into the qualified-name table.
    ClassName(u32),
    /// Id of a type parameter declared by an enclosing declaration.
    TypeParameter(u32),
    /// String-table index of a type parameter's name; used when ids are unstable.
    TypeParameterName(u32),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeProto {
    pub classifier: Classifier,
    #[serde(default)]
    pub arguments: Vec<TypeArgumentProto>,
    #[serde(default)]
    pub nullable: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeArgumentProto {
    #[serde(default)]
    pub projection: Projection,
    /// Absent only for star projections.
    #[serde(default)]
    pub ty: Option<TypeRef>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeParameterProto {
    pub id: u32,
    pub name: u32,
    #[serde(default)]
    pub reified: bool,
    #[serde(default)]
    pub variance: Variance,
    #[serde(default)]
    pub upper_bounds: Vec<TypeRef>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    pub class_name: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueParameterRecord {
    #[serde(default)]
    pub flags: ValueParameterFlags,
    pub name: u32,
    pub ty: TypeRef,
    #[serde(default)]
    pub vararg_element_type: Option<TypeRef>,
    #[serde(default)]
    pub annotations: Vec<AnnotationRecord>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessorRecord {
    #[serde(default)]
    pub flags: AccessorFlags,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub modality: Modality,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionRecord {
    #[serde(default)]
    pub flags: FunctionFlags,
    #[serde(default)]
    pub modality: Modality,
    #[serde(default)]
    pub visibility: Visibility,
    pub name: u32,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameterProto>,
    #[serde(default)]
    pub receiver_type: Option<TypeRef>,
    #[serde(default)]
    pub value_parameters: Vec<ValueParameterRecord>,
    pub return_type: TypeRef,
    #[serde(default)]
    pub annotations: Vec<AnnotationRecord>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructorRecord {
    #[serde(default)]
    pub flags: ConstructorFlags,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub value_parameters: Vec<ValueParameterRecord>,
    #[serde(default)]
    pub annotations: Vec<AnnotationRecord>,
}

impl ConstructorRecord {
    /// A constructor is primary unless its record carries `IS_SECONDARY`.
    pub fn is_primary(&self) -> bool {
        !self.flags.contains(ConstructorFlags::IS_SECONDARY)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyRecord {
    #[serde(default)]
    pub flags: PropertyFlags,
    #[serde(default)]
    pub modality: Modality,
    #[serde(default)]
    pub visibility: Visibility,
    pub name: u32,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameterProto>,
    #[serde(default)]
    pub receiver_type: Option<TypeRef>,
    pub return_type: TypeRef,
    #[serde(default)]
    pub getter: Option<AccessorRecord>,
    #[serde(default)]
    pub setter: Option<AccessorRecord>,
    #[serde(default)]
    pub annotations: Vec<AnnotationRecord>,
    /// Set when the property record actually describes a local variable.
    #[serde(default)]
    pub used_as_variable: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRecord {
    #[serde(default)]
    pub flags: ClassFlags,
    #[serde(default)]
    pub kind: ClassKind,
    #[serde(default)]
    pub modality: Modality,
    #[serde(default)]
    pub visibility: Visibility,
    pub fq_name: u32,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameterProto>,
    #[serde(default)]
    pub supertypes: Vec<TypeRef>,
    #[serde(default)]
    pub constructors: Vec<ConstructorRecord>,
    #[serde(default)]
    pub functions: Vec<FunctionRecord>,
    #[serde(default)]
    pub properties: Vec<PropertyRecord>,
    #[serde(default)]
    pub nested_classes: Vec<ClassRecord>,
    /// Types referenced by this class's own members; private to the class.
    #[serde(default)]
    pub type_table: TypeTableProto,
    #[serde(default)]
    pub annotations: Vec<AnnotationRecord>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Class,
    Function,
    Constructor,
    Property,
}

/// The serialized form of one declaration that has no top-level entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocalDeclarationRecord {
    Class(ClassRecord),
    Function(FunctionRecord),
    Constructor(ConstructorRecord),
    Property(PropertyRecord),
}

impl LocalDeclarationRecord {
    pub const fn kind(&self) -> RecordKind {
        match self {
            Self::Class(_) => RecordKind::Class,
            Self::Function(_) => RecordKind::Function,
            Self::Constructor(_) => RecordKind::Constructor,
            Self::Property(_) => RecordKind::Property,
        }
    }

    /// The record's modifier bitset, as stored.
    pub fn modifier_bits(&self) -> u32 {
        match self {
            Self::Class(class) => class.flags.bits(),
            Self::Function(function) => function.flags.bits(),
            Self::Constructor(constructor) => constructor.flags.bits(),
            Self::Property(property) => property.flags.bits(),
        }
    }
}
