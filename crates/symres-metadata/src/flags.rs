//! Modifier bitsets carried by records.
//!
//! Each record kind has its own flag set; bits that are meaningless for a
//! kind are simply absent. Dumps spell flags by name (`"IS_VAR | LATEINIT"`).

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct ClassFlags: u32 {
        const INNER = 1 << 0;
        const DATA = 1 << 1;
        const EXTERNAL = 1 << 2;
        const INLINE = 1 << 3;
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct FunctionFlags: u32 {
        const OPERATOR = 1 << 0;
        const INFIX = 1 << 1;
        const INLINE = 1 << 2;
        const TAILREC = 1 << 3;
        const EXTERNAL = 1 << 4;
        const SUSPEND = 1 << 5;
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct ConstructorFlags: u32 {
        /// Absent on the primary constructor.
        const IS_SECONDARY = 1 << 0;
        const HAS_NON_STABLE_PARAMETER_NAMES = 1 << 1;
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct PropertyFlags: u32 {
        const IS_VAR = 1 << 0;
        const HAS_GETTER = 1 << 1;
        const HAS_SETTER = 1 << 2;
        const IS_CONST = 1 << 3;
        const LATEINIT = 1 << 4;
        const HAS_CONSTANT = 1 << 5;
        const IS_DELEGATED = 1 << 6;
        const EXTERNAL = 1 << 7;
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct ValueParameterFlags: u32 {
        const DECLARES_DEFAULT_VALUE = 1 << 0;
        const CROSSINLINE = 1 << 1;
        const NOINLINE = 1 << 2;
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct AccessorFlags: u32 {
        const IS_NOT_DEFAULT = 1 << 0;
        const IS_EXTERNAL = 1 << 1;
        const IS_INLINE = 1 << 2;
    }
}
