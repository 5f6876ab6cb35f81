use super::{DiagnosticCategory, DiagnosticMessage};

pub mod diagnostic_codes {
    pub const MALFORMED_CHAIN: u32 = 7001;
    pub const UNRESOLVED_TYPE_REFERENCE: u32 = 7002;
    pub const UNRESOLVED_NAME_REFERENCE: u32 = 7003;
    pub const AMBIGUOUS_LOOKUP: u32 = 7004;
    pub const OVERRIDE_CONFLICT: u32 = 7005;
    pub const CORRUPT_TABLE: u32 = 7006;
    pub const UNKNOWN_DECLARATION: u32 = 7007;
    pub const INCOMPATIBLE_OVERRIDE: u32 = 7008;
}

pub mod diagnostic_messages {
    pub const MALFORMED_CHAIN: &str = "Enclosing declaration chain is malformed: {0}.";
    pub const UNRESOLVED_TYPE_REFERENCE: &str =
        "Type reference #{0} cannot be resolved while deserializing '{1}' in {2}.";
    pub const UNRESOLVED_NAME_REFERENCE: &str =
        "Name reference #{0} cannot be resolved while deserializing '{1}' in {2}.";
    pub const AMBIGUOUS_LOOKUP: &str = "More than one classifier named '{0}' is visible in this scope.";
    pub const OVERRIDE_CONFLICT: &str =
        "Class '{0}' inherits conflicting members '{1}' and '{2}' and must override them.";
    pub const CORRUPT_TABLE: &str = "Symbol table is corrupt: {0}.";
    pub const UNKNOWN_DECLARATION: &str = "Declaration #{0} is not registered.";
    pub const INCOMPATIBLE_OVERRIDE: &str =
        "'{0}' declared in '{1}' clashes with inherited '{2}'.";
}

pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    DiagnosticMessage {
        code: diagnostic_codes::MALFORMED_CHAIN,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::MALFORMED_CHAIN,
    },
    DiagnosticMessage {
        code: diagnostic_codes::UNRESOLVED_TYPE_REFERENCE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::UNRESOLVED_TYPE_REFERENCE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::UNRESOLVED_NAME_REFERENCE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::UNRESOLVED_NAME_REFERENCE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::AMBIGUOUS_LOOKUP,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::AMBIGUOUS_LOOKUP,
    },
    DiagnosticMessage {
        code: diagnostic_codes::OVERRIDE_CONFLICT,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::OVERRIDE_CONFLICT,
    },
    DiagnosticMessage {
        code: diagnostic_codes::CORRUPT_TABLE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::CORRUPT_TABLE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::UNKNOWN_DECLARATION,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::UNKNOWN_DECLARATION,
    },
    DiagnosticMessage {
        code: diagnostic_codes::INCOMPATIBLE_OVERRIDE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::INCOMPATIBLE_OVERRIDE,
    },
];
