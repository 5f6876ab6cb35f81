//! Member signatures as seen from a subclass, and the override check
//! between two of them.

use crate::relation::TypeRelation;
use symres_model::{DeclId, DeclKind, Declaration, DeclarationStore, Name, Substitution, Type};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Function,
    Property,
}

/// The parts of a member that decide overriding.
///
/// Types are taken after substitution, and references to the member's own
/// type parameters are normalized to an anonymous owner so that two
/// generic members compare by parameter position.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MemberSignature {
    pub kind: MemberKind,
    pub name: Name,
    pub receiver: Option<Type>,
    pub type_parameter_count: usize,
    pub value_parameters: Vec<Type>,
    pub return_type: Type,
    /// Mutability; always false for functions.
    pub is_var: bool,
}

impl MemberSignature {
    /// The signature of `declaration` after `substitution`, or `None` for
    /// declarations that do not take part in overriding.
    pub fn of(declaration: &Declaration, substitution: &Substitution) -> Option<Self> {
        let own = declaration.id;
        let project = |ty: &Type| normalize(&ty.substitute(substitution), own);
        match &declaration.kind {
            DeclKind::Function(function) => Some(Self {
                kind: MemberKind::Function,
                name: declaration.name.clone(),
                receiver: function.receiver.as_ref().map(project),
                type_parameter_count: function.type_parameters.len(),
                value_parameters: function
                    .value_parameters
                    .iter()
                    .map(|parameter| project(&parameter.ty))
                    .collect(),
                return_type: project(&function.return_type),
                is_var: false,
            }),
            DeclKind::Property(property) => Some(Self {
                kind: MemberKind::Property,
                name: declaration.name.clone(),
                receiver: property.receiver.as_ref().map(project),
                type_parameter_count: property.type_parameters.len(),
                value_parameters: Vec::new(),
                return_type: project(&property.ty),
                is_var: property.is_var,
            }),
            _ => None,
        }
    }

    /// True when the two members would clash in one scope: same kind,
    /// receiver, type-parameter count and parameter types. Return type and
    /// mutability are not part of the shape.
    pub fn same_shape(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.name == other.name
            && self.receiver == other.receiver
            && self.type_parameter_count == other.type_parameter_count
            && self.value_parameters == other.value_parameters
    }

    /// Checks whether `self`, a declared member, may override `inherited`.
    pub fn check_override(
        &self,
        inherited: &Self,
        relation: &dyn TypeRelation,
        store: &DeclarationStore,
    ) -> OverrideCompatibility {
        if !self.same_shape(inherited) {
            return OverrideCompatibility::Incompatible;
        }
        if inherited.is_var && !self.is_var {
            return OverrideCompatibility::Conflict(format!(
                "`val {}` cannot override `var {}`",
                self.name, inherited.name
            ));
        }
        let compatible = if inherited.is_var {
            // Setters take the inherited type, so a `var` type is invariant.
            self.return_type == inherited.return_type
        } else {
            relation.is_subtype(store, &self.return_type, &inherited.return_type)
        };
        if compatible {
            OverrideCompatibility::Overridable
        } else {
            OverrideCompatibility::Conflict(format!(
                "type `{}` is not compatible with inherited type `{}`",
                self.return_type, inherited.return_type
            ))
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OverrideCompatibility {
    Overridable,
    /// Same shape, but the override is invalid; carries the reason.
    Conflict(String),
    /// Different shape: the two members are overloads.
    Incompatible,
}

/// Own type parameters lose their owner and name; only the position stays.
fn normalize(ty: &Type, own: DeclId) -> Type {
    ty.map_parameters(&mut |reference| {
        (reference.owner == own).then(|| {
            let name = Name::new(&format!("#{}", reference.index));
            Type::parameter(DeclId::INVALID, reference.index, name)
        })
    })
}

#[cfg(test)]
#[path = "tests/signature_tests.rs"]
mod tests;
