//! Type reference resolution against a scope context.

use symres_common::limits::MAX_TYPE_DEPTH;
use symres_metadata::{Classifier, MetadataError, Projection, TypeProto, TypeRef, Variance};
use symres_model::{ScopeContext, SymbolError, Type, TypeArgument};

/// Resolves `TypeRef`s using the context's type table, name resolver and
/// type parameters in scope.
pub struct TypeDeserializer<'a> {
    context: &'a ScopeContext,
}

impl<'a> TypeDeserializer<'a> {
    pub fn new(context: &'a ScopeContext) -> Self {
        Self { context }
    }

    pub fn type_ref(&self, reference: &TypeRef) -> Result<Type, SymbolError> {
        self.resolve_ref(reference, 0)
    }

    pub fn type_proto(&self, proto: &TypeProto) -> Result<Type, SymbolError> {
        self.resolve_proto(proto, 0)
    }

    fn resolve_ref(&self, reference: &TypeRef, depth: u32) -> Result<Type, SymbolError> {
        match reference {
            TypeRef::Table(index) => {
                let proto = self.context.type_table().get(*index)?;
                self.resolve_proto(proto, depth)
            }
            TypeRef::Inline(proto) => self.resolve_proto(proto, depth),
        }
    }

    fn resolve_proto(&self, proto: &TypeProto, depth: u32) -> Result<Type, SymbolError> {
        // Table entries may refer to each other; a cycle shows up as unbounded depth.
        if depth > MAX_TYPE_DEPTH {
            return Err(SymbolError::CorruptTable(MetadataError::corrupt(
                "type",
                format!("type nesting exceeds {MAX_TYPE_DEPTH} levels"),
            )));
        }

        let head = match proto.classifier {
            Classifier::ClassName(index) => {
                Type::class(self.context.name_resolver().class_id(index)?)
            }
            Classifier::TypeParameter(id) => self
                .context
                .type_parameters()
                .get(id)
                .map(|parameter| parameter.as_type())
                .ok_or(SymbolError::UnresolvedTypeReference {
                    index: id,
                    symbol: String::new(),
                    scope: String::new(),
                })?,
            Classifier::TypeParameterName(index) => {
                let name = self.context.name_resolver().string(index)?;
                self.context
                    .type_parameters()
                    .get_by_name(&name)
                    .map(|parameter| parameter.as_type())
                    .ok_or(SymbolError::UnresolvedNameReference {
                        index,
                        symbol: String::new(),
                        scope: String::new(),
                    })?
            }
        };

        let mut arguments = Vec::with_capacity(proto.arguments.len());
        for argument in &proto.arguments {
            let variance = match argument.projection {
                Projection::Star => {
                    arguments.push(TypeArgument::Star);
                    continue;
                }
                Projection::In => Variance::In,
                Projection::Out => Variance::Out,
                Projection::Inv => Variance::Invariant,
            };
            let Some(reference) = &argument.ty else {
                return Err(SymbolError::CorruptTable(MetadataError::corrupt(
                    "type",
                    "projected type argument without a type",
                )));
            };
            arguments.push(TypeArgument::Projection {
                variance,
                ty: self.resolve_ref(reference, depth + 1)?,
            });
        }

        let ty = head.with_arguments(arguments);
        Ok(if proto.nullable { ty.make_nullable() } else { ty })
    }
}

#[cfg(test)]
#[path = "tests/type_deserializer_tests.rs"]
mod tests;
