//! Node construction.

use crate::error::IrError;
use crate::node::{AccessorKind, Catch, Constant, Node, NodeKind, PrimitiveOp, TypeOperator};
use symres_common::span::Span;
use symres_model::{ClassId, DeclId, DeclKind, Declaration, PropertyData, Type, builtins};

/// Builds IR nodes positioned at `span()`.
///
/// Every node gets its type from the factory method: callers never pass the
/// result type of control flow or operators, only of casts and blocks.
pub trait NodeFactory {
    fn span(&self) -> Span;

    fn node(&self, ty: Type, kind: NodeKind) -> Node {
        Node {
            span: self.span(),
            ty,
            kind,
        }
    }

    fn unit(&self) -> Node {
        self.node(builtins::unit_type(), NodeKind::UnitValue)
    }

    fn boolean(&self, value: bool) -> Node {
        self.node(builtins::boolean_type(), NodeKind::Const(Constant::Boolean(value)))
    }

    fn int(&self, value: i64) -> Node {
        self.node(
            Type::class(builtins::int()),
            NodeKind::Const(Constant::Int(value)),
        )
    }

    fn string(&self, value: &str) -> Node {
        self.node(
            Type::class(builtins::string()),
            NodeKind::Const(Constant::String(value.to_owned())),
        )
    }

    /// `null` of the given nullable type.
    fn null(&self, ty: Type) -> Node {
        self.node(ty.make_nullable(), NodeKind::Const(Constant::Null))
    }

    /// `if (condition) then_part`, of type `Unit`.
    fn if_then(&self, condition: Node, then_part: Node) -> Node {
        self.node(
            builtins::unit_type(),
            NodeKind::If {
                condition: Box::new(condition),
                then_branch: Box::new(then_part),
                else_branch: None,
            },
        )
    }

    /// `if (condition) then_part else else_part`, typed by the caller.
    fn if_then_else(&self, ty: Type, condition: Node, then_part: Node, else_part: Node) -> Node {
        self.node(
            ty,
            NodeKind::If {
                condition: Box::new(condition),
                then_branch: Box::new(then_part),
                else_branch: Some(Box::new(else_part)),
            },
        )
    }

    /// Boolean negation.
    fn not(&self, argument: Node) -> Node {
        self.node(
            builtins::boolean_type(),
            NodeKind::PrimitiveCall {
                op: PrimitiveOp::BooleanNot,
                arguments: vec![argument],
            },
        )
    }

    /// `throw argument`, of type `Nothing`.
    fn throw(&self, argument: Node) -> Node {
        self.node(builtins::nothing_type(), NodeKind::Throw(Box::new(argument)))
    }

    /// A `catch` clause binding the caught value to `parameter`, which must
    /// be a local variable.
    fn catch(&self, parameter: &Declaration, result: Node) -> Result<Catch, IrError> {
        let DeclKind::LocalVariable(variable) = &parameter.kind else {
            return Err(unexpected(parameter, "a local variable"));
        };
        Ok(Catch {
            span: self.span(),
            parameter: parameter.id,
            parameter_type: variable.ty.clone(),
            result,
        })
    }

    fn try_catch(&self, ty: Type, body: Node, catches: Vec<Catch>, finally: Option<Node>) -> Node {
        self.node(
            ty,
            NodeKind::Try {
                body: Box::new(body),
                catches,
                finally: finally.map(Box::new),
            },
        )
    }

    /// `argument as type_operand`, with result type `ty`.
    fn cast(&self, argument: Node, ty: Type, type_operand: Type) -> Node {
        self.node(
            ty,
            NodeKind::TypeOperator {
                operator: TypeOperator::Cast,
                type_operand,
                argument: Box::new(argument),
            },
        )
    }

    /// Evaluates `argument` for its side effects and yields `Unit`.
    fn implicit_coercion_to_unit(&self, argument: Node) -> Node {
        self.node(
            builtins::unit_type(),
            NodeKind::TypeOperator {
                operator: TypeOperator::ImplicitCoercionToUnit,
                type_operand: builtins::unit_type(),
                argument: Box::new(argument),
            },
        )
    }

    /// Read of a local variable.
    fn get_value(&self, variable: &Declaration) -> Result<Node, IrError> {
        let DeclKind::LocalVariable(data) = &variable.kind else {
            return Err(unexpected(variable, "a local variable"));
        };
        Ok(self.node(data.ty.clone(), NodeKind::GetValue(variable.id)))
    }

    /// Call of a function declaration; the node has the function's return type.
    fn call(
        &self,
        function: &Declaration,
        receiver: Option<Node>,
        arguments: Vec<Node>,
    ) -> Result<Node, IrError> {
        let DeclKind::Function(data) = &function.kind else {
            return Err(unexpected(function, "a function"));
        };
        Ok(self.node(
            data.return_type.clone(),
            NodeKind::Call {
                callee: function.id,
                receiver: receiver.map(Box::new),
                arguments,
            },
        ))
    }

    /// `property` read through its getter.
    fn get(&self, receiver: Option<Node>, property: &Declaration) -> Result<Node, IrError> {
        let data = accessor_of(property, AccessorKind::Getter)?;
        Ok(self.node(
            data.ty.clone(),
            NodeKind::AccessorCall {
                property: property.id,
                accessor: AccessorKind::Getter,
                receiver: receiver.map(Box::new),
                arguments: Vec::new(),
            },
        ))
    }

    /// `property` written through its setter.
    fn set(
        &self,
        receiver: Option<Node>,
        property: &Declaration,
        value: Node,
    ) -> Result<Node, IrError> {
        accessor_of(property, AccessorKind::Setter)?;
        Ok(self.node(
            builtins::unit_type(),
            NodeKind::AccessorCall {
                property: property.id,
                accessor: AccessorKind::Setter,
                receiver: receiver.map(Box::new),
                arguments: vec![value],
            },
        ))
    }

    fn get_field(&self, receiver: Option<Node>, property: &Declaration) -> Result<Node, IrError> {
        let data = property_of(property)?;
        Ok(self.node(
            data.ty.clone(),
            NodeKind::GetField {
                property: property.id,
                receiver: receiver.map(Box::new),
            },
        ))
    }

    fn set_field(
        &self,
        receiver: Option<Node>,
        property: &Declaration,
        value: Node,
    ) -> Result<Node, IrError> {
        property_of(property)?;
        Ok(self.node(
            builtins::unit_type(),
            NodeKind::SetField {
                property: property.id,
                receiver: receiver.map(Box::new),
                value: Box::new(value),
            },
        ))
    }

    /// A block of type `result_type`.
    fn block(&self, statements: Vec<Node>, result_type: Type) -> Node {
        self.node(result_type, NodeKind::Block(statements))
    }

    fn delegating_call(&self, class: ClassId, constructor: DeclId, arguments: Vec<Node>) -> Node {
        self.node(
            builtins::unit_type(),
            NodeKind::DelegatingConstructorCall {
                class,
                constructor,
                arguments,
            },
        )
    }

    fn variable(&self, variable: &Declaration, initializer: Option<Node>) -> Result<Node, IrError> {
        if !matches!(variable.kind, DeclKind::LocalVariable(_)) {
            return Err(unexpected(variable, "a local variable"));
        }
        Ok(self.node(
            builtins::unit_type(),
            NodeKind::Variable {
                declaration: variable.id,
                initializer: initializer.map(Box::new),
            },
        ))
    }

    /// A local class statement together with the bodies of its members.
    fn class(&self, class: &Declaration, members: Vec<Node>) -> Result<Node, IrError> {
        if class.as_class().is_none() {
            return Err(unexpected(class, "a class"));
        }
        Ok(self.node(
            builtins::unit_type(),
            NodeKind::Class {
                declaration: class.id,
                members,
            },
        ))
    }
}

fn unexpected(declaration: &Declaration, expected: &'static str) -> IrError {
    IrError::UnexpectedDeclaration {
        name: declaration.name.clone(),
        expected,
        found: declaration.kind.label(),
    }
}

fn property_of(declaration: &Declaration) -> Result<&PropertyData, IrError> {
    declaration
        .as_property()
        .ok_or_else(|| unexpected(declaration, "a property"))
}

fn accessor_of(declaration: &Declaration, kind: AccessorKind) -> Result<&PropertyData, IrError> {
    let data = property_of(declaration)?;
    let accessor = match kind {
        AccessorKind::Getter => data.getter.as_ref(),
        AccessorKind::Setter => data.setter.as_ref(),
    };
    if accessor.is_none() {
        return Err(IrError::MissingAccessor {
            property: declaration.name.clone(),
            accessor: kind.label(),
        });
    }
    Ok(data)
}

/// The `NodeFactory` of one declaration being lowered.
///
/// Nodes are placed at the builder's current span; `at` repositions it at
/// the element being replaced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IrBuilder {
    owner: DeclId,
    span: Span,
}

impl IrBuilder {
    pub const fn new(owner: DeclId) -> Self {
        Self {
            owner,
            span: Span::UNDEFINED,
        }
    }

    /// The declaration whose body this builder produces nodes for.
    pub const fn owner(&self) -> DeclId {
        self.owner
    }

    #[must_use]
    pub const fn at(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Positioned at `node`'s span.
    #[must_use]
    pub const fn at_node(self, node: &Node) -> Self {
        self.at(node.span)
    }

    /// A block standing in for `expression`: same span, same type.
    pub fn block_replacing(&self, expression: &Node, statements: Vec<Node>) -> Node {
        self.at_node(expression)
            .block(statements, expression.ty.clone())
    }
}

impl NodeFactory for IrBuilder {
    fn span(&self) -> Span {
        self.span
    }
}

#[cfg(test)]
#[path = "tests/factory_tests.rs"]
mod tests;
