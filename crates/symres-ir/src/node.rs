//! IR node types.

use smallvec::SmallVec;
use symres_common::span::Span;
use symres_model::{ClassId, DeclId, Type};

/// One IR node: what it computes, where it came from and its type.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub span: Span,
    pub ty: Type,
    pub kind: NodeKind,
}

#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    // =========================================================================
    // Values
    // =========================================================================
    /// The `Unit` object.
    UnitValue,

    Const(Constant),

    /// Read of a local variable.
    GetValue(DeclId),

    // =========================================================================
    // Calls
    // =========================================================================
    /// Builtin operation without a declaration of its own.
    PrimitiveCall {
        op: PrimitiveOp,
        arguments: Vec<Node>,
    },

    Call {
        callee: DeclId,
        receiver: Option<Box<Node>>,
        arguments: Vec<Node>,
    },

    /// Call of a property's getter or setter.
    AccessorCall {
        property: DeclId,
        accessor: AccessorKind,
        receiver: Option<Box<Node>>,
        arguments: Vec<Node>,
    },

    /// `this(...)` or `super(...)` at the start of a constructor.
    DelegatingConstructorCall {
        /// The class whose constructor is called.
        class: ClassId,
        /// `DeclId::INVALID` for builtin constructors not in the store.
        constructor: DeclId,
        arguments: Vec<Node>,
    },

    TypeOperator {
        operator: TypeOperator,
        type_operand: Type,
        argument: Box<Node>,
    },

    // =========================================================================
    // Fields
    // =========================================================================
    /// Direct read of a property's backing field.
    GetField {
        property: DeclId,
        receiver: Option<Box<Node>>,
    },

    SetField {
        property: DeclId,
        receiver: Option<Box<Node>>,
        value: Box<Node>,
    },

    // =========================================================================
    // Control flow
    // =========================================================================
    If {
        condition: Box<Node>,
        then_branch: Box<Node>,
        else_branch: Option<Box<Node>>,
    },

    /// Statements evaluated in order; the value is the last statement's.
    Block(Vec<Node>),

    Throw(Box<Node>),

    Try {
        body: Box<Node>,
        catches: Vec<Catch>,
        finally: Option<Box<Node>>,
    },

    // =========================================================================
    // Declarations
    // =========================================================================
    Variable {
        declaration: DeclId,
        initializer: Option<Box<Node>>,
    },

    /// A class declared inside a body, with the bodies of its members.
    Class {
        declaration: DeclId,
        members: Vec<Node>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum Constant {
    Null,
    Boolean(bool),
    Int(i64),
    String(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveOp {
    BooleanNot,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessorKind {
    Getter,
    Setter,
}

impl AccessorKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Getter => "getter",
            Self::Setter => "setter",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeOperator {
    Cast,
    ImplicitCoercionToUnit,
}

/// One `catch` clause.
#[derive(Clone, Debug, PartialEq)]
pub struct Catch {
    pub span: Span,
    /// The local variable bound to the caught value.
    pub parameter: DeclId,
    pub parameter_type: Type,
    pub result: Node,
}

/// Whether `Node::walk` descends into the children of a visited node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Walk {
    Continue,
    SkipChildren,
}

impl Node {
    /// Direct children in evaluation order.
    pub fn children(&self) -> SmallVec<[&Node; 4]> {
        let mut children = SmallVec::new();
        match &self.kind {
            NodeKind::UnitValue | NodeKind::Const(_) | NodeKind::GetValue(_) => {}
            NodeKind::PrimitiveCall { arguments, .. }
            | NodeKind::DelegatingConstructorCall { arguments, .. } => {
                children.extend(arguments.iter());
            }
            NodeKind::Call {
                receiver,
                arguments,
                ..
            }
            | NodeKind::AccessorCall {
                receiver,
                arguments,
                ..
            } => {
                children.extend(receiver.as_deref());
                children.extend(arguments.iter());
            }
            NodeKind::TypeOperator { argument, .. } => children.push(&**argument),
            NodeKind::GetField { receiver, .. } => children.extend(receiver.as_deref()),
            NodeKind::SetField {
                receiver, value, ..
            } => {
                children.extend(receiver.as_deref());
                children.push(&**value);
            }
            NodeKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                children.push(&**condition);
                children.push(&**then_branch);
                children.extend(else_branch.as_deref());
            }
            NodeKind::Block(statements) => children.extend(statements.iter()),
            NodeKind::Throw(argument) => children.push(&**argument),
            NodeKind::Try {
                body,
                catches,
                finally,
            } => {
                children.push(&**body);
                children.extend(catches.iter().map(|catch| &catch.result));
                children.extend(finally.as_deref());
            }
            NodeKind::Variable { initializer, .. } => children.extend(initializer.as_deref()),
            NodeKind::Class { members, .. } => children.extend(members.iter()),
        }
        children
    }

    /// Pre-order traversal; `visit` decides whether to descend.
    pub fn walk(&self, visit: &mut impl FnMut(&Node) -> Walk) {
        if visit(self) == Walk::Continue {
            for child in self.children() {
                child.walk(visit);
            }
        }
    }
}
