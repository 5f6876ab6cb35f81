//! Resolved types.
//!
//! A `Type` is fully resolved: its constructor is either a class id or a
//! reference to a type parameter of a known owner declaration. Types are
//! plain values; sharing happens through the declarations that hold them.

use crate::builtins;
use crate::ids::DeclId;
use rustc_hash::FxHashMap;
use std::fmt;
use symres_metadata::{ClassId, Name, Variance};

/// Reference to the `index`-th type parameter of `owner`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeParameterRef {
    pub owner: DeclId,
    pub index: u32,
    pub name: Name,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeConstructor {
    Class(ClassId),
    Parameter(TypeParameterRef),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeArgument {
    Star,
    Projection { variance: Variance, ty: Type },
}

impl TypeArgument {
    pub fn invariant(ty: Type) -> Self {
        Self::Projection {
            variance: Variance::Invariant,
            ty,
        }
    }

    pub fn ty(&self) -> Option<&Type> {
        match self {
            Self::Star => None,
            Self::Projection { ty, .. } => Some(ty),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Type {
    pub constructor: TypeConstructor,
    pub arguments: Vec<TypeArgument>,
    pub nullable: bool,
}

impl Type {
    pub fn class(class: ClassId) -> Self {
        Self {
            constructor: TypeConstructor::Class(class),
            arguments: Vec::new(),
            nullable: false,
        }
    }

    pub fn parameter(owner: DeclId, index: u32, name: Name) -> Self {
        Self {
            constructor: TypeConstructor::Parameter(TypeParameterRef { owner, index, name }),
            arguments: Vec::new(),
            nullable: false,
        }
    }

    #[must_use]
    pub fn with_arguments(mut self, arguments: Vec<TypeArgument>) -> Self {
        self.arguments = arguments;
        self
    }

    #[must_use]
    pub fn make_nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    #[must_use]
    pub fn make_not_nullable(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn class_id(&self) -> Option<&ClassId> {
        match &self.constructor {
            TypeConstructor::Class(class) => Some(class),
            TypeConstructor::Parameter(_) => None,
        }
    }

    pub fn parameter_ref(&self) -> Option<&TypeParameterRef> {
        match &self.constructor {
            TypeConstructor::Class(_) => None,
            TypeConstructor::Parameter(reference) => Some(reference),
        }
    }

    pub fn is_class(&self, class: &ClassId) -> bool {
        self.class_id() == Some(class)
    }

    pub fn is_nothing(&self) -> bool {
        self.is_class(&builtins::nothing())
    }

    pub fn is_any(&self) -> bool {
        self.is_class(&builtins::any())
    }

    pub fn is_unit(&self) -> bool {
        !self.nullable && self.is_class(&builtins::unit())
    }

    /// Rewrites every type-parameter reference through `f`.
    ///
    /// `f` returns `None` to keep a reference unchanged. A replacement for a
    /// nullable reference is made nullable.
    #[must_use]
    pub fn map_parameters(&self, f: &mut impl FnMut(&TypeParameterRef) -> Option<Type>) -> Type {
        if let TypeConstructor::Parameter(reference) = &self.constructor {
            if let Some(replacement) = f(reference) {
                return if self.nullable {
                    replacement.make_nullable()
                } else {
                    replacement
                };
            }
        }
        Type {
            constructor: self.constructor.clone(),
            arguments: self
                .arguments
                .iter()
                .map(|argument| match argument {
                    TypeArgument::Star => TypeArgument::Star,
                    TypeArgument::Projection { variance, ty } => TypeArgument::Projection {
                        variance: *variance,
                        ty: ty.map_parameters(f),
                    },
                })
                .collect(),
            nullable: self.nullable,
        }
    }

    #[must_use]
    pub fn substitute(&self, substitution: &Substitution) -> Type {
        if substitution.is_empty() {
            return self.clone();
        }
        self.map_parameters(&mut |reference| substitution.get(reference))
    }

    /// True when some type parameter of `owner` occurs in this type.
    pub fn mentions_parameters_of(&self, owner: DeclId) -> bool {
        match &self.constructor {
            TypeConstructor::Parameter(reference) if reference.owner == owner => true,
            _ => self
                .arguments
                .iter()
                .filter_map(TypeArgument::ty)
                .any(|ty| ty.mentions_parameters_of(owner)),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.constructor {
            TypeConstructor::Class(class) => write!(f, "{class}")?,
            TypeConstructor::Parameter(reference) => write!(f, "{}", reference.name)?,
        }
        if !self.arguments.is_empty() {
            f.write_str("<")?;
            for (i, argument) in self.arguments.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                match argument {
                    TypeArgument::Star => f.write_str("*")?,
                    TypeArgument::Projection { variance, ty } => match variance {
                        Variance::In => write!(f, "in {ty}")?,
                        Variance::Out => write!(f, "out {ty}")?,
                        Variance::Invariant => write!(f, "{ty}")?,
                    },
                }
            }
            f.write_str(">")?;
        }
        if self.nullable {
            f.write_str("?")?;
        }
        Ok(())
    }
}

/// Mapping from type-parameter references to replacement types.
#[derive(Clone, Debug, Default)]
pub struct Substitution {
    map: FxHashMap<(DeclId, u32), Type>,
}

impl Substitution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps the type parameters of `class` to the arguments of `supertype`,
    /// which must be a type whose constructor is that class.
    ///
    /// Star projections become `Any?`; parameters without a matching
    /// argument are left alone.
    pub fn for_supertype(class: DeclId, supertype: &Type) -> Self {
        let mut substitution = Self::new();
        for (index, argument) in supertype.arguments.iter().enumerate() {
            let replacement = match argument {
                TypeArgument::Star => builtins::nullable_any_type(),
                TypeArgument::Projection { ty, .. } => ty.clone(),
            };
            substitution.insert(class, index as u32, replacement);
        }
        substitution
    }

    pub fn insert(&mut self, owner: DeclId, index: u32, replacement: Type) {
        self.map.insert((owner, index), replacement);
    }

    pub fn get(&self, reference: &TypeParameterRef) -> Option<Type> {
        self.map.get(&(reference.owner, reference.index)).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Applies `self` to every replacement of `inner`, then adds the
    /// entries of `self` that `inner` does not cover.
    ///
    /// Used to carry a substitution through a chain of supertypes:
    /// `outer.compose(inner)` first applies `inner`, then `outer`.
    #[must_use]
    pub fn compose(&self, inner: &Substitution) -> Substitution {
        let mut map: FxHashMap<(DeclId, u32), Type> = inner
            .map
            .iter()
            .map(|(key, ty)| (*key, ty.substitute(self)))
            .collect();
        for (key, ty) in &self.map {
            map.entry(*key).or_insert_with(|| ty.clone());
        }
        Substitution { map }
    }
}

#[cfg(test)]
#[path = "tests/types_tests.rs"]
mod tests;
