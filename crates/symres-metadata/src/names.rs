//! Symbolic names produced by the name tables.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// A declaration or package name.
///
/// Names are shared, immutable strings: cloning is a reference-count bump,
/// equality compares contents.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Name(Arc<str>);

impl Name {
    pub fn new(text: &str) -> Self {
        Self(Arc::from(text))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for Name {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Name {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Name {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Name {
    fn from(text: String) -> Self {
        Self(Arc::from(text.into_boxed_str()))
    }
}

impl PartialEq<str> for Name {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for Name {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fully-qualified class identity: package, class path relative to the
/// package, and whether the class is local (declared inside a function).
///
/// Rendered as `pkg.sub/Outer.Inner`.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassId {
    pub package: Name,
    pub relative: Name,
    #[serde(default)]
    pub local: bool,
}

impl ClassId {
    pub fn new(package: &str, relative: &str) -> Self {
        Self {
            package: Name::new(package),
            relative: Name::new(relative),
            local: false,
        }
    }

    pub fn local(package: &str, relative: &str) -> Self {
        Self {
            local: true,
            ..Self::new(package, relative)
        }
    }

    /// The id of a class nested in this one.
    pub fn nested(&self, short_name: &str) -> Self {
        Self {
            package: self.package.clone(),
            relative: Name::from(format!("{}.{short_name}", self.relative)),
            local: self.local,
        }
    }

    /// Last segment of the relative class name.
    pub fn short_name(&self) -> &str {
        self.relative
            .rsplit('.')
            .next()
            .unwrap_or(self.relative.as_str())
    }

    /// The id of the enclosing class, if this class is nested.
    pub fn outer(&self) -> Option<Self> {
        let (outer, _) = self.relative.rsplit_once('.')?;
        Some(Self {
            package: self.package.clone(),
            relative: Name::new(outer),
            local: self.local,
        })
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.package, self.relative)
    }
}

impl fmt::Debug for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.local {
            write!(f, "ClassId(local {self})")
        } else {
            write!(f, "ClassId({self})")
        }
    }
}
