//! Node addresses that survive structural replacement.
//!
//! A path names a node by position (namespace) or declared identity
//! (class name, method name and arity) rather than pointing at it, so
//! resolving the same path against a freshly rebuilt root finds the
//! rebuilt node instead of a detached copy.

use serde::{Deserialize, Serialize};

use super::{ClassDecl, ClassMember, CompilationUnit, Member, MethodDecl, NamespaceDecl};

/// Address of a top-level namespace by its member position.
///
/// Mapping namespaces are only ever appended to a unit, so the position
/// stays valid for every later root of the same document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamespacePath {
    position: usize,
}

impl NamespacePath {
    pub(crate) fn new(position: usize) -> Self {
        Self { position }
    }

    /// Index of the namespace among the unit's top-level members.
    #[must_use]
    pub fn position(self) -> usize {
        self.position
    }
}

/// Address of a class by declared name inside a namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassPath {
    /// Enclosing namespace.
    pub namespace: NamespacePath,
    /// Declared class name.
    pub name: String,
}

/// Address of a method by declared name and parameter count.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodPath {
    /// Enclosing class.
    pub class: ClassPath,
    /// Declared method name.
    pub name: String,
    /// Parameter count.
    pub arity: usize,
}

impl CompilationUnit {
    /// Position of the first top-level namespace, if any.
    #[must_use]
    pub fn first_namespace(&self) -> Option<NamespacePath> {
        self.members
            .iter()
            .position(|m| matches!(m, Member::Namespace(_)))
            .map(NamespacePath::new)
    }

    /// Resolves a namespace path against this root.
    #[must_use]
    pub fn namespace(&self, path: NamespacePath) -> Option<&NamespaceDecl> {
        match self.members.get(path.position)? {
            Member::Namespace(ns) => Some(ns),
            Member::Class(_) => None,
        }
    }

    /// Resolves a class path against this root.
    #[must_use]
    pub fn class(&self, path: &ClassPath) -> Option<&ClassDecl> {
        self.namespace(path.namespace)?.class(&path.name)
    }

    /// Resolves a method path against this root.
    #[must_use]
    pub fn method(&self, path: &MethodPath) -> Option<&MethodDecl> {
        self.class(&path.class)?.method(&path.name, path.arity)
    }
}

impl NamespaceDecl {
    /// First class declared directly in this namespace with the given name.
    #[must_use]
    pub fn class(&self, name: &str) -> Option<&ClassDecl> {
        self.members.iter().find_map(|m| match m {
            Member::Class(class) if class.name == name => Some(class.as_ref()),
            _ => None,
        })
    }

    /// Number of classes declared directly in this namespace with the given name.
    #[must_use]
    pub fn class_count(&self, name: &str) -> usize {
        self.members.iter().filter(|m| matches!(m, Member::Class(c) if c.name == name)).count()
    }
}

impl ClassDecl {
    /// First method with the given name and parameter count.
    #[must_use]
    pub fn method(&self, name: &str, arity: usize) -> Option<&MethodDecl> {
        self.members.iter().find_map(|m| match m {
            ClassMember::Method(method) if method.name == name && method.arity() == arity => {
                Some(method.as_ref())
            }
            _ => None,
        })
    }
}
