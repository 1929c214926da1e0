//! Immutable syntax model for mapping documents.
//!
//! Nodes are plain values. Children that get rebuilt on edits are held
//! behind `Arc`, so an edit clones only the spine from the root down to the
//! changed node and shares every untouched subtree with the previous root.
//! Callers never hold references across edits; they hold a path from
//! [`path`] and re-resolve it against the new root.

pub mod locate;
pub mod path;
pub mod render;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use path::{ClassPath, MethodPath, NamespacePath};

/// Prefix of a leading comment that names the mapping source of a class.
pub const MAPPING_SOURCE_PREFIX: &str = "// MappingSource:";

/// Root of a source file: imports followed by top-level members.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilationUnit {
    /// Import directives, in source order.
    #[serde(default)]
    pub usings: Vec<UsingDirective>,
    /// Top-level members, in source order.
    #[serde(default)]
    pub members: Vec<Member>,
}

impl CompilationUnit {
    /// Finds the first class named `name` at any depth, together with the
    /// name of its innermost enclosing namespace.
    #[must_use]
    pub fn find_class(&self, name: &str) -> Option<(Option<&str>, &ClassDecl)> {
        fn walk<'a>(
            members: &'a [Member],
            enclosing: Option<&'a str>,
            name: &str,
        ) -> Option<(Option<&'a str>, &'a ClassDecl)> {
            members.iter().find_map(|member| match member {
                Member::Class(class) if class.name == name => Some((enclosing, class.as_ref())),
                Member::Class(_) => None,
                Member::Namespace(ns) => walk(&ns.members, Some(&ns.name), name),
            })
        }
        walk(&self.members, None, name)
    }
}

/// An import of a namespace (`using System.Linq;`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsingDirective {
    /// Imported namespace name.
    pub name: String,
}

/// A member of a compilation unit or namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Member {
    /// A namespace declaration.
    Namespace(Arc<NamespaceDecl>),
    /// A class declaration.
    Class(Arc<ClassDecl>),
}

/// `namespace <name> { ... }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceDecl {
    /// Dotted namespace name as written.
    pub name: String,
    /// Members in declaration order.
    #[serde(default)]
    pub members: Vec<Member>,
}

/// Declared accessibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// `public`
    Public,
    /// `internal`
    #[default]
    Internal,
    /// `private`
    Private,
}

impl Visibility {
    /// Source keyword for this visibility.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Internal => "internal",
            Self::Private => "private",
        }
    }
}

/// Tag declaring that a class maps values of `source` onto `target`.
///
/// Rendered through the configured capability interface, for example
/// `Services.IDataMapper<Source, Target>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MappingCapability {
    /// Qualified source type name.
    pub source: String,
    /// Qualified target type name.
    pub target: String,
}

impl MappingCapability {
    /// Creates a capability tag for the given type pair.
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self { source: source.into(), target: target.into() }
    }
}

/// `class <name> : <bases> { ... }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDecl {
    /// Declared class name.
    pub name: String,
    /// Declared accessibility.
    #[serde(default)]
    pub visibility: Visibility,
    /// Single-line comments directly above the declaration, verbatim.
    #[serde(default)]
    pub leading_comments: Vec<String>,
    /// Plain base types and interfaces.
    #[serde(default)]
    pub base_types: Vec<String>,
    /// Mapping capabilities this class implements.
    #[serde(default)]
    pub capabilities: Vec<MappingCapability>,
    /// Members in declaration order.
    #[serde(default)]
    pub members: Vec<ClassMember>,
}

impl ClassDecl {
    /// Creates an empty class with the given name and visibility.
    pub fn new(name: impl Into<String>, visibility: Visibility) -> Self {
        Self {
            name: name.into(),
            visibility,
            leading_comments: Vec::new(),
            base_types: Vec::new(),
            capabilities: Vec::new(),
            members: Vec::new(),
        }
    }

    /// Iterates over the methods of this class.
    pub fn methods(&self) -> impl Iterator<Item = &MethodDecl> {
        self.members.iter().filter_map(|m| match m {
            ClassMember::Method(method) => Some(method.as_ref()),
            ClassMember::Property(_) => None,
        })
    }

    /// Iterates over the properties of this class.
    pub fn properties(&self) -> impl Iterator<Item = &PropertyDecl> {
        self.members.iter().filter_map(|m| match m {
            ClassMember::Property(property) => Some(property),
            ClassMember::Method(_) => None,
        })
    }

    /// Returns the type named by a `// MappingSource: <Type>` leading comment.
    #[must_use]
    pub fn mapping_source_from_comments(&self) -> Option<&str> {
        self.leading_comments.iter().find_map(|line| {
            line.trim_start()
                .strip_prefix(MAPPING_SOURCE_PREFIX)
                .map(str::trim)
                .filter(|source| !source.is_empty())
        })
    }
}

/// A member of a class body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassMember {
    /// An auto-property.
    Property(PropertyDecl),
    /// A method.
    Method(Arc<MethodDecl>),
}

/// `<visibility> <type> <name> { get; set; }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDecl {
    /// Property name.
    pub name: String,
    /// Property type as written.
    pub type_name: String,
    /// Declared accessibility.
    #[serde(default)]
    pub visibility: Visibility,
}

/// A method declaration with a statement body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDecl {
    /// Method name.
    pub name: String,
    /// Declared accessibility.
    #[serde(default)]
    pub visibility: Visibility,
    /// Return type as written.
    pub return_type: String,
    /// Parameters in order.
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Statements in order.
    #[serde(default)]
    pub body: Vec<Statement>,
}

impl MethodDecl {
    /// Number of declared parameters.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }

    /// Returns `true` while the body still only signals "not implemented".
    #[must_use]
    pub fn is_stub(&self) -> bool {
        matches!(self.body.as_slice(), [Statement::NotImplemented])
    }
}

/// `<type> <name>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Parameter type as written.
    pub type_name: String,
}

impl Parameter {
    /// Creates a parameter.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self { name: name.into(), type_name: type_name.into() }
    }
}

/// A statement inside a method body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Statement {
    /// Unconditionally signals that the method is not implemented.
    NotImplemented,
    /// `<target> = <value>;`
    Assign {
        /// Assigned location.
        target: String,
        /// Assigned expression.
        value: String,
    },
    /// `return <value>;`
    Return {
        /// Returned expression.
        value: String,
    },
    /// Verbatim statement text.
    Raw {
        /// Source text, without trailing newline.
        text: String,
    },
}
