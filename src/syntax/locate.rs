//! Find-or-create over namespace, class and method nodes.
//!
//! Every operation takes the current root and returns the root to use from
//! then on. When nothing has to be created the same `Arc` comes back, so
//! callers can tell a no-op from an edit with [`Arc::ptr_eq`].

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use super::path::{ClassPath, MethodPath, NamespacePath};
use super::{
    ClassDecl, ClassMember, CompilationUnit, MappingCapability, Member, MethodDecl, NamespaceDecl,
    Visibility,
};

/// Which branch of a find-or-create step was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Acquired {
    /// An existing node matched and was reused.
    Reused,
    /// No node matched; one was created and inserted.
    Created,
}

/// Result of a find-or-create step: the root to continue with and the
/// address of the node inside it.
#[derive(Debug, Clone)]
pub struct Located<P> {
    /// Root after the step; identical to the input root on [`Acquired::Reused`].
    pub root: Arc<CompilationUnit>,
    /// Address of the found or created node inside `root`.
    pub path: P,
    /// Branch taken.
    pub acquired: Acquired,
}

/// Returns the unit's first top-level namespace, appending a new one named
/// `name` when the unit has none.
///
/// An existing namespace is reused whatever its name, so a unit never ends
/// up with more than one namespace through this call.
#[must_use]
pub fn get_or_create_namespace(root: &Arc<CompilationUnit>, name: &str) -> Located<NamespacePath> {
    if let Some(path) = root.first_namespace() {
        return Located { root: Arc::clone(root), path, acquired: Acquired::Reused };
    }

    debug!(namespace = name, "creating namespace");
    let mut unit = CompilationUnit::clone(root);
    let path = NamespacePath::new(unit.members.len());
    unit.members.push(Member::Namespace(Arc::new(NamespaceDecl {
        name: name.to_string(),
        members: Vec::new(),
    })));
    Located { root: Arc::new(unit), path, acquired: Acquired::Created }
}

/// Returns the class named `class_name` in the given namespace, appending a
/// public class implementing `capability` when there is none.
///
/// Returns `None` when `namespace` does not resolve against `root`.
#[must_use]
pub fn get_or_create_class(
    root: &Arc<CompilationUnit>,
    namespace: NamespacePath,
    class_name: &str,
    capability: &MappingCapability,
) -> Option<Located<ClassPath>> {
    let ns = root.namespace(namespace)?;
    let path = ClassPath { namespace, name: class_name.to_string() };
    if ns.class(class_name).is_some() {
        return Some(Located { root: Arc::clone(root), path, acquired: Acquired::Reused });
    }

    debug!(
        class = class_name,
        source = %capability.source,
        target = %capability.target,
        "creating class"
    );
    let mut class = ClassDecl::new(class_name, Visibility::Public);
    class.capabilities.push(capability.clone());

    let mut ns = NamespaceDecl::clone(ns);
    ns.members.push(Member::Class(Arc::new(class)));
    let root = Arc::new(replace_namespace(root, namespace, ns));
    Some(Located { root, path, acquired: Acquired::Created })
}

/// Looks up a method by name and parameter count. Never creates one.
///
/// Parameter types are not compared: a method with the same name and arity
/// but other parameter types counts as a match.
#[must_use]
pub fn find_method(
    root: &CompilationUnit,
    class: &ClassPath,
    name: &str,
    arity: usize,
) -> Option<MethodPath> {
    root.class(class)?.method(name, arity)?;
    Some(MethodPath { class: class.clone(), name: name.to_string(), arity })
}

/// Appends `method` to the class at `class` and returns the new root with
/// the method's address.
///
/// Returns `None` when `class` does not resolve against `root`.
#[must_use]
pub fn insert_method(
    root: &Arc<CompilationUnit>,
    class: &ClassPath,
    method: MethodDecl,
) -> Option<(Arc<CompilationUnit>, MethodPath)> {
    let ns = root.namespace(class.namespace)?;
    let index = class_index(ns, &class.name)?;
    let Member::Class(existing) = &ns.members[index] else {
        return None;
    };

    let path =
        MethodPath { class: class.clone(), name: method.name.clone(), arity: method.arity() };
    let mut updated = ClassDecl::clone(existing);
    updated.members.push(ClassMember::Method(Arc::new(method)));

    let mut ns = NamespaceDecl::clone(ns);
    ns.members[index] = Member::Class(Arc::new(updated));
    Some((Arc::new(replace_namespace(root, class.namespace, ns)), path))
}

/// Replaces the method at `path` with `method`, keeping its position.
///
/// Returns `None` when `path` does not resolve against `root`.
#[must_use]
pub fn replace_method(
    root: &Arc<CompilationUnit>,
    path: &MethodPath,
    method: MethodDecl,
) -> Option<Arc<CompilationUnit>> {
    let ns = root.namespace(path.class.namespace)?;
    let index = class_index(ns, &path.class.name)?;
    let Member::Class(existing) = &ns.members[index] else {
        return None;
    };
    let slot = existing.members.iter().position(|m| {
        matches!(m, ClassMember::Method(x) if x.name == path.name && x.arity() == path.arity)
    })?;

    let mut updated = ClassDecl::clone(existing);
    updated.members[slot] = ClassMember::Method(Arc::new(method));
    let mut ns = NamespaceDecl::clone(ns);
    ns.members[index] = Member::Class(Arc::new(updated));
    Some(Arc::new(replace_namespace(root, path.class.namespace, ns)))
}

fn class_index(ns: &NamespaceDecl, name: &str) -> Option<usize> {
    ns.members.iter().position(|m| matches!(m, Member::Class(c) if c.name == name))
}

fn replace_namespace(
    root: &CompilationUnit,
    path: NamespacePath,
    ns: NamespaceDecl,
) -> CompilationUnit {
    let mut unit = root.clone();
    unit.members[path.position()] = Member::Namespace(Arc::new(ns));
    unit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{Parameter, Statement, UsingDirective};

    fn capability() -> MappingCapability {
        MappingCapability::new("Legacy.Data.CustomerDto", "App.Models.Customer")
    }

    fn map_method(source: &str) -> MethodDecl {
        MethodDecl {
            name: "Map".into(),
            visibility: Visibility::Public,
            return_type: "App.Models.Customer".into(),
            parameters: vec![
                Parameter::new("source", source),
                Parameter::new("target", "App.Models.Customer"),
            ],
            body: vec![Statement::NotImplemented],
        }
    }

    fn seeded() -> Arc<CompilationUnit> {
        Arc::new(CompilationUnit {
            usings: vec![UsingDirective { name: "System.Linq".into() }],
            members: Vec::new(),
        })
    }

    #[test]
    fn namespace_is_created_once() {
        let root = seeded();
        let first = get_or_create_namespace(&root, "Mapping");
        assert_eq!(first.acquired, Acquired::Created);
        assert_eq!(first.root.namespace(first.path).unwrap().name, "Mapping");
        // The input root is untouched.
        assert!(root.members.is_empty());

        let second = get_or_create_namespace(&first.root, "Mapping");
        assert_eq!(second.acquired, Acquired::Reused);
        assert!(Arc::ptr_eq(&first.root, &second.root));
        assert_eq!(second.path, first.path);
    }

    #[test]
    fn existing_namespace_is_reused_regardless_of_name() {
        let root = get_or_create_namespace(&seeded(), "Other").root;
        let located = get_or_create_namespace(&root, "Mapping");
        assert_eq!(located.acquired, Acquired::Reused);
        assert_eq!(located.root.namespace(located.path).unwrap().name, "Other");
        assert_eq!(located.root.members.len(), 1);
    }

    #[test]
    fn class_is_created_once_with_capability() {
        let ns = get_or_create_namespace(&seeded(), "Mapping");
        let first =
            get_or_create_class(&ns.root, ns.path, "CustomerDto2CustomerMapper", &capability())
                .unwrap();
        assert_eq!(first.acquired, Acquired::Created);

        let class = first.root.class(&first.path).unwrap();
        assert_eq!(class.visibility, Visibility::Public);
        assert_eq!(class.capabilities, vec![capability()]);

        let second =
            get_or_create_class(&first.root, ns.path, "CustomerDto2CustomerMapper", &capability())
                .unwrap();
        assert_eq!(second.acquired, Acquired::Reused);
        assert!(Arc::ptr_eq(&first.root, &second.root));
        let ns_node = second.root.namespace(ns.path).unwrap();
        assert_eq!(ns_node.class_count("CustomerDto2CustomerMapper"), 1);
    }

    #[test]
    fn second_class_call_sees_methods_added_in_between() {
        let ns = get_or_create_namespace(&seeded(), "Mapping");
        let class = get_or_create_class(&ns.root, ns.path, "X2YMapper", &capability()).unwrap();
        let (root, _) = insert_method(&class.root, &class.path, map_method("X")).unwrap();

        let again = get_or_create_class(&root, ns.path, "X2YMapper", &capability()).unwrap();
        assert_eq!(again.acquired, Acquired::Reused);
        assert_eq!(again.root.class(&again.path).unwrap().methods().count(), 1);
    }

    #[test]
    fn class_on_stale_namespace_path_is_rejected() {
        let root = seeded();
        let bogus = NamespacePath::new(3);
        assert!(get_or_create_class(&root, bogus, "X2YMapper", &capability()).is_none());
    }

    #[test]
    fn method_lookup_matches_name_and_arity_only() {
        let ns = get_or_create_namespace(&seeded(), "Mapping");
        let class = get_or_create_class(&ns.root, ns.path, "X2YMapper", &capability()).unwrap();
        assert!(find_method(&class.root, &class.path, "Map", 2).is_none());

        let (root, path) =
            insert_method(&class.root, &class.path, map_method("Other.Type")).unwrap();
        assert_eq!(find_method(&root, &class.path, "Map", 2), Some(path.clone()));
        assert!(find_method(&root, &class.path, "Map", 1).is_none());
        assert!(root.method(&path).unwrap().is_stub());
    }

    #[test]
    fn replace_method_keeps_position_and_shares_siblings() {
        let ns = get_or_create_namespace(&seeded(), "Mapping");
        let class = get_or_create_class(&ns.root, ns.path, "X2YMapper", &capability()).unwrap();
        let (root, path) = insert_method(&class.root, &class.path, map_method("X")).unwrap();

        let mut filled = map_method("X");
        filled.body = vec![Statement::Return { value: "target".into() }];
        let replaced = replace_method(&root, &path, filled).unwrap();

        let method = replaced.method(&path).unwrap();
        assert!(!method.is_stub());
        assert_eq!(replaced.usings, root.usings);
        assert_eq!(replaced.class(&class.path).unwrap().methods().count(), 1);
    }
}
