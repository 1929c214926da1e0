//! Source text rendering for committed documents.

use std::fmt::Write as _;

use super::{ClassDecl, ClassMember, CompilationUnit, Member, MethodDecl, NamespaceDecl, Statement};

const INDENT: &str = "    ";

/// Rendering knobs that do not live in the syntax tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Interface used to spell a [`MappingCapability`](super::MappingCapability).
    pub capability_interface: String,
}

/// Renders a compilation unit as C#-style source text.
#[must_use]
pub fn render_unit(unit: &CompilationUnit, options: &RenderOptions) -> String {
    let mut out = String::new();
    for using in &unit.usings {
        let _ = writeln!(out, "using {};", using.name);
    }
    for (i, member) in unit.members.iter().enumerate() {
        if i > 0 || !unit.usings.is_empty() {
            out.push('\n');
        }
        render_member(&mut out, member, 0, options);
    }
    out
}

fn render_member(out: &mut String, member: &Member, depth: usize, options: &RenderOptions) {
    match member {
        Member::Namespace(ns) => render_namespace(out, ns, depth, options),
        Member::Class(class) => render_class(out, class, depth, options),
    }
}

fn render_namespace(out: &mut String, ns: &NamespaceDecl, depth: usize, options: &RenderOptions) {
    let pad = INDENT.repeat(depth);
    let _ = writeln!(out, "{pad}namespace {}", ns.name);
    let _ = writeln!(out, "{pad}{{");
    for (i, member) in ns.members.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        render_member(out, member, depth + 1, options);
    }
    let _ = writeln!(out, "{pad}}}");
}

fn render_class(out: &mut String, class: &ClassDecl, depth: usize, options: &RenderOptions) {
    let pad = INDENT.repeat(depth);
    for comment in &class.leading_comments {
        let _ = writeln!(out, "{pad}{}", comment.trim());
    }

    let mut bases: Vec<String> = class.base_types.clone();
    bases.extend(class.capabilities.iter().map(|c| {
        format!("{}<{}, {}>", options.capability_interface, c.source, c.target)
    }));

    let _ = write!(out, "{pad}{} class {}", class.visibility.keyword(), class.name);
    if !bases.is_empty() {
        let _ = write!(out, " : {}", bases.join(", "));
    }
    out.push('\n');
    let _ = writeln!(out, "{pad}{{");

    let inner = INDENT.repeat(depth + 1);
    for (i, member) in class.members.iter().enumerate() {
        match member {
            ClassMember::Property(p) => {
                let _ = writeln!(
                    out,
                    "{inner}{} {} {} {{ get; set; }}",
                    p.visibility.keyword(),
                    p.type_name,
                    p.name
                );
            }
            ClassMember::Method(m) => {
                if i > 0 {
                    out.push('\n');
                }
                render_method(out, m, depth + 1);
            }
        }
    }
    let _ = writeln!(out, "{pad}}}");
}

fn render_method(out: &mut String, method: &MethodDecl, depth: usize) {
    let pad = INDENT.repeat(depth);
    let params: Vec<String> =
        method.parameters.iter().map(|p| format!("{} {}", p.type_name, p.name)).collect();
    let _ = writeln!(
        out,
        "{pad}{} {} {}({})",
        method.visibility.keyword(),
        method.return_type,
        method.name,
        params.join(", ")
    );
    let _ = writeln!(out, "{pad}{{");
    let inner = INDENT.repeat(depth + 1);
    for statement in &method.body {
        let line = match statement {
            Statement::NotImplemented => "throw new NotImplementedException();".to_string(),
            Statement::Assign { target, value } => format!("{target} = {value};"),
            Statement::Return { value } => format!("return {value};"),
            Statement::Raw { text } => text.clone(),
        };
        let _ = writeln!(out, "{inner}{line}");
    }
    let _ = writeln!(out, "{pad}}}");
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::syntax::{MappingCapability, Parameter, PropertyDecl, UsingDirective, Visibility};

    fn options() -> RenderOptions {
        RenderOptions { capability_interface: "Services.IDataMapper".into() }
    }

    #[test]
    fn renders_mapper_file() {
        let method = MethodDecl {
            name: "Map".into(),
            visibility: Visibility::Public,
            return_type: "App.Models.Customer".into(),
            parameters: vec![
                Parameter::new("source", "Legacy.Data.CustomerDto"),
                Parameter::new("target", "App.Models.Customer"),
            ],
            body: vec![Statement::NotImplemented],
        };
        let mut class = ClassDecl::new("CustomerDto2CustomerMapper", Visibility::Public);
        class.capabilities.push(MappingCapability::new(
            "Legacy.Data.CustomerDto",
            "App.Models.Customer",
        ));
        class.members.push(ClassMember::Method(Arc::new(method)));
        let unit = CompilationUnit {
            usings: vec![UsingDirective { name: "System.Linq".into() }],
            members: vec![Member::Namespace(Arc::new(NamespaceDecl {
                name: "Mapping".into(),
                members: vec![Member::Class(Arc::new(class))],
            }))],
        };

        let expected = "\
using System.Linq;

namespace Mapping
{
    public class CustomerDto2CustomerMapper : Services.IDataMapper<Legacy.Data.CustomerDto, App.Models.Customer>
    {
        public App.Models.Customer Map(Legacy.Data.CustomerDto source, App.Models.Customer target)
        {
            throw new NotImplementedException();
        }
    }
}
";
        assert_eq!(render_unit(&unit, &options()), expected);
    }

    #[test]
    fn renders_properties_and_comments() {
        let mut class = ClassDecl::new("Customer", Visibility::Public);
        class.leading_comments.push("// MappingSource: Legacy.Data.CustomerDto".into());
        class.members.push(ClassMember::Property(PropertyDecl {
            name: "Name".into(),
            type_name: "string".into(),
            visibility: Visibility::Public,
        }));
        let unit =
            CompilationUnit { usings: Vec::new(), members: vec![Member::Class(Arc::new(class))] };

        let text = render_unit(&unit, &options());
        assert!(
            text.starts_with("// MappingSource: Legacy.Data.CustomerDto\npublic class Customer\n")
        );
        assert!(text.contains("    public string Name { get; set; }\n"));
    }
}
