//! One-line rendering of declarations for diagnostics and the CLI.

use crate::decl::{DeclKind, Declaration, TypeParameter, ValueParameter};
use std::fmt::Write;

fn type_parameters(out: &mut String, parameters: &[TypeParameter]) {
    if parameters.is_empty() {
        return;
    }
    out.push('<');
    for (i, parameter) in parameters.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        if parameter.reified {
            out.push_str("reified ");
        }
        out.push_str(&parameter.name);
        if let [bound] = parameter.upper_bounds.as_slice() {
            let _ = write!(out, " : {bound}");
        }
    }
    out.push_str("> ");
}

fn value_parameters(out: &mut String, parameters: &[ValueParameter]) {
    out.push('(');
    for (i, parameter) in parameters.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        if parameter.vararg_element_type.is_some() {
            out.push_str("vararg ");
        }
        let _ = write!(out, "{}: {}", parameter.name, parameter.ty);
    }
    out.push(')');
}

/// Renders `declaration` as a short signature, e.g. `fun foo(x: lang/Int): lang/Unit`.
pub fn render_declaration(declaration: &Declaration) -> String {
    let mut out = String::new();
    match &declaration.kind {
        DeclKind::Module => {
            let _ = write!(out, "module <{}>", declaration.name);
        }
        DeclKind::PackageFragment(fragment) => {
            let _ = write!(out, "package {}", fragment.fq_name);
        }
        DeclKind::Class(class) => {
            let _ = write!(out, "class {}", class.class_id);
            let mut parameters = String::new();
            type_parameters(&mut parameters, &class.type_parameters);
            out.push_str(parameters.trim_end());
            if !class.supertypes.is_empty() {
                out.push_str(" : ");
                let supertypes: Vec<String> =
                    class.supertypes.iter().map(ToString::to_string).collect();
                out.push_str(&supertypes.join(", "));
            }
        }
        DeclKind::Function(function) => {
            out.push_str("fun ");
            type_parameters(&mut out, &function.type_parameters);
            if let Some(receiver) = &function.receiver {
                let _ = write!(out, "{receiver}.");
            }
            out.push_str(&declaration.name);
            value_parameters(&mut out, &function.value_parameters);
            let _ = write!(out, ": {}", function.return_type);
        }
        DeclKind::Constructor(constructor) => {
            if !constructor.is_primary {
                out.push_str("secondary ");
            }
            out.push_str("constructor");
            value_parameters(&mut out, &constructor.value_parameters);
            let _ = write!(out, ": {}", constructor.return_type);
        }
        DeclKind::Property(property) => {
            out.push_str(if property.is_var { "var " } else { "val " });
            type_parameters(&mut out, &property.type_parameters);
            if let Some(receiver) = &property.receiver {
                let _ = write!(out, "{receiver}.");
            }
            let _ = write!(out, "{}: {}", declaration.name, property.ty);
        }
        DeclKind::LocalVariable(variable) => {
            out.push_str(if variable.is_var { "var " } else { "val " });
            let _ = write!(out, "{}: {}", declaration.name, variable.ty);
            if variable.is_delegated {
                out.push_str(" by <delegate>");
            }
        }
        DeclKind::TypeParameterHolder(holder) => {
            out.push_str("scope ");
            type_parameters(&mut out, &holder.type_parameters);
            out.push_str(&declaration.name);
        }
    }
    out
}
