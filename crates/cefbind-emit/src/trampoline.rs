//! Native-side trampolines for function-pointer fields.
//!
//! A trampoline takes the field's parameters plus a trailing callback of the
//! same signature and forwards the call to it. Registration code installs
//! it as a fixed entry point while the real target is chosen per instance.

use std::fmt;

use cefbind_core::{Field, GeneratorConfig};

/// A C shim function forwarding to a callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trampoline {
    pub name: String,
    /// Filtered C return type; `void` when there is no result.
    pub return_type: String,
    /// Filtered C parameter types, receiver first.
    pub params: Vec<String>,
    /// Calling-convention macro for the callback pointer.
    pub convention: String,
}

/// Build the trampoline for a function-pointer field; `None` for data
/// members.
pub fn emit_trampoline(field: &Field<'_>, config: &GeneratorConfig) -> Option<Trampoline> {
    if !field.is_function_ptr() {
        return None;
    }
    Some(Trampoline {
        name: field.trampoline_name(config),
        return_type: field.c_return_type().to_string(),
        params: field.c_params().to_vec(),
        convention: config.callback_convention.clone(),
    })
}

impl Trampoline {
    fn arg_name(i: usize) -> String {
        if i == 0 {
            "self".to_string()
        } else {
            format!("p{i}")
        }
    }
}

/// `T *` + `name` → `T *name`; `T` + `name` → `T name`.
fn declarator(c_type: &str, name: &str) -> String {
    if c_type.ends_with('*') {
        format!("{c_type}{name}")
    } else {
        format!("{c_type} {name}")
    }
}

impl fmt::Display for Trampoline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut decls: Vec<String> = self
            .params
            .iter()
            .enumerate()
            .map(|(i, p)| declarator(p, &Self::arg_name(i)))
            .collect();
        let callback_params = if self.params.is_empty() {
            "void".to_string()
        } else {
            self.params.join(", ")
        };
        decls.push(format!(
            "{} ({} *callback)({callback_params})",
            self.return_type, self.convention
        ));
        let args = (0..self.params.len())
            .map(Self::arg_name)
            .collect::<Vec<_>>()
            .join(", ");

        write!(f, "{} {}({}) {{ ", self.return_type, self.name, decls.join(", "))?;
        if self.return_type == "void" {
            write!(f, "callback({args}); }}")
        } else {
            write!(f, "return callback({args}); }}")
        }
    }
}
