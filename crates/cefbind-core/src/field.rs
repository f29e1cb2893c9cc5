//! Field descriptors: one declared member of a C struct.
//!
//! A field is either a data member or a function-pointer member. Function
//! pointers carry their parameter lists, both as filtered C type text and
//! as lowered host type text; the two lists are index-aligned.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::GeneratorConfig;
use crate::ctype::{cut_annotation, filter_c_type_name, strip_const, strip_param_name};
use crate::error::{BindError, Result};
use crate::lower::lower_c_type;
use crate::naming::{escape_reserved, to_camel_case, StructNameTranslator};
use crate::registry::StructDef;

/// Marker separating a function pointer's return type from its parameters.
const FUNCTION_POINTER_MARKER: &str = "(*)";

/// Location of a declaration in the scanned headers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub file: String,
    pub line: u32,
}

impl Position {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// A parsed struct member.
#[derive(Debug, Clone, Serialize)]
pub struct Field<'a> {
    owner: &'a StructDef,
    raw_name: String,
    name: String,
    host_name: String,
    c_return_type: String,
    host_return_type: String,
    c_params: Vec<String>,
    host_params: Vec<String>,
    function_ptr: bool,
    needs_unsafe: bool,
    position: Position,
}

impl<'a> Field<'a> {
    /// Build a descriptor from one declaration.
    ///
    /// `type_info` is the raw C type text. A `(*)` marker makes the field a
    /// function pointer: the text before it is the return type and the text
    /// after it must be a single parenthesized parameter list. Anything else
    /// there is a fatal [`BindError::MalformedDeclaration`].
    pub fn new(
        owner: &'a StructDef,
        name: &str,
        type_info: &str,
        position: Position,
        config: &GeneratorConfig,
        naming: &dyn StructNameTranslator,
    ) -> Result<Self> {
        let text = cut_annotation(type_info, config);
        let (return_text, params_text) = match text.find(FUNCTION_POINTER_MARKER) {
            Some(fp) => (&text[..fp], Some(&text[fp + FUNCTION_POINTER_MARKER.len()..])),
            None => (text, None),
        };

        let c_return_type = filter_c_type_name(return_text, config);
        let lowered = lower_c_type(&c_return_type, naming);
        let mut needs_unsafe = lowered.needs_unsafe;

        let mut c_params = Vec::new();
        let mut host_params = Vec::new();
        if let Some(params) = params_text {
            let inner = param_list_interior(params).ok_or_else(|| BindError::MalformedDeclaration {
                raw: type_info.to_string(),
                position: position.clone(),
            })?;
            let inner = inner.trim();
            if !inner.is_empty() && inner != "void" {
                for raw in inner.split(',') {
                    let c_param = strip_param_name(&filter_c_type_name(raw, config));
                    let lowered = lower_c_type(&c_param, naming);
                    needs_unsafe |= lowered.needs_unsafe;
                    c_params.push(c_param);
                    host_params.push(lowered.host);
                }
            }
        }

        let field = Self {
            owner,
            raw_name: name.to_string(),
            name: escape_reserved(name, config),
            host_name: to_camel_case(name),
            c_return_type,
            host_return_type: lowered.host,
            c_params,
            host_params,
            function_ptr: params_text.is_some(),
            needs_unsafe,
            position,
        };
        debug!(
            owner = %owner.name,
            field = %field.raw_name,
            function_ptr = field.function_ptr,
            params = field.c_params.len(),
            "built field"
        );
        Ok(field)
    }

    pub fn owner(&self) -> &'a StructDef {
        self.owner
    }

    /// Name as declared in the header.
    pub fn raw_name(&self) -> &str {
        &self.raw_name
    }

    /// Name with reserved words escaped; used to address the native member.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// UpperCamelCase host identifier.
    pub fn host_name(&self) -> &str {
        &self.host_name
    }

    /// Filtered C type (the return type, for function pointers).
    pub fn c_return_type(&self) -> &str {
        &self.c_return_type
    }

    /// `c_return_type` without `const` qualifiers.
    pub fn c_return_type_unqualified(&self) -> String {
        strip_const(&self.c_return_type)
    }

    /// Lowered host type; empty when the C type is `void`.
    pub fn host_return_type(&self) -> &str {
        &self.host_return_type
    }

    pub fn has_return_value(&self) -> bool {
        !self.host_return_type.is_empty()
    }

    pub fn c_params(&self) -> &[String] {
        &self.c_params
    }

    pub fn host_params(&self) -> &[String] {
        &self.host_params
    }

    /// Index-aligned `(c, host)` parameter pairs.
    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.c_params
            .iter()
            .zip(&self.host_params)
            .map(|(c, h)| (c.as_str(), h.as_str()))
    }

    pub fn is_function_ptr(&self) -> bool {
        self.function_ptr
    }

    pub fn needs_unsafe(&self) -> bool {
        self.needs_unsafe
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Whether parameter 0 is the `self` pointer to the owning struct.
    pub fn has_receiver(&self) -> bool {
        self.host_params
            .first()
            .is_some_and(|p| p.strip_prefix('*') == Some(self.owner.host_name.as_str()))
    }

    /// The ref-counting header embedded in class-equivalent structs.
    pub fn skip(&self, config: &GeneratorConfig) -> bool {
        self.raw_name == "base" && config.skip_base_types.contains(&self.c_return_type)
    }

    /// Name of the native shim that forwards calls through this field.
    pub fn trampoline_name(&self, config: &GeneratorConfig) -> String {
        format!(
            "{}{}_{}",
            config.trampoline_prefix,
            config.short_type_name(&self.owner.name),
            self.raw_name
        )
    }
}

/// Interior of `( ... )` when the text is exactly one balanced pair.
fn param_list_interior(params: &str) -> Option<&str> {
    let inner = params.trim().strip_prefix('(')?.strip_suffix(')')?;
    let mut depth = 0i32;
    for c in inner.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return None;
                }
            }
            _ => {}
        }
    }
    (depth == 0).then_some(inner)
}
