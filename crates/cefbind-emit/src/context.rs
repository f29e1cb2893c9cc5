//! Read-only lookup state shared by every emitter.

use cefbind_core::ctype::CTypeParts;
use cefbind_core::{GeneratorConfig, Registry, StructDef};

use crate::ir::Expr;

/// Emission context: configuration plus the struct/enum registries.
///
/// Built once per generation pass and passed by reference to each emitter.
#[derive(Debug, Clone, Copy)]
pub struct EmitContext<'a> {
    pub config: &'a GeneratorConfig,
    pub registry: &'a Registry,
}

impl<'a> EmitContext<'a> {
    pub fn new(config: &'a GeneratorConfig, registry: &'a Registry) -> Self {
        Self { config, registry }
    }

    /// Host spelling of a native C type: `C.int`, `*C.int`, `[64]C.char`.
    pub fn native_type(&self, parts: &CTypeParts) -> String {
        format!("{}{}", parts.suffix, self.config.native(&parts.base))
    }

    /// Argument list for a `toNative` call on a value of struct `def`.
    ///
    /// Plain value structs are converted into a freshly zeroed native literal;
    /// class-equivalent structs produce their own native pointer.
    pub fn to_native_target(&self, def: &StructDef) -> Vec<Expr> {
        if def.class_equivalent {
            Vec::new()
        } else {
            vec![Expr::composite(self.config.native(&def.name)).addr()]
        }
    }
}
