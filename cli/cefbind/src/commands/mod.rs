//! CLI command implementations.

pub mod check;
pub mod emit;
pub mod inspect;

use std::path::Path;

use anyhow::{bail, Context, Result};
use cefbind_core::BindingDeclaration;

/// Load and validate a declaration file.
pub fn load_declaration(path: &Path) -> Result<BindingDeclaration> {
    if !path.is_file() {
        bail!("declaration file not found: {}", path.display());
    }
    BindingDeclaration::load(path).with_context(|| format!("loading {}", path.display()))
}

/// Fail early when `--struct` names a struct the declaration doesn't have.
pub fn require_struct(decl: &BindingDeclaration, name: Option<&str>) -> Result<()> {
    match name {
        Some(name) if decl.struct_decl(name).is_none() => {
            bail!("no struct named '{name}' in declaration")
        }
        _ => Ok(()),
    }
}
