//! Generation pass over a whole declaration.
//!
//! Builds every field of every struct and emits its fragments. The pass is
//! all-or-nothing: the first error aborts it and nothing is returned.

use serde::Serialize;
use tracing::{debug, info};

use cefbind_core::{BindingDeclaration, Field, Result, StructNameTranslator};

use crate::call::{emit_call, parameter_list};
use crate::context::EmitContext;
use crate::serialize::{from_native, to_native};
use crate::trampoline::emit_trampoline;

/// Rendered source fragments for one field.
///
/// Fragments that do not apply to the field's kind are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldFragments {
    pub name: String,
    pub host_name: String,
    pub function_ptr: bool,
    pub needs_unsafe: bool,
    pub parameter_list: String,
    /// Host return type; empty for `void`.
    pub return_type: String,
    pub call: String,
    pub to_native: String,
    pub from_native: String,
    pub trampoline: String,
}

/// Fragments for every emitted field of one struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructFragments {
    pub name: String,
    pub host_name: String,
    pub class_equivalent: bool,
    pub fields: Vec<FieldFragments>,
    /// Members dropped by the skip rule.
    pub skipped: usize,
}

/// Emit all fragments for one field.
pub fn emit_field(field: &Field<'_>, ctx: &EmitContext<'_>) -> FieldFragments {
    let render = |s: Option<String>| s.unwrap_or_default();
    FieldFragments {
        name: field.raw_name().to_string(),
        host_name: field.host_name().to_string(),
        function_ptr: field.is_function_ptr(),
        needs_unsafe: field.needs_unsafe(),
        parameter_list: parameter_list(field).to_string(),
        return_type: field.host_return_type().to_string(),
        call: render(emit_call(field, ctx).map(|c| c.to_string())),
        to_native: render(to_native(field, ctx).map(|s| s.to_string())),
        from_native: render(from_native(field, ctx).map(|s| s.to_string())),
        trampoline: render(emit_trampoline(field, ctx.config).map(|t| t.to_string())),
    }
}

/// Run the pass with the declaration's default struct-name translator.
pub fn generate(decl: &BindingDeclaration) -> Result<Vec<StructFragments>> {
    generate_with(decl, &decl.naming())
}

/// Run the pass with an injected struct-name translator.
pub fn generate_with(
    decl: &BindingDeclaration,
    naming: &dyn StructNameTranslator,
) -> Result<Vec<StructFragments>> {
    let config = &decl.generator;
    let registry = decl.registry(naming)?;
    let ctx = EmitContext::new(config, &registry);

    let mut out = Vec::with_capacity(decl.structs.len());
    let mut field_count = 0;
    let mut skipped_count = 0;
    for s in &decl.structs {
        let fields = s.build_fields(&registry, config, naming)?;
        let (skipped, kept): (Vec<_>, Vec<_>) = fields.iter().partition(|f| f.skip(config));
        let owner = registry
            .struct_def(&s.name)
            .map(|d| d.host_name.clone())
            .unwrap_or_default();
        debug!(
            name = %s.name,
            host = %owner,
            fields = kept.len(),
            skipped = skipped.len(),
            "emitted struct"
        );
        field_count += kept.len();
        skipped_count += skipped.len();
        out.push(StructFragments {
            name: s.name.clone(),
            host_name: owner,
            class_equivalent: s.class_equivalent,
            fields: kept.into_iter().map(|f| emit_field(f, &ctx)).collect(),
            skipped: skipped.len(),
        });
    }

    info!(
        structs = out.len(),
        enums = registry.enum_count(),
        fields = field_count,
        skipped = skipped_count,
        "generation pass complete"
    );
    Ok(out)
}
