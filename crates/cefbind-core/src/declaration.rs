//! Declaration file parsing.
//!
//! A declaration file lists the structs and enums a header scanner found,
//! together with each struct member's raw C type text:
//!
//! ```toml
//! [generator]
//! struct_prefix = "cef_"
//!
//! [[enums]]
//! name = "cef_log_severity_t"
//!
//! [[structs]]
//! name = "cef_foo_t"
//! class_equivalent = true
//! file = "include/capi/cef_foo_capi.h"
//!
//! [[structs.fields]]
//! name = "get_size"
//! type = "size_t (*)(struct _cef_foo_t *self)"
//! line = 42
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::config::GeneratorConfig;
use crate::error::{BindError, Result};
use crate::field::{Field, Position};
use crate::naming::{PrefixNaming, StructNameTranslator};
use crate::registry::{Registry, StructDef};

/// A complete declaration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BindingDeclaration {
    /// Generator configuration; every key has a default.
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub enums: Vec<EnumDecl>,
    #[serde(default)]
    pub structs: Vec<StructDecl>,
}

/// A known enum type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumDecl {
    pub name: String,
}

/// A struct and its members, in declaration order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructDecl {
    /// Canonical C type name (e.g., "cef_browser_t").
    pub name: String,
    /// Whether the struct uses the ref-counted virtual-table convention.
    #[serde(default, alias = "class-equivalent")]
    pub class_equivalent: bool,
    /// Header the struct was scanned from, for diagnostics.
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
}

/// One member declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDecl {
    pub name: String,
    /// Raw C type text.
    #[serde(rename = "type")]
    pub c_type: String,
    #[serde(default)]
    pub line: u32,
}

impl BindingDeclaration {
    /// Parse a declaration from a TOML string.
    pub fn parse(input: &str) -> Result<Self> {
        let decl: BindingDeclaration = toml::from_str(input)?;
        decl.generator.validate()?;

        let mut seen = HashSet::new();
        for s in &decl.structs {
            if !seen.insert(s.name.as_str()) {
                return Err(BindError::InvalidConfig {
                    detail: format!("struct '{}' declared more than once", s.name),
                });
            }
        }

        Ok(decl)
    }

    /// Parse a declaration from a file path.
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// The default struct-name translator for this declaration's config.
    pub fn naming(&self) -> PrefixNaming {
        PrefixNaming::from_config(&self.generator)
    }

    /// Build the struct and enum registries, rejecting host-name collisions.
    pub fn registry(&self, naming: &dyn StructNameTranslator) -> Result<Registry> {
        let mut registry = Registry::new();
        for s in &self.structs {
            registry.add_struct(StructDef::new(s.name.clone(), s.class_equivalent, naming));
        }
        for e in &self.enums {
            registry.add_enum(e.name.clone());
        }
        registry.check_naming()?;
        Ok(registry)
    }

    /// Look up a struct declaration by C name.
    pub fn struct_decl(&self, name: &str) -> Option<&StructDecl> {
        self.structs.iter().find(|s| s.name == name)
    }
}

impl StructDecl {
    /// Build descriptors for every member. Stops at the first error.
    pub fn build_fields<'a>(
        &self,
        registry: &'a Registry,
        config: &GeneratorConfig,
        naming: &dyn StructNameTranslator,
    ) -> Result<Vec<Field<'a>>> {
        let owner = registry
            .struct_def(&self.name)
            .ok_or_else(|| BindError::UnknownOwner {
                name: self.name.clone(),
            })?;
        let file = self.file.as_deref().unwrap_or("<unknown>");
        self.fields
            .iter()
            .map(|f| {
                Field::new(
                    owner,
                    &f.name,
                    &f.c_type,
                    Position::new(file, f.line),
                    config,
                    naming,
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOO: &str = r#"
[[enums]]
name = "cef_log_severity_t"

[[structs]]
name = "cef_foo_t"
class_equivalent = true
file = "include/capi/cef_foo_capi.h"

[[structs.fields]]
name = "base"
type = "cef_base_ref_counted_t"
line = 10

[[structs.fields]]
name = "get_size"
type = "size_t (*)(struct _cef_foo_t *self)"
line = 12

[[structs]]
name = "cef_rect_t"

[[structs.fields]]
name = "x"
type = "int"
"#;

    #[test]
    fn parse_declaration() {
        let decl = BindingDeclaration::parse(FOO).unwrap();
        assert_eq!(decl.structs.len(), 2);
        assert_eq!(decl.enums.len(), 1);
        assert!(decl.structs[0].class_equivalent);
        assert!(!decl.structs[1].class_equivalent);
        assert_eq!(decl.structs[0].fields[1].c_type, "size_t (*)(struct _cef_foo_t *self)");
        assert_eq!(decl.generator, GeneratorConfig::default());
    }

    #[test]
    fn build_registry_and_fields() {
        let decl = BindingDeclaration::parse(FOO).unwrap();
        let naming = decl.naming();
        let registry = decl.registry(&naming).unwrap();
        assert!(registry.is_enum("cef_log_severity_t"));
        assert!(registry.is_value_struct("cef_rect_t"));

        let foo = decl.struct_decl("cef_foo_t").unwrap();
        let fields = foo.build_fields(&registry, &decl.generator, &naming).unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[1].position().to_string(), "include/capi/cef_foo_capi.h:12");
        assert_eq!(fields[1].owner().host_name, "Foo");
    }

    #[test]
    fn generator_table_overrides_defaults() {
        let decl = BindingDeclaration::parse(
            r#"
[generator]
struct_prefix = "xyz_"

[[structs]]
name = "xyz_point_t"
"#,
        )
        .unwrap();
        let registry = decl.registry(&decl.naming()).unwrap();
        assert_eq!(registry.struct_def("xyz_point_t").unwrap().host_name, "Point");
    }

    #[test]
    fn duplicate_struct_rejected() {
        let err = BindingDeclaration::parse(
            r#"
[[structs]]
name = "cef_foo_t"

[[structs]]
name = "cef_foo_t"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, BindError::InvalidConfig { .. }));
    }

    #[test]
    fn colliding_translation_rejected() {
        let decl = BindingDeclaration::parse(
            r#"
[[structs]]
name = "cef_foo_t"

[[structs]]
name = "cef_foo"
"#,
        )
        .unwrap();
        let err = decl.registry(&decl.naming()).unwrap_err();
        assert!(matches!(err, BindError::NameCollision { .. }));
    }

    #[test]
    fn malformed_field_aborts_struct() {
        let decl = BindingDeclaration::parse(
            r#"
[[structs]]
name = "cef_foo_t"
class_equivalent = true

[[structs.fields]]
name = "ok"
type = "int"

[[structs.fields]]
name = "broken"
type = "void (*)(struct _cef_foo_t *self"
line = 7
"#,
        )
        .unwrap();
        let naming = decl.naming();
        let registry = decl.registry(&naming).unwrap();
        let err = decl.structs[0]
            .build_fields(&registry, &decl.generator, &naming)
            .unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn unknown_owner() {
        let decl = BindingDeclaration::parse(FOO).unwrap();
        let naming = decl.naming();
        let registry = Registry::new();
        let err = decl.structs[0]
            .build_fields(&registry, &decl.generator, &naming)
            .unwrap_err();
        assert!(matches!(err, BindError::UnknownOwner { .. }));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cef.bind.toml");
        std::fs::write(&path, FOO).unwrap();
        let decl = BindingDeclaration::load(&path).unwrap();
        assert_eq!(decl.structs.len(), 2);
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = BindingDeclaration::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, BindError::Io(_)));
    }
}
