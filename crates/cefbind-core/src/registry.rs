//! Known structs and enums, keyed by canonical C type name.
//!
//! Populated once before any field is built and read-only afterwards.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Serialize;

use crate::error::{BindError, Result};
use crate::naming::StructNameTranslator;

/// A C struct the generator knows about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructDef {
    /// Canonical C type name (e.g., `cef_browser_t`).
    pub name: String,
    /// Host type name produced by the struct-name translator.
    pub host_name: String,
    /// Follows the ref-counted virtual-table convention instead of being a
    /// plain value struct.
    pub class_equivalent: bool,
}

impl StructDef {
    pub fn new(name: impl Into<String>, class_equivalent: bool, naming: &dyn StructNameTranslator) -> Self {
        let name = name.into();
        let host_name = naming.host_type_name(&name);
        Self {
            name,
            host_name,
            class_equivalent,
        }
    }
}

/// Lookup tables for struct- and enum-aware emission.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    structs: BTreeMap<String, StructDef>,
    enums: BTreeSet<String>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a struct. A second definition under the same name replaces
    /// the first.
    pub fn add_struct(&mut self, def: StructDef) {
        self.structs.insert(def.name.clone(), def);
    }

    pub fn add_enum(&mut self, name: impl Into<String>) {
        self.enums.insert(name.into());
    }

    pub fn struct_def(&self, c_name: &str) -> Option<&StructDef> {
        self.structs.get(c_name)
    }

    /// Known struct that is not class-equivalent: converted field-by-field.
    pub fn is_value_struct(&self, c_name: &str) -> bool {
        self.struct_def(c_name).is_some_and(|s| !s.class_equivalent)
    }

    pub fn is_enum(&self, c_name: &str) -> bool {
        self.enums.contains(c_name)
    }

    pub fn structs(&self) -> impl Iterator<Item = &StructDef> {
        self.structs.values()
    }

    pub fn struct_count(&self) -> usize {
        self.structs.len()
    }

    pub fn enum_count(&self) -> usize {
        self.enums.len()
    }

    /// Verify that no two registered structs share a host name.
    pub fn check_naming(&self) -> Result<()> {
        let mut seen: HashMap<&str, &str> = HashMap::new();
        for def in self.structs.values() {
            if let Some(first) = seen.insert(def.host_name.as_str(), def.name.as_str()) {
                return Err(BindError::NameCollision {
                    first: first.to_string(),
                    second: def.name.clone(),
                    host_name: def.host_name.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::PrefixNaming;

    fn naming() -> PrefixNaming {
        PrefixNaming::new("cef_", "_t")
    }

    #[test]
    fn struct_lookup() {
        let mut reg = Registry::new();
        reg.add_struct(StructDef::new("cef_rect_t", false, &naming()));
        reg.add_struct(StructDef::new("cef_browser_t", true, &naming()));
        reg.add_enum("cef_log_severity_t");

        assert_eq!(reg.struct_def("cef_rect_t").unwrap().host_name, "Rect");
        assert!(reg.is_value_struct("cef_rect_t"));
        assert!(!reg.is_value_struct("cef_browser_t"));
        assert!(!reg.is_value_struct("cef_missing_t"));
        assert!(reg.is_enum("cef_log_severity_t"));
        assert!(!reg.is_enum("cef_rect_t"));
        assert_eq!(reg.struct_count(), 2);
        assert_eq!(reg.enum_count(), 1);
    }

    #[test]
    fn distinct_names_pass_naming_check() {
        let mut reg = Registry::new();
        reg.add_struct(StructDef::new("cef_rect_t", false, &naming()));
        reg.add_struct(StructDef::new("cef_point_t", false, &naming()));
        assert!(reg.check_naming().is_ok());
    }

    #[test]
    fn colliding_host_names_rejected() {
        let mut reg = Registry::new();
        reg.add_struct(StructDef::new("cef_rect_t", false, &naming()));
        reg.add_struct(StructDef::new("cef_rect", false, &naming()));
        let err = reg.check_naming().unwrap_err();
        assert!(err.is_fatal());
        match err {
            BindError::NameCollision { host_name, .. } => assert_eq!(host_name, "Rect"),
            other => panic!("expected NameCollision, got {other:?}"),
        }
    }
}
