//! Generator configuration (`[generator]` table of a declaration file).
//!
//! Every key is optional; the defaults describe the CEF C API and the Go
//! host bindings generated for it.

use serde::{Deserialize, Serialize};

use crate::error::{BindError, Result};

/// Library- and host-specific knobs consumed by the filter, the field
/// builder and the emitters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Prefix shared by every library struct name (e.g., "cef_").
    pub struct_prefix: String,
    /// Suffix shared by every library type name (e.g., "_t").
    pub type_suffix: String,
    /// Start of the trailing annotation fragment dropped by the filter.
    pub annotation_delimiter: String,
    /// Field names that collide with host-language keywords.
    pub reserved_words: Vec<String>,
    /// Marker prepended to reserved field names.
    pub escape_prefix: String,
    /// Qualifier for native types in emitted host code (e.g., "C" for `C.int`).
    pub native_package: String,
    /// Prefix of generated trampoline function names.
    pub trampoline_prefix: String,
    /// Calling-convention macro used for trampoline callback parameters.
    pub callback_convention: String,
    /// Base-struct types whose `base` member is never emitted.
    pub skip_base_types: Vec<String>,
    /// Names of the host-side string conversion helpers.
    pub helpers: StringHelpers,
}

/// Host-side helper functions that move string buffers across the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StringHelpers {
    /// Populates a native string buffer from a host string.
    pub set_native_string: String,
    /// Reads a native string buffer into a host string.
    pub native_string_to_host: String,
    /// Reads and releases an owned ("userfree") native string.
    pub userfree_string_to_host: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            struct_prefix: "cef_".to_string(),
            type_suffix: "_t".to_string(),
            annotation_delimiter: "':'".to_string(),
            reserved_words: vec!["range".into(), "select".into(), "type".into()],
            escape_prefix: "_".to_string(),
            native_package: "C".to_string(),
            trampoline_prefix: "gocef_".to_string(),
            callback_convention: "CEF_CALLBACK".to_string(),
            skip_base_types: vec![
                "cef_base_ref_counted_t".into(),
                "cef_base_scoped_t".into(),
            ],
            helpers: StringHelpers::default(),
        }
    }
}

impl Default for StringHelpers {
    fn default() -> Self {
        Self {
            set_native_string: "setCEFStr".to_string(),
            native_string_to_host: "cefstrToString".to_string(),
            userfree_string_to_host: "cefuserfreestrToString".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Parse a configuration from a TOML string and validate it.
    pub fn parse(input: &str) -> Result<Self> {
        let config: GeneratorConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the filter and emitters cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.struct_prefix.is_empty() {
            return Err(BindError::InvalidConfig {
                detail: "struct_prefix must not be empty".to_string(),
            });
        }
        if self.native_package.is_empty() {
            return Err(BindError::InvalidConfig {
                detail: "native_package must not be empty".to_string(),
            });
        }
        if self.reserved_words.iter().any(|w| w.trim().is_empty()) {
            return Err(BindError::InvalidConfig {
                detail: "reserved_words must not contain empty entries".to_string(),
            });
        }
        Ok(())
    }

    /// Whether `name` must be rewritten before it is used as an identifier.
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved_words.iter().any(|w| w == name)
    }

    /// `<native_package>.<name>`, the host spelling of a native identifier.
    pub fn native(&self, name: &str) -> String {
        format!("{}.{name}", self.native_package)
    }

    /// Strip the library prefix and type suffix from a C type name.
    ///
    /// `cef_foo_t` → `foo`. Names without the prefix or suffix are returned
    /// with only the parts that are present removed.
    pub fn short_type_name<'a>(&self, c_name: &'a str) -> &'a str {
        let name = c_name.strip_prefix(&self.struct_prefix).unwrap_or(c_name);
        if self.type_suffix.is_empty() {
            name
        } else {
            name.strip_suffix(&self.type_suffix).unwrap_or(name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_cef() {
        let config = GeneratorConfig::default();
        assert_eq!(config.struct_prefix, "cef_");
        assert!(config.is_reserved("range"));
        assert!(config.is_reserved("select"));
        assert!(config.is_reserved("type"));
        assert!(!config.is_reserved("size"));
        assert_eq!(config.native("int"), "C.int");
    }

    #[test]
    fn parse_partial_table_keeps_defaults() {
        let config = GeneratorConfig::parse(
            r#"
trampoline_prefix = "shim_"

[helpers]
set_native_string = "toNativeStr"
"#,
        )
        .unwrap();
        assert_eq!(config.trampoline_prefix, "shim_");
        assert_eq!(config.helpers.set_native_string, "toNativeStr");
        assert_eq!(config.helpers.native_string_to_host, "cefstrToString");
        assert_eq!(config.struct_prefix, "cef_");
    }

    #[test]
    fn empty_prefix_rejected() {
        let err = GeneratorConfig::parse(r#"struct_prefix = """#).unwrap_err();
        assert!(matches!(err, BindError::InvalidConfig { .. }));
    }

    #[test]
    fn short_type_name_strips_prefix_and_suffix() {
        let config = GeneratorConfig::default();
        assert_eq!(config.short_type_name("cef_foo_t"), "foo");
        assert_eq!(config.short_type_name("cef_string_visitor_t"), "string_visitor");
        assert_eq!(config.short_type_name("other"), "other");
    }
}
