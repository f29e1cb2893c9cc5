//! Identifier conventions: host names for C structs and fields.

use crate::config::GeneratorConfig;

/// Maps a canonical C struct type name to its host-language type name.
///
/// Implementations must be deterministic. The registry checks that the
/// mapping is injective over every registered struct.
pub trait StructNameTranslator {
    fn host_type_name(&self, c_name: &str) -> String;
}

/// Default convention: strip the library prefix and type suffix, then
/// UpperCamelCase the rest (`cef_string_visitor_t` → `StringVisitor`).
#[derive(Debug, Clone)]
pub struct PrefixNaming {
    prefix: String,
    suffix: String,
}

impl PrefixNaming {
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self::new(config.struct_prefix.clone(), config.type_suffix.clone())
    }
}

impl StructNameTranslator for PrefixNaming {
    fn host_type_name(&self, c_name: &str) -> String {
        let name = c_name.strip_prefix(self.prefix.as_str()).unwrap_or(c_name);
        let name = if self.suffix.is_empty() {
            name
        } else {
            name.strip_suffix(self.suffix.as_str()).unwrap_or(name)
        };
        to_camel_case(name)
    }
}

impl<F> StructNameTranslator for F
where
    F: Fn(&str) -> String,
{
    fn host_type_name(&self, c_name: &str) -> String {
        self(c_name)
    }
}

/// Convert snake_case to UpperCamelCase: `get_size` → `GetSize`.
pub fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for word in name.split('_').filter(|w| !w.is_empty()) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// Rewrite a field name that collides with a reserved word.
pub fn escape_reserved(name: &str, config: &GeneratorConfig) -> String {
    if config.is_reserved(name) {
        format!("{}{name}", config.escape_prefix)
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_case() {
        assert_eq!(to_camel_case("get_size"), "GetSize");
        assert_eq!(to_camel_case("url"), "Url");
        assert_eq!(to_camel_case("is_valid_2"), "IsValid2");
        assert_eq!(to_camel_case("_leading"), "Leading");
        assert_eq!(to_camel_case(""), "");
    }

    #[test]
    fn prefix_naming() {
        let naming = PrefixNaming::new("cef_", "_t");
        assert_eq!(naming.host_type_name("cef_foo_t"), "Foo");
        assert_eq!(naming.host_type_name("cef_string_visitor_t"), "StringVisitor");
        assert_eq!(naming.host_type_name("plain"), "Plain");
    }

    #[test]
    fn closures_are_translators() {
        let naming = |c: &str| format!("X{c}");
        assert_eq!(naming.host_type_name("cef_foo_t"), "Xcef_foo_t");
    }

    #[test]
    fn reserved_names_are_escaped() {
        let config = GeneratorConfig::default();
        assert_eq!(escape_reserved("range", &config), "_range");
        assert_eq!(escape_reserved("select", &config), "_select");
        assert_eq!(escape_reserved("type", &config), "_type");
        assert_eq!(escape_reserved("types", &config), "types");
        assert_eq!(escape_reserved("get_size", &config), "get_size");
    }
}
