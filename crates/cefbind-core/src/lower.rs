//! Lowering of filtered C types to host-language type text.

use serde::Serialize;
use tracing::trace;

use crate::ctype::{strip_const, CTypeParts};
use crate::mapping::{self, HOST_OPAQUE_POINTER, HOST_STRING_LIST};
use crate::naming::StructNameTranslator;

/// Result of lowering one C type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lowered {
    /// Host type text; empty means "no value" (`void`).
    pub host: String,
    /// The type has no safe host abstraction (opaque or raw memory).
    pub needs_unsafe: bool,
}

impl Lowered {
    fn safe(host: String) -> Self {
        Self {
            host,
            needs_unsafe: false,
        }
    }

    fn raw(host: &str) -> Self {
        Self {
            host: host.to_string(),
            needs_unsafe: true,
        }
    }
}

/// Map a filtered C type to host type text.
///
/// Names that are neither special forms nor in the primitive table are
/// assumed to be generated structs and go through `naming`.
pub fn lower_c_type(c_type: &str, naming: &dyn StructNameTranslator) -> Lowered {
    let c_type = strip_const(c_type);
    match c_type.as_str() {
        "void" => Lowered::safe(String::new()),
        "void *" => Lowered::raw(HOST_OPAQUE_POINTER),
        "void **" => Lowered::raw(&format!("*{HOST_OPAQUE_POINTER}")),
        // element conversion needs raw C allocation
        "char **" => Lowered::raw(HOST_STRING_LIST),
        _ => {
            let parts = CTypeParts::split(&c_type);
            let host = match mapping::lookup(&parts.base) {
                Some(host) => host.to_string(),
                None => {
                    let translated = naming.host_type_name(&parts.base);
                    trace!(c = %parts.base, host = %translated, "lowered as struct reference");
                    translated
                }
            };
            Lowered::safe(format!("{}{host}", parts.suffix))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::{C_MAPPINGS, HOST_STRING};
    use crate::naming::PrefixNaming;
    use proptest::prelude::*;

    fn lower(s: &str) -> Lowered {
        lower_c_type(s, &PrefixNaming::new("cef_", "_t"))
    }

    #[test]
    fn void_is_no_value() {
        let l = lower("void");
        assert_eq!(l.host, "");
        assert!(!l.needs_unsafe);
    }

    #[test]
    fn opaque_pointers_need_unsafe() {
        let l = lower("void *");
        assert_eq!(l.host, "unsafe.Pointer");
        assert!(l.needs_unsafe);

        let l = lower("void **");
        assert_eq!(l.host, "*unsafe.Pointer");
        assert!(l.needs_unsafe);

        assert!(lower("const void *").needs_unsafe);
    }

    #[test]
    fn string_arrays() {
        assert_eq!(lower("char **").host, "[]string");
        assert_eq!(lower("const char **").host, "[]string");
    }

    #[test]
    fn primitives_with_suffix() {
        assert_eq!(lower("size_t").host, "uint64");
        assert_eq!(lower("int *").host, "*int32");
        assert_eq!(lower("double").host, "float64");
        assert_eq!(lower("char [64]").host, "[64]byte");
        assert!(!lower("int *").needs_unsafe);
    }

    #[test]
    fn unknown_names_are_struct_references() {
        assert_eq!(lower("cef_browser_t *").host, "*Browser");
        assert_eq!(lower("cef_browser_t **").host, "**Browser");
        assert_eq!(lower("cef_rect_t").host, "Rect");
        assert_eq!(lower("const cef_rect_t *").host, "*Rect");
    }

    #[test]
    fn injected_translator_is_used() {
        let naming = |c: &str| format!("T_{c}");
        assert_eq!(lower_c_type("cef_rect_t *", &naming).host, "*T_cef_rect_t");
    }

    #[test]
    fn string_variants_are_uniform() {
        for m in C_MAPPINGS.iter().filter(|m| m.c.starts_with("cef_string_")) {
            assert_eq!(lower(m.c).host, HOST_STRING);
            assert_eq!(lower(&format!("const {}", m.c)).host, HOST_STRING);
        }
    }

    proptest! {
        #[test]
        fn const_prefix_does_not_change_lowering(
            base in prop::sample::select(vec![
                "void", "int", "size_t", "char", "double", "cef_string_t",
                "cef_browser_t", "cef_rect_t", "uint32",
            ]),
            stars in 0usize..3,
        ) {
            let plain = if stars == 0 {
                base.to_string()
            } else {
                format!("{base} {}", "*".repeat(stars))
            };
            let qualified = format!("const {plain}");
            prop_assert_eq!(lower(&qualified), lower(&plain));
        }
    }
}
