//! Static C → host type table and string-buffer classification.

/// Host type every CEF string-buffer variant lowers to.
pub const HOST_STRING: &str = "string";

/// Host type for `void *`.
pub const HOST_OPAQUE_POINTER: &str = "unsafe.Pointer";

/// Host type for `char **`.
pub const HOST_STRING_LIST: &str = "[]string";

/// The native string buffer type passed by value or by pointer.
pub const NATIVE_STRING: &str = "cef_string_t";

/// One entry of the primitive mapping table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CMapping {
    pub c: &'static str,
    pub host: &'static str,
}

/// Well-known C type names and their host equivalents.
///
/// Every string-buffer variant maps to the single host string type;
/// ownership differences are handled when conversions are emitted.
pub const C_MAPPINGS: &[CMapping] = &[
    CMapping { c: "cef_string_t", host: HOST_STRING },
    CMapping { c: "cef_string_userfree_t", host: HOST_STRING },
    CMapping { c: "cef_string_userfree_utf8_t", host: HOST_STRING },
    CMapping { c: "cef_string_userfree_utf16_t", host: HOST_STRING },
    CMapping { c: "cef_string_userfree_wide_t", host: HOST_STRING },
    CMapping { c: "cef_string_utf8_t", host: HOST_STRING },
    CMapping { c: "cef_string_utf16_t", host: HOST_STRING },
    CMapping { c: "cef_string_wide_t", host: HOST_STRING },
    CMapping { c: "size_t", host: "uint64" },
    CMapping { c: "int", host: "int32" },
    CMapping { c: "unsigned int", host: "uint32" },
    CMapping { c: "long long", host: "int64" },
    CMapping { c: "unsigned long long", host: "uint64" },
    CMapping { c: "int16", host: "int16" },
    CMapping { c: "uint16", host: "uint16" },
    CMapping { c: "int32", host: "int32" },
    CMapping { c: "uint32", host: "uint32" },
    CMapping { c: "int64", host: "int64" },
    CMapping { c: "uint64", host: "uint64" },
    CMapping { c: "int8_t", host: "int8" },
    CMapping { c: "uint8_t", host: "uint8" },
    CMapping { c: "int16_t", host: "int16" },
    CMapping { c: "uint16_t", host: "uint16" },
    CMapping { c: "int32_t", host: "int32" },
    CMapping { c: "uint32_t", host: "uint32" },
    CMapping { c: "int64_t", host: "int64" },
    CMapping { c: "uint64_t", host: "uint64" },
    CMapping { c: "float", host: "float32" },
    CMapping { c: "double", host: "float64" },
    CMapping { c: "char", host: "byte" },
    CMapping { c: "unsigned char", host: "byte" },
    CMapping { c: "char16", host: "int16" },
    CMapping { c: "wchar_t", host: "int16" },
];

/// Look up the host type for a base C type name.
pub fn lookup(c_base: &str) -> Option<&'static str> {
    C_MAPPINGS.iter().find(|m| m.c == c_base).map(|m| m.host)
}

/// How a C type participates in string conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringKind {
    /// `cef_string_t` held by value.
    Buffer,
    /// `cef_string_t *`.
    BufferPtr,
    /// An owned string whose release is the receiver's job.
    Userfree,
}

/// Classify const-stripped C type text as a string type, if it is one.
pub fn string_kind(c_type: &str) -> Option<StringKind> {
    match c_type {
        "cef_string_t" => Some(StringKind::Buffer),
        "cef_string_t *" => Some(StringKind::BufferPtr),
        t if t.starts_with("cef_string_userfree") && !t.contains('*') => {
            Some(StringKind::Userfree)
        }
        _ => None,
    }
}

/// Whether a base type name is one of the native string-buffer variants.
pub fn is_string_variant(c_base: &str) -> bool {
    c_base.starts_with("cef_string_") && lookup(c_base) == Some(HOST_STRING)
}
