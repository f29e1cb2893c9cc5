//! C type text filtering and canonicalization.
//!
//! Handles the restricted type grammar found in header field declarations:
//! named types, `const` qualifiers, pointer runs and fixed-size array
//! suffixes. Function-pointer syntax is recognized by the field builder, not
//! here.

use crate::config::GeneratorConfig;

/// Canonicalize raw type text as it appears in a header declaration.
///
/// Strips the library struct prefix (`struct _cef_` or `const struct _cef_`),
/// drops a trailing annotation fragment that begins with the configured
/// delimiter, and normalizes whitespace and pointer spacing. Never fails: a
/// missing prefix or delimiter is a no-op.
pub fn filter_c_type_name(input: &str, config: &GeneratorConfig) -> String {
    let mut text = input.trim();
    let tagged = format!("struct _{}", config.struct_prefix);
    if let Some(rest) = text.strip_prefix("const ") {
        if rest.starts_with(&tagged) {
            // `const struct _cef_x_t` loses the qualifier along with the tag
            text = &rest["struct _".len()..];
        }
    } else if text.starts_with(&tagged) {
        text = &text["struct _".len()..];
    }
    canonicalize(cut_annotation(text, config))
}

/// Drop the trailing annotation fragment, if any.
pub fn cut_annotation<'a>(input: &'a str, config: &GeneratorConfig) -> &'a str {
    if config.annotation_delimiter.is_empty() {
        return input;
    }
    match input.find(&config.annotation_delimiter) {
        Some(i) => &input[..i],
        None => input,
    }
}

/// Remove every `const` qualifier, wherever it appears.
pub fn strip_const(input: &str) -> String {
    rebuild(tokenize(input).into_iter().filter(|t| *t != "const"))
}

/// Drop a trailing declarator name from parameter text.
///
/// `cef_foo_t *self` → `cef_foo_t *`, `int count` → `int`. Multi-word
/// builtin types such as `unsigned int` or `long long` are left intact.
pub fn strip_param_name(input: &str) -> String {
    let tokens = tokenize(input);
    let Some((last, head)) = tokens.split_last() else {
        return String::new();
    };
    let named = match head.last() {
        Some(&"*") => is_identifier(last),
        Some(_) => {
            let words = tokens
                .iter()
                .filter(|t| **t != "*" && !QUALIFIERS.contains(t))
                .count();
            words >= 2 && is_identifier(last) && !BUILTIN_WORDS.contains(last)
        }
        None => false,
    };
    if named {
        rebuild(head.iter().copied())
    } else {
        rebuild(tokens.iter().copied())
    }
}

/// A C type split into its base name and pointer/array suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CTypeParts {
    /// Base type name, e.g. `int` in `int *`.
    pub base: String,
    /// Pointer run or array suffix, e.g. `*`, `**` or `[64]`.
    pub suffix: String,
}

impl CTypeParts {
    /// Split const-stripped type text into base and suffix.
    pub fn split(input: &str) -> Self {
        let text = strip_const(input);
        match text.find(['*', '[']) {
            Some(i) => Self {
                base: text[..i].trim().to_string(),
                suffix: text[i..].chars().filter(|c| !c.is_whitespace()).collect(),
            },
            None => Self {
                base: text,
                suffix: String::new(),
            },
        }
    }

    /// Number of pointer levels in the suffix.
    pub fn pointer_depth(&self) -> usize {
        self.suffix.chars().filter(|c| *c == '*').count()
    }

    pub fn is_value(&self) -> bool {
        self.suffix.is_empty()
    }
}

impl std::fmt::Display for CTypeParts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.suffix.is_empty() {
            write!(f, "{}", self.base)
        } else {
            write!(f, "{} {}", self.base, self.suffix)
        }
    }
}

const QUALIFIERS: &[&str] = &[
    "const", "volatile", "struct", "enum", "union", "unsigned", "signed",
];

const BUILTIN_WORDS: &[&str] = &[
    "char", "short", "int", "long", "float", "double", "void", "_Bool", "bool",
];

fn is_identifier(token: &str) -> bool {
    let mut chars = token.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Split on whitespace, keeping each `*` as its own token.
fn tokenize(s: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    for part in s.split_whitespace() {
        let mut remaining = part;
        while !remaining.is_empty() {
            if let Some(star_pos) = remaining.find('*') {
                if star_pos > 0 {
                    tokens.push(&remaining[..star_pos]);
                }
                tokens.push("*");
                remaining = &remaining[star_pos + 1..];
            } else {
                tokens.push(remaining);
                break;
            }
        }
    }
    tokens
}

/// Join tokens back into canonical spelling: single spaces between words,
/// one space before a pointer run, no space inside it or after it.
fn rebuild<'a>(tokens: impl IntoIterator<Item = &'a str>) -> String {
    let mut out = String::new();
    let mut prev_star = false;
    for tok in tokens {
        if tok == "*" {
            if !prev_star && !out.is_empty() {
                out.push(' ');
            }
            out.push('*');
            prev_star = true;
        } else {
            if !prev_star && !out.is_empty() {
                out.push(' ');
            }
            out.push_str(tok);
            prev_star = false;
        }
    }
    out
}

fn canonicalize(s: &str) -> String {
    rebuild(tokenize(s))
}
