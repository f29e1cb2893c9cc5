//! Host-code intermediate representation.
//!
//! Emitters build small expression/statement trees; rendering to Go source
//! text happens only through the `Display` impls here.

use std::fmt;

/// Receiver of every generated host method.
pub const RECEIVER: &str = "d";
/// Local holding a native value inside conversion methods.
pub const NATIVE: &str = "native";
/// Host method converting a value into its native representation.
pub const TO_NATIVE: &str = "toNative";
/// Host method populating a value from its native representation.
pub const FROM_NATIVE: &str = "fromNative";

/// A host-language expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Ident(String),
    /// Literal or pre-rendered operand text (e.g., `0`).
    Lit(String),
    Field(Box<Expr>, String),
    AddrOf(Box<Expr>),
    Deref(Box<Expr>),
    Index(Box<Expr>, Box<Expr>),
    /// Type conversion `T(x)`, or `(T)(x)` when `T` is a pointer/array type.
    Convert { ty: String, value: Box<Expr> },
    Call { func: String, args: Vec<Expr> },
    Method {
        recv: Box<Expr>,
        method: String,
        args: Vec<Expr>,
    },
    /// Zero-valued composite literal `T{}`.
    Composite(String),
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Self {
        Self::Ident(name.into())
    }

    pub fn lit(text: impl Into<String>) -> Self {
        Self::Lit(text.into())
    }

    pub fn convert(ty: impl Into<String>, value: Expr) -> Self {
        Self::Convert {
            ty: ty.into(),
            value: Box::new(value),
        }
    }

    pub fn call(func: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::Call {
            func: func.into(),
            args,
        }
    }

    pub fn composite(ty: impl Into<String>) -> Self {
        Self::Composite(ty.into())
    }

    pub fn field(self, name: impl Into<String>) -> Self {
        Self::Field(Box::new(self), name.into())
    }

    pub fn addr(self) -> Self {
        Self::AddrOf(Box::new(self))
    }

    pub fn deref(self) -> Self {
        Self::Deref(Box::new(self))
    }

    /// Dereference `depth` times.
    pub fn deref_n(self, depth: usize) -> Self {
        (0..depth).fold(self, |e, _| e.deref())
    }

    pub fn index(self, index: Expr) -> Self {
        Self::Index(Box::new(self), Box::new(index))
    }

    pub fn method(self, method: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::Method {
            recv: Box::new(self),
            method: method.into(),
            args,
        }
    }

    fn is_unary(&self) -> bool {
        matches!(self, Self::AddrOf(_) | Self::Deref(_))
    }
}

/// Whether a type must be parenthesized when used as a conversion.
fn needs_parens(ty: &str) -> bool {
    ty.starts_with(['*', '[', '('])
}

fn write_args(f: &mut fmt::Formatter<'_>, args: &[Expr]) -> fmt::Result {
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{arg}")?;
    }
    Ok(())
}

fn write_operand(f: &mut fmt::Formatter<'_>, e: &Expr) -> fmt::Result {
    if e.is_unary() {
        write!(f, "({e})")
    } else {
        write!(f, "{e}")
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ident(name) | Self::Lit(name) => write!(f, "{name}"),
            Self::Field(base, name) => {
                write_operand(f, base)?;
                write!(f, ".{name}")
            }
            Self::AddrOf(e) => write!(f, "&{e}"),
            Self::Deref(e) => write!(f, "*{e}"),
            Self::Index(base, index) => {
                write_operand(f, base)?;
                write!(f, "[{index}]")
            }
            Self::Convert { ty, value } => {
                if needs_parens(ty) {
                    write!(f, "({ty})({value})")
                } else {
                    write!(f, "{ty}({value})")
                }
            }
            Self::Call { func, args } => {
                write!(f, "{func}(")?;
                write_args(f, args)?;
                write!(f, ")")
            }
            Self::Method { recv, method, args } => {
                write_operand(f, recv)?;
                write!(f, ".{method}(")?;
                write_args(f, args)?;
                write!(f, ")")
            }
            Self::Composite(ty) => write!(f, "{ty}{{}}"),
        }
    }
}

/// A host-language statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// `var name T`
    Var { name: String, ty: String },
    /// `name := value`
    Define { name: String, value: Expr },
    /// `target = value`
    Assign { target: Expr, value: Expr },
    Expr(Expr),
    Return(Expr),
    /// `for key, value := range over { body }`
    ForRange {
        key: String,
        value: String,
        over: Expr,
        body: Vec<Stmt>,
    },
}

impl Stmt {
    pub fn var(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self::Var {
            name: name.into(),
            ty: ty.into(),
        }
    }

    pub fn define(name: impl Into<String>, value: Expr) -> Self {
        Self::Define {
            name: name.into(),
            value,
        }
    }

    pub fn assign(target: Expr, value: Expr) -> Self {
        Self::Assign { target, value }
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Var { name, ty } => write!(f, "var {name} {ty}"),
            Self::Define { name, value } => write!(f, "{name} := {value}"),
            Self::Assign { target, value } => write!(f, "{target} = {value}"),
            Self::Expr(e) => write!(f, "{e}"),
            Self::Return(e) => write!(f, "return {e}"),
            Self::ForRange {
                key,
                value,
                over,
                body,
            } => {
                writeln!(f, "for {key}, {value} := range {over} {{")?;
                for stmt in body {
                    for line in stmt.to_string().lines() {
                        writeln!(f, "\t{line}")?;
                    }
                }
                write!(f, "}}")
            }
        }
    }
}

/// Render statements one per line.
pub fn render_block(stmts: &[Stmt]) -> String {
    stmts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// One entry of a host function signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDecl {
    pub name: String,
    /// Omitted when the next parameter shares the same type.
    pub ty: Option<String>,
}

/// A host function parameter list (without the receiver).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamList(pub Vec<ParamDecl>);

impl ParamList {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for ParamList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, p) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", p.name)?;
            if let Some(ty) = &p.ty {
                write!(f, " {ty}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions() {
        assert_eq!(Expr::convert("uint64", Expr::ident("x")).to_string(), "uint64(x)");
        assert_eq!(Expr::convert("*C.int", Expr::ident("p1")).to_string(), "(*C.int)(p1)");
        assert_eq!(
            Expr::convert("[1<<30 - 1]*C.char", Expr::ident("cp1")).to_string(),
            "([1<<30 - 1]*C.char)(cp1)"
        );
    }

    #[test]
    fn method_on_dereference_is_parenthesized() {
        let e = Expr::ident("p1")
            .deref()
            .method(TO_NATIVE, vec![Expr::composite("C.cef_rect_t").addr()]);
        assert_eq!(e.to_string(), "(*p1).toNative(&C.cef_rect_t{})");
    }

    #[test]
    fn dereference_of_method_is_not() {
        let e = Expr::ident("p1").method(TO_NATIVE, vec![]).deref();
        assert_eq!(e.to_string(), "*p1.toNative()");
    }

    #[test]
    fn field_and_index() {
        let e = Expr::ident(NATIVE).field("width").addr();
        assert_eq!(e.to_string(), "&native.width");
        let e = Expr::ident("tp1").index(Expr::ident("i"));
        assert_eq!(e.to_string(), "tp1[i]");
    }

    #[test]
    fn statements() {
        assert_eq!(Stmt::var("s1", "C.cef_string_t").to_string(), "var s1 C.cef_string_t");
        assert_eq!(
            Stmt::define("e1", Expr::convert("C.cef_color_type_t", Expr::ident("p1").deref()))
                .to_string(),
            "e1 := C.cef_color_type_t(*p1)"
        );
        assert_eq!(
            Stmt::Return(Expr::call("cefstrToString", vec![Expr::ident("x")])).to_string(),
            "return cefstrToString(x)"
        );
    }

    #[test]
    fn for_range_indents_body() {
        let stmt = Stmt::ForRange {
            key: "i".into(),
            value: "one".into(),
            over: Expr::ident("p1"),
            body: vec![Stmt::assign(
                Expr::ident("tp1").index(Expr::ident("i")),
                Expr::call("C.CString", vec![Expr::ident("one")]),
            )],
        };
        assert_eq!(
            stmt.to_string(),
            "for i, one := range p1 {\n\ttp1[i] = C.CString(one)\n}"
        );
    }

    #[test]
    fn param_list_rendering() {
        let list = ParamList(vec![
            ParamDecl { name: "p1".into(), ty: None },
            ParamDecl { name: "p2".into(), ty: Some("int32".into()) },
            ParamDecl { name: "p3".into(), ty: Some("string".into()) },
        ]);
        assert_eq!(list.to_string(), "p1, p2 int32, p3 string");
        assert_eq!(ParamList::default().to_string(), "");
    }
}
