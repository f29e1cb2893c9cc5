//! Host → native call adaptation for function-pointer fields.
//!
//! For each function-pointer member, emits the host method's parameter list
//! and a body that converts every argument, invokes the native trampoline
//! with the field's function pointer as trailing argument, and unwraps the
//! result into the host return type.

use cefbind_core::ctype::CTypeParts;
use cefbind_core::mapping::{string_kind, StringKind, NATIVE_STRING};
use cefbind_core::Field;

use crate::context::EmitContext;
use crate::ir::{
    render_block, Expr, ParamDecl, ParamList, Stmt, FROM_NATIVE, NATIVE, RECEIVER, TO_NATIVE,
};

/// Emitted body of a host method wrapping a function-pointer field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallAdaptation {
    /// Argument preparation statements.
    pub prelude: Vec<Stmt>,
    /// The native call expression.
    pub call: Expr,
    /// Call statement and result unwrapping.
    pub body: Vec<Stmt>,
}

impl std::fmt::Display for CallAdaptation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut stmts = self.prelude.clone();
        stmts.extend(self.body.iter().cloned());
        write!(f, "{}", render_block(&stmts))
    }
}

/// Host parameter numbers, index-aligned with the field's parameters.
///
/// The receiver gets none; the rest are numbered from 1 in order and named
/// `p<n>` in the host signature.
fn param_slots(field: &Field<'_>) -> Vec<Option<usize>> {
    let skip_receiver = field.has_receiver();
    let mut count = 0;
    (0..field.host_params().len())
        .map(|i| {
            if i == 0 && skip_receiver {
                None
            } else {
                count += 1;
                Some(count)
            }
        })
        .collect()
}

/// Host signature parameters for a function-pointer field.
///
/// Adjacent parameters of identical type share one annotation: only the
/// last parameter of such a run carries its type. Data members and
/// receiver-only functions yield an empty list.
pub fn parameter_list(field: &Field<'_>) -> ParamList {
    if !field.is_function_ptr() {
        return ParamList::default();
    }
    let host = field.host_params();
    let decls = host
        .iter()
        .zip(param_slots(field))
        .enumerate()
        .filter_map(|(i, (ty, slot))| {
            let slot = slot?;
            let last_of_run = i + 1 == host.len() || host[i + 1] != *ty;
            Some(ParamDecl {
                name: format!("p{slot}"),
                ty: last_of_run.then(|| ty.clone()),
            })
        })
        .collect();
    ParamList(decls)
}

/// Build the call adaptation for a function-pointer field.
///
/// Returns `None` for data members.
pub fn emit_call(field: &Field<'_>, ctx: &EmitContext<'_>) -> Option<CallAdaptation> {
    if !field.is_function_ptr() {
        return None;
    }
    let config = ctx.config;
    let mut prelude = Vec::new();
    let mut args = Vec::with_capacity(field.c_params().len() + 1);

    for (c_param, slot) in field.c_params().iter().zip(param_slots(field)) {
        let arg = match slot {
            Some(slot) => adapt_argument(slot, &CTypeParts::split(c_param), ctx, &mut prelude),
            None => Expr::ident(RECEIVER).method(TO_NATIVE, Vec::new()),
        };
        args.push(arg);
    }
    args.push(Expr::ident(RECEIVER).field(field.name()));

    let call = Expr::call(config.native(&field.trampoline_name(config)), args);
    let body = unwrap_result(field, call.clone(), ctx);
    Some(CallAdaptation {
        prelude,
        call,
        body,
    })
}

/// Convert one host argument, pushing any preparation onto `prelude`.
///
/// `slot` numbers the parameter (`p1`) and its temporaries (`s1`, `pd1`,
/// `cp1`, `e1`).
fn adapt_argument(
    slot: usize,
    parts: &CTypeParts,
    ctx: &EmitContext<'_>,
    prelude: &mut Vec<Stmt>,
) -> Expr {
    let config = ctx.config;
    let value = Expr::ident(format!("p{slot}"));
    let depth = parts.pointer_depth();

    if parts.base == "void" {
        return value;
    }

    if parts.base == NATIVE_STRING && depth <= 1 {
        let buffer = format!("s{slot}");
        prelude.push(Stmt::var(&buffer, config.native(NATIVE_STRING)));
        prelude.push(Stmt::Expr(Expr::call(
            &config.helpers.set_native_string,
            vec![value.deref_n(depth), Expr::ident(&buffer).addr()],
        )));
        return Expr::ident(buffer).addr();
    }

    if parts.suffix == "**" {
        if let Some(def) = ctx.registry.struct_def(&parts.base) {
            let native = format!("pd{slot}");
            prelude.push(Stmt::define(
                &native,
                value.deref().method(TO_NATIVE, ctx.to_native_target(def)),
            ));
            return Expr::ident(native).addr();
        }
        if parts.base == "char" {
            return adapt_string_list(slot, value, ctx, prelude);
        }
    }

    if parts.suffix == "*" && ctx.registry.is_enum(&parts.base) {
        let native = format!("e{slot}");
        prelude.push(Stmt::define(
            &native,
            Expr::convert(config.native(&parts.base), value.deref()),
        ));
        return Expr::ident(native).addr();
    }

    if depth <= 1 {
        if let Some(def) = ctx.registry.struct_def(&parts.base) {
            let converted = value.method(TO_NATIVE, ctx.to_native_target(def));
            return if parts.is_value() {
                converted.deref()
            } else {
                converted
            };
        }
    }

    Expr::convert(ctx.native_type(parts), value)
}

/// Copy a host string slice into a freshly allocated array of C strings.
fn adapt_string_list(
    slot: usize,
    value: Expr,
    ctx: &EmitContext<'_>,
    prelude: &mut Vec<Stmt>,
) -> Expr {
    let config = ctx.config;
    let size_t = config.native("size_t");
    let raw = format!("cp{slot}");
    let table = format!("tp{slot}");
    let c_char = config.native("char");

    prelude.push(Stmt::define(
        &raw,
        Expr::call(
            config.native("calloc"),
            vec![
                Expr::convert(&size_t, Expr::call("len", vec![value.clone()])),
                Expr::convert(
                    &size_t,
                    Expr::call(
                        "unsafe.Sizeof",
                        vec![Expr::convert("uintptr", Expr::lit("0"))],
                    ),
                ),
            ],
        ),
    ));
    prelude.push(Stmt::define(
        &table,
        Expr::convert(format!("*[1<<30 - 1]*{c_char}"), Expr::ident(&raw)),
    ));
    prelude.push(Stmt::ForRange {
        key: "i".to_string(),
        value: "one".to_string(),
        over: value,
        body: vec![Stmt::assign(
            Expr::ident(&table).index(Expr::ident("i")),
            Expr::call(config.native("CString"), vec![Expr::ident("one")]),
        )],
    });
    Expr::convert(format!("**{c_char}"), Expr::ident(raw))
}

/// Turn the native call into the method's trailing statements.
fn unwrap_result(field: &Field<'_>, call: Expr, ctx: &EmitContext<'_>) -> Vec<Stmt> {
    if !field.has_return_value() {
        return vec![Stmt::Expr(call)];
    }
    let helpers = &ctx.config.helpers;
    let c_return = field.c_return_type_unqualified();
    let host_return = field.host_return_type();
    let native = Expr::ident(NATIVE);

    if ctx.registry.is_value_struct(&c_return) {
        return vec![
            Stmt::define(NATIVE, call),
            Stmt::var("result", host_return),
            Stmt::Expr(Expr::ident("result").method(FROM_NATIVE, vec![native.addr()])),
            Stmt::Return(Expr::ident("result")),
        ];
    }

    match string_kind(&c_return) {
        Some(StringKind::Buffer) => vec![
            Stmt::define(NATIVE, call),
            Stmt::Return(Expr::call(&helpers.native_string_to_host, vec![native.addr()])),
        ],
        Some(StringKind::BufferPtr) => vec![Stmt::Return(Expr::call(
            &helpers.native_string_to_host,
            vec![call],
        ))],
        Some(StringKind::Userfree) => vec![Stmt::Return(Expr::call(
            &helpers.userfree_string_to_host,
            vec![call],
        ))],
        None => vec![Stmt::Return(Expr::convert(host_return, call))],
    }
}
