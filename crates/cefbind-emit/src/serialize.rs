//! To-native / from-native statements for data members.
//!
//! Each data member of a value struct gets one statement in the host
//! type's `toNative` method and its mirror image in `fromNative`.

use cefbind_core::ctype::CTypeParts;
use cefbind_core::mapping::{string_kind, StringKind};
use cefbind_core::Field;

use crate::context::EmitContext;
use crate::ir::{Expr, Stmt, FROM_NATIVE, NATIVE, RECEIVER, TO_NATIVE};

fn host_member(field: &Field<'_>) -> Expr {
    Expr::ident(RECEIVER).field(field.host_name())
}

fn native_member(field: &Field<'_>) -> Expr {
    Expr::ident(NATIVE).field(field.name())
}

/// Statement copying the host member into the native struct.
///
/// Returns `None` for function-pointer members.
pub fn to_native(field: &Field<'_>, ctx: &EmitContext<'_>) -> Option<Stmt> {
    if field.is_function_ptr() {
        return None;
    }
    let c_type = field.c_return_type_unqualified();
    let host = host_member(field);
    let native = native_member(field);

    if ctx.registry.is_value_struct(&c_type) {
        return Some(Stmt::Expr(host.method(TO_NATIVE, vec![native.addr()])));
    }
    if c_type == "void *" {
        return Some(Stmt::assign(native, host));
    }
    let set = &ctx.config.helpers.set_native_string;
    let stmt = match string_kind(&c_type) {
        Some(StringKind::Buffer) => Stmt::Expr(Expr::call(set, vec![host, native.addr()])),
        Some(StringKind::BufferPtr) => Stmt::Expr(Expr::call(set, vec![host, native])),
        _ => {
            let ty = ctx.native_type(&CTypeParts::split(&c_type));
            Stmt::assign(native, Expr::convert(ty, host))
        }
    };
    Some(stmt)
}

/// Statement copying the native member back into the host struct.
///
/// Returns `None` for function-pointer members.
pub fn from_native(field: &Field<'_>, ctx: &EmitContext<'_>) -> Option<Stmt> {
    if field.is_function_ptr() {
        return None;
    }
    let c_type = field.c_return_type_unqualified();
    let host = host_member(field);
    let native = native_member(field);

    if ctx.registry.is_value_struct(&c_type) {
        return Some(Stmt::Expr(host.method(FROM_NATIVE, vec![native.addr()])));
    }
    if c_type == "void *" {
        return Some(Stmt::assign(host, native));
    }
    let read = &ctx.config.helpers.native_string_to_host;
    let value = match string_kind(&c_type) {
        Some(StringKind::Buffer) => Expr::call(read, vec![native.addr()]),
        Some(StringKind::BufferPtr) => Expr::call(read, vec![native]),
        _ => Expr::convert(field.host_return_type(), native),
    };
    Some(Stmt::assign(host, value))
}
