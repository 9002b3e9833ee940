//! Maps a resolved [`glyphc_sem::Type`] onto an LLVM type handle.
//!
//! LLVM has no "void value" among its basic types, but a Glyph function can
//! still return one (an implicit `void` return), so [`GenType`] wraps
//! `BasicTypeEnum` with a separate `Void` case rather than reusing it
//! directly — `create_function` is the only place that cares about the
//! distinction.

use inkwell::context::Context;
use inkwell::types::BasicTypeEnum;
use inkwell::AddressSpace;

use glyphc_sem::Type;

#[derive(Debug, Clone, Copy)]
pub enum GenType<'ctx> {
    Basic(BasicTypeEnum<'ctx>),
    Void,
}

impl<'ctx> GenType<'ctx> {
    /// Unwraps the basic type, panicking on `Void`. Params and locals are
    /// never void: the type pass never lets one appear there.
    pub fn basic(self) -> BasicTypeEnum<'ctx> {
        match self {
            GenType::Basic(b) => b,
            GenType::Void => unreachable!("void has no basic representation"),
        }
    }
}

/// Glyph's integers are 32-bit (`ast::Literal::Integer(i32)`), so `integer`
/// maps to `i32`, not the host word size.
pub fn glyph_type_to_llvm<'ctx>(context: &'ctx Context, ty: &Type) -> GenType<'ctx> {
    match ty {
        Type::Integer => GenType::Basic(context.i32_type().into()),
        Type::Double => GenType::Basic(context.f64_type().into()),
        Type::Boolean => GenType::Basic(context.bool_type().into()),
        Type::Char => GenType::Basic(context.i8_type().into()),
        Type::String => GenType::Basic(context.ptr_type(AddressSpace::default()).into()),
        Type::Void => GenType::Void,
        Type::Array(elem, len) => {
            let elem_basic = glyph_type_to_llvm(context, elem).basic();
            GenType::Basic(elem_basic.array_type(*len).into())
        }
        Type::Function(_) => unreachable!("function values have no LLVM type representation"),
    }
}
