//! Concrete [`IrBuilder`] implementation over `inkwell`.
//!
//! Owns the LLVM `Context`/`Module`/`Builder` triple the way the teacher's
//! backend did. The difference is what drives it: the teacher's
//! `compile_function` walked a register-based LIR instruction by
//! instruction, declaring a GC runtime and a string library along the way.
//! Glyph has neither, so this backend has no instruction stream to walk at
//! all — `glyphc_mir::emit::emit_program` calls straight through the
//! methods below while it walks the AST, and each one here is a thin,
//! one-to-one wrapper over the matching `inkwell::builder::Builder` call.
//!
//! Only [`IrBuilder::call`] can fail with a [`glyphc_mir::CodeGenError`]:
//! every other inkwell call here is `.expect()`-ed, on the premise that a
//! program that reached code generation is already well-typed, so a
//! rejected `build_*` call would mean this backend itself is broken, not
//! that the source program was bad.

use std::path::Path;

use inkwell::basic_block::BasicBlock;
use inkwell::builder::Builder;
use inkwell::context::Context;
use inkwell::module::Module;
use inkwell::targets::{FileType, RelocMode, Target, TargetMachine, TargetTriple};
use inkwell::types::BasicMetadataTypeEnum;
use inkwell::values::{BasicMetadataValueEnum, BasicValueEnum, FunctionValue};
use inkwell::OptimizationLevel;

use glyphc_mir::{CodeGenError as MirError, CodeGenResult as MirResult, FloatPredicate, IntPredicate, IrBuilder};
use glyphc_sem::Type;

use crate::error::{CodeGenError, Result};
use crate::types::{glyph_type_to_llvm, GenType};

pub struct LlvmBackend<'ctx> {
    pub context: &'ctx Context,
    pub module: Module<'ctx>,
    pub builder: Builder<'ctx>,
    pub target_triple: String,
    pub opt_level: OptimizationLevel,
}

static INIT_TARGETS: std::sync::Once = std::sync::Once::new();

fn ensure_targets_initialized() {
    INIT_TARGETS.call_once(|| {
        inkwell::targets::Target::initialize_all(&inkwell::targets::InitializationConfig::default());
    });
}

impl<'ctx> LlvmBackend<'ctx> {
    pub fn new(
        context: &'ctx Context,
        module_name: &str,
        target_triple: String,
        opt_level: OptimizationLevel,
    ) -> Self {
        ensure_targets_initialized();

        let module = context.create_module(module_name);

        let triple = TargetTriple::create(&target_triple);
        module.set_triple(&triple);

        if let Ok(target) = Target::from_triple(&triple) {
            if let Some(target_machine) = target.create_target_machine(
                &triple,
                "generic",
                "",
                opt_level,
                RelocMode::Default,
                inkwell::targets::CodeModel::Default,
            ) {
                let data_layout = target_machine.get_target_data().get_data_layout();
                module.set_data_layout(&data_layout);
            }
        }

        Self {
            context,
            module,
            builder: context.create_builder(),
            target_triple,
            opt_level,
        }
    }

    fn target_machine(&self) -> Result<TargetMachine> {
        let triple = TargetTriple::create(&self.target_triple);
        let target = Target::from_triple(&triple)
            .map_err(|e| CodeGenError::TargetMachineUnavailable(e.to_string()))?;
        target
            .create_target_machine(
                &triple,
                "generic",
                "",
                self.opt_level,
                RelocMode::Default,
                inkwell::targets::CodeModel::Default,
            )
            .ok_or_else(|| CodeGenError::TargetMachineUnavailable(self.target_triple.clone()))
    }

    /// No passes run; a JIT-only pipeline has no use for one yet.
    pub fn optimize(&mut self) {}

    pub fn emit_llvm_ir(&self) -> String {
        self.module.print_to_string().to_string()
    }

    pub fn write_ir_to_file(&self, path: &Path) -> Result<()> {
        use std::fs::File;
        use std::io::Write;

        let ir = self.emit_llvm_ir();
        let mut file = File::create(path).map_err(|e| CodeGenError::IrWriteFailed(e.to_string()))?;
        file.write_all(ir.as_bytes())
            .map_err(|e| CodeGenError::IrWriteFailed(e.to_string()))
    }

    pub fn get_module(&self) -> &Module<'ctx> {
        &self.module
    }

    pub fn write_object_file(&self, path: &Path) -> Result<()> {
        self.target_machine()?
            .write_to_file(&self.module, FileType::Object, path)
            .map_err(|e| CodeGenError::ObjectWriteFailed(e.to_string()))
    }

    pub fn write_asm_file(&self, path: &Path) -> Result<()> {
        self.target_machine()?
            .write_to_file(&self.module, FileType::Assembly, path)
            .map_err(|e| CodeGenError::AssemblyWriteFailed(e.to_string()))
    }
}

impl<'ctx> IrBuilder for LlvmBackend<'ctx> {
    type Value = BasicValueEnum<'ctx>;
    type Block = BasicBlock<'ctx>;
    type Function = FunctionValue<'ctx>;
    type Type = GenType<'ctx>;

    fn type_of(&mut self, ty: &Type) -> Self::Type {
        glyph_type_to_llvm(self.context, ty)
    }

    fn create_function(
        &mut self,
        name: &str,
        param_types: &[Self::Type],
        ret_type: Self::Type,
    ) -> Self::Function {
        let params: Vec<BasicMetadataTypeEnum> =
            param_types.iter().map(|t| t.basic().into()).collect();

        let fn_type = match ret_type {
            GenType::Void => self.context.void_type().fn_type(&params, false),
            GenType::Basic(b) => b.fn_type(&params, false),
        };

        self.module.add_function(name, fn_type, None)
    }

    fn function_param(&mut self, func: Self::Function, index: usize) -> Self::Value {
        func.get_nth_param(index as u32)
            .expect("parameter index out of range")
    }

    fn get_function(&mut self, name: &str) -> Option<Self::Function> {
        self.module.get_function(name)
    }

    fn create_block(&mut self, func: Self::Function, name: &str) -> Self::Block {
        self.context.append_basic_block(func, name)
    }

    fn append_block(&mut self, func: Self::Function, block: Self::Block) {
        // LLVM appends a block to its function as soon as it's created, so
        // by the time the emitter is ready to commit this block's final
        // position, it may already sit ahead of blocks created since. Block
        // order has no effect on program semantics (only the terminators
        // do), so this is purely for a readable textual dump.
        if let Some(last) = func.get_last_basic_block() {
            if last != block {
                block.move_after(last).expect("failed to reorder block");
            }
        }
    }

    fn set_insertion_point(&mut self, block: Self::Block) {
        self.builder.position_at_end(block);
    }

    fn alloca(&mut self, ty: Self::Type, name: &str) -> Self::Value {
        self.builder.build_alloca(ty.basic(), name).expect("alloca failed").into()
    }

    fn load(&mut self, ty: Self::Type, ptr: Self::Value, name: &str) -> Self::Value {
        self.builder
            .build_load(ty.basic(), ptr.into_pointer_value(), name)
            .expect("load failed")
    }

    fn store(&mut self, value: Self::Value, ptr: Self::Value) {
        self.builder.build_store(ptr.into_pointer_value(), value).expect("store failed");
    }

    fn const_int(&mut self, ty: Self::Type, value: i64) -> Self::Value {
        ty.basic().into_int_type().const_int(value as u64, true).into()
    }

    fn const_double(&mut self, ty: Self::Type, value: f64) -> Self::Value {
        ty.basic().into_float_type().const_float(value).into()
    }

    fn const_bool(&mut self, value: bool) -> Self::Value {
        self.context.bool_type().const_int(value as u64, false).into()
    }

    fn const_char(&mut self, value: char) -> Self::Value {
        self.context.i8_type().const_int(value as u64, false).into()
    }

    fn global_string(&mut self, value: &str, name: &str) -> Self::Value {
        self.builder
            .build_global_string_ptr(value, name)
            .expect("global string failed")
            .as_pointer_value()
            .into()
    }

    fn iadd(&mut self, lhs: Self::Value, rhs: Self::Value, name: &str) -> Self::Value {
        self.builder
            .build_int_add(lhs.into_int_value(), rhs.into_int_value(), name)
            .expect("iadd failed")
            .into()
    }

    fn isub(&mut self, lhs: Self::Value, rhs: Self::Value, name: &str) -> Self::Value {
        self.builder
            .build_int_sub(lhs.into_int_value(), rhs.into_int_value(), name)
            .expect("isub failed")
            .into()
    }

    fn imul(&mut self, lhs: Self::Value, rhs: Self::Value, name: &str) -> Self::Value {
        self.builder
            .build_int_mul(lhs.into_int_value(), rhs.into_int_value(), name)
            .expect("imul failed")
            .into()
    }

    fn sdiv(&mut self, lhs: Self::Value, rhs: Self::Value, name: &str) -> Self::Value {
        self.builder
            .build_int_signed_div(lhs.into_int_value(), rhs.into_int_value(), name)
            .expect("sdiv failed")
            .into()
    }

    fn ineg(&mut self, value: Self::Value, name: &str) -> Self::Value {
        self.builder.build_int_neg(value.into_int_value(), name).expect("ineg failed").into()
    }

    fn fadd(&mut self, lhs: Self::Value, rhs: Self::Value, name: &str) -> Self::Value {
        self.builder
            .build_float_add(lhs.into_float_value(), rhs.into_float_value(), name)
            .expect("fadd failed")
            .into()
    }

    fn fsub(&mut self, lhs: Self::Value, rhs: Self::Value, name: &str) -> Self::Value {
        self.builder
            .build_float_sub(lhs.into_float_value(), rhs.into_float_value(), name)
            .expect("fsub failed")
            .into()
    }

    fn fmul(&mut self, lhs: Self::Value, rhs: Self::Value, name: &str) -> Self::Value {
        self.builder
            .build_float_mul(lhs.into_float_value(), rhs.into_float_value(), name)
            .expect("fmul failed")
            .into()
    }

    fn fdiv(&mut self, lhs: Self::Value, rhs: Self::Value, name: &str) -> Self::Value {
        self.builder
            .build_float_div(lhs.into_float_value(), rhs.into_float_value(), name)
            .expect("fdiv failed")
            .into()
    }

    fn fneg(&mut self, value: Self::Value, name: &str) -> Self::Value {
        self.builder.build_float_neg(value.into_float_value(), name).expect("fneg failed").into()
    }

    fn icmp(
        &mut self,
        pred: IntPredicate,
        lhs: Self::Value,
        rhs: Self::Value,
        name: &str,
    ) -> Self::Value {
        let pred = match pred {
            IntPredicate::Eq => inkwell::IntPredicate::EQ,
            IntPredicate::Ne => inkwell::IntPredicate::NE,
            IntPredicate::Slt => inkwell::IntPredicate::SLT,
            IntPredicate::Sle => inkwell::IntPredicate::SLE,
            IntPredicate::Sgt => inkwell::IntPredicate::SGT,
            IntPredicate::Sge => inkwell::IntPredicate::SGE,
        };
        self.builder
            .build_int_compare(pred, lhs.into_int_value(), rhs.into_int_value(), name)
            .expect("icmp failed")
            .into()
    }

    fn fcmp(
        &mut self,
        pred: FloatPredicate,
        lhs: Self::Value,
        rhs: Self::Value,
        name: &str,
    ) -> Self::Value {
        let pred = match pred {
            FloatPredicate::Oeq => inkwell::FloatPredicate::OEQ,
            FloatPredicate::One => inkwell::FloatPredicate::ONE,
            FloatPredicate::Olt => inkwell::FloatPredicate::OLT,
            FloatPredicate::Ole => inkwell::FloatPredicate::OLE,
            FloatPredicate::Ogt => inkwell::FloatPredicate::OGT,
            FloatPredicate::Oge => inkwell::FloatPredicate::OGE,
        };
        self.builder
            .build_float_compare(pred, lhs.into_float_value(), rhs.into_float_value(), name)
            .expect("fcmp failed")
            .into()
    }

    fn gep(&mut self, elem_ty: Self::Type, base: Self::Value, index: Self::Value, name: &str) -> Self::Value {
        unsafe {
            self.builder
                .build_gep(elem_ty.basic(), base.into_pointer_value(), &[index.into_int_value()], name)
                .expect("gep failed")
                .into()
        }
    }

    fn br(&mut self, target: Self::Block) {
        self.builder.build_unconditional_branch(target).expect("br failed");
    }

    fn cond_br(&mut self, cond: Self::Value, then_block: Self::Block, else_block: Self::Block) {
        self.builder
            .build_conditional_branch(cond.into_int_value(), then_block, else_block)
            .expect("cond_br failed");
    }

    fn ret(&mut self, value: Self::Value) {
        self.builder.build_return(Some(&value)).expect("ret failed");
    }

    fn ret_void(&mut self) {
        self.builder.build_return(None).expect("ret_void failed");
    }

    fn remove_terminator(&mut self, block: Self::Block) {
        if let Some(term) = block.get_terminator() {
            term.erase_from_basic_block();
        }
    }

    fn call(&mut self, func: Self::Function, args: &[Self::Value], name: &str) -> MirResult<Option<Self::Value>> {
        let arg_vals: Vec<BasicMetadataValueEnum> = args.iter().map(|v| (*v).into()).collect();
        let call_site = self
            .builder
            .build_call(func, &arg_vals, name)
            .map_err(|e| MirError::BuilderRejected(e.to_string()))?;
        Ok(call_site.try_as_basic_value().left())
    }
}
