//! Function construction with an insertion point.
//!
//! The builder owns a function under construction plus the block new
//! instructions go into. The emitter creates blocks, positions the
//! insertion point, and appends typed instructions; `finish` hands the
//! completed function back.

use minicc_util::Symbol;
use rustc_hash::FxHashMap;

use crate::ir::*;

/// Builds one function definition.
pub struct FunctionBuilder {
    func: Function,
    /// Block new instructions are appended to.
    current: BlockId,
    /// Per-hint counters for unique block labels.
    label_counts: FxHashMap<&'static str, u32>,
}

impl FunctionBuilder {
    /// Start building a function. The entry block is created and becomes
    /// the insertion point.
    pub fn new(name: Symbol, params: Vec<(Symbol, IrType)>, ret: IrType) -> Self {
        let mut func = Function {
            name,
            params,
            ret,
            is_extern: false,
            blocks: minicc_util::IndexVec::new(),
            insts: minicc_util::IndexVec::new(),
        };
        let entry = func.blocks.push(BasicBlock {
            label: "entry".to_string(),
            insts: Vec::new(),
            terminator: None,
        });
        Self {
            func,
            current: entry,
            label_counts: FxHashMap::default(),
        }
    }

    /// Create a new block with a unique label derived from `hint`.
    ///
    /// Blocks are appended to the function in creation order.
    pub fn create_block(&mut self, hint: &'static str) -> BlockId {
        let count = self.label_counts.entry(hint).or_insert(0);
        let label = if *count == 0 {
            hint.to_string()
        } else {
            format!("{}{}", hint, count)
        };
        *count += 1;
        self.func.blocks.push(BasicBlock {
            label,
            insts: Vec::new(),
            terminator: None,
        })
    }

    /// Move the insertion point to the end of `block`.
    pub fn position_at_end(&mut self, block: BlockId) {
        self.current = block;
    }

    /// The block instructions currently go into.
    pub fn current_block(&self) -> BlockId {
        self.current
    }

    /// Whether the current block already ends in a terminator.
    ///
    /// Statement emission checks this to skip dead code after a return or
    /// branch.
    pub fn is_terminated(&self) -> bool {
        self.func.blocks[self.current].terminator.is_some()
    }

    /// The function's return type.
    pub fn return_type(&self) -> IrType {
        self.func.ret
    }

    /// The type of a value in this function.
    pub fn type_of(&self, value: Value) -> IrType {
        self.func.type_of(value)
    }

    /// Finish construction and return the function.
    pub fn finish(self) -> Function {
        self.func
    }

    fn push(&mut self, kind: InstKind, ty: IrType) -> InstId {
        debug_assert!(
            !self.is_terminated(),
            "instruction appended to terminated block"
        );
        let id = self.func.insts.push(Inst { kind, ty });
        self.func.blocks[self.current].insts.push(id);
        id
    }

    fn terminate(&mut self, terminator: Terminator) {
        debug_assert!(!self.is_terminated(), "block terminated twice");
        self.func.blocks[self.current].terminator = Some(terminator);
    }

    // ------------------------------------------------------------------
    // Memory
    // ------------------------------------------------------------------

    /// Reserve a stack slot holding a `ty`. Returns the slot's address.
    pub fn build_alloca(&mut self, name: Symbol, ty: IrType) -> InstId {
        self.push(InstKind::Alloca { name }, ty)
    }

    /// Load a `ty` from a slot or global.
    pub fn build_load(&mut self, ptr: Ptr, ty: IrType) -> Value {
        Value::Inst(self.push(InstKind::Load { ptr }, ty))
    }

    /// Store a value into a slot or global.
    pub fn build_store(&mut self, value: Value, ptr: Ptr) {
        self.push(InstKind::Store { value, ptr }, IrType::Void);
    }

    // ------------------------------------------------------------------
    // Arithmetic, logic, comparisons, conversions
    // ------------------------------------------------------------------

    /// Integer/float arithmetic or `i1` logic. The result type equals the
    /// operand type.
    pub fn build_binary(&mut self, op: BinaryOp, lhs: Value, rhs: Value, ty: IrType) -> Value {
        Value::Inst(self.push(InstKind::Binary { op, lhs, rhs }, ty))
    }

    /// Signed integer comparison producing an `i1`.
    pub fn build_icmp(&mut self, cond: IcmpCond, lhs: Value, rhs: Value) -> Value {
        Value::Inst(self.push(InstKind::Icmp { cond, lhs, rhs }, IrType::I1))
    }

    /// Ordered float comparison producing an `i1`.
    pub fn build_fcmp(&mut self, cond: FcmpCond, lhs: Value, rhs: Value) -> Value {
        Value::Inst(self.push(InstKind::Fcmp { cond, lhs, rhs }, IrType::I1))
    }

    /// Zero-extend an `i1` to `i32`.
    pub fn build_zext(&mut self, value: Value) -> Value {
        Value::Inst(self.push(InstKind::Zext { value }, IrType::I32))
    }

    /// Convert a signed `i32` to `float`.
    pub fn build_sitofp(&mut self, value: Value) -> Value {
        Value::Inst(self.push(InstKind::Sitofp { value }, IrType::F32))
    }

    /// Negate a float.
    pub fn build_fneg(&mut self, value: Value) -> Value {
        Value::Inst(self.push(InstKind::Fneg { value }, IrType::F32))
    }

    /// Invert an `i1`.
    pub fn build_not(&mut self, value: Value) -> Value {
        Value::Inst(self.push(InstKind::Not { value }, IrType::I1))
    }

    /// Call `callee`. Returns the result value, or `None` for a void
    /// callee.
    pub fn build_call(&mut self, callee: Symbol, args: Vec<Value>, ret: IrType) -> Option<Value> {
        let id = self.push(InstKind::Call { callee, args }, ret);
        if ret == IrType::Void {
            None
        } else {
            Some(Value::Inst(id))
        }
    }

    // ------------------------------------------------------------------
    // Terminators
    // ------------------------------------------------------------------

    /// Unconditional branch.
    pub fn build_br(&mut self, dest: BlockId) {
        self.terminate(Terminator::Br { dest });
    }

    /// Conditional branch on an `i1`.
    pub fn build_cond_br(&mut self, cond: Value, then_dest: BlockId, else_dest: BlockId) {
        self.terminate(Terminator::CondBr {
            cond,
            then_dest,
            else_dest,
        });
    }

    /// Return a value.
    pub fn build_ret(&mut self, value: Value) {
        self.terminate(Terminator::Ret { value: Some(value) });
    }

    /// Return from a void function.
    pub fn build_ret_void(&mut self) {
        self.terminate(Terminator::Ret { value: None });
    }

    /// Mark the end of the block as unreachable.
    pub fn build_unreachable(&mut self) {
        self.terminate(Terminator::Unreachable);
    }
}
