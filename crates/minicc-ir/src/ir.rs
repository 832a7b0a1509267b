//! IR data structures: module, functions, blocks, instructions.

use indexmap::IndexMap;
use minicc_util::{Idx, IndexVec, Symbol};
use std::fmt;
use thiserror::Error;

/// A scalar IR type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IrType {
    /// 1-bit integer, the `bool` lowering
    I1,
    /// 32-bit signed integer, the `int` lowering
    I32,
    /// 32-bit float, the `float` lowering
    F32,
    /// No value; function returns and effect-only instructions
    Void,
}

impl fmt::Display for IrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IrType::I1 => write!(f, "i1"),
            IrType::I32 => write!(f, "i32"),
            IrType::F32 => write!(f, "float"),
            IrType::Void => write!(f, "void"),
        }
    }
}

/// Identifies a basic block within its function.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BlockId(pub u32);

impl Idx for BlockId {
    fn from_usize(idx: usize) -> Self {
        BlockId(idx as u32)
    }
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Identifies an instruction within its function.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InstId(pub u32);

impl Idx for InstId {
    fn from_usize(idx: usize) -> Self {
        InstId(idx as u32)
    }
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// An SSA value: a constant, an instruction result, or a parameter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    ConstInt(i32),
    ConstFloat(f32),
    ConstBool(bool),
    /// Result of a value-producing instruction
    Inst(InstId),
    /// The i-th function parameter
    Param(usize),
}

/// A memory location a load or store addresses: a function-local stack
/// slot or a module-level global.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Ptr {
    /// A stack slot produced by an `alloca`
    Slot(InstId),
    /// A global variable, addressed by name
    Global(Symbol),
}

/// Integer and float binary opcodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Sdiv,
    Srem,
    Fadd,
    Fsub,
    Fmul,
    Fdiv,
    Frem,
    /// Bitwise and on `i1`
    And,
    /// Bitwise or on `i1`
    Or,
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BinaryOp::Add => "add",
            BinaryOp::Sub => "sub",
            BinaryOp::Mul => "mul",
            BinaryOp::Sdiv => "sdiv",
            BinaryOp::Srem => "srem",
            BinaryOp::Fadd => "fadd",
            BinaryOp::Fsub => "fsub",
            BinaryOp::Fmul => "fmul",
            BinaryOp::Fdiv => "fdiv",
            BinaryOp::Frem => "frem",
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
        };
        write!(f, "{}", s)
    }
}

/// Signed integer comparison conditions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IcmpCond {
    Eq,
    Ne,
    Slt,
    Sle,
    Sgt,
    Sge,
}

impl fmt::Display for IcmpCond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IcmpCond::Eq => "eq",
            IcmpCond::Ne => "ne",
            IcmpCond::Slt => "slt",
            IcmpCond::Sle => "sle",
            IcmpCond::Sgt => "sgt",
            IcmpCond::Sge => "sge",
        };
        write!(f, "{}", s)
    }
}

/// Ordered float comparison conditions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FcmpCond {
    Oeq,
    One,
    Olt,
    Ole,
    Ogt,
    Oge,
}

impl fmt::Display for FcmpCond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FcmpCond::Oeq => "oeq",
            FcmpCond::One => "one",
            FcmpCond::Olt => "olt",
            FcmpCond::Ole => "ole",
            FcmpCond::Ogt => "ogt",
            FcmpCond::Oge => "oge",
        };
        write!(f, "{}", s)
    }
}

/// An instruction body.
#[derive(Clone, Debug, PartialEq)]
pub enum InstKind {
    /// Reserve a stack slot. The instruction's type is the slot's value
    /// type; the result is the slot's address.
    Alloca { name: Symbol },
    /// Load from a slot or global.
    Load { ptr: Ptr },
    /// Store to a slot or global. Produces no value.
    Store { value: Value, ptr: Ptr },
    /// Integer/float arithmetic or `i1` bitwise logic.
    Binary { op: BinaryOp, lhs: Value, rhs: Value },
    /// Signed integer comparison; result is `i1`.
    Icmp { cond: IcmpCond, lhs: Value, rhs: Value },
    /// Ordered float comparison; result is `i1`.
    Fcmp { cond: FcmpCond, lhs: Value, rhs: Value },
    /// Zero-extend an `i1` to `i32`.
    Zext { value: Value },
    /// Convert a signed `i32` to `float`.
    Sitofp { value: Value },
    /// Negate a float.
    Fneg { value: Value },
    /// Invert an `i1` (printed as xor with true).
    Not { value: Value },
    /// Call a function by name. Produces a value unless the callee
    /// returns void.
    Call { callee: Symbol, args: Vec<Value> },
}

/// A typed instruction. For `Alloca` the type is the slot's value type;
/// for everything else it is the type of the produced value (`Void` when
/// nothing is produced).
#[derive(Clone, Debug, PartialEq)]
pub struct Inst {
    pub kind: InstKind,
    pub ty: IrType,
}

impl Inst {
    /// Whether this instruction produces an SSA value.
    pub fn produces_value(&self) -> bool {
        match self.kind {
            InstKind::Store { .. } => false,
            InstKind::Call { .. } => self.ty != IrType::Void,
            // Alloca produces the slot address even though `ty` is the
            // pointee type.
            _ => true,
        }
    }
}

/// A block-ending control transfer.
#[derive(Clone, Debug, PartialEq)]
pub enum Terminator {
    /// Unconditional branch.
    Br { dest: BlockId },
    /// Conditional branch on an `i1` value.
    CondBr {
        cond: Value,
        then_dest: BlockId,
        else_dest: BlockId,
    },
    /// Return, with a value unless the function returns void.
    Ret { value: Option<Value> },
    /// Control cannot reach the end of this block.
    Unreachable,
}

/// A maximal straight-line instruction sequence ending in one terminator.
#[derive(Clone, Debug, PartialEq)]
pub struct BasicBlock {
    /// Printed label, unique within the function.
    pub label: String,
    /// Instructions in emission order.
    pub insts: Vec<InstId>,
    /// The single terminator; `None` only while the block is still being
    /// built.
    pub terminator: Option<Terminator>,
}

/// A function: signature plus, for definitions, a CFG.
///
/// External declarations have no blocks.
#[derive(Clone, Debug)]
pub struct Function {
    pub name: Symbol,
    pub params: Vec<(Symbol, IrType)>,
    pub ret: IrType,
    /// True for `extern` declarations without a body.
    pub is_extern: bool,
    /// Basic blocks in creation order; the first is the entry block.
    pub blocks: IndexVec<BlockId, BasicBlock>,
    /// All instructions, owned by the function and referenced by blocks.
    pub insts: IndexVec<InstId, Inst>,
}

impl Function {
    /// Create an external declaration.
    pub fn declaration(name: Symbol, params: Vec<(Symbol, IrType)>, ret: IrType) -> Self {
        Self {
            name,
            params,
            ret,
            is_extern: true,
            blocks: IndexVec::new(),
            insts: IndexVec::new(),
        }
    }

    /// The types of this function's parameters.
    pub fn param_types(&self) -> Vec<IrType> {
        self.params.iter().map(|(_, ty)| *ty).collect()
    }

    /// The type of a value in the context of this function.
    pub fn type_of(&self, value: Value) -> IrType {
        match value {
            Value::ConstInt(_) => IrType::I32,
            Value::ConstFloat(_) => IrType::F32,
            Value::ConstBool(_) => IrType::I1,
            Value::Inst(id) => self.insts[id].ty,
            Value::Param(i) => self.params[i].1,
        }
    }

    /// Check that every block ends with exactly one terminator.
    pub fn verify(&self) -> Result<(), VerifyError> {
        for (id, block) in self.blocks.iter_enumerated() {
            if block.terminator.is_none() {
                return Err(VerifyError::MissingTerminator {
                    function: self.name.as_str(),
                    block: block.label.clone(),
                    block_id: id,
                });
            }
        }
        Ok(())
    }
}

/// IR verification failures.
#[derive(Debug, Error, PartialEq)]
pub enum VerifyError {
    #[error("block '{block}' in function '{function}' has no terminator")]
    MissingTerminator {
        function: &'static str,
        block: String,
        block_id: BlockId,
    },
}

/// A compilation unit: globals and functions in declaration order.
#[derive(Default)]
pub struct Module {
    /// Zero-initialized module-level variables.
    pub globals: IndexMap<Symbol, IrType>,
    /// Declarations and definitions, keyed by name.
    pub functions: IndexMap<Symbol, Function>,
}

impl Module {
    /// Create an empty module.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a zero-initialized global. Returns false if the name is taken.
    pub fn add_global(&mut self, name: Symbol, ty: IrType) -> bool {
        if self.globals.contains_key(&name) {
            return false;
        }
        self.globals.insert(name, ty);
        true
    }

    /// Add a function declaration or definition.
    pub fn add_function(&mut self, function: Function) {
        self.functions.insert(function.name, function);
    }

    /// Look up a function by name.
    pub fn function(&self, name: Symbol) -> Option<&Function> {
        self.functions.get(&name)
    }

    /// Verify every defined function.
    pub fn verify(&self) -> Result<(), VerifyError> {
        for function in self.functions.values() {
            if !function.is_extern {
                function.verify()?;
            }
        }
        Ok(())
    }
}
