//! minicc-ir - the typed intermediate representation.
//!
//! The front-end's emitter targets this crate: a module holds zero-initialized
//! globals and functions; a function holds control-flow-graph basic blocks of
//! typed SSA-form instructions, each block ending in exactly one terminator.
//!
//! [`FunctionBuilder`] provides the insertion-point API the emitter drives:
//! create blocks, position at a block's end, and append instructions. The
//! module renders to textual IR through its `Display` implementation, and
//! [`Function::verify`] checks the terminator invariant.

pub mod builder;
pub mod ir;
mod print;

pub use builder::FunctionBuilder;
pub use ir::{
    BasicBlock, BinaryOp, BlockId, FcmpCond, Function, IcmpCond, Inst, InstId, InstKind, IrType,
    Module, Ptr, Terminator, Value, VerifyError,
};
