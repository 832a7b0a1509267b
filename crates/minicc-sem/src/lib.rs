//! minicc-sem - semantic analysis and IR generation.
//!
//! A single post-order traversal of the syntax tree that resolves names,
//! enforces the typing rules, and emits typed SSA-form instructions into a
//! [`minicc_ir::Module`].
//!
//! Top-level items are processed in source order: externs and globals
//! populate the global table, and each function definition is emitted into
//! its own control-flow graph. Implicit conversion follows the widening
//! lattice `bool < int < float`; narrowing is never implicit and is a
//! semantic error wherever it would be required.
//!
//! A semantic error produces one diagnostic with position and halts
//! emission of the enclosing function; remaining functions are still
//! analyzed so the overall run reports one error per offending function at
//! most. The driver must not write the IR when the handler carries errors.
//!
//! # Example
//!
//! ```
//! use minicc_par::Parser;
//! use minicc_util::Handler;
//!
//! let handler = Handler::new();
//! let mut parser = Parser::new("int one(void) { return 1; }", &handler);
//! let program = parser.parse();
//! let module = minicc_sem::analyze(&program, &handler);
//! assert!(!handler.has_errors());
//! assert!(module.to_string().contains("define i32 @one()"));
//! ```

pub mod scope;


use minicc_ir::{
    BinaryOp, FcmpCond, Function, FunctionBuilder, IcmpCond, IrType, Module, Ptr, Value,
};
use minicc_par::{
    AssignExpr, BinOp, Block, CallExpr, Expr, FnDecl, IfStmt, Item, Lit, LitKind, Program,
    Prototype, ReturnStmt, Stmt, Ty, UnOp, UnaryExpr, VarRef, WhileStmt,
};
use minicc_util::{Diagnostic, Handler, Span, Symbol};
use rustc_hash::{FxHashMap, FxHashSet};
use scope::{LocalSlot, ScopeStack};

/// Analyze a program and produce its IR module.
///
/// Check `handler` for errors before using the module.
pub fn analyze(program: &Program, handler: &Handler) -> Module {
    Analyzer::new(handler).analyze(program)
}

/// A function signature in the global table.
#[derive(Clone, Debug)]
struct FnSig {
    params: Vec<Ty>,
    /// `None` for void.
    ret: Option<Ty>,
}

/// What a top-level name refers to.
#[derive(Clone, Debug)]
enum GlobalEntry {
    Var(Ty),
    Fn(FnSig),
}

/// Walks top-level items and emits the module.
pub struct Analyzer<'a> {
    handler: &'a Handler,
    /// identifier -> global variable or function, populated in source order.
    globals: FxHashMap<Symbol, GlobalEntry>,
    module: Module,
}

impl<'a> Analyzer<'a> {
    /// Create an analyzer reporting into `handler`.
    pub fn new(handler: &'a Handler) -> Self {
        Self {
            handler,
            globals: FxHashMap::default(),
            module: Module::new(),
        }
    }

    /// Process every top-level item and return the module.
    pub fn analyze(mut self, program: &Program) -> Module {
        for item in &program.items {
            match item {
                Item::Extern(proto) => self.declare_extern(proto),
                Item::Global(global) => self.declare_global(global),
                Item::Fn(decl) => self.define_function(decl),
            }
        }
        self.module
    }

    fn error(&self, message: impl Into<String>, span: Span) {
        self.handler.emit(Diagnostic::semantic(message, span));
    }

    /// Report and return true if `name` is already a top-level symbol.
    fn check_redefinition(&self, name: Symbol, span: Span) -> bool {
        if self.globals.contains_key(&name) {
            self.error(format!("redefinition of '{}'", name), span);
            return true;
        }
        false
    }

    /// Report and return true if the prototype repeats a parameter name.
    fn check_duplicate_params(&self, proto: &Prototype) -> bool {
        let mut seen = FxHashSet::default();
        for param in &proto.params {
            if !seen.insert(param.name) {
                self.error(
                    format!(
                        "duplicate parameter '{}' in function '{}'",
                        param.name, proto.name
                    ),
                    param.span,
                );
                return true;
            }
        }
        false
    }

    fn declare_extern(&mut self, proto: &Prototype) {
        if self.check_redefinition(proto.name, proto.span) || self.check_duplicate_params(proto) {
            return;
        }

        self.globals.insert(
            proto.name,
            GlobalEntry::Fn(FnSig {
                params: proto.params.iter().map(|p| p.ty).collect(),
                ret: proto.ret,
            }),
        );
        self.module.add_function(Function::declaration(
            proto.name,
            proto
                .params
                .iter()
                .map(|p| (p.name, ir_type(p.ty)))
                .collect(),
            ret_ir(proto.ret),
        ));
    }

    fn declare_global(&mut self, global: &minicc_par::GlobalVar) {
        if self.check_redefinition(global.name, global.span) {
            return;
        }
        self.globals
            .insert(global.name, GlobalEntry::Var(global.ty));
        self.module.add_global(global.name, ir_type(global.ty));
    }

    fn define_function(&mut self, decl: &FnDecl) {
        let proto = &decl.proto;
        if self.check_redefinition(proto.name, proto.span) || self.check_duplicate_params(proto) {
            return;
        }

        // The signature goes into the table before the body is emitted so
        // recursive calls resolve.
        self.globals.insert(
            proto.name,
            GlobalEntry::Fn(FnSig {
                params: proto.params.iter().map(|p| p.ty).collect(),
                ret: proto.ret,
            }),
        );

        let emitter = FunctionEmitter::new(self.handler, &self.globals, proto);
        if let Some(function) = emitter.emit(decl) {
            self.module.add_function(function);
        }
    }
}

/// Sentinel for "a semantic error was reported; halt the enclosing
/// function".
struct Abort;

type Emit<T> = Result<T, Abort>;

/// Emits one function definition.
struct FunctionEmitter<'a> {
    handler: &'a Handler,
    globals: &'a FxHashMap<Symbol, GlobalEntry>,
    builder: FunctionBuilder,
    scopes: ScopeStack,
    /// The function's return type; `None` for void.
    ret: Option<Ty>,
}

impl<'a> FunctionEmitter<'a> {
    fn new(
        handler: &'a Handler,
        globals: &'a FxHashMap<Symbol, GlobalEntry>,
        proto: &Prototype,
    ) -> Self {
        let builder = FunctionBuilder::new(
            proto.name,
            proto
                .params
                .iter()
                .map(|p| (p.name, ir_type(p.ty)))
                .collect(),
            ret_ir(proto.ret),
        );
        Self {
            handler,
            globals,
            builder,
            scopes: ScopeStack::new(),
            ret: proto.ret,
        }
    }

    /// Emit the whole function. Returns `None` if a semantic error halted
    /// emission.
    fn emit(mut self, decl: &FnDecl) -> Option<Function> {
        self.scopes.push_frame();

        // Each parameter gets a stack slot; the incoming value is stored
        // into it and the slot is what the body reads and writes.
        for (index, param) in decl.proto.params.iter().enumerate() {
            let slot = self.builder.build_alloca(param.name, ir_type(param.ty));
            self.builder.build_store(Value::Param(index), Ptr::Slot(slot));
            self.scopes.declare(
                param.name,
                LocalSlot {
                    slot,
                    ty: param.ty,
                },
            );
        }

        let result = self.emit_block(&decl.body);
        self.scopes.pop_frame();

        match result {
            Ok(()) => {
                if !self.builder.is_terminated() {
                    match self.ret {
                        None => self.builder.build_ret_void(),
                        // A missing return in a non-void function is not
                        // diagnosed here; the block is sealed and the
                        // backend may reject it.
                        Some(_) => self.builder.build_unreachable(),
                    }
                }
                Some(self.builder.finish())
            }
            Err(Abort) => None,
        }
    }

    fn err(&self, message: impl Into<String>, span: Span) -> Abort {
        self.handler.emit(Diagnostic::semantic(message, span));
        Abort
    }

    // ------------------------------------------------------------------
    // Statements
    // ------------------------------------------------------------------

    /// Emit a block's declarations and statements into the current frame.
    fn emit_block(&mut self, block: &Block) -> Emit<()> {
        for decl in &block.decls {
            let slot = self.builder.build_alloca(decl.name, ir_type(decl.ty));
            let local = LocalSlot {
                slot,
                ty: decl.ty,
            };
            if !self.scopes.declare(decl.name, local) {
                return Err(self.err(format!("redefinition of '{}'", decl.name), decl.span));
            }
        }

        for stmt in &block.stmts {
            // Once the insertion point is terminated the remaining
            // statements are dead code.
            if self.builder.is_terminated() {
                break;
            }
            self.emit_stmt(stmt)?;
        }
        Ok(())
    }

    /// Emit a block inside a fresh scope frame.
    fn emit_block_in_frame(&mut self, block: &Block) -> Emit<()> {
        self.scopes.push_frame();
        let result = self.emit_block(block);
        self.scopes.pop_frame();
        result
    }

    fn emit_stmt(&mut self, stmt: &Stmt) -> Emit<()> {
        match stmt {
            Stmt::Expr(expr) => {
                self.emit_expr_opt(expr)?;
                Ok(())
            }
            Stmt::Block(block) => self.emit_block_in_frame(block),
            Stmt::If(if_stmt) => self.emit_if(if_stmt),
            Stmt::While(while_stmt) => self.emit_while(while_stmt),
            Stmt::Return(ret_stmt) => self.emit_return(ret_stmt),
            // A lone ';' emits nothing.
            Stmt::Empty => Ok(()),
        }
    }

    fn emit_if(&mut self, if_stmt: &IfStmt) -> Emit<()> {
        let (cond, cond_ty) = self.emit_expr(&if_stmt.cond)?;
        if cond_ty != Ty::Bool {
            return Err(self.err(
                format!("if condition must be 'bool', found '{}'", cond_ty),
                if_stmt.cond.span(),
            ));
        }

        match &if_stmt.else_block {
            None => {
                let then_block = self.builder.create_block("then");
                let end_block = self.builder.create_block("end");
                self.builder.build_cond_br(cond, then_block, end_block);

                self.builder.position_at_end(then_block);
                self.emit_block_in_frame(&if_stmt.then_block)?;
                if !self.builder.is_terminated() {
                    self.builder.build_br(end_block);
                }
                self.builder.position_at_end(end_block);
            }
            Some(else_body) => {
                let then_block = self.builder.create_block("then");
                let else_block = self.builder.create_block("else");
                // Created even when both arms return; a dead end block is
                // acceptable and gets sealed when the function finishes.
                let end_block = self.builder.create_block("end");
                self.builder.build_cond_br(cond, then_block, else_block);

                self.builder.position_at_end(then_block);
                self.emit_block_in_frame(&if_stmt.then_block)?;
                if !self.builder.is_terminated() {
                    self.builder.build_br(end_block);
                }

                self.builder.position_at_end(else_block);
                self.emit_block_in_frame(else_body)?;
                if !self.builder.is_terminated() {
                    self.builder.build_br(end_block);
                }

                self.builder.position_at_end(end_block);
            }
        }
        Ok(())
    }

    fn emit_while(&mut self, while_stmt: &WhileStmt) -> Emit<()> {
        let cond_block = self.builder.create_block("cond");
        let body_block = self.builder.create_block("body");
        let end_block = self.builder.create_block("end");

        self.builder.build_br(cond_block);

        self.builder.position_at_end(cond_block);
        let (cond, cond_ty) = self.emit_expr(&while_stmt.cond)?;
        if cond_ty != Ty::Bool {
            return Err(self.err(
                format!("while condition must be 'bool', found '{}'", cond_ty),
                while_stmt.cond.span(),
            ));
        }
        self.builder.build_cond_br(cond, body_block, end_block);

        self.builder.position_at_end(body_block);
        self.scopes.push_frame();
        // A block body shares the loop's frame rather than opening a
        // second one.
        let result = match &*while_stmt.body {
            Stmt::Block(block) => self.emit_block(block),
            other => self.emit_stmt(other),
        };
        self.scopes.pop_frame();
        result?;

        if !self.builder.is_terminated() {
            self.builder.build_br(cond_block);
        }
        self.builder.position_at_end(end_block);
        Ok(())
    }

    fn emit_return(&mut self, ret_stmt: &ReturnStmt) -> Emit<()> {
        match (&ret_stmt.value, self.ret) {
            (None, None) => {
                self.builder.build_ret_void();
                Ok(())
            }
            (None, Some(ret_ty)) => Err(self.err(
                format!(
                    "return without a value in a function returning '{}'",
                    ret_ty
                ),
                ret_stmt.span,
            )),
            (Some(_), None) => Err(self.err(
                "cannot return a value from a 'void' function",
                ret_stmt.span,
            )),
            (Some(expr), Some(ret_ty)) => {
                let (value, value_ty) = self.emit_expr(expr)?;
                if !value_ty.widens_to(ret_ty) {
                    return Err(self.err(
                        format!(
                            "cannot return '{}' from a function returning '{}'",
                            value_ty, ret_ty
                        ),
                        expr.span(),
                    ));
                }
                let widened = self.widen(value, value_ty, ret_ty);
                self.builder.build_ret(widened);
                Ok(())
            }
        }
    }

    // ------------------------------------------------------------------
    // Expressions
    // ------------------------------------------------------------------

    /// Emit an expression whose value may be discarded; only a call to a
    /// void function yields `None`.
    fn emit_expr_opt(&mut self, expr: &Expr) -> Emit<Option<(Value, Ty)>> {
        match expr {
            Expr::Call(call) => self.emit_call(call),
            _ => self.emit_expr(expr).map(Some),
        }
    }

    /// Emit an expression that must produce a value.
    fn emit_expr(&mut self, expr: &Expr) -> Emit<(Value, Ty)> {
        match expr {
            Expr::Literal(lit) => Ok(emit_literal(lit)),
            Expr::Var(var) => self.emit_var_ref(var),
            Expr::Call(call) => match self.emit_call(call)? {
                Some(result) => Ok(result),
                None => Err(self.err(
                    format!("call to void function '{}' used as a value", call.callee),
                    call.span,
                )),
            },
            Expr::Unary(unary) => self.emit_unary(unary),
            Expr::Binary(binary) => self.emit_binary(binary),
            Expr::Assign(assign) => self.emit_assign(assign),
        }
    }

    fn emit_var_ref(&mut self, var: &VarRef) -> Emit<(Value, Ty)> {
        if let Some(local) = self.scopes.lookup(var.name) {
            let value = self.builder.build_load(Ptr::Slot(local.slot), ir_type(local.ty));
            return Ok((value, local.ty));
        }
        match self.globals.get(&var.name) {
            Some(GlobalEntry::Var(ty)) => {
                let value = self.builder.build_load(Ptr::Global(var.name), ir_type(*ty));
                Ok((value, *ty))
            }
            Some(GlobalEntry::Fn(_)) => Err(self.err(
                format!("'{}' is a function, not a variable", var.name),
                var.span,
            )),
            None => Err(self.err(format!("unknown variable '{}'", var.name), var.span)),
        }
    }

    /// Resolve the target of an assignment to a pointer and declared type.
    fn resolve_lvalue(&mut self, name: Symbol, span: Span) -> Emit<(Ptr, Ty)> {
        if let Some(local) = self.scopes.lookup(name) {
            return Ok((Ptr::Slot(local.slot), local.ty));
        }
        match self.globals.get(&name) {
            Some(GlobalEntry::Var(ty)) => Ok((Ptr::Global(name), *ty)),
            Some(GlobalEntry::Fn(_)) => {
                Err(self.err(format!("cannot assign to function '{}'", name), span))
            }
            None => Err(self.err(format!("unknown variable '{}'", name), span)),
        }
    }

    fn emit_assign(&mut self, assign: &AssignExpr) -> Emit<(Value, Ty)> {
        let (ptr, var_ty) = self.resolve_lvalue(assign.name, assign.name_span)?;
        let (value, value_ty) = self.emit_expr(&assign.value)?;

        if !value_ty.widens_to(var_ty) {
            return Err(self.err(
                format!(
                    "cannot assign '{}' to variable '{}' of type '{}'",
                    value_ty, assign.name, var_ty
                ),
                assign.span,
            ));
        }

        let widened = self.widen(value, value_ty, var_ty);
        self.builder.build_store(widened, ptr);
        // The assignment's value is the stored value.
        Ok((widened, var_ty))
    }

    fn emit_unary(&mut self, unary: &UnaryExpr) -> Emit<(Value, Ty)> {
        let (value, ty) = self.emit_expr(&unary.operand)?;
        match unary.op {
            UnOp::Neg => match ty {
                Ty::Float => Ok((self.builder.build_fneg(value), Ty::Float)),
                Ty::Int | Ty::Bool => {
                    // bool widens to int before negation
                    let wide = self.widen(value, ty, Ty::Int);
                    let negated = self.builder.build_binary(
                        BinaryOp::Sub,
                        Value::ConstInt(0),
                        wide,
                        IrType::I32,
                    );
                    Ok((negated, Ty::Int))
                }
            },
            UnOp::Not => {
                if ty != Ty::Bool {
                    return Err(self.err(
                        format!("'!' requires a 'bool' operand, found '{}'", ty),
                        unary.operand.span(),
                    ));
                }
                Ok((self.builder.build_not(value), Ty::Bool))
            }
        }
    }

    fn emit_binary(&mut self, binary: &minicc_par::BinaryExpr) -> Emit<(Value, Ty)> {
        if binary.op.is_logical() {
            return self.emit_logical(binary);
        }

        let (lhs, lhs_ty) = self.emit_expr(&binary.lhs)?;
        let (rhs, rhs_ty) = self.emit_expr(&binary.rhs)?;

        // Both operands widen to the wider of the two types.
        let common = lhs_ty.max(rhs_ty);
        let lhs = self.widen(lhs, lhs_ty, common);
        let rhs = self.widen(rhs, rhs_ty, common);

        if binary.op.is_comparison() {
            let result = if common == Ty::Float {
                self.builder.build_fcmp(fcmp_cond(binary.op), lhs, rhs)
            } else {
                self.builder.build_icmp(icmp_cond(binary.op), lhs, rhs)
            };
            return Ok((result, Ty::Bool));
        }

        // Arithmetic. An integer division or remainder by the literal 0
        // is a guaranteed trap, caught here.
        if matches!(binary.op, BinOp::Div | BinOp::Rem)
            && common != Ty::Float
            && matches!(
                &*binary.rhs,
                Expr::Literal(Lit {
                    kind: LitKind::Int(0),
                    ..
                })
            )
        {
            return Err(self.err("division by zero", binary.rhs.span()));
        }

        let op = if common == Ty::Float {
            float_arith_op(binary.op)
        } else {
            int_arith_op(binary.op)
        };
        let result = self.builder.build_binary(op, lhs, rhs, ir_type(common));
        Ok((result, common))
    }

    /// `&&` and `||` evaluate both operands and combine them with `i1`
    /// bitwise logic; both sides must be `bool`.
    fn emit_logical(&mut self, binary: &minicc_par::BinaryExpr) -> Emit<(Value, Ty)> {
        let (lhs, lhs_ty) = self.emit_expr(&binary.lhs)?;
        if lhs_ty != Ty::Bool {
            return Err(self.err(
                format!("'{}' requires 'bool' operands, found '{}'", binary.op, lhs_ty),
                binary.lhs.span(),
            ));
        }
        let (rhs, rhs_ty) = self.emit_expr(&binary.rhs)?;
        if rhs_ty != Ty::Bool {
            return Err(self.err(
                format!("'{}' requires 'bool' operands, found '{}'", binary.op, rhs_ty),
                binary.rhs.span(),
            ));
        }

        let op = match binary.op {
            BinOp::And => BinaryOp::And,
            _ => BinaryOp::Or,
        };
        let result = self.builder.build_binary(op, lhs, rhs, IrType::I1);
        Ok((result, Ty::Bool))
    }

    fn emit_call(&mut self, call: &CallExpr) -> Emit<Option<(Value, Ty)>> {
        let sig = match self.globals.get(&call.callee) {
            Some(GlobalEntry::Fn(sig)) => sig.clone(),
            Some(GlobalEntry::Var(_)) => {
                return Err(self.err(
                    format!("'{}' is a variable, not a function", call.callee),
                    call.span,
                ))
            }
            None => {
                return Err(self.err(format!("unknown function '{}'", call.callee), call.span))
            }
        };

        if call.args.len() != sig.params.len() {
            return Err(self.err(
                format!(
                    "wrong number of arguments to '{}': expected {}, found {}",
                    call.callee,
                    sig.params.len(),
                    call.args.len()
                ),
                call.span,
            ));
        }

        let mut args = Vec::with_capacity(call.args.len());
        for (arg, &param_ty) in call.args.iter().zip(&sig.params) {
            let (value, ty) = self.emit_expr(arg)?;
            if !ty.widens_to(param_ty) {
                return Err(self.err(
                    format!(
                        "cannot pass '{}' for a parameter of type '{}' in call to '{}'",
                        ty, param_ty, call.callee
                    ),
                    arg.span(),
                ));
            }
            args.push(self.widen(value, ty, param_ty));
        }

        let result = self.builder.build_call(call.callee, args, ret_ir(sig.ret));
        match (result, sig.ret) {
            (Some(value), Some(ty)) => Ok(Some((value, ty))),
            _ => Ok(None),
        }
    }

    /// Insert the conversions that take `value` from `from` up to `to`.
    ///
    /// Callers check `from.widens_to(to)` first.
    fn widen(&mut self, value: Value, from: Ty, to: Ty) -> Value {
        match (from, to) {
            (Ty::Bool, Ty::Int) => self.builder.build_zext(value),
            (Ty::Bool, Ty::Float) => {
                let wide = self.builder.build_zext(value);
                self.builder.build_sitofp(wide)
            }
            (Ty::Int, Ty::Float) => self.builder.build_sitofp(value),
            _ => value,
        }
    }
}

fn emit_literal(lit: &Lit) -> (Value, Ty) {
    match lit.kind {
        LitKind::Int(v) => (Value::ConstInt(v), Ty::Int),
        LitKind::Float(v) => (Value::ConstFloat(v), Ty::Float),
        LitKind::Bool(v) => (Value::ConstBool(v), Ty::Bool),
    }
}

fn ir_type(ty: Ty) -> IrType {
    match ty {
        Ty::Bool => IrType::I1,
        Ty::Int => IrType::I32,
        Ty::Float => IrType::F32,
    }
}

fn ret_ir(ret: Option<Ty>) -> IrType {
    match ret {
        Some(ty) => ir_type(ty),
        None => IrType::Void,
    }
}

fn int_arith_op(op: BinOp) -> BinaryOp {
    match op {
        BinOp::Add => BinaryOp::Add,
        BinOp::Sub => BinaryOp::Sub,
        BinOp::Mul => BinaryOp::Mul,
        BinOp::Div => BinaryOp::Sdiv,
        _ => BinaryOp::Srem,
    }
}

fn float_arith_op(op: BinOp) -> BinaryOp {
    match op {
        BinOp::Add => BinaryOp::Fadd,
        BinOp::Sub => BinaryOp::Fsub,
        BinOp::Mul => BinaryOp::Fmul,
        BinOp::Div => BinaryOp::Fdiv,
        _ => BinaryOp::Frem,
    }
}

fn icmp_cond(op: BinOp) -> IcmpCond {
    match op {
        BinOp::Eq => IcmpCond::Eq,
        BinOp::Ne => IcmpCond::Ne,
        BinOp::Lt => IcmpCond::Slt,
        BinOp::Le => IcmpCond::Sle,
        BinOp::Gt => IcmpCond::Sgt,
        _ => IcmpCond::Sge,
    }
}

fn fcmp_cond(op: BinOp) -> FcmpCond {
    match op {
        BinOp::Eq => FcmpCond::Oeq,
        BinOp::Ne => FcmpCond::One,
        BinOp::Lt => FcmpCond::Olt,
        BinOp::Le => FcmpCond::Ole,
        BinOp::Gt => FcmpCond::Ogt,
        _ => FcmpCond::Oge,
    }
}
