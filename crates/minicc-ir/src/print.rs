//! Textual IR rendering.
//!
//! A module renders in declaration order: globals first, then functions,
//! each function's blocks in creation order and each block's instructions
//! in emission order. Stack slots are named after the variable they back
//! (`%n.addr`); every other value gets a sequential number.

use rustc_hash::FxHashMap;
use std::fmt;

use crate::ir::*;

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;

        for (name, ty) in &self.globals {
            writeln!(f, "@{} = global {} {}", name, ty, zero_of(*ty))?;
            first = false;
        }

        for function in self.functions.values() {
            if !first {
                writeln!(f)?;
            }
            first = false;
            write_function(f, function)?;
        }
        Ok(())
    }
}

fn zero_of(ty: IrType) -> &'static str {
    match ty {
        IrType::I1 => "false",
        IrType::I32 => "0",
        IrType::F32 => "0.000000e+00",
        IrType::Void => "void",
    }
}

fn write_function(f: &mut fmt::Formatter<'_>, func: &Function) -> fmt::Result {
    if func.is_extern {
        let params: Vec<String> = func.params.iter().map(|(_, ty)| ty.to_string()).collect();
        return writeln!(f, "declare {} @{}({})", func.ret, func.name, params.join(", "));
    }

    let params: Vec<String> = func
        .params
        .iter()
        .map(|(name, ty)| format!("{} %{}", ty, name))
        .collect();
    writeln!(f, "define {} @{}({}) {{", func.ret, func.name, params.join(", "))?;

    let names = assign_names(func);
    let printer = FunctionPrinter { func, names };

    for (index, block) in func.blocks.iter().enumerate() {
        if index > 0 {
            writeln!(f)?;
        }
        writeln!(f, "{}:", block.label)?;
        for &inst_id in &block.insts {
            printer.write_inst(f, inst_id)?;
        }
        if let Some(terminator) = &block.terminator {
            printer.write_terminator(f, terminator)?;
        }
    }

    writeln!(f, "}}")
}

/// Give every value-producing instruction a printable name.
fn assign_names(func: &Function) -> FxHashMap<InstId, String> {
    let mut names = FxHashMap::default();
    let mut slot_counts: FxHashMap<&str, u32> = FxHashMap::default();
    let mut counter = 0u32;

    for block in func.blocks.iter() {
        for &inst_id in &block.insts {
            let inst = &func.insts[inst_id];
            if !inst.produces_value() {
                continue;
            }
            let name = match &inst.kind {
                InstKind::Alloca { name } => {
                    let count = slot_counts.entry(name.as_str()).or_insert(0);
                    let label = if *count == 0 {
                        format!("{}.addr", name)
                    } else {
                        format!("{}.addr{}", name, count)
                    };
                    *count += 1;
                    label
                }
                _ => {
                    let label = counter.to_string();
                    counter += 1;
                    label
                }
            };
            names.insert(inst_id, name);
        }
    }
    names
}

struct FunctionPrinter<'a> {
    func: &'a Function,
    names: FxHashMap<InstId, String>,
}

impl<'a> FunctionPrinter<'a> {
    fn val(&self, value: Value) -> String {
        match value {
            Value::ConstInt(v) => v.to_string(),
            Value::ConstFloat(v) => format!("{:e}", v),
            Value::ConstBool(v) => v.to_string(),
            Value::Inst(id) => format!("%{}", self.names[&id]),
            Value::Param(i) => format!("%{}", self.func.params[i].0),
        }
    }

    fn typed_val(&self, value: Value) -> String {
        format!("{} {}", self.func.type_of(value), self.val(value))
    }

    fn ptr(&self, ptr: Ptr) -> String {
        match ptr {
            Ptr::Slot(id) => format!("%{}", self.names[&id]),
            Ptr::Global(name) => format!("@{}", name),
        }
    }

    fn write_inst(&self, f: &mut fmt::Formatter<'_>, inst_id: InstId) -> fmt::Result {
        let inst = &self.func.insts[inst_id];
        write!(f, "  ")?;
        if inst.produces_value() {
            write!(f, "%{} = ", self.names[&inst_id])?;
        }
        match &inst.kind {
            InstKind::Alloca { .. } => writeln!(f, "alloca {}", inst.ty),
            InstKind::Load { ptr } => writeln!(f, "load {}, ptr {}", inst.ty, self.ptr(*ptr)),
            InstKind::Store { value, ptr } => {
                writeln!(f, "store {}, ptr {}", self.typed_val(*value), self.ptr(*ptr))
            }
            InstKind::Binary { op, lhs, rhs } => writeln!(
                f,
                "{} {} {}, {}",
                op,
                inst.ty,
                self.val(*lhs),
                self.val(*rhs)
            ),
            InstKind::Icmp { cond, lhs, rhs } => writeln!(
                f,
                "icmp {} {} {}, {}",
                cond,
                self.func.type_of(*lhs),
                self.val(*lhs),
                self.val(*rhs)
            ),
            InstKind::Fcmp { cond, lhs, rhs } => writeln!(
                f,
                "fcmp {} float {}, {}",
                cond,
                self.val(*lhs),
                self.val(*rhs)
            ),
            InstKind::Zext { value } => {
                writeln!(f, "zext i1 {} to i32", self.val(*value))
            }
            InstKind::Sitofp { value } => {
                writeln!(f, "sitofp i32 {} to float", self.val(*value))
            }
            InstKind::Fneg { value } => writeln!(f, "fneg float {}", self.val(*value)),
            InstKind::Not { value } => writeln!(f, "xor i1 {}, true", self.val(*value)),
            InstKind::Call { callee, args } => {
                let args: Vec<String> = args.iter().map(|a| self.typed_val(*a)).collect();
                writeln!(f, "call {} @{}({})", inst.ty, callee, args.join(", "))
            }
        }
    }

    fn write_terminator(&self, f: &mut fmt::Formatter<'_>, terminator: &Terminator) -> fmt::Result {
        write!(f, "  ")?;
        match terminator {
            Terminator::Br { dest } => {
                writeln!(f, "br label %{}", self.func.blocks[*dest].label)
            }
            Terminator::CondBr {
                cond,
                then_dest,
                else_dest,
            } => writeln!(
                f,
                "br i1 {}, label %{}, label %{}",
                self.val(*cond),
                self.func.blocks[*then_dest].label,
                self.func.blocks[*else_dest].label
            ),
            Terminator::Ret { value: Some(value) } => {
                writeln!(f, "ret {}", self.typed_val(*value))
            }
            Terminator::Ret { value: None } => writeln!(f, "ret void"),
            Terminator::Unreachable => writeln!(f, "unreachable"),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::FunctionBuilder;
    use crate::ir::*;
    use minicc_util::Symbol;

    fn sym(s: &str) -> Symbol {
        Symbol::intern(s)
    }

    #[test]
    fn test_print_globals_and_declare() {
        let mut module = Module::new();
        module.add_global(sym("pg_counter"), IrType::I32);
        module.add_function(Function::declaration(
            sym("print_int"),
            vec![(sym("x"), IrType::I32)],
            IrType::Void,
        ));

        let text = module.to_string();
        assert!(text.contains("@pg_counter = global i32 0"));
        assert!(text.contains("declare void @print_int(i32)"));
    }

    #[test]
    fn test_print_simple_function() {
        let mut module = Module::new();
        let mut builder =
            FunctionBuilder::new(sym("pr_twice"), vec![(sym("n"), IrType::I32)], IrType::I32);
        let slot = builder.build_alloca(sym("n"), IrType::I32);
        builder.build_store(Value::Param(0), Ptr::Slot(slot));
        let n = builder.build_load(Ptr::Slot(slot), IrType::I32);
        let doubled = builder.build_binary(BinaryOp::Add, n, n, IrType::I32);
        builder.build_ret(doubled);
        module.add_function(builder.finish());

        let text = module.to_string();
        assert!(text.contains("define i32 @pr_twice(i32 %n) {"));
        assert!(text.contains("entry:"));
        assert!(text.contains("%n.addr = alloca i32"));
        assert!(text.contains("store i32 %n, ptr %n.addr"));
        assert!(text.contains("%0 = load i32, ptr %n.addr"));
        assert!(text.contains("%1 = add i32 %0, %0"));
        assert!(text.contains("ret i32 %1"));
    }

    #[test]
    fn test_print_branches() {
        let mut module = Module::new();
        let mut builder = FunctionBuilder::new(sym("pr_branchy"), Vec::new(), IrType::Void);
        let then_block = builder.create_block("then");
        let end_block = builder.create_block("end");
        let cond = builder.build_icmp(IcmpCond::Slt, Value::ConstInt(1), Value::ConstInt(2));
        builder.build_cond_br(cond, then_block, end_block);
        builder.position_at_end(then_block);
        builder.build_br(end_block);
        builder.position_at_end(end_block);
        builder.build_ret_void();
        module.add_function(builder.finish());

        let text = module.to_string();
        assert!(text.contains("%0 = icmp slt i32 1, 2"));
        assert!(text.contains("br i1 %0, label %then, label %end"));
        assert!(text.contains("then:"));
        assert!(text.contains("br label %end"));
        assert!(text.contains("ret void"));
    }

    #[test]
    fn test_print_shadowed_slot_names_are_unique() {
        let mut module = Module::new();
        let mut builder = FunctionBuilder::new(sym("pr_shadow"), Vec::new(), IrType::Void);
        builder.build_alloca(sym("x"), IrType::I32);
        builder.build_alloca(sym("x"), IrType::F32);
        builder.build_ret_void();
        module.add_function(builder.finish());

        let text = module.to_string();
        assert!(text.contains("%x.addr = alloca i32"));
        assert!(text.contains("%x.addr1 = alloca float"));
    }

    #[test]
    fn test_print_conversions_and_logic() {
        let mut module = Module::new();
        let mut builder = FunctionBuilder::new(sym("pr_casts"), Vec::new(), IrType::F32);
        let wide = builder.build_zext(Value::ConstBool(true));
        let fwide = builder.build_sitofp(wide);
        let neg = builder.build_fneg(fwide);
        builder.build_ret(neg);
        module.add_function(builder.finish());

        let text = module.to_string();
        assert!(text.contains("%0 = zext i1 true to i32"));
        assert!(text.contains("%1 = sitofp i32 %0 to float"));
        assert!(text.contains("%2 = fneg float %1"));
    }

    #[test]
    fn test_print_void_call_has_no_result_name() {
        let mut module = Module::new();
        let mut builder = FunctionBuilder::new(sym("pr_caller"), Vec::new(), IrType::Void);
        builder.build_call(sym("print_int"), vec![Value::ConstInt(7)], IrType::Void);
        builder.build_ret_void();
        module.add_function(builder.finish());

        let text = module.to_string();
        assert!(text.contains("  call void @print_int(i32 7)"));
        assert!(!text.contains("= call void"));
    }
}
