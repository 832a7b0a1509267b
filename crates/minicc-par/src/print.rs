//! Syntax tree rendering.
//!
//! An indented tree dump used by tests and for debugging the parser. One
//! node per line; children indent by two spaces.

use crate::ast::*;
use std::fmt;

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "program")?;
        for item in &self.items {
            write_item(f, item, 1)?;
        }
        Ok(())
    }
}

fn pad(f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    write!(f, "{}", "  ".repeat(depth))
}

fn ret_str(ret: &Option<Ty>) -> String {
    match ret {
        Some(ty) => ty.to_string(),
        None => "void".to_string(),
    }
}

fn write_item(f: &mut fmt::Formatter<'_>, item: &Item, depth: usize) -> fmt::Result {
    match item {
        Item::Extern(proto) => {
            pad(f, depth)?;
            writeln!(f, "extern {} {}{}", ret_str(&proto.ret), proto.name, params_str(proto))
        }
        Item::Global(global) => {
            pad(f, depth)?;
            writeln!(f, "global {} {}", global.ty, global.name)
        }
        Item::Fn(decl) => {
            pad(f, depth)?;
            writeln!(
                f,
                "fn {} {}{}",
                ret_str(&decl.proto.ret),
                decl.proto.name,
                params_str(&decl.proto)
            )?;
            write_block(f, &decl.body, depth + 1)
        }
    }
}

fn params_str(proto: &Prototype) -> String {
    let params: Vec<String> = proto
        .params
        .iter()
        .map(|p| format!("{} {}", p.ty, p.name))
        .collect();
    format!("({})", params.join(", "))
}

fn write_block(f: &mut fmt::Formatter<'_>, block: &Block, depth: usize) -> fmt::Result {
    pad(f, depth)?;
    writeln!(f, "block")?;
    for decl in &block.decls {
        pad(f, depth + 1)?;
        writeln!(f, "local {} {}", decl.ty, decl.name)?;
    }
    for stmt in &block.stmts {
        write_stmt(f, stmt, depth + 1)?;
    }
    Ok(())
}

fn write_stmt(f: &mut fmt::Formatter<'_>, stmt: &Stmt, depth: usize) -> fmt::Result {
    match stmt {
        Stmt::Expr(expr) => {
            pad(f, depth)?;
            writeln!(f, "expr")?;
            write_expr(f, expr, depth + 1)
        }
        Stmt::Block(block) => write_block(f, block, depth),
        Stmt::If(if_stmt) => {
            pad(f, depth)?;
            writeln!(f, "if")?;
            write_expr(f, &if_stmt.cond, depth + 1)?;
            write_block(f, &if_stmt.then_block, depth + 1)?;
            if let Some(else_block) = &if_stmt.else_block {
                pad(f, depth)?;
                writeln!(f, "else")?;
                write_block(f, else_block, depth + 1)?;
            }
            Ok(())
        }
        Stmt::While(while_stmt) => {
            pad(f, depth)?;
            writeln!(f, "while")?;
            write_expr(f, &while_stmt.cond, depth + 1)?;
            write_stmt(f, &while_stmt.body, depth + 1)
        }
        Stmt::Return(ret) => {
            pad(f, depth)?;
            writeln!(f, "return")?;
            if let Some(value) = &ret.value {
                write_expr(f, value, depth + 1)?;
            }
            Ok(())
        }
        Stmt::Empty => {
            pad(f, depth)?;
            writeln!(f, "empty")
        }
    }
}

fn write_expr(f: &mut fmt::Formatter<'_>, expr: &Expr, depth: usize) -> fmt::Result {
    pad(f, depth)?;
    match expr {
        Expr::Literal(lit) => match lit.kind {
            LitKind::Int(v) => writeln!(f, "int {}", v),
            LitKind::Float(v) => writeln!(f, "float {}", v),
            LitKind::Bool(v) => writeln!(f, "bool {}", v),
        },
        Expr::Var(var) => writeln!(f, "var {}", var.name),
        Expr::Call(call) => {
            writeln!(f, "call {}", call.callee)?;
            for arg in &call.args {
                write_expr(f, arg, depth + 1)?;
            }
            Ok(())
        }
        Expr::Unary(unary) => {
            writeln!(f, "unary {}", unary.op)?;
            write_expr(f, &unary.operand, depth + 1)
        }
        Expr::Binary(binary) => {
            writeln!(f, "binary {}", binary.op)?;
            write_expr(f, &binary.lhs, depth + 1)?;
            write_expr(f, &binary.rhs, depth + 1)
        }
        Expr::Assign(assign) => {
            writeln!(f, "assign {}", assign.name)?;
            write_expr(f, &assign.value, depth + 1)
        }
    }
}
