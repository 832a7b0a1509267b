//! minicc-drv - the compiler driver.
//!
//! Orchestrates the pipeline: read the source file, lex and parse on
//! demand, analyze and emit IR, and write the textual module to
//! `output.ll` in the working directory.
//!
//! Invocation takes exactly one positional argument, the path to a Mini-C
//! source file. Arity mismatch prints a one-line usage message; any
//! failure exits with status 1. Diagnostics go to standard error, one line
//! each, in pipeline order; partial IR is never flushed on error.
//!
//! Each [`Session`] owns its own diagnostic handler, so running the
//! front-end twice in one process means two sessions with fresh state.

use anyhow::{bail, Context, Result};
use minicc_par::Parser;
use minicc_util::Handler;
use std::path::PathBuf;
use tracing::debug;

/// Driver configuration for one compilation.
#[derive(Debug, Clone)]
pub struct Config {
    /// The Mini-C source file.
    pub input: PathBuf,
    /// Where the textual IR goes.
    pub output: PathBuf,
}

impl Config {
    /// Configuration for compiling `input` to `output.ll` in the working
    /// directory.
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: PathBuf::from("output.ll"),
        }
    }
}

/// State for one compiler invocation.
pub struct Session {
    pub config: Config,
    pub handler: Handler,
}

impl Session {
    /// Create a session with fresh diagnostic state.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            handler: Handler::new(),
        }
    }

    /// Compile the configured input file and write the IR.
    pub fn run(&self) -> Result<()> {
        debug!(input = %self.config.input.display(), "reading source");
        let source = std::fs::read_to_string(&self.config.input)
            .with_context(|| format!("cannot open '{}'", self.config.input.display()))?;

        let ir = self.compile_source(&source)?;

        debug!(output = %self.config.output.display(), "writing ir");
        std::fs::write(&self.config.output, ir)
            .with_context(|| format!("cannot write '{}'", self.config.output.display()))?;
        Ok(())
    }

    /// Run the front-end over `source` and return the rendered IR.
    ///
    /// Diagnostics are printed to standard error; any diagnostic fails the
    /// run and no IR is returned.
    pub fn compile_source(&self, source: &str) -> Result<String> {
        debug!("lexing and parsing");
        let mut parser = Parser::new(source, &self.handler);
        let program = parser.parse();
        if self.handler.has_errors() {
            self.report_diagnostics();
            bail!("compilation failed");
        }

        debug!("analyzing and emitting ir");
        let module = minicc_sem::analyze(&program, &self.handler);
        if self.handler.has_errors() {
            self.report_diagnostics();
            bail!("compilation failed");
        }

        Ok(module.to_string())
    }

    fn report_diagnostics(&self) {
        for diagnostic in self.handler.diagnostics() {
            eprintln!("{}", diagnostic);
        }
    }
}

/// CLI entry point: parse arguments, run a session.
pub fn main() -> Result<()> {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() != 1 {
        eprintln!("Usage: minicc <input file>");
        std::process::exit(1);
    }

    let session = Session::new(Config::new(&args[0]));
    session.run()
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(Config::new("test.c"))
    }

    #[test]
    fn test_compile_source_produces_ir() {
        let ir = session()
            .compile_source("int one(void) { return 1; }")
            .expect("compilation should succeed");
        assert!(ir.contains("define i32 @one()"));
        assert!(ir.contains("ret i32 1"));
    }

    #[test]
    fn test_syntax_error_fails_without_analysis() {
        let session = session();
        let result = session.compile_source("int x");
        assert!(result.is_err());
        assert_eq!(session.handler.error_count(), 1);
    }

    #[test]
    fn test_semantic_error_fails() {
        let session = session();
        let result = session.compile_source("void f(void) { return 1; }");
        assert!(result.is_err());
        assert!(session
            .handler
            .diagnostics()
            .iter()
            .any(|d| d.kind == minicc_util::DiagnosticKind::Semantic));
    }

    #[test]
    fn test_two_sessions_are_independent() {
        let bad = session();
        let _ = bad.compile_source("int x");
        assert!(bad.handler.has_errors());

        let good = session();
        let ir = good.compile_source("int g;").expect("fresh session");
        assert!(!good.handler.has_errors());
        assert!(ir.contains("@g = global i32 0"));
    }

    #[test]
    fn test_default_output_is_output_ll() {
        let config = Config::new("foo.c");
        assert_eq!(config.output, PathBuf::from("output.ll"));
    }
}
