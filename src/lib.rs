// Production-quality lints
#![warn(
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
// Deny truly dangerous patterns
#![deny(clippy::mem_forget)]
// Allow common patterns in library code
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! # formulac — formula-to-source compiler
//!
//! Compiles small arithmetic formulas, authored as text, into named callable
//! functions and emits them as generated source plus a name-to-function
//! dispatch table, so externally defined business rules run as statically
//! compiled code instead of being interpreted at runtime.
//!
//! ## Core Concept
//!
//! Each submitted formula is parsed, its variables are extracted in
//! first-seen order (that order is the positional argument contract of the
//! generated function), and its text is checked against a process-wide
//! registry so identical text is compiled exactly once under a stable
//! synthetic name (`Formula_1`, `Formula_2`, ...). Surviving formulas become
//! descriptors, and the whole batch renders into one source module.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use formulac::{Compiler, Emitter, ParseErrorPolicy, Target};
//!
//! let compiler = Compiler::new();
//! let report = compiler.compile_batch(
//!     &["a + b - c", "a * b + c/d", "a + b - c"],
//!     ParseErrorPolicy::Abort,
//! )?;
//! // two descriptors; the repeated text is a duplicate notice, not an error
//! assert_eq!(report.compiled.len(), 2);
//! assert_eq!(report.duplicates.len(), 1);
//!
//! let code = Emitter::new(Target::Rust).emit(&report.compiled)?;
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                                                          │
//! │  FORMULA TEXT                                            │
//! │       │                                                  │
//! │       ├──► FormulaParser::parse ──► expression tree      │
//! │       │                                                  │
//! │       ├──► extract_variables ──► binding order           │
//! │       │                                                  │
//! │       └──► FormulaRegistry::assign_name ──► Formula_<N>  │
//! │                     │                                    │
//! │                     ▼                                    │
//! │             CompiledFormula batch                        │
//! │                     │                                    │
//! │                     └──► Emitter::emit ──► source module │
//! │                           (functions + dispatch table)   │
//! │                                                          │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The parser, extractor, and emitter are stateless; the registry is the
//! only shared state and is safe to hammer from concurrent workers.

pub mod compile;
pub mod emit;
pub mod error;
pub mod expr;
pub mod registry;
pub mod templates;

// Re-exports
pub use compile::{
    BatchReport, CompileOutcome, CompiledFormula, Compiler, DuplicateNote, ParseErrorPolicy,
    ParseFailure,
};
pub use emit::{EmitConfig, Emitter, Target};
pub use error::{Error, Result};
pub use expr::{FormulaExpr, FormulaParser};
pub use registry::FormulaRegistry;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
