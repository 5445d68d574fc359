//! Batch compilation: parse, extract, dedup, build descriptors
//!
//! The pipeline for each submitted formula is parse -> extract variables ->
//! registry check -> descriptor. Duplicates and parse failures contribute no
//! descriptor; a failed parse never reaches the registry, so it never
//! consumes a counter value.

use serde::Serialize;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::expr::FormulaParser;
use crate::registry::FormulaRegistry;

/// The unit handed to the emitter: minted name, verbatim logic text, and the
/// variables in binding order. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledFormula {
    /// Synthetic function name (`Formula_<N>`)
    pub name: String,
    /// Original formula text, embedded verbatim in the generated function
    pub logic: String,
    /// Distinct variables in first-seen order; entry `i` binds argument `i`
    pub variables: Vec<String>,
}

impl CompiledFormula {
    pub fn new(
        name: impl Into<String>,
        logic: impl Into<String>,
        variables: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            logic: logic.into(),
            variables,
        }
    }
}

/// Result of compiling one formula against a registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileOutcome {
    /// First sighting: a descriptor was built.
    Compiled(CompiledFormula),
    /// The text was already registered under this name; no descriptor.
    Duplicate(String),
}

/// What to do when a formula in a batch fails to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseErrorPolicy {
    /// Fail the whole batch on the first malformed formula.
    #[default]
    Abort,
    /// Record the failure and continue with the remaining formulas.
    Skip,
}

/// A duplicate submission: the text was already registered under `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateNote {
    pub formula: String,
    pub name: String,
}

/// A formula that failed to parse, recorded under [`ParseErrorPolicy::Skip`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseFailure {
    pub formula: String,
    pub reason: String,
}

/// Outcome of one [`Compiler::compile_batch`] call, in submission order.
#[derive(Debug, Default, Serialize)]
pub struct BatchReport {
    /// Newly named formulas, ready for emission
    pub compiled: Vec<CompiledFormula>,
    /// Informational skips; not errors
    pub duplicates: Vec<DuplicateNote>,
    /// Malformed formulas that were skipped
    pub failures: Vec<ParseFailure>,
}

/// Drives the compilation pipeline for one registry handle.
///
/// The registry accumulates names across batches, so retrying a failed batch
/// on the same compiler is idempotent: already-named formulas come back as
/// duplicates instead of minting again.
#[derive(Debug, Default)]
pub struct Compiler {
    registry: FormulaRegistry,
}

impl Compiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a compiler around an existing registry.
    pub fn with_registry(registry: FormulaRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &FormulaRegistry {
        &self.registry
    }

    /// Compile one formula: parse, extract variables, then name it.
    pub fn compile(&self, formula: &str) -> Result<CompileOutcome> {
        let variables = FormulaParser::extract_variables(formula)?;
        let (name, duplicate) = self.registry.assign_name(formula);
        if duplicate {
            info!(formula = %formula, name = %name, "skipping duplicate formula");
            return Ok(CompileOutcome::Duplicate(name));
        }
        Ok(CompileOutcome::Compiled(CompiledFormula::new(
            name, formula, variables,
        )))
    }

    /// Compile a batch in submission order. `on_error` is the caller policy
    /// for malformed formulas; duplicates are never errors.
    pub fn compile_batch<S: AsRef<str>>(
        &self,
        formulas: &[S],
        on_error: ParseErrorPolicy,
    ) -> Result<BatchReport> {
        let mut report = BatchReport::default();
        for formula in formulas {
            let formula = formula.as_ref();
            match self.compile(formula) {
                Ok(CompileOutcome::Compiled(compiled)) => report.compiled.push(compiled),
                Ok(CompileOutcome::Duplicate(name)) => report.duplicates.push(DuplicateNote {
                    formula: formula.to_string(),
                    name,
                }),
                Err(Error::Parse { formula, reason }) => match on_error {
                    ParseErrorPolicy::Skip => {
                        warn!(formula = %formula, reason = %reason, "skipping malformed formula");
                        report.failures.push(ParseFailure { formula, reason });
                    }
                    ParseErrorPolicy::Abort => {
                        return Err(Error::Parse { formula, reason });
                    }
                },
                Err(e) => return Err(e),
            }
        }
        Ok(report)
    }
}
