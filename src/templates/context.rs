//! Template context structures
//!
//! Converts a descriptor batch into template-friendly data.

use chrono::Utc;
use serde::Serialize;

use crate::compile::CompiledFormula;
use crate::emit::EmitConfig;

/// Context for rendering one emission unit
#[derive(Debug, Clone, Serialize)]
pub struct ModuleContext {
    /// Whether to include the generated-by header
    pub provenance: bool,
    /// Generation timestamp (RFC 3339)
    pub generated_at: String,
    /// Tool version for the header
    pub version: String,
    /// Go package name (ignored by the Rust template)
    pub package: String,
    /// Formulas in emission order
    pub formulas: Vec<FormulaView>,
}

/// View of one compiled formula
#[derive(Debug, Clone, Serialize)]
pub struct FormulaView {
    /// Minted function name
    pub name: String,
    /// Verbatim formula text
    pub logic: String,
    /// Variables in binding order
    pub variables: Vec<String>,
}

impl ModuleContext {
    pub fn from_batch(formulas: &[CompiledFormula], config: &EmitConfig) -> Self {
        Self {
            provenance: config.provenance,
            generated_at: Utc::now().to_rfc3339(),
            version: crate::VERSION.to_string(),
            package: config.package.clone(),
            formulas: formulas.iter().map(FormulaView::from_compiled).collect(),
        }
    }
}

impl FormulaView {
    fn from_compiled(formula: &CompiledFormula) -> Self {
        Self {
            name: formula.name.clone(),
            logic: formula.logic.clone(),
            variables: formula.variables.clone(),
        }
    }
}
