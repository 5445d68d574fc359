//! Template-based code emission
//!
//! Uses MiniJinja templates for properly formatted generated source.
//! Templates are embedded into the binary; one template per target language.
//! Rendering carries no naming or dedup rules, it lays out whatever batch it
//! is handed, in the order given.

pub mod context;

use minijinja::Environment;
use std::sync::OnceLock;

use crate::emit::Target;
use crate::error::{Error, Result};

// Embedded templates (compiled into binary)
mod embedded {
    pub const RUST_MODULE: &str = include_str!("../../templates/rust.jinja");
    pub const GO_MODULE: &str = include_str!("../../templates/go.jinja");
}

/// Template engine singleton
static ENGINE: OnceLock<Environment<'static>> = OnceLock::new();

/// Initialize the template engine with embedded templates
fn init_engine() -> Environment<'static> {
    let mut env = Environment::new();
    env.add_template("rust.jinja", embedded::RUST_MODULE)
        .expect("Failed to load rust module template");
    env.add_template("go.jinja", embedded::GO_MODULE)
        .expect("Failed to load go module template");
    env
}

/// Get the global template engine
pub fn engine() -> &'static Environment<'static> {
    ENGINE.get_or_init(init_engine)
}

/// Get the template name for a target language
pub fn template_name(target: Target) -> &'static str {
    match target {
        Target::Rust => "rust.jinja",
        Target::Go => "go.jinja",
    }
}

/// Render one emission unit from a prepared context.
pub fn render_module(ctx: &context::ModuleContext, target: Target) -> Result<String> {
    let template = engine()
        .get_template(template_name(target))
        .map_err(|e| Error::Render(e.to_string()))?;
    template.render(ctx).map_err(|e| Error::Render(e.to_string()))
}
