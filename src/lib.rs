#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod ir;
pub mod layout;
pub mod layout_dump;
mod log;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{ConfigError, LayoutConfig, load_config};
pub use ir::{Step, StepKind, Workflow, parse_workflow};
pub use layout::{LayoutError, LayoutResult, compute_layout, layout_step};
pub use layout_dump::LayoutDump;

/// Parse a workflow definition and lay it out, returning the JSON dump.
pub fn layout_json(source: &str, config: &LayoutConfig) -> anyhow::Result<String> {
    let workflow = parse_workflow(source)?;
    let layout = compute_layout(&workflow, config)?;
    LayoutDump::from_layout(&layout, config).to_json()
}
