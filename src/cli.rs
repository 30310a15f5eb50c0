use crate::config::load_config;
use crate::ir::parse_workflow;
use crate::layout::compute_layout;
use crate::layout_dump::{LayoutDump, write_layout_dump};
use anyhow::Result;
use clap::Parser;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "flowlayout",
    version,
    about = "Lay out a workflow step tree and dump nodes, connectors and affordances as JSON"
)]
pub struct Args {
    /// Workflow definition (JSON or JSON5) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file for the layout dump. Defaults to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Layout config JSON file
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Horizontal position of the layout origin
    #[arg(long = "origin-x", default_value_t = 0.0, allow_hyphen_values = true)]
    pub origin_x: f32,

    /// Vertical position of the layout origin
    #[arg(long = "origin-y", default_value_t = 0.0, allow_hyphen_values = true)]
    pub origin_y: f32,
}

pub fn run() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    let input = read_input(args.input.as_deref())?;
    let workflow = parse_workflow(&input)?;
    let layout = compute_layout(&workflow, &config)?.translate(args.origin_x, args.origin_y);

    match args.output.as_deref() {
        Some(path) => write_layout_dump(path, &layout, &config)?,
        None => println!("{}", LayoutDump::from_layout(&layout, &config).to_json()?),
    }
    Ok(())
}

fn init_tracing() {
    // stdout carries the dump, so logs go to stderr
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init();
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return Ok(std::fs::read_to_string(path)?);
        }
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_origin_and_paths() {
        let args = Args::try_parse_from([
            "flowlayout",
            "-i",
            "flow.json5",
            "--origin-x",
            "-40",
            "--origin-y",
            "12.5",
        ])
        .unwrap();
        assert_eq!(args.input.as_deref(), Some(Path::new("flow.json5")));
        assert_eq!(args.origin_x, -40.0);
        assert_eq!(args.origin_y, 12.5);
        assert!(args.output.is_none());
    }
}
