use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use mcviz::{McvizOptions, Registry, run_main};
use mcviz_error::Result;

#[derive(Parser, Debug)]
#[command(
    name = "mcviz",
    about = "mcviz: draw a Monte-Carlo event as a Feynman-style diagram",
    version
)]
pub struct Cli {
    /// Event file to draw
    #[arg(value_name = "INPUT", required_unless_present = "list")]
    input: Option<PathBuf>,

    /// Layout: feynman, dual, phi, jetless or combined
    #[arg(short = 'l', long, value_name = "NAME")]
    layout: Option<String>,

    /// Tool to run before layout, as Name or Name:key=value,... (repeatable, in order)
    #[arg(short = 't', long = "tool", value_name = "SPEC", action = clap::ArgAction::Append)]
    tools: Vec<String>,

    /// Style to apply, as Name or Name:key=value,... (repeatable, in order)
    #[arg(short = 's', long = "style", value_name = "SPEC", action = clap::ArgAction::Append)]
    styles: Vec<String>,

    /// Output file path (writes to file instead of stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<PathBuf>,

    /// List loaders, tools, layouts and styles with their options
    #[arg(long, default_value_t = false)]
    list: bool,
}

pub fn run(args: Cli) -> Result<()> {
    let total_start = Instant::now();

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }

    let opts = McvizOptions {
        input: args.input,
        layout: args.layout,
        tools: args.tools,
        styles: args.styles,
        output: args.output,
        list: args.list,
    };

    let registry = Registry::new();
    let output = run_main(&registry, &opts)?;
    match opts.output {
        Some(ref path) if !opts.list => {
            std::fs::write(path, &output)?;
            tracing::info!(path = %path.display(), "output written");
        }
        _ => println!("{output}"),
    }

    tracing::info!(total_secs = total_start.elapsed().as_secs_f64(), "complete");
    Ok(())
}

pub fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "execution failed");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
