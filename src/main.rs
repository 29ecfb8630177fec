use clap::Parser;
use std::path::PathBuf;
use tracing::Level;

use cpplite::config::{self, Emit};
use cpplite::diagnostics::{CompileError, render_error};

#[derive(Parser)]
#[command(name = "cpplite", version, about = "Parse a C++Lite program and print its abstract syntax")]
struct Cli {
    /// Source file path
    file: PathBuf,

    /// What to print on success (overrides cpplite.toml)
    #[arg(long, value_enum)]
    emit: Option<Emit>,

    /// Config file (defaults to the nearest cpplite.toml above the source)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Render errors as labelled source reports
    #[arg(long)]
    rich_errors: bool,

    /// Increase log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_max_level(level)
        .init();
}

fn fail(err: &CompileError) -> ! {
    eprintln!("error: {err}");
    std::process::exit(1);
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = config::resolve_config(cli.config.as_deref(), &cli.file).unwrap_or_else(|e| fail(&e));
    let emit = cli.emit.unwrap_or(config.output.emit);
    let rich = cli.rich_errors || config.diagnostics.rich;

    let source = cpplite::read_source(&cli.file).unwrap_or_else(|e| fail(&e));

    match cpplite::render(&source, emit, config.output.indent) {
        Ok(out) => print!("{out}"),
        Err(err) => {
            if rich {
                let filename = cli.file.to_string_lossy();
                if let Err(io) = render_error(&source, &filename, &err) {
                    tracing::warn!("could not render report: {io}");
                    eprintln!("{err}");
                }
            } else {
                eprintln!("{err}");
            }
            std::process::exit(1);
        }
    }
}
