mod adapters;
mod cli;
mod config;
mod core;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::context::ProjectContext;
use cli::{Cli, Commands, Outcome};

/// Env var holding the diagnostic log filter, e.g. `REVIEW_GATE_LOG=debug`.
const LOG_ENV: &str = "REVIEW_GATE_LOG";

fn main() {
    init_tracing();

    // Clap reports usage errors with exit code 2, which hosts read as
    // "review required"; usage errors exit 1 instead.
    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    let ctx = match ProjectContext::resolve(&args.project_dir, args.plugin_root.as_deref()) {
        Ok(ctx) => ctx,
        Err(e) => {
            cli::output::error(&format!("Error: {e}"));
            std::process::exit(1);
        }
    };

    let result = match &args.command {
        Commands::Track => cli::commands::track::execute(&ctx).map(|()| Outcome::Done),
        Commands::Check => cli::commands::check::execute(&ctx),
        Commands::Init => cli::commands::init::execute(&ctx).map(|()| Outcome::Done),
        Commands::Status => cli::commands::status::execute(&ctx).map(|()| Outcome::Done),
        Commands::Log { last } => cli::commands::log::execute(&ctx, *last).map(|()| Outcome::Done),
    };

    match result {
        Ok(outcome) => std::process::exit(outcome.exit_code()),
        Err(e) => {
            cli::output::error(&format!("Error: {e}"));
            std::process::exit(1);
        }
    }
}

/// Diagnostics go to stderr, quiet unless `REVIEW_GATE_LOG` asks for more.
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
