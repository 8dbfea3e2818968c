//! ndex-tasks - build task runner for the ndex library.
//!
//! Entry point: argument parsing, logging initialization, command dispatch.

use clap::Parser;
use miette::Result;
use ndex_tasks_cli::{cli, commands, error, logger, ui};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let result = match args.command {
        cli::Command::Build(build_args) => commands::build::execute(build_args).await,
        cli::Command::Dist(dist_args) => commands::dist::execute(dist_args).await,
        cli::Command::Run(run_args) => commands::run::execute(run_args).await,
        cli::Command::Serve(serve_args) => commands::serve::execute(serve_args).await,
    };

    result.map_err(error::into_report)
}
