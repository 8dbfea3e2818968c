//! Command-line interface definition for the ndex task runner.
//!
//! # Command Structure
//!
//! - `ndex-tasks build` - build the spec bundle, then serve it with live reload
//! - `ndex-tasks dist` - build the distributable library bundle
//! - `ndex-tasks run <target>` - build any registered target
//! - `ndex-tasks serve` - serve an already-built output directory

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// ndex-tasks - build orchestration for the ndex library
#[derive(Parser, Debug)]
#[command(
    name = "ndex-tasks",
    version,
    about = "Build orchestration for the ndex library",
    long_about = "Runs the named build targets from ndex.tasks.json through an external\n\
                  bundler, serves the development output with live reload, and watches\n\
                  emitted bundles for changes."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the spec bundle, then serve it with live reload
    ///
    /// Runs every configuration registered under the "build" target,
    /// regenerates the suite entry point first, and unless --no-serve is
    /// given starts the dev server and watches the emitted bundles.
    Build(BuildArgs),

    /// Build the distributable library bundle
    ///
    /// Runs every configuration registered under the "dist" target and
    /// exits. No server, no watcher.
    Dist(DistArgs),

    /// Build an arbitrary registered target
    Run(RunArgs),

    /// Serve an already-built output directory with live reload
    Serve(ServeArgs),
}

/// Arguments for the build command
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Project root containing ndex.tasks.json
    ///
    /// Defaults to the current directory.
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Build only; skip the dev server and the output watcher
    #[arg(long)]
    pub no_serve: bool,

    /// Port for the development server
    #[arg(short, long, env = "PORT", default_value_t = 8080, value_name = "PORT")]
    pub port: u16,

    /// Port for the live-reload channel
    #[arg(long, env = "RELOAD_PORT", default_value_t = 35729, value_name = "PORT")]
    pub reload_port: u16,
}

/// Arguments for the dist command
#[derive(Args, Debug)]
pub struct DistArgs {
    /// Project root containing ndex.tasks.json
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,
}

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Registered target name to build
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// Project root containing ndex.tasks.json
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,
}

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Project root containing ndex.tasks.json
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Directory to serve, relative to the project root
    #[arg(long, default_value = "build", value_name = "DIR")]
    pub dir: PathBuf,

    /// Port for the development server
    #[arg(short, long, env = "PORT", default_value_t = 8080, value_name = "PORT")]
    pub port: u16,

    /// Port for the live-reload channel
    #[arg(long, env = "RELOAD_PORT", default_value_t = 35729, value_name = "PORT")]
    pub reload_port: u16,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn build_defaults() {
        let cli = Cli::parse_from(["ndex-tasks", "build"]);
        match cli.command {
            Command::Build(args) => {
                assert!(!args.no_serve);
                assert!(args.root.is_none());
            }
            _ => panic!("expected build command"),
        }
    }

    #[test]
    fn run_requires_a_target() {
        let result = Cli::try_parse_from(["ndex-tasks", "run"]);
        assert!(result.is_err());
    }

    #[test]
    fn verbose_conflicts_with_quiet() {
        let result = Cli::try_parse_from(["ndex-tasks", "--verbose", "--quiet", "dist"]);
        assert!(result.is_err());
    }
}
