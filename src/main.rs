//! wlogrus command-line binary.
//!
//! Emits one severity-tagged record through the same dispatcher the library
//! exposes, so shell scripts share the colored/JSON format of the services
//! they wrap. `FATAL` records exit with a non-zero status.

mod cli;

use clap::Parser;
use shadow_rs::shadow;
use wlogrus::config::FATAL_EXIT_CODE;
use wlogrus::{Dispatcher, LogConfig, Severity};

use crate::cli::Args;

shadow!(build);

fn main() {
    let args = Args::parse();
    let env = LogConfig::from_env();
    let config = LogConfig::new(env.json || args.json, env.debug || args.debug);
    let dispatcher = Dispatcher::new(config);

    dispatcher.log_raw(&args.severity, &args.tag, args.body_text(), &args.location);
    if args.severity.parse::<Severity>() == Ok(Severity::Fatal) {
        std::process::exit(FATAL_EXIT_CODE);
    }
}
