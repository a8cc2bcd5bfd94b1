#[macro_use]
extern crate tracing;

use join_query_engine::{EngineResult, LogFormat, cli::CliCommand, logger::Logger, opt::EngineOpt};
use std::process;
use structopt::StructOpt;

fn main() {
    let opts = EngineOpt::from_args();

    if let Err(err) = run(&opts) {
        info!("Encountered error while running hooks");

        if let Err(render_err) = err.render_as_json() {
            eprintln!("Failed to render error: {render_err}");
        }

        process::exit(1);
    }
}

fn run(opts: &EngineOpt) -> EngineResult<()> {
    let mut logger = Logger::new();
    logger.log_format(opts.log_format());
    logger.install()?;

    if let LogFormat::Json = opts.log_format() {
        user_facing_errors::set_panic_hook();
    }

    CliCommand::from_opt(opts)?.execute()
}
