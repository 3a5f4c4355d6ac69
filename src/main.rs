use std::env;
use std::process;

use html_insert_assets::core::print_error_message;
use html_insert_assets::{resolve_args, run, InsertError};
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let directives = if verbose {
        "warn,html_insert_assets=debug"
    } else {
        "warn"
    };

    // A subscriber installed by an embedding process wins
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directives))
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

fn main() {
    let config = match resolve_args(env::args_os().skip(1)) {
        Ok(config) => config,
        Err(InsertError::Config {
            source: Some(err), ..
        }) if !err.use_stderr() => err.exit(),
        Err(err) => {
            print_error_message(&err.to_string());
            process::exit(1);
        }
    };

    init_logging(config.verbose());

    if let Err(err) = run(&config) {
        print_error_message(&err.to_string());
        process::exit(1);
    }
}
