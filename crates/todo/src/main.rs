use std::env;
use std::io;
use std::process;

use todo::{init_logging, parse_args, run, AppConfig};

fn main() {
    let invocation = match parse_args(env::args_os()) {
        Ok(invocation) => invocation,
        Err(err) => {
            // --help and --version are not failures; clap prints them.
            if let Some(clap_err) = err.downcast_ref::<clap::Error>() {
                clap_err.exit();
            }
            init_logging(false);
            fatal(err);
        }
    };

    init_logging(invocation.verbose);
    let config = AppConfig::resolve(invocation.file.clone(), invocation.verbose);
    log::debug!("{:?}", config);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(err) = run(&config, &invocation.action, &mut out) {
        fatal(err);
    }
}

fn fatal(err: anyhow::Error) -> ! {
    // RUST_LOG can filter out errors too; the message must still reach stderr.
    if log::log_enabled!(log::Level::Error) {
        log::error!("{:#}", err);
    } else {
        eprintln!("Error: {:#}", err);
    }
    process::exit(1);
}
