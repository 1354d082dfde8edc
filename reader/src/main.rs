use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use reader::{AnyResult, Args, CancelToken, ConsoleSink, Error, Session, UsbTransport};

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = reader::init_logging(&args.log_level, args.journald) {
        eprintln!("{e:#}");
        return ExitCode::from(3);
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(e.downcast_ref::<Error>().map_or(3, Error::exit_code))
        }
    }
}

fn run(args: &Args) -> AnyResult<()> {
    let cancel = CancelToken::new();
    let handler_token = cancel.clone();
    ctrlc::set_handler(move || handler_token.cancel()).context("installing Ctrl-C handler")?;

    if !args.uses_default_device() {
        tracing::warn!(
            "targeting {:04x}:{:04x}, reports may not follow the expected layout",
            args.vid,
            args.pid
        );
    }

    let transport = UsbTransport::open(args.vid, args.pid)?;
    let mut session = Session::connect(transport, args.session_settings())?;
    session.run(&args.frames(), &mut ConsoleSink::stdout(), &cancel)?;

    Ok(())
}
