use std::fs;
use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::bail;
use clap::Parser;
use env_logger::Env;

use fancyindex::cli::Args;
use fancyindex::{handle, Config};

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", console::style("error:").red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let request = args.request();
    let output = args.output.clone();

    let config: Config = args.try_into()?;
    config.validate()?;

    let response = match handle(&config, &request) {
        Ok(Some(response)) => response,
        Ok(None) => bail!("'{}' does not name a directory, URIs must end with '/'", request.uri),
        Err(err) => bail!("{} {err}", err.class().status_code()),
    };

    match output {
        Some(path) => fs::write(&path, &response.body)?,
        None => io::stdout().lock().write_all(&response.body)?,
    }
    Ok(())
}
