use lcp_cli::{build_cli, logging, LogFormat};
use std::process::ExitCode;

fn main() -> ExitCode {
    let matches = build_cli().get_matches();

    let format = matches
        .get_one::<String>("log-format")
        .map_or(Ok(LogFormat::Text), |s| s.parse::<LogFormat>());
    let format = match format {
        Ok(format) => format,
        Err(e) => {
            eprintln!("error: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = logging::init(format, matches.get_count("verbose")) {
        eprintln!("error: {e:#}");
        return ExitCode::FAILURE;
    }

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "lcp starting");

    match lcp_cli::run(&matches) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
