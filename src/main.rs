use std::process::ExitCode;

fn main() -> ExitCode {
    ezjump::init_logging();

    match ezjump::run() {
        Ok(()) => ExitCode::SUCCESS,
        // Usage errors stay quiet: the shell wrapper calls us on every prompt.
        Err(e) if e.is_usage() => {
            tracing::debug!(error = %e, "ignoring usage error");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
