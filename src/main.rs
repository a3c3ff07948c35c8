use std::process::ExitCode;

use ravenfile::ui::output;

fn main() -> ExitCode {
    match ravenfile::cli::run() {
        Ok(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
        Err(err) => {
            output::error(format!("{:#}", err));
            ExitCode::from(1)
        }
    }
}
