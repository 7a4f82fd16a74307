use std::process::ExitCode;

use appframe::{App, AppArgs, DefaultAppArgs};

fn main() -> ExitCode {
    let args = <DefaultAppArgs as AppArgs>::parse();

    match App::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
