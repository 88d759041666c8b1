use std::io::{stderr, stdout};
use std::process::ExitCode;

fn main() -> ExitCode {
    let code = axiomind_cli::run(std::env::args(), &mut stdout(), &mut stderr());
    ExitCode::from(code as u8)
}
