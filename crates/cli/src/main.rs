use std::process::ExitCode;

fn main() -> ExitCode {
    chaiwala_cli::run()
}
