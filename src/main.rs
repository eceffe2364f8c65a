use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(err) = logseq_export::run() {
        eprintln!("error: {err:#}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
