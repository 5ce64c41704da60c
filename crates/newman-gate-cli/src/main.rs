use clap::Parser;
use newman_gate::{Cli, exit_code, logging, run};

fn main() {
    // Reset SIGPIPE to default behavior to prevent panic on broken pipe
    // (e.g., when piping to `head` or `less` that exits early)
    #[cfg(unix)]
    reset_sigpipe();

    let cli = Cli::parse();
    logging::init(cli.log_level);

    match run(cli) {
        Ok(outcome) => std::process::exit(exit_code::for_outcome(outcome)),
        Err(e) => {
            eprintln!("[FAIL] {:#}", e);
            std::process::exit(exit_code::FATAL);
        }
    }
}

#[cfg(unix)]
fn reset_sigpipe() {
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}
