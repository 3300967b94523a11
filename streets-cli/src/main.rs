//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    if let Err(err) = streets_cli::run() {
        eprintln!("streets: {err}");
        std::process::exit(1);
    }
}
