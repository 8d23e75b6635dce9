use std::process;

use clap::Parser;

use playcop::cli::Args;

fn main() {
    let args = Args::parse();
    match playcop::run(args) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e:#}");
            process::exit(2);
        }
    }
}
