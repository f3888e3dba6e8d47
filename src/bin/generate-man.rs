// Render the studypulse man page to stdout or to the given file

use clap::CommandFactory;
use studypulse::cli::Cli;

fn main() -> std::io::Result<()> {
    let man = clap_mangen::Man::new(Cli::command());
    let mut buffer: Vec<u8> = Vec::new();
    man.render(&mut buffer)?;

    match std::env::args().nth(1) {
        Some(path) => std::fs::write(&path, buffer),
        None => std::io::Write::write_all(&mut std::io::stdout(), &buffer),
    }
}
