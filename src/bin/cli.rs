// src/bin/cli.rs
use court_harvest::cli::{self, Command};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    match cli::parse_args(std::env::args().skip(1))? {
        Command::Help => eprintln!("{}", cli::HELP),
        Command::Harvest(opts) => {
            court_harvest::log::init(&opts.store_dir);
            cli::run(&opts)?;
        }
    }
    Ok(())
}
