mod codec_cli;

use anyhow::Error;
use clap::Command;

fn cli() -> Command {
    codec_cli::subcommands(
        Command::new("rsprime")
            .about("Reed-Solomon error-correcting codec over an arbitrary prime field GF(p).")
            .subcommand_required(true),
    )
}

fn main() -> Result<(), Error> {
    env_logger::init();

    let mut app = cli();
    let matches = app.clone().get_matches();
    codec_cli::submatch(&mut app, &matches)
}
