use std::{
    fs::File,
    io,
    io::{prelude::*, BufReader, BufWriter},
};

use anyhow::{anyhow, Context, Error};
use clap::{Arg, ArgAction, ArgMatches, Command};

use rsprime_core::{Alphabet, Code, Fp};

fn common_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("prime")
            .short('p')
            .long("prime")
            .value_name("PRIME")
            .help("The prime p defining GF(p). Defaults to 59, the default alphabet's size.")
            .action(ArgAction::Set),
    )
    .arg(
        Arg::new("length")
            .short('n')
            .long("length")
            .value_name("N")
            .help("Codeword length n.")
            .action(ArgAction::Set)
            .required(true),
    )
    .arg(
        Arg::new("message-length")
            .short('k')
            .long("message-length")
            .value_name("K")
            .help("Message length k.")
            .action(ArgAction::Set)
            .required(true),
    )
    .arg(
        Arg::new("INPUT")
            .help(r#"Path to input data ("-" to read from stdin)."#)
            .action(ArgAction::Set)
            .allow_hyphen_values(true)
            .required(true)
            .index(1),
    )
}

fn read_input(path_or_stdin: &str) -> Result<String, Error> {
    let (mut stdin_reader, mut file_reader);
    let input: &mut dyn Read = if path_or_stdin == "-" {
        stdin_reader = io::stdin();
        &mut stdin_reader
    } else {
        file_reader = File::open(path_or_stdin)
            .with_context(|| format!("failed to open input file '{path_or_stdin}'"))?;
        &mut file_reader
    };
    let mut buffer_input = BufReader::new(input);
    let mut contents = String::new();
    buffer_input
        .read_to_string(&mut contents)
        .with_context(|| format!("failed to read input from '{path_or_stdin}'"))?;
    Ok(contents.trim_end_matches('\n').to_string())
}

fn write_output(line: &str) -> Result<(), Error> {
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    writeln!(writer, "{line}").context("failed to write output")?;
    Ok(())
}

fn build_code(matches: &ArgMatches, default_alphabet: &Alphabet) -> Result<Code, Error> {
    let p: u64 = match matches.get_one::<String>("prime") {
        Some(s) => s.parse().context("--prime was not a positive integer")?,
        None => default_alphabet.len() as u64,
    };
    let n: usize = matches
        .get_one::<String>("length")
        .context("required --length argument not provided")?
        .parse()
        .context("--length was not a positive integer")?;
    let k: usize = matches
        .get_one::<String>("message-length")
        .context("required --message-length argument not provided")?
        .parse()
        .context("--message-length was not a positive integer")?;

    Code::new(p, n, k).with_context(|| format!("constructing Code(p={p}, n={n}, k={k})"))
}

// rsprime encode [-p PRIME] -n LENGTH -k MESSAGE-LENGTH [--nostrip] INPUT
fn encode_cli() -> Command {
    common_args(Command::new("encode").about("Encode a message into a codeword.")).arg(
        Arg::new("nostrip")
            .long("nostrip")
            .help("Pad the output to full codeword length instead of only emitting the non-padding symbols.")
            .action(ArgAction::SetTrue),
    )
}

fn encode_run(matches: &ArgMatches) -> Result<(), Error> {
    let alphabet = Alphabet::default_alphabet();
    let code = build_code(matches, &alphabet)?;
    let input_path = matches
        .get_one::<String>("INPUT")
        .context("required INPUT argument not provided")?;
    let nostrip = matches.get_flag("nostrip");

    let message_text = read_input(input_path)?;
    let padded = alphabet.pad(&message_text, code.k());
    let indices = alphabet.decode(&padded).context("decoding message characters")?;
    let message = indices
        .into_iter()
        .map(|v| Fp::new(code.p(), v))
        .collect::<Result<Vec<_>, _>>()
        .context("mapping message characters into GF(p)")?;

    let codeword = code.encode(&message).context("encoding message")?;
    let values = codeword.iter().map(|x| x.value()).collect::<Vec<_>>();
    let mut encoded = alphabet.encode(&values).context("rendering codeword as text")?;
    if !nostrip {
        encoded = alphabet.strip(&encoded).to_string();
    }
    write_output(&encoded)
}

// rsprime verify [-p PRIME] -n LENGTH -k MESSAGE-LENGTH INPUT
fn verify_cli() -> Command {
    common_args(Command::new("verify").about("Check whether a word is a valid codeword."))
}

fn verify_run(matches: &ArgMatches) -> Result<(), Error> {
    let alphabet = Alphabet::default_alphabet();
    let code = build_code(matches, &alphabet)?;
    let input_path = matches
        .get_one::<String>("INPUT")
        .context("required INPUT argument not provided")?;

    let word_text = read_input(input_path)?;
    let padded = alphabet.pad(&word_text, code.n());
    let indices = alphabet.decode(&padded).context("decoding word characters")?;
    let word = indices
        .into_iter()
        .map(|v| Fp::new(code.p(), v))
        .collect::<Result<Vec<_>, _>>()
        .context("mapping word characters into GF(p)")?;

    let valid = code.verify(&word).context("verifying word")?;
    write_output(if valid { "valid" } else { "invalid" })?;
    if valid {
        Ok(())
    } else {
        Err(anyhow!("word is not a valid codeword"))
    }
}

// rsprime decode [-p PRIME] -n LENGTH -k MESSAGE-LENGTH [--nostrip] [--checked] INPUT
fn decode_cli() -> Command {
    common_args(Command::new("decode").about("Decode a (possibly corrupted) word into its message."))
        .arg(
            Arg::new("nostrip")
                .long("nostrip")
                .help("Emit the full k-symbol message instead of stripping leading padding.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("checked")
                .long("checked")
                .help("Re-verify the corrected codeword and fail instead of returning a best-effort guess.")
                .action(ArgAction::SetTrue),
        )
}

fn decode_run(matches: &ArgMatches) -> Result<(), Error> {
    let alphabet = Alphabet::default_alphabet();
    let code = build_code(matches, &alphabet)?;
    let input_path = matches
        .get_one::<String>("INPUT")
        .context("required INPUT argument not provided")?;
    let nostrip = matches.get_flag("nostrip");
    let checked = matches.get_flag("checked");

    let word_text = read_input(input_path)?;
    let padded = alphabet.pad(&word_text, code.n());
    let indices = alphabet.decode(&padded).context("decoding word characters")?;
    let word = indices
        .into_iter()
        .map(|v| Fp::new(code.p(), v))
        .collect::<Result<Vec<_>, _>>()
        .context("mapping word characters into GF(p)")?;

    let message = if checked {
        code.decode_checked(&word).context("decoding word (checked)")?
    } else {
        code.decode(&word).context("decoding word")?
    };

    let values = message.iter().map(|x| x.value()).collect::<Vec<_>>();
    let mut decoded = alphabet.encode(&values).context("rendering message as text")?;
    if !nostrip {
        decoded = alphabet.strip(&decoded).to_string();
    }
    write_output(&decoded)
}

pub(crate) fn submatch(app: &mut Command, matches: &ArgMatches) -> Result<(), Error> {
    match matches.subcommand() {
        Some(("encode", sub_matches)) => encode_run(sub_matches),
        Some(("verify", sub_matches)) => verify_run(sub_matches),
        Some(("decode", sub_matches)) => decode_run(sub_matches),
        Some((subcommand, _)) => {
            app.print_help()?;
            Err(anyhow!("unknown subcommand '{subcommand}'"))
        }
        None => {
            app.print_help()?;
            Err(anyhow!("no subcommand specified"))
        }
    }
}

pub(crate) fn subcommands(app: Command) -> Command {
    app.subcommand(encode_cli())
        .subcommand(verify_cli())
        .subcommand(decode_cli())
}
