use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the command tree in src/main.rs, which build scripts cannot import.
// Only names, flags and value hints matter for completions.
const FORMATS: &[&str] = &["html", "json", "markdown", "tag", "text"];

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let format_arg = |name: &'static str| {
        Arg::new(name)
            .long(name)
            .value_parser(clap::builder::PossibleValuesParser::new(FORMATS))
            .value_hint(ValueHint::Other)
    };

    let mut cmd = Command::new("mdstyle")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Rewrite Markdown syntax in rich-text documents into native styling")
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("set")
                .long("set")
                .action(ArgAction::Append)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("format")
                .about("Format a document file")
                .arg(
                    Arg::new("input")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(format_arg("from"))
                .arg(format_arg("to"))
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("automate")
                .about("Format a stored document in place")
                .arg(Arg::new("doc-id").required(true).index(1))
                .arg(
                    Arg::new("store")
                        .long("store")
                        .required(true)
                        .value_hint(ValueHint::DirPath),
                ),
        );

    generate_to(Bash, &mut cmd, "mdstyle", &outdir)?;
    generate_to(Zsh, &mut cmd, "mdstyle", &outdir)?;
    generate_to(Fish, &mut cmd, "mdstyle", &outdir)?;

    Ok(())
}
