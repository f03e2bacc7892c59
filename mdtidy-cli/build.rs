use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the command defined in src/main.rs; build scripts can't reach src/ modules.
fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("mdtidy")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Reformat Markdown files into canonical Markdown")
        .arg(
            Arg::new("input")
                .help("Markdown files to format (reads stdin when omitted)")
                .num_args(0..)
                .value_hint(ValueHint::FilePath),
        )
        .arg(Arg::new("write").long("write").short('w').action(ArgAction::SetTrue))
        .arg(Arg::new("list").long("list").short('l').action(ArgAction::SetTrue))
        .arg(Arg::new("terminal").long("terminal").action(ArgAction::SetTrue))
        .arg(
            Arg::new("heading-style")
                .long("heading-style")
                .value_parser(["atx", "setext"]),
        )
        .arg(
            Arg::new("no-code-format")
                .long("no-code-format")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .value_hint(ValueHint::FilePath),
        );

    generate_to(Bash, &mut cmd, "mdtidy", &outdir)?;
    generate_to(Zsh, &mut cmd, "mdtidy", &outdir)?;
    generate_to(Fish, &mut cmd, "mdtidy", &outdir)?;

    Ok(())
}
