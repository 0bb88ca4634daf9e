use std::{
    io::{IsTerminal, Read},
    path::{Path, PathBuf},
};

use clap::Parser;

use mathtype::{Config, Converter, PartialConfig, PrettyPrint};

mod config_file;

use config_file::{ConfigError, load_config_file};

/// Converts TeX-like math notation to MathML
#[derive(Parser, Debug)]
#[command(version, about = "Converts TeX-like math notation to MathML", long_about = None)]
struct Args {
    /// The formula to convert; read from stdin if omitted
    formula: Option<String>,

    /// Reads rendering parameters from a TOML file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Sets the display style for the formula to "inline"
    #[arg(short, long, group = "mode")]
    inline: bool,

    /// Sets the display style for the formula to "block"
    #[arg(short, long, group = "mode")]
    block: bool,

    /// Adds newlines and indentation to the output
    #[arg(long)]
    pretty: bool,

    /// Includes the source as an annotation
    #[arg(long)]
    annotation: bool,

    /// Puts the limits of large operators beside them instead of under and over
    #[arg(long)]
    no_munderover: bool,

    /// Adds explicit spacing around operators
    #[arg(long)]
    operator_spacing: bool,
}

impl Args {
    /// The configuration keys set by flags. These take precedence over the config file.
    fn overrides(&self) -> PartialConfig {
        let display_mode = if self.inline {
            Some(false)
        } else if self.block {
            Some(true)
        } else {
            None
        };
        PartialConfig {
            display_mode,
            pretty_print: self.pretty.then_some(PrettyPrint::Always),
            annotation: self.annotation.then_some(true),
            use_munderover: self.no_munderover.then_some(false),
            use_operator_spacing: self.operator_spacing.then_some(true),
            ..Default::default()
        }
    }
}

fn main() {
    let args = Args::parse();
    let mut config = Config::default();
    if let Some(ref path) = args.config {
        match load_config_file(path) {
            Ok(partial) => config.overlay(&partial),
            Err(e) => exit_config_error(&e, path),
        }
    }
    config.overlay(&args.overrides());
    let converter = Converter::new(config);

    let mathml = match args.formula {
        Some(ref formula) => converter.convert(formula),
        None => converter.convert(read_stdin().trim_end()),
    };
    println!("{mathml}");
}

fn read_stdin() -> String {
    let mut buffer = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut buffer) {
        exit_io_error(e);
    }
    buffer
}

fn exit_config_error(e: &ConfigError, path: &Path) -> ! {
    match e {
        ConfigError::Io(err) => {
            eprintln!("IO Error in '{}': {}", path.display(), err);
            std::process::exit(1);
        }
        ConfigError::Parse { .. } => {
            let name = path.display().to_string();
            eprint!("{}", e.to_report(&name, std::io::stderr().is_terminal()));
            std::process::exit(2);
        }
    }
}

fn exit_io_error(e: std::io::Error) -> ! {
    eprintln!("IO Error: {}", e);
    std::process::exit(1);
}
