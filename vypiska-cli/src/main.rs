use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use vypiska_core::FormatSelector;

mod config;
mod convert_cmd;
mod export;
mod input;
mod pdf_text;
mod state;

use convert_cmd::{ConvertOptions, convert_file, detect_file};
use export::OutputFileType;

#[derive(Parser, Debug)]
#[command(
    name = "vypiska",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("VYPISKA_BUILD_SHA"), ")"),
    about = "Convert bank statements (PDF or flattened text) into a reconciled transaction table"
)]
struct Cli {
    /// Show debug logs (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a statement (.pdf or .txt) to xlsx or csv
    Convert {
        /// Statement file (.pdf is flattened with the configured converter first)
        input: PathBuf,

        /// Output file (default: input path with the output extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Statement format: auto, 2005_Moscow or 2107_Stavropol
        #[arg(short, long, default_value = "auto")]
        format: FormatSelector,

        /// Output file type (default: from config, else xlsx)
        #[arg(short = 't', long = "type", value_enum)]
        file_type: Option<OutputFileType>,

        /// Keep the intermediate text file produced from a PDF
        #[arg(short = 'i', long = "keep-txt")]
        keep_txt: bool,
    },

    /// Print the detected format of a statement
    Detect {
        input: PathBuf,
    },

    /// Write the default ~/.vypiska/config.toml
    InitConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Convert {
            input,
            output,
            format,
            file_type,
            keep_txt,
        } => {
            let cfg = config::load_config()?;
            let opts = ConvertOptions {
                output,
                format,
                file_type,
                keep_txt,
            };
            convert_file(&input, &opts, &cfg)?;
        }

        Command::Detect { input } => {
            let cfg = config::load_config()?;
            println!("{}", detect_file(&input, &cfg)?);
        }

        Command::InitConfig => {
            config::init_config()?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "vypiska=debug,vypiska_ingest=debug,vypiska_core=debug"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}
