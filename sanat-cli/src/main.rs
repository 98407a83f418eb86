use std::path::PathBuf;

use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use sanat::{FormatType, ParseOptions};
use sanat_cli::{
    Config, GenerateOptions, build_pipeline, formats_listing, logging, run_generate, run_validate,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (defaults to ./sanat.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate string resource files from a translation document.
    Generate {
        /// The translation document to read
        input: PathBuf,
        /// Output format (see `sanat formats`)
        format: String,
        /// Directory to write the generated files into
        outdir: PathBuf,
        /// Comma-separated preprocessors to run on every value
        #[arg(short, long)]
        processors: Option<String>,
        /// Only generate these languages (repeatable)
        #[arg(short, long = "lang")]
        languages: Vec<String>,
    },

    /// Check a translation document for errors without writing anything.
    Validate {
        /// The translation document to read
        input: PathBuf,
        /// Comma-separated preprocessors to run on every value
        #[arg(short, long)]
        processors: Option<String>,
    },

    /// List the available output formats and preprocessors.
    Formats,

    /// Print shell completions.
    Completions {
        /// The shell to generate completions for
        shell: Shell,
    },
}

fn main() {
    let args = Args::parse();
    logging::init(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), String> {
    match args.commands {
        Commands::Formats => {
            print!("{}", formats_listing());
            Ok(())
        }
        Commands::Completions { shell } => {
            let mut command = Args::command();
            let name = command.get_name().to_string();
            clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
            Ok(())
        }
        Commands::Validate { input, processors } => {
            let config = Config::load(args.config.as_deref())?;
            let pipeline = build_pipeline(processors.as_deref().or(config.processors.as_deref()))?;
            run_validate(&input, &pipeline, parse_options(&config))
        }
        Commands::Generate {
            input,
            format,
            outdir,
            processors,
            languages,
        } => {
            let config = Config::load(args.config.as_deref())?;
            let format = format.parse::<FormatType>().map_err(|e| e.to_string())?;
            let pipeline = build_pipeline(processors.as_deref().or(config.processors.as_deref()))?;
            let options = GenerateOptions {
                input,
                format,
                outdir,
                languages: if languages.is_empty() {
                    config.languages.clone()
                } else {
                    languages
                },
                parse_options: parse_options(&config),
            };
            let written = run_generate(&options, &pipeline)?;
            for path in &written {
                println!("{}", path.display());
            }
            Ok(())
        }
    }
}

fn parse_options(config: &Config) -> ParseOptions {
    ParseOptions::new().with_lenient_indentation(config.lenient_indentation)
}
