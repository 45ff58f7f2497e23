use anyhow::{Context, anyhow};
use clap::{Args, Parser, Subcommand};
use hemco2yaml::{Dialect, parse_file, render, root};
use log::{LevelFilter, info};
use std::io::Write;
use std::path::PathBuf;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "hemco2yaml")]
#[command(about = "Convert HEMCO configuration files to YAML", long_about = None)]
struct Cli {
    /// Log progress to stderr (default).
    #[arg(long, global = true, conflicts_with = "no_log")]
    log: bool,

    /// Only log errors.
    #[arg(long, global = true)]
    no_log: bool,

    /// Also log every parsed line.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Args)]
struct Convert {
    /// Path to the input file.
    input: PathBuf,

    /// Path to the output YAML file.
    output: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a HEMCO_Config.rc file.
    Config(Convert),
    /// Convert a HEMCO_Diagn.rc file.
    Diagn(Convert),
    /// Convert a species table.
    Species(Convert),
    /// Convert a grid definition file.
    Grid(Convert),
    /// Point the ROOT setting of a config file at another data directory.
    SetRoot {
        input: PathBuf,

        root_dir: String,

        /// Write here instead of rewriting the input in place.
        #[arg(short = 'o', long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    match cli.cmd {
        Commands::Config(args) => convert(Dialect::Config, &args)?,
        Commands::Diagn(args) => convert(Dialect::Diagnostics, &args)?,
        Commands::Species(args) => convert(Dialect::Species, &args)?,
        Commands::Grid(args) => convert(Dialect::Grid, &args)?,
        Commands::SetRoot {
            input,
            root_dir,
            out,
        } => {
            let text = std::fs::read_to_string(&input)
                .with_context(|| format!("read config file {}", input.display()))?;
            let updated = root::set_root(&text, &root_dir)
                .ok_or_else(|| anyhow!("no ROOT setting in {}", input.display()))?;

            let out = out.unwrap_or(input);
            std::fs::write(&out, updated)
                .with_context(|| format!("write config file {}", out.display()))?;
            println!("Wrote {}", out.display());
        }
    }

    Ok(())
}

fn convert(dialect: Dialect, args: &Convert) -> Result<()> {
    info!("Received input file: {}", args.input.display());
    info!("Received output file: {}", args.output.display());

    // 1) Parse; tolerated oddities were already logged as warnings.
    let parsed = parse_file(&args.input, dialect)?;

    // 2) Render YAML.
    render::write_yaml(&parsed.tree, &args.output)?;

    info!("Conversion complete!");
    println!("Wrote {}", args.output.display());
    Ok(())
}

fn init_logging(cli: &Cli) {
    let enabled = cli.log || !cli.no_log;
    let level = if !enabled {
        LevelFilter::Error
    } else if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - {} - {}",
                buf.timestamp(),
                record.level(),
                record.args()
            )
        })
        .init();
}
