use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use script_analyzer::{
    AnalyzerSettings, EngineKind, PositionService, SyntaxTree, TokenAtOptions,
    cli::{self, CliError, OutputFormat},
    config::LoggingSettings,
};

#[derive(Parser, Debug)]
#[command(name = "script-analyzer", version, about)]
struct Args {
    #[arg(long, short, global = true)]
    verbose: bool,

    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Settings file; by default the nearest `script-analyzer.toml` is used.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Token at a byte offset.
    TokenAt {
        file: PathBuf,
        offset: u32,
        #[arg(long, value_enum)]
        engine: Option<EngineKind>,
        /// Count offsets in leading trivia as inside the following token.
        #[arg(long)]
        leading_trivia: bool,
        /// Count the end offset of a token as inside it.
        #[arg(long)]
        include_end: bool,
        #[arg(long)]
        json: bool,
    },
    /// Name-like token under or right before a byte offset.
    Touching {
        file: PathBuf,
        offset: u32,
        #[arg(long, value_enum)]
        engine: Option<EngineKind>,
        #[arg(long)]
        json: bool,
    },
    /// Last token starting before a byte offset.
    Preceding {
        file: PathBuf,
        offset: u32,
        #[arg(long)]
        json: bool,
    },
    /// Children of the innermost node containing a byte offset.
    Children {
        file: PathBuf,
        offset: u32,
    },
    /// Print the parsed tree.
    Dump {
        file: PathBuf,
    },
    /// Compare both engines on every offset of every source file under a path.
    Verify {
        path: PathBuf,
        /// Stop picking up new files after the first divergence.
        #[arg(long)]
        fail_fast: bool,
        #[arg(long)]
        json: bool,
    },
}

impl Command {
    fn target(&self) -> &Path {
        match self {
            Command::TokenAt {
                file,
                ..
            }
            | Command::Touching {
                file,
                ..
            }
            | Command::Preceding {
                file,
                ..
            }
            | Command::Children {
                file,
                ..
            }
            | Command::Dump {
                file,
            } => file,
            Command::Verify {
                path,
                ..
            } => path,
        }
    }
}

fn format(json: bool) -> OutputFormat {
    if json { OutputFormat::Json } else { OutputFormat::Text }
}

fn load_settings(args: &Args) -> Result<AnalyzerSettings, CliError> {
    let settings = match &args.config {
        Some(path) => AnalyzerSettings::load(path)?,
        None => AnalyzerSettings::discover(args.command.target())?,
    };
    Ok(settings)
}

fn init_logging(
    verbose: bool,
    log_file: Option<&Path>,
    logging: &LoggingSettings,
) {
    let directive = logging.effective_level(verbose).directive();

    let file_layer = log_file.map(|log_path| {
        let file_appender = tracing_appender::rolling::never(
            log_path.parent().unwrap_or(Path::new(".")),
            log_path.file_name().unwrap_or(std::ffi::OsStr::new("script-analyzer.log")),
        );
        fmt::layer()
            .with_writer(file_appender)
            .with_ansi(false)
            .with_target(false)
            .with_filter(EnvFilter::new(&directive))
    });

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(logging.ansi)
        .with_target(false)
        .with_filter(EnvFilter::new(&directive));

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .init();
}

fn run(
    command: Command,
    settings: AnalyzerSettings,
) -> Result<ExitCode, CliError> {
    let mut search = settings.search;
    match command {
        Command::TokenAt {
            file,
            offset,
            engine,
            leading_trivia,
            include_end,
            json,
        } => {
            if let Some(engine) = engine {
                search.engine = engine;
            }
            let (tree, offset) = cli::load_at(&file, offset)?;
            let service = PositionService::new(search);
            let found = service.token_at(
                &tree,
                offset,
                TokenAtOptions {
                    allow_position_in_leading_trivia: leading_trivia,
                    include_end_position: include_end,
                    include_preceding_token_at_end_position: None,
                },
            );
            println!("{}", cli::render_snapshot(Some(&found.snapshot(&tree)), format(json))?);
        },
        Command::Touching {
            file,
            offset,
            engine,
            json,
        } => {
            if let Some(engine) = engine {
                search.engine = engine;
            }
            let (tree, offset) = cli::load_at(&file, offset)?;
            let service = PositionService::new(search);
            let found = service.touching_property_name(&tree, offset).map(|element| element.snapshot(&tree));
            println!("{}", cli::render_snapshot(found.as_ref(), format(json))?);
        },
        Command::Preceding {
            file,
            offset,
            json,
        } => {
            let (tree, offset) = cli::load_at(&file, offset)?;
            let service = PositionService::new(search);
            let found = service.preceding_token(&tree, offset).map(|element| element.snapshot(&tree));
            println!("{}", cli::render_snapshot(found.as_ref(), format(json))?);
        },
        Command::Children {
            file,
            offset,
        } => {
            let (tree, offset) = cli::load_at(&file, offset)?;
            print!("{}", cli::render_children(&tree, offset));
        },
        Command::Dump {
            file,
        } => {
            let tree = SyntaxTree::parse(&cli::read_source(&file)?);
            print!("{}", tree.debug_dump());
        },
        Command::Verify {
            path,
            fail_fast,
            json,
        } => {
            let report = cli::verify(&path, &search, fail_fast)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report.summary());
            }
            if !report.is_clean() {
                return Ok(ExitCode::FAILURE);
            }
        },
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let args = Args::parse();

    let settings = match load_settings(&args) {
        Ok(settings) => settings,
        Err(error) => {
            eprintln!("script-analyzer: {error}");
            return ExitCode::from(2);
        },
    };

    let log_file = args.log_file.clone().or_else(|| settings.logging.file.clone());
    init_logging(args.verbose, log_file.as_deref(), &settings.logging);
    info!("script-analyzer v{} starting", env!("CARGO_PKG_VERSION"));
    info!("Engine: {:?}, cross-check: {}", settings.search.engine, settings.search.cross_check);
    if let Some(path) = &log_file {
        info!("Log file: {}", path.display());
    }

    match run(args.command, settings) {
        Ok(code) => code,
        Err(error) => {
            error!("{error}");
            ExitCode::from(2)
        },
    }
}
