//! schemagen CLI entry point.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use schemagen_foundation::{Error, ErrorKind, ObjectSchema};
use schemagen_runtime::{FileOutput, Format, Session, init_tracing, save_to_file};
use schemagen_transform::TransformConfig;
use tracing::info;

#[derive(Parser)]
#[command(name = "schemagen")]
#[command(author, version, about = "Extract storage schemas from TypeScript model classes", long_about = None)]
struct Cli {
    /// Additional module specifier to treat as the storage engine package
    #[arg(long = "module", value_name = "SPEC", global = true)]
    modules: Vec<String>,

    /// Export name of the base entity class
    #[arg(long, value_name = "NAME", global = true)]
    base_class: Option<String>,

    /// Emit each schema on a single line
    #[arg(long, global = true)]
    compact: bool,

    /// Default log filter when SCHEMAGEN_LOG is unset
    #[arg(long, value_name = "FILTER", default_value = "warn", global = true)]
    log: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite files with generated `static schema` members
    Transform {
        /// Source files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Directory for rewritten files (required for more than one file)
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,
    },

    /// Print the extracted schemas without rewriting anything
    Extract {
        /// Source files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output encoding
        #[arg(long, default_value = "json")]
        format: OutputFormat,

        /// Output file (stdout when omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    #[default]
    Json,
    Msgpack,
}

impl From<OutputFormat> for Format {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => Self::Json,
            OutputFormat::Msgpack => Self::MessagePack,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log);

    let mut config = TransformConfig::default().with_multi_line(!cli.compact);
    for module in cli.modules {
        config = config.with_module(module);
    }
    if let Some(base_class) = cli.base_class {
        config = config.with_base_class(base_class);
    }
    let mut session = Session::new(config);

    let result = match cli.command {
        Commands::Transform { files, out_dir } => {
            run_transform(&mut session, &files, out_dir.as_deref())
        }
        Commands::Extract {
            files,
            format,
            output,
        } => run_extract(&mut session, &files, format.into(), output.as_deref()),
    };

    let stats = session.stats();
    info!(
        files = stats.files,
        schemas = stats.schemas,
        warnings = stats.warnings,
        failures = stats.failures,
        "done"
    );

    match result {
        Ok(true) if stats.failures == 0 => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn run_transform(
    session: &mut Session,
    files: &[PathBuf],
    out_dir: Option<&Path>,
) -> Result<bool, Error> {
    if files.len() > 1 && out_dir.is_none() {
        return Err(Error::new(ErrorKind::IoError(
            "--out-dir is required when transforming more than one file".to_string(),
        )));
    }

    let mut written = true;
    for file in files {
        let Some(output) = process(session, file) else {
            continue;
        };
        match out_dir {
            Some(dir) => {
                let Some(file_name) = file.file_name() else {
                    report_error(&Error::new(ErrorKind::IoError(
                        format!("'{}' has no file name", file.display()),
                    )));
                    written = false;
                    continue;
                };
                if let Err(e) = save_to_file(output.rendered.as_bytes(), dir.join(file_name)) {
                    report_error(&e);
                    written = false;
                }
            }
            None => write_stdout(output.rendered.as_bytes())?,
        }
    }
    Ok(written)
}

fn run_extract(
    session: &mut Session,
    files: &[PathBuf],
    format: Format,
    output: Option<&Path>,
) -> Result<bool, Error> {
    let mut schemas: Vec<ObjectSchema> = Vec::new();
    for file in files {
        if let Some(mut output) = process(session, file) {
            schemas.append(&mut output.schemas);
        }
    }

    let bytes = format.encode(&schemas)?;
    match output {
        Some(path) => save_to_file(&bytes, path)?,
        None => write_stdout(&bytes)?,
    }
    Ok(true)
}

/// Processes one file, reporting warnings and errors on stderr.
fn process(session: &mut Session, file: &Path) -> Option<FileOutput> {
    match session.process_file(file) {
        Ok(output) => {
            for warning in &output.warnings {
                eprintln!("\x1b[33mwarning\x1b[0m: {}:{warning}", output.name);
            }
            Some(output)
        }
        Err(e) => {
            report_error(&e);
            None
        }
    }
}

fn report_error(e: &Error) {
    match &e.context {
        Some(context) => eprintln!("\x1b[31mError: {e}\x1b[0m\n  {context}"),
        None => eprintln!("\x1b[31mError: {e}\x1b[0m"),
    }
}

fn write_stdout(bytes: &[u8]) -> Result<(), Error> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(bytes).and_then(|()| stdout.flush()).map_err(|e| {
        Error::new(ErrorKind::IoError(format!("failed to write to stdout: {e}")))
    })
}
