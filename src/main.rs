use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use bfi::cli_util::print_interpreter_error;
use bfi::config::Settings;
use bfi::{DEMO_INPUT, DEMO_PROGRAM, Interpreter, InterpreterError, StepControl};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Exit status after Ctrl-C, following the shell convention of 128 + SIGINT.
const EXIT_INTERRUPTED: i32 = 130;

#[derive(Parser, Debug)]
#[command(
    name = "bfi",
    version,
    about = "Run a Brainfuck program against pre-supplied input",
    after_help = "With no code at all, a demo program echoes \"Hello World!\".\n\
                  With --file, the first positional argument is taken as INPUT."
)]
struct Cli {
    /// Brainfuck code; characters outside ><+-.,[] are ignored
    #[arg(value_name = "CODE")]
    code: Option<String>,

    /// Characters consumed by ',' from front to back
    #[arg(value_name = "INPUT")]
    input: Option<String>,

    /// Read Brainfuck code from PATH instead of positional CODE
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    file: Option<PathBuf>,

    /// Read input from PATH instead of positional INPUT
    #[arg(short = 'i', long = "input-file", value_name = "PATH")]
    input_file: Option<PathBuf>,

    /// Print a step-by-step table of operations while executing
    #[arg(short = 'd', long = "debug")]
    debug: bool,

    /// Maximum interpreter steps before abort (fallback BFI_MAX_STEPS; default unlimited)
    #[arg(long = "max-steps", value_name = "N")]
    max_steps: Option<u64>,

    /// Print output as it is produced instead of after the run (fallback BFI_STREAM)
    #[arg(long = "stream")]
    stream: bool,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_file(program: &str, what: &str, path: &Path) -> Result<String, i32> {
    fs::read_to_string(path).map_err(|e| {
        eprintln!("{program}: failed to read {what} file {} as UTF-8: {e}", path.display());
        let _ = io::stderr().flush();
        1
    })
}

/// Work out (code, input) from positionals and files.
fn resolve_sources(program: &str, cli: Cli) -> Result<(String, String), i32> {
    let Cli { code, input, file, input_file, .. } = cli;

    let (code, mut input) = match file {
        Some(path) => {
            if input.is_some() {
                eprintln!("{program}: with --file, pass at most one positional argument (INPUT)");
                let _ = io::stderr().flush();
                return Err(2);
            }
            // Only INPUT can be given alongside --file.
            (read_file(program, "code", &path)?, code)
        }
        None => match code {
            Some(code) => (code, input),
            None => {
                eprintln!("Correct usage: {program} <code> [input]");
                eprintln!("Showing default hello world");
                let _ = io::stderr().flush();
                return Ok((DEMO_PROGRAM.to_string(), DEMO_INPUT.to_string()));
            }
        },
    };

    if let Some(path) = input_file {
        if input.is_some() {
            eprintln!("{program}: cannot use positional INPUT together with --input-file");
            let _ = io::stderr().flush();
            return Err(2);
        }
        input = Some(read_file(program, "input", &path)?);
    }

    Ok((code, input.unwrap_or_default()))
}

fn run(program: &str, cli: Cli) -> i32 {
    let mut settings = Settings::load();
    if cli.max_steps.is_some() {
        settings.max_steps = cli.max_steps;
    }
    settings.stream |= cli.stream;
    let debug = cli.debug;

    let (code, input) = match resolve_sources(program, cli) {
        Ok(sources) => sources,
        Err(exit_code) => return exit_code,
    };

    let mut bf = match Interpreter::new(&code, &input) {
        Ok(bf) => bf,
        Err(err) => {
            // Syntax errors are reported, not fatal.
            print_interpreter_error(Some(program), &code, &err);
            return 0;
        }
    };

    if settings.stream {
        bf.set_output_sink(|c| {
            let mut stdout = io::stdout();
            let _ = write!(stdout, "{c}");
            let _ = stdout.flush();
        });
    }

    // Ctrl-C requests a cooperative stop so partial output can still be shown.
    let cancel = Arc::new(AtomicBool::new(false));
    let cancel_clone = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || cancel_clone.store(true, Ordering::Relaxed)) {
        tracing::warn!(error = %e, "failed to set ctrl+c handler");
    }

    let ctrl = StepControl::new(settings.max_steps, cancel);
    let result = if debug {
        bf.run_debug_with_control(ctrl)
    } else {
        bf.run_with_control(ctrl)
    };

    let (output, exit_code) = match result {
        Ok(output) => (output, 0),
        Err(err) => {
            let exit_code = match &err {
                InterpreterError::Canceled => {
                    eprintln!("Execution aborted: interrupted");
                    EXIT_INTERRUPTED
                }
                InterpreterError::StepLimitExceeded { .. } => {
                    eprintln!("{err}");
                    1
                }
                other => {
                    print_interpreter_error(Some(program), &code, other);
                    1
                }
            };
            let _ = io::stderr().flush();
            (bf.output().to_string(), exit_code)
        }
    };

    print!("{output}");
    if settings.trailing_newline {
        println!();
    }
    let _ = io::stdout().flush();
    exit_code
}

fn main() {
    init_logging();

    let program = std::env::args().next().unwrap_or_else(|| String::from("bfi"));
    let cli = Cli::parse();

    std::process::exit(run(&program, cli));
}
