use clap::Parser;
use rustyline::{Editor, error::ReadlineError};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use vorth::runtime::{
    built_ins::built_in_listing,
    error,
    interpreter::{
        CodeManagement, InterpreterStack, OutputManagement, WordManagement,
        vorth_interpreter::VorthInterpreter,
    },
};

/// Environment variable read for the log filter when --log-level isn't given.
const LOG_ENV_VAR: &str = "VORTH_LOG";

/// A small stack based Forth dialect.  Runs a script file, or starts an interactive session when
/// no file is given.
#[derive(Parser)]
#[command(name = "vorth", version)]
struct Args {
    /// Script file to run as a single call.
    file: Option<String>,

    /// Print the stack and the defined words after every call.
    #[arg(long)]
    debug: bool,

    /// Print the built-in words with their stack signatures and exit.
    #[arg(long)]
    list_words: bool,

    /// Log filter, overrides the VORTH_LOG environment variable.
    #[arg(long)]
    log_level: Option<String>,
}

fn init_logging(log_level: &Option<String>) {
    let filter = match log_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Print the interpreter's state for --debug.
fn print_debug_state(interpreter: &VorthInterpreter) {
    println!("stack: {}", interpreter.stack());
    println!("words: {}", interpreter.dictionary());
}

/// Run a whole file as one call.  Any output written before an error is still printed.
fn run_file(interpreter: &mut VorthInterpreter, path: &str, debug: bool) -> error::Result<()> {
    info!(path, "running script file");

    let result = interpreter.process_source_file(path);

    print!("{}", interpreter.output());

    if debug {
        println!();
        print_debug_state(interpreter);
    }

    result.map(|_| ())
}

/// Read lines from the user and run each one as a call until `bye` or the end of input.
fn repl(interpreter: &mut VorthInterpreter, debug: bool) {
    let mut editor = Editor::<()>::new();

    while !interpreter.is_exiting() {
        match editor.readline("> ") {
            Ok(line) => {
                editor.add_history_entry(line.as_str());

                match interpreter.parse(&line) {
                    Ok(output) => println!("{} ok", output),
                    Err(error) => {
                        print!("{}", interpreter.output());
                        println!("error: {}", error);
                    }
                }

                if debug {
                    print_debug_state(interpreter);
                }
            }

            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,

            Err(error) => {
                warn!("could not read input: {}", error);
                break;
            }
        }
    }
}

fn main() -> error::Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level);

    if args.list_words {
        println!("{}", built_in_listing());
        return Ok(());
    }

    let mut interpreter = VorthInterpreter::new();

    match &args.file {
        Some(path) => run_file(&mut interpreter, path, args.debug),
        None => {
            repl(&mut interpreter, args.debug);
            Ok(())
        }
    }
}
