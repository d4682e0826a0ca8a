use clap::Parser;
use rustyline::{DefaultEditor, error::ReadlineError};
use slang::{
    Context, ErrorKind, ScriptError, Value,
    runtime::{
        bootstrap,
        data_structures::namespace::native_words,
        error,
        interpreter::{InterpreterStack, WordManagement},
    },
};
use std::{
    env, fs, io,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Run a Slang script, or start an interactive session when no script is given.
#[derive(Parser, Debug)]
#[command(name = "slang", version)]
#[command(about = "A small concatenative stack language")]
struct Args {
    /// Script file to run.  The stack it leaves behind is printed.
    script: Option<PathBuf>,

    /// Load this file as the standard vocabulary instead of the built in one.
    #[arg(long, env = "SLANG_BOOTSTRAP")]
    bootstrap: Option<PathBuf>,

    /// Run the standard vocabulary's self-test and exit.
    #[arg(long)]
    self_test: bool,

    /// Log filter, used when RUST_LOG isn't set.
    #[arg(long, default_value = "warn")]
    log_level: String,
}

/// Create the root context, loading either the embedded vocabulary or the one given on the command
/// line.
fn create_context(args: &Args) -> error::Result<Context> {
    match &args.bootstrap {
        Some(path) => {
            let source = fs::read_to_string(path)?;
            let path = path.to_string_lossy();

            info!(path = %path, "loading bootstrap");
            Context::with_bootstrap(&path, &source)
        }

        None => Context::new(),
    }
}

/// Render a stack the way the REPL and script runner show it, bottom first.
fn format_stack(stack: &[Value]) -> String {
    stack
        .iter()
        .map(Value::to_source)
        .collect::<Vec<String>>()
        .join(" ")
}

/// Print and clear any diagnostics collected since the last call.
fn flush_diagnostics(context: &mut Context) {
    for diagnostic in context.take_diagnostics() {
        eprintln!("warning: {}", diagnostic);
    }
}

fn run_script(context: &mut Context, path: &PathBuf) -> error::Result<()> {
    let source = fs::read_to_string(path)?;
    let name = path.to_string_lossy();

    debug!(path = %name, bytes = source.len(), "running script");

    let result = context.evaluate_named(&name, source);
    flush_diagnostics(context);

    let stack = result?;

    if !stack.is_empty() {
        println!("{}", format_stack(&stack));
    }

    Ok(())
}

/// List the native words of the active namespace along with where they were registered.
fn print_words(context: &Context) {
    for native in native_words(&context.namespace()) {
        let location = native.location();

        println!(
            "  {:<10} ( {} ) {}  [{}:{}]",
            native.name(),
            native.signature(),
            native.description(),
            location.path(),
            location.line()
        );
    }
}

fn history_path() -> Option<PathBuf> {
    env::var_os("HOME").map(|home| Path::new(&home).join(".slang_history"))
}

fn editor_error(error: ReadlineError) -> ScriptError {
    ScriptError::new(
        ErrorKind::Io,
        None,
        format!("Line editor failed: {}", error),
        None,
    )
}

/// An interactive session.  Each line is evaluated in the same context so definitions and the stack
/// carry over.  `.s` shows the stack, `.w` lists the native words and `.q` leaves.
fn repl(context: &mut Context) -> error::Result<()> {
    let mut editor = DefaultEditor::new().map_err(editor_error)?;
    let history = history_path();

    if let Some(path) = &history {
        let _ = editor.load_history(path);
    }

    loop {
        let line = match editor.readline("slang> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(error) => return Err(editor_error(error)),
        };

        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        let _ = editor.add_history_entry(line);

        match line {
            ".q" => break,
            ".s" => {
                println!("{}", format_stack(context.stack()));
                continue;
            }
            ".w" => {
                print_words(context);
                continue;
            }
            _ => {}
        }

        let result = context.evaluate_named("<repl>", line);
        flush_diagnostics(context);

        match result {
            Ok(stack) => println!("  {}", format_stack(&stack)),
            Err(error) => {
                eprintln!("error: {}", error);
                context.clear_stack();
            }
        }
    }

    if let Some(path) = &history
        && let Err(error) = editor.save_history(path)
    {
        warn!(path = %path.display(), %error, "could not save the history");
    }

    Ok(())
}

fn main() -> Result<(), ScriptError> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut context = create_context(&args)?;

    if args.self_test {
        let passed = bootstrap::self_test(&mut context)?;

        println!("self-test: {} programs passed", passed);
        return Ok(());
    }

    match &args.script {
        Some(path) => run_script(&mut context, path),
        None => repl(&mut context),
    }
}
