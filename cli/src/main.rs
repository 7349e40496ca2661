mod error_formatter;
mod formatter;
#[cfg(feature = "server")]
mod server;
mod suite;

use anyhow::{Context, Result};
use calcbot::evaluator::DegreeCalls;
use calcbot::{Engine, EngineConfig, FunctionTable, Validator, VariableStore};
use clap::{Parser, Subcommand};
use error_formatter::ExpressionFailure;
use formatter::Formatter;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "calcbot")]
#[command(about = "A calculator you can talk to.")]
#[command(
    long_about = "calcbot evaluates arithmetic expressions, English questions such as \"what is 5 plus 5?\", variable assignments, derivatives, integrals and small matrix operations.\nThe CLI evaluates lines from the command line, a script file or stdin, or serves the engine over HTTP."
)]
#[command(version)]
struct Cli {
    /// Engine configuration file (JSON)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log pipeline stages to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate one or more lines in a single session
    ///
    /// Lines share variables, so `calcbot eval "x = 2" "x * 3"` prints 6.0.
    Eval {
        /// Lines to evaluate, in order
        #[arg(required = true)]
        lines: Vec<String>,
        /// Print structured JSON replies
        #[arg(long)]
        json: bool,
    },
    /// Evaluate every line of a script file
    ///
    /// Blank lines and lines starting with `#` are skipped.
    Run {
        /// Script file, one input per line
        file: PathBuf,
        /// Print structured JSON replies
        #[arg(long)]
        json: bool,
    },
    /// Read lines from stdin until EOF, `exit` or `quit`
    Repl,
    /// Validate and parse an expression without evaluating it
    ///
    /// Exits non-zero and points at the offending character when the
    /// expression is rejected.
    Check {
        /// Expression to check
        expression: String,
    },
    /// Run the built-in demonstration inputs
    Suite {
        /// Print structured JSON replies
        #[arg(long)]
        json: bool,
    },
    /// Start HTTP REST API server (default: localhost:3000)
    ///
    /// API: GET /health, GET /variables, POST /respond with {input}
    Server {
        /// Host address to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Port number to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.config.as_deref();
    let result = match &cli.command {
        Commands::Eval { lines, json } => eval_command(config, lines, *json),
        Commands::Run { file, json } => run_command(config, file, *json),
        Commands::Repl => repl_command(config),
        Commands::Check { expression } => check_command(config, expression),
        Commands::Suite { json } => suite_command(config, *json),
        Commands::Server { host, port } => server_command(config, host, *port),
    };

    if let Err(e) = result {
        if let Some(failure) = e.downcast_ref::<ExpressionFailure>() {
            eprintln!("{}", error_formatter::format_error(&failure.source, &failure.error));
        } else {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "calcbot=debug,calcbot_cli=debug,tower_http=debug"
    } else {
        "calcbot=warn,tower_http=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    EngineConfig::from_json(&text)
        .with_context(|| format!("Invalid config file '{}'", path.display()))
}

fn eval_command(config: Option<&Path>, lines: &[String], json: bool) -> Result<()> {
    let mut engine = Engine::with_config(load_config(config)?);
    let formatter = Formatter::new(json);
    for line in lines {
        let reply = engine.handle(line);
        println!("{}", formatter.format_reply(line, &reply)?);
    }
    Ok(())
}

fn run_command(config: Option<&Path>, file: &Path, json: bool) -> Result<()> {
    let script = fs::read_to_string(file)
        .with_context(|| format!("Failed to read script '{}'", file.display()))?;
    let mut engine = Engine::with_config(load_config(config)?);
    let formatter = Formatter::new(json);

    for line in script.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let reply = engine.handle(line);
        println!("{}", formatter.format_reply(line, &reply)?);
    }
    Ok(())
}

fn repl_command(config: Option<&Path>) -> Result<()> {
    let mut engine = Engine::with_config(load_config(config)?);
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("Bot: Hello! Ask me a math question, or type 'exit' to quit.");
    loop {
        print!("You: ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            println!();
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line.to_lowercase().as_str(), "exit" | "quit") {
            println!("Bot: Goodbye!");
            break;
        }
        println!("{}", engine.respond(line));
    }
    Ok(())
}

fn check_command(config: Option<&Path>, expression: &str) -> Result<()> {
    let limits = load_config(config)?.limits;
    let table = Arc::new(FunctionTable::standard());
    let validator = Validator::new(Arc::clone(&table), limits.clone());

    let checked = validator
        .validate_expression(expression, &VariableStore::new())
        .and_then(|_| {
            calcbot::parse(&DegreeCalls::new().rewrite(expression), &table, &limits)
        });

    match checked {
        Ok(expr) => {
            println!("OK: {}", expr);
            Ok(())
        }
        Err(error) => Err(ExpressionFailure {
            source: expression.to_string(),
            error,
        }
        .into()),
    }
}

fn suite_command(config: Option<&Path>, json: bool) -> Result<()> {
    let mut engine = Engine::with_config(load_config(config)?);
    let formatter = Formatter::new(json);

    if !json {
        println!("Running test suite...");
    }
    for input in suite::DEMONSTRATION_INPUTS {
        let reply = engine.handle(input);
        if json {
            println!("{}", formatter.format_reply(input, &reply)?);
        } else {
            println!("\nTest Case: {}", input);
            println!("{}", reply);
        }
    }
    if !json {
        println!("\nTest suite completed.");
    }
    Ok(())
}

fn server_command(config: Option<&Path>, host: &str, port: u16) -> Result<()> {
    #[cfg(feature = "server")]
    {
        use tokio::runtime::Runtime;
        let engine = Engine::with_config(load_config(config)?);
        let rt = Runtime::new()?;
        rt.block_on(server::http::start_server(engine, host, port))?;
    }

    #[cfg(not(feature = "server"))]
    {
        let _ = (config, host, port);
        eprintln!("Error: Server feature not enabled");
        eprintln!("Recompile with: cargo build --features server");
        std::process::exit(1);
    }

    Ok(())
}
