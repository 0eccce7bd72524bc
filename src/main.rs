//! Purpose: `chatmark` CLI entry point and command dispatch.
//! Role: Binary crate root; parses args, runs conversions, emits results on stdout.
//! Invariants: `parse` emits chat JSON; `strip` and `legacy` emit plain lines.
//! Invariants: Errors are emitted as JSON on stderr when stderr is not a TTY.
//! Invariants: Process exit code is derived from `to_exit_code`.

use std::io::{self, IsTerminal, Read};

use clap::error::ErrorKind as ClapErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::aot::Shell;
use serde_json::{Map, Value, json};
use tracing_subscriber::EnvFilter;

use chatmark::{
    DEFAULT_FORMAT_CHAR, Error, ErrorKind, from_json, parse_json_with, parse_with, strip,
    to_exit_code, to_json, to_legacy,
};

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }

    fn with_code(exit_code: i32) -> Self {
        Self { exit_code }
    }
}

fn main() {
    init_tracing();
    let exit_code = match run() {
        Ok(outcome) => outcome.exit_code,
        Err(err) => {
            emit_error(&err);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<RunOutcome, Error> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print().map_err(|io_err| {
                    Error::new(ErrorKind::Io)
                        .with_message("failed to write help")
                        .with_source(io_err)
                })?;
                let exit_code = if matches!(
                    err.kind(),
                    ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) {
                    2
                } else {
                    0
                };
                return Ok(RunOutcome::with_code(exit_code));
            }
            _ => {
                return Err(Error::new(ErrorKind::Usage)
                    .with_message(err.to_string().trim_end().to_string()));
            }
        },
    };

    dispatch(cli)
}

#[derive(Parser)]
#[command(
    name = "chatmark",
    version,
    about = "Convert Minecraft legacy chat markup to and from chat JSON"
)]
struct Cli {
    /// Formatting-code marker character.
    #[arg(long, global = true, default_value_t = DEFAULT_FORMAT_CHAR)]
    format_char: char,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse legacy-coded text into chat JSON.
    Parse {
        /// Input text; `-` or omitted reads stdin.
        text: Option<String>,
        /// Also parse the `||` tag micro-format (ttp:/url:/cmd:/sgt:/ins:).
        #[arg(long)]
        tags: bool,
        /// Pretty-print the JSON output.
        #[arg(long)]
        pretty: bool,
    },
    /// Remove all formatting codes, leaving plain text.
    Strip {
        /// Input text; `-` or omitted reads stdin.
        text: Option<String>,
    },
    /// Convert chat JSON back into legacy-coded text.
    Legacy {
        /// Chat JSON; `-` or omitted reads stdin.
        json: Option<String>,
    },
    /// Emit shell completions.
    Completions { shell: Shell },
}

fn dispatch(cli: Cli) -> Result<RunOutcome, Error> {
    let format_char = cli.format_char;
    match cli.command {
        Commands::Parse { text, tags, pretty } => {
            let input = resolve_input(text)?;
            let message = if tags {
                parse_json_with(&input, format_char)
            } else {
                parse_with(&input, format_char).into_sendable()
            };
            let value = to_json(&message);
            let encoded = if pretty {
                serde_json::to_string_pretty(&value)
            } else {
                serde_json::to_string(&value)
            }
            .map_err(|err| {
                Error::new(ErrorKind::Internal)
                    .with_message("failed to encode chat JSON")
                    .with_source(err)
            })?;
            println!("{encoded}");
            Ok(RunOutcome::ok())
        }
        Commands::Strip { text } => {
            let input = resolve_input(text)?;
            println!("{}", strip(&input, format_char));
            Ok(RunOutcome::ok())
        }
        Commands::Legacy { json } => {
            let input = resolve_input(json)?;
            let value: Value = serde_json::from_str(&input).map_err(|err| {
                Error::new(ErrorKind::Parse)
                    .with_message("input is not valid JSON")
                    .with_source(err)
            })?;
            let message = from_json(&value)?;
            // Actions have no legacy form; flatten every section's text into
            // one run so formatting transitions stay correct across sections.
            let components: Vec<_> = message
                .sections()
                .iter()
                .flat_map(|section| section.contents().iter().cloned())
                .collect();
            let flattened = chatmark::Message::new(components);
            println!("{}", to_legacy(&flattened, format_char));
            Ok(RunOutcome::ok())
        }
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            let name = command.get_name().to_string();
            clap_complete::generate(shell, &mut command, name, &mut io::stdout());
            Ok(RunOutcome::ok())
        }
    }
}

/// `-` or a missing positional means "read stdin".
fn resolve_input(arg: Option<String>) -> Result<String, Error> {
    match arg {
        Some(text) if text != "-" => Ok(text),
        _ => {
            let mut input = String::new();
            io::stdin().read_to_string(&mut input).map_err(|err| {
                Error::new(ErrorKind::Io)
                    .with_message("failed to read stdin")
                    .with_source(err)
            })?;
            // Shells append a trailing newline; it is never chat content.
            if input.ends_with('\n') {
                input.pop();
            }
            Ok(input)
        }
    }
}

fn emit_error(err: &Error) {
    if io::stderr().is_terminal() {
        eprintln!("error: {err}");
        if let Some(hint) = err.hint() {
            eprintln!("hint: {hint}");
        }
        return;
    }

    let value = error_json(err);
    let encoded = serde_json::to_string(&value).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{encoded}");
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    if let Some(message) = err.message() {
        inner.insert("message".to_string(), json!(message));
    }
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}
