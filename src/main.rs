use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use textnav::model::{ReplaySummary, Script, TrackerSummary};
use textnav::paragraph::NodeGroupItem;
use textnav::session::{sim_session, Notification};
use textnav::trace::{action_line, command_line, print_trace_line};
use textnav::word_utils::{word_ends, word_starts};

const LOG_ENV: &str = "TEXTNAV_LOG";

#[derive(Debug, Parser)]
#[command(name = "textnav")]
#[command(about = "Word boundaries and switch-access text selection", long_about = None)]
struct Cli {
    /// Log filter used when TEXTNAV_LOG is unset (e.g. warn, debug, textnav=trace)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the word starts and word ends of a text (JSON)
    Words {
        /// Text to scan
        #[arg(long, conflicts_with = "input")]
        text: Option<String>,

        /// Input text file, or '-' for stdin
        #[arg(long, value_name = "PATH")]
        input: Option<PathBuf>,

        /// Word boundary hints for the text (JSON node group)
        #[arg(long, value_name = "PATH")]
        hints: Option<PathBuf>,

        /// Output file (defaults to stdout)
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Replay a script of menu actions against simulated text fields
    Replay {
        /// Script file (JSON)
        #[arg(long, value_name = "PATH")]
        script: PathBuf,

        /// Force the basic action set, ignoring the script's config
        #[arg(long)]
        basic_text_input: bool,

        /// Disable console trace output
        #[arg(long)]
        no_trace: bool,

        /// Output summary file (defaults to stdout)
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Serialize)]
struct WordsReport {
    len: usize,
    word_starts: Vec<usize>,
    word_ends: Vec<usize>,
}

fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == std::ffi::OsStr::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        return Ok(buf);
    }

    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn write_json(path: Option<&Path>, value: &impl Serialize) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    match path {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
        }
        None => {
            println!("{json}");
            Ok(())
        }
    }
}

fn load_hints(path: &Path) -> Result<NodeGroupItem> {
    let json = read_input(path)?;
    serde_json::from_str(&json).context("failed to parse hints JSON")
}

fn load_script(path: &Path) -> Result<Script> {
    let json = read_input(path)?;
    let script: Script = serde_json::from_str(&json).context("failed to parse script JSON")?;

    if script.version != 1 {
        return Err(anyhow!(
            "unsupported script version {}; expected 1",
            script.version
        ));
    }
    if script.fields.is_empty() {
        return Err(anyhow!("script must declare at least one field"));
    }
    if script.focus >= script.fields.len() {
        return Err(anyhow!(
            "script focus {} is out of range ({} fields)",
            script.focus,
            script.fields.len()
        ));
    }

    Ok(script)
}

fn run_words(
    text: Option<String>,
    input: Option<PathBuf>,
    hints: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<()> {
    let text = match (text, input) {
        (Some(text), _) => text,
        (None, Some(path)) => read_input(&path)?,
        (None, None) => return Err(anyhow!("one of --text or --input is required")),
    };
    let group = hints.as_deref().map(load_hints).transpose()?;

    let report = WordsReport {
        len: text.chars().count(),
        word_starts: word_starts(&text, group.as_ref()).collect(),
        word_ends: word_ends(&text, group.as_ref()).collect(),
    };
    write_json(output.as_deref(), &report)
}

fn run_replay(
    script: &Path,
    basic_text_input: bool,
    trace: bool,
    output: Option<&Path>,
) -> Result<()> {
    let script = load_script(script)?;
    let mut config = script.config.clone();
    if basic_text_input {
        config.improved_text_input = false;
    }

    let mut session = sim_session(config);
    let mut nodes = Vec::with_capacity(script.fields.len());
    for field in &script.fields {
        nodes.push(session.host_mut().add_field(&field.text, field.caret));
    }
    session.host_mut().focus(nodes[script.focus]);

    let mut responses = Vec::with_capacity(script.actions.len());
    for &action in &script.actions {
        let response = session.perform(action);
        let notifications = session.run_until_idle();
        responses.push(response);

        if trace {
            print_trace_line(&action_line(action, response));
            for command in session.host_mut().take_commands() {
                print_trace_line(&command_line(&command));
            }
            if notifications.contains(&Notification::ReloadActions) {
                print_trace_line("Reload actions");
            }
        }
    }

    let manager = session.manager();
    let summary = ReplaySummary {
        responses,
        fields: session.host().summaries(),
        clipboard: session.host().clipboard().map(str::to_string),
        tracker: TrackerSummary {
            currently_selecting: manager.currently_selecting(),
            sel_start_index: manager.sel_start_index(),
            sel_end_index: manager.sel_end_index(),
            selection_exists: manager.selection_exists(),
            clipboard_has_data: manager.clipboard_has_data(),
        },
    };

    eprintln!(
        "Replayed: {} actions over {} fields",
        script.actions.len(),
        script.fields.len()
    );
    write_json(output, &summary)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match cli.command {
        Command::Words {
            text,
            input,
            hints,
            output,
        } => run_words(text, input, hints, output)?,
        Command::Replay {
            script,
            basic_text_input,
            no_trace,
            output,
        } => run_replay(&script, basic_text_input, !no_trace, output.as_deref())?,
    }

    Ok(())
}
