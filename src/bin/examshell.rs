//! Examshell terminal frontend
//!
//! Line-oriented driver for the application core. A desktop frontend would
//! replace this loop with menu actions and a real windowing port; the
//! command set and the event wiring are the same.

use anyhow::Result;
use clap::Parser;
use console::style;
use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::info;

use examshell::app::{App, LoopControl, UiCommand, HELP_TEXT};
use examshell::catalog::Catalog;
use examshell::config::{self, Config};
use examshell::lockdown::HeadlessWindowing;
use examshell::VERSION;

#[derive(Parser)]
#[command(
    name = "examshell",
    version = VERSION,
    about = "Locked-down code editor shell for short programming exercises",
    long_about = None
)]
struct Cli {
    /// Config file (defaults to the XDG config location)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the sampling seed
    #[arg(long, env = "EXAMSHELL_SEED")]
    seed: Option<u64>,

    /// Override the interpreter binary
    #[arg(long, env = "EXAMSHELL_INTERPRETER")]
    interpreter: Option<String>,

    /// Print the resolved configuration as JSON and exit
    #[arg(long)]
    dump_config: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "examshell=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let mut cfg = match &cli.config {
        Some(path) => config::load_config_from_path(path)?,
        None => config::load_config()?,
    };
    if let Some(seed) = cli.seed {
        cfg.session.seed = Some(seed);
    }
    if let Some(interpreter) = cli.interpreter {
        cfg.runner.interpreter = interpreter;
    }

    let validation = config::validate_config(&cfg);
    for warning in &validation.warnings {
        eprintln!("{} {}", style("warning:").yellow().bold(), warning);
    }
    if !validation.valid() {
        for error in &validation.errors {
            eprintln!("{} {}", style("error:").red().bold(), error);
        }
        anyhow::bail!("invalid configuration");
    }

    if cli.dump_config {
        println!("{}", serde_json::to_string_pretty(&cfg)?);
        return Ok(());
    }

    run_shell(cfg).await
}

async fn run_shell(cfg: Config) -> Result<()> {
    let (mut app, mut run_events) = App::new(cfg, Box::new(HeadlessWindowing));

    println!(
        "{} v{} - locked-down exercise shell",
        style("examshell").cyan().bold(),
        VERSION
    );
    print_pool(&app);
    println!("Type {} for commands.\n", style("help").green());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    // Rendering cursor into the output log
    let mut printed = 0usize;
    let mut last_banner: Option<String> = None;

    prompt();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("stdin closed, leaving");
                    break;
                };
                match handle_line(&mut app, &mut lines, &line).await? {
                    LoopControl::Exit => break,
                    LoopControl::Continue => {}
                }
                render(&app, &mut printed, &mut last_banner);
                prompt();
            }
            event = run_events.recv() => {
                if let Some(event) = event {
                    app.handle_run_event(event);
                    render(&app, &mut printed, &mut last_banner);
                }
            }
            _ = ticker.tick() => {
                app.tick(Instant::now());
                render(&app, &mut printed, &mut last_banner);
            }
            _ = tokio::signal::ctrl_c() => {
                // Ctrl+C is a close request like any other; exam mode
                // rejects it outright
                match app.handle_command(UiCommand::Close).await {
                    LoopControl::Exit => break,
                    LoopControl::Continue => {
                        render(&app, &mut printed, &mut last_banner);
                        prompt();
                    }
                }
            }
        }
    }

    Ok(())
}

/// Dispatch one input line: frontend-level commands first, then the
/// application command set.
async fn handle_line(
    app: &mut App,
    lines: &mut Lines<BufReader<Stdin>>,
    line: &str,
) -> Result<LoopControl> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(LoopControl::Continue);
    }

    // Buffer editing is a frontend concern, like typing into the widget
    if trimmed == "edit" {
        let text = gather_lines(lines, "Enter code, end with a single '.' line:").await?;
        app.edit_buffer(text);
        return Ok(LoopControl::Continue);
    }
    if trimmed == "about" {
        println!("examshell v{} - offline exercise runner and exam shell", VERSION);
        return Ok(LoopControl::Continue);
    }

    let Some(command) = UiCommand::parse(trimmed) else {
        println!("Unknown command '{}'; try {}.", trimmed, style("help").green());
        return Ok(LoopControl::Continue);
    };

    match command {
        UiCommand::Help => {
            println!("{}", HELP_TEXT);
            Ok(LoopControl::Continue)
        }
        UiCommand::Show => {
            println!("{}", app.shell().buffer());
            Ok(LoopControl::Continue)
        }
        UiCommand::Run { .. } => {
            // Gather program input up front so the run itself never blocks
            let stdin = if app.needs_input() {
                Some(gather_lines(lines, "Program input, end with a single '.' line:").await?)
            } else {
                None
            };
            Ok(app.handle_command(UiCommand::Run { stdin }).await)
        }
        UiCommand::Load(id) => {
            if app.shell().has_content() && !confirm_discard(app, lines).await? {
                println!("Keeping current buffer.");
                return Ok(LoopControl::Continue);
            }
            Ok(app.handle_command(UiCommand::Load(id)).await)
        }
        other => Ok(app.handle_command(other).await),
    }
}

/// Switching exercises discards unsaved edits, but only after confirmation.
async fn confirm_discard(app: &App, lines: &mut Lines<BufReader<Stdin>>) -> Result<bool> {
    let what = match app.session().active() {
        Some(id) => format!("exercise '{}'", id),
        None => "the current buffer".to_string(),
    };
    print!(
        "{} Discard {} and switch? [y/N] ",
        style("?").yellow().bold(),
        what
    );
    std::io::stdout().flush()?;
    let answer = lines.next_line().await?.unwrap_or_default();
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

/// Read lines until a lone '.' terminator.
async fn gather_lines(lines: &mut Lines<BufReader<Stdin>>, prompt_text: &str) -> Result<String> {
    println!("{}", style(prompt_text).dim());
    let mut collected = String::new();
    while let Some(line) = lines.next_line().await? {
        if line.trim() == "." {
            break;
        }
        collected.push_str(&line);
        collected.push('\n');
    }
    Ok(collected)
}

/// Print whatever the output log and banner gained since the last render.
fn render(app: &App, printed: &mut usize, last_banner: &mut Option<String>) {
    let text = app.shell().output().text();
    if text.len() < *printed || !text.is_char_boundary(*printed) {
        // Log was cleared or trimmed from the front; start over
        *printed = 0;
        println!();
    }
    if text.len() > *printed {
        print!("{}", &text[*printed..]);
        let _ = std::io::stdout().flush();
        *printed = text.len();
    }

    let banner = app.shell().banner().map(|b| b.to_string());
    if banner != *last_banner {
        if let Some(banner) = &banner {
            println!("{}", style(banner).white().on_red().bold());
        }
        *last_banner = banner;
    }
}

fn print_pool(app: &App) {
    let catalog = Catalog::builtin();
    let labels: Vec<String> = app
        .session()
        .pool()
        .iter()
        .filter_map(|id| catalog.get(id).ok())
        .map(|e| format!("{} ({})", e.label(), e.id))
        .collect();
    println!("Available exercises: {}", labels.join(", "));
}

fn prompt() {
    print!("{} ", style(">").cyan());
    let _ = std::io::stdout().flush();
}
