use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use scrollwire::{Engine, Event, Page};

#[derive(Parser, Debug)]
#[command(name = "scrollwire", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a page description JSON.
    Validate(ValidateArgs),
    /// Drive a page with an event script and dump the final style table.
    Run(RunArgs),
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input page JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Input page JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Event script JSON: an array of `{ "at": ms, ...event }` steps.
    #[arg(long)]
    script: PathBuf,

    /// Extra settle time after the last step, in ms.
    #[arg(long, default_value_t = 5000)]
    settle: u64,

    /// Determinism seed.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Output JSON path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Clone, Debug, serde::Deserialize)]
struct ScriptStep {
    at: u64,
    #[serde(flatten)]
    event: Event,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Validate(args) => validate(args),
        Command::Run(args) => run(args),
    }
}

fn load_page(path: &PathBuf) -> anyhow::Result<Page> {
    let raw =
        std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let page = Page::from_json(&raw).with_context(|| format!("load {}", path.display()))?;
    Ok(page)
}

fn validate(args: ValidateArgs) -> anyhow::Result<()> {
    let page = load_page(&args.in_path)?;
    println!("ok: {} elements", page.len());
    Ok(())
}

fn run(args: RunArgs) -> anyhow::Result<()> {
    let page = load_page(&args.in_path)?;

    let raw = std::fs::read_to_string(&args.script)
        .with_context(|| format!("read {}", args.script.display()))?;
    let mut steps: Vec<ScriptStep> =
        serde_json::from_str(&raw).with_context(|| format!("parse {}", args.script.display()))?;
    steps.sort_by_key(|s| s.at);

    let mut engine = Engine::new(page, args.seed).context("build engine")?;
    for step in steps {
        let lag = step.at.saturating_sub(engine.now().0);
        engine.advance(lag);
        engine.handle(step.event);
    }
    engine.advance(args.settle);

    let dump: serde_json::Map<String, serde_json::Value> = engine
        .page()
        .elements
        .iter()
        .enumerate()
        .map(|(i, el)| {
            let state = engine.styles().get(scrollwire::ElementId(i));
            (el.id.clone(), serde_json::to_value(state).unwrap_or_default())
        })
        .collect();
    let json = serde_json::to_string_pretty(&dump)?;

    match args.out {
        Some(path) => {
            std::fs::write(&path, json).with_context(|| format!("write {}", path.display()))?
        }
        None => println!("{json}"),
    }
    Ok(())
}
