//! fontload CLI (made by FontLab https://www.fontlab.com/)

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};
use serde::Serialize;
use serde_json::Value;

use fontload_core::bind::ClassBinding;
use fontload_core::document::{HeadNode, LinkOutcome, MemoryDocument};
use fontload_core::{Font, FontRequest, Provider, RenderedAsset};

pub mod server;

/// CLI entrypoint for fontload.
#[derive(Debug, Parser)]
#[command(
    name = "fontload",
    about = "Resolve and render web font loads (made by FontLab https://www.fontlab.com/)"
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build a font load against an in-memory document and show the result
    Render(RenderArgs),
    /// List providers and the aliases they answer to
    Providers(ProvidersArgs),
    /// Serve load plans over HTTP
    Serve(ServeArgs),
}

#[derive(Debug, Args)]
struct RenderArgs {
    /// Provider name or alias (detected from the configuration when omitted)
    #[arg(short = 'p', long = "provider")]
    provider: Option<String>,

    /// JSON configuration file, or `-` for STDIN
    #[arg(short = 'c', long = "config", value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Configuration fields as KEY=VALUE; VALUE is read as JSON when it parses
    #[arg(short = 's', long = "set", value_name = "KEY=VALUE")]
    set: Vec<String>,

    /// Report stylesheet links as failed instead of loaded
    #[arg(long = "fail-links", action = ArgAction::SetTrue)]
    fail_links: bool,

    /// Emit a JSON report
    #[arg(long = "json", action = ArgAction::SetTrue, conflicts_with = "html")]
    json: bool,

    /// Emit the resulting head markup
    #[arg(long = "html", action = ArgAction::SetTrue)]
    html: bool,
}

#[derive(Debug, Args)]
struct ProvidersArgs {
    /// Emit a JSON array
    #[arg(long = "json", action = ArgAction::SetTrue)]
    json: bool,
}

#[derive(Debug, Args)]
struct ServeArgs {
    /// Address to listen on
    #[arg(long = "bind", default_value = "127.0.0.1:8765")]
    bind: String,
}

/// What a render left behind in the document.
#[derive(Debug, Serialize)]
struct RenderReport {
    provider: Provider,
    asset: RenderedAsset,
    #[serde(skip_serializing_if = "Option::is_none")]
    binding: Option<ClassBinding>,
    head: Vec<HeadNode>,
    root_classes: Vec<String>,
    #[serde(skip)]
    html: String,
}

/// One row of the alias table.
#[derive(Debug, Serialize)]
pub(crate) struct ProviderAliases {
    provider: Provider,
    aliases: Vec<&'static str>,
}

pub(crate) fn provider_table() -> Vec<ProviderAliases> {
    Provider::ALL
        .iter()
        .map(|provider| ProviderAliases {
            provider: *provider,
            aliases: provider.aliases().to_vec(),
        })
        .collect()
}

/// Parse CLI args and execute the selected command.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Render(args) => run_render(args),
        Command::Providers(args) => run_providers(args),
        Command::Serve(args) => run_serve(args),
    }
}

fn init_logging(verbose: u8) {
    env_logger::Builder::new()
        .filter_level(match verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        })
        .init();
}

fn run_render(args: RenderArgs) -> Result<()> {
    let stdin = io::stdin();
    let request = build_request(args.config.as_deref(), &args.set, stdin.lock())?;
    let report = render(args.provider.as_deref(), request, args.fail_links)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if args.json {
        write_json(&report, &mut handle)
    } else if args.html {
        write_html(&report, &mut handle)
    } else {
        write_plain(&report, &mut handle)
    }
}

fn run_providers(args: ProvidersArgs) -> Result<()> {
    let table = provider_table();
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    if args.json {
        let json = serde_json::to_string_pretty(&table)?;
        writeln!(handle, "{json}")?;
    } else {
        for row in &table {
            writeln!(handle, "{}: {}", row.provider, row.aliases.join(", "))?;
        }
    }
    Ok(())
}

fn run_serve(args: ServeArgs) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("starting async runtime")?;
    runtime.block_on(server::serve(&args.bind))
}

fn build_request(config: Option<&Path>, set: &[String], mut stdin: impl Read) -> Result<FontRequest> {
    let mut request = match config {
        Some(path) if path == Path::new("-") => {
            let mut text = String::new();
            stdin.read_to_string(&mut text)?;
            FontRequest::from_json(&text).context("parsing configuration from STDIN")?
        }
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading configuration {}", path.display()))?;
            FontRequest::from_json(&text)
                .with_context(|| format!("parsing configuration {}", path.display()))?
        }
        None => FontRequest::new(),
    };

    for pair in set {
        let (key, value) = parse_assignment(pair)?;
        request.insert(key, value);
    }

    Ok(request)
}

fn parse_assignment(raw: &str) -> Result<(String, Value)> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("expected KEY=VALUE, got: {raw}"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(anyhow!("empty key in: {raw}"));
    }

    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

fn render(provider: Option<&str>, request: FontRequest, fail_links: bool) -> Result<RenderReport> {
    let document = Rc::new(MemoryDocument::new());
    let font = Font::new(provider, request, Rc::clone(&document));
    let plan = font.plan()?;

    let mut completion = font.load();
    let outcome = if fail_links {
        LinkOutcome::Failed
    } else {
        LinkOutcome::Loaded
    };
    document.settle_all(outcome);

    let result = completion
        .try_result()
        .ok_or_else(|| anyhow!("font load did not settle"))?;
    result.with_context(|| format!("loading font via {}", plan.provider))?;

    Ok(RenderReport {
        provider: plan.provider,
        asset: plan.asset,
        binding: plan.binding,
        head: document.head(),
        root_classes: document.root_classes(),
        html: document.to_html(),
    })
}

fn write_json(report: &RenderReport, mut w: impl Write) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    writeln!(w, "{json}")?;
    Ok(())
}

fn write_html(report: &RenderReport, mut w: impl Write) -> Result<()> {
    w.write_all(report.html.as_bytes())?;
    if !report.root_classes.is_empty() {
        writeln!(w, "<!-- root classes: {} -->", report.root_classes.join(" "))?;
    }
    Ok(())
}

fn write_plain(report: &RenderReport, mut w: impl Write) -> Result<()> {
    writeln!(w, "provider: {}", report.provider)?;
    match &report.asset {
        RenderedAsset::Stylesheet(url) => writeln!(w, "stylesheet: {url}")?,
        RenderedAsset::InlineCss(css) => {
            writeln!(w, "inline css:")?;
            for line in css.lines() {
                writeln!(w, "  {line}")?;
            }
        }
    }
    if let Some(binding) = &report.binding {
        match &binding.font_name {
            Some(name) => writeln!(w, "binding: {} -> {name}", binding.target)?,
            None => writeln!(w, "binding: flag class {}", binding.flag_class())?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests;
