use std::{path::PathBuf, process::ExitCode};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pinsmith", version, args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    cmd: Option<Command>,

    #[command(flatten)]
    render: RenderArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one PNG per blog post (default).
    Render(RenderArgs),
    /// Print front-matter tags with their post counts.
    Tags(TagsArgs),
}

#[derive(Args, Debug, Clone)]
struct RenderArgs {
    /// Directory searched for .md/.mdx posts.
    #[arg(long, default_value = "./src/content/blog")]
    content: PathBuf,

    /// Output directory for the generated PNGs.
    #[arg(long, default_value = "./dist/pinterest")]
    out: PathBuf,

    /// Logo drawn in the lower right corner (SVG or raster).
    #[arg(long, default_value = "./src/assets/full-logo.svg")]
    logo: PathBuf,

    /// Directory with .ttf/.otf files tried before system fonts.
    #[arg(long)]
    font_dir: Option<PathBuf>,

    /// Worker threads (defaults to the number of CPUs).
    #[arg(long)]
    threads: Option<usize>,

    /// Stop starting new posts after the first failure.
    #[arg(long)]
    fail_fast: bool,

    /// Write a JSON report of every post's outcome to this path.
    #[arg(long)]
    report: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct TagsArgs {
    /// Directory searched for .md/.mdx posts.
    #[arg(long, default_value = "./src/content/blog")]
    content: PathBuf,
}

fn main() -> anyhow::Result<ExitCode> {
    init_tracing();

    let cli = Cli::parse();
    match cli.cmd {
        Some(Command::Render(args)) => cmd_render(args),
        Some(Command::Tags(args)) => cmd_tags(args),
        None => cmd_render(cli.render),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<ExitCode> {
    let opts = pinsmith::BatchOpts {
        content_root: args.content,
        out_dir: args.out,
        logo_path: args.logo,
        font_dir: args.font_dir,
        threads: args.threads,
        fail_fast: args.fail_fast,
    };

    let report = pinsmith::run_batch(&opts).context("render pins")?;

    if let Some(path) = &args.report {
        let json = report.to_json()?;
        std::fs::write(path, json)
            .with_context(|| format!("write report '{}'", path.display()))?;
    }

    for (source, error) in report.failures() {
        eprintln!("failed {}: {error}", source.display());
    }
    eprintln!(
        "{} written, {} failed, {} skipped",
        report.written(),
        report.failed(),
        report.skipped()
    );

    Ok(if report.all_succeeded() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn cmd_tags(args: TagsArgs) -> anyhow::Result<ExitCode> {
    let paths = pinsmith::discover_documents(&args.content)
        .with_context(|| format!("scan '{}'", args.content.display()))?;

    let mut docs = Vec::with_capacity(paths.len());
    for path in &paths {
        match pinsmith::SourceDocument::load(path) {
            Ok(doc) => docs.push(doc),
            Err(e) => tracing::warn!(source = %path.display(), error = %e, "skipping post"),
        }
    }

    let index = pinsmith::TagIndex::from_front_matter(docs.iter().map(|d| &d.front_matter));
    for (tag, count) in index.tags() {
        println!("{tag}\t{count}");
    }
    Ok(ExitCode::SUCCESS)
}
