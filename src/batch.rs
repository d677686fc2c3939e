use std::{
    collections::HashMap,
    io::Write as _,
    path::{Path, PathBuf},
    sync::atomic::{AtomicBool, Ordering},
};

use rayon::prelude::*;

use crate::{
    assets::fonts::FontBook,
    compose::Composer,
    content::loader::{SourceDocument, discover_documents, output_path_for},
    foundation::error::{PinError, PinResult},
    render::encode::encode_png,
};

pub mod report;

pub use report::{BatchReport, DocOutcome, DocStatus};

/// Inputs of one batch run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchOpts {
    /// Directory searched recursively for `.md`/`.mdx` documents.
    pub content_root: PathBuf,
    /// Directory receiving one PNG per document.
    pub out_dir: PathBuf,
    /// Logo drawn on every pin.
    pub logo_path: PathBuf,
    /// Extra font directory tried before system fonts.
    pub font_dir: Option<PathBuf>,
    /// Worker count; `None` uses rayon's default.
    pub threads: Option<usize>,
    /// Stop starting new documents after the first failure.
    pub fail_fast: bool,
}

impl Default for BatchOpts {
    fn default() -> Self {
        Self {
            content_root: PathBuf::from("./src/content/blog"),
            out_dir: PathBuf::from("./dist/pinterest"),
            logo_path: PathBuf::from("./src/assets/full-logo.svg"),
            font_dir: None,
            threads: None,
            fail_fast: false,
        }
    }
}

/// A discovered document and where its pin goes.
#[derive(Debug)]
struct PlannedDoc {
    source: PathBuf,
    output: PinResult<PathBuf>,
}

/// Render a pin for every document under `opts.content_root`.
///
/// Errors returned here are batch-level (bad options, unreadable content root, output
/// directory, fonts). Per-document failures are captured in the report.
#[tracing::instrument(skip(opts), fields(content = %opts.content_root.display(), out = %opts.out_dir.display()))]
pub fn run_batch(opts: &BatchOpts) -> PinResult<BatchReport> {
    let pool = build_thread_pool(opts.threads)?;

    let docs = discover_documents(&opts.content_root)?;
    tracing::info!(count = docs.len(), "discovered documents");

    std::fs::create_dir_all(&opts.out_dir).map_err(|source| PinError::Write {
        path: opts.out_dir.clone(),
        source,
    })?;

    let fonts = FontBook::load(opts.font_dir.as_deref())?;
    // Surface shaper setup problems once instead of per document.
    Composer::new(&fonts, &opts.logo_path)?;

    let planned = plan_outputs(&opts.out_dir, docs);
    let cancelled = AtomicBool::new(false);

    let outcomes = pool.install(|| {
        planned
            .into_par_iter()
            .map_init(
                || Composer::new(&fonts, &opts.logo_path),
                |composer, doc| {
                    let status = if opts.fail_fast && cancelled.load(Ordering::Relaxed) {
                        DocStatus::Skipped
                    } else {
                        let result = match (composer, doc.output) {
                            (Ok(composer), Ok(output)) => {
                                render_document(composer, &doc.source, &output).map(|()| output)
                            }
                            (Err(e), _) => Err(e.replicate()),
                            (_, Err(e)) => Err(e),
                        };
                        match result {
                            Ok(output) => {
                                tracing::info!(output = %output.display(), "wrote pin");
                                DocStatus::Written { output }
                            }
                            Err(error) => {
                                tracing::warn!(source = %doc.source.display(), %error, "pin failed");
                                if opts.fail_fast {
                                    cancelled.store(true, Ordering::Relaxed);
                                }
                                DocStatus::Failed { error }
                            }
                        }
                    };
                    DocOutcome {
                        source: doc.source,
                        status,
                    }
                },
            )
            .collect::<Vec<_>>()
    });

    let report = BatchReport { outcomes };
    tracing::info!(
        written = report.written(),
        failed = report.failed(),
        skipped = report.skipped(),
        "batch finished"
    );
    Ok(report)
}

/// Load, compose, encode and write one document.
#[tracing::instrument(skip(composer, source, output), fields(source = %source.display()))]
pub fn render_document(composer: &mut Composer, source: &Path, output: &Path) -> PinResult<()> {
    let doc = SourceDocument::load(source)?;
    let spec = doc.render_spec()?;
    let frame = composer.compose(&spec)?.finish();
    let png = encode_png(&frame)?;
    write_atomic(output, &png)
}

/// Map each document to its output. Documents arrive sorted, so on a collision the first in
/// path order keeps the output.
fn plan_outputs(out_dir: &Path, docs: Vec<PathBuf>) -> Vec<PlannedDoc> {
    let mut owners: HashMap<PathBuf, PathBuf> = HashMap::new();
    docs.into_iter()
        .map(|source| {
            let output = output_path_for(out_dir, &source).and_then(|output| {
                match owners.get(&output) {
                    Some(first) => Err(PinError::OutputCollision {
                        output,
                        first: first.clone(),
                    }),
                    None => {
                        owners.insert(output.clone(), source.clone());
                        Ok(output)
                    }
                }
            });
            PlannedDoc { source, output }
        })
        .collect()
}

/// Write `bytes` through a temporary file in the destination directory, then rename.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> PinResult<()> {
    let write_err = |source: std::io::Error| PinError::Write {
        path: path.to_path_buf(),
        source,
    };
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(bytes).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

fn build_thread_pool(threads: Option<usize>) -> PinResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(PinError::validation("'threads' must be >= 1 when set"));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| PinError::validation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../tests/unit/batch/runner.rs"]
mod tests;
