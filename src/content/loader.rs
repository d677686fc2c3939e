use std::path::{Component, Path, PathBuf};

use crate::{
    content::frontmatter::{ParsedFrontMatter, split_front_matter},
    foundation::error::{PinError, PinResult},
};

/// File extensions treated as content documents (compared case-insensitively).
pub const DOCUMENT_EXTENSIONS: &[&str] = &["md", "mdx"];

/// List every `.md`/`.mdx` file under `root`, recursively.
///
/// Paths are absolute and sorted. A missing or unreadable root is an error; unreadable
/// entries below it are skipped with a warning.
pub fn discover_documents(root: &Path) -> PinResult<Vec<PathBuf>> {
    let root = std::path::absolute(root).map_err(|e| PinError::io(root, e))?;
    let meta = std::fs::metadata(&root).map_err(|e| PinError::io(&root, e))?;
    if !meta.is_dir() {
        return Err(PinError::io(
            &root,
            std::io::Error::new(std::io::ErrorKind::NotADirectory, "content root is not a directory"),
        ));
    }

    let mut out = Vec::new();
    for entry in walkdir::WalkDir::new(&root).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable content entry");
                continue;
            }
        };
        if entry.file_type().is_file() && is_document(entry.path()) {
            out.push(entry.into_path());
        }
    }
    out.sort();
    Ok(out)
}

fn is_document(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| DOCUMENT_EXTENSIONS.iter().any(|d| ext.eq_ignore_ascii_case(d)))
}

/// A content document with its front-matter parsed.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceDocument {
    pub path: PathBuf,
    pub front_matter: ParsedFrontMatter,
    pub body: String,
}

/// Resolved inputs for composing one pin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderSpec {
    pub title: String,
    pub excerpt: String,
    /// Source image, resolved against the document's directory.
    pub image_path: PathBuf,
}

impl SourceDocument {
    pub fn load(path: &Path) -> PinResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| PinError::io(path, e))?;
        Self::parse(path, &text)
    }

    /// Parse already-read document text. `path` is only used for image resolution and
    /// error reporting.
    pub fn parse(path: &Path, text: &str) -> PinResult<Self> {
        let (block, body) = split_front_matter(text)?;
        let front_matter = match block {
            Some(block) => ParsedFrontMatter::parse(&block)?,
            None => ParsedFrontMatter::default(),
        };
        Ok(Self {
            path: path.to_path_buf(),
            front_matter,
            body: body.to_string(),
        })
    }

    /// Apply defaults and resolve the image path.
    ///
    /// A missing or empty `image` field fails before any path is touched.
    pub fn render_spec(&self) -> PinResult<RenderSpec> {
        let fm = &self.front_matter;
        let image_ref = fm.image_ref().ok_or_else(|| PinError::MissingField {
            field: "image",
            doc: self.path.clone(),
        })?;
        Ok(RenderSpec {
            title: fm.title_or_default().to_string(),
            excerpt: fm.excerpt_or_default().to_string(),
            image_path: resolve_image_path(&self.path, image_ref),
        })
    }

    pub fn file_stem(&self) -> Option<&str> {
        self.path.file_stem().and_then(|s| s.to_str())
    }
}

/// Join `image_ref` onto the directory of `doc_path` and normalize it lexically.
///
/// Absolute references are kept as given. The working directory is never consulted, so a
/// relative `doc_path` yields a relative result.
pub fn resolve_image_path(doc_path: &Path, image_ref: &str) -> PathBuf {
    let image_ref = Path::new(image_ref);
    if image_ref.is_absolute() {
        return normalize_lexically(image_ref);
    }
    let dir = doc_path.parent().unwrap_or_else(|| Path::new(""));
    normalize_lexically(&dir.join(image_ref))
}

fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                let last_is_normal = matches!(out.components().next_back(), Some(Component::Normal(_)));
                if last_is_normal {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// `<out_dir>/<stem>.png` for a document path.
pub fn output_path_for(out_dir: &Path, doc_path: &Path) -> PinResult<PathBuf> {
    let stem = doc_path
        .file_stem()
        .ok_or_else(|| PinError::validation(format!("document '{}' has no file name", doc_path.display())))?;
    let mut name = stem.to_os_string();
    name.push(".png");
    Ok(out_dir.join(name))
}

#[cfg(test)]
#[path = "../../tests/unit/content/loader.rs"]
mod tests;
