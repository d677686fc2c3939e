use std::path::PathBuf;

/// Convenience result alias used across the crate.
pub type PinResult<T> = Result<T, PinError>;

/// Error type for document loading, composition, encoding and batch output.
#[derive(thiserror::Error, Debug)]
pub enum PinError {
    /// A required front-matter field is absent or empty.
    #[error("missing front-matter field '{field}' in '{}'", doc.display())]
    MissingField {
        /// Field name as written in front-matter.
        field: &'static str,
        /// Document that lacks the field.
        doc: PathBuf,
    },

    /// Front-matter block is malformed or a field has the wrong type.
    #[error("front-matter error: {0}")]
    FrontMatter(String),

    /// Source image or logo could not be read or decoded.
    #[error("missing asset '{}': {reason}", path.display())]
    MissingAsset {
        /// Path that failed to load.
        path: PathBuf,
        /// Underlying read/decode failure.
        reason: String,
    },

    /// No usable font face could be resolved.
    #[error("font error: {0}")]
    Font(String),

    /// Canvas construction or drawing failed.
    #[error("render error: {0}")]
    Render(String),

    /// Canvas-to-PNG encoding failed.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Writing an output artifact failed.
    #[error("write error for '{}': {source}", path.display())]
    Write {
        /// Destination path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Two documents map to the same output file.
    #[error("output '{}' is already produced by '{}'", output.display(), first.display())]
    OutputCollision {
        /// Output path both documents would write.
        output: PathBuf,
        /// Document that keeps the output.
        first: PathBuf,
    },

    /// Reading a document or walking the content root failed.
    #[error("io error for '{}': {source}", path.display())]
    Io {
        /// Path being read.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Invalid options.
    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PinError {
    pub fn front_matter(msg: impl Into<String>) -> Self {
        Self::FrontMatter(msg.into())
    }

    pub fn missing_asset(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        Self::MissingAsset {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// An equivalent error with the same variant and message.
    ///
    /// Used when one failure has to be reported for several documents. Wrapped IO errors
    /// keep their kind and message.
    pub fn replicate(&self) -> Self {
        let io_copy = |e: &std::io::Error| std::io::Error::new(e.kind(), e.to_string());
        match self {
            Self::MissingField { field, doc } => Self::MissingField {
                field: *field,
                doc: doc.clone(),
            },
            Self::FrontMatter(m) => Self::FrontMatter(m.clone()),
            Self::MissingAsset { path, reason } => Self::MissingAsset {
                path: path.clone(),
                reason: reason.clone(),
            },
            Self::Font(m) => Self::Font(m.clone()),
            Self::Render(m) => Self::Render(m.clone()),
            Self::Encoding(m) => Self::Encoding(m.clone()),
            Self::Write { path, source } => Self::Write {
                path: path.clone(),
                source: io_copy(source),
            },
            Self::OutputCollision { output, first } => Self::OutputCollision {
                output: output.clone(),
                first: first.clone(),
            },
            Self::Io { path, source } => Self::Io {
                path: path.clone(),
                source: io_copy(source),
            },
            Self::Validation(m) => Self::Validation(m.clone()),
            Self::Other(e) => Self::Other(anyhow::anyhow!("{e:#}")),
        }
    }

    /// Short, stable tag for reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "missing_field",
            Self::FrontMatter(_) => "front_matter",
            Self::MissingAsset { .. } => "missing_asset",
            Self::Font(_) => "font",
            Self::Render(_) => "render",
            Self::Encoding(_) => "encoding",
            Self::Write { .. } => "write",
            Self::OutputCollision { .. } => "output_collision",
            Self::Io { .. } => "io",
            Self::Validation(_) => "validation",
            Self::Other(_) => "other",
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
