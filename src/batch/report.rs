use std::path::PathBuf;

use serde::{Serialize, Serializer, ser::SerializeStruct};

use crate::foundation::error::{PinError, PinResult};

/// What happened to one document.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DocStatus {
    Written {
        output: PathBuf,
    },
    Failed {
        #[serde(serialize_with = "serialize_error")]
        error: PinError,
    },
    /// Not attempted because an earlier document failed in fail-fast mode.
    Skipped,
}

impl DocStatus {
    pub fn is_written(&self) -> bool {
        matches!(self, Self::Written { .. })
    }

    pub fn error(&self) -> Option<&PinError> {
        match self {
            Self::Failed { error } => Some(error),
            _ => None,
        }
    }
}

fn serialize_error<S: Serializer>(error: &PinError, s: S) -> Result<S::Ok, S::Error> {
    let mut st = s.serialize_struct("PinError", 2)?;
    st.serialize_field("kind", error.kind())?;
    st.serialize_field("message", &error.to_string())?;
    st.end()
}

#[derive(Debug, Serialize)]
pub struct DocOutcome {
    pub source: PathBuf,
    #[serde(flatten)]
    pub status: DocStatus,
}

/// Per-document outcomes of one batch, in discovery order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<DocOutcome>,
}

impl BatchReport {
    pub fn written(&self) -> usize {
        self.count(|s| matches!(s, DocStatus::Written { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, DocStatus::Failed { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|s| matches!(s, DocStatus::Skipped))
    }

    fn count(&self, f: impl Fn(&DocStatus) -> bool) -> usize {
        self.outcomes.iter().filter(|o| f(&o.status)).count()
    }

    /// True when every discovered document was written.
    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(|o| o.status.is_written())
    }

    pub fn failures(&self) -> impl Iterator<Item = (&std::path::Path, &PinError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.status.error().map(|e| (o.source.as_path(), e)))
    }

    pub fn to_json(&self) -> PinResult<String> {
        #[derive(Serialize)]
        struct Json<'a> {
            written: usize,
            failed: usize,
            skipped: usize,
            documents: &'a [DocOutcome],
        }

        serde_json::to_string_pretty(&Json {
            written: self.written(),
            failed: self.failed(),
            skipped: self.skipped(),
            documents: &self.outcomes,
        })
        .map_err(|e| PinError::Other(anyhow::Error::new(e).context("serialize batch report")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/batch/report.rs"]
mod tests;
