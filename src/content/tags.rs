use std::collections::HashMap;

use crate::content::{frontmatter::ParsedFrontMatter, loader::SourceDocument};

/// Occurrence counts of front-matter tags across a set of documents.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagIndex {
    order: Vec<String>,
    counts: HashMap<String, usize>,
}

impl TagIndex {
    /// Count every tag of every document. A tag repeated inside one document counts each time.
    pub fn from_front_matter<'a, I>(docs: I) -> Self
    where
        I: IntoIterator<Item = &'a ParsedFrontMatter>,
    {
        let mut index = Self::default();
        for fm in docs {
            for tag in fm.tags() {
                index.insert(tag);
            }
        }
        index
    }

    fn insert(&mut self, tag: &str) {
        match self.counts.get_mut(tag) {
            Some(n) => *n += 1,
            None => {
                self.order.push(tag.to_string());
                self.counts.insert(tag.to_string(), 1);
            }
        }
    }

    /// Tags with their counts, in first-seen order.
    pub fn tags(&self) -> impl Iterator<Item = (&str, usize)> {
        self.order
            .iter()
            .map(|t| (t.as_str(), self.counts.get(t).copied().unwrap_or(0)))
    }

    pub fn count(&self, tag: &str) -> usize {
        self.counts.get(tag).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Documents carrying exactly `tag`.
pub fn filter_by_tag<'a>(docs: &'a [SourceDocument], tag: &str) -> Vec<&'a SourceDocument> {
    docs.iter()
        .filter(|d| d.front_matter.tags().iter().any(|t| t == tag))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/content/tags.rs"]
mod tests;
