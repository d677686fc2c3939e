use serde::Deserialize;

use crate::foundation::error::{PinError, PinResult};

pub const DEFAULT_TITLE: &str = "No title";
pub const DEFAULT_EXCERPT: &str = "No excerpt available.";

/// Syntax of a leading metadata block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrontMatterFormat {
    /// `---` fenced YAML.
    Yaml,
    /// `+++` fenced TOML.
    Toml,
}

impl FrontMatterFormat {
    fn fence(self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Toml => "+++",
        }
    }
}

/// Raw text of a front-matter block, without its fences.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrontMatterBlock<'a> {
    pub format: FrontMatterFormat,
    pub raw: &'a str,
}

/// Split a leading front-matter block from the document body.
///
/// Returns `(None, text)` when the document does not open with a fence. An opening fence
/// without a closing one is an error.
pub fn split_front_matter(text: &str) -> PinResult<(Option<FrontMatterBlock<'_>>, &str)> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let (first, rest) = split_line(text);
    let format = match first.trim_end() {
        "---" => FrontMatterFormat::Yaml,
        "+++" => FrontMatterFormat::Toml,
        _ => return Ok((None, text)),
    };
    let Some(rest) = rest else {
        return Err(PinError::front_matter("front-matter block is not closed"));
    };

    let mut offset = 0usize;
    let mut remaining = rest;
    loop {
        let (line, next) = split_line(remaining);
        let trimmed = line.trim_end();
        let closes = trimmed == format.fence() || (format == FrontMatterFormat::Yaml && trimmed == "...");
        if closes {
            let raw = &rest[..offset];
            let body = next.unwrap_or("");
            return Ok((Some(FrontMatterBlock { format, raw }), body));
        }
        match next {
            Some(next) => {
                offset += remaining.len() - next.len();
                remaining = next;
            }
            None => return Err(PinError::front_matter("front-matter block is not closed")),
        }
    }
}

// First line (without its terminator) and the text after the terminator, if any.
fn split_line(s: &str) -> (&str, Option<&str>) {
    match s.find('\n') {
        Some(i) => (s[..i].trim_end_matches('\r'), Some(&s[i + 1..])),
        None => (s, None),
    }
}

/// Named front-matter fields of a content document.
///
/// Every field is optional at parse time; defaults are resolved by the accessors below.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParsedFrontMatter {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub image: Option<String>,
    /// A single string counts as one tag; any other shape is ignored.
    #[serde(deserialize_with = "lenient_tags")]
    pub tags: Option<Vec<String>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TagsField {
    One(String),
    Many(Vec<String>),
    Other(serde::de::IgnoredAny),
}

fn lenient_tags<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match TagsField::deserialize(deserializer)? {
        TagsField::One(tag) => Some(vec![tag]),
        TagsField::Many(tags) => Some(tags),
        TagsField::Other(_) => None,
    })
}

impl ParsedFrontMatter {
    pub fn parse(block: &FrontMatterBlock<'_>) -> PinResult<Self> {
        if block.raw.trim().is_empty() {
            return Ok(Self::default());
        }
        match block.format {
            FrontMatterFormat::Yaml => {
                let value: serde_yaml::Value = serde_yaml::from_str(block.raw)
                    .map_err(|e| PinError::front_matter(format!("invalid YAML: {e}")))?;
                if value.is_null() {
                    return Ok(Self::default());
                }
                serde_yaml::from_value(value)
                    .map_err(|e| PinError::front_matter(format!("invalid field: {e}")))
            }
            FrontMatterFormat::Toml => toml::from_str(block.raw)
                .map_err(|e| PinError::front_matter(format!("invalid TOML: {e}"))),
        }
    }

    /// Title, or the placeholder when absent or empty.
    pub fn title_or_default(&self) -> &str {
        non_empty(&self.title).unwrap_or(DEFAULT_TITLE)
    }

    /// Excerpt, or the placeholder sentence when absent or empty.
    pub fn excerpt_or_default(&self) -> &str {
        non_empty(&self.excerpt).unwrap_or(DEFAULT_EXCERPT)
    }

    /// Image reference; `None` when absent or empty.
    pub fn image_ref(&self) -> Option<&str> {
        non_empty(&self.image)
    }

    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or(&[])
    }
}

fn non_empty(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.is_empty())
}

#[cfg(test)]
#[path = "../../tests/unit/content/frontmatter.rs"]
mod tests;
