use std::path::Path;

use super::*;

fn doc(name: &str, tags: &[&str]) -> SourceDocument {
    SourceDocument {
        path: Path::new("/blog").join(name),
        front_matter: ParsedFrontMatter {
            tags: Some(tags.iter().map(|t| t.to_string()).collect()),
            ..ParsedFrontMatter::default()
        },
        body: String::new(),
    }
}

#[test]
fn counts_tags_in_first_seen_order() {
    let docs = [
        doc("a.md", &["rust", "graphics"]),
        doc("b.md", &["web"]),
        doc("c.md", &["graphics", "rust", "rust"]),
    ];
    let index = TagIndex::from_front_matter(docs.iter().map(|d| &d.front_matter));

    let listed: Vec<_> = index.tags().collect();
    assert_eq!(listed, vec![("rust", 3), ("graphics", 2), ("web", 1)]);
    assert_eq!(index.count("web"), 1);
    assert_eq!(index.count("missing"), 0);
    assert_eq!(index.len(), 3);
}

#[test]
fn documents_without_tags_contribute_nothing() {
    let empty = ParsedFrontMatter::default();
    let index = TagIndex::from_front_matter([&empty]);
    assert!(index.is_empty());
}

#[test]
fn filter_matches_exact_tag() {
    let docs = vec![
        doc("a.md", &["rust"]),
        doc("b.md", &["rustacean"]),
        doc("c.md", &["web", "rust"]),
    ];
    let hits: Vec<_> = filter_by_tag(&docs, "rust")
        .into_iter()
        .map(|d| d.path.file_name().unwrap().to_str().unwrap().to_string())
        .collect();
    assert_eq!(hits, vec!["a.md", "c.md"]);
    assert!(filter_by_tag(&docs, "Rust").is_empty());
}
