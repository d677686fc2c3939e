pub mod frontmatter;
pub mod loader;
pub mod tags;
