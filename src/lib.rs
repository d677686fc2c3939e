//! pinsmith renders Pinterest-style preview images for markdown blog posts.
//!
//! Every `.md`/`.mdx` document under a content root becomes one 1200x1800 PNG:
//!
//! - Front-matter is parsed into a [`RenderSpec`] (title, excerpt, source image)
//! - A [`Composer`] draws the source image, a translucent panel with wrapped text, a
//!   gradient and the site logo onto a CPU canvas
//! - [`run_batch`] does this for a whole directory on a bounded worker pool and returns a
//!   [`BatchReport`] with one outcome per document
#![forbid(unsafe_code)]

pub mod assets;
pub mod batch;
pub mod compose;
pub mod content;
mod foundation;
pub mod render;
pub mod text;

pub use crate::foundation::core::{Affine, BezPath, CanvasSize, Point, Rect, Rgba8, Rgba8Premul, Vec2};
pub use crate::foundation::error::{PinError, PinResult};

pub use crate::assets::fonts::{FontBook, FontFace, FontWeightKind};
pub use crate::batch::{BatchOpts, BatchReport, DocOutcome, DocStatus, render_document, run_batch};
pub use crate::compose::Composer;
pub use crate::content::frontmatter::{ParsedFrontMatter, split_front_matter};
pub use crate::content::loader::{RenderSpec, SourceDocument, discover_documents, resolve_image_path};
pub use crate::content::tags::{TagIndex, filter_by_tag};
pub use crate::render::RgbaFrame;
pub use crate::render::canvas::{DrawState, PinCanvas};
pub use crate::render::encode::encode_png;
pub use crate::text::wrap::{TextMeasure, WrapResult, wrap_text};
