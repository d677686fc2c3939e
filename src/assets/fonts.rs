use std::{path::Path, sync::Arc};

use usvg::fontdb;

use crate::foundation::error::{PinError, PinResult};

/// Families tried, in order, after the generic sans-serif family.
const SANS_FALLBACKS: &[&str] = &[
    "DejaVu Sans",
    "Liberation Sans",
    "Noto Sans",
    "Helvetica",
    "Arial",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontWeightKind {
    Regular,
    Bold,
}

impl FontWeightKind {
    fn fontdb_weight(self) -> fontdb::Weight {
        match self {
            Self::Regular => fontdb::Weight::NORMAL,
            Self::Bold => fontdb::Weight::BOLD,
        }
    }
}

/// Raw bytes of one resolved font face.
#[derive(Clone)]
pub struct FontFace {
    /// Whole font file (may be a collection).
    pub data: Arc<Vec<u8>>,
    /// Face index inside `data`.
    pub index: u32,
    /// Family name reported by the font.
    pub family: String,
    pub weight: FontWeightKind,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("family", &self.family)
            .field("index", &self.index)
            .field("weight", &self.weight)
            .field("data_len", &self.data.len())
            .finish()
    }
}

/// The sans-serif regular and bold faces used for pin text.
///
/// Resolved once per batch and shared read-only between workers.
#[derive(Clone, Debug)]
pub struct FontBook {
    regular: FontFace,
    bold: FontFace,
}

impl FontBook {
    /// Resolve faces from `font_dir` when given, falling back to system fonts.
    pub fn load(font_dir: Option<&Path>) -> PinResult<Self> {
        if let Some(dir) = font_dir {
            let mut db = fontdb::Database::new();
            load_fonts_from_dir(&mut db, dir);
            match Self::from_database(&db) {
                Ok(book) => return Ok(book),
                Err(e) => tracing::debug!(
                    dir = %dir.display(),
                    error = %e,
                    "no usable fonts in font dir, using system fonts"
                ),
            }
        }

        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        Self::from_database(&db)
    }

    /// Resolve faces from an already populated database.
    pub fn from_database(db: &fontdb::Database) -> PinResult<Self> {
        let regular = resolve_face(db, FontWeightKind::Regular)?;
        let bold = resolve_face(db, FontWeightKind::Bold)?;
        tracing::debug!(
            regular = %regular.family,
            bold = %bold.family,
            "resolved pin fonts"
        );
        Ok(Self { regular, bold })
    }

    pub fn face(&self, weight: FontWeightKind) -> &FontFace {
        match weight {
            FontWeightKind::Regular => &self.regular,
            FontWeightKind::Bold => &self.bold,
        }
    }
}

fn resolve_face(db: &fontdb::Database, weight: FontWeightKind) -> PinResult<FontFace> {
    let mut families = vec![fontdb::Family::SansSerif];
    families.extend(SANS_FALLBACKS.iter().map(|name| fontdb::Family::Name(*name)));

    let query = fontdb::Query {
        families: &families,
        weight: weight.fontdb_weight(),
        stretch: fontdb::Stretch::Normal,
        style: fontdb::Style::Normal,
    };

    let id = db
        .query(&query)
        .or_else(|| {
            // Unknown family names: take the closest weight among whatever is installed.
            db.faces()
                .filter(|f| f.style == fontdb::Style::Normal)
                .min_by_key(|f| f.weight.0.abs_diff(weight.fontdb_weight().0))
                .map(|f| f.id)
        })
        .ok_or_else(|| PinError::font("no font faces available"))?;

    let family = db
        .face(id)
        .and_then(|f| f.families.first().map(|(name, _)| name.clone()))
        .unwrap_or_else(|| "unknown".to_string());
    let (data, index) = db
        .with_face_data(id, |data, index| (data.to_vec(), index))
        .ok_or_else(|| PinError::font(format!("failed to read face data for '{family}'")))?;

    Ok(FontFace {
        data: Arc::new(data),
        index,
        family,
        weight,
    })
}

fn load_fonts_from_dir(db: &mut fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        let _ = db.load_font_file(&path);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
