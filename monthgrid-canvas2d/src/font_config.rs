use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

/// Concrete families tried, in order, for each generic CSS family.
const SANS_SERIF: &[&str] = &["Arial", "Helvetica", "Liberation Sans", "DejaVu Sans"];
const SERIF: &[&str] = &["Times New Roman", "Times", "Liberation Serif", "DejaVu Serif"];
const MONOSPACE: &[&str] = &["Courier New", "Courier", "Liberation Mono", "DejaVu Sans Mono"];

/// Where a surface finds its fonts.
#[derive(Clone, Debug)]
pub struct FontConfig {
    /// Font files already read into memory (TTF/OTF).
    pub custom_fonts: Vec<CustomFont>,
    pub load_system_fonts: bool,
    /// Extra directories scanned for font files.
    pub font_dirs: Vec<PathBuf>,
    pub hinting_enabled: bool,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            custom_fonts: Vec::new(),
            load_system_fonts: true,
            font_dirs: Vec::new(),
            hinting_enabled: false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct CustomFont {
    pub data: Arc<Vec<u8>>,
}

impl FontConfig {
    /// Scan every configured source into a [`FontDatabase`].
    ///
    /// This is the only place the filesystem is touched; surfaces clone the
    /// result.
    pub fn load(&self) -> FontDatabase {
        let mut db = fontdb::Database::new();
        if self.load_system_fonts {
            db.load_system_fonts();
        }
        for dir in &self.font_dirs {
            db.load_fonts_dir(dir);
        }
        for font in &self.custom_fonts {
            db.load_font_data(font.data.as_ref().clone());
        }
        map_generic_families(&mut db);
        log::debug!(target: "canvas", "loaded {} font faces", db.len());

        FontDatabase {
            fontdb: db,
            hinting_enabled: self.hinting_enabled,
        }
    }
}

/// Loaded font faces shared by every surface.
#[derive(Clone)]
pub struct FontDatabase {
    pub(crate) fontdb: fontdb::Database,
    pub(crate) hinting_enabled: bool,
}

impl std::fmt::Debug for FontDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontDatabase")
            .field("faces", &self.fontdb.len())
            .finish()
    }
}

impl FontDatabase {
    pub fn face_count(&self) -> usize {
        self.fontdb.len()
    }

    /// Whether `family` has a face the shaper could pick for `weight`.
    ///
    /// fontdb falls back to the nearest weight inside a family, so any loaded
    /// face of the family answers true.
    pub fn has_family(&self, family: &str, weight: u16) -> bool {
        let families = [fontdb::Family::Name(family)];
        let query = fontdb::Query {
            families: &families,
            weight: fontdb::Weight(weight),
            ..Default::default()
        };
        self.fontdb.query(&query).is_some()
    }
}

/// Point the generic families at the first installed candidate.
fn map_generic_families(db: &mut fontdb::Database) {
    let installed: BTreeSet<String> = db
        .faces()
        .flat_map(|face| face.families.iter().map(|(name, _)| name.clone()))
        .collect();
    let first_installed = |candidates: &[&str]| {
        candidates
            .iter()
            .find(|name| installed.contains(**name))
            .map(|name| name.to_string())
    };

    if let Some(name) = first_installed(SANS_SERIF) {
        db.set_sans_serif_family(name);
    }
    if let Some(name) = first_installed(SERIF) {
        db.set_serif_family(name);
    }
    if let Some(name) = first_installed(MONOSPACE) {
        db.set_monospace_family(name);
    }
}
