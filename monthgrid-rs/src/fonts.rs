//! Font catalogue, custom font manifest and the font readiness phase.

use crate::config::AppConfig;
use monthgrid_canvas2d::{CustomFont, FontConfig, FontDatabase};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Family used when the requested one cannot be served.
pub const FALLBACK_FAMILY: &str = "Arial";
pub const GENERIC_FAMILY: &str = "sans-serif";

const GOOGLE_FONTS: [&str; 14] = [
    "Inter",
    "Roboto",
    "Open Sans",
    "Lato",
    "Montserrat",
    "Oswald",
    "Source Sans 3",
    "Raleway",
    "PT Sans",
    "Merriweather",
    "Playfair Display",
    "Ubuntu",
    "Nunito",
    "Poppins",
];

const SYSTEM_FONTS: [&str; 6] = [
    "Arial",
    "Helvetica",
    "Georgia",
    "Times New Roman",
    "Verdana",
    "Courier New",
];

const GENERIC_NAMES: [&str; 5] = ["sans-serif", "serif", "monospace", "cursive", "fantasy"];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FontFile {
    pub weight: u16,
    pub style: String,
    pub url: String,
}

/// One custom font family described by `fonts.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CustomFontEntry {
    pub name: String,
    pub family: String,
    #[serde(default)]
    pub weights: Vec<u16>,
    #[serde(default)]
    pub styles: Vec<String>,
    #[serde(default)]
    pub files: Vec<FontFile>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontManifest {
    pub custom_fonts: Vec<CustomFontEntry>,
}

impl FontManifest {
    /// Read a manifest, falling back to an empty one when the file is absent
    /// or malformed.
    pub fn load(path: &Path) -> Self {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No font manifest at {}, using defaults", path.display());
                return Self::default();
            }
            Err(e) => {
                log::warn!("Failed to read font manifest {}: {e}", path.display());
                return Self::default();
            }
        };
        Self::parse(&text).unwrap_or_else(|e| {
            log::warn!("Invalid font manifest {}: {e}", path.display());
            Self::default()
        })
    }

    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontSource {
    Custom,
    Google,
    System,
}

impl FontSource {
    pub fn as_str(self) -> &'static str {
        match self {
            FontSource::Custom => "custom",
            FontSource::Google => "google",
            FontSource::System => "system",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontEntry {
    pub name: String,
    pub family: String,
    pub source: FontSource,
}

/// Outcome of the font phase that precedes drawing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontReadiness {
    Ready,
    /// The family could not be confirmed; drawing uses the fallback face.
    Degraded { reason: String },
}

impl FontReadiness {
    pub fn is_ready(&self) -> bool {
        matches!(self, FontReadiness::Ready)
    }
}

/// CSS-like family stack: the requested family, then Arial, then the generic
/// sans-serif face.
pub fn family_stack(family: &str) -> Vec<String> {
    let mut stack = vec![family.to_string()];
    for fallback in [FALLBACK_FAMILY, GENERIC_FAMILY] {
        if !stack.iter().any(|f| f.eq_ignore_ascii_case(fallback)) {
            stack.push(fallback.to_string());
        }
    }
    stack
}

/// Fonts known to the application and the database used to draw them.
#[derive(Debug, Clone)]
pub struct FontRegistry {
    custom: Vec<CustomFontEntry>,
    database: Arc<FontDatabase>,
}

impl FontRegistry {
    /// Build the font database from the configuration. Custom font files
    /// named by the manifest are looked up next to the manifest by file name.
    pub fn new(config: &AppConfig) -> Self {
        let (custom, custom_fonts) = match &config.font_manifest {
            Some(path) => {
                let manifest = FontManifest::load(path);
                let dir = path.parent().unwrap_or_else(|| Path::new("."));
                let data = read_manifest_files(&manifest, dir);
                (manifest.custom_fonts, data)
            }
            None => (Vec::new(), Vec::new()),
        };

        let font_config = FontConfig {
            custom_fonts,
            load_system_fonts: config.load_system_fonts,
            font_dirs: config.font_dirs.clone(),
            ..Default::default()
        };
        let database = font_config.load();
        log::debug!("Font database holds {} faces", database.face_count());

        Self {
            custom,
            database: Arc::new(database),
        }
    }

    /// Registry over an already loaded database, with no custom entries.
    pub fn from_database(database: FontDatabase) -> Self {
        Self {
            custom: Vec::new(),
            database: Arc::new(database),
        }
    }

    pub fn database(&self) -> &FontDatabase {
        &self.database
    }

    /// Selectable fonts: custom manifest fonts, then popular web fonts, then
    /// common system fonts.
    pub fn catalogue(&self) -> Vec<FontEntry> {
        let custom = self.custom.iter().map(|f| FontEntry {
            name: f.name.clone(),
            family: f.family.clone(),
            source: FontSource::Custom,
        });
        let builtin = |names: &'static [&'static str], source: FontSource| {
            names.iter().map(move |name| FontEntry {
                name: name.to_string(),
                family: name.to_string(),
                source,
            })
        };
        custom
            .chain(builtin(&GOOGLE_FONTS, FontSource::Google))
            .chain(builtin(&SYSTEM_FONTS, FontSource::System))
            .collect()
    }

    /// Whether `family` has at least one face in the database.
    pub fn is_loaded(&self, family: &str) -> bool {
        self.database.has_family(family, 700)
    }

    /// Confirm that `family` can be drawn at `sizes`, waiting at most
    /// `timeout`. Never fails: anything short of confirmation is reported as
    /// [`FontReadiness::Degraded`].
    pub async fn ensure_font_ready(
        &self,
        family: &str,
        sizes: &[u32],
        timeout: Duration,
    ) -> FontReadiness {
        if self.database.face_count() == 0 {
            let reason = format!("no font faces are loaded, {family:?} cannot be drawn");
            log::warn!("{reason}; text will be skipped");
            return FontReadiness::Degraded { reason };
        }
        if GENERIC_NAMES
            .iter()
            .any(|g| g.eq_ignore_ascii_case(family))
        {
            return FontReadiness::Ready;
        }
        log::debug!("Waiting for font {family:?} at sizes {sizes:?}");

        let database = self.database.clone();
        let query = family.to_string();
        let lookup = tokio::task::spawn_blocking(move || {
            database.has_family(&query, 400) && database.has_family(&query, 700)
        });

        let readiness = match tokio::time::timeout(timeout, lookup).await {
            Ok(Ok(true)) => FontReadiness::Ready,
            Ok(Ok(false)) => FontReadiness::Degraded {
                reason: format!("font family {family:?} is not installed"),
            },
            Ok(Err(e)) => FontReadiness::Degraded {
                reason: format!("font lookup for {family:?} failed: {e}"),
            },
            Err(_) => FontReadiness::Degraded {
                reason: format!(
                    "font family {family:?} not confirmed within {}ms",
                    timeout.as_millis()
                ),
            },
        };
        if let FontReadiness::Degraded { reason } = &readiness {
            log::warn!("{reason}; falling back to {FALLBACK_FAMILY}, {GENERIC_FAMILY}");
        }
        readiness
    }
}

fn read_manifest_files(manifest: &FontManifest, dir: &Path) -> Vec<CustomFont> {
    manifest
        .custom_fonts
        .iter()
        .flat_map(|font| font.files.iter())
        .filter_map(|file| {
            let path = local_path_for(&file.url, dir)?;
            match std::fs::read(&path) {
                Ok(data) => Some(CustomFont {
                    data: Arc::new(data),
                }),
                Err(e) => {
                    log::warn!("Failed to load custom font file {}: {e}", path.display());
                    None
                }
            }
        })
        .collect()
}

/// Map a manifest URL such as `/fonts/Brand-Bold.ttf` onto a file next to the
/// manifest.
fn local_path_for(url: &str, dir: &Path) -> Option<PathBuf> {
    let name = url.rsplit('/').next().filter(|n| !n.is_empty())?;
    Some(dir.join(name))
}
