// this_file: crates/dukkan-fontdb/src/discovery.rs

//! Finding a right-to-left capable font when none is configured

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dukkan_core::error::{FontLoadError, Result};

use crate::{ensure_rtl_coverage, Font};

/// Families tried first, best Arabic typography first, then the system
/// faces that usually carry Arabic on Windows and macOS
pub const PREFERRED_FAMILIES: &[&str] = &[
    "Amiri",
    "Noto Naskh Arabic",
    "Noto Sans Arabic",
    "Scheherazade New",
    "Geeza Pro",
    "Tahoma",
    "Arial",
    "Times New Roman",
    "Segoe UI",
    "DejaVu Sans",
    "FreeSerif",
];

/// Hints that a family was built for Arabic script
const ARABIC_HINTS: &[&str] = &["Arabic", "Naskh", "Kufi", "Amiri"];

/// Loads the configured font, or discovers one, and checks its coverage
pub fn resolve_font(explicit: Option<&Path>) -> Result<Arc<Font>> {
    let font = match explicit {
        Some(path) => Font::from_file(path)?,
        None => return discover_rtl_font(),
    };
    ensure_rtl_coverage(&font)?;
    log::info!("Using font {} from {}", font.name(), describe(explicit));
    Ok(Arc::new(font))
}

fn describe(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| "system".to_string())
}

/// Scans system fonts for the first face that covers Arabic
///
/// Preferred families go first, then faces named for Arabic, then every
/// other installed face. Each candidate is loaded and coverage-checked.
pub fn discover_rtl_font() -> Result<Arc<Font>> {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    log::debug!("Scanning {} system faces for Arabic coverage", db.len());

    for path in candidates(&db) {
        match Font::from_file(&path) {
            Ok(font) if ensure_rtl_coverage(&font).is_ok() => {
                log::info!("Discovered font {} at {}", font.name(), path.display());
                return Ok(Arc::new(font));
            },
            Ok(font) => log::debug!("Skipping {}: incomplete coverage", font.name()),
            Err(err) => log::debug!("Skipping {}: {}", path.display(), err),
        }
    }

    Err(FontLoadError::SystemFontNotFound(
        "no right-to-left capable font installed".to_string(),
    )
    .into())
}

/// Single-face files on disk, in the order they should be tried
fn candidates(db: &fontdb::Database) -> Vec<PathBuf> {
    let located = db.faces().filter_map(|face| {
        let path = match &face.source {
            fontdb::Source::File(path) => path.clone(),
            _ => return None,
        };
        // Only face 0 of a file can be a standalone font; later indices live in collections.
        if face.index > 0 {
            log::debug!("Skipping collection face {} of {}", face.index, path.display());
            return None;
        }
        let family = face
            .families
            .first()
            .map(|(name, _)| name.clone())
            .unwrap_or_default();
        Some((family, path))
    });
    order_candidates(located)
}

/// Sorts `(family, path)` pairs by [`rank`], keeping scan order within a
/// rank and dropping repeated paths
fn order_candidates(located: impl IntoIterator<Item = (String, PathBuf)>) -> Vec<PathBuf> {
    let mut ranked: Vec<(usize, PathBuf)> = located
        .into_iter()
        .map(|(family, path)| (rank(&family), path))
        .collect();
    ranked.sort_by_key(|(rank, _)| *rank);

    let mut seen = HashSet::new();
    ranked
        .into_iter()
        .filter_map(|(_, path)| seen.insert(path.clone()).then_some(path))
        .collect()
}

/// Position in [`PREFERRED_FAMILIES`], then Arabic-named families, then the rest
fn rank(family: &str) -> usize {
    if let Some(pos) = PREFERRED_FAMILIES
        .iter()
        .position(|preferred| family.eq_ignore_ascii_case(preferred))
    {
        return pos;
    }
    if ARABIC_HINTS.iter().any(|hint| family.contains(hint)) {
        PREFERRED_FAMILIES.len()
    } else {
        PREFERRED_FAMILIES.len() + 1
    }
}
