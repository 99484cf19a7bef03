//! Font discovery and loading.
//!
//! Documents need a proportional family (`Roboto`) and, for terminal blocks, a monospaced one
//! (`RobotoMono`).  Both are looked up in the first directory that holds the full `Roboto` set:
//!
//! 1. a directory passed explicitly to the [`Renderer`](crate::render::Renderer),
//! 2. the `TASKBOARD_DOCS_FONTS_DIR` environment variable,
//! 3. `assets/fonts` next to the running executable,
//! 4. `assets/fonts` inside this crate.
//!
//! The monospaced family is optional; when it is missing the sans family is reused and a
//! warning is logged.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use genpdf::error::Error;
use genpdf::fonts::{self, FontData, FontFamily};
use log::{debug, warn};

/// Name of the proportional font family.
pub const SANS_FAMILY_NAME: &str = "Roboto";

/// Name of the monospaced font family.
pub const MONO_FAMILY_NAME: &str = "RobotoMono";

/// Environment variable overriding the font directory.
pub const FONTS_DIR_ENV: &str = "TASKBOARD_DOCS_FONTS_DIR";

const STYLE_SUFFIXES: &[&str] = &["Regular", "Bold", "Italic", "BoldItalic"];

/// The font families a document is rendered with.
pub struct FontSet {
    pub sans: FontFamily<FontData>,
    /// Monospaced family, if it could be loaded.
    pub mono: Option<FontFamily<FontData>>,
}

fn family_files(family: &str) -> Vec<String> {
    STYLE_SUFFIXES
        .iter()
        .map(|suffix| format!("{}-{}.ttf", family, suffix))
        .collect()
}

/// Directories searched for fonts, in priority order and without duplicates.
pub fn font_directory_candidates(explicit: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates: Vec<PathBuf> = Vec::new();
    let mut push = |candidate: PathBuf| {
        if !candidates.iter().any(|existing| existing == &candidate) {
            candidates.push(candidate);
        }
    };

    if let Some(path) = explicit {
        push(path.to_path_buf());
    }

    if let Some(value) = env::var_os(FONTS_DIR_ENV) {
        if !value.is_empty() {
            push(PathBuf::from(value));
        }
    }

    if let Ok(current_exe) = env::current_exe() {
        if let Some(bin_dir) = current_exe.parent() {
            push(bin_dir.join("assets/fonts"));
        }
    }

    push(bundled_fonts_dir());

    candidates
}

/// The `assets/fonts` directory shipped with the crate sources.
pub fn bundled_fonts_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts")
}

fn missing_font_files(path: &Path, family: &str) -> Vec<String> {
    family_files(family)
        .into_iter()
        .filter(|name| !path.join(name).is_file())
        .collect()
}

fn resolve_font_directory(explicit: Option<&Path>) -> Result<PathBuf, Error> {
    let mut attempts = Vec::new();

    for candidate in font_directory_candidates(explicit) {
        if !candidate.is_dir() {
            attempts.push(format!("{} (directory missing)", candidate.display()));
            continue;
        }

        let missing = missing_font_files(&candidate, SANS_FAMILY_NAME);
        if missing.is_empty() {
            debug!("Using fonts from {}", candidate.display());
            return Ok(candidate);
        }
        attempts.push(format!(
            "{} (missing files [{}])",
            candidate.display(),
            missing.join(", ")
        ));
    }

    let summary = if attempts.is_empty() {
        "no search paths were available".to_owned()
    } else {
        attempts.join(", ")
    };

    Err(Error::new(
        format!(
            "Unable to locate the {} font family. Checked: {}. Set {} to a directory containing {}.",
            SANS_FAMILY_NAME,
            summary,
            FONTS_DIR_ENV,
            family_files(SANS_FAMILY_NAME).join(", ")
        ),
        io::Error::new(io::ErrorKind::NotFound, "font directory not found"),
    ))
}

fn load_family(directory: &Path, family: &str) -> Result<FontFamily<FontData>, Error> {
    fonts::from_files(directory, family, None).map_err(|err| {
        Error::new(
            format!(
                "Failed to load font family '{}' from {}: {}",
                family,
                directory.display(),
                err
            ),
            io::Error::new(io::ErrorKind::Other, err.to_string()),
        )
    })
}

/// Loads the sans family and, when available, the mono family.
pub fn load_font_set(explicit: Option<&Path>) -> Result<FontSet, Error> {
    let directory = resolve_font_directory(explicit)?;
    let sans = load_family(&directory, SANS_FAMILY_NAME)?;

    let mono = if missing_font_files(&directory, MONO_FAMILY_NAME).is_empty() {
        match load_family(&directory, MONO_FAMILY_NAME) {
            Ok(family) => Some(family),
            Err(err) => {
                warn!("{}; terminal blocks fall back to {}", err, SANS_FAMILY_NAME);
                None
            }
        }
    } else {
        warn!(
            "{} font family not found in {}; terminal blocks fall back to {}",
            MONO_FAMILY_NAME,
            directory.display(),
            SANS_FAMILY_NAME
        );
        None
    };

    Ok(FontSet { sans, mono })
}

/// Indicates whether the required fonts can be found without an explicit directory.
pub fn fonts_available() -> bool {
    resolve_font_directory(None).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_directory_is_searched_first() {
        let explicit = Path::new("/opt/custom-fonts");
        let candidates = font_directory_candidates(Some(explicit));
        assert_eq!(candidates.first().map(PathBuf::as_path), Some(explicit));
        assert_eq!(candidates.last(), Some(&bundled_fonts_dir()));
    }

    #[test]
    fn family_files_cover_all_styles() {
        assert_eq!(
            family_files("Roboto"),
            vec![
                "Roboto-Regular.ttf",
                "Roboto-Bold.ttf",
                "Roboto-Italic.ttf",
                "Roboto-BoldItalic.ttf"
            ]
        );
    }

    #[test]
    fn missing_directory_is_reported() {
        let missing = Path::new("/__taskboard_docs_missing_fonts__");
        assert_eq!(missing_font_files(missing, SANS_FAMILY_NAME).len(), 4);
    }
}
