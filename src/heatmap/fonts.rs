//! Font registration for axis and colorbar labels
//!
//! plotters draws text through ab_glyph, which only knows fonts registered at
//! runtime. We register one TrueType file under the "sans-serif" family the
//! first time labels are requested. Without a usable font the heatmap is
//! still drawn, just without tick labels or axis titles.

use ab_glyph::FontRef;
use plotters::style::{register_font, FontStyle};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, info, warn};

/// Family name the renderer asks plotters for
pub const FONT_FAMILY: &str = "sans-serif";

/// Common locations of a sans-serif TrueType font
const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

static FONT_AVAILABLE: OnceLock<bool> = OnceLock::new();

/// Register a label font once per process
///
/// `preferred` is tried before the system locations. Registration happens at
/// most once, so a `preferred` path passed on a later call is ignored.
/// Returns whether a font is available.
pub fn ensure_font(preferred: Option<&Path>) -> bool {
    *FONT_AVAILABLE.get_or_init(|| {
        let candidates = preferred
            .map(Path::to_path_buf)
            .into_iter()
            .chain(SYSTEM_FONT_CANDIDATES.iter().map(PathBuf::from));

        for path in candidates {
            if try_register(&path) {
                info!("Using label font {}", path.display());
                return true;
            }
        }

        warn!("⚠ No usable TrueType font found; labels will be omitted (set font.path)");
        false
    })
}

/// Read `path` and keep the bytes only if they parse as a font
fn load_font_bytes(path: &Path) -> Option<Vec<u8>> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!("Font {} not readable: {}", path.display(), e);
            return None;
        }
    };

    if let Err(e) = FontRef::try_from_slice(&bytes) {
        warn!("⚠ {} is not a valid TrueType font: {}", path.display(), e);
        return None;
    }
    Some(bytes)
}

fn try_register(path: &Path) -> bool {
    let Some(bytes) = load_font_bytes(path) else {
        return false;
    };

    // Only parsed fonts are leaked; registered fonts live for the rest of
    // the process.
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    match register_font(FONT_FAMILY, FontStyle::Normal, bytes) {
        Ok(()) => true,
        Err(_) => {
            warn!("⚠ plotters rejected font {}", path.display());
            false
        }
    }
}
