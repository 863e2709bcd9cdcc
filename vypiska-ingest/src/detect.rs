//! Format detection by trial: a layout is a candidate when both its period
//! totals and its record segmentation match the text.

use vypiska_core::{ExtractError, LayoutKind, Result};

use crate::cache::ExtractionCache;

/// Pick the single layout whose grammar matches `cache`'s text.
pub fn detect(cache: &mut ExtractionCache<'_>) -> Result<LayoutKind> {
    let mut candidates = Vec::new();

    for kind in LayoutKind::ALL {
        let trial = cache
            .period_total(kind)
            .and_then(|_| cache.segments(kind).map(|spans| spans.len()));
        match trial {
            Ok(records) => {
                log::debug!("layout {kind}: matched, {records} records");
                candidates.push(kind);
            }
            Err(e) => log::debug!("layout {kind}: rejected ({e})"),
        }
    }

    match candidates.as_slice() {
        [single] => Ok(*single),
        [] => Err(ExtractError::UnknownFormat),
        _ => Err(ExtractError::AmbiguousFormat(candidates)),
    }
}

/// Detect the layout of a statement text with a throwaway cache.
pub fn detect_layout(text: &str) -> Result<LayoutKind> {
    detect(&mut ExtractionCache::new(text))
}
