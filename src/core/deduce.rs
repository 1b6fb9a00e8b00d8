// BootDiff - core/deduce.rs
//
// Attribute a diff to the catalog component whose name occurs in it most
// often. Raw substring frequency, case-insensitive, no tokenisation: a
// short name inside a longer token still counts. False positives are
// acceptable for a triage signal.
// Core layer: pure logic, no I/O.

use crate::core::catalog::ComponentCatalog;
use crate::core::model::{ComponentCount, DeductionResult};
use crate::util::error::DeduceError;

/// Count non-overlapping, case-insensitive occurrences of `needle` in an
/// already uppercased haystack, scanning left to right.
///
/// Both sides are folded with full Unicode uppercasing, so `ß` in the text
/// matches `SS` in a candidate.
fn count_occurrences(haystack_upper: &str, needle: &str) -> usize {
    let needle_upper = needle.to_uppercase();
    if needle_upper.is_empty() {
        return 0;
    }
    haystack_upper.matches(needle_upper.as_str()).count()
}

/// Deduce the most likely implicated component from `diff_text`.
///
/// Ties keep the earliest candidate (strict greater-than on the running
/// maximum). If no candidate occurs at all the result names no component
/// rather than defaulting to the first entry.
pub fn deduce(
    diff_text: &str,
    catalog: &ComponentCatalog,
) -> Result<DeductionResult, DeduceError> {
    if diff_text.is_empty() {
        return Err(DeduceError::NothingToDiff);
    }
    if catalog.is_empty() {
        return Err(DeduceError::EmptyCatalog);
    }

    let haystack = diff_text.to_uppercase();
    let mut counts = Vec::with_capacity(catalog.len());
    let mut max_count = 0;
    let mut leader: Option<&str> = None;

    for candidate in catalog.components() {
        let count = count_occurrences(&haystack, candidate);
        if count > max_count {
            max_count = count;
            leader = Some(candidate.as_str());
        }
        counts.push(ComponentCount {
            component: candidate.clone(),
            count,
        });
    }

    tracing::debug!(
        catalog_id = %catalog.id,
        leader = leader.unwrap_or("<none>"),
        max_count,
        "Deduction complete"
    );

    Ok(DeductionResult {
        counts,
        component: leader.map(str::to_owned),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(items: &[&str]) -> ComponentCatalog {
        ComponentCatalog::new("test", "Test", items.iter().map(|s| s.to_string()).collect())
            .unwrap()
    }

    #[test]
    fn test_empty_diff() {
        assert_eq!(deduce("", &catalog(&["usb"])), Err(DeduceError::NothingToDiff));
    }

    #[test]
    fn test_empty_catalog() {
        assert_eq!(deduce("+usb\n", &catalog(&[])), Err(DeduceError::EmptyCatalog));
    }

    #[test]
    fn test_case_insensitive_counts() {
        let text = "+USB init\n-usb reset\n+Pci scan\n";
        let result = deduce(text, &catalog(&["usb", "pci"])).unwrap();
        assert_eq!(result.counts[0].count, 2);
        assert_eq!(result.counts[1].count, 1);
        assert_eq!(result.component.as_deref(), Some("usb"));
    }

    #[test]
    fn test_tie_keeps_first_seen() {
        let text = "+usb a\n+pci b\n-usb c\n-pci d\n";
        let result = deduce(text, &catalog(&["usb", "pci"])).unwrap();
        assert_eq!(result.component.as_deref(), Some("usb"));

        let result = deduce(text, &catalog(&["pci", "usb"])).unwrap();
        assert_eq!(result.component.as_deref(), Some("pci"));
    }

    #[test]
    fn test_later_strictly_greater_wins() {
        let result = deduce("usb pci pci\n", &catalog(&["usb", "pci"])).unwrap();
        assert_eq!(result.component.as_deref(), Some("pci"));
    }

    #[test]
    fn test_zero_signal_names_nothing() {
        let result = deduce(" a\n-b\n+x\n c\n", &catalog(&["usb", "pci"])).unwrap();
        assert!(result.component.is_none());
        assert!(result.counts.iter().all(|c| c.count == 0));
        assert_eq!(result.counts.len(), 2);
    }

    #[test]
    fn test_substring_inside_longer_token_counts() {
        let result = deduce("+xhci: port reset\n", &catalog(&["hci", "xhci"])).unwrap();
        assert_eq!(result.counts[0].count, 1);
        assert_eq!(result.counts[1].count, 1);
        assert_eq!(result.component.as_deref(), Some("hci"));
    }

    #[test]
    fn test_non_overlapping_scan() {
        assert_eq!(count_occurrences("AAAA", "aa"), 2);
        assert_eq!(count_occurrences("COMCOM", "com"), 2);
    }

    #[test]
    fn test_counts_follow_catalog_order() {
        let result = deduce("tpm spi i2c\n", &catalog(&["spi", "i2c", "tpm"])).unwrap();
        let names: Vec<_> = result.counts.iter().map(|c| c.component.as_str()).collect();
        assert_eq!(names, ["spi", "i2c", "tpm"]);
    }

    #[test]
    fn test_uppercase_folding_expands_sharp_s() {
        let result = deduce("+straße init failed\n", &catalog(&["STRASSE", "usb"])).unwrap();
        assert_eq!(result.counts[0].count, 1);
        assert_eq!(result.component.as_deref(), Some("STRASSE"));
    }
}
