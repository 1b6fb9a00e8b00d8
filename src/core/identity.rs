// BootDiff - core/identity.rs
//
// Build/board identity extraction and comparison. A pass log and a fail
// log that came from different firmware builds or different boards are
// not comparable, and any component deduced from their diff is suspect.
// Core layer: pure logic, no I/O.

use crate::core::catalog::IdentityMarkers;
use crate::core::model::{Identity, IdentityCheck, IdentityKind, IdentityVerdict, LogFile};

/// Return the first line containing `marker` (case-sensitive), verbatim.
pub fn find_identity(lines: &[String], marker: &str) -> Identity {
    lines
        .iter()
        .find(|line| line.contains(marker))
        .map(|line| Identity::Found(line.clone()))
        .unwrap_or(Identity::NotFound)
}

/// Compare two extracted identities.
///
/// A missing identity on either side is inconclusive, never a mismatch.
pub fn compare(pass: &Identity, fail: &Identity) -> IdentityVerdict {
    match (pass, fail) {
        (Identity::Found(a), Identity::Found(b)) if a == b => IdentityVerdict::Identical,
        (Identity::Found(_), Identity::Found(_)) => IdentityVerdict::Mismatch,
        _ => IdentityVerdict::Inconclusive,
    }
}

/// Extract and compare one identity between the pass and fail logs.
pub fn check(kind: IdentityKind, marker: &str, pass: &LogFile, fail: &LogFile) -> IdentityCheck {
    let pass_id = find_identity(&pass.lines, marker);
    let fail_id = find_identity(&fail.lines, marker);
    let verdict = compare(&pass_id, &fail_id);

    tracing::debug!(
        kind = kind.label(),
        marker,
        verdict = %verdict,
        "Identity compared"
    );

    IdentityCheck {
        kind,
        marker: marker.to_string(),
        pass: pass_id,
        fail: fail_id,
        verdict,
    }
}

/// Run the build and board checks in that order.
pub fn check_all(markers: &IdentityMarkers, pass: &LogFile, fail: &LogFile) -> Vec<IdentityCheck> {
    vec![
        check(IdentityKind::Build, &markers.build, pass, fail),
        check(IdentityKind::Board, &markers.board, pass, fail),
    ]
}
