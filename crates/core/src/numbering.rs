//! Project number sequence allocation.
//!
//! Project numbers follow the convention `PRJ-<year>-<seq>` where `seq`
//! is a positive integer zero-padded to at least three digits
//! (`PRJ-2025-001`, `PRJ-2025-042`, `PRJ-2025-1000`). Allocation is a
//! pure computation over the greatest existing number for the year; it
//! reserves nothing. Two concurrent creations can therefore compute the
//! same number -- the unique index on `projects.project_number` is the
//! backstop, and the losing insert surfaces as a conflict.

/// Leading tag of every generated project number.
pub const PROJECT_NUMBER_TAG: &str = "PRJ";

/// Minimum width of the zero-padded sequence segment. Wider sequences
/// are not re-padded; they simply grow.
pub const SEQUENCE_PAD_WIDTH: usize = 3;

/// The `PRJ-<year>-` prefix shared by all numbers generated for a year.
///
/// Used by the repository layer as a `LIKE 'PRJ-<year>-%'` pattern.
/// Because sequences are zero-padded to a fixed minimum width, a
/// descending lexicographic sort of matching numbers puts the highest
/// sequence first, which is what makes the single-row lookup valid.
pub fn year_prefix(year: i32) -> String {
    format!("{PROJECT_NUMBER_TAG}-{year}-")
}

/// Parse the sequence segment (third hyphen-delimited field) of a
/// project number. Returns `None` for hand-assigned numbers that do not
/// follow the convention.
///
/// # Examples
///
/// ```
/// use castworks_core::numbering::parse_sequence;
///
/// assert_eq!(parse_sequence("PRJ-2025-007"), Some(7));
/// assert_eq!(parse_sequence("PRJ-2025-1000"), Some(1000));
/// assert_eq!(parse_sequence("ACME-SPECIAL"), None);
/// ```
pub fn parse_sequence(number: &str) -> Option<u32> {
    number.split('-').nth(2)?.parse().ok()
}

/// Format a project number from a year and sequence.
pub fn format_project_number(year: i32, sequence: u32) -> String {
    format!("{PROJECT_NUMBER_TAG}-{year}-{sequence:0width$}", width = SEQUENCE_PAD_WIDTH)
}

/// Compute the next project number for a year.
///
/// `last` is the lexicographically greatest existing number matching
/// [`year_prefix`], or `None` when the year has no projects yet. A
/// `last` whose sequence segment does not parse (a hand-assigned number
/// that happens to share the prefix) restarts the sequence at 1.
///
/// # Examples
///
/// ```
/// use castworks_core::numbering::next_project_number;
///
/// assert_eq!(next_project_number(2025, None), "PRJ-2025-001");
/// assert_eq!(next_project_number(2025, Some("PRJ-2025-007")), "PRJ-2025-008");
/// ```
pub fn next_project_number(year: i32, last: Option<&str>) -> String {
    let sequence = last
        .and_then(parse_sequence)
        .map(|seq| seq + 1)
        .unwrap_or(1);
    format_project_number(year, sequence)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_number_of_a_year() {
        assert_eq!(next_project_number(2025, None), "PRJ-2025-001");
    }

    #[test]
    fn increments_last_sequence() {
        assert_eq!(
            next_project_number(2025, Some("PRJ-2025-001")),
            "PRJ-2025-002"
        );
        assert_eq!(
            next_project_number(2025, Some("PRJ-2025-041")),
            "PRJ-2025-042"
        );
    }

    #[test]
    fn pads_to_three_digits() {
        assert_eq!(format_project_number(2025, 7), "PRJ-2025-007");
        assert_eq!(format_project_number(2025, 99), "PRJ-2025-099");
    }

    #[test]
    fn sequences_grow_past_three_digits_without_repadding() {
        assert_eq!(
            next_project_number(2025, Some("PRJ-2025-999")),
            "PRJ-2025-1000"
        );
        assert_eq!(
            next_project_number(2025, Some("PRJ-2025-1000")),
            "PRJ-2025-1001"
        );
    }

    #[test]
    fn years_are_independent() {
        assert_eq!(next_project_number(2026, None), "PRJ-2026-001");
        assert_eq!(year_prefix(2026), "PRJ-2026-");
    }

    #[test]
    fn unparsable_last_number_restarts_at_one() {
        // A hand-assigned number sharing the prefix but without a
        // numeric sequence segment.
        assert_eq!(
            next_project_number(2025, Some("PRJ-2025-SPECIAL")),
            "PRJ-2025-001"
        );
    }

    #[test]
    fn parse_rejects_numbers_without_three_segments() {
        assert_eq!(parse_sequence("PRJ-2025"), None);
        assert_eq!(parse_sequence(""), None);
    }

    #[test]
    fn parse_ignores_extra_segments() {
        // Only the third segment matters.
        assert_eq!(parse_sequence("PRJ-2025-004-B"), Some(4));
    }
}
