use chrono::{DateTime, Utc};

use crate::validation::check_text;

pub const MAX_GUEST_NAME_CHARS: usize = 255;
pub const MAX_PHONE_CHARS: usize = 20;
pub const MAX_SOURCE_CHARS: usize = 50;

pub fn guest_name_valid<N>(given: N) -> bool
where
    N: AsRef<str>
{
    check_text(given, 1, MAX_GUEST_NAME_CHARS)
}

pub fn phone_valid<P>(given: P) -> bool
where
    P: AsRef<str>
{
    check_text(given, 1, MAX_PHONE_CHARS)
}

pub fn source_valid<S>(given: S) -> bool
where
    S: AsRef<str>
{
    check_text(given, 1, MAX_SOURCE_CHARS)
}

/// a booking range is half open. the check out instant is not occupied by
/// the booking itself
pub fn date_range_valid(
    check_in: &DateTime<Utc>,
    check_out: &DateTime<Utc>
) -> bool {
    check_out > check_in
}

/// half open interval intersection. two bookings sharing a check out /
/// check in boundary do not overlap
pub fn ranges_overlap(
    a_check_in: &DateTime<Utc>,
    a_check_out: &DateTime<Utc>,
    b_check_in: &DateTime<Utc>,
    b_check_out: &DateTime<Utc>,
) -> bool {
    a_check_in < b_check_out && a_check_out > b_check_in
}

#[cfg(test)]
mod test {
    use super::*;

    fn date(given: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(given)
            .expect("invalid rfc3339 date for test")
            .with_timezone(&Utc)
    }

    #[test]
    pub fn range_requires_check_out_after_check_in() {
        let check_in = date("2025-01-10T00:00:00Z");

        assert!(date_range_valid(&check_in, &date("2025-01-15T00:00:00Z")));
        assert!(!date_range_valid(&check_in, &check_in), "zero length range");
        assert!(!date_range_valid(&check_in, &date("2025-01-09T00:00:00Z")), "inverted range");
    }

    #[test]
    pub fn back_to_back_ranges_do_not_overlap() {
        let result = ranges_overlap(
            &date("2025-01-10T00:00:00Z"),
            &date("2025-01-15T00:00:00Z"),
            &date("2025-01-15T00:00:00Z"),
            &date("2025-01-20T00:00:00Z"),
        );

        assert!(!result);
    }

    #[test]
    pub fn contained_range_overlaps() {
        let result = ranges_overlap(
            &date("2025-01-12T00:00:00Z"),
            &date("2025-01-18T00:00:00Z"),
            &date("2025-01-10T00:00:00Z"),
            &date("2025-01-20T00:00:00Z"),
        );

        assert!(result);
    }

    #[test]
    pub fn partial_range_overlaps() {
        let result = ranges_overlap(
            &date("2025-01-12T00:00:00Z"),
            &date("2025-01-18T00:00:00Z"),
            &date("2025-01-15T00:00:00Z"),
            &date("2025-01-20T00:00:00Z"),
        );

        assert!(result);
    }

    #[test]
    pub fn identical_ranges_overlap() {
        let check_in = date("2025-01-10T00:00:00Z");
        let check_out = date("2025-01-15T00:00:00Z");

        assert!(ranges_overlap(&check_in, &check_out, &check_in, &check_out));
    }

    #[test]
    pub fn extended_check_out_reaches_neighbor() {
        // a booking ending at the neighbor's check in does not overlap
        // until its check out moves past that boundary
        let check_in = date("2025-01-10T00:00:00Z");
        let neighbor_in = date("2025-01-15T00:00:00Z");
        let neighbor_out = date("2025-01-20T00:00:00Z");

        assert!(!ranges_overlap(&check_in, &neighbor_in, &neighbor_in, &neighbor_out));
        assert!(ranges_overlap(&check_in, &date("2025-01-16T00:00:00Z"), &neighbor_in, &neighbor_out));
    }
}
