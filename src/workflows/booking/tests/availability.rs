use super::common::*;
use crate::workflows::booking::availability::assess;
use crate::workflows::booking::domain::ReservationStatus;
use rust_decimal_macros::dec;

#[test]
fn empty_calendar_is_available() {
    let report = assess(&room(), &[], &stay(1, 3));

    assert!(report.available);
    assert!(report.conflicts.is_empty());
}

#[test]
fn touching_stays_do_not_conflict() {
    let existing = reservation("a", 1, 3, ReservationStatus::Confirmed);

    let report = assess(&room(), &[existing], &stay(3, 5));

    assert!(report.available, "back-to-back stays share a turnover day");
}

#[test]
fn contained_request_conflicts() {
    let existing = reservation("a", 1, 10, ReservationStatus::Confirmed);

    let report = assess(&room(), &[existing], &stay(3, 5));

    assert!(!report.available);
    assert_eq!(report.conflicts.len(), 1);
}

#[test]
fn containing_request_conflicts() {
    let existing = reservation("a", 3, 5, ReservationStatus::Confirmed);

    let report = assess(&room(), &[existing], &stay(1, 10));

    assert!(!report.available);
}

#[test]
fn partial_overlap_conflicts() {
    let existing = reservation("a", 1, 4, ReservationStatus::Pending);

    let report = assess(&room(), &[existing], &stay(3, 6));

    assert!(!report.available);
    assert_eq!(report.conflicts[0].status, "pending");
}

#[test]
fn overlap_predicate_is_symmetric() {
    let windows = [stay(1, 3), stay(2, 5), stay(3, 5), stay(4, 10), stay(1, 10)];

    for a in &windows {
        for b in &windows {
            assert_eq!(a.overlaps(b), b.overlaps(a), "{a:?} vs {b:?}");
        }
    }
}

#[test]
fn released_reservations_never_conflict() {
    let cancelled = reservation("a", 1, 10, ReservationStatus::Cancelled);
    let refunded = reservation("b", 1, 10, ReservationStatus::Refunded);

    let report = assess(&room(), &[cancelled, refunded], &stay(3, 5));

    assert!(report.available);
    assert!(report.conflicts.is_empty());
}

#[test]
fn completed_reservations_still_block() {
    let completed = reservation("a", 1, 10, ReservationStatus::Completed);

    let report = assess(&room(), &[completed], &stay(3, 5));

    assert!(!report.available);
}

#[test]
fn report_prices_the_stay_per_night() {
    let report = assess(&room(), &[], &stay(1, 3));

    assert_eq!(report.nights, 2);
    assert_eq!(report.nightly_rate, dec!(125.00));
    assert_eq!(report.total_price, dec!(250.00));
}

#[test]
fn same_day_stay_bills_one_night() {
    let requested = crate::workflows::booking::domain::StayRange::new(at(1, 10), at(1, 18))
        .expect("valid stay");

    let report = assess(&room(), &[], &requested);

    assert_eq!(report.nights, 1);
    assert_eq!(report.total_price, dec!(125.00));
}
