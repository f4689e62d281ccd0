// Verify the start mask grammar stays bit-exact: 12 ASCII characters,
// YYMMDDHHmmss, each field two digits or the "--" placeholder. This is the
// one serialized format in the system; these tests ensure it is never broken.

use chrono::{NaiveDate, NaiveDateTime};

use cadence_scheduler::{resolve_start_mask, SchedulerError};

fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .unwrap()
        .and_hms_opt(h, mi, s)
        .unwrap()
}

#[test]
fn all_placeholder_mask_means_run_immediately() {
    let now = dt(2025, 6, 10, 10, 0, 0);
    assert_eq!(resolve_start_mask("------------", now).unwrap(), now);
}

#[test]
fn fields_are_positional_two_character_groups() {
    let now = dt(2025, 1, 1, 0, 0, 0);
    assert_eq!(
        resolve_start_mask("260302040506", now).unwrap(),
        dt(2026, 3, 2, 4, 5, 6)
    );
}

#[test]
fn placeholder_fields_resolve_at_evaluation_time() {
    let now = dt(2025, 6, 10, 10, 20, 30);
    // Only the hour is explicit; every other component comes from `now`.
    assert_eq!(
        resolve_start_mask("------23----", now).unwrap(),
        dt(2025, 6, 10, 23, 20, 30)
    );
}

#[test]
fn eleven_characters_is_a_length_error() {
    let err = resolve_start_mask("-----------", dt(2025, 6, 10, 0, 0, 0)).unwrap_err();
    assert_eq!(err, SchedulerError::MaskLength { len: 11 });
    assert!(err.to_string().contains("12"));
}

#[test]
fn thirteen_characters_is_a_length_error() {
    let err = resolve_start_mask("-------------", dt(2025, 6, 10, 0, 0, 0)).unwrap_err();
    assert_eq!(err, SchedulerError::MaskLength { len: 13 });
}

#[test]
fn field_errors_name_the_offending_field() {
    let now = dt(2025, 6, 10, 0, 0, 0);
    let err = resolve_start_mask("--1x--------", now).unwrap_err();
    assert_eq!(err.to_string(), "invalid month in start mask");
    let err = resolve_start_mask("--------99--", now).unwrap_err();
    assert_eq!(err.to_string(), "invalid minute in start mask");
}

#[test]
fn single_dash_pairs_are_not_digits() {
    // "-1" is neither a placeholder nor two decimal digits.
    let now = dt(2025, 6, 10, 0, 0, 0);
    assert_eq!(
        resolve_start_mask("-1----------", now),
        Err(SchedulerError::MaskField { field: "year" })
    );
}

#[test]
fn roll_forward_unit_follows_the_coarsest_explicit_field() {
    let now = dt(2025, 6, 10, 10, 0, 0);
    // month explicit → one year
    assert_eq!(
        resolve_start_mask("--06010900--", now).unwrap(),
        dt(2026, 6, 1, 9, 0, 0)
    );
    // day explicit → one month
    assert_eq!(
        resolve_start_mask("----010900--", now).unwrap(),
        dt(2025, 7, 1, 9, 0, 0)
    );
    // hour explicit → one day
    assert_eq!(
        resolve_start_mask("------0900--", now).unwrap(),
        dt(2025, 6, 11, 9, 0, 0)
    );
}
