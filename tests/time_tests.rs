use chrono::{Duration, TimeZone, Utc};
use ghfeed::util::time::{relative_time, relative_time_from, relative_time_str};

#[test]
fn test_just_now() {
    let now = Utc::now();
    assert_eq!(relative_time(&now), "just now");
}

#[test]
fn test_future_timestamp_is_just_now() {
    let t = Utc::now() + Duration::hours(5);
    assert_eq!(relative_time(&t), "just now");
}

#[test]
fn test_units_against_fixed_now() {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    let cases = [
        (Duration::seconds(59), "just now"),
        (Duration::seconds(61), "1m ago"),
        (Duration::minutes(59), "59m ago"),
        (Duration::hours(1), "1h ago"),
        (Duration::hours(23), "23h ago"),
        (Duration::days(1), "1d ago"),
        (Duration::days(29), "29d ago"),
        (Duration::days(30), "1mo ago"),
        (Duration::days(364), "12mo ago"),
        (Duration::days(365), "1y ago"),
        (Duration::days(1000), "2y ago"),
    ];
    for (ago, expected) in cases {
        assert_eq!(relative_time_from(&(now - ago), now), expected, "{:?}", ago);
    }
}

#[test]
fn test_str_parses_rfc3339() {
    let t = (Utc::now() - Duration::hours(3)).to_rfc3339();
    assert_eq!(relative_time_str(&t), "3h ago");
}

#[test]
fn test_str_accepts_github_zulu_format() {
    let t = (Utc::now() - Duration::days(2))
        .format("%Y-%m-%dT%H:%M:%SZ")
        .to_string();
    assert_eq!(relative_time_str(&t), "2d ago");
}

#[test]
fn test_str_unparseable_falls_back_to_recently() {
    assert_eq!(relative_time_str("not a date"), "recently");
    assert_eq!(relative_time_str(""), "recently");
}
