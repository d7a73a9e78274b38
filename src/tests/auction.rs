use super::auction_time;
use crate::auction::*;
use anyhow::Result;
use chrono::{Duration, FixedOffset, TimeZone, Utc};

const AT: &str = "2024/04/15 09:00:00";

fn classify_at(delta_secs: i64) -> AuctionState {
    let now = auction_time() - Duration::seconds(delta_secs);
    CountdownClassifier::default().classify(AT, now)
}

#[test]
fn boundaries() {
    assert_eq!(
        classify_at(1),
        AuctionState::Pending {
            days: 0,
            hours: 0,
            minutes: 0,
            seconds: 1
        }
    );
    assert_eq!(classify_at(0), AuctionState::Live);
    assert_eq!(classify_at(-300), AuctionState::Live);
    assert_eq!(classify_at(-301), AuctionState::Ended);
    assert_eq!(classify_at(-86_400), AuctionState::Ended);
}

#[test]
fn pending_breakdown_floors_each_unit() {
    let delta = 3 * 86_400 + 4 * 3_600 + 5 * 60 + 6;
    assert_eq!(
        classify_at(delta),
        AuctionState::Pending {
            days: 3,
            hours: 4,
            minutes: 5,
            seconds: 6
        }
    );

    // days never carry over into anything larger
    assert_eq!(
        AuctionState::from_delta_secs(400 * 86_400),
        AuctionState::Pending {
            days: 400,
            hours: 0,
            minutes: 0,
            seconds: 0
        }
    );
}

#[test]
fn sub_second_remainders_are_floored() {
    let classifier = CountdownClassifier::default();

    let now = auction_time() - Duration::milliseconds(999);
    assert_eq!(classifier.classify(AT, now), AuctionState::Live);

    // 300.5s after start floors to -301s
    let now = auction_time() + Duration::milliseconds(300_500);
    assert_eq!(classifier.classify(AT, now), AuctionState::Ended);
}

#[test]
fn unparsable_timestamps_are_invalid() {
    let classifier = CountdownClassifier::default();
    for raw in ["", "TBC", "2024/13/45 09:00:00", "15/04/2024 09:00", "tomorrow"] {
        assert_eq!(
            classifier.classify(raw, auction_time()),
            AuctionState::Invalid,
            "{raw:?}"
        );
    }
}

#[test]
fn accepted_formats() -> Result<()> {
    let classifier = CountdownClassifier::default();

    for raw in [
        "2024/04/15 09:00:00",
        "2024-04-15 09:00:00",
        "2024-04-15T09:00:00",
        "2024-04-15T09:00",
        "2024-04-15T09:00:00Z",
        "2024-04-15T11:00:00+02:00",
        " 2024/04/15 09:00:00 ",
    ] {
        assert_eq!(classifier.parse(raw)?, auction_time(), "{raw:?}");
    }
    assert_eq!(
        classifier.parse("2024/04/15")?,
        Utc.with_ymd_and_hms(2024, 4, 15, 0, 0, 0).unwrap()
    );
    Ok(())
}

#[test]
fn naive_timestamps_use_configured_offset() -> Result<()> {
    let classifier = CountdownClassifier::new(FixedOffset::east_opt(3_600).unwrap());

    assert_eq!(
        classifier.parse(AT)?,
        Utc.with_ymd_and_hms(2024, 4, 15, 8, 0, 0).unwrap()
    );
    // an explicit offset wins
    assert_eq!(classifier.parse("2024-04-15T09:00:00Z")?, auction_time());
    // bare dates are not shifted
    assert_eq!(
        classifier.parse("2024/04/15")?,
        Utc.with_ymd_and_hms(2024, 4, 15, 0, 0, 0).unwrap()
    );
    Ok(())
}

#[test]
fn labels() {
    assert_eq!(classify_at(90_061).to_string(), "1d 1h 1m 1s");
    assert_eq!(classify_at(90_061).label(), "Auction in 1d 1h 1m 1s");
    assert_eq!(AuctionState::Live.label(), "Auction live");
    assert_eq!(AuctionState::Ended.label(), "Auction ended");
    assert_eq!(AuctionState::Invalid.label(), "Invalid date");
}
