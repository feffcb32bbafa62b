use super::*;
use crate::helpers::utils::FakeRandom;

#[test]
fn can_format_times() {
    assert_eq!(format_time(0.), "0:00:00.000");
    assert_eq!(format_time(83_456.), "0:01:23.456");
    assert_eq!(format_time(5_025_123.), "1:23:45.123");
    assert_eq!(format_time(Float::INFINITY), "inf");
}

#[test]
fn can_sample_weather_from_wet_probability() {
    let random = FakeRandom::new(vec![], vec![0.05, 0.95, 0.5]);

    let weather = sample_weather(3, 0.1, &random);

    assert_eq!(weather, vec![Weather::Wet, Weather::Dry, Weather::Dry]);
}

#[test]
fn can_sample_degenerate_weather() {
    let random = FakeRandom::new(vec![], vec![0.99, 0.01]);

    assert_eq!(sample_weather(1, 1., &random), vec![Weather::Wet]);
    assert_eq!(sample_weather(1, 0., &random), vec![Weather::Dry]);
}
