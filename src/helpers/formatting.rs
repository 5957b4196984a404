use chrono::{DateTime, Datelike, TimeZone, Utc};

pub const MSAT_PER_SAT: u64 = 1_000;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov",
    "Dec",
];

/// Whole satoshi, rounding half up.
pub fn msat_to_sat(msat: u64) -> u64 {
    let sat = msat / MSAT_PER_SAT;
    if msat % MSAT_PER_SAT >= MSAT_PER_SAT / 2 {
        sat + 1
    } else {
        sat
    }
}

/// Satoshi with eight decimals, used by the hourly value chart.
pub fn msat_to_sat_precise(msat: u64) -> f64 {
    let sat = msat as f64 / MSAT_PER_SAT as f64;
    (sat * 1e8).round() / 1e8
}

/// Thousands grouped with `.`: `1234567` -> `1.234.567`.
pub fn format_number(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

pub fn format_percentage(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Compact relative age: `now`, `5m`, `3h`, `2d`, then a calendar date in
/// the time zone of `now`.
pub fn time_ago<Tz: TimeZone>(created_at: i64, now: &DateTime<Tz>) -> String {
    let seconds = now.timestamp() - created_at;
    let minutes = seconds.div_euclid(60);
    let hours = minutes.div_euclid(60);
    let days = hours.div_euclid(24);

    if seconds < 60 {
        return String::from("now");
    }
    if minutes < 60 {
        return format!("{}m", minutes);
    }
    if hours < 24 {
        return format!("{}h", hours);
    }
    if days < 7 {
        return format!("{}d", days);
    }

    let Some(date) = DateTime::<Utc>::from_timestamp(created_at, 0)
        .map(|dt| dt.with_timezone(&now.timezone()))
    else {
        return String::from("-");
    };
    let month = MONTHS[date.month0() as usize];

    if date.year() == now.year() {
        format!("{} {}", date.day(), month)
    } else {
        format!("{} {} {}", date.day(), month, date.year())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_units() {
        assert_eq!(msat_to_sat(0), 0);
        assert_eq!(msat_to_sat(1_499), 1);
        assert_eq!(msat_to_sat(1_500), 2);
        assert_eq!(msat_to_sat(100_000), 100);
        assert_eq!(msat_to_sat(u64::MAX), 18_446_744_073_709_552);
        assert_eq!(msat_to_sat_precise(1_500), 1.5);
    }

    #[test]
    fn groups_thousands_with_dots() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1_000), "1.000");
        assert_eq!(format_number(1_234_567), "1.234.567");
        assert_eq!(format_number(-45_000), "-45.000");
    }

    #[test]
    fn formats_percentage_with_two_decimals() {
        assert_eq!(format_percentage(0.0), "0.00%");
        assert_eq!(format_percentage(100.0 / 3.0), "33.33%");
    }

    #[test]
    fn time_ago_steps_through_units() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        let ts = now.timestamp();

        assert_eq!(time_ago(ts - 10, &now), "now");
        assert_eq!(time_ago(ts + 30, &now), "now");
        assert_eq!(time_ago(ts - 5 * 60, &now), "5m");
        assert_eq!(time_ago(ts - 3 * 3600, &now), "3h");
        assert_eq!(time_ago(ts - 2 * 86_400, &now), "2d");
    }

    #[test]
    fn time_ago_falls_back_to_dates() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        let same_year = Utc.with_ymd_and_hms(2024, 1, 5, 8, 0, 0).unwrap();
        let last_year = Utc.with_ymd_and_hms(2023, 12, 24, 8, 0, 0).unwrap();

        assert_eq!(time_ago(same_year.timestamp(), &now), "5 Jan");
        assert_eq!(time_ago(last_year.timestamp(), &now), "24 Dec 2023");
    }
}
