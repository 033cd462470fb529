use chrono::{DateTime, Duration, TimeZone};

/// `HH:00` labels for the `count` hours following `now`, in `now`'s zone.
pub fn hourly_labels<Z: TimeZone>(now: &DateTime<Z>, count: usize) -> Vec<String>
where
    Z::Offset: std::fmt::Display,
{
    (1..=count as i64)
        .map(|hours| (now.clone() + Duration::hours(hours)).format("%H:00").to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use chrono_tz::Asia::Colombo;

    #[test]
    fn test_labels_start_one_hour_ahead() {
        let now = Colombo.with_ymd_and_hms(2024, 3, 5, 12, 34, 56).unwrap();

        assert_eq!(
            hourly_labels(&now, 5),
            vec!["13:00", "14:00", "15:00", "16:00", "17:00"]
        );
    }

    #[test]
    fn test_labels_wrap_past_midnight() {
        let now = Colombo.with_ymd_and_hms(2024, 3, 5, 22, 0, 0).unwrap();

        assert_eq!(
            hourly_labels(&now, 5),
            vec!["23:00", "00:00", "01:00", "02:00", "03:00"]
        );
    }

    #[test]
    fn test_labels_follow_zone() {
        // Colombo is UTC+05:30, so the local hour differs from UTC.
        let utc = Utc.with_ymd_and_hms(2024, 3, 5, 6, 0, 0).unwrap();
        let local = utc.with_timezone(&Colombo);

        assert_eq!(hourly_labels(&utc, 1), vec!["07:00"]);
        assert_eq!(hourly_labels(&local, 1), vec!["12:00"]);
    }

    #[test]
    fn test_zero_count() {
        assert!(hourly_labels(&Utc::now(), 0).is_empty());
    }
}
