//! Text helpers shared by the console reporter and the chart labels.

/// Insert commas every three digits of an integer count.
///
/// # Examples
///
/// ```
/// use listen_core::formatting::format_count;
///
/// assert_eq!(format_count(0), "0");
/// assert_eq!(format_count(999), "999");
/// assert_eq!(format_count(1_234_567), "1,234,567");
/// ```
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let lead = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && i % 3 == lead {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// 12-hour clock label for an hour of day.
///
/// Midnight is `12am` and noon is `12pm`.
///
/// # Examples
///
/// ```
/// use listen_core::formatting::hour_label;
///
/// assert_eq!(hour_label(0), "12am");
/// assert_eq!(hour_label(9), "9am");
/// assert_eq!(hour_label(12), "12pm");
/// assert_eq!(hour_label(13), "1pm");
/// ```
pub fn hour_label(hour: u32) -> String {
    let hour = hour % 24;
    let suffix = if hour < 12 { "am" } else { "pm" };
    let display = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{}{}", display, suffix)
}

/// `HH:MM` label for a number of seconds since midnight.
///
/// `86_400` renders as `24:00` so the top of a day axis reads naturally.
///
/// # Examples
///
/// ```
/// use listen_core::formatting::clock_label;
///
/// assert_eq!(clock_label(0), "00:00");
/// assert_eq!(clock_label(6 * 3600 + 30 * 60), "06:30");
/// assert_eq!(clock_label(86_400), "24:00");
/// ```
pub fn clock_label(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 3_600, (seconds % 3_600) / 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count_boundaries() {
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(12_345), "12,345");
        assert_eq!(format_count(123_456), "123,456");
    }

    #[test]
    fn test_hour_label_full_wheel() {
        let labels: Vec<String> = (0..24).map(hour_label).collect();
        assert_eq!(labels[0], "12am");
        assert_eq!(labels[1], "1am");
        assert_eq!(labels[11], "11am");
        assert_eq!(labels[12], "12pm");
        assert_eq!(labels[13], "1pm");
        assert_eq!(labels[23], "11pm");
    }

    #[test]
    fn test_hour_labels_are_unique() {
        let mut labels: Vec<String> = (0..24).map(hour_label).collect();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), 24);
    }

    #[test]
    fn test_clock_label_truncates_seconds() {
        assert_eq!(clock_label(59), "00:00");
        assert_eq!(clock_label(23 * 3_600 + 59 * 60 + 59), "23:59");
    }
}
