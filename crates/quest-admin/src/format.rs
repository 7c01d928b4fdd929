/*
[INPUT]:  Raw counts and ranks from analytics endpoints
[OUTPUT]: Display strings for the dashboard and CLI reports
[POS]:    Presentation helpers - pure number formatting
[UPDATE]: When the dashboard needs a new number style
*/

/// `1234567` -> `"1,234,567"`
pub fn number_with_commas(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    out
}

/// Share of the leaderboard behind `rank`, as a whole percent.
///
/// Last place is 0 and first place is 100.
pub fn calculate_percentile(rank: u64, total: u64) -> u64 {
    if total == rank || total == 0 {
        return 0;
    }
    if rank == 1 {
        return 100;
    }
    let share = (total.saturating_sub(rank)) as f64 / total as f64 * 100.0;
    ((share * 100.0).round() / 100.0).trunc() as u64
}

/// `1500` -> `"+2k"`; values under a thousand are printed as is
pub fn format_thousands_k(value: u64) -> String {
    if value >= 1000 {
        format!("+{}k", (value as f64 / 1000.0).round())
    } else {
        value.to_string()
    }
}

/// Y-axis tick of the activity chart: `2500` -> `"2.5k"`
pub fn format_axis_tick(value: i64) -> String {
    if value > 1000 {
        format!("{}k", value as f64 / 1000.0)
    } else {
        value.to_string()
    }
}

/// Percentage of `count` over the unique visitors, two decimals, or `"NA"`
pub fn percent_of_visitors(count: u64, visitors: Option<u64>) -> String {
    match visitors {
        Some(total) if total > 0 => format!("{:.2}", count as f64 / total as f64 * 100.0),
        _ => "NA".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, "0")]
    #[case(999, "999")]
    #[case(1000, "1,000")]
    #[case(1234567, "1,234,567")]
    #[case(-45000, "-45,000")]
    fn commas(#[case] value: i64, #[case] expected: &str) {
        assert_eq!(number_with_commas(value), expected);
    }

    #[rstest]
    #[case(10, 10, 0)]
    #[case(1, 10, 100)]
    #[case(4, 10, 60)]
    #[case(2, 3, 33)]
    #[case(5, 0, 0)]
    fn percentile(#[case] rank: u64, #[case] total: u64, #[case] expected: u64) {
        assert_eq!(calculate_percentile(rank, total), expected);
    }

    #[rstest]
    #[case(999, "999")]
    #[case(1000, "+1k")]
    #[case(1500, "+2k")]
    #[case(12_345, "+12k")]
    fn thousands(#[case] value: u64, #[case] expected: &str) {
        assert_eq!(format_thousands_k(value), expected);
    }

    #[test]
    fn axis_ticks_switch_above_a_thousand() {
        assert_eq!(format_axis_tick(1000), "1000");
        assert_eq!(format_axis_tick(2500), "2.5k");
        assert_eq!(format_axis_tick(3000), "3k");
    }

    #[test]
    fn percent_needs_visitors() {
        assert_eq!(percent_of_visitors(5, None), "NA");
        assert_eq!(percent_of_visitors(5, Some(0)), "NA");
        assert_eq!(percent_of_visitors(1, Some(3)), "33.33");
    }
}
