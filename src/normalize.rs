//! Clamping of raw form entries into whole-hour values.

/// Parses `raw` with the leading-integer rule and clamps it into `[min, max]`.
///
/// Empty or non-numeric input yields `min`. Anything after the leading digits
/// is ignored, so a fractional entry is truncated rather than rounded.
pub fn normalize(raw: &str, min: i64, max: Option<i64>) -> i64 {
    match parse_leading_int(raw) {
        Some(value) => normalize_value(value, min, max),
        None => min,
    }
}

/// Clamps an already numeric value into `[min, max]`.
pub fn normalize_value(value: i64, min: i64, max: Option<i64>) -> i64 {
    if value < min {
        return min;
    }
    match max {
        Some(max) if value > max => max.max(min),
        _ => value,
    }
}

fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: i64 = 0;
    let mut seen = false;
    for byte in digits.bytes().take_while(u8::is_ascii_digit) {
        seen = true;
        let digit = i64::from(byte - b'0');
        value = value.saturating_mul(10).saturating_add(digit);
    }

    if !seen {
        return None;
    }
    Some(if negative { value.saturating_neg() } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_and_garbage_default_to_min() {
        assert_eq!(normalize("", 0, Some(168)), 0);
        assert_eq!(normalize("   ", 2, Some(168)), 2);
        assert_eq!(normalize("abc", 1, None), 1);
        assert_eq!(normalize("-", 0, None), 0);
    }

    #[test]
    fn clamps_into_bounds() {
        assert_eq!(normalize("-5", 0, Some(24)), 0);
        assert_eq!(normalize("30", 0, Some(24)), 24);
        assert_eq!(normalize("12", 0, Some(24)), 12);
        assert_eq!(normalize("900", 0, None), 900);
    }

    #[test]
    fn fractional_input_truncates() {
        assert_eq!(normalize("3.7", 0, None), 3);
        assert_eq!(normalize("3.2", 0, None), 3);
        assert_eq!(normalize(" 7hours", 0, None), 7);
        assert_eq!(normalize("-2.5", -10, None), -2);
    }

    #[test]
    fn huge_digit_runs_saturate_before_clamping() {
        assert_eq!(normalize("99999999999999999999999", 0, Some(168)), 168);
        assert_eq!(normalize("99999999999999999999999", 0, None), i64::MAX);
    }

    fn raw_entry() -> impl Strategy<Value = String> {
        prop_oneof![
            any::<i64>().prop_map(|value| value.to_string()),
            "-?[0-9]{1,20}(\\.[0-9]+)?[a-z]*",
            " *[+-]?[0-9]{1,4}",
            ".{0,12}",
        ]
    }

    #[test]
    fn numeric_inputs_are_kept_within_bounds() {
        assert_eq!(normalize("+42", 0, Some(168)), 42);
        assert_eq!(normalize("  17.99abc", 0, Some(168)), 17);
        assert_eq!(normalize(&i64::MIN.to_string(), 0, None), 0);
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(raw in raw_entry(), min in 0i64..50, span in proptest::option::of(0i64..200)) {
            let max = span.map(|span| min + span);
            let once = normalize(&raw, min, max);
            let twice = normalize(&once.to_string(), min, max);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn normalize_stays_in_bounds(value in any::<i64>(), min in 0i64..50, span in 0i64..200) {
            let result = normalize(&value.to_string(), min, Some(min + span));
            prop_assert!(result >= min);
            prop_assert!(result <= min + span);
        }
    }
}
