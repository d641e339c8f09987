/// Format a number for the display sink: exactly one decimal place (`%.1f`).
pub fn format_display(n: f64) -> String {
    if n.is_nan() {
        "nan".to_string()
    } else {
        format!("{:.1}", n)
    }
}

/// Format a number for raw queries: six decimal places (`%f`).
pub fn format_raw(n: f64) -> String {
    if n.is_nan() {
        "nan".to_string()
    } else {
        format!("{:.6}", n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_display_one_decimal() {
        assert_eq!(format_display(3.0), "3.0");
        assert_eq!(format_display(2.26), "2.3");
        assert_eq!(format_display(-1.5), "-1.5");
        assert_eq!(format_display(f64::INFINITY), "inf");
    }

    #[test]
    fn test_format_raw_six_decimals() {
        assert_eq!(format_raw(5.0), "5.000000");
        assert_eq!(format_raw(0.125), "0.125000");
        assert_eq!(format_raw(f64::NAN), "nan");
    }
}
