//! Currency display for campaign amounts.

/// Format `amount` as British pounds the way an `en-GB` locale renders GBP:
/// pound sign, comma-grouped thousands, exactly two decimals, and a leading
/// minus for negative values (`-£3.00`).
///
/// Rounds half away from zero at the penny, on the shortest decimal form of
/// the number, so `1.005` shows as `£1.01`.
pub fn format_currency(amount: f64) -> String {
    let sign = if amount.is_sign_negative() && !amount.is_nan() { "-" } else { "" };
    if amount.is_nan() {
        return "£NaN".to_string();
    }
    if amount.is_infinite() {
        return format!("{sign}£∞");
    }

    let pennies = round_to_pennies(amount.abs());
    let (pounds, pence) = pennies.split_at(pennies.len() - 2);
    format!("{sign}£{}.{pence}", group_thousands(pounds))
}

/// Digits of `amount` in pennies, at least three long. `amount` must be
/// finite and non-negative.
fn round_to_pennies(amount: f64) -> String {
    let text = amount.to_string();
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let mut digits: Vec<u8> = whole
        .bytes()
        .chain(fraction.bytes().chain(std::iter::repeat(b'0')).take(2))
        .collect();

    if fraction.as_bytes().get(2).is_some_and(|d| *d >= b'5') {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }

    let text: String = digits.into_iter().map(char::from).collect();
    let trimmed = text.trim_start_matches('0');
    format!("{trimmed:0>3}")
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_whole_and_fractional_amounts() {
        assert_eq!(format_currency(0.0), "£0.00");
        assert_eq!(format_currency(5.0), "£5.00");
        assert_eq!(format_currency(1234.5), "£1,234.50");
        assert_eq!(format_currency(0.01), "£0.01");
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(format_currency(100.0), "£100.00");
        assert_eq!(format_currency(1000.0), "£1,000.00");
        assert_eq!(format_currency(10000.0), "£10,000.00");
        assert_eq!(format_currency(1234567.891), "£1,234,567.89");
    }

    #[test]
    fn rounds_to_pennies() {
        assert_eq!(format_currency(2.675_1), "£2.68");
        assert_eq!(format_currency(0.125), "£0.13");
        assert_eq!(format_currency(999.999), "£1,000.00");
        assert_eq!(format_currency(0.004), "£0.00");
    }

    #[test]
    fn rounds_the_decimal_value_not_the_binary_product() {
        // Each of these times 100 lands just below the half penny in binary.
        assert_eq!(format_currency(1.005), "£1.01");
        assert_eq!(format_currency(0.145), "£0.15");
        assert_eq!(format_currency(0.285), "£0.29");
        assert_eq!(format_currency(0.565), "£0.57");
        assert_eq!(format_currency(-1.005), "-£1.01");
    }

    #[test]
    fn large_amounts_keep_every_digit() {
        assert_eq!(format_currency(1e20), "£100,000,000,000,000,000,000.00");
        assert_eq!(format_currency(99.995), "£100.00");
    }

    #[test]
    fn negative_amounts_lead_with_minus() {
        assert_eq!(format_currency(-3.0), "-£3.00");
        assert_eq!(format_currency(-1500.25), "-£1,500.25");
    }

    #[test]
    fn non_finite_amounts() {
        assert_eq!(format_currency(f64::NAN), "£NaN");
        assert_eq!(format_currency(f64::INFINITY), "£∞");
        assert_eq!(format_currency(f64::NEG_INFINITY), "-£∞");
    }
}
