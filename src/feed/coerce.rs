// Cell coercers. Editors type prices as `6,5`, `€12` or `1.234,56`;
// an unusable cell is simply absent, never an error.

const CURRENCY_SYMBOLS: [char; 5] = ['€', '$', '£', '¥', '₹'];
const PLACEHOLDERS: [&str; 3] = ["", "—", "-"];

const FALSE_TOKENS: [&str; 6] = ["false", "falso", "0", "no", "n", "off"];
const TRUE_TOKENS: [&str; 7] = ["true", "verdadero", "1", "si", "sí", "s", "on"];

// Zero stays a real price
pub fn parse_price(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if PLACEHOLDERS.contains(&trimmed) {
        return None;
    }

    let cleaned: String = trimmed
        .chars()
        .filter(|c| !CURRENCY_SYMBOLS.contains(c) && !c.is_whitespace())
        .collect();

    // With both separators present the dot groups thousands and the comma
    // marks decimals; a lone comma is always the decimal separator.
    let normalized = if cleaned.contains(',') {
        let without_thousands = if cleaned.contains('.') {
            cleaned.replace('.', "")
        } else {
            cleaned
        };
        without_thousands.replacen(',', ".", 1)
    } else {
        cleaned
    };

    let number: f64 = numeric_prefix(&normalized)?.parse().ok()?;
    number.is_finite().then_some(number)
}

pub fn format_price(value: f64) -> String {
    format!("{:.2}", value)
}

pub fn parse_price_field(value: &str) -> Option<String> {
    parse_price(value).map(format_price)
}

// Only a recognized negative token hides an item
pub fn parse_available(value: Option<&str>) -> bool {
    let Some(raw) = value else {
        return true;
    };
    let normalized = raw.trim().to_lowercase();
    if FALSE_TOKENS.contains(&normalized.as_str()) {
        return false;
    }
    if !normalized.is_empty() && !TRUE_TOKENS.contains(&normalized.as_str()) {
        tracing::debug!(token = raw, "Unrecognized availability token, treating as available");
    }
    true
}

// Fractional values truncate
pub fn parse_integer(value: &str) -> Option<i64> {
    parse_price(value).map(|n| n.trunc() as i64)
}

// Longest prefix that reads as a decimal number: optional sign, digits,
// optional fraction, optional exponent. Trailing junk is ignored.
fn numeric_prefix(s: &str) -> Option<&str> {
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }
    Some(&s[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn european_and_symbol_prices() {
        assert_eq!(parse_price_field("6,5").as_deref(), Some("6.50"));
        assert_eq!(parse_price_field("1.234,56").as_deref(), Some("1234.56"));
        assert_eq!(parse_price_field("€12").as_deref(), Some("12.00"));
        assert_eq!(parse_price_field("12 €").as_deref(), Some("12.00"));
        assert_eq!(parse_price_field("8.5").as_deref(), Some("8.50"));
    }

    #[test]
    fn placeholder_prices_are_absent() {
        assert_eq!(parse_price("—"), None);
        assert_eq!(parse_price("-"), None);
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("   "), None);
        assert_eq!(parse_price("consultar"), None);
    }

    #[test]
    fn zero_is_a_price_not_absence() {
        assert_eq!(parse_price("0"), Some(0.0));
        assert_eq!(parse_price_field("0,00").as_deref(), Some("0.00"));
    }

    #[test]
    fn trailing_text_is_ignored() {
        assert_eq!(parse_price("4,5/copa"), Some(4.5));
        assert_eq!(parse_price(".5"), Some(0.5));
    }

    #[test]
    fn exponent_notation() {
        assert_eq!(parse_price("1e3"), Some(1000.0));
        assert_eq!(parse_price("2.5E-1"), Some(0.25));
        assert_eq!(parse_price("3e"), Some(3.0));
        assert_eq!(parse_price("4e+x"), Some(4.0));
        assert_eq!(parse_price("e5"), None);
    }

    #[test]
    fn availability_tokens() {
        for token in ["FALSE", "no", "0", "Falso", "N", "off", " No "] {
            assert!(!parse_available(Some(token)), "{token} should be false");
        }
        for token in ["", "maybe", "TRUE", "Sí", "si", "1", "on"] {
            assert!(parse_available(Some(token)), "{token} should be true");
        }
        assert!(parse_available(None));
    }

    #[test]
    fn integers_follow_price_normalization() {
        assert_eq!(parse_integer("3"), Some(3));
        assert_eq!(parse_integer("2,7"), Some(2));
        assert_eq!(parse_integer(""), None);
        assert_eq!(parse_integer("abc"), None);
    }
}
