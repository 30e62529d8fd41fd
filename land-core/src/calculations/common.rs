//! Parsing and formatting of typed amounts.
//!
//! Input fields are edited live, so parsing is deliberately forgiving: a
//! half-typed number such as `"12."` reads as `12`, and text with no number
//! at all reads as `0` instead of failing.

/// Parses the number at the start of `text`, ignoring `,` separators.
///
/// Accepts an optional sign, integer digits, an optional fraction and an
/// optional exponent. Anything after the numeric prefix is ignored. Returns
/// `None` when there is no leading number or the value is not finite.
///
/// # Examples
///
/// ```
/// use land_core::calculations::common::parse_leading_number;
///
/// assert_eq!(parse_leading_number("1,234.5"), Some(1234.5));
/// assert_eq!(parse_leading_number("12abc"), Some(12.0));
/// assert_eq!(parse_leading_number("abc"), None);
/// ```
pub fn parse_leading_number(text: &str) -> Option<f64> {
    let normalized: String = text.chars().filter(|c| *c != ',').collect();
    let s = normalized.trim();
    let bytes = s.as_bytes();
    let len = bytes.len();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let int_start = end;
    end = skip_digits(bytes, end);
    let mut mantissa_digits = end - int_start;

    if end < len && bytes[end] == b'.' {
        let frac_start = end + 1;
        end = skip_digits(bytes, frac_start);
        mantissa_digits += end - frac_start;
    }

    if mantissa_digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows it.
    if end < len && matches!(bytes[end], b'e' | b'E') {
        let mut exp_digits_start = end + 1;
        if exp_digits_start < len && matches!(bytes[exp_digits_start], b'+' | b'-') {
            exp_digits_start += 1;
        }
        let exp_end = skip_digits(bytes, exp_digits_start);
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end]
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Parses a typed amount, reading anything unparseable as `0`.
///
/// # Examples
///
/// ```
/// use land_core::calculations::common::parse_number;
///
/// assert_eq!(parse_number("5,000"), 5000.0);
/// assert_eq!(parse_number(""), 0.0);
/// assert_eq!(parse_number("n/a"), 0.0);
/// ```
pub fn parse_number(text: &str) -> f64 {
    parse_leading_number(text).unwrap_or(0.0)
}

/// Renders `value` with `,` between thousands groups.
///
/// The fraction keeps every digit needed to read back the exact same value,
/// so `parse_number(&format_with_separators(x)) == x` for any finite `x`.
/// Non-finite values render as an empty string.
///
/// # Examples
///
/// ```
/// use land_core::calculations::common::format_with_separators;
///
/// assert_eq!(format_with_separators(1234567.25), "1,234,567.25");
/// assert_eq!(format_with_separators(-980.0), "-980");
/// ```
pub fn format_with_separators(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }

    group_number_text(&value.to_string())
}

/// Groups the integer part of an already formatted decimal number.
///
/// The sign and fraction digits pass through untouched.
pub fn group_number_text(text: &str) -> String {
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };

    match digits.split_once('.') {
        Some((int_part, frac_part)) => {
            format!("{sign}{}.{frac_part}", group_thousands(int_part))
        }
        None => format!("{sign}{}", group_thousands(digits)),
    }
}

/// Inserts `,` every three digits from the right of an ASCII digit string.
pub fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

fn skip_digits(
    bytes: &[u8],
    mut pos: usize,
) -> usize {
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    pos
}
