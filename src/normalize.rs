//! Cleaning of the free-form attendee fields.

/// Width of a normalized zip code.
pub const ZIP_LEN: usize = 5;

/// Left-pads `raw` with `0` to five characters and keeps the first five.
///
/// No digit extraction is performed: `"80302-1234"` becomes `"80302"` only
/// because of the truncation.
pub fn normalize_zip(raw: &str) -> String {
    let len = raw.chars().count();
    let padding = ZIP_LEN.saturating_sub(len);

    std::iter::repeat_n('0', padding)
        .chain(raw.chars())
        .take(ZIP_LEN)
        .collect()
}

/// Reduces `raw` to a bare 10-digit phone number.
///
/// Returns `None` when the digits cannot form a US number: anything other
/// than 10 digits, or 11 digits with a leading `1` country code.
pub fn normalize_phone(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    match digits.len() {
        10 => Some(digits),
        11 if digits.starts_with('1') => Some(digits[1..].to_string()),
        _ => None,
    }
}
