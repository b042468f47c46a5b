// src/core/sanitize.rs

/// Canonical form of a column header used for alias matching.
///
/// Keeps ASCII letters, digits and `_`; whitespace, punctuation and
/// diacritics all go. `"Număr declarații"`, `"NumărDeclarații"` and a mangled
/// `"NumÄr declaraÈii"` all come out as `"numrdeclaraii"`. Case is folded
/// (ASCII only).
pub fn header_key(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Leading integer of `s`, the way a lenient reader sees it.
///
/// Skips leading whitespace, accepts one optional sign, then reads digits
/// until the first non-digit. `"12abc"` → 12, `" -3"` → -3, `"3.7"` → 3.
/// Returns `None` when no digit follows, or on overflow.
pub fn leading_int(s: &str) -> Option<i64> {
    let t = s.trim_start();
    let (neg, rest) = match t.as_bytes().first() {
        Some(b'-') => (true, &t[1..]),
        Some(b'+') => (false, &t[1..]),
        _ => (false, t),
    };
    let end = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
    if end == 0 { return None; }
    let n: i64 = rest[..end].parse().ok()?;
    Some(if neg { -n } else { n })
}

/// Leading decimal number of `s` (`.` as separator), lenient like `leading_int`.
///
/// `"80"` → 80.0, `"50.5 pct"` → 50.5, `".5"` → 0.5, `"abc"` → None.
/// Non-finite results are rejected.
pub fn leading_float(s: &str) -> Option<f64> {
    let t = s.trim_start();
    let bytes = t.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'-') | Some(b'+')) { i += 1; }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() { i += 1; }
    let mut digits = i - int_start;

    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() { j += 1; }
        if j > frac_start || digits > 0 {
            digits += j - frac_start;
            i = j;
        }
    }
    if digits == 0 { return None; }

    let v: f64 = t[..i].trim_end_matches('.').parse().ok()?;
    v.is_finite().then_some(v)
}

/// Credibility cell: drop a `%`, turn a decimal comma into a point, then read
/// the leading number. `"80%"` → 80.0, `"50,5"` → 50.5.
pub fn parse_percent(s: &str) -> Option<f64> {
    let cleaned = s.trim().replacen('%', "", 1).replacen(',', ".", 1);
    leading_float(&cleaned)
}
