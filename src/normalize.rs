//! Text cleanup applied to every fragment pulled out of a page.

/// Code points removed outright (they carry no visible width).
const INVISIBLE: [char; 4] = ['\u{200c}', '\u{200d}', '\u{2060}', '\u{feff}'];

/// Collapse whitespace and strip invisible characters from `text`.
///
/// Non-breaking spaces, zero-width spaces and control characters become
/// ordinary spaces; any run of whitespace collapses to a single space and the
/// result is trimmed. Idempotent, and total over all inputs.
///
/// # Examples
///
/// ```
/// use news_extract::normalize::normalize;
/// assert_eq!(normalize("  Storm\u{a0}hits \n\t coast\u{200b} "), "Storm hits coast");
/// assert_eq!(normalize(""), "");
/// ```
pub fn normalize(text: &str) -> String {
    let spaced: String = text
        .chars()
        .filter(|c| !INVISIBLE.contains(c))
        .map(|c| match c {
            '\u{a0}' | '\u{200b}' => ' ',
            c if c.is_control() => ' ',
            c => c,
        })
        .collect();

    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize text that may be absent.
pub fn normalize_opt(text: Option<&str>) -> String {
    text.map(normalize).unwrap_or_default()
}

/// Turn a URL slug such as `uk-politics` into `Uk Politics`.
///
/// `-` and `_` become spaces; each run of letters starts upper-case and
/// continues lower-case.
pub fn title_case_slug(slug: &str) -> String {
    let spaced = slug.replace(['-', '_'], " ");
    let mut out = String::with_capacity(spaced.len());
    let mut prev_is_letter = false;
    for c in spaced.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    normalize(&out)
}
