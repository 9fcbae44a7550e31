//! Line normalization for navigation entries.

/// Quote characters stripped from every navigation value.
const QUOTES: [char; 2] = ['\'', '"'];

/// Normalize a raw line fragment.
///
/// Removes the first occurrence of `key` (for example `"site_name:"` or `"-"`),
/// drops every single and double quote, and trims surrounding whitespace.
/// An empty or unmatched `key` leaves the text unchanged apart from quote
/// removal and trimming. Since every quote is removed, the result never ends
/// in a quote, so no separate trailing-quote cleanup is needed.
///
/// # Example
///
/// ```
/// use docmap_core::normalize;
///
/// assert_eq!(normalize("site_name: 'My Guide'", "site_name:"), "My Guide");
/// assert_eq!(normalize("- \"Guide\"", "-"), "Guide");
/// ```
#[must_use]
pub fn normalize(text: &str, key: &str) -> String {
    let stripped = text.replacen(key, "", 1);
    let unquoted: String = stripped.chars().filter(|c| !QUOTES.contains(c)).collect();
    unquoted.trim().to_owned()
}
