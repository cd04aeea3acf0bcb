/// Finds the value of a named cookie in a collection of `Set-Cookie` header
/// values.
///
/// Matches the first header that begins with `{name}=` (case-sensitive) and
/// returns the value up to the first `;`. Headers carrying other cookie names
/// are skipped; absence is `None`, never an error — callers decide whether a
/// missing cookie is fatal.
pub fn extract_cookie_value<'a, I>(headers: I, name: &str) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    for header in headers {
        if let Some(value) = header.strip_prefix(name).and_then(|s| s.strip_prefix('=')) {
            let end = value.find(';').unwrap_or(value.len());
            return Some(&value[..end]);
        }
    }
    None
}
