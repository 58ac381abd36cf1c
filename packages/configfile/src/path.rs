//! Composite key utilities.
//!
//! Keys are colon-delimited paths such as `appSettings:owin:AutomaticAppStartup`.
//! A key attribute value may itself contain the delimiter; it then simply
//! nests one level deeper.

/// Delimiter between key segments.
pub const KEY_DELIMITER: &str = ":";

/// Join path segments with the key delimiter.
///
/// # Examples
/// ```
/// use configfile::path::combine;
///
/// assert_eq!(combine(["configNode", "nestedNode", "NestedKey"]), "configNode:nestedNode:NestedKey");
/// assert_eq!(combine(Vec::<&str>::new()), "");
/// ```
pub fn combine<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut key = String::new();
    for (i, segment) in segments.into_iter().enumerate() {
        if i > 0 {
            key.push_str(KEY_DELIMITER);
        }
        key.push_str(segment.as_ref());
    }
    key
}

/// Build the composite key for `name` under the ancestor `context` (root first).
///
/// # Examples
/// ```
/// use configfile::path::compose_key;
///
/// let context = vec!["a".to_string(), "b".to_string()];
/// assert_eq!(compose_key(&context, "X"), "a:b:X");
/// assert_eq!(compose_key(&[], "X"), "X");
/// ```
pub fn compose_key(context: &[String], name: &str) -> String {
    combine(context.iter().map(String::as_str).chain(std::iter::once(name)))
}

/// Last segment of a key.
///
/// # Examples
/// ```
/// use configfile::path::section_key;
///
/// assert_eq!(section_key("connectionStrings:DefaultConnection"), "DefaultConnection");
/// assert_eq!(section_key("root"), "root");
/// ```
pub fn section_key(path: &str) -> &str {
    path.rsplit_once(KEY_DELIMITER)
        .map_or(path, |(_, last)| last)
}

/// The segment directly below `parent` in `key`, if `key` lies under `parent`.
///
/// `parent` of `None` means the root. Prefix matching ignores ASCII case.
pub fn child_segment<'k>(key: &'k str, parent: Option<&str>) -> Option<&'k str> {
    let rest = match parent {
        None => key,
        Some(parent) => {
            let prefix_len = parent.len() + KEY_DELIMITER.len();
            if key.len() < prefix_len
                || !key.is_char_boundary(parent.len())
                || !key[..parent.len()].eq_ignore_ascii_case(parent)
                || !key[parent.len()..].starts_with(KEY_DELIMITER)
            {
                return None;
            }
            &key[prefix_len..]
        }
    };

    Some(rest.split_once(KEY_DELIMITER).map_or(rest, |(first, _)| first))
}
