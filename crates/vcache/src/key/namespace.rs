//! Namespace prefixing of encoded keys.

/// Separator placed between a namespace and the encoded key.
pub const SEPARATOR: char = '.';

/// Builds the final store key.
///
/// An empty namespace leaves `encoded` untouched. Neither part is escaped, so
/// a namespace that itself contains `.` can collide with another
/// `(namespace, key)` pair.
#[must_use]
pub fn compose(namespace: &str, encoded: &str) -> String {
    if namespace.is_empty() {
        return encoded.to_string();
    }

    let mut key = String::with_capacity(namespace.len() + 1 + encoded.len());
    key.push_str(namespace);
    key.push(SEPARATOR);
    key.push_str(encoded);
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_namespace() {
        assert_eq!(compose("", "abc"), "abc");
    }

    #[test]
    fn test_with_namespace() {
        assert_eq!(compose("ns", "abc"), "ns.abc");
        assert_eq!(
            compose("myprefix", "5d41402abc4b2a76b9719d911017c592"),
            "myprefix.5d41402abc4b2a76b9719d911017c592"
        );
    }

    #[test]
    fn test_separator_is_not_escaped() {
        assert_eq!(compose("a.b", "c"), compose("a", "b.c"));
    }
}
