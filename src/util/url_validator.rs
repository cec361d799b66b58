use thiserror::Error;
use url::Url;

/// Reasons a candidate link is rejected before shortening.
///
/// The two variants are reported to the user with different notices, so
/// emptiness is always checked before the string is parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Nothing (or only whitespace) was entered.
    #[error("No URL entered")]
    Missing,
    /// The string is not an absolute URL with an authority.
    #[error("Not a valid absolute URL: {0}")]
    Invalid(String),
}

/// Validates a candidate link typed by the user.
///
/// Accepts any string that parses as an absolute URL with a `scheme://authority`
/// part. No reachability check is made and the scheme is not restricted, so
/// `ftp://files.example.com` is as acceptable as `https://example.com`.
///
/// # Errors
///
/// - [`InputError::Missing`] if the input is empty after trimming
/// - [`InputError::Invalid`] if parsing fails or the URL has no authority
///   (`mailto:someone@example.com`, `data:text/plain,hi`, `foo:/bar`)
///
/// # Examples
///
/// ```
/// use linklux::util::{validate_input, InputError};
///
/// let url = validate_input("https://example.com/a/b").unwrap();
/// assert_eq!(url.host_str(), Some("example.com"));
///
/// assert_eq!(validate_input("   "), Err(InputError::Missing));
/// assert!(matches!(validate_input("example"), Err(InputError::Invalid(_))));
/// ```
pub fn validate_input(input: &str) -> Result<Url, InputError> {
    if input.trim().is_empty() {
        return Err(InputError::Missing);
    }

    // The parser strips leading/trailing C0 controls and spaces itself.
    let url = Url::parse(input).map_err(|e| InputError::Invalid(e.to_string()))?;

    // `foo:/bar` has a base path but still no `//authority`.
    if url.cannot_be_a_base() || !url.has_authority() {
        return Err(InputError::Invalid(format!(
            "'{}:' URLs have no authority",
            url.scheme()
        )));
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_valid_urls() {
        assert!(validate_input("https://example.com/a/b").is_ok());
        assert!(validate_input("http://news.example.org").is_ok());
        assert!(validate_input("https://example.com:8443/path?q=1#frag").is_ok());
    }

    #[test]
    fn test_missing_input() {
        assert_eq!(validate_input(""), Err(InputError::Missing));
        assert_eq!(validate_input("   "), Err(InputError::Missing));
        assert_eq!(validate_input("\t\n"), Err(InputError::Missing));
    }

    #[test]
    fn test_missing_checked_before_parse() {
        // Whitespace would also fail to parse, but must be reported as missing.
        assert!(!matches!(validate_input(" "), Err(InputError::Invalid(_))));
    }

    #[test]
    fn test_relative_and_bare_strings_rejected() {
        assert!(matches!(validate_input("example"), Err(InputError::Invalid(_))));
        assert!(matches!(validate_input("example.com"), Err(InputError::Invalid(_))));
        assert!(matches!(validate_input("/a/b"), Err(InputError::Invalid(_))));
        assert!(matches!(validate_input("https://"), Err(InputError::Invalid(_))));
    }

    #[test]
    fn test_no_authority_rejected() {
        assert!(matches!(
            validate_input("mailto:someone@example.com"),
            Err(InputError::Invalid(_))
        ));
        assert!(matches!(
            validate_input("data:text/plain,hi"),
            Err(InputError::Invalid(_))
        ));
    }

    #[test]
    fn test_slash_path_without_authority_rejected() {
        for input in ["foo:/bar", "javascript:/alert(1)", "x:/", "urn:/a//b"] {
            assert!(
                matches!(validate_input(input), Err(InputError::Invalid(_))),
                "{input:?} was accepted"
            );
        }
        // Special schemes gain an authority while parsing
        assert_eq!(
            validate_input("http:/example.com").map(|u| u.host_str().map(str::to_owned)),
            Ok(Some("example.com".to_string()))
        );
    }

    #[test]
    fn test_surrounding_whitespace_accepted() {
        let url = validate_input("  https://example.com/x  ").unwrap();
        assert_eq!(url.as_str(), "https://example.com/x");
    }

    #[test]
    fn test_other_schemes_accepted() {
        assert!(validate_input("ftp://files.example.com/pub").is_ok());
        assert!(validate_input("file:///etc/hosts").is_ok());
    }

    proptest! {
        #[test]
        fn prop_whitespace_is_always_missing(s in "[ \t\r\n]{0,16}") {
            prop_assert_eq!(validate_input(&s), Err(InputError::Missing));
        }

        #[test]
        fn prop_https_host_paths_accepted(
            host in "[a-z]{1,12}\\.(com|org|io)",
            path in "(/[a-z0-9]{1,8}){0,4}",
        ) {
            let candidate = format!("https://{host}{path}");
            prop_assert!(validate_input(&candidate).is_ok());
        }

        #[test]
        fn prop_scheme_with_single_slash_rejected(
            scheme in "[a-z]{1,8}",
            path in "([a-z0-9][a-z0-9/]{0,11})?",
        ) {
            prop_assume!(!matches!(
                scheme.as_str(),
                "http" | "https" | "ws" | "wss" | "ftp" | "file"
            ));
            let candidate = format!("{scheme}:/{path}");
            prop_assert!(
                matches!(validate_input(&candidate), Err(InputError::Invalid(_))),
                "{} was accepted", candidate
            );
        }

        #[test]
        fn prop_bare_words_rejected(word in "[a-z]{1,20}") {
            prop_assert!(matches!(validate_input(&word), Err(InputError::Invalid(_))));
        }
    }
}
