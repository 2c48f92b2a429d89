//! Extension whitelist

use std::collections::HashSet;

/// Accepts or rejects filenames by their extension.
///
/// Matching is exact and case-sensitive: `photo.PNG` is rejected when only
/// `png` is configured.
#[derive(Debug, Clone)]
pub struct ExtensionValidator {
    allowed: HashSet<String>,
}

impl ExtensionValidator {
    pub fn new<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_allowed(&self, filename: &str) -> bool {
        self.allowed.contains(extension_of(filename))
    }
}

/// Everything after the last `.`. A name without a dot is its own extension.
pub fn extension_of(filename: &str) -> &str {
    filename.rsplit('.').next().unwrap_or(filename)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_ALLOWED_EXTENSIONS;

    fn validator() -> ExtensionValidator {
        ExtensionValidator::new(DEFAULT_ALLOWED_EXTENSIONS.iter().copied())
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("a.txt"), "txt");
        assert_eq!(extension_of("archive.tar.gz"), "gz");
        assert_eq!(extension_of("noext"), "noext");
        assert_eq!(extension_of("trailing."), "");
        assert_eq!(extension_of(".hidden"), "hidden");
        assert_eq!(extension_of(""), "");
    }

    #[test]
    fn test_allowed_extensions() {
        let v = validator();
        for name in [
            "file1.txt", "file2.pdf", "file3.png", "file4.mp4", "file5.mkv", "file6.gif",
            "file7.jpeg", "file8.jpg",
        ] {
            assert!(v.is_allowed(name), "{name} should be allowed");
        }
    }

    #[test]
    fn test_rejected_extensions() {
        let v = validator();
        assert!(!v.is_allowed("a.exe"));
        assert!(!v.is_allowed("test_invalid.extension"));
        assert!(!v.is_allowed("noext"));
        assert!(!v.is_allowed(""));
        assert!(!v.is_allowed("trailing."));
        assert!(!v.is_allowed("txt.exe"));
    }

    #[test]
    fn test_case_and_whitespace_are_significant() {
        let v = validator();
        assert!(!v.is_allowed("a.TXT"));
        assert!(!v.is_allowed("a.txt "));
    }

    #[test]
    fn test_dotless_name_matching_extension() {
        // A bare name equal to an allowed token is accepted.
        assert!(validator().is_allowed("txt"));
    }
}
