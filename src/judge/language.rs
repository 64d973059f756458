//! Supported languages and their judge service identifiers

/// Languages the platform accepts.
///
/// The mapping to service identifiers is closed: adding a language means
/// adding a variant here, never inferring an id from user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Python,
    Cpp,
    C,
    JavaScript,
    Java,
}

impl Language {
    /// Parse a user-supplied language name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "python" => Some(Self::Python),
            "cpp" | "c++" => Some(Self::Cpp),
            "c" => Some(Self::C),
            "javascript" => Some(Self::JavaScript),
            "java" => Some(Self::Java),
            _ => None,
        }
    }

    /// Numeric identifier the judge service expects
    pub fn service_id(&self) -> u32 {
        match self {
            Self::Python => 71,
            Self::Cpp => 54,
            Self::C => 50,
            Self::JavaScript => 63,
            Self::Java => 62,
        }
    }

    /// Canonical language name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::Cpp => "cpp",
            Self::C => "c",
            Self::JavaScript => "javascript",
            Self::Java => "java",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_names_parse() {
        assert_eq!(Language::from_name("python"), Some(Language::Python));
        assert_eq!(Language::from_name("c++"), Some(Language::Cpp));
        assert_eq!(Language::from_name("cpp"), Some(Language::Cpp));
        assert_eq!(Language::from_name("C"), Some(Language::C));
        assert_eq!(Language::from_name("JavaScript"), Some(Language::JavaScript));
        assert_eq!(Language::from_name("java"), Some(Language::Java));
    }

    #[test]
    fn test_unknown_names_rejected() {
        assert_eq!(Language::from_name("ruby"), None);
        assert_eq!(Language::from_name(""), None);
        assert_eq!(Language::from_name("python3"), None);
    }

    #[test]
    fn test_service_ids_are_distinct() {
        let ids = [
            Language::Python.service_id(),
            Language::Cpp.service_id(),
            Language::C.service_id(),
            Language::JavaScript.service_id(),
            Language::Java.service_id(),
        ];
        let mut deduped = ids.to_vec();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(deduped.len(), ids.len());
    }
}
