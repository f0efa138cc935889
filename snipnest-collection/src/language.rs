//! Language display lookup.
//!
//! The `language` field on a snippet is free text; the UI keys its icon,
//! display name and syntax-highlighter identifier off it case-insensitively,
//! falling back to a generic text presentation for anything unknown.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Display metadata for a known language.
#[derive(Debug, Clone, Copy)]
pub struct LanguageInfo {
    pub display: &'static str,
    pub icon: &'static str,
    pub highlight: &'static str,
}

macro_rules! lang {
    ($display:literal, $icon:literal, $highlight:literal) => {
        LanguageInfo {
            display: $display,
            icon: $icon,
            highlight: $highlight,
        }
    };
}

static LANGUAGES: Lazy<HashMap<&'static str, LanguageInfo>> = Lazy::new(|| {
    HashMap::from([
        ("python", lang!("Python", "PY", "python")),
        ("javascript", lang!("JavaScript", "JS", "javascript")),
        ("html", lang!("HTML", "HTML", "markup")),
        ("css", lang!("CSS", "CSS", "css")),
        ("java", lang!("Java", "JAVA", "java")),
        ("c", lang!("C", "C", "c")),
        ("c++", lang!("C++", "C++", "cpp")),
        ("cpp", lang!("C++", "C++", "cpp")),
        ("c#", lang!("C#", "C#", "csharp")),
    ])
});

/// Language keys offered by the create/edit form.
pub const LANGUAGE_OPTIONS: &[&str] = &[
    "python",
    "javascript",
    "html",
    "css",
    "java",
    "c",
    "c++",
    "c#",
];

pub fn language_info(language: &str) -> Option<&'static LanguageInfo> {
    LANGUAGES.get(language.trim().to_lowercase().as_str())
}

/// Display name for a language: the known table entry, or the raw value with
/// its first letter capitalized.
pub fn display_name(language: &str) -> String {
    if let Some(info) = language_info(language) {
        return info.display.to_string();
    }
    let trimmed = language.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Short label shown where the upstream UI shows a language icon.
pub fn icon_label(language: &str) -> &'static str {
    language_info(language).map(|i| i.icon).unwrap_or("TXT")
}

/// Identifier handed to the syntax highlighter.
pub fn highlight_name(language: &str) -> &'static str {
    language_info(language).map(|i| i.highlight).unwrap_or("text")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_language_lookup() {
        assert_eq!(display_name("javascript"), "JavaScript");
        assert_eq!(icon_label("python"), "PY");
        assert_eq!(highlight_name("html"), "markup");
        assert_eq!(highlight_name("c#"), "csharp");
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(display_name("PYTHON"), "Python");
        assert_eq!(icon_label(" Css "), "CSS");
    }

    #[test]
    fn test_cpp_aliases_agree() {
        assert_eq!(display_name("cpp"), display_name("c++"));
        assert_eq!(highlight_name("cpp"), "cpp");
    }

    #[test]
    fn test_unknown_language_fallbacks() {
        assert_eq!(display_name("rust"), "Rust");
        assert_eq!(icon_label("rust"), "TXT");
        assert_eq!(highlight_name("rust"), "text");
        assert_eq!(display_name(""), "");
    }
}
