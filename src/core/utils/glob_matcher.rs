use regex::Regex;

/// Check if a pattern contains wildcards.
pub fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*')
}

/// A protected-key pattern such as `validation.*`.
///
/// `*` matches any run of characters, dots included, and the pattern is
/// anchored at both ends: `validation.*` matches `validation.nested.deep` but
/// not `myvalidation.x` or `validations.x`. Every other character is literal.
#[derive(Debug, Clone)]
pub struct ExclusionPattern {
    source: String,
    regex: Regex,
}

impl ExclusionPattern {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let body = pattern
            .split('*')
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(".*");
        Ok(Self {
            source: pattern.to_string(),
            regex: Regex::new(&format!("^{}$", body))?,
        })
    }

    pub fn matches(&self, key: &str) -> bool {
        if !is_glob_pattern(&self.source) {
            return self.source == key;
        }
        self.regex.is_match(key)
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

/// Whether `key` is protected by any of `patterns`.
pub fn matches_any(patterns: &[ExclusionPattern], key: &str) -> bool {
    patterns.iter().any(|p| p.matches(key))
}
