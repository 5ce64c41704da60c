use regex::Regex;

/// Placeholder replaced by the regex-escaped failure marker.
pub const MARKER_PLACEHOLDER: &str = "{marker}";

/// An ordered list of capture patterns tried until one yields a value.
///
/// Each pattern must expose the wanted text as capture group 1. A match whose
/// capture is empty after trimming counts as a miss, so later patterns still
/// get their turn.
#[derive(Debug, Clone)]
pub struct PatternChain {
    patterns: Vec<Regex>,
}

impl PatternChain {
    pub fn compile(sources: &[String], marker: &str) -> Result<Self, regex::Error> {
        let escaped = regex::escape(marker);
        let patterns = sources
            .iter()
            .map(|src| Regex::new(&src.replace(MARKER_PLACEHOLDER, &escaped)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// First non-empty capture produced by any pattern, in pattern order.
    pub fn capture(&self, line: &str) -> Option<String> {
        self.patterns.iter().find_map(|re| {
            re.captures(line)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().trim())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        })
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(sources: &[&str]) -> PatternChain {
        let sources: Vec<String> = sources.iter().map(|s| s.to_string()).collect();
        PatternChain::compile(&sources, "AssertionError").unwrap()
    }

    #[test]
    fn test_first_pattern_wins() {
        let chain = chain(&[r"^a=(\w+)", r"^(\w+)"]);
        assert_eq!(chain.capture("a=first").as_deref(), Some("first"));
        assert_eq!(chain.capture("second").as_deref(), Some("second"));
    }

    #[test]
    fn test_empty_capture_falls_through() {
        let chain = chain(&[r"^x(\s*)$", r"^(x)"]);
        assert_eq!(chain.capture("x  ").as_deref(), Some("x"));
    }

    #[test]
    fn test_marker_placeholder_is_escaped() {
        let sources = vec![r"^{marker}\s+(.+)$".to_string()];
        let chain = PatternChain::compile(&sources, "Error.Kind").unwrap();
        assert_eq!(chain.capture("Error.Kind boom").as_deref(), Some("boom"));
        assert_eq!(chain.capture("ErrorXKind boom"), None);
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let sources = vec!["(unclosed".to_string()];
        assert!(PatternChain::compile(&sources, "AssertionError").is_err());
    }
}
