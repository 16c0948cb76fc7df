//! Lightweight inspection of raw query text.
//!
//! Prefixes and dataset clauses are found with regular expressions instead of a SPARQL parser,
//! so queries meant for endpoints with non-standard extensions can still be inspected.

use indexmap::IndexMap;
use regex::{Regex, RegexBuilder};

/// Prefix token to namespace IRI, in order of first declaration.
pub type PrefixMap = IndexMap<String, String>;

pub trait QueryTextAnalyzer: Send + Sync {
    /// `PREFIX token: <iri>` declarations. A redeclared token keeps its position and takes the
    /// later IRI.
    fn extract_prefixes(&self, query: &str) -> PrefixMap;
    /// `FROM <iri>` references in order of appearance, duplicates included.
    fn extract_from_graphs(&self, query: &str) -> Vec<String>;
    /// `FROM NAMED <iri>` references in order of appearance, duplicates included.
    fn extract_from_named_graphs(&self, query: &str) -> Vec<String>;
}

pub struct RegexQueryTextAnalyzer {
    prefix: Regex,
    from: Regex,
    from_named: Regex,
}

impl RegexQueryTextAnalyzer {
    pub fn new() -> Result<RegexQueryTextAnalyzer, regex::Error> {
        Ok(RegexQueryTextAnalyzer {
            prefix: case_insensitive(r"PREFIX\s+([a-z0-9_#-]+):\s+<([^>]+)>")?,
            // Only whitespace may sit between FROM and `<`, so FROM NAMED never matches here.
            from: case_insensitive(r"FROM\s*<([^>]+)>")?,
            from_named: case_insensitive(r"FROM NAMED\s*<([^>]+)>")?,
        })
    }
}

impl QueryTextAnalyzer for RegexQueryTextAnalyzer {
    fn extract_prefixes(&self, query: &str) -> PrefixMap {
        let mut prefixes = PrefixMap::new();
        for captures in self.prefix.captures_iter(query) {
            prefixes.insert(captures[1].to_string(), captures[2].to_string());
        }
        prefixes
    }

    fn extract_from_graphs(&self, query: &str) -> Vec<String> {
        first_groups(&self.from, query)
    }

    fn extract_from_named_graphs(&self, query: &str) -> Vec<String> {
        first_groups(&self.from_named, query)
    }
}

fn case_insensitive(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .multi_line(true)
        .build()
}

fn first_groups(regex: &Regex, query: &str) -> Vec<String> {
    regex
        .captures_iter(query)
        .map(|c| c[1].to_string())
        .collect()
}
