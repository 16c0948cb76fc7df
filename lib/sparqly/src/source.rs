use regex::Regex;

const ENDPOINT_PATTERN: &str = r"^(https?://)[^\s/$.?#].[^\s]*$";

/// What a query is run against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    RemoteEndpoint(String),
    LocalFiles(Vec<String>),
}

/// Decides between a remote endpoint and local files by looking at the first source only.
pub struct SourceClassifier {
    endpoint_pattern: Regex,
}

impl SourceClassifier {
    pub fn new() -> Result<SourceClassifier, regex::Error> {
        Ok(SourceClassifier {
            endpoint_pattern: Regex::new(ENDPOINT_PATTERN)?,
        })
    }

    pub fn is_endpoint(&self, source: &str) -> bool {
        self.endpoint_pattern.is_match(source)
    }

    /// `None` for an empty source list. Sources after an endpoint URL are ignored.
    pub fn classify(&self, sources: &[String]) -> Option<Source> {
        let first = sources.first()?;
        if self.is_endpoint(first) {
            Some(Source::RemoteEndpoint(first.clone()))
        } else {
            Some(Source::LocalFiles(sources.to_vec()))
        }
    }
}
