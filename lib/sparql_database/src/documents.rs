use log::debug;
use oxigraph::io::RdfFormat;
use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use std::ffi::OsStr;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

const RDF_ACCEPT: &str = "text/turtle,application/n-triples;q=0.9,application/rdf+xml;q=0.9,application/n-quads;q=0.8,application/trig;q=0.8,*/*;q=0.1";

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Error reading RDF file `{path}`: {source}")]
    ReadFileError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    RequestError(reqwest::Error),
    #[error("Bad status code `{status}` fetching `{url}`")]
    BadStatusCode { url: Url, status: String },
}

/// Where an RDF document is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentLocation {
    File(PathBuf),
    Http(Url),
}

/// The raw bytes of a document together with what is needed to parse them.
pub struct RdfDocument {
    pub format: RdfFormat,
    pub base_iri: Option<String>,
    pub content: Vec<u8>,
}

impl DocumentLocation {
    /// Interprets a graph reference found in a query or on the command line.
    ///
    /// `http(s)://` references are fetched, `file://` IRIs and everything else are paths.
    pub fn parse(location: &str) -> DocumentLocation {
        if location.starts_with("http://") || location.starts_with("https://") {
            if let Ok(url) = Url::parse(location) {
                return DocumentLocation::Http(url);
            }
        }
        if let Some(stripped) = location.strip_prefix("file://") {
            let path = Url::parse(location)
                .ok()
                .and_then(|u| u.to_file_path().ok())
                .unwrap_or_else(|| PathBuf::from(stripped));
            return DocumentLocation::File(path);
        }
        DocumentLocation::File(PathBuf::from(location))
    }

    pub async fn read(&self, client: &reqwest::Client) -> Result<RdfDocument, DocumentError> {
        match self {
            DocumentLocation::File(path) => read_file(path),
            DocumentLocation::Http(url) => fetch_url(client, url).await,
        }
    }
}

impl Display for DocumentLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentLocation::File(path) => write!(f, "{}", path.display()),
            DocumentLocation::Http(url) => write!(f, "{}", url),
        }
    }
}

fn read_file(path: &Path) -> Result<RdfDocument, DocumentError> {
    let format = rdf_format_from_path(path).unwrap_or_else(|| {
        debug!("No RDF format known for {}, reading it as Turtle", path.display());
        RdfFormat::Turtle
    });
    let content = fs::read(path).map_err(|source| DocumentError::ReadFileError {
        path: path.to_path_buf(),
        source,
    })?;
    let base_iri = fs::canonicalize(path)
        .ok()
        .and_then(|p| Url::from_file_path(p).ok())
        .map(String::from);
    debug!("Read {} bytes of {:?} from {}", content.len(), format, path.display());
    Ok(RdfDocument {
        format,
        base_iri,
        content,
    })
}

async fn fetch_url(client: &reqwest::Client, url: &Url) -> Result<RdfDocument, DocumentError> {
    let response = client
        .get(url.clone())
        .header(ACCEPT, RDF_ACCEPT)
        .header(USER_AGENT, "sparqly")
        .send()
        .await
        .map_err(DocumentError::RequestError)?;
    if !response.status().is_success() {
        return Err(DocumentError::BadStatusCode {
            url: url.clone(),
            status: response.status().to_string(),
        });
    }
    let from_media_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .and_then(|v| RdfFormat::from_media_type(v.trim()));
    let format = from_media_type
        .or_else(|| rdf_format_from_path(Path::new(url.path())))
        .unwrap_or_else(|| {
            debug!("No RDF format known for {}, reading it as Turtle", url);
            RdfFormat::Turtle
        });
    let content = response
        .bytes()
        .await
        .map_err(DocumentError::RequestError)?
        .to_vec();
    debug!("Fetched {} bytes of {:?} from {}", content.len(), format, url);
    Ok(RdfDocument {
        format,
        base_iri: Some(url.to_string()),
        content,
    })
}

fn rdf_format_from_path(path: &Path) -> Option<RdfFormat> {
    path.extension()
        .and_then(OsStr::to_str)
        .and_then(rdf_format_from_extension)
}

pub fn rdf_format_from_extension(extension: &str) -> Option<RdfFormat> {
    match extension.to_ascii_lowercase().as_str() {
        "xml" | "owl" => Some(RdfFormat::RdfXml),
        other => RdfFormat::from_extension(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_kinds() {
        assert_eq!(
            DocumentLocation::parse("https://example.org/data.ttl"),
            DocumentLocation::Http(Url::parse("https://example.org/data.ttl").unwrap())
        );
        assert_eq!(
            DocumentLocation::parse("data/people.ttl"),
            DocumentLocation::File(PathBuf::from("data/people.ttl"))
        );
        assert_eq!(
            DocumentLocation::parse("file:///tmp/people.ttl"),
            DocumentLocation::File(PathBuf::from("/tmp/people.ttl"))
        );
    }

    #[test]
    fn test_formats_from_extension() {
        assert_eq!(rdf_format_from_extension("ttl"), Some(RdfFormat::Turtle));
        assert_eq!(rdf_format_from_extension("NT"), Some(RdfFormat::NTriples));
        assert_eq!(rdf_format_from_extension("owl"), Some(RdfFormat::RdfXml));
        assert_eq!(rdf_format_from_extension("rdf"), Some(RdfFormat::RdfXml));
        assert_eq!(rdf_format_from_extension("csv"), None);
    }

    #[test]
    fn test_unknown_extension_reads_as_turtle() {
        let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        path.push("tests");
        path.push("testdata");
        path.push("people");
        let document = read_file(&path).unwrap();
        assert_eq!(document.format, RdfFormat::Turtle);
        assert!(document.base_iri.is_some_and(|iri| iri.starts_with("file://")));
        assert_eq!(rdf_format_from_path(Path::new("dump.txt")), None);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let location = DocumentLocation::parse("does/not/exist.ttl");
        let DocumentLocation::File(path) = location else {
            panic!("expected a file location");
        };
        assert!(matches!(
            read_file(&path),
            Err(DocumentError::ReadFileError { .. })
        ));
    }
}
