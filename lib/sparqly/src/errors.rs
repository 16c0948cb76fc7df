use sparql_database::embedded_oxigraph::EmbeddedOxigraphError;
use sparql_database::SparqlQueryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SparqlyError {
    #[error("No source given, expected a SPARQL endpoint or RDF files")]
    NoSourceDefined,
    #[error("Invalid pattern `{0}`")]
    InvalidPattern(#[from] regex::Error),
    #[error(transparent)]
    EmbeddedOxigraphError(#[from] EmbeddedOxigraphError),
    #[error(transparent)]
    SparqlQueryError(#[from] SparqlQueryError),
    #[error("Error writing results `{0}`")]
    RenderError(#[from] std::io::Error),
}
