pub mod documents;
pub mod embedded_oxigraph;
pub mod endpoint;
pub mod results;

use async_trait::async_trait;
use embedded_oxigraph::EmbeddedOxigraphError;
use endpoint::SparqlEndpointQueryExecutionError;
use results::ResultSet;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SparqlQueryError {
    #[error(transparent)]
    EmbeddedOxigraphError(#[from] EmbeddedOxigraphError),
    #[error(transparent)]
    SparqlEndpointQueryExecutionError(#[from] SparqlEndpointQueryExecutionError),
}

/// Something a SPARQL query can be sent to, answering with a SPARQL JSON results document.
#[async_trait]
pub trait SparqlQueryable: Send + Sync {
    async fn execute(&self, query: &str) -> Result<ResultSet, SparqlQueryError>;
}

fn parse_json_text(text: &[u8]) -> Result<ResultSet, serde_json::Error> {
    serde_json::from_slice(text)
}
