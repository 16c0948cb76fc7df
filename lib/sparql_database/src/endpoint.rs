use super::results::ResultSet;
use super::{parse_json_text, SparqlQueryError, SparqlQueryable};
use async_trait::async_trait;
use log::debug;
use reqwest::header::{ACCEPT, USER_AGENT};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SparqlEndpointQueryExecutionError {
    #[error(transparent)]
    RequestError(reqwest::Error),
    #[error("Bad status code `{0}`")]
    BadStatusCode(String),
    #[error("Results parse error `{0}`")]
    ResultsParseError(serde_json::Error),
}

/// A remote SPARQL protocol endpoint. Building one does not touch the network.
pub struct SparqlEndpoint {
    pub endpoint: String,
    client: reqwest::Client,
}

impl SparqlEndpoint {
    pub fn new(endpoint: &str) -> SparqlEndpoint {
        SparqlEndpoint {
            endpoint: endpoint.to_string(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl SparqlQueryable for SparqlEndpoint {
    async fn execute(&self, query: &str) -> Result<ResultSet, SparqlQueryError> {
        let response = self
            .client
            .get(&self.endpoint)
            .header(ACCEPT, "application/sparql-results+json,application/json,text/javascript,application/javascript")
            .header(USER_AGENT, "sparqly")
            .query(&[("query", query)])
            .query(&[("format", "json"), ("output", "json"), ("results", "json")])
            .send()
            .await;
        match response {
            Ok(proper_response) => {
                if !proper_response.status().is_success() {
                    Err(SparqlEndpointQueryExecutionError::BadStatusCode(
                        proper_response.status().to_string(),
                    )
                    .into())
                } else {
                    let body = proper_response
                        .bytes()
                        .await
                        .map_err(SparqlEndpointQueryExecutionError::RequestError)?;
                    Ok(parse_json_text(&body)
                        .map_err(SparqlEndpointQueryExecutionError::ResultsParseError)?)
                }
            }
            Err(error) => Err(SparqlEndpointQueryExecutionError::RequestError(error).into()),
        }
    }
}

/// Keeps one [`SparqlEndpoint`] per endpoint URL for as long as the registry lives.
#[derive(Default)]
pub struct EndpointRegistry {
    endpoints: HashMap<String, Arc<SparqlEndpoint>>,
}

impl EndpointRegistry {
    pub fn new() -> EndpointRegistry {
        EndpointRegistry::default()
    }

    pub fn get_client(&mut self, endpoint: &str) -> Arc<SparqlEndpoint> {
        self.endpoints
            .entry(endpoint.to_string())
            .or_insert_with(|| {
                debug!("Creating client for endpoint {}", endpoint);
                Arc::new(SparqlEndpoint::new(endpoint))
            })
            .clone()
    }

    pub async fn execute(
        &mut self,
        endpoint: &str,
        query: &str,
    ) -> Result<ResultSet, SparqlQueryError> {
        let client = self.get_client(endpoint);
        client.execute(query).await
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}
