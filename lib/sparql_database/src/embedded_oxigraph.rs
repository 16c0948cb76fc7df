use super::documents::{DocumentError, DocumentLocation};
use super::results::ResultSet;
use super::{parse_json_text, SparqlQueryError, SparqlQueryable};
use async_trait::async_trait;
use log::debug;
use oxigraph::io::RdfParser;
use oxigraph::model::{GraphName, NamedNode};
use oxigraph::sparql::results::QueryResultsFormat;
use oxigraph::sparql::{EvaluationError, Query, QueryResults, SparqlSyntaxError};
use oxigraph::store::{LoaderError, StorageError, Store};
use oxiri::Iri;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmbeddedOxigraphError {
    #[error("Error opening oxigraph storage `{0}`")]
    OpenStorageError(StorageError),
    #[error("Oxigraph storage error `{0}`")]
    StorageError(StorageError),
    #[error(transparent)]
    DocumentError(#[from] DocumentError),
    #[error("Error loading RDF document `{location}`: {source}")]
    LoaderError {
        location: String,
        source: LoaderError,
    },
    #[error("Invalid base IRI `{0}`")]
    InvalidBaseIri(String),
    #[error("Invalid graph name `{0}`")]
    InvalidGraphName(String),
    #[error("Query parse error `{0}`")]
    QueryParseError(SparqlSyntaxError),
    #[error("Oxigraph evaluation error `{0}`")]
    EvaluationError(EvaluationError),
    #[error("Wrong result type, expected solutions or a boolean")]
    WrongResultType,
    #[error("Results serialization error `{0}`")]
    ResultsSerializationError(serde_json::Error),
}

#[derive(Debug, Clone, Default)]
pub struct EmbeddedOxigraphConfig {
    /// Base IRI used to resolve relative IRIs in queries and in graph references.
    pub base_iri: Option<String>,
    /// Answer queries with the union of all graphs as the default graph.
    pub union_default_graph: bool,
}

/// An in-memory dataset assembled from RDF documents, queried with Oxigraph.
pub struct EmbeddedOxigraph {
    pub store: Store,
    config: EmbeddedOxigraphConfig,
    named_graphs: Vec<NamedNode>,
    client: reqwest::Client,
}

#[async_trait]
impl SparqlQueryable for EmbeddedOxigraph {
    async fn execute(&self, query: &str) -> Result<ResultSet, SparqlQueryError> {
        let mut query = Query::parse(query, self.config.base_iri.as_deref())
            .map_err(EmbeddedOxigraphError::QueryParseError)?;
        // FROM clauses were loaded into the store's own default graph
        if self.config.union_default_graph {
            query.dataset_mut().set_default_graph_as_union();
        } else {
            query
                .dataset_mut()
                .set_default_graph(vec![GraphName::DefaultGraph]);
        }
        let results = self
            .store
            .query(query)
            .map_err(EmbeddedOxigraphError::EvaluationError)?;
        if let QueryResults::Graph(_) = results {
            return Err(EmbeddedOxigraphError::WrongResultType.into());
        }
        let json = results
            .write(Vec::new(), QueryResultsFormat::Json)
            .map_err(EmbeddedOxigraphError::EvaluationError)?;
        Ok(parse_json_text(&json).map_err(EmbeddedOxigraphError::ResultsSerializationError)?)
    }
}

impl EmbeddedOxigraph {
    pub fn new(config: EmbeddedOxigraphConfig) -> Result<EmbeddedOxigraph, EmbeddedOxigraphError> {
        if let Some(base_iri) = &config.base_iri {
            Iri::parse(base_iri.as_str())
                .map_err(|x| EmbeddedOxigraphError::InvalidBaseIri(x.to_string()))?;
        }
        let store = Store::new().map_err(EmbeddedOxigraphError::OpenStorageError)?;
        Ok(EmbeddedOxigraph {
            store,
            config,
            named_graphs: vec![],
            client: reqwest::Client::new(),
        })
    }

    /// Number of quads in the dataset, all graphs included.
    pub fn len(&self) -> Result<usize, EmbeddedOxigraphError> {
        self.store.len().map_err(EmbeddedOxigraphError::StorageError)
    }

    pub fn is_empty(&self) -> Result<bool, EmbeddedOxigraphError> {
        self.store
            .is_empty()
            .map_err(EmbeddedOxigraphError::StorageError)
    }

    pub fn named_graphs(&self) -> &[NamedNode] {
        &self.named_graphs
    }

    /// Parses the document into the default graph.
    pub async fn load_default_graph(
        &mut self,
        location: &DocumentLocation,
    ) -> Result<(), EmbeddedOxigraphError> {
        self.load_into(location, GraphName::DefaultGraph).await
    }

    /// Parses the document into a graph named after the (resolved) reference.
    pub async fn load_named_graph(
        &mut self,
        reference: &str,
    ) -> Result<NamedNode, EmbeddedOxigraphError> {
        let graph_name = self.resolve_graph_name(reference)?;
        let location = DocumentLocation::parse(reference);
        self.load_into(&location, graph_name.clone().into()).await?;
        if !self.named_graphs.contains(&graph_name) {
            self.named_graphs.push(graph_name.clone());
        }
        Ok(graph_name)
    }

    /// The IRI a query referring to `reference` will see, given the configured base IRI.
    pub fn resolve_graph_name(&self, reference: &str) -> Result<NamedNode, EmbeddedOxigraphError> {
        let iri = if let Some(base_iri) = &self.config.base_iri {
            Iri::parse(base_iri.as_str())
                .and_then(|base| base.resolve(reference))
                .map_err(|x| EmbeddedOxigraphError::InvalidGraphName(format!("{reference}: {x}")))?
                .into_inner()
        } else {
            reference.to_string()
        };
        NamedNode::new(iri)
            .map_err(|x| EmbeddedOxigraphError::InvalidGraphName(format!("{reference}: {x}")))
    }

    async fn load_into(
        &mut self,
        location: &DocumentLocation,
        graph_name: GraphName,
    ) -> Result<(), EmbeddedOxigraphError> {
        let document = location.read(&self.client).await?;
        let mut parser =
            RdfParser::from_format(document.format).with_default_graph(graph_name.clone());
        if let Some(base_iri) = &document.base_iri {
            parser = parser
                .with_base_iri(base_iri)
                .map_err(|x| EmbeddedOxigraphError::InvalidBaseIri(x.to_string()))?;
        }
        self.store
            .load_from_reader(parser, document.content.as_slice())
            .map_err(|source| EmbeddedOxigraphError::LoaderError {
                location: location.to_string(),
                source,
            })?;
        debug!("Loaded {} into {}", location, graph_name);
        Ok(())
    }
}
