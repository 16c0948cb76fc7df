use crate::dataset_loader::DatasetLoader;
use crate::errors::SparqlyError;
use crate::normalizer::normalize;
use crate::query_text::{QueryTextAnalyzer, RegexQueryTextAnalyzer};
use crate::source::{Source, SourceClassifier};
use log::{debug, info};
use sparql_database::embedded_oxigraph::EmbeddedOxigraphConfig;
use sparql_database::endpoint::EndpointRegistry;
use sparql_database::results::ResultSet;
use sparql_database::SparqlQueryable;
use std::sync::Arc;
use url::Url;

#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Base IRI for relative IRIs in queries against local files.
    pub base_iri: Option<String>,
    pub union_default_graph: bool,
}

impl EngineConfig {
    /// Relative graph references resolve against the current working directory.
    pub fn for_working_directory(union_default_graph: bool) -> EngineConfig {
        let base_iri = std::env::current_dir()
            .ok()
            .and_then(|dir| Url::from_directory_path(dir).ok())
            .map(String::from);
        EngineConfig {
            base_iri,
            union_default_graph,
        }
    }
}

/// Routes a query to a remote endpoint or to a dataset built from local files and rewrites
/// the IRIs of the answer to the prefixes the query declares.
pub struct Engine {
    analyzer: Arc<dyn QueryTextAnalyzer>,
    classifier: SourceClassifier,
    endpoints: EndpointRegistry,
    config: EngineConfig,
}

impl Engine {
    pub fn new(
        analyzer: Arc<dyn QueryTextAnalyzer>,
        classifier: SourceClassifier,
        endpoints: EndpointRegistry,
        config: EngineConfig,
    ) -> Engine {
        Engine {
            analyzer,
            classifier,
            endpoints,
            config,
        }
    }

    pub fn from_config(config: EngineConfig) -> Result<Engine, SparqlyError> {
        Ok(Engine::new(
            Arc::new(RegexQueryTextAnalyzer::new()?),
            SourceClassifier::new()?,
            EndpointRegistry::new(),
            config,
        ))
    }

    pub fn endpoints(&self) -> &EndpointRegistry {
        &self.endpoints
    }

    pub fn classify(&self, sources: &[String]) -> Result<Source, SparqlyError> {
        self.classifier
            .classify(sources)
            .ok_or(SparqlyError::NoSourceDefined)
    }

    pub async fn query(
        &mut self,
        sources: &[String],
        query: &str,
    ) -> Result<ResultSet, SparqlyError> {
        let source = self.classify(sources)?;
        debug!("Classified sources {:?} as {:?}", sources, source);
        let mut results = match source {
            Source::RemoteEndpoint(endpoint) => {
                info!("Querying endpoint {}", endpoint);
                self.endpoints.execute(&endpoint, query).await?
            }
            Source::LocalFiles(file_paths) => {
                info!("Querying {} local source(s)", file_paths.len());
                let loader = DatasetLoader::new(
                    self.analyzer.as_ref(),
                    EmbeddedOxigraphConfig {
                        base_iri: self.config.base_iri.clone(),
                        union_default_graph: self.config.union_default_graph,
                    },
                );
                let dataset = loader.load(&file_paths, query).await?;
                debug!("Dataset holds {} quads", dataset.len()?);
                dataset.execute(query).await?
            }
        };

        let prefixes = self.analyzer.extract_prefixes(query);
        debug!("Prefixes declared in query: {:?}", prefixes);
        if let Some(bindings) = results.bindings_mut() {
            let rewritten = normalize(bindings, &prefixes);
            debug!("Rewrote {} IRIs to prefixed names", rewritten);
        }
        Ok(results)
    }
}
