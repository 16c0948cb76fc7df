use crate::query_text::QueryTextAnalyzer;
use log::debug;
use sparql_database::documents::DocumentLocation;
use sparql_database::embedded_oxigraph::{
    EmbeddedOxigraph, EmbeddedOxigraphConfig, EmbeddedOxigraphError,
};
use std::path::Path;

/// Assembles a fresh in-memory dataset for one query.
pub struct DatasetLoader<'a> {
    analyzer: &'a dyn QueryTextAnalyzer,
    config: EmbeddedOxigraphConfig,
}

impl<'a> DatasetLoader<'a> {
    pub fn new(analyzer: &'a dyn QueryTextAnalyzer, config: EmbeddedOxigraphConfig) -> Self {
        DatasetLoader { analyzer, config }
    }

    /// Files given as sources and documents referenced with `FROM` go to the default graph,
    /// each `FROM NAMED` document to a graph of its own.
    ///
    /// Source files that do not exist are skipped. Documents referenced from the query are
    /// always read, and any read or parse failure aborts the load.
    pub async fn load(
        &self,
        file_paths: &[String],
        query: &str,
    ) -> Result<EmbeddedOxigraph, EmbeddedOxigraphError> {
        let mut dataset = EmbeddedOxigraph::new(self.config.clone())?;

        for file_path in file_paths {
            let path = Path::new(file_path);
            if path.exists() {
                dataset
                    .load_default_graph(&DocumentLocation::File(path.to_path_buf()))
                    .await?;
            } else {
                debug!("Skipping missing source file {}", file_path);
            }
        }

        for graph in self.analyzer.extract_from_graphs(query) {
            dataset
                .load_default_graph(&DocumentLocation::parse(&graph))
                .await?;
        }

        for graph in self.analyzer.extract_from_named_graphs(query) {
            let graph_name = dataset.load_named_graph(&graph).await?;
            debug!("Named graph {} loaded from {}", graph_name, graph);
        }

        Ok(dataset)
    }
}
