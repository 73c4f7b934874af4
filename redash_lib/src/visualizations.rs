//! Visualization accessors.
//!
//! There is no read-by-id endpoint; lookups go through the owning query.

use crate::client::{item_path, Client};
use crate::error::Error;
use crate::models::{Query, Visualization};
use crate::queries::QUERIES_PATH;

pub const VISUALIZATIONS_PATH: &str = "/api/visualizations";

impl Client {
    /// Fetch query `query_id` and return its embedded visualization `id`.
    ///
    /// `Ok(None)` when the query has no visualization with that id.
    pub async fn get_visualization(
        &self,
        query_id: u64,
        id: u64,
    ) -> Result<Option<Visualization>, Error> {
        let query: Query = self.fetch(&item_path(QUERIES_PATH, query_id)).await?;
        Ok(query.visualization(id).cloned())
    }

    pub async fn create_visualization(
        &self,
        payload: &Visualization,
    ) -> Result<Visualization, Error> {
        self.submit(VISUALIZATIONS_PATH, payload).await
    }

    pub async fn update_visualization(
        &self,
        id: u64,
        payload: &Visualization,
    ) -> Result<Visualization, Error> {
        self.submit(&item_path(VISUALIZATIONS_PATH, id), payload).await
    }

    pub async fn delete_visualization(&self, id: u64) -> Result<(), Error> {
        self.remove(&item_path(VISUALIZATIONS_PATH, id)).await
    }
}
