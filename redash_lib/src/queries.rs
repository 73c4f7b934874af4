//! Query accessors.

use crate::client::{item_path, search_path, Client};
use crate::error::Error;
use crate::models::{Page, Query};

pub const QUERIES_PATH: &str = "/api/queries";

impl Client {
    /// List one page of queries.
    pub async fn list_queries(&self) -> Result<Page<Query>, Error> {
        self.fetch(QUERIES_PATH).await
    }

    /// Queries whose name or text matches `term`.
    pub async fn search_queries(&self, term: &str) -> Result<Page<Query>, Error> {
        self.fetch(&search_path(QUERIES_PATH, term)).await
    }

    /// Fetch a query including its embedded visualizations.
    pub async fn get_query(&self, id: u64) -> Result<Query, Error> {
        self.fetch(&item_path(QUERIES_PATH, id)).await
    }

    /// Create a query; the returned record carries the assigned id and timestamps.
    pub async fn create_query(&self, payload: &Query) -> Result<Query, Error> {
        self.submit(QUERIES_PATH, payload).await
    }

    /// Update a query. Set `version` to the stored one or leave it at 0 to skip the check.
    pub async fn update_query(&self, id: u64, payload: &Query) -> Result<Query, Error> {
        self.submit(&item_path(QUERIES_PATH, id), payload).await
    }

    pub async fn delete_query(&self, id: u64) -> Result<(), Error> {
        self.remove(&item_path(QUERIES_PATH, id)).await
    }

    pub async fn favorite_query(&self, id: u64) -> Result<(), Error> {
        self.touch(&favorite_path(id)).await
    }

    pub async fn unfavorite_query(&self, id: u64) -> Result<(), Error> {
        self.remove(&favorite_path(id)).await
    }
}

fn favorite_path(id: u64) -> String {
    format!("{}/favorite", item_path(QUERIES_PATH, id))
}
