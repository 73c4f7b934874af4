//! Dashboard accessors.

use crate::client::{item_path, search_path, Client};
use crate::error::Error;
use crate::models::{Dashboard, Page};

pub const DASHBOARDS_PATH: &str = "/api/dashboards";

impl Client {
    /// List one page of dashboards.
    pub async fn list_dashboards(&self) -> Result<Page<Dashboard>, Error> {
        self.fetch(DASHBOARDS_PATH).await
    }

    /// Dashboards whose name matches `term`.
    pub async fn search_dashboards(&self, term: &str) -> Result<Page<Dashboard>, Error> {
        self.fetch(&search_path(DASHBOARDS_PATH, term)).await
    }

    pub async fn get_dashboard(&self, id: u64) -> Result<Dashboard, Error> {
        self.fetch(&item_path(DASHBOARDS_PATH, id)).await
    }

    /// Create a dashboard. The service only reads `name` from the payload.
    pub async fn create_dashboard(&self, payload: &Dashboard) -> Result<Dashboard, Error> {
        self.submit(DASHBOARDS_PATH, payload).await
    }

    pub async fn update_dashboard(&self, id: u64, payload: &Dashboard) -> Result<Dashboard, Error> {
        self.submit(&item_path(DASHBOARDS_PATH, id), payload).await
    }
}
