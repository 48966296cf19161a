// Template endpoints

use serde_json::json;
use tracing::debug;

use crate::client::ChimpClient;
use crate::error::Error;
use crate::models::{TemplateFilters, TemplateList, TemplateTypes};

impl ChimpClient {
    /// `POST templates/list`
    pub async fn templates(
        &self,
        types: TemplateTypes,
        filters: &TemplateFilters,
    ) -> Result<TemplateList, Error> {
        debug!(?types, "listing templates");
        self.send("templates/list", &json!({ "types": types, "filters": filters }))
            .await
    }
}
