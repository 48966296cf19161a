// Folder endpoints

use serde_json::json;
use tracing::debug;

use crate::client::ChimpClient;
use crate::error::Error;
use crate::models::{Folder, FolderAdded, FolderType};

impl ChimpClient {
    /// List folders of the given type.
    ///
    /// `POST folders/list`
    pub async fn folders(&self, folder_type: FolderType) -> Result<Vec<Folder>, Error> {
        debug!(%folder_type, "listing folders");
        self.send("folders/list", &json!({ "type": folder_type })).await
    }

    /// Create a folder and return its id.
    ///
    /// `POST folders/add`
    pub async fn add_folder(&self, name: &str, folder_type: FolderType) -> Result<u64, Error> {
        debug!(name, %folder_type, "adding folder");
        let added: FolderAdded = self
            .send("folders/add", &json!({ "name": name, "type": folder_type }))
            .await?;
        Ok(added.folder_id)
    }
}
