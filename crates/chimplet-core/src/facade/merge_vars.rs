// Merge var (custom member field) management for the current list.

use chimplet_api::models::{MergeVar, MergeVarOptions};
use tracing::debug;

use super::{Facade, failed};
use crate::error::CoreError;

/// What [`Facade::reconcile_merge_var`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Created,
    Updated,
}

impl Facade {
    /// All merge vars of the current list, fetched once per list context.
    pub async fn get_all_merge_vars(&mut self) -> Result<&[MergeVar], CoreError> {
        const OP: &str = "get_all_merge_vars";

        if self.merge_vars.is_none() {
            let list_id = self.current_list_id().map_err(|e| failed(OP, e))?;
            let response = self
                .client()
                .map_err(|e| failed(OP, e))?
                .merge_vars(&[list_id.as_str()])
                .await
                .map_err(|e| failed(OP, e))?;

            let Some(entry) = response.data.into_iter().find(|entry| entry.id == list_id) else {
                return Err(failed(
                    OP,
                    CoreError::NotFound {
                        message: format!("no merge vars returned for list {list_id}"),
                        code: None,
                    },
                ));
            };
            debug!(list_id = %list_id, count = entry.merge_vars.len(), "fetched merge vars");
            self.merge_vars = Some(entry.merge_vars);
        }

        Ok(self.merge_vars.as_deref().unwrap_or_default())
    }

    /// Find a merge var of the current list by tag.
    pub async fn get_merge_var(&mut self, tag: &str) -> Result<Option<&MergeVar>, CoreError> {
        let merge_vars = self.get_all_merge_vars().await?;
        Ok(merge_vars.iter().find(|merge_var| merge_var.tag == tag))
    }

    /// Add a merge var to the current list.
    pub async fn add_merge_var(
        &mut self,
        tag: &str,
        name: &str,
        options: &MergeVarOptions,
    ) -> Result<MergeVar, CoreError> {
        const OP: &str = "add_merge_var";

        let list_id = self.current_list_id().map_err(|e| failed(OP, e))?;
        let created = self
            .client()
            .map_err(|e| failed(OP, e))?
            .merge_var_add(&list_id, tag, name, options)
            .await
            .map_err(|e| failed(OP, e))?;

        self.merge_vars = None;
        Ok(created)
    }

    /// Update a merge var of the current list.
    ///
    /// `field_type` is dropped from `options`: it is fixed at creation.
    pub async fn update_merge_var(
        &mut self,
        tag: &str,
        options: &MergeVarOptions,
    ) -> Result<MergeVar, CoreError> {
        const OP: &str = "update_merge_var";

        let list_id = self.current_list_id().map_err(|e| failed(OP, e))?;
        let options = options.without_field_type();
        let updated = self
            .client()
            .map_err(|e| failed(OP, e))?
            .merge_var_update(&list_id, tag, &options)
            .await
            .map_err(|e| failed(OP, e))?;

        self.merge_vars = None;
        Ok(updated)
    }

    /// Update the merge var `tag` if it exists, otherwise create it.
    pub async fn reconcile_merge_var(
        &mut self,
        tag: &str,
        name: &str,
        options: &MergeVarOptions,
    ) -> Result<Upsert, CoreError> {
        if self.get_merge_var(tag).await?.is_some() {
            self.update_merge_var(tag, options).await?;
            Ok(Upsert::Updated)
        } else {
            self.add_merge_var(tag, name, options).await?;
            Ok(Upsert::Created)
        }
    }
}
