// Interest grouping management for the current list.

use chimplet_api::models::{Group, Grouping, GroupingType};
use tracing::debug;

use super::{Facade, failed};
use crate::error::CoreError;
use crate::reconcile::{ReconcilePlan, ReconcileReport};

/// `List_InvalidOption` code meaning the list has no groupings configured.
pub const NO_GROUPINGS_CODE: i64 = 211;

impl Facade {
    /// All groupings of the current list, fetched once per list context.
    ///
    /// A list without groupings yields an empty slice rather than an error.
    pub async fn get_all_groupings(&mut self) -> Result<&[Grouping], CoreError> {
        const OP: &str = "get_all_groupings";

        if self.groupings.is_none() {
            let list_id = self.current_list_id().map_err(|e| failed(OP, e))?;
            let fetched = match self
                .client()
                .map_err(|e| failed(OP, e))?
                .interest_groupings(&list_id)
                .await
            {
                Ok(groupings) => groupings,
                Err(e)
                    if e.is_invalid_option() && e.api_error_code() == Some(NO_GROUPINGS_CODE) =>
                {
                    debug!(list_id = %list_id, "list has no interest groupings");
                    Vec::new()
                }
                Err(e) => return Err(failed(OP, e)),
            };
            self.groupings = Some(fetched);
        }

        Ok(self.groupings.as_deref().unwrap_or_default())
    }

    /// Find a grouping of the current list by exact name.
    pub async fn get_grouping(&mut self, name: &str) -> Result<Option<&Grouping>, CoreError> {
        let groupings = self.get_all_groupings().await?;
        Ok(groupings.iter().find(|grouping| grouping.name == name))
    }

    /// Create a grouping on the current list and return its id.
    pub async fn add_grouping(
        &mut self,
        name: &str,
        grouping_type: GroupingType,
        groups: &[String],
    ) -> Result<u64, CoreError> {
        const OP: &str = "add_grouping";

        let list_id = self.current_list_id().map_err(|e| failed(OP, e))?;
        let id = self
            .client()
            .map_err(|e| failed(OP, e))?
            .interest_grouping_add(&list_id, name, grouping_type, groups)
            .await
            .map_err(|e| failed(OP, e))?;

        self.groupings = None;
        Ok(id)
    }

    /// Id of the grouping called `name`, creating it when absent.
    pub async fn ensure_grouping(
        &mut self,
        name: &str,
        grouping_type: GroupingType,
        groups: &[String],
    ) -> Result<u64, CoreError> {
        if let Some(id) = self.get_grouping(name).await?.map(|grouping| grouping.id) {
            return Ok(id);
        }
        self.add_grouping(name, grouping_type, groups).await
    }

    /// Delete the grouping called `name`.
    pub async fn delete_grouping(&mut self, name: &str) -> Result<(), CoreError> {
        const OP: &str = "delete_grouping";

        let Some(grouping_id) = self.get_grouping(name).await?.map(|grouping| grouping.id) else {
            return Err(failed(
                OP,
                CoreError::UnresolvedName {
                    entity: "grouping",
                    name: name.to_owned(),
                },
            ));
        };

        let response = self
            .client()
            .map_err(|e| failed(OP, e))?
            .interest_grouping_del(grouping_id)
            .await
            .map_err(|e| failed(OP, e))?;
        self.groupings = None;

        if response.is_complete() {
            Ok(())
        } else {
            Err(failed(
                OP,
                CoreError::service(format!("deletion of grouping {name} was not acknowledged")),
            ))
        }
    }

    /// Add a group label to a grouping of the current list.
    pub async fn add_to_grouping(&mut self, name: &str, grouping_id: u64) -> Result<(), CoreError> {
        const OP: &str = "add_to_grouping";

        let list_id = self.current_list_id().map_err(|e| failed(OP, e))?;
        let response = self
            .client()
            .map_err(|e| failed(OP, e))?
            .interest_group_add(&list_id, name, grouping_id)
            .await
            .map_err(|e| failed(OP, e))?;
        self.groupings = None;

        if response.is_complete() {
            Ok(())
        } else {
            Err(failed(
                OP,
                CoreError::service(format!("group {name} was not added to {grouping_id}")),
            ))
        }
    }

    /// Remove a group label from a grouping of the current list.
    pub async fn delete_from_grouping(
        &mut self,
        name: &str,
        grouping_id: u64,
    ) -> Result<(), CoreError> {
        const OP: &str = "delete_from_grouping";

        let list_id = self.current_list_id().map_err(|e| failed(OP, e))?;
        let response = self
            .client()
            .map_err(|e| failed(OP, e))?
            .interest_group_del(&list_id, name, grouping_id)
            .await
            .map_err(|e| failed(OP, e))?;
        self.groupings = None;

        if response.is_complete() {
            Ok(())
        } else {
            Err(failed(
                OP,
                CoreError::service(format!("group {name} was not removed from {grouping_id}")),
            ))
        }
    }

    /// Make the groups of `grouping_id` match `local` exactly.
    ///
    /// Remote groups missing from `local` are deleted first, then local
    /// names missing remotely are added. Failures of single calls are
    /// collected in the report and do not stop the run.
    pub async fn reconcile_grouping_membership(
        &mut self,
        local: &[String],
        remote: &[Group],
        grouping_id: u64,
    ) -> Result<ReconcileReport, CoreError> {
        const OP: &str = "reconcile_grouping_membership";

        self.client().map_err(|e| failed(OP, e))?;
        self.current_list_id().map_err(|e| failed(OP, e))?;

        let plan = ReconcilePlan::new(local, remote.iter().map(|group| group.name.as_str()));
        let mut report = ReconcileReport::default();

        for name in plan.to_delete {
            match self.delete_from_grouping(&name, grouping_id).await {
                Ok(()) => report.deleted.push(name),
                Err(e) => report.failed.push((name, e)),
            }
        }
        for name in plan.to_add {
            match self.add_to_grouping(&name, grouping_id).await {
                Ok(()) => report.added.push(name),
                Err(e) => report.failed.push((name, e)),
            }
        }

        debug!(
            grouping_id,
            deleted = report.deleted.len(),
            added = report.added.len(),
            failed = report.failed.len(),
            "reconciled grouping"
        );
        Ok(report)
    }

    /// Ensure the grouping `name` exists and holds exactly `local` groups.
    pub async fn sync_grouping(
        &mut self,
        name: &str,
        grouping_type: GroupingType,
        local: &[String],
    ) -> Result<ReconcileReport, CoreError> {
        let existing = self.get_grouping(name).await?.cloned();

        match existing {
            Some(grouping) => {
                self.reconcile_grouping_membership(local, &grouping.groups, grouping.id)
                    .await
            }
            None => {
                let plan = ReconcilePlan::new(local, std::iter::empty::<&str>());
                self.add_grouping(name, grouping_type, &plan.to_add).await?;
                Ok(ReconcileReport {
                    added: plan.to_add,
                    ..ReconcileReport::default()
                })
            }
        }
    }
}
