// List endpoints
//
// Lists, interest groupings, merge vars, segments and batch subscription.
// Everything except `lists/list` is scoped to a single list id.

use serde_json::json;
use tracing::debug;

use crate::client::ChimpClient;
use crate::error::Error;
use crate::models::{
    BatchSubscribeResult, BatchSubscriber, Complete, Grouping, GroupingAdded, GroupingType,
    ListFilters, ListsPage, MergeVar, MergeVarOptions, MergeVarsResponse, SegmentOptions,
    SegmentTest,
};

impl ChimpClient {
    // ── Lists ────────────────────────────────────────────────────────

    /// Fetch one page of lists matching `filters`.
    ///
    /// `POST lists/list`. `limit` is capped by the service at
    /// [`MAX_PAGE_SIZE`](crate::MAX_PAGE_SIZE).
    pub async fn lists(
        &self,
        filters: &ListFilters,
        start: u32,
        limit: u32,
    ) -> Result<ListsPage, Error> {
        debug!(start, limit, "listing lists");
        self.send(
            "lists/list",
            &json!({ "filters": filters, "start": start, "limit": limit }),
        )
        .await
    }

    // ── Interest groupings ───────────────────────────────────────────

    /// `POST lists/interest-groupings`
    pub async fn interest_groupings(&self, list_id: &str) -> Result<Vec<Grouping>, Error> {
        debug!(list_id, "fetching interest groupings");
        self.send("lists/interest-groupings", &json!({ "id": list_id }))
            .await
    }

    /// Create a grouping and return its id.
    ///
    /// `POST lists/interest-grouping-add`
    pub async fn interest_grouping_add(
        &self,
        list_id: &str,
        name: &str,
        grouping_type: GroupingType,
        groups: &[String],
    ) -> Result<u64, Error> {
        debug!(list_id, name, %grouping_type, "adding interest grouping");
        let added: GroupingAdded = self
            .send(
                "lists/interest-grouping-add",
                &json!({
                    "id": list_id,
                    "name": name,
                    "type": grouping_type,
                    "groups": groups,
                }),
            )
            .await?;
        Ok(added.id)
    }

    /// `POST lists/interest-grouping-del`
    pub async fn interest_grouping_del(&self, grouping_id: u64) -> Result<Complete, Error> {
        debug!(grouping_id, "deleting interest grouping");
        self.send(
            "lists/interest-grouping-del",
            &json!({ "grouping_id": grouping_id }),
        )
        .await
    }

    /// `POST lists/interest-group-add`
    pub async fn interest_group_add(
        &self,
        list_id: &str,
        group_name: &str,
        grouping_id: u64,
    ) -> Result<Complete, Error> {
        debug!(list_id, group_name, grouping_id, "adding interest group");
        self.send(
            "lists/interest-group-add",
            &json!({ "id": list_id, "group_name": group_name, "grouping_id": grouping_id }),
        )
        .await
    }

    /// `POST lists/interest-group-del`
    pub async fn interest_group_del(
        &self,
        list_id: &str,
        group_name: &str,
        grouping_id: u64,
    ) -> Result<Complete, Error> {
        debug!(list_id, group_name, grouping_id, "deleting interest group");
        self.send(
            "lists/interest-group-del",
            &json!({ "id": list_id, "group_name": group_name, "grouping_id": grouping_id }),
        )
        .await
    }

    // ── Merge vars ───────────────────────────────────────────────────

    /// `POST lists/merge-vars` for one or more lists.
    pub async fn merge_vars(&self, list_ids: &[&str]) -> Result<MergeVarsResponse, Error> {
        debug!(?list_ids, "fetching merge vars");
        self.send("lists/merge-vars", &json!({ "id": list_ids })).await
    }

    /// `POST lists/merge-var-add`
    pub async fn merge_var_add(
        &self,
        list_id: &str,
        tag: &str,
        name: &str,
        options: &MergeVarOptions,
    ) -> Result<MergeVar, Error> {
        debug!(list_id, tag, "adding merge var");
        self.send(
            "lists/merge-var-add",
            &json!({ "id": list_id, "tag": tag, "name": name, "options": options }),
        )
        .await
    }

    /// `POST lists/merge-var-update`
    pub async fn merge_var_update(
        &self,
        list_id: &str,
        tag: &str,
        options: &MergeVarOptions,
    ) -> Result<MergeVar, Error> {
        debug!(list_id, tag, "updating merge var");
        self.send(
            "lists/merge-var-update",
            &json!({ "id": list_id, "tag": tag, "options": options }),
        )
        .await
    }

    // ── Segments & members ───────────────────────────────────────────

    /// Dry-run a segment against a list.
    ///
    /// `POST lists/segment-test`
    pub async fn segment_test(
        &self,
        list_id: &str,
        options: &SegmentOptions,
    ) -> Result<SegmentTest, Error> {
        debug!(list_id, conditions = options.conditions.len(), "testing segment");
        self.send(
            "lists/segment-test",
            &json!({ "list_id": list_id, "options": options }),
        )
        .await
    }

    /// `POST lists/batch-subscribe`
    pub async fn batch_subscribe(
        &self,
        list_id: &str,
        batch: &[BatchSubscriber],
        double_optin: bool,
        update_existing: bool,
    ) -> Result<BatchSubscribeResult, Error> {
        debug!(list_id, members = batch.len(), "batch subscribing");
        self.send(
            "lists/batch-subscribe",
            &json!({
                "id": list_id,
                "batch": batch,
                "double_optin": double_optin,
                "update_existing": update_existing,
            }),
        )
        .await
    }
}
