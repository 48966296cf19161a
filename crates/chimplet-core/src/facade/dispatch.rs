// Generic pass-through for endpoints the facade does not model.
//
// Only names listed in `Operation` can be forwarded; anything else is a
// caller bug and is rejected before any request is made.

use serde_json::Value;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use super::{Facade, failed};
use crate::error::CoreError;

/// Remote endpoints reachable through [`Facade::call`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr, EnumIter)]
pub enum Operation {
    // ── helper ──
    #[strum(serialize = "helper/ping")]
    HelperPing,
    #[strum(serialize = "helper/account-details")]
    HelperAccountDetails,
    #[strum(serialize = "helper/lists-for-email")]
    HelperListsForEmail,

    // ── lists ──
    #[strum(serialize = "lists/list")]
    ListsList,
    #[strum(serialize = "lists/members")]
    ListsMembers,
    #[strum(serialize = "lists/member-info")]
    ListsMemberInfo,
    #[strum(serialize = "lists/subscribe")]
    ListsSubscribe,
    #[strum(serialize = "lists/unsubscribe")]
    ListsUnsubscribe,
    #[strum(serialize = "lists/update-member")]
    ListsUpdateMember,
    #[strum(serialize = "lists/batch-unsubscribe")]
    ListsBatchUnsubscribe,
    #[strum(serialize = "lists/static-segments")]
    ListsStaticSegments,
    #[strum(serialize = "lists/static-segment-add")]
    ListsStaticSegmentAdd,
    #[strum(serialize = "lists/static-segment-del")]
    ListsStaticSegmentDel,
    #[strum(serialize = "lists/static-segment-members-add")]
    ListsStaticSegmentMembersAdd,
    #[strum(serialize = "lists/growth-history")]
    ListsGrowthHistory,
    #[strum(serialize = "lists/activity")]
    ListsActivity,
    #[strum(serialize = "lists/interest-grouping-update")]
    ListsInterestGroupingUpdate,
    #[strum(serialize = "lists/merge-var-del")]
    ListsMergeVarDel,

    // ── campaigns ──
    #[strum(serialize = "campaigns/list")]
    CampaignsList,
    #[strum(serialize = "campaigns/content")]
    CampaignsContent,
    #[strum(serialize = "campaigns/delete")]
    CampaignsDelete,
    #[strum(serialize = "campaigns/pause")]
    CampaignsPause,
    #[strum(serialize = "campaigns/resume")]
    CampaignsResume,
    #[strum(serialize = "campaigns/replicate")]
    CampaignsReplicate,
    #[strum(serialize = "campaigns/schedule")]
    CampaignsSchedule,
    #[strum(serialize = "campaigns/unschedule")]
    CampaignsUnschedule,
    #[strum(serialize = "campaigns/send-test")]
    CampaignsSendTest,
    #[strum(serialize = "campaigns/ready")]
    CampaignsReady,

    // ── folders / templates / reports ──
    #[strum(serialize = "folders/list")]
    FoldersList,
    #[strum(serialize = "folders/update")]
    FoldersUpdate,
    #[strum(serialize = "folders/del")]
    FoldersDel,
    #[strum(serialize = "templates/info")]
    TemplatesInfo,
    #[strum(serialize = "templates/del")]
    TemplatesDel,
    #[strum(serialize = "reports/summary")]
    ReportsSummary,
}

impl Operation {
    /// Endpoint path relative to the API base, e.g. `lists/members`.
    pub fn endpoint(self) -> &'static str {
        self.into()
    }
}

/// Result of a forwarded call.
#[derive(Debug, Clone, PartialEq)]
pub enum Forwarded {
    /// The response carried a boolean `complete` flag.
    Complete(bool),
    /// Any other response, untouched.
    Raw(Value),
}

impl Forwarded {
    pub fn from_response(response: Value) -> Self {
        if let Some(&Value::Bool(complete)) = response.get("complete") {
            return Self::Complete(complete);
        }
        Self::Raw(response)
    }
}

impl Facade {
    /// Forward a call by endpoint name (e.g. `"lists/members"`).
    ///
    /// Unknown names fail with [`CoreError::UnsupportedOperation`] without
    /// contacting the service.
    pub async fn call(&self, operation: &str, args: Value) -> Result<Forwarded, CoreError> {
        let operation: Operation = operation
            .parse()
            .map_err(|_| CoreError::UnsupportedOperation(operation.to_owned()))?;
        self.forward(operation, args).await
    }

    /// Forward a call to a known endpoint.
    pub async fn forward(&self, operation: Operation, args: Value) -> Result<Forwarded, CoreError> {
        let endpoint = operation.endpoint();

        let response = self
            .client()
            .map_err(|e| failed(endpoint, e))?
            .call_raw(endpoint, args)
            .await
            .map_err(|e| failed(endpoint, e))?;
        Ok(Forwarded::from_response(response))
    }
}
