// Campaign endpoints

use serde::Serialize;
use serde_json::{Value, json};
use tracing::debug;

use crate::client::ChimpClient;
use crate::error::Error;
use crate::models::{
    Campaign, CampaignContent, CampaignOptions, CampaignType, Complete, SegmentOptions,
};

/// Parameters of `campaigns/create`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateCampaign<'a> {
    #[serde(rename = "type")]
    pub kind: CampaignType,
    pub options: &'a CampaignOptions,
    pub content: &'a CampaignContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment_opts: Option<&'a SegmentOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_opts: Option<&'a Value>,
}

impl ChimpClient {
    /// `POST campaigns/create`
    pub async fn create_campaign(&self, params: &CreateCampaign<'_>) -> Result<Campaign, Error> {
        debug!(kind = %params.kind, list_id = %params.options.list_id, "creating campaign");
        self.send("campaigns/create", params).await
    }

    /// Send a campaign immediately (starts RSS campaigns).
    ///
    /// `POST campaigns/send`
    pub async fn send_campaign(&self, campaign_id: &str) -> Result<Complete, Error> {
        debug!(campaign_id, "sending campaign");
        self.send("campaigns/send", &json!({ "cid": campaign_id })).await
    }
}
