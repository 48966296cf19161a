// Campaign creation and delivery, plus the folders and templates campaigns use.

use chimplet_api::campaigns::CreateCampaign;
use chimplet_api::models::{
    Campaign, CampaignContent, CampaignOptions, CampaignType, FolderType, SegmentOptions, Template,
    TemplateFilters, TemplateTypes,
};
use serde_json::Value;
use tracing::{debug, info};

use super::{Facade, failed};
use crate::error::CoreError;

/// Everything needed to create a campaign.
#[derive(Debug, Clone, Default)]
pub struct CampaignSpec {
    pub kind: CampaignType,
    pub options: CampaignOptions,
    pub content: CampaignContent,
    /// Recipient filter. `None` targets the whole list.
    pub segment_opts: Option<SegmentOptions>,
    /// Type-specific options (e.g. the feed URL of an RSS campaign).
    pub type_opts: Option<Value>,
}

/// A created campaign and what happened when sending it.
#[derive(Debug, Clone)]
pub struct CreatedCampaign {
    pub campaign: Campaign,
    /// Recipient count of the validated segment, if one was given.
    pub recipients: Option<u64>,
    pub is_broadcast: bool,
}

impl Facade {
    // ── Segments ─────────────────────────────────────────────────────

    /// Dry-run `options` against the current list and return the number
    /// of members it would select.
    pub async fn test_segment(&self, options: &SegmentOptions) -> Result<u64, CoreError> {
        const OP: &str = "test_segment";

        let list_id = self.current_list_id().map_err(|e| failed(OP, e))?;
        let result = self
            .client()
            .map_err(|e| failed(OP, e))?
            .segment_test(&list_id, options)
            .await
            .map_err(|e| failed(OP, e))?;

        result.total.ok_or_else(|| {
            failed(
                OP,
                CoreError::service(
                    "The segment test failed for an unknown reason. Please try again later.",
                ),
            )
        })
    }

    // ── Campaigns ────────────────────────────────────────────────────

    /// Validate the segment, create the campaign and send it right away.
    ///
    /// The campaign goes to the current list when `options.list_id` is
    /// empty. With segment options it must be the current list, since that
    /// is where the segment is tested.
    ///
    /// An empty segment fails with [`CoreError::EmptySegment`] before
    /// anything is created. Send failures do not fail the call; they show
    /// up as `is_broadcast == false`.
    pub async fn create_campaign(&self, spec: &CampaignSpec) -> Result<CreatedCampaign, CoreError> {
        const OP: &str = "create_campaign";

        let mut options = spec.options.clone();
        let recipients = match &spec.segment_opts {
            Some(segment) => {
                let list_id = self.current_list_id().map_err(|e| failed(OP, e))?;
                if options.list_id.is_empty() {
                    options.list_id = list_id;
                } else if options.list_id != list_id {
                    return Err(failed(
                        OP,
                        CoreError::ValidationFailed {
                            message: format!(
                                "campaign list {} differs from the segment's list {list_id}",
                                options.list_id
                            ),
                        },
                    ));
                }

                let total = self.test_segment(segment).await?;
                if total == 0 {
                    return Err(failed(OP, CoreError::EmptySegment));
                }
                Some(total)
            }
            None => {
                if options.list_id.is_empty() {
                    if let Some(list) = &self.current_list {
                        options.list_id.clone_from(&list.id);
                    }
                }
                None
            }
        };

        let params = CreateCampaign {
            kind: spec.kind,
            options: &options,
            content: &spec.content,
            segment_opts: spec.segment_opts.as_ref(),
            type_opts: spec.type_opts.as_ref(),
        };
        let campaign = self
            .client()
            .map_err(|e| failed(OP, e))?
            .create_campaign(&params)
            .await
            .map_err(|e| failed(OP, e))?;

        let is_broadcast = if campaign.id.is_empty() {
            false
        } else {
            let kind = campaign.kind.parse().unwrap_or(spec.kind);
            self.send_campaign(&campaign.id, kind)
                .await
                .unwrap_or(false)
        };

        info!(campaign_id = %campaign.id, ?recipients, is_broadcast, "campaign created");
        Ok(CreatedCampaign {
            campaign,
            recipients,
            is_broadcast,
        })
    }

    /// Send a campaign now (RSS campaigns are started).
    ///
    /// Returns the service's `complete` flag; a response without one is an
    /// error even for RSS campaigns, whose delivery is asynchronous.
    pub async fn send_campaign(
        &self,
        campaign_id: &str,
        kind: CampaignType,
    ) -> Result<bool, CoreError> {
        const OP: &str = "send_campaign";

        let response = self
            .client()
            .map_err(|e| failed(OP, e))?
            .send_campaign(campaign_id)
            .await
            .map_err(|e| failed(OP, e))?;

        match response.complete {
            Some(complete) => Ok(complete),
            None if kind == CampaignType::Rss => Err(failed(
                OP,
                CoreError::service("The RSS campaign could not be started for an unknown reason."),
            )),
            None => Err(failed(
                OP,
                CoreError::service("The campaign could not be sent for an unknown reason."),
            )),
        }
    }

    // ── Folders ──────────────────────────────────────────────────────

    /// Id of the campaign folder called `name`, creating it when absent.
    pub async fn get_campaign_folder_id(&self, name: &str) -> Result<u64, CoreError> {
        const OP: &str = "get_campaign_folder_id";

        if name.is_empty() {
            return Err(failed(
                OP,
                CoreError::ValidationFailed {
                    message: "folder name must not be empty".into(),
                },
            ));
        }

        let folders = self
            .client()
            .map_err(|e| failed(OP, e))?
            .folders(FolderType::Campaign)
            .await
            .map_err(|e| failed(OP, e))?;

        if let Some(folder) = folders.iter().find(|folder| folder.name == name) {
            return Ok(folder.folder_id);
        }

        debug!(name, "campaign folder missing, creating it");
        self.create_campaign_folder(name).await
    }

    pub async fn create_campaign_folder(&self, name: &str) -> Result<u64, CoreError> {
        const OP: &str = "create_campaign_folder";

        if name.is_empty() {
            return Err(failed(
                OP,
                CoreError::ValidationFailed {
                    message: "folder name must not be empty".into(),
                },
            ));
        }

        self.client()
            .map_err(|e| failed(OP, e))?
            .add_folder(name, FolderType::Campaign)
            .await
            .map_err(|e| failed(OP, e))
    }

    // ── Templates ────────────────────────────────────────────────────

    /// User-created templates, drag-and-drop ones included.
    pub async fn get_user_templates(&self) -> Result<Vec<Template>, CoreError> {
        const OP: &str = "get_user_templates";

        let types = TemplateTypes {
            user: true,
            ..TemplateTypes::default()
        };
        let filters = TemplateFilters {
            include_drag_and_drop: Some(true),
            ..TemplateFilters::default()
        };

        let templates = self
            .client()
            .map_err(|e| failed(OP, e))?
            .templates(types, &filters)
            .await
            .map_err(|e| failed(OP, e))?;
        Ok(templates.user)
    }
}
