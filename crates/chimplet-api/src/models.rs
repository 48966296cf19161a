// Wire models for the MailChimp 2.0 API
//
// Fields use `#[serde(default)]` liberally because the service omits keys
// rather than sending nulls, and `extra` maps catch everything not modelled
// explicitly so records survive a round trip to callers unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{AsRefStr, Display, EnumString};

// ── Helper ───────────────────────────────────────────────────────────

/// `helper/ping` acknowledgement.
#[derive(Debug, Clone, Deserialize)]
pub struct PingResponse {
    #[serde(default)]
    pub msg: String,
}

/// Shape shared by every endpoint that answers `{ "complete": bool }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Complete {
    #[serde(default)]
    pub complete: Option<bool>,
}

impl Complete {
    /// `true` only when the service explicitly reported completion.
    pub fn is_complete(&self) -> bool {
        self.complete == Some(true)
    }
}

// ── Lists ────────────────────────────────────────────────────────────

/// Filters accepted by `lists/list`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exact: Option<bool>,
}

impl ListFilters {
    pub fn by_id(list_id: &str) -> Self {
        Self {
            list_id: Some(list_id.to_owned()),
            ..Self::default()
        }
    }
}

/// One page of `lists/list`. `total` counts every matching list, not just
/// the ones in `data`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ListsPage {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub data: Vec<MailingList>,
    #[serde(default)]
    pub errors: Vec<Value>,
}

/// A subscriber list.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MailingList {
    pub id: String,
    #[serde(default)]
    pub web_id: Option<u64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub date_created: Option<String>,
    #[serde(default)]
    pub default_from_name: Option<String>,
    #[serde(default)]
    pub default_from_email: Option<String>,
    #[serde(default)]
    pub default_subject: Option<String>,
    #[serde(default)]
    pub visibility: Option<String>,
    #[serde(default)]
    pub stats: ListStats,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Member and structure counters attached to a list.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ListStats {
    #[serde(default)]
    pub member_count: u64,
    #[serde(default)]
    pub unsubscribe_count: u64,
    #[serde(default)]
    pub cleaned_count: u64,
    #[serde(default)]
    pub member_count_since_send: u64,
    #[serde(default)]
    pub campaign_count: u64,
    #[serde(default)]
    pub grouping_count: u64,
    #[serde(default)]
    pub group_count: u64,
    #[serde(default)]
    pub merge_var_count: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ── Interest groupings ───────────────────────────────────────────────

/// How a grouping is rendered on signup forms.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GroupingType {
    #[default]
    Checkboxes,
    Radio,
    Dropdown,
    Hidden,
}

/// A named set of groups attached to a list.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Grouping {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub form_field: Option<String>,
    #[serde(default)]
    pub display_order: Option<String>,
    #[serde(default)]
    pub groups: Vec<Group>,
}

/// A single selectable group inside a grouping.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Group {
    pub name: String,
    #[serde(default)]
    pub bit: Option<String>,
    #[serde(default)]
    pub display_order: Option<String>,
    #[serde(default)]
    pub subscribers: Option<u64>,
}

impl Group {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bit: None,
            display_order: None,
            subscribers: None,
        }
    }
}

/// `lists/interest-grouping-add` result.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupingAdded {
    pub id: u64,
}

// ── Merge vars ───────────────────────────────────────────────────────

/// `lists/merge-vars` result: one entry per requested list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MergeVarsResponse {
    #[serde(default)]
    pub success_count: u64,
    #[serde(default)]
    pub error_count: u64,
    #[serde(default)]
    pub data: Vec<ListMergeVars>,
    #[serde(default)]
    pub errors: Vec<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListMergeVars {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub merge_vars: Vec<MergeVar>,
}

/// A custom member field, addressed by `tag`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MergeVar {
    pub tag: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub field_type: Option<String>,
    #[serde(default)]
    pub req: bool,
    #[serde(default)]
    pub public: bool,
    #[serde(default)]
    pub show: bool,
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Options for `lists/merge-var-add` and `lists/merge-var-update`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MergeVarOptions {
    /// Only honoured on creation; the service rejects type changes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub req: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub helptext: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MergeVarOptions {
    /// Copy of these options with the immutable `field_type` removed.
    pub fn without_field_type(&self) -> Self {
        let mut opts = self.clone();
        opts.field_type = None;
        opts.extra.remove("field_type");
        opts
    }
}

// ── Segments ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentMatch {
    #[default]
    All,
    Any,
}

/// A filter expression selecting list members.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentOptions {
    #[serde(rename = "match")]
    pub match_kind: SegmentMatch,
    pub conditions: Vec<SegmentCondition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentCondition {
    pub field: String,
    pub op: String,
    pub value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<Value>,
}

/// `lists/segment-test` result.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SegmentTest {
    #[serde(default)]
    pub total: Option<u64>,
}

// ── Batch subscribe ──────────────────────────────────────────────────

/// Email reference inside a batch entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailRef {
    pub email: String,
}

/// One member in a `lists/batch-subscribe` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSubscriber {
    pub email: EmailRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge_vars: Option<Map<String, Value>>,
}

impl BatchSubscriber {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: EmailRef {
                email: email.into(),
            },
            email_type: None,
            merge_vars: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BatchSubscribeResult {
    #[serde(default)]
    pub add_count: u64,
    #[serde(default)]
    pub update_count: u64,
    #[serde(default)]
    pub error_count: u64,
    #[serde(default)]
    pub errors: Vec<BatchError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BatchError {
    #[serde(default)]
    pub email: Option<Value>,
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub error: Option<String>,
}

// ── Folders ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FolderType {
    #[default]
    Campaign,
    Autoresponder,
    Template,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Folder {
    pub folder_id: u64,
    pub name: String,
    #[serde(default)]
    pub date_created: Option<String>,
    #[serde(default, rename = "type")]
    pub folder_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FolderAdded {
    pub folder_id: u64,
}

// ── Templates ────────────────────────────────────────────────────────

/// Which template families `templates/list` should return.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct TemplateTypes {
    pub user: bool,
    pub gallery: bool,
    pub base: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TemplateFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_inactive: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_drag_and_drop: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateList {
    #[serde(default)]
    pub user: Vec<Template>,
    #[serde(default)]
    pub gallery: Vec<Template>,
    #[serde(default)]
    pub base: Vec<Template>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Template {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub layout: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub preview_image: Option<String>,
    #[serde(default)]
    pub date_created: Option<String>,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ── Campaigns ────────────────────────────────────────────────────────

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CampaignType {
    #[default]
    Regular,
    Plaintext,
    Absplit,
    Rss,
    Auto,
}

/// Standard campaign options (`options` parameter of `campaigns/create`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CampaignOptions {
    pub list_id: String,
    pub subject: String,
    pub from_email: String,
    pub from_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Campaign body (`content` parameter of `campaigns/create`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CampaignContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sections: Option<Map<String, Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A created campaign.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Campaign {
    /// Empty when the service did not assign one.
    #[serde(default)]
    pub id: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub list_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn merge_var_options_drop_field_type() {
        let mut opts = MergeVarOptions {
            field_type: Some("dropdown".into()),
            public: Some(true),
            ..MergeVarOptions::default()
        };
        opts.extra.insert("field_type".into(), json!("text"));

        let stripped = serde_json::to_value(opts.without_field_type()).unwrap();
        assert_eq!(stripped, json!({ "public": true }));
    }

    #[test]
    fn mailing_list_keeps_unknown_fields() {
        let list: MailingList = serde_json::from_value(json!({
            "id": "abc",
            "name": "Readers",
            "stats": { "member_count": 42, "avg_sub_rate": 3 },
            "beamer_address": "x@inbound"
        }))
        .unwrap();

        assert_eq!(list.stats.member_count, 42);
        assert_eq!(list.extra["beamer_address"], json!("x@inbound"));
        assert_eq!(list.stats.extra["avg_sub_rate"], json!(3));
    }

    #[test]
    fn grouping_type_names() {
        assert_eq!(GroupingType::default().as_ref(), "checkboxes");
        assert_eq!("radio".parse::<GroupingType>().unwrap(), GroupingType::Radio);
        assert_eq!(CampaignType::Rss.to_string(), "rss");
    }
}
