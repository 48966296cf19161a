// ── List service facade ──
//
// One facade instance per session. It owns the lazily-built connection and
// the current-list context with its derived caches. Operations that touch
// caches take `&mut self`, so an instance cannot be shared between
// concurrent callers without external locking.
//
// Endpoint groups live in sibling modules as further `impl Facade` blocks.

mod campaigns;
mod dispatch;
mod groupings;
mod merge_vars;

pub use campaigns::{CampaignSpec, CreatedCampaign};
pub use dispatch::{Forwarded, Operation};
pub use groupings::NO_GROUPINGS_CODE;
pub use merge_vars::Upsert;

use chimplet_api::models::{
    BatchSubscribeResult, BatchSubscriber, Grouping, ListFilters, ListsPage, MailingList, MergeVar,
};
use chimplet_api::{ChimpClient, MAX_PAGE_SIZE, PING_ACK};
use secrecy::SecretString;
use tracing::{debug, warn};

use crate::config::{ClientOptions, FacadeConfig};
use crate::error::CoreError;

/// Typed facade over the remote list-management service.
#[derive(Debug, Default)]
pub struct Facade {
    client: Option<ChimpClient>,
    current_list: Option<MailingList>,
    groupings: Option<Vec<Grouping>>,
    merge_vars: Option<Vec<MergeVar>>,
    all_lists: Option<ListsPage>,
    default_list: Option<String>,
}

// ── Failure logging ──────────────────────────────────────────────────

pub(crate) fn log_failure(operation: &str, err: &CoreError) {
    warn!(operation, kind = %err.kind(), code = ?err.code(), "{err}");
}

/// Log a failure caught at the facade boundary and hand it back.
pub(crate) fn failed(operation: &str, err: impl Into<CoreError>) -> CoreError {
    let err = err.into();
    log_failure(operation, &err);
    err
}

fn connect(api_key: SecretString, options: &ClientOptions) -> Result<ChimpClient, CoreError> {
    let transport = options.transport();
    let client = match &options.endpoint {
        Some(endpoint) => ChimpClient::with_endpoint(endpoint.as_str(), api_key, &transport)?,
        None => ChimpClient::new(api_key, options.data_center.as_deref(), &transport)?,
    };
    Ok(client)
}

impl Facade {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a facade and initialize its connection from `config`.
    pub fn from_config(config: FacadeConfig) -> Result<Self, CoreError> {
        let mut facade = Self::new();
        facade.initialize(Some(config.api_key), &config.options)?;
        facade.default_list = config.default_list;
        Ok(facade)
    }

    // ── Connection ───────────────────────────────────────────────────

    /// Build the connection on first use.
    ///
    /// An existing connection is returned unchanged whatever the arguments.
    /// Without a connection and without a key nothing happens and `None`
    /// is returned.
    pub fn initialize(
        &mut self,
        api_key: Option<SecretString>,
        options: &ClientOptions,
    ) -> Result<Option<&ChimpClient>, CoreError> {
        if self.client.is_some() {
            return Ok(self.client.as_ref());
        }
        let Some(api_key) = api_key else {
            return Ok(None);
        };

        let client = connect(api_key, options).map_err(|e| failed("initialize", e))?;
        debug!(base_url = %client.base_url(), "connection initialized");
        Ok(Some(self.client.insert(client)))
    }

    pub fn is_initialized(&self) -> bool {
        self.client.is_some()
    }

    pub fn connection(&self) -> Option<&ChimpClient> {
        self.client.as_ref()
    }

    pub(crate) fn client(&self) -> Result<&ChimpClient, CoreError> {
        self.client.as_ref().ok_or(CoreError::NotInitialized)
    }

    pub(crate) fn current_list_id(&self) -> Result<String, CoreError> {
        self.current_list
            .as_ref()
            .map(|list| list.id.clone())
            .ok_or(CoreError::NoCurrentList)
    }

    /// Probe `api_key` with a throwaway connection.
    ///
    /// The probe never touches any facade's stored connection. Returns
    /// `true` only for the exact ping acknowledgement.
    pub async fn is_api_key_valid(api_key: SecretString, options: &ClientOptions) -> bool {
        const OP: &str = "is_api_key_valid";

        let probe = match connect(api_key, options) {
            Ok(client) => client,
            Err(e) => {
                log_failure(OP, &e);
                return false;
            }
        };

        match probe.ping().await {
            Ok(ping) if ping.msg == PING_ACK => true,
            Ok(ping) => {
                debug!(msg = %ping.msg, "unexpected ping acknowledgement");
                false
            }
            Err(e) => {
                log_failure(OP, &e.into());
                false
            }
        }
    }

    // ── List context ─────────────────────────────────────────────────

    pub fn current_list(&self) -> Option<&MailingList> {
        self.current_list.as_ref()
    }

    /// Replace the current list. Derived caches are always cleared.
    pub fn set_current_list(&mut self, list: MailingList) {
        self.switch_list(list);
    }

    /// Drop everything derived from the current list context: groupings,
    /// merge vars and the stored lists page with its total.
    pub fn invalidate_list_caches(&mut self) {
        self.groupings = None;
        self.merge_vars = None;
        self.all_lists = None;
    }

    fn switch_list(&mut self, list: MailingList) -> &MailingList {
        self.invalidate_list_caches();
        debug!(list_id = %list.id, name = %list.name, "switched current list");
        self.current_list.insert(list)
    }

    /// Select the list named by [`FacadeConfig::default_list`], if any.
    pub async fn select_default_list(&mut self) -> Result<Option<&MailingList>, CoreError> {
        let Some(list_id) = self.default_list.clone() else {
            return Ok(None);
        };
        self.get_list_by_id(&list_id).await.map(Some)
    }

    // ── Lists ────────────────────────────────────────────────────────

    /// Fetch a list by id and make it the current list.
    pub async fn get_list_by_id(&mut self, list_id: &str) -> Result<&MailingList, CoreError> {
        const OP: &str = "get_list_by_id";

        let page = self
            .client()
            .map_err(|e| failed(OP, e))?
            .lists(&ListFilters::by_id(list_id), 0, MAX_PAGE_SIZE)
            .await
            .map_err(|e| failed(OP, e))?;

        let Some(list) = page.data.into_iter().next() else {
            return Err(failed(
                OP,
                CoreError::NotFound {
                    message: format!("list {list_id} does not exist"),
                    code: None,
                },
            ));
        };

        Ok(self.switch_list(list))
    }

    /// Fetch the first page of lists (at most [`MAX_PAGE_SIZE`]).
    ///
    /// Further pages are not requested; compare the result length with
    /// [`get_current_list_total_results`](Self::get_current_list_total_results)
    /// to detect truncation.
    pub async fn get_all_lists(&mut self) -> Result<&[MailingList], CoreError> {
        const OP: &str = "get_all_lists";

        let page = self
            .client()
            .map_err(|e| failed(OP, e))?
            .lists(&ListFilters::default(), 0, MAX_PAGE_SIZE)
            .await
            .map_err(|e| failed(OP, e))?;

        debug!(total = page.total, returned = page.data.len(), "fetched lists");
        Ok(&self.all_lists.insert(page).data)
    }

    /// Service-reported total from the last [`get_all_lists`](Self::get_all_lists).
    pub fn get_current_list_total_results(&self) -> u64 {
        self.all_lists.as_ref().map_or(0, |page| page.total)
    }

    // ── Subscribers ──────────────────────────────────────────────────

    /// Subscribe or update `users` on `list_id` without double opt-in.
    pub async fn sync_list_users(
        &self,
        list_id: &str,
        users: &[BatchSubscriber],
    ) -> Result<BatchSubscribeResult, CoreError> {
        const OP: &str = "sync_list_users";

        let result = self
            .client()
            .map_err(|e| failed(OP, e))?
            .batch_subscribe(list_id, users, false, true)
            .await
            .map_err(|e| failed(OP, e))?;

        if result.error_count > 0 {
            warn!(list_id, errors = result.error_count, "batch subscribe rejected some members");
        }
        Ok(result)
    }
}
