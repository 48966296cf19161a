// Helper endpoints
//
// `helper/ping` is the liveness probe used to validate API keys.

use serde_json::Value;
use tracing::debug;

use crate::client::ChimpClient;
use crate::error::Error;
use crate::models::PingResponse;

/// Exact acknowledgement `helper/ping` returns for a healthy, valid key.
pub const PING_ACK: &str = "Everything's Chimpy!";

impl ChimpClient {
    /// `POST helper/ping`
    pub async fn ping(&self) -> Result<PingResponse, Error> {
        debug!("pinging service");
        self.call("helper/ping", Value::Null).await
    }
}
