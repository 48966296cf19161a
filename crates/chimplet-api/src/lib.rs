// chimplet-api: Async Rust client for the MailChimp 2.0 list-management API

pub mod campaigns;
pub mod client;
pub mod error;
pub mod folders;
pub mod helper;
pub mod lists;
pub mod models;
pub mod templates;
pub mod transport;

pub use client::{ChimpClient, DEFAULT_DATA_CENTER, MAX_PAGE_SIZE, data_center_from_key};
pub use error::Error;
pub use helper::PING_ACK;
pub use transport::{TlsMode, TransportConfig};
