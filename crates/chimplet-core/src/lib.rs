// chimplet-core: Session-scoped facade between chimplet-api and its callers.

pub mod config;
pub mod error;
pub mod facade;
pub mod reconcile;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ClientOptions, FacadeConfig, TlsVerification};
pub use error::{CoreError, ErrorKind};
pub use facade::{
    CampaignSpec, CreatedCampaign, Facade, Forwarded, NO_GROUPINGS_CODE, Operation, Upsert,
};
pub use reconcile::{ReconcilePlan, ReconcileReport};

// Wire models are part of the facade's vocabulary.
pub use chimplet_api::models;
