//! Engine configuration.
//!
//! Priority: environment variables > config file > built-in defaults.

pub mod load;
pub mod model;

pub use load::{ENV_CLUSTER_LOG_DIR, ENV_OFFLINE_LOG_DIR, ENV_PCAP_PATH};
pub use model::{
    CategorySpec, EngineConfig, KeyFieldSpec, DEFAULT_CLUSTER_LOG_DIR, DEFAULT_OFFLINE_LOG_DIR,
    DEFAULT_PCAP_PATH,
};
