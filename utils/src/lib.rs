mod config;
mod logging;
mod naming;
mod validation;

pub use config::{ConfigStore, EnvConfigStore, LayeredConfigStore, MapConfigStore};
pub use logging::{parse_log_level, setup_logging, setup_logging_with_level, DEFAULT_LOG_LEVEL};
pub use naming::{provider_name, repository_id, resource_name};
pub use validation::{validate_name_segment, validate_not_empty, validate_positive};
