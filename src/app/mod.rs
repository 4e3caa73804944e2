// Gateway module for app - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod config;
mod credentials;

// Public re-exports - the ONLY way to access app functionality
pub use config::{
    get_config_dir, init_config, load_config, load_config_from, local_config_path, save_config,
    CatalogConfig, Config, ConfigSources, PrimaryProviderConfig, SecondaryProviderConfig, SummaryConfig,
};
pub use credentials::Credentials;
