pub mod allocation_config;
pub mod app_config;
pub mod loader;
pub mod service_config;

pub use allocation_config::AllocationConfig;
pub use app_config::AppConfig;
pub use loader::{DEFAULT_CONFIG_FILE, load_config, parse_config_content};
pub use service_config::{LCD_URL_ENV, ServiceConfig};
