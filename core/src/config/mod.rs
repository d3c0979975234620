mod load;
mod types;

pub use load::{get_taskdeck_data_dir, load_default, load_from_path, load_from_str};
pub use types::{ApiConfig, AppConfig, LoggingConfig, StoreOptions, TuiConfig};
