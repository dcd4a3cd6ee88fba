//! Infrastructure layer for filesystem locations.

pub mod paths;

pub use paths::{
    get_config_dir, get_config_path, get_data_dir, APP_DIR_NAME, CONFIG_FILE, FAVORITES_FILE,
    LOG_FILE,
};
