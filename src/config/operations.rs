mod io;

pub use io::{default_config_path, load_cfg, save_cfg};
