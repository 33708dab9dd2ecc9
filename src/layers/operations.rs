//! Filesystem lookups for layer builders

mod lookup;

pub use lookup::{
    data_dir, find_icd_files, find_library_dirs, find_named_dirs, require_dir, require_file,
};
