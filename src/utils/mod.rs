pub mod paths;

pub use paths::{
    CONTENT_RECORD_FILE, JCR_CONTENT, JCR_CONTENT_SAFE, JCR_ROOT, folder_name, folder_path,
    jcr_root_prefix, logical_path, parent_folder,
};
