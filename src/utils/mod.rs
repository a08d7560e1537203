pub mod environment;
pub mod logging;
pub mod paths;
pub mod terminal;

pub use environment::{PROJECTS_FILE_NAME, get_home_dir, get_projects_file};
pub use logging::init_tracing;
pub use paths::{format_path_with_tilde, validate_file_size};
pub use terminal::sanitize_for_display;
