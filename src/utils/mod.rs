pub mod environment;
pub mod paths;
pub mod terminal;

pub use environment::get_claude_dir;
pub use paths::{expand_tilde, format_path_with_tilde, session_id_from_path};
pub use terminal::{strip_ansi_codes, truncate_chars};
