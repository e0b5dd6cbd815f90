pub mod clear_dir;
pub mod copy_dir;
pub mod retention;

pub use clear_dir::{ClearOutcome, clear_dir, remove_dir_if_exists};
pub use copy_dir::copy_dir_all;
pub use retention::prune_oldest;
