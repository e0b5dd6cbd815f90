mod staging;

pub use staging::{BACKUP_KEY_LEN, Staging, backup_key};
