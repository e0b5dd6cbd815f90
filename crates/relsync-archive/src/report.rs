use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct ArchiveReport {
    pub entry_count: usize,
    pub total_bytes: u64,
    pub entries: Vec<ExtractedEntry>,
}

#[derive(Clone, Debug)]
pub struct ExtractedEntry {
    pub original_path: PathBuf,
    pub target_path: PathBuf,
    pub size: u64,
    pub is_directory: bool,
}
