use crate::data::HistoryMedium;
use std::fs;
use std::path::PathBuf;

/// FileHistoryMedium persists the history log as a single JSON file inside
/// a dot-directory, `.testops/history.json` by default.
#[derive(Debug, Clone)]
pub struct FileHistoryMedium {
    /// The root folder path for persisted state (defaults to ".testops")
    folder: String,
}

impl FileHistoryMedium {
    /// Creates a new FileHistoryMedium
    ///
    /// # Arguments
    /// * `folder` - Optional root folder path. If None, defaults to ".testops"
    pub fn new(folder: Option<String>) -> Self {
        Self {
            folder: folder.unwrap_or_else(|| ".testops".to_string()),
        }
    }

    fn history_path(&self) -> PathBuf {
        PathBuf::from(&self.folder).join("history.json")
    }
}

impl HistoryMedium for FileHistoryMedium {
    fn load(&self) -> Option<String> {
        match fs::read_to_string(self.history_path()) {
            Ok(contents) => Some(contents),
            Err(_) => {
                // File not found or read error - treat as no history
                None
            }
        }
    }

    fn save(&self, payload: &str) {
        let dir = PathBuf::from(&self.folder);

        if let Err(e) = fs::create_dir_all(&dir) {
            eprintln!("Failed to create history directory {:?}: {}", dir, e);
            return;
        }

        let path = self.history_path();
        if let Err(e) = fs::write(&path, payload) {
            eprintln!("Failed to write history file {:?}: {}", path, e);
        }
    }

    fn clear(&self) {
        let path = self.history_path();

        if path.exists() {
            if let Err(e) = fs::remove_file(&path) {
                eprintln!("Failed to remove history file {:?}: {}", path, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_history_path_construction() {
        let medium = FileHistoryMedium::new(Some("/tmp/history".to_string()));
        assert_eq!(
            medium.history_path().to_str().unwrap(),
            "/tmp/history/history.json"
        );
    }

    #[test]
    fn test_save_load_clear_cycle() {
        // Use a temporary directory for testing
        let test_dir = format!("/tmp/testops_medium_{}", std::process::id());
        let medium = FileHistoryMedium::new(Some(test_dir.clone()));

        // Nothing persisted yet
        assert_eq!(medium.load(), None);

        medium.save("[]");
        assert_eq!(medium.load(), Some("[]".to_string()));

        // Overwrite
        medium.save(r#"[{"entry": 1}]"#);
        assert_eq!(medium.load(), Some(r#"[{"entry": 1}]"#.to_string()));

        medium.clear();
        assert_eq!(medium.load(), None);

        // Clearing again is a no-op
        medium.clear();

        // Cleanup
        let _ = fs::remove_dir_all(&test_dir);
    }

    #[test]
    fn test_default_folder() {
        let medium = FileHistoryMedium::new(None);
        assert_eq!(medium.folder, ".testops");
    }
}
