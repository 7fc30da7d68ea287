/// Persistence port for the history log.
///
/// Implementations should handle errors gracefully without panicking.
pub trait HistoryMedium {
    /// Loads the persisted payload.
    ///
    /// # Returns
    /// * `Some(String)` - The persisted payload if present and readable
    /// * `None` - If nothing has been persisted or retrieval fails
    fn load(&self) -> Option<String>;

    /// Persists the payload, replacing any previous one.
    ///
    /// # Notes
    /// Errors during storage should be handled gracefully (logged but not
    /// panicked). This method does not return errors to maintain
    /// fire-and-forget semantics; the in-memory log stays authoritative.
    fn save(&self, payload: &str);

    /// Removes the persisted payload entirely.
    fn clear(&self);
}
