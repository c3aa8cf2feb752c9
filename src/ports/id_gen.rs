//! ID generator port.

/// Generates unique identifiers for stored records.
pub trait IdGenerator: Send + Sync {
    /// Generates a new unique identifier string.
    fn generate_id(&self) -> String;
}
