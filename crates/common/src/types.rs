use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a product record.
///
/// Assigned by the store when a product is created and never changed
/// afterwards. Wraps a UUID to keep product IDs from being mixed up
/// with other UUID-based identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(Uuid);

impl ProductId {
    /// Creates a new random product ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a product ID from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for ProductId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<ProductId> for Uuid {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_id_new_creates_unique_ids() {
        let id1 = ProductId::new();
        let id2 = ProductId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn product_id_from_uuid_preserves_value() {
        let uuid = Uuid::new_v4();
        let id = ProductId::from_uuid(uuid);
        assert_eq!(id.as_uuid(), uuid);
    }

    #[test]
    fn product_id_serializes_as_bare_string() {
        let uuid = Uuid::new_v4();
        let id = ProductId::from_uuid(uuid);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{uuid}\""));
        let back: ProductId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
