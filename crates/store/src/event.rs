use common::ProductId;
use serde::Serialize;

/// The store operations, named for notices and failure messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Replace the collection from the seed source.
    Load,

    /// Append a freshly created product.
    Create,

    /// Merge a patch onto an existing product.
    Update,

    /// Remove a product by id.
    Remove,
}

impl Operation {
    /// Returns the operation name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Load => "load",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Remove => "remove",
        }
    }

    /// The fixed user-facing message set on the error flag when this
    /// operation fails against the simulated backend.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::Load => "Falha ao carregar produtos.",
            Operation::Create => "Falha ao adicionar produto.",
            Operation::Update => "Falha ao atualizar produto.",
            Operation::Remove => "Falha ao excluir produto.",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Change notice broadcast to subscribers.
///
/// Notices are hints, not the data: the channel is lossy for slow
/// subscribers and a consumer reacts by pulling a fresh snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum StoreEvent {
    /// An operation entered its pending phase; `loading` is now visible
    /// as true and any previous error is cleared.
    OperationStarted { op: Operation },

    /// The collection was replaced from the seed source.
    Loaded { count: usize },

    /// A product was appended to the collection.
    Created { id: ProductId },

    /// A product was merged in place.
    Updated { id: ProductId },

    /// A product was removed, or was already absent.
    Removed { id: ProductId },

    /// The operation failed; the collection is unchanged and `error`
    /// carries this message.
    Failed { op: Operation, message: String },
}
