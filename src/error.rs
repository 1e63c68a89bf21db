//! Error types for the binding layer and the component host.

use thiserror::Error;

/// Errors raised while mounting or updating a component tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A connected component was mounted with no store in its context.
    ///
    /// Fatal to the mount: the binding cannot render without a store.
    #[error("root component must be wrapped with `provider` (connected component `{component}`)")]
    MissingProvider { component: String },

    /// Flushing kept scheduling new updates past the configured pass budget.
    #[error("update queue did not settle after {passes} flush passes")]
    UpdateLoop { passes: u32 },
}

impl Error {
    /// Short machine-readable identifier for the error kind.
    pub fn error_type(&self) -> &'static str {
        match self {
            Error::MissingProvider { .. } => "missing_provider",
            Error::UpdateLoop { .. } => "update_loop",
        }
    }
}
