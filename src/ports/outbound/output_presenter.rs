use crate::shared::Result;

/// OutputPresenter port for presenting the final inventory
///
/// Abstracts the destination (stdout, file) of the serialized
/// generation result.
pub trait OutputPresenter {
    /// Presents the serialized content to the output destination
    ///
    /// # Errors
    /// Returns an error if:
    /// - Writing to the output destination fails
    /// - The destination is not a regular file or is a symbolic link
    fn present(&self, content: &str) -> Result<()>;
}
