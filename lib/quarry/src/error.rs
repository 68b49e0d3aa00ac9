use oxrdfio::RdfParseError;

/// An error raised while loading facts into a [`Store`](crate::store::Store).
///
/// A failed load leaves the store unloaded; retrying with corrected input is
/// permitted.
#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    /// An error raised while parsing the fact file.
    #[error(transparent)]
    Parsing(#[from] RdfParseError),
}
