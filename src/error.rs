use thiserror::Error;

/// Errors surfaced by the fetch and parse layers.
///
/// A page with zero semester headings is not an error: it parses into a
/// record with two empty link lists ("nothing published yet").
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The schedule page answered with a non-success status. Fatal for the
    /// whole run; no partial results are produced.
    #[error("schedule page request failed with status {status}")]
    FetchFailed { status: u16 },

    /// An expected structural container is missing from the markup. Fatal
    /// for the page when raised while splitting into institute blocks;
    /// scoped to a single institute when raised during link extraction.
    #[error("page layout changed: {0} not found")]
    StructureMismatch(&'static str),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
