//! Common error types for the alchm computational core

use crate::properties::Dimension;
use thiserror::Error;

/// Common result type for core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced to the batch driver
///
/// One cuisine's failure never aborts a batch; the driver receives the error
/// as a value, skips the cuisine, and continues.
#[derive(Error, Debug)]
pub enum Error {
    /// Aggregation or analysis over zero recipes is undefined
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// Malformed upstream vector: a dimension carries a non-finite component
    #[error("Missing dimension {dimension} for cuisine '{cuisine}'")]
    MissingDimension { cuisine: String, dimension: Dimension },

    /// Invalid option combination or out-of-range parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::Element;

    #[test]
    fn test_missing_dimension_message_names_cuisine_and_dimension() {
        let err = Error::MissingDimension {
            cuisine: "thai".into(),
            dimension: Dimension::Elemental(Element::Water),
        };
        let message = err.to_string();
        assert!(message.contains("thai"));
        assert!(message.contains("Water"));
    }
}
