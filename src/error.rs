//! Error types for harvesting one element.

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while turning one listing page into a dataset file.
#[derive(Debug, Error)]
pub enum HarvestError {
    /// DNS, connection, timeout or non-2xx status.
    #[error("fetch failed for {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("could not resolve URL '{input}': {source}")]
    InvalidUrl {
        input: String,
        #[source]
        source: url::ParseError,
    },

    #[error("anchor '{label}' has no href attribute")]
    MissingHref { label: String },

    /// The page layout no longer puts metadata next to each anchor.
    #[error("anchor '{label}' has no following sibling with metadata")]
    MissingSibling { label: String },

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, HarvestError>;

/// A failed element, as reported in the run summary.
#[derive(Debug, Error)]
#[error("{element}: {error}")]
pub struct ElementFailure {
    pub element: String,
    #[source]
    pub error: HarvestError,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_error_display() {
        let err = HarvestError::MissingSibling {
            label: "H.pbe-rrkjus.UPF".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "anchor 'H.pbe-rrkjus.UPF' has no following sibling with metadata"
        );
    }

    #[test]
    fn test_element_failure_display() {
        let failure = ElementFailure {
            element: "fe".to_string(),
            error: HarvestError::MissingHref {
                label: "Fe.pbe.UPF".to_string(),
            },
        };
        assert_eq!(
            failure.to_string(),
            "fe: anchor 'Fe.pbe.UPF' has no href attribute"
        );
    }

    #[test]
    fn test_write_error_mentions_path() {
        let err = HarvestError::Write {
            path: PathBuf::from("data/h.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("data/h.json"));
    }
}
