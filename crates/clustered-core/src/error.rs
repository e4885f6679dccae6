use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClusterError {
    /// `position` is the 0-based source index of the item that did not fit.
    #[error("Cluster ending at item {position} exceeds the limit of {limit} items")]
    ClusterTooLarge { position: usize, limit: usize },

    #[error("Invalid cluster settings: {0}")]
    InvalidSettings(String),
}

pub type Result<T> = std::result::Result<T, ClusterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formats_correctly() {
        let err = ClusterError::InvalidSettings("max_cluster_len must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid cluster settings: max_cluster_len must be positive"
        );
    }

    #[test]
    fn error_cluster_too_large_formats_correctly() {
        let err = ClusterError::ClusterTooLarge {
            position: 7,
            limit: 2,
        };
        assert_eq!(
            err.to_string(),
            "Cluster ending at item 7 exceeds the limit of 2 items"
        );
    }
}
