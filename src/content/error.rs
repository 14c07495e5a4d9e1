//! Content loading errors.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Registry parsing error in `{0}`")]
    Toml(PathBuf, #[source] toml::de::Error),

    #[error("{collection} `{id}` has an invalid date `{value}`")]
    InvalidDate {
        collection: &'static str,
        id: String,
        value: String,
    },

    #[error("duplicate {field} `{value}` in {collection} collection")]
    Duplicate {
        collection: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("{collection} `{id}` has an empty slug")]
    EmptySlug { collection: &'static str, id: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_content_error_display() {
        let io_err = ContentError::Io(
            PathBuf::from("content/til.toml"),
            Error::new(ErrorKind::PermissionDenied, "denied"),
        );
        assert!(format!("{io_err}").contains("content/til.toml"));

        let dup = ContentError::Duplicate {
            collection: "article",
            field: "slug",
            value: "sprout1".into(),
        };
        assert_eq!(format!("{dup}"), "duplicate slug `sprout1` in article collection");

        let date = ContentError::InvalidDate {
            collection: "til",
            id: "3".into(),
            value: "soon".into(),
        };
        assert_eq!(format!("{date}"), "til `3` has an invalid date `soon`");
    }
}
