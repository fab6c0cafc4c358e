//! Error types for the scheduling library.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all scheduler operations.
#[derive(Error, Debug)]
pub enum SchedulerError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Occurrence not found for the given ID
    #[error("Occurrence with ID {id} not found")]
    OccurrenceNotFound { id: String },
    /// No occurrence carries the given group ID
    #[error("Repeat group {group_id} not found")]
    GroupNotFound { group_id: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
    /// Reminder delivery errors
    #[error("Notifier error: {message}")]
    Notifier { message: String },
    /// A delete-then-recreate pass over a repeat group stopped partway.
    ///
    /// Repository calls already applied are not rolled back; retrying the
    /// whole edit recomputes the full target day set. `removed` lists the
    /// occurrences deleted before the failure.
    #[error("Regeneration of group {group_id} failed during {step}: {source}")]
    Regeneration {
        group_id: String,
        step: RegenerationStep,
        removed: Vec<String>,
        #[source]
        source: Box<SchedulerError>,
    },
}

/// The stage of a group regeneration at which a failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegenerationStep {
    /// Removing the existing future siblings
    Delete,
    /// Persisting the freshly expanded siblings
    Create,
}

impl std::fmt::Display for RegenerationStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegenerationStep::Delete => write!(f, "delete"),
            RegenerationStep::Create => write!(f, "create"),
        }
    }
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> SchedulerError {
        SchedulerError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> SchedulerError {
        SchedulerError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl SchedulerError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Wraps `self` as the aggregate failure of a group regeneration.
    pub fn during_regeneration(self, group_id: impl Into<String>, step: RegenerationStep) -> Self {
        SchedulerError::Regeneration {
            group_id: group_id.into(),
            step,
            removed: Vec::new(),
            source: Box::new(self),
        }
    }

    /// Records the occurrences a failed regeneration had already deleted.
    pub fn with_removed(mut self, ids: Vec<String>) -> Self {
        if let SchedulerError::Regeneration { removed, .. } = &mut self {
            *removed = ids;
        }
        self
    }

    /// Occurrences a failed regeneration deleted before it stopped.
    pub fn removed_before_failure(&self) -> &[String] {
        match self {
            SchedulerError::Regeneration { removed, .. } => removed,
            _ => &[],
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| SchedulerError::database(message).with_source(e))
    }
}

/// Result type alias for scheduler operations
pub type Result<T> = std::result::Result<T, SchedulerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regeneration_error_names_step_and_group() {
        let inner = SchedulerError::OccurrenceNotFound {
            id: "abc".to_string(),
        };
        let err = inner.during_regeneration("g-1", RegenerationStep::Create);

        let message = err.to_string();
        assert!(message.contains("g-1"));
        assert!(message.contains("create"));
        assert!(matches!(
            err,
            SchedulerError::Regeneration {
                step: RegenerationStep::Create,
                ..
            }
        ));
    }

    #[test]
    fn test_removed_ids_only_attach_to_regeneration() {
        let err = SchedulerError::Configuration {
            message: "disk full".to_string(),
        }
        .during_regeneration("g-1", RegenerationStep::Create)
        .with_removed(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(err.removed_before_failure(), ["a", "b"]);

        let plain = SchedulerError::GroupNotFound {
            group_id: "g-1".to_string(),
        }
        .with_removed(vec!["a".to_string()]);
        assert!(plain.removed_before_failure().is_empty());
    }

    #[test]
    fn test_invalid_input_builder() {
        let err = SchedulerError::invalid_input("end").with_reason("must be after start");
        assert_eq!(
            err.to_string(),
            "Invalid input for field 'end': must be after start"
        );
    }
}
