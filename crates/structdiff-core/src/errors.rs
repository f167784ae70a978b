use thiserror::Error;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and CLI output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Traversal
    /// Both compared values are present but of different runtime types
    TypeMismatch,
    /// Recursion went deeper than the configured `max_depth`
    DepthExceeded,

    // Recovered locally (logged, never returned by `calculate`)
    /// A participating field could not be read or written
    FieldAccess,
    /// A default instance could not be constructed for an absent original
    Instantiation,

    // Configuration
    InvalidConfig,

    // Integration/IO
    Io,
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::TypeMismatch => "ERR_TYPE_MISMATCH",
            ExErrorKind::DepthExceeded => "ERR_DEPTH_EXCEEDED",
            ExErrorKind::FieldAccess => "ERR_FIELD_ACCESS",
            ExErrorKind::Instantiation => "ERR_INSTANTIATION",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }

    /// Whether an error of this kind aborts the whole operation
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ExErrorKind::FieldAccess | ExErrorKind::Instantiation)
    }
}

/// Canonical structured error type
///
/// Carries the classification used for programmatic handling plus the key
/// path (`tag`) at which the failure happened.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    tag: Option<String>,
    type_names: Option<(String, String)>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            tag: None,
            type_names: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add key path context
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Record the two offending runtime types of a mismatch
    pub fn with_type_names(
        mut self,
        original: impl Into<String>,
        current: impl Into<String>,
    ) -> Self {
        self.type_names = Some((original.into(), current.into()));
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the key path context, if any
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Get the `(original, current)` type names of a mismatch, if any
    pub fn type_names(&self) -> Option<(&str, &str)> {
        self.type_names
            .as_ref()
            .map(|(a, b)| (a.as_str(), b.as_str()))
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(tag) = &self.tag {
            if tag.is_empty() {
                write!(f, " (at root)")?;
            } else {
                write!(f, " (at {})", tag)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// A participating field could not be read or written.
///
/// Raised by `Diffable::read_field` / `Diffable::copy_field`. The engine
/// logs it and skips the field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("field '{field}' of {type_name} is not accessible: {reason}")]
pub struct FieldAccessError {
    pub type_name: String,
    pub field: String,
    pub reason: String,
}

impl FieldAccessError {
    /// The field name is not declared on the type
    pub fn unknown_field(type_name: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            field: field.into(),
            reason: "no such participating field".to_string(),
        }
    }

    /// The field exists but cannot be accessed
    pub fn inaccessible(
        type_name: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Typed error taxonomy for diff operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DiffError {
    /// Both values present but of different runtime types
    #[error("'original' and 'current' arguments not of the same type at '{tag}': original: {original_type}, current: {current_type}")]
    TypeMismatch {
        tag: String,
        original_type: String,
        current_type: String,
    },

    /// Traversal exceeded the configured depth limit
    #[error("maximum traversal depth {max_depth} exceeded at '{tag}'")]
    DepthExceeded { tag: String, max_depth: usize },

    /// A participating field could not be read or written
    #[error(transparent)]
    FieldAccess(#[from] FieldAccessError),

    /// A default instance could not be constructed
    #[error("cannot instantiate default {type_name}: {reason}")]
    Instantiation { type_name: String, reason: String },

    /// Engine configuration is invalid
    #[error("invalid engine configuration: {reason}")]
    InvalidConfig { reason: String },

    /// IO failure (configuration files, CLI input)
    #[error("IO error: {message}")]
    Io { message: String },

    /// JSON/TOML (de)serialization failure
    #[error("serialization error: {message}")]
    Serialization { message: String },
}

impl From<DiffError> for ExError {
    fn from(err: DiffError) -> Self {
        match &err {
            DiffError::TypeMismatch {
                tag,
                original_type,
                current_type,
            } => ExError::new(ExErrorKind::TypeMismatch)
                .with_tag(tag.clone())
                .with_type_names(original_type.clone(), current_type.clone())
                .with_message(err.to_string()),

            DiffError::DepthExceeded { tag, .. } => ExError::new(ExErrorKind::DepthExceeded)
                .with_tag(tag.clone())
                .with_message(err.to_string()),

            DiffError::FieldAccess(inner) => ExError::new(ExErrorKind::FieldAccess)
                .with_tag(inner.field.clone())
                .with_message(inner.to_string()),

            DiffError::Instantiation { .. } => {
                ExError::new(ExErrorKind::Instantiation).with_message(err.to_string())
            }

            DiffError::InvalidConfig { .. } => {
                ExError::new(ExErrorKind::InvalidConfig).with_message(err.to_string())
            }

            DiffError::Io { .. } => ExError::new(ExErrorKind::Io).with_message(err.to_string()),

            DiffError::Serialization { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(err.to_string())
            }
        }
    }
}

impl From<FieldAccessError> for ExError {
    fn from(err: FieldAccessError) -> Self {
        DiffError::FieldAccess(err).into()
    }
}

impl From<serde_json::Error> for DiffError {
    fn from(err: serde_json::Error) -> Self {
        DiffError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for DiffError {
    fn from(err: toml::de::Error) -> Self {
        DiffError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for DiffError {
    fn from(err: std::io::Error) -> Self {
        DiffError::Io {
            message: err.to_string(),
        }
    }
}
