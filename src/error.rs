//! Library error type.

use thiserror::Error;

/// Errors produced by the devdesk utilities.
#[derive(Debug, Error)]
pub enum Error {
    /// The purl names a package type other than `vcpkg`.
    #[error("Invalid purl type: {0}. Expected 'vcpkg'")]
    InvalidPurlType(String),

    /// The purl could not be split into type, name and version.
    #[error("Invalid purl format. Expected pkg:vcpkg/portname@version")]
    InvalidPurlFormat,

    /// The purl has no `@version` part where one is needed.
    #[error("Version is required in the purl")]
    MissingVersion,

    /// A port name that cannot be placed in a registry path.
    #[error("Invalid port name: {0:?}")]
    InvalidPortName(String),

    /// No entry of the port's versions file matched.
    #[error("Version {version} not found for port {port}")]
    VersionNotFound {
        /// Requested version.
        version: String,
        /// Port name.
        port: String,
    },

    /// The port's git tree has neither `vcpkg.json` nor `CONTROL`.
    #[error("No vcpkg.json or CONTROL file in git tree {0}")]
    MetadataFileNotFound(String),

    /// The server answered with a non-2xx status.
    #[error("Failed to fetch {what}: {status} {status_text}")]
    HttpStatus {
        /// What was being fetched (`versions`, `git tree`, `file blob`).
        what: &'static str,
        /// Numeric status code.
        status: u16,
        /// Reason phrase.
        status_text: String,
    },

    /// A port failed (transport, disk, model API).
    #[error("{context}: {source}")]
    Port {
        /// What was being attempted.
        context: String,
        /// Underlying port error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A JSON document could not be decoded.
    #[error("Failed to parse {what}: {source}")]
    Json {
        /// What was being parsed.
        what: String,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },

    /// A storage key contains characters that cannot name a file.
    #[error("Invalid storage key: {0:?}")]
    InvalidStorageKey(String),

    /// A work log with the given id does not exist.
    #[error("Work log not found: {0}")]
    WorkLogNotFound(String),

    /// An id prefix matches more than one work log.
    #[error("Work log id {0} is ambiguous")]
    AmbiguousWorkLogId(String),

    /// A required text field was empty.
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

impl Error {
    /// Wraps a port error with context.
    pub fn port(
        context: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::Port { context: context.into(), source }
    }

    /// Wraps a JSON error with the name of what was being parsed.
    pub fn json(what: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json { what: what.into(), source }
    }
}

/// Result alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;
