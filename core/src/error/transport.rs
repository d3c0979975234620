use std::{error::Error as StdError, fmt};

/// Diagnostic category of a [`TransportError`].
///
/// Callers never branch on this; it only enriches logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    Timeout,
    Connect,
    Request,
    Body,
    Decode,
    Status,
    Offline,
    Unknown,
}

impl TransportErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Connect => "connect",
            Self::Request => "request",
            Self::Body => "body",
            Self::Decode => "decode",
            Self::Status => "status",
            Self::Offline => "offline",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single failure type of the task gateway: any network failure or
/// non-success response.
#[derive(Debug)]
pub struct TransportError {
    kind: TransportErrorKind,
    status: Option<u16>,
    url: Option<String>,
    message: String,
    source: Option<anyhow::Error>,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            status: None,
            url: None,
            message: message.into(),
            source: None,
        }
    }

    pub fn offline() -> Self {
        Self::new(TransportErrorKind::Offline, "task service disabled (offline mode)")
    }

    pub fn status_error(status: u16, url: impl Into<String>, preview: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Status, preview)
            .with_status(status)
            .with_url(url)
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.source = Some(anyhow::Error::new(source));
        self
    }

    pub fn kind(&self) -> TransportErrorKind {
        self.kind
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transport error kind={}", self.kind)?;
        if let Some(status) = self.status {
            write!(f, " status={}", status)?;
        }
        if let Some(url) = &self.url {
            write!(f, " url={}", url)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl StdError for TransportError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|err| &**err as &(dyn StdError + 'static))
    }
}
