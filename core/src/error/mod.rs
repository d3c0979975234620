#[allow(clippy::module_inception)]
pub mod error;
pub mod transport;

pub use error::CliError;
pub use transport::{TransportError, TransportErrorKind};
