use crate::error::TransportError;
use crate::gateway::GatewayResult;

/// Result of a gateway call as seen by the store: either the service
/// answered, or the change has to be applied locally only.
#[derive(Debug)]
pub enum Outcome<T> {
    Remote(T),
    Local(TransportError),
}

impl<T> Outcome<T> {
    pub fn is_remote(&self) -> bool {
        matches!(self, Outcome::Remote(_))
    }
}

impl<T> From<GatewayResult<T>> for Outcome<T> {
    fn from(res: GatewayResult<T>) -> Self {
        match res {
            Ok(v) => Outcome::Remote(v),
            Err(e) => Outcome::Local(e),
        }
    }
}
