pub mod http_client;
pub mod offline;
pub mod service;

pub use http_client::HttpClient;
pub use offline::OfflineGateway;
pub use service::HttpTaskGateway;
