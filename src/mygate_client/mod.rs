mod client;
mod http;
mod models;

pub use client::MygateClient;
pub use http::RetryPolicy;
pub use models::{NodeRecord, NodesPage, UserInfo};
