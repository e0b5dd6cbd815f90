//! Effects layer: operations that perform I/O.

mod fetcher;
mod http;

pub use fetcher::Fetcher;
pub use http::{HttpClient, HttpResponse};

#[cfg(feature = "reqwest")]
pub use http::{ClientSetting, ReqwestClient};
