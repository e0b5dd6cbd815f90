use std::fmt;
use std::io::Read;
use std::sync::Arc;

/// An open response: the advertised length and a body to read from.
pub struct HttpResponse {
    pub content_length: Option<u64>,
    pub body: Box<dyn Read + Send>,
}

impl fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpResponse")
            .field("content_length", &self.content_length)
            .finish_non_exhaustive()
    }
}

impl HttpResponse {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            content_length: Some(bytes.len() as u64),
            body: Box::new(std::io::Cursor::new(bytes)),
        }
    }
}

/// Blocking HTTP client abstraction.
///
/// Implementations follow redirects, apply their own timeouts and turn
/// non-success status codes into errors.
///
/// # Implementations
///
/// - [`ReqwestClient`]: Production implementation using `reqwest`
/// - Mock implementations for testing
pub trait HttpClient: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Issue a GET request and return the response once headers arrive.
    fn get(
        &self,
        url: &str,
        headers: &[(String, String)],
    ) -> std::result::Result<HttpResponse, Self::Error>;
}

impl<C: HttpClient + ?Sized> HttpClient for Arc<C> {
    type Error = C::Error;

    fn get(
        &self,
        url: &str,
        headers: &[(String, String)],
    ) -> std::result::Result<HttpResponse, Self::Error> {
        (**self).get(url, headers)
    }
}

impl<C: HttpClient + ?Sized> HttpClient for &C {
    type Error = C::Error;

    fn get(
        &self,
        url: &str,
        headers: &[(String, String)],
    ) -> std::result::Result<HttpResponse, Self::Error> {
        (**self).get(url, headers)
    }
}

#[cfg(feature = "reqwest")]
mod reqwest_impl {
    use std::time::Duration;

    use reqwest::Proxy;
    use reqwest::blocking::Client;

    use super::*;
    use crate::error::{Error, Result};

    /// Settings used to build a [`ReqwestClient`].
    #[derive(Debug, Clone)]
    pub struct ClientSetting {
        /// Proxy applied to both `http` and `https` traffic.
        pub proxy: Option<String>,
        pub user_agent: String,
        /// Per-operation timeout for connect, read and write.
        pub timeout: Duration,
    }

    impl Default for ClientSetting {
        fn default() -> Self {
            Self {
                proxy: None,
                user_agent: crate::USER_AGENT.to_string(),
                timeout: Duration::from_secs(30),
            }
        }
    }

    impl ClientSetting {
        /// Settings for small API requests.
        pub fn metadata() -> Self {
            Self::default()
        }

        /// Settings for artifact downloads.
        pub fn download() -> Self {
            Self {
                timeout: Duration::from_secs(60),
                ..Self::default()
            }
        }

        pub fn proxy(mut self, proxy: Option<String>) -> Self {
            self.proxy = proxy.filter(|p| !p.trim().is_empty());
            self
        }

        pub fn build(self) -> Result<ReqwestClient> {
            let mut builder = Client::builder()
                .user_agent(self.user_agent)
                .timeout(self.timeout)
                .connect_timeout(self.timeout);

            if let Some(proxy) = &self.proxy {
                let proxy = Proxy::all(proxy.as_str())
                    .map_err(|e| Error::Client(format!("invalid proxy '{proxy}': {e}")))?;
                builder = builder.proxy(proxy);
            }

            let client = builder.build().map_err(|e| Error::Client(e.to_string()))?;
            Ok(ReqwestClient { client })
        }
    }

    /// Production HTTP client implementation using blocking reqwest.
    #[derive(Debug, Clone)]
    pub struct ReqwestClient {
        client: Client,
    }

    impl HttpClient for ReqwestClient {
        type Error = reqwest::Error;

        fn get(
            &self,
            url: &str,
            headers: &[(String, String)],
        ) -> std::result::Result<HttpResponse, Self::Error> {
            let mut request = self.client.get(url);
            for (key, value) in headers {
                request = request.header(key.as_str(), value.as_str());
            }

            let response = request.send()?.error_for_status()?;
            Ok(HttpResponse {
                content_length: response.content_length(),
                body: Box::new(response),
            })
        }
    }

}

#[cfg(feature = "reqwest")]
pub use reqwest_impl::{ClientSetting, ReqwestClient};
