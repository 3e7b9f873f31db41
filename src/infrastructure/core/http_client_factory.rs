use reqwest::Client;
use std::time::Duration;

pub struct HttpClientFactory;

impl HttpClientFactory {
    /// Creates a plain HTTP client: one attempt per request, no retry layer.
    ///
    /// A builder failure is returned rather than replaced by a client
    /// without the timeout.
    pub fn create_client(timeout: Duration) -> reqwest::Result<Client> {
        Client::builder()
            .pool_max_idle_per_host(2)
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10).min(timeout))
            .user_agent(concat!("cryptosheet/", env!("CARGO_PKG_VERSION")))
            .build()
    }
}
