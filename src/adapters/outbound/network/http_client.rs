use crate::shared::Result;
use std::time::Duration;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Builds the HTTP client shared by all network adapters of one run.
///
/// `reqwest::Client` is a handle to a connection pool; clones share the
/// pool, which is released when the last clone is dropped.
pub fn build_http_client() -> Result<reqwest::Client> {
    let user_agent = format!("depgraph-sbom/{}", env!("CARGO_PKG_VERSION"));
    let client = reqwest::Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(REQUEST_TIMEOUT)
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}
