use reqwest::blocking::Client;
use reqwest::Proxy;
use url::Url;

use crate::error::{BrowserError, Result};
use crate::proxy::ProxyConfig;

const USER_AGENT: &str = concat!("browser-cli/", env!("CARGO_PKG_VERSION"));

pub trait Fetch {
    /// Returns the response body of a single GET.
    fn fetch(&self, url: &Url, proxies: &ProxyConfig) -> Result<String>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HttpFetcher;

impl HttpFetcher {
    /// Only the proxies in `proxies` are used; the environment is not consulted.
    pub fn client(proxies: &ProxyConfig) -> Result<Client> {
        let mut builder = Client::builder().user_agent(USER_AGENT).no_proxy();

        for (scheme, url) in proxies.iter() {
            builder = builder.proxy(proxy_for(scheme, url)?);
        }

        Ok(builder.build()?)
    }
}

fn proxy_for(scheme: &str, url: &str) -> Result<Proxy> {
    let proxy = match scheme {
        "http" => Proxy::http(url),
        "https" => Proxy::https(url),
        "all" => Proxy::all(url),
        other => return Err(BrowserError::UnsupportedProxyScheme(other.to_string())),
    };

    proxy.map_err(|source| BrowserError::InvalidProxy {
        scheme: scheme.to_string(),
        url: url.to_string(),
        source,
    })
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &Url, proxies: &ProxyConfig) -> Result<String> {
        let client = Self::client(proxies)?;

        tracing::debug!("fetching {}", url);
        let response = client.get(url.clone()).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(BrowserError::HttpStatus {
                status,
                url: url.to_string(),
            });
        }

        let body = response.text()?;
        tracing::debug!("{} returned {} ({} bytes)", url, status, body.len());
        Ok(body)
    }
}
