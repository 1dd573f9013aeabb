use std::collections::BTreeMap;

use clap::ValueEnum;
use serde::Deserialize;

use crate::command::CommandRunner;
use crate::error::{BrowserError, Result};

pub const SNAPCTL: &str = "snapctl";
pub const SNAPCTL_PROXY_ARGS: [&str; 5] = ["get", "--view", ":proxy-observe", "https", "-d"];

/// Scheme to proxy endpoint. Empty means connect directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxyConfig(BTreeMap<String, String>);

impl ProxyConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, scheme: impl Into<String>, url: impl Into<String>) -> Self {
        self.0.insert(scheme.into(), url.into());
        self
    }

    pub fn get(&self, scheme: &str) -> Option<&str> {
        self.0.get(scheme).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ProxyConfig {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ProxySource {
    /// Ask snapctl for the proxy-observe view
    #[default]
    Snapctl,
    /// Connect directly
    None,
}

pub trait ResolveProxy {
    fn resolve(&self) -> Result<ProxyConfig>;
}

/// Reads the HTTPS proxy from the snap `proxy-observe` view.
pub struct SnapctlResolver<R> {
    runner: R,
}

#[derive(Deserialize)]
struct ProxyView {
    https: Option<ProxyEndpoint>,
}

#[derive(Deserialize)]
struct ProxyEndpoint {
    url: Option<String>,
}

impl<R: CommandRunner> SnapctlResolver<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    fn parse(stdout: &str) -> Result<ProxyConfig> {
        let view: ProxyView = serde_json::from_str(stdout)?;
        let endpoint = view
            .https
            .ok_or_else(|| BrowserError::MissingProxyField("https".into()))?;

        match endpoint.url {
            Some(url) if !url.trim().is_empty() => Ok(ProxyConfig::new().with("https", url)),
            _ => Err(BrowserError::MissingProxyField("https.url".into())),
        }
    }
}

impl<R: CommandRunner> ResolveProxy for SnapctlResolver<R> {
    fn resolve(&self) -> Result<ProxyConfig> {
        let output = self
            .runner
            .run(SNAPCTL, &SNAPCTL_PROXY_ARGS)
            .map_err(|source| BrowserError::CommandSpawn {
                program: SNAPCTL.to_string(),
                source,
            })?;

        if !output.success {
            tracing::debug!("{} exited with {:?}", SNAPCTL, output.code);
            let stderr = output.stderr.trim_end();
            let message = match output.code {
                _ if !stderr.is_empty() => stderr.to_string(),
                Some(code) => format!("{} exited with status {}", SNAPCTL, code),
                None => format!("{} was terminated by a signal", SNAPCTL),
            };
            return Err(BrowserError::ProxyQuery(message));
        }

        let proxies = Self::parse(&output.stdout)?;
        tracing::debug!("resolved proxies: {:?}", proxies);
        Ok(proxies)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoProxyResolver;

impl ResolveProxy for NoProxyResolver {
    fn resolve(&self) -> Result<ProxyConfig> {
        Ok(ProxyConfig::new())
    }
}

pub fn resolver_for<R>(source: ProxySource, runner: R) -> Box<dyn ResolveProxy>
where
    R: CommandRunner + 'static,
{
    match source {
        ProxySource::Snapctl => Box::new(SnapctlResolver::new(runner)),
        ProxySource::None => Box::new(NoProxyResolver),
    }
}
