use thiserror::Error;

/// Every failure is fatal; the binary prints it with its source chain and
/// exits non-zero. Messages never repeat their source.
#[derive(Debug, Error)]
pub enum BrowserError {
    /// The proxy query command exited unsuccessfully. Carries its stderr.
    #[error("{0}")]
    ProxyQuery(String),

    #[error("failed to run `{program}`")]
    CommandSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed proxy configuration")]
    ProxyOutput(#[from] serde_json::Error),

    #[error("proxy configuration is missing `{0}`")]
    MissingProxyField(String),

    #[error("unsupported proxy scheme `{0}`")]
    UnsupportedProxyScheme(String),

    #[error("invalid {scheme} proxy `{url}`")]
    InvalidProxy {
        scheme: String,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request failed")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned {status}")]
    HttpStatus {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("failed to write output")]
    Output(#[from] std::io::Error),
}

pub type Result<T, E = BrowserError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn source_is_printed_once_in_chain() {
        let err = BrowserError::CommandSpawn {
            program: "snapctl".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };

        assert_eq!(err.to_string(), "failed to run `snapctl`");
        assert_eq!(
            format!("{:#}", anyhow::Error::from(err)),
            "failed to run `snapctl`: not found"
        );
    }
}
