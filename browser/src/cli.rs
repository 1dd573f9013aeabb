use clap::{Parser, ValueEnum};
use url::Url;

use crate::proxy::ProxySource;

#[derive(Debug, Parser)]
#[command(name = "browser-cli", version)]
#[command(about = "Fetch a web page and render it as text in the terminal", long_about = None)]
pub struct Cli {
    /// Absolute URL of the page to fetch
    #[arg(value_name = "URL")]
    pub url: Url,

    /// Where the outbound proxy comes from
    #[arg(long, value_enum, default_value_t = ProxySource::Snapctl)]
    pub proxy_source: ProxySource,

    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    /// Log more to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Style output when stdout is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn apply(self) {
        match self {
            ColorMode::Auto => {}
            ColorMode::Always => colored::control::set_override(true),
            ColorMode::Never => colored::control::set_override(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn url_is_required() {
        let err = Cli::try_parse_from(["browser-cli"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn relative_url_is_rejected() {
        let err = Cli::try_parse_from(["browser-cli", "example.com"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["browser-cli", "https://example.com/"]).unwrap();
        assert_eq!(cli.url.as_str(), "https://example.com/");
        assert_eq!(cli.proxy_source, ProxySource::Snapctl);
        assert_eq!(cli.color, ColorMode::Auto);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn flags() {
        let cli = Cli::try_parse_from([
            "browser-cli",
            "--proxy-source",
            "none",
            "--color",
            "never",
            "-vv",
            "http://localhost:8000/a",
        ])
        .unwrap();
        assert_eq!(cli.proxy_source, ProxySource::None);
        assert_eq!(cli.color, ColorMode::Never);
        assert_eq!(cli.verbose, 2);
    }
}
