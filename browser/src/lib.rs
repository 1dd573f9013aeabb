pub mod cli;
pub mod command;
pub mod convert;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod proxy;
pub mod render;

use std::io::Write;

use url::Url;

pub use error::{BrowserError, Result};
use fetch::Fetch;
use proxy::ResolveProxy;

/// Resolve proxies, fetch `url`, convert and render it into `out`.
///
/// Nothing is written unless every earlier stage succeeded.
pub fn run<W: Write>(
    url: &Url,
    resolver: &dyn ResolveProxy,
    fetcher: &dyn Fetch,
    out: &mut W,
) -> Result<()> {
    let proxies = resolver.resolve()?;
    let html = fetcher.fetch(url, &proxies)?;

    let markdown = convert::html_to_markdown(&html);
    let rendered = render::render(&markdown);

    writeln!(out, "{}", rendered)?;
    out.flush()?;
    Ok(())
}
