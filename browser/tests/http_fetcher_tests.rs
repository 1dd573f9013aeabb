use browser::fetch::{Fetch, HttpFetcher};
use browser::proxy::ProxyConfig;
use browser::BrowserError;
use mockito::Server;
use url::Url;

#[test]
fn fetches_body_directly() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/page")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body("<h1>Hi</h1><p>World</p>")
        .create();

    let url = Url::parse(&format!("{}/page", server.url())).unwrap();
    let body = HttpFetcher.fetch(&url, &ProxyConfig::new()).unwrap();

    assert_eq!(body, "<h1>Hi</h1><p>World</p>");
    mock.assert();
}

#[test]
fn treats_any_content_type_as_text() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/data")
        .with_status(200)
        .with_header("content-type", "application/octet-stream")
        .with_body("<p>still html</p>")
        .create();

    let url = Url::parse(&format!("{}/data", server.url())).unwrap();
    let body = HttpFetcher.fetch(&url, &ProxyConfig::new()).unwrap();

    assert_eq!(body, "<p>still html</p>");
}

#[test]
fn non_success_status_is_an_error() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/missing")
        .with_status(404)
        .with_body("<h1>Not Found</h1>")
        .create();

    let url = Url::parse(&format!("{}/missing", server.url())).unwrap();
    let err = HttpFetcher.fetch(&url, &ProxyConfig::new()).unwrap_err();

    match err {
        BrowserError::HttpStatus { status, url } => {
            assert_eq!(status.as_u16(), 404);
            assert!(url.ends_with("/missing"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn routes_through_configured_proxy() {
    let mut proxy = Server::new();
    let mock = proxy
        .mock("GET", "/page")
        .match_header("host", "browser.invalid")
        .with_status(200)
        .with_body("<p>via proxy</p>")
        .create();

    let proxies = ProxyConfig::new().with("http", proxy.url());
    let url = Url::parse("http://browser.invalid/page").unwrap();
    let body = HttpFetcher.fetch(&url, &proxies).unwrap();

    assert_eq!(body, "<p>via proxy</p>");
    mock.assert();
}

#[test]
fn connection_failure_is_an_error() {
    let url = Url::parse("http://127.0.0.1:1/").unwrap();
    let err = HttpFetcher.fetch(&url, &ProxyConfig::new()).unwrap_err();
    assert!(matches!(err, BrowserError::Http(_)));
    assert!(std::error::Error::source(&err).is_some());
}
