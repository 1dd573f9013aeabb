/// Converts an HTML document into markdown, keeping headings, links, lists
/// and emphasis as markers.
pub fn html_to_markdown(html: &str) -> String {
    html2md::parse_html(html)
}
