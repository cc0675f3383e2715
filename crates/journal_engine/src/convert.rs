/// Generic HTML → Markdown text transform.
///
/// Implementations must be pure and deterministic; the extractor calls them
/// once per selected fragment.
pub trait MarkdownConverter: Send + Sync {
    fn convert(&self, html_fragment: &str) -> String;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Html2MdConverter;

impl MarkdownConverter for Html2MdConverter {
    fn convert(&self, html_fragment: &str) -> String {
        html2md::parse_html(html_fragment)
    }
}
