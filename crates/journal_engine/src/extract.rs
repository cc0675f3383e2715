use ego_tree::NodeId;
use journal_core::IndexEntry;
use journal_logging::journal_debug;
use scraper::{ElementRef, Html, Selector};

use crate::convert::MarkdownConverter;
use crate::header::{build_entry_document, DateFormat};

/// Class the export tool puts on user-written body paragraphs.
pub const DEFAULT_MARKER_CLASS: &str = "p2";

/// Layout blocks that never hold entry text: page header, title, image grid,
/// reflection prompt, photo banner, plus embedded styles and scripts.
pub const NOISE_SELECTOR: &str =
    ".pageHeader, .title, .assetGrid, .reflectionPrompt, .photoBanner, style, script";

/// One way of recovering an entry's body text as Markdown.
///
/// An empty (after trimming) result means "not applicable"; the extractor then
/// moves on to the next strategy in its chain.
pub trait ExtractionStrategy: Send + Sync {
    fn name(&self) -> &'static str;
    fn extract(&self, document: &Html, converter: &dyn MarkdownConverter) -> String;
}

/// Converts the direct `<p>` children of `<body>` that are body text: either
/// marked with the marker class or unclassed with visible text. Paragraphs with
/// any other class are layout wrappers and are skipped.
#[derive(Debug)]
pub struct MarkedParagraphs {
    marker_class: String,
    selector: Option<Selector>,
}

impl MarkedParagraphs {
    pub fn new(marker_class: impl Into<String>) -> Self {
        Self {
            marker_class: marker_class.into(),
            selector: Selector::parse("body > p").ok(),
        }
    }

    fn is_body_text(&self, paragraph: ElementRef) -> bool {
        match paragraph.value().attr("class") {
            Some(class) if !class.is_empty() => paragraph
                .value()
                .classes()
                .any(|c| c == self.marker_class),
            _ => !paragraph.text().collect::<String>().trim().is_empty(),
        }
    }
}

impl Default for MarkedParagraphs {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER_CLASS)
    }
}

impl ExtractionStrategy for MarkedParagraphs {
    fn name(&self) -> &'static str {
        "marked-paragraphs"
    }

    fn extract(&self, document: &Html, converter: &dyn MarkdownConverter) -> String {
        let Some(selector) = self.selector.as_ref() else {
            return String::new();
        };
        let mut markdown = String::new();
        for paragraph in document.select(selector) {
            if self.is_body_text(paragraph) {
                markdown.push_str(&converter.convert(&paragraph.inner_html()));
                markdown.push_str("\n\n");
            }
        }
        markdown
    }
}

/// Converts a copy of the whole body after removing every [`NOISE_SELECTOR`] match.
#[derive(Debug)]
pub struct NoiseStripping {
    body: Option<Selector>,
    noise: Option<Selector>,
}

impl Default for NoiseStripping {
    fn default() -> Self {
        Self {
            body: Selector::parse("body").ok(),
            noise: Selector::parse(NOISE_SELECTOR).ok(),
        }
    }
}

impl ExtractionStrategy for NoiseStripping {
    fn name(&self) -> &'static str {
        "noise-stripping"
    }

    fn extract(&self, document: &Html, converter: &dyn MarkdownConverter) -> String {
        let (Some(body_sel), Some(noise_sel)) = (self.body.as_ref(), self.noise.as_ref()) else {
            return String::new();
        };

        let mut copy = document.clone();
        let Some(body_id) = copy.select(body_sel).next().map(|body| body.id()) else {
            return String::new();
        };

        let noise: Vec<NodeId> = copy
            .tree
            .get(body_id)
            .and_then(ElementRef::wrap)
            .map(|body| body.select(noise_sel).map(|el| el.id()).collect())
            .unwrap_or_default();
        for id in noise {
            if let Some(mut node) = copy.tree.get_mut(id) {
                node.detach();
            }
        }

        copy.tree
            .get(body_id)
            .and_then(ElementRef::wrap)
            .map(|body| converter.convert(&body.inner_html()))
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtractedBody {
    pub markdown: String,
    /// Name of the strategy that produced `markdown`; `None` if all came up empty.
    pub strategy: Option<&'static str>,
}

/// Ordered chain of [`ExtractionStrategy`]s plus the header settings.
pub struct EntryExtractor {
    strategies: Vec<Box<dyn ExtractionStrategy>>,
    date_format: DateFormat,
}

impl EntryExtractor {
    /// Default chain: marked paragraphs first, noise stripping as fallback.
    pub fn new(marker_class: impl Into<String>, date_format: DateFormat) -> Self {
        Self::with_strategies(
            vec![
                Box::new(MarkedParagraphs::new(marker_class)),
                Box::new(NoiseStripping::default()),
            ],
            date_format,
        )
    }

    pub fn with_strategies(
        strategies: Vec<Box<dyn ExtractionStrategy>>,
        date_format: DateFormat,
    ) -> Self {
        Self {
            strategies,
            date_format,
        }
    }

    pub fn extract_body(&self, html: &str, converter: &dyn MarkdownConverter) -> ExtractedBody {
        let document = Html::parse_document(html);
        for strategy in &self.strategies {
            let markdown = strategy.extract(&document, converter);
            if !markdown.trim().is_empty() {
                return ExtractedBody {
                    markdown,
                    strategy: Some(strategy.name()),
                };
            }
        }
        ExtractedBody::default()
    }

    /// Full Markdown document for one entry: metadata header then extracted body.
    pub fn render(
        &self,
        html: &str,
        entry: &IndexEntry,
        converter: &dyn MarkdownConverter,
    ) -> String {
        let body = self.extract_body(html, converter);
        journal_debug!(
            "Extracted {:?} with {}",
            entry.href,
            body.strategy.unwrap_or("no strategy")
        );
        build_entry_document(entry, &self.date_format, &body.markdown)
    }
}

impl Default for EntryExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER_CLASS, DateFormat::default())
    }
}
