use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use scraper::{Html, Node, Selector};

/// Plain text pulled out of a fetched page, ready for classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    pub title: String,
    pub body: String,
}

impl PageText {
    /// Title and body joined for classification. The resolved URL is passed
    /// to the classifier separately: it can carry the analyte name, but
    /// filter terms in a slug are not page content.
    pub fn content(&self) -> String {
        if self.title.is_empty() {
            self.body.clone()
        } else {
            format!("{} {}", self.title, self.body)
        }
    }
}

/// Decodes fetched bytes and reduces the document to whitespace-normalized
/// plain text, skipping `script`, `style` and `noscript` subtrees.
pub fn page_text(bytes: &[u8], content_type: Option<&str>) -> PageText {
    let html = decode_bytes(bytes, content_type);
    let doc = Html::parse_document(&html);

    let title = Selector::parse("title")
        .ok()
        .and_then(|sel| doc.select(&sel).next())
        .map(|node| normalize_ws(&node.text().collect::<String>()))
        .unwrap_or_default();

    let mut body = String::new();
    collect_text(doc.tree.root(), &mut body);
    PageText {
        title,
        body: normalize_ws(&body),
    }
}

fn collect_text(node: ego_tree::NodeRef<'_, Node>, out: &mut String) {
    match node.value() {
        Node::Element(element) => {
            // The title is captured separately; skipping `head` keeps it
            // from appearing twice in the classification text.
            if matches!(element.name(), "head" | "script" | "style" | "noscript") {
                return;
            }
        }
        Node::Text(text) => {
            out.push_str(&text.text);
            out.push(' ');
        }
        _ => {}
    }
    for child in node.children() {
        collect_text(child, out);
    }
}

/// Charset resolution order: BOM -> Content-Type header -> chardetng guess.
/// Decoding is lossy; a garbled page simply classifies as a non-match.
fn decode_bytes(bytes: &[u8], content_type: Option<&str>) -> String {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return encoding.decode(bytes).0.into_owned();
    }
    if let Some(label) = content_type.and_then(charset_label) {
        if let Some(encoding) = Encoding::for_label(label.as_bytes()) {
            return encoding.decode(bytes).0.into_owned();
        }
    }
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    detector.guess(None, true).decode(bytes).0.into_owned()
}

fn charset_label(content_type: &str) -> Option<String> {
    content_type.split(';').find_map(|part| {
        let part = part.trim();
        if part.len() >= 8 && part.is_char_boundary(8) && part[..8].eq_ignore_ascii_case("charset=")
        {
            Some(part[8..].trim_matches([' ', '"', '\'']).to_string())
        } else {
            None
        }
    })
}

fn normalize_ws(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
