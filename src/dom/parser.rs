use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use super::{Document, NodeId};

lazy_static! {
    static ref COMMENT_REGEX: Regex = Regex::new(r"(?s)\A<!--(.*?)-->").unwrap();

    static ref DOCTYPE_REGEX: Regex = Regex::new(r"(?is)\A<!doctype\s+([^>]*)>").unwrap();

    static ref DECLARATION_REGEX: Regex = Regex::new(r"(?s)\A<[!?][^>]*>").unwrap();

    static ref START_TAG_REGEX: Regex = Regex::new(
        r#"\A<([A-Za-z][A-Za-z0-9:-]*)((?:\s+[^\s"'>/=]+(?:\s*=\s*(?:"[^"]*"|'[^']*'|[^\s"'=<>`]+))?)*)\s*(/?)>"#
    ).unwrap();

    static ref END_TAG_REGEX: Regex = Regex::new(r"\A</([A-Za-z][A-Za-z0-9:-]*)\s*>").unwrap();

    static ref ATTRIBUTE_REGEX: Regex = Regex::new(
        r#"([^\s"'>/=]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#
    ).unwrap();
}

/// Elements that never have content or a close tag
pub const VOID_ELEMENTS: [&str; 13] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Elements whose content is not parsed as markup
pub const RAW_TEXT_ELEMENTS: [&str; 4] = ["script", "style", "textarea", "title"];

/// Elements whose raw content still decodes character references
const ESCAPABLE_RAW_TEXT_ELEMENTS: [&str; 2] = ["textarea", "title"];

/// Start tags that implicitly close an open element of the same name
const SELF_CLOSING_SIBLINGS: [&str; 3] = ["li", "p", "option"];

/// Parse an HTML string into a [`Document`].
///
/// The parser is lenient: stray close tags are dropped, unclosed elements
/// are closed at the end of input and a `body` is synthesized when the
/// markup does not contain one.
pub fn parse_html(input: &str) -> Document {
    let mut parser = HtmlParser::new(input);
    parser.run();
    let mut doc = parser.doc;
    ensure_body(&mut doc);
    doc
}

struct HtmlParser<'a> {
    input: &'a str,
    lowercase: String,
    pos: usize,
    doc: Document,
    open: Vec<NodeId>,
}

impl<'a> HtmlParser<'a> {
    fn new(input: &'a str) -> Self {
        let doc = Document::new();
        let root = doc.root();
        Self {
            input,
            lowercase: input.to_ascii_lowercase(),
            pos: 0,
            doc,
            open: vec![root],
        }
    }

    fn current(&self) -> NodeId {
        self.open[self.open.len() - 1]
    }

    fn run(&mut self) {
        let input = self.input;
        while self.pos < input.len() {
            let rest = &input[self.pos..];
            if rest.starts_with('<') && self.consume_markup(rest) {
                continue;
            }

            // Text runs to the next '<'; a '<' that starts no markup is text
            let skip = usize::from(rest.starts_with('<'));
            let end = rest[skip..].find('<').map_or(rest.len(), |i| i + skip);
            self.push_text(&rest[..end], true);
            self.pos += end;
        }
    }

    /// Try each markup form at the current position
    fn consume_markup(&mut self, rest: &str) -> bool {
        if let Some(caps) = COMMENT_REGEX.captures(rest) {
            let comment = self.doc.create_comment(&caps[1]);
            let parent = self.current();
            self.doc.append_child(parent, comment);
            self.pos += caps[0].len();
            return true;
        }

        if let Some(caps) = DOCTYPE_REGEX.captures(rest) {
            let doctype = self.doc.create_doctype(caps[1].trim());
            let root = self.doc.root();
            self.doc.append_child(root, doctype);
            self.pos += caps[0].len();
            return true;
        }

        if let Some(caps) = END_TAG_REGEX.captures(rest) {
            self.close_element(&caps[1].to_ascii_lowercase());
            self.pos += caps[0].len();
            return true;
        }

        if let Some(caps) = START_TAG_REGEX.captures(rest) {
            let tag = caps[1].to_ascii_lowercase();
            let attributes = caps.get(2).map_or("", |m| m.as_str()).to_string();
            let self_closing = !caps[3].is_empty();
            self.pos += caps[0].len();
            self.open_element(&tag, &attributes, self_closing);
            return true;
        }

        if let Some(m) = DECLARATION_REGEX.find(rest) {
            debug!("Skipping declaration {}", m.as_str());
            self.pos += m.end();
            return true;
        }

        false
    }

    fn push_text(&mut self, raw: &str, decode: bool) {
        if raw.is_empty() {
            return;
        }
        let text = if decode {
            html_escape::decode_html_entities(raw).into_owned()
        } else {
            raw.to_string()
        };
        let node = self.doc.create_text_node(&text);
        let parent = self.current();
        self.doc.append_child(parent, node);
    }

    fn open_element(&mut self, tag: &str, attributes: &str, self_closing: bool) {
        if SELF_CLOSING_SIBLINGS.contains(&tag) && self.doc.tag_name(self.current()) == Some(tag) {
            self.open.pop();
        }

        let element = self.doc.create_element(tag);
        for caps in ATTRIBUTE_REGEX.captures_iter(attributes) {
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map_or(String::new(), |m| {
                    html_escape::decode_html_entities(m.as_str()).into_owned()
                });
            if self.doc.get_attribute(element, &caps[1]).is_none() {
                self.doc.set_attribute(element, &caps[1], &value);
            }
        }
        let parent = self.current();
        self.doc.append_child(parent, element);

        if VOID_ELEMENTS.contains(&tag) || self_closing {
            return;
        }

        if RAW_TEXT_ELEMENTS.contains(&tag) {
            self.open.push(element);
            self.consume_raw_text(tag);
            return;
        }

        self.open.push(element);
    }

    /// Everything up to the matching close tag becomes a single text node
    fn consume_raw_text(&mut self, tag: &str) {
        let needle = format!("</{}", tag);
        let end = self.lowercase[self.pos..]
            .find(&needle)
            .map_or(self.input.len(), |i| self.pos + i);
        let raw = &self.input[self.pos..end];
        self.push_text(raw, ESCAPABLE_RAW_TEXT_ELEMENTS.contains(&tag));
        self.pos = end;
        if end == self.input.len() {
            self.open.pop();
        }
    }

    fn close_element(&mut self, tag: &str) {
        // The root at index 0 is never closed
        let position = self
            .open
            .iter()
            .skip(1)
            .rposition(|&n| self.doc.tag_name(n) == Some(tag));
        match position {
            Some(index) => self.open.truncate(index + 1),
            None => debug!("Ignoring stray close tag </{}>", tag),
        }
    }
}

/// Make sure the document has a `body`, moving loose content into one
fn ensure_body(doc: &mut Document) {
    if doc.body().is_some() {
        return;
    }

    let root = doc.root();
    let host = doc
        .element_children(root)
        .into_iter()
        .find(|&n| doc.tag_name(n) == Some("html"))
        .unwrap_or(root);

    let body = doc.create_element("body");
    let movable: Vec<NodeId> = doc
        .children(host)
        .iter()
        .copied()
        .filter(|&n| {
            !matches!(doc.kind(n), super::NodeKind::Doctype(_))
                && doc.tag_name(n) != Some("head")
                && doc.tag_name(n) != Some("html")
        })
        .collect();
    for node in movable {
        doc.append_child(body, node);
    }
    doc.append_child(host, body);
    debug!("Synthesized <body> for document without one");
}
