//! Markdown rendering with asset path rewriting

use pulldown_cmark::{
    html, CowStr, Event, LinkType, Options, Parser, Tag, TagEnd, TextMergeStream,
};
use regex::{Captures, Regex};

use crate::error::{Error, Result};

/// Image sources left untouched by the prefix rewrite
const SKIP_PREFIXES: [&str; 5] = ["http://", "https://", "//", "/", "data:"];

/// Anything that can turn a page body into HTML
pub trait PageRenderer {
    fn render(&self, markdown: &str, asset_prefix: &str) -> Result<String>;
}

/// GitHub-flavored markdown renderer
pub struct MarkdownRenderer {
    options: Options,
    img_src: Regex,
    bare_url: Regex,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        // YAML metadata blocks stay off: front-matter is split off in FrontMatter::parse()
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_GFM;

        Self {
            options,
            img_src: Regex::new(r#"(<img\b[^>]*?\ssrc=")([^"]+)(")"#).expect("valid img regex"),
            bare_url: Regex::new(r#"https?://[^\s<>]*[^\s<>.,:;!?'")\]]"#)
                .expect("valid url regex"),
        }
    }

    /// Render markdown to HTML. Relative image sources are prefixed with
    /// `asset_prefix` so they resolve through the pages asset handler.
    pub fn render(&self, markdown: &str, asset_prefix: &str) -> Result<String> {
        let parser = TextMergeStream::new(Parser::new_ext(markdown, self.options));
        let events = self.linkify(parser);

        let mut html_output = String::new();
        html::write_html_fmt(&mut html_output, events.into_iter())
            .map_err(|e| Error::Render(e.to_string()))?;

        if asset_prefix.is_empty() {
            return Ok(html_output);
        }
        Ok(self.rewrite_image_srcs(&html_output, asset_prefix))
    }

    /// Turn bare URLs in text into links. Link text, image alt text and
    /// code blocks are left alone.
    fn linkify<'a>(&self, parser: impl Iterator<Item = Event<'a>>) -> Vec<Event<'a>> {
        let mut events = Vec::new();
        let mut link_depth = 0usize;
        let mut in_code_block = false;

        for event in parser {
            match event {
                Event::Start(Tag::Link { .. }) | Event::Start(Tag::Image { .. }) => {
                    link_depth += 1;
                    events.push(event);
                }
                Event::End(TagEnd::Link) | Event::End(TagEnd::Image) => {
                    link_depth = link_depth.saturating_sub(1);
                    events.push(event);
                }
                Event::Start(Tag::CodeBlock(_)) => {
                    in_code_block = true;
                    events.push(event);
                }
                Event::End(TagEnd::CodeBlock) => {
                    in_code_block = false;
                    events.push(event);
                }
                Event::InlineHtml(ref html) | Event::Html(ref html) => {
                    match anchor_tag(html) {
                        Some(AnchorTag::Open) => link_depth += 1,
                        Some(AnchorTag::Close) => link_depth = link_depth.saturating_sub(1),
                        None => {}
                    }
                    events.push(event);
                }
                Event::Text(text) if link_depth == 0 && !in_code_block => {
                    self.push_linkified(&text, &mut events);
                }
                _ => events.push(event),
            }
        }

        events
    }

    fn push_linkified<'a>(&self, text: &str, events: &mut Vec<Event<'a>>) {
        let mut last = 0;
        for found in self.bare_url.find_iter(text) {
            if found.start() > last {
                events.push(Event::Text(CowStr::from(text[last..found.start()].to_string())));
            }
            let url = found.as_str().to_string();
            events.push(Event::Start(Tag::Link {
                link_type: LinkType::Autolink,
                dest_url: CowStr::from(url.clone()),
                title: CowStr::from(""),
                id: CowStr::from(""),
            }));
            events.push(Event::Text(CowStr::from(url)));
            events.push(Event::End(TagEnd::Link));
            last = found.end();
        }
        if last < text.len() {
            events.push(Event::Text(CowStr::from(text[last..].to_string())));
        }
    }

    /// Prefix relative `src` attributes of `<img>` tags.
    /// Absolute, protocol-relative, root-relative and `data:` sources are kept.
    pub fn rewrite_image_srcs(&self, html: &str, prefix: &str) -> String {
        let prefix = prefix.trim_end_matches('/');
        self.img_src
            .replace_all(html, |caps: &Captures| {
                let src = &caps[2];
                if SKIP_PREFIXES.iter().any(|skip| src.starts_with(skip)) {
                    caps[0].to_string()
                } else {
                    format!("{}{}/{}{}", &caps[1], prefix, src, &caps[3])
                }
            })
            .into_owned()
    }
}

enum AnchorTag {
    Open,
    Close,
}

/// Classify a raw HTML fragment as an `<a>` open or close tag
fn anchor_tag(html: &str) -> Option<AnchorTag> {
    let tag = html.trim_start().to_ascii_lowercase();
    let (rest, kind) = match tag.strip_prefix("</a") {
        Some(rest) => (rest, AnchorTag::Close),
        None => (tag.strip_prefix("<a")?, AnchorTag::Open),
    };
    match rest.chars().next() {
        Some(c) if c == '>' || c.is_whitespace() => Some(kind),
        _ => None,
    }
}

impl PageRenderer for MarkdownRenderer {
    fn render(&self, markdown: &str, asset_prefix: &str) -> Result<String> {
        MarkdownRenderer::render(self, markdown, asset_prefix)
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}
