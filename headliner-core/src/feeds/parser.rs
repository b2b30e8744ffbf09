use quick_xml::Reader;
use quick_xml::events::attributes::Attributes;
use quick_xml::events::{BytesStart, Event};
use tracing::{debug, warn};

use super::FeedError;
use super::image::extract_image_url;
use crate::domain::FeedArticle;

const NO_TITLE: &str = "No Title";
const NO_DESCRIPTION: &str = "No Description";
const NO_LINK: &str = "#";

/// Item-level elements whose text is collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Summary,
    Content,
    Link,
}

impl Field {
    fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"title" => Some(Self::Title),
            b"description" | b"summary" => Some(Self::Summary),
            b"content" | b"content:encoded" => Some(Self::Content),
            b"link" => Some(Self::Link),
            _ => None,
        }
    }
}

/// Fields collected for the item currently being read.
#[derive(Debug, Default)]
struct ItemAccum {
    title: Option<String>,
    summary: Option<String>,
    content: Option<String>,
    link: Option<String>,
}

impl ItemAccum {
    fn slot(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Title => &mut self.title,
            Field::Summary => &mut self.summary,
            Field::Content => &mut self.content,
            Field::Link => &mut self.link,
        }
    }

    fn push_text(&mut self, field: Field, text: &str) {
        self.slot(field)
            .get_or_insert_with(String::new)
            .push_str(text);
    }

    /// Opening a field marks it present even if it stays empty.
    fn touch(&mut self, field: Field) {
        self.push_text(field, "");
    }

    /// Atom `href` links win over an empty text link.
    fn offer_link(&mut self, href: String) {
        let empty = self
            .link
            .as_deref()
            .is_none_or(|link| link.trim().is_empty());
        if empty {
            self.link = Some(href);
        }
    }

    fn into_article(self, topic: &str) -> FeedArticle {
        let description = self
            .summary
            .or(self.content)
            .map(|summary| summary.trim().to_string())
            .unwrap_or_else(|| NO_DESCRIPTION.to_string());

        let image_url = match extract_image_url(&description) {
            Ok(url) => url,
            Err(err) => {
                debug!(error = %err, "skipping unusable summary image");
                None
            }
        };

        FeedArticle {
            title: self
                .title
                .map(|title| title.trim().to_string())
                .unwrap_or_else(|| NO_TITLE.to_string()),
            description,
            url: self
                .link
                .map(|link| link.trim().to_string())
                .filter(|link| !link.is_empty())
                .unwrap_or_else(|| NO_LINK.to_string()),
            image_url,
            topic: topic.to_string(),
        }
    }
}

/// RSS 2.0 / Atom state machine.
///
/// `depth` counts elements open inside the current item, so only direct
/// children of `<item>`/`<entry>` are read as fields. Everything nested in a
/// field contributes its text to that field.
struct FeedParser<'a> {
    topic: &'a str,
    limit: usize,
    articles: Vec<FeedArticle>,
    accum: ItemAccum,
    depth: Option<usize>,
    field: Option<Field>,
}

impl<'a> FeedParser<'a> {
    fn new(topic: &'a str, limit: usize) -> Self {
        Self {
            topic,
            limit,
            articles: Vec::new(),
            accum: ItemAccum::default(),
            depth: None,
            field: None,
        }
    }

    fn is_full(&self) -> bool {
        self.articles.len() >= self.limit
    }

    fn handle_start(&mut self, e: &BytesStart<'_>) {
        let name = e.name();
        let Some(depth) = self.depth else {
            if matches!(name.as_ref(), b"item" | b"entry") {
                self.depth = Some(0);
                self.accum = ItemAccum::default();
                self.field = None;
            }
            return;
        };

        self.depth = Some(depth + 1);
        if depth != 0 {
            return;
        }
        let Some(field) = Field::from_tag(name.as_ref()) else {
            return;
        };
        if field == Field::Link
            && let Some(href) = alternate_href(e.attributes())
        {
            self.accum.offer_link(href);
            return;
        }
        self.accum.touch(field);
        self.field = Some(field);
    }

    fn handle_empty(&mut self, e: &BytesStart<'_>) {
        if self.depth != Some(0) || e.name().as_ref() != b"link" {
            return;
        }
        if let Some(href) = alternate_href(e.attributes()) {
            self.accum.offer_link(href);
        }
    }

    fn handle_text(&mut self, text: &str) {
        if let Some(field) = self.field {
            self.accum.push_text(field, text);
        }
    }

    fn handle_end(&mut self) {
        match self.depth {
            Some(0) => {
                let finished = std::mem::take(&mut self.accum);
                self.articles.push(finished.into_article(self.topic));
                self.depth = None;
            }
            Some(depth) => {
                if depth == 1 {
                    self.field = None;
                }
                self.depth = Some(depth - 1);
            }
            None => {}
        }
    }
}

/// Atom `<link href>`; only `rel="alternate"` or unqualified links count.
fn alternate_href(attributes: Attributes<'_>) -> Option<String> {
    let mut href = None;
    let mut alternate = true;
    for attr in attributes.flatten() {
        let value = attr
            .unescape_value()
            .map(|value| value.into_owned())
            .unwrap_or_else(|_| {
                String::from_utf8_lossy(&attr.value).into_owned()
            });
        match attr.key.as_ref() {
            b"href" => href = Some(value),
            b"rel" => alternate = value == "alternate",
            _ => {}
        }
    }
    href.filter(|_| alternate)
}

/// Parses up to `limit` entries from an RSS or Atom document.
///
/// Titles and summaries keep the text of nested markup. `<content>` and
/// `<content:encoded>` stand in for a missing summary. A syntax error after
/// at least one complete entry keeps the entries read so far; an error
/// before that is reported as [`FeedError::Parse`].
pub fn parse_feed(
    xml: &str,
    topic: &str,
    limit: usize,
) -> Result<Vec<FeedArticle>, FeedError> {
    let mut reader = Reader::from_str(xml);
    let mut parser = FeedParser::new(topic, limit);

    while !parser.is_full() {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => parser.handle_start(e),
            Ok(Event::Empty(ref e)) => parser.handle_empty(e),
            Ok(Event::Text(ref e)) => {
                let text = e.unescape().map(|text| text.into_owned());
                let text = text.unwrap_or_else(|_| {
                    String::from_utf8_lossy(e).into_owned()
                });
                parser.handle_text(&text);
            }
            Ok(Event::CData(ref e)) => {
                parser.handle_text(&String::from_utf8_lossy(e))
            }
            Ok(Event::End(_)) => parser.handle_end(),
            Ok(Event::Eof) => break,
            Err(err) if parser.articles.is_empty() => {
                return Err(FeedError::Parse(format!(
                    "{err} at byte {}",
                    reader.buffer_position()
                )));
            }
            Err(err) => {
                warn!(
                    topic,
                    error = %err,
                    kept = parser.articles.len(),
                    "feed truncated by malformed XML"
                );
                break;
            }
            _ => {}
        }
    }

    Ok(parser.articles)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:media="http://search.yahoo.com/mrss/">
  <channel>
    <title>BBC News - Technology</title>
    <link>https://www.bbc.co.uk/news/technology</link>
    <item>
      <title>Chip makers &amp; the cloud</title>
      <description><![CDATA[<p>Summary</p><img src="https://img.test/chip.jpg">]]></description>
      <link>https://www.bbc.co.uk/news/articles/1</link>
      <media:title>ignored</media:title>
    </item>
    <item>
      <description>&lt;img src="https://img.test/escaped.jpg"&gt; Escaped markup</description>
      <link>https://www.bbc.co.uk/news/articles/2</link>
    </item>
    <item>
      <title>Bare</title>
    </item>
  </channel>
</rss>"#;

    fn single(xml: &str) -> FeedArticle {
        let mut articles = parse_feed(xml, "Test", 10).unwrap();
        assert_eq!(articles.len(), 1);
        articles.remove(0)
    }

    #[test]
    fn parses_rss_items_with_defaults() {
        let articles = parse_feed(RSS, "Technology", 10).unwrap();
        assert_eq!(articles.len(), 3);

        assert_eq!(articles[0].title, "Chip makers & the cloud");
        assert_eq!(articles[0].url, "https://www.bbc.co.uk/news/articles/1");
        assert_eq!(
            articles[0].image_url.as_deref(),
            Some("https://img.test/chip.jpg")
        );
        assert_eq!(articles[0].topic, "Technology");

        assert_eq!(articles[1].title, "No Title");
        assert_eq!(
            articles[1].image_url.as_deref(),
            Some("https://img.test/escaped.jpg")
        );

        assert_eq!(articles[2].description, "No Description");
        assert_eq!(articles[2].url, "#");
        assert_eq!(articles[2].image_url, None);
    }

    #[test]
    fn channel_fields_are_not_items() {
        let articles = parse_feed(RSS, "Technology", 10).unwrap();
        assert!(articles.iter().all(|a| a.title != "BBC News - Technology"));
    }

    #[test]
    fn respects_limit() {
        let items: String = (0..15)
            .map(|i| {
                format!(
                    "<item><title>Story {i}</title>\
                     <link>https://n.test/{i}</link></item>"
                )
            })
            .collect();
        let xml = format!("<rss><channel>{items}</channel></rss>");

        let articles = parse_feed(&xml, "World", 10).unwrap();
        assert_eq!(articles.len(), 10);
        assert_eq!(articles[9].title, "Story 9");
    }

    #[test]
    fn parses_atom_entries() {
        let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Atom feed</title>
  <entry>
    <title>Atom story</title>
    <link rel="enclosure" href="https://a.test/audio.mp3"/>
    <link href="https://a.test/story"/>
    <summary>Short</summary>
  </entry>
</feed>"#;
        let articles = parse_feed(xml, "Atom", 10).unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].url, "https://a.test/story");
        assert_eq!(articles[0].description, "Short");
    }

    #[test]
    fn inline_markup_keeps_surrounding_text() {
        let article = single(
            "<rss><channel><item>\
             <title>Rust <em>2024</em> ships</title>\
             <description>Before <b>bold</b> after</description>\
             </item></channel></rss>",
        );
        assert_eq!(article.title, "Rust 2024 ships");
        assert_eq!(article.description, "Before bold after");
    }

    #[test]
    fn atom_source_title_is_not_the_entry_title() {
        let article = single(
            r#"<feed xmlns="http://www.w3.org/2005/Atom">
  <entry>
    <title>Entry</title>
    <source>
      <title>Other feed</title>
      <link href="https://other.test/"/>
    </source>
    <link href="https://a.test/entry"/>
  </entry>
</feed>"#,
        );
        assert_eq!(article.title, "Entry");
        assert_eq!(article.url, "https://a.test/entry");
    }

    #[test]
    fn xhtml_summary_collects_nested_text() {
        let article = single(
            r#"<feed xmlns="http://www.w3.org/2005/Atom"><entry>
<title>X</title>
<summary type="xhtml"><div><p>Hello world</p></div></summary>
</entry></feed>"#,
        );
        assert_eq!(article.description, "Hello world");
    }

    #[test]
    fn content_encoded_fills_missing_description() {
        let article = single(
            r#"<rss xmlns:content="http://purl.org/rss/1.0/modules/content/">
<channel><item>
  <title>Long read</title>
  <content:encoded><![CDATA[<p>Body</p><img src="https://img.test/body.jpg">]]></content:encoded>
</item></channel></rss>"#,
        );
        assert!(article.description.starts_with("<p>Body</p>"));
        assert_eq!(
            article.image_url.as_deref(),
            Some("https://img.test/body.jpg")
        );
    }

    #[test]
    fn summary_wins_over_content() {
        let article = single(
            r#"<feed xmlns="http://www.w3.org/2005/Atom"><entry>
<title>Both</title>
<content type="html">Full text</content>
<summary>Short</summary>
</entry></feed>"#,
        );
        assert_eq!(article.description, "Short");
    }

    #[test]
    fn empty_document_has_no_articles() {
        assert!(parse_feed("", "Empty", 10).unwrap().is_empty());
        assert!(
            parse_feed("<html><body>Not a feed</body></html>", "Html", 10)
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn malformed_before_first_item_is_an_error() {
        let result =
            parse_feed("<rss><channel><item><title>x</channel>", "Bad", 10);
        assert!(matches!(result, Err(FeedError::Parse(_))));
    }

    #[test]
    fn malformed_after_items_keeps_what_was_read() {
        let xml = "<rss><channel><item><title>Kept</title></item>\
                   <item><title>x</channel>";
        let articles = parse_feed(xml, "Partial", 10).unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Kept");
    }
}
