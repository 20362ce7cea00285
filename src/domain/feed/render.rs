use super::flatten::flatten;
use super::model::{field_str, FeedDocument, FeedItem, FlattenedRecord, FOLLOWING_FEED_TTL_SECS};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::fmt::Display;
use std::io::Write;

const XML_PROLOG: &str = r#"<?xml version="1.0" encoding="UTF-8" ?>"#;
const FOLLOWING_FEED_TITLE: &str = "Shots";

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("malformed API response: {0}")]
    MalformedResponse(String),
    #[error("shot #{index} is not a JSON object")]
    MalformedShot { index: usize },
    #[error("xml write failed: {0}")]
    Xml(String),
}

fn xml_error(err: impl Display) -> RenderError {
    RenderError::Xml(err.to_string())
}

/// Turns API responses into RSS 2.0 documents. Stateless; every text node is escaped by the writer.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeedRenderer;

impl FeedRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render the `players/{user}/shots/following` response.
    /// A missing or `null` `shots` field renders an empty channel.
    pub fn render_following_feed(&self, data: &Value) -> Result<String, RenderError> {
        let response = data.as_object().ok_or_else(|| {
            RenderError::MalformedResponse("expected a JSON object".to_string())
        })?;

        let shots: &[Value] = match response.get("shots") {
            None | Some(Value::Null) => &[],
            Some(Value::Array(shots)) => shots,
            Some(_) => {
                return Err(RenderError::MalformedResponse(
                    "`shots` is not an array".to_string(),
                ))
            }
        };

        let items = shots
            .iter()
            .enumerate()
            .map(|(index, shot)| {
                shot.as_object()
                    .map(|record| self.itemize(shot, record))
                    .ok_or(RenderError::MalformedShot { index })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let document = FeedDocument {
            title: FOLLOWING_FEED_TITLE.to_string(),
            ttl: Some(FOLLOWING_FEED_TTL_SECS),
            items,
            ..Default::default()
        };

        self.render(&document)
    }

    pub fn render(&self, document: &FeedDocument) -> Result<String, RenderError> {
        let mut writer = Writer::new(XML_PROLOG.as_bytes().to_vec());

        let mut rss = BytesStart::new("rss");
        rss.push_attribute(("version", "2.0"));
        writer.write_event(Event::Start(rss)).map_err(xml_error)?;
        writer
            .write_event(Event::Start(BytesStart::new("channel")))
            .map_err(xml_error)?;

        let ttl = document.ttl.map(|t| t.to_string()).unwrap_or_default();
        write_text_element(&mut writer, "title", &document.title)?;
        write_text_element(&mut writer, "description", &document.description)?;
        write_text_element(&mut writer, "link", &document.link)?;
        write_text_element(&mut writer, "lastBuildDate", &document.build_date)?;
        write_text_element(&mut writer, "pubDate", &document.pub_date)?;
        write_text_element(&mut writer, "ttl", &ttl)?;

        for item in &document.items {
            write_item(&mut writer, item)?;
        }

        writer
            .write_event(Event::End(BytesEnd::new("channel")))
            .map_err(xml_error)?;
        writer
            .write_event(Event::End(BytesEnd::new("rss")))
            .map_err(xml_error)?;

        tracing::debug!(items = document.items.len(), "Rendered RSS feed");

        String::from_utf8(writer.into_inner()).map_err(xml_error)
    }

    fn itemize(&self, shot: &Value, record: &Map<String, Value>) -> FeedItem {
        FeedItem::new(
            field_str(record, "title"),
            shot_content(&flatten(shot)),
            field_str(record, "url"),
            field_str(record, "created_at"),
        )
    }
}

/// HTML describing a shot and its author. Placeholders are filled verbatim;
/// the whole fragment is escaped once when written into `<description>`.
fn shot_content(flat: &FlattenedRecord) -> String {
    format!(
        concat!(
            r#"<div class="player"><a href="{player_url}"><img alt="" src="{player_avatar_url}"> {player_name} ({player_username})</a></div>"#,
            r#"<div class="shot"><a href="{url}"><img alt="" src="{image_url}"> {title}</a></div>"#
        ),
        player_url = field_str(flat, "player_url"),
        player_avatar_url = field_str(flat, "player_avatar_url"),
        player_name = field_str(flat, "player_name"),
        player_username = field_str(flat, "player_username"),
        url = field_str(flat, "url"),
        image_url = field_str(flat, "image_url"),
        title = field_str(flat, "title"),
    )
}

fn write_item<W: Write>(writer: &mut Writer<W>, item: &FeedItem) -> Result<(), RenderError> {
    writer
        .write_event(Event::Start(BytesStart::new("item")))
        .map_err(xml_error)?;
    write_text_element(writer, "title", &item.title)?;
    write_text_element(writer, "description", &item.content)?;
    write_text_element(writer, "link", &item.link)?;
    write_text_element(writer, "guid", &item.guid)?;
    write_text_element(writer, "pubDate", &item.pub_date)?;
    writer
        .write_event(Event::End(BytesEnd::new("item")))
        .map_err(xml_error)?;
    Ok(())
}

// Empty text still produces an open/close pair so every tag is present
fn write_text_element<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> Result<(), RenderError> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(xml_error)?;
    let text = xml_chars(text);
    if !text.is_empty() {
        writer
            .write_event(Event::Text(BytesText::new(&text)))
            .map_err(xml_error)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(xml_error)?;
    Ok(())
}

/// Drop characters outside the XML 1.0 `Char` production; no escape can represent them.
fn xml_chars(text: &str) -> Cow<'_, str> {
    if text.chars().all(is_xml_char) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.chars().filter(|c| is_xml_char(*c)).collect())
    }
}

fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}
