use quick_xml::events::Event;
use quick_xml::Reader;
use std::collections::HashMap;

/// Parse the `<item>` elements of an RSS document into tag -> text maps.
/// Panics if the document is not well-formed.
pub fn parse_rss_items(xml: &str) -> Vec<HashMap<String, String>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut items = Vec::new();
    let mut current_item: Option<HashMap<String, String>> = None;
    let mut current_element = String::new();

    loop {
        match reader.read_event().expect("Feed is not well-formed XML") {
            Event::Start(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if name == "item" {
                    current_item = Some(HashMap::new());
                } else if let Some(item) = current_item.as_mut() {
                    item.entry(name.clone()).or_default();
                }
                current_element = name;
            }
            Event::Text(e) => {
                if let Some(item) = current_item.as_mut() {
                    item.insert(current_element.clone(), e.unescape().unwrap().to_string());
                }
            }
            Event::End(e) => {
                if e.name().as_ref() == b"item" {
                    items.extend(current_item.take());
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    items
}

pub fn assert_rss_document(xml: &str) {
    assert!(
        xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8" ?><rss version="2.0"><channel>"#),
        "Unexpected document start: {}",
        &xml[..xml.len().min(80)]
    );
    assert!(xml.ends_with("</channel></rss>"), "Unexpected document end");
    assert!(xml.contains("<ttl>21600</ttl>"), "Missing ttl");
}
