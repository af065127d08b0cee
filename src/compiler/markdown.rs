//! Markdown rendering with display-date injection.
//!
//! The date paragraph is spliced into the pulldown-cmark event stream
//! right after the first level-1 heading closes, before serialization.
//! Working on the parsed stream instead of searching the HTML text for
//! `</h1>` keeps the injection correct with nested inline markup and
//! multiple headings.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd, html::push_html};

/// Render Markdown body text to HTML.
///
/// `date_line` (the formatted display date) is inserted as a paragraph
/// after the first `<h1>`; with no `<h1>` present it is silently dropped.
/// Metadata never reaches this function: rendering is pure with respect
/// to frontmatter.
pub fn render(body: &str, date_line: Option<&str>) -> String {
    let options =
        Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS | Options::ENABLE_TABLES;
    let parser = Parser::new_ext(body, options);

    let mut events: Vec<Event> = Vec::new();
    let mut pending_date = date_line;
    for event in parser {
        let closes_h1 = matches!(event, Event::End(TagEnd::Heading(HeadingLevel::H1)));
        events.push(event);
        if closes_h1 && let Some(date) = pending_date.take() {
            events.push(Event::Start(Tag::Paragraph));
            events.push(Event::Text(date.to_owned().into()));
            events.push(Event::End(TagEnd::Paragraph));
        }
    }

    let mut html = String::with_capacity(body.len() * 2);
    push_html(&mut html, events.into_iter());
    html
}
