//! Markdown rendering for chat bubbles

use pulldown_cmark::{html, Event, Options, Parser};

/// Render message text to HTML.
///
/// Raw HTML in the source is shown as text, never injected into the page.
pub fn render_markdown(text: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let parser = Parser::new_ext(text, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
