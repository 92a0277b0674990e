//! Description Markdown
//!
//! Experience descriptions are written by hosts, so they are untrusted:
//! - raw HTML (block and inline) is rendered as escaped text
//! - link and image targets are limited to http(s), mailto and relative URLs
//! - images render with a bounded size, like everywhere else in the UI

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use pulldown_cmark::{html::push_html, CowStr, Event, Options, Parser, Tag, TagEnd};

const SAFE_SCHEMES: &[&str] = &["http:", "https:", "mailto:"];

/// Characters escaped in URLs written into attributes
const URL_ENCODE_SET: &AsciiSet = &CONTROLS.add(b' ').add(b'"').add(b'<').add(b'>').add(b'`');

/// Render a description to HTML safe for `inner_html`
pub fn render_description(text: &str) -> String {
    let parser = Parser::new_ext(text, get_options());
    let events = sanitize_events(parser);
    let mut html_output = String::new();
    push_html(&mut html_output, events.into_iter());
    html_output
}

/// First `max_chars` characters of the description's text, markup removed
pub fn plain_excerpt(text: &str, max_chars: usize) -> String {
    let mut plain = String::new();
    for event in Parser::new_ext(text, get_options()) {
        match event {
            Event::Text(t) | Event::Code(t) => plain.push_str(&t),
            Event::SoftBreak | Event::HardBreak | Event::End(TagEnd::Paragraph | TagEnd::Heading(_)) => plain.push(' '),
            _ => {}
        }
    }
    let collapsed = plain.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    let mut excerpt: String = collapsed.chars().take(max_chars).collect();
    excerpt.truncate(excerpt.trim_end().len());
    excerpt.push('…');
    excerpt
}

fn get_options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES
}

enum State {
    Normal,
    /// Inside an image; alt text events are dropped until its end tag
    InImage { depth: usize },
}

fn sanitize_events<'a>(parser: Parser<'a>) -> Vec<Event<'a>> {
    let mut events = Vec::new();
    let mut state = State::Normal;

    for event in parser {
        match state {
            State::Normal => match event {
                Event::Html(raw) | Event::InlineHtml(raw) => events.push(Event::Text(raw)),

                Event::Start(Tag::Link { link_type, dest_url, title, id }) => {
                    events.push(Event::Start(Tag::Link {
                        link_type,
                        dest_url: CowStr::from(safe_url(&dest_url)),
                        title,
                        id,
                    }));
                }

                Event::Start(Tag::Image { dest_url, .. }) => {
                    let html = format!(
                        r#"<img src="{}" loading="lazy" style="max-width: 100%; max-height: 400px; display: block; border-radius: 4px;" />"#,
                        safe_url(&dest_url)
                    );
                    events.push(Event::Html(CowStr::from(html)));
                    state = State::InImage { depth: 0 };
                }

                other => events.push(other),
            },

            State::InImage { ref mut depth } => match event {
                Event::Start(_) => *depth += 1,
                Event::End(_) => {
                    if *depth == 0 {
                        state = State::Normal;
                    } else {
                        *depth -= 1;
                    }
                }
                _ => {}
            },
        }
    }

    events
}

/// Target URL if its scheme is allowed, `#` otherwise
fn safe_url(url: &str) -> String {
    let trimmed = url.trim();
    let lower = trimmed.to_ascii_lowercase();
    let scheme_end = lower.find(|c: char| matches!(c, ':' | '/' | '?' | '#'));
    let has_scheme = scheme_end.is_some_and(|pos| lower[pos..].starts_with(':'));

    if has_scheme && !SAFE_SCHEMES.iter().any(|scheme| lower.starts_with(scheme)) {
        return "#".to_string();
    }
    utf8_percent_encode(trimmed, URL_ENCODE_SET).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_html_is_escaped() {
        let html = render_description("Hello <script>alert(1)</script>\n\n<div onclick=\"x\">hi</div>");
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<div onclick"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_unsafe_link_targets_are_neutralized() {
        let html = render_description("[click](javascript:alert(1)) and [site](<https://example.com/a b>)");
        assert!(html.contains(r##"href="#""##));
        assert!(!html.contains("javascript:"));
        assert!(html.contains("https://example.com/a%20b"));
    }

    #[test]
    fn test_images_keep_safe_sources_and_drop_alt_text() {
        let html = render_description("![tea ceremony](/media/tea.jpg)");
        assert!(html.contains(r#"src="/media/tea.jpg""#));
        assert!(!html.contains("tea ceremony"));

        let html = render_description("![x](data:text/html;base64,AAAA)");
        assert!(html.contains(r##"src="#""##));
    }

    #[test]
    fn test_safe_url_schemes() {
        assert_eq!(safe_url("mailto:host@example.com"), "mailto:host@example.com");
        assert_eq!(safe_url("  JavaScript:void(0)"), "#");
        assert_eq!(safe_url("/experiences?page=2"), "/experiences?page=2");
        assert_eq!(safe_url("#reviews"), "#reviews");
    }

    #[test]
    fn test_plain_excerpt() {
        let text = "# Tea in Kyoto\n\nA **quiet** morning with `matcha`.";
        assert_eq!(plain_excerpt(text, 100), "Tea in Kyoto A quiet morning with matcha.");
        assert_eq!(plain_excerpt(text, 12), "Tea in Kyoto…");
        assert_eq!(plain_excerpt("", 10), "");
    }
}
