use crate::util::{escape_attr, escape_html, strip_control_chars};

/// Label of the link on the last caption line.
pub const READ_MORE_LABEL: &str = "Читать оригинал";

/// Build the HTML caption for a post.
///
/// Layout: tag line, blank line, bold title, blank line, link line. The
/// title and link are escaped so feed text cannot break the markup.
/// Callers must not pass an empty title or link.
pub fn format_caption(tag: &str, title: &str, link: &str) -> String {
    let title = strip_control_chars(title);
    format!(
        "{tag}\n\n<b>{}</b>\n\n🔗 <a href=\"{}\">{READ_MORE_LABEL}</a>",
        escape_html(&title),
        escape_attr(link),
    )
}
