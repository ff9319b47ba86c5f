//! HTML document assembly.

use todoexport_shared::Note;

use crate::passes::TitleParts;

/// Heading text when a title carried no ingredient list. Downstream
/// consumers already key on this literal.
const MISSING_INGREDIENTS: &str = "undefined";

/// Render labels as space-separated hashtags, extra labels first.
pub fn hashtags(extra_labels: &[String], extracted: &[String]) -> String {
    extra_labels
        .iter()
        .chain(extracted)
        .map(|label| format!("#{label}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Build the final HTML for one task.
///
/// Body layout before newline conversion:
/// ```text
/// \n#label #label\n\n
/// <a href="URL">URL</a>\n\n          (only with a URL)
/// \n</b>DATE</b>:\n\nCONTENT\n       (per note)
/// ```
/// The note date is wrapped in two closing `</b>` tags; existing readers of
/// these files depend on that exact markup.
pub(crate) fn render_document(parts: &TitleParts, notes: &[Note], extra_labels: &[String]) -> String {
    let mut body = format!("\n{}\n\n", hashtags(extra_labels, &parts.labels));

    if let Some(url) = &parts.url {
        body.push_str(&format!("<a href=\"{url}\">{url}</a>\n\n"));
    }

    for note in notes {
        body.push_str(&format!("\n</b>{}</b>:\n\n{}\n", note.date, note.content));
    }

    let heading = parts.ingredients.as_deref().unwrap_or(MISSING_INGREDIENTS);
    let html = format!(
        "<html lang=\"en\"><head><title>{}</title></head><body><h2>{heading}</h2>{body}</body>",
        parts.title
    );

    html.replace('\n', "<br/>")
}
