//! Ordered extraction passes over a task title.
//!
//! Each pass is a plain function over `&str`. The order in [`run_pipeline`]
//! matters: URLs go first so their `/` and `(...)` never reach the ingredient
//! or bracket passes, and labels are pulled before brackets are unwrapped.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// Title used when nothing is left after extraction.
pub const PLACEHOLDER_TITLE: &str = "FIX_ME";

/// Everything pulled out of a raw title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleParts {
    /// The cleaned title, never empty.
    pub title: String,
    /// First URL found in the raw title.
    pub url: Option<String>,
    /// Inner text of the first parenthesized list, e.g. `carrots, celery`.
    pub ingredients: Option<String>,
    /// `@label` tokens without the `@`, in the order found.
    pub labels: Vec<String>,
}

/// Run every pass over a raw title.
pub(crate) fn run_pipeline(raw: &str) -> TitleParts {
    let url = find_url(raw);
    let title = remove_urls(raw);

    let ingredients = find_ingredient_list(&title);
    let title = remove_ingredient_list(&title);

    let labels = find_labels(&title);
    let title = remove_labels(&title);

    let title = unwrap_brackets(&title);
    let title = strip_slashes(&title);
    let title = finalize(&title);

    TitleParts {
        title,
        url,
        ingredients,
        labels,
    }
}

// ---------------------------------------------------------------------------
// Pass 1: URLs
// ---------------------------------------------------------------------------

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://[^\s)]+").expect("valid regex"));

/// Matches a URL together with optional surrounding parentheses.
static WRAPPED_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(?https?://[^\s)]+\)?").expect("valid regex"));

fn find_url(title: &str) -> Option<String> {
    URL_RE.find(title).map(|m| m.as_str().to_string())
}

fn remove_urls(title: &str) -> String {
    WRAPPED_URL_RE.replace_all(title, "").into_owned()
}

// ---------------------------------------------------------------------------
// Pass 2: Ingredient list
// ---------------------------------------------------------------------------

/// `(item, item[, item...])` where items are ASCII word characters, spaces,
/// slashes and apostrophes.
static INGREDIENT_LIST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(((?:[0-9A-Za-z_\s’'/]+,\s+)+[0-9A-Za-z_\s’'/]+)\)").expect("valid regex")
});

fn find_ingredient_list(title: &str) -> Option<String> {
    INGREDIENT_LIST_RE
        .captures(title)
        .map(|caps| caps[1].to_string())
}

fn remove_ingredient_list(title: &str) -> String {
    INGREDIENT_LIST_RE.replace(title, "").into_owned()
}

// ---------------------------------------------------------------------------
// Pass 3: Labels
// ---------------------------------------------------------------------------

static LABEL_CANDIDATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@[A-Za-z_-]+").expect("valid regex"));

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Byte spans of `@label` tokens.
///
/// A token must not be glued to a preceding word character (so e-mail
/// addresses are left alone), must end on a word boundary and must not be
/// directly followed by `;`. When the full run fails the last two checks the
/// longest prefix that passes them wins, so `@to-do;` yields `@to-`.
fn label_spans(title: &str) -> Vec<Range<usize>> {
    let bytes = title.as_bytes();

    LABEL_CANDIDATE_RE
        .find_iter(title)
        .filter(|m| m.start() == 0 || !is_word_byte(bytes[m.start() - 1]))
        .filter_map(|m| {
            (m.start() + 2..=m.end())
                .rev()
                .find(|&end| ends_on_boundary(bytes, end) && bytes.get(end) != Some(&b';'))
                .map(|end| m.start()..end)
        })
        .collect()
}

fn ends_on_boundary(bytes: &[u8], end: usize) -> bool {
    let before = is_word_byte(bytes[end - 1]);
    let after = bytes.get(end).is_some_and(|&b| is_word_byte(b));
    before != after
}

fn find_labels(title: &str) -> Vec<String> {
    label_spans(title)
        .into_iter()
        .map(|span| title[span.start + 1..span.end].to_string())
        .collect()
}

fn remove_labels(title: &str) -> String {
    let mut result = String::with_capacity(title.len());
    let mut last = 0;
    for span in label_spans(title) {
        result.push_str(&title[last..span.start]);
        last = span.end;
    }
    result.push_str(&title[last..]);
    result
}

// ---------------------------------------------------------------------------
// Pass 4: Bracket unwrap
// ---------------------------------------------------------------------------

static BRACKETED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\[(](.*?)[\])]").expect("valid regex"));

/// Replace the first `[...]` or `(...)` segment with its inner text.
fn unwrap_brackets(title: &str) -> String {
    BRACKETED_RE.replace(title, "${1}").into_owned()
}

// ---------------------------------------------------------------------------
// Pass 5: Slashes
// ---------------------------------------------------------------------------

/// Titles become file names, so no `/` may survive.
fn strip_slashes(title: &str) -> String {
    title.replace('/', "")
}

// ---------------------------------------------------------------------------
// Pass 6: Trim and fallback
// ---------------------------------------------------------------------------

/// Collapse the gaps left by removed tokens, trim, and fall back to
/// [`PLACEHOLDER_TITLE`] when nothing is left.
fn finalize(title: &str) -> String {
    let collapsed = title.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        PLACEHOLDER_TITLE.to_string()
    } else {
        collapsed
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
