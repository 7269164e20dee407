use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

/// Results only render on pages whose path contains this.
pub const SEARCH_PAGE_MARKER: &str = "search_query";

/// Everything `encodeURIComponent` escapes.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Shown when a search comes back empty.
pub const NO_RESULTS: &str = "<p>No results found</p>";

/// One case in a list of search results, as the server injects it into the
/// page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResult {
    /// Document ID, used to link to the full judgment
    pub id: String,

    /// Case title, e.g. "Union of India Vs. M/s G.S. Chatha Rice Mills"
    pub title: String,

    /// Citation, e.g. "Civil Appeal No(s). 2176 of 2021"
    pub citation: String,

    /// When judgment was given
    pub judgment_date: String,

    /// A short excerpt matching the query
    pub snippet: String,
}

impl SearchResult {
    /// Where the full document lives.
    pub fn doc_path(&self) -> String {
        format!("/doc-view/{}", utf8_percent_encode(&self.id, URI_COMPONENT))
    }

    /// Markup for a single result.
    pub fn to_html(&self) -> String {
        format!(
            concat!(
                r#"<div class="result-item">"#,
                r#"<a href="{href}">"#,
                "<h3>{title}</h3>",
                r#"<p class="citation">{citation} • {date}</p>"#,
                r#"<p class="snippet">{snippet}</p>"#,
                "</a>",
                "</div>",
            ),
            href = escape_html(&self.doc_path()),
            title = escape_html(&self.title),
            citation = escape_html(&self.citation),
            date = escape_html(&self.judgment_date),
            snippet = escape_html(&self.snippet),
        )
    }
}

/// Should this page show search results?
pub fn is_search_results_path(path: &str) -> bool {
    path.contains(SEARCH_PAGE_MARKER)
}

/// Markup for a whole result list.
pub fn render_results(results: &[SearchResult]) -> String {
    if results.is_empty() {
        return NO_RESULTS.to_string();
    }

    results.iter().map(SearchResult::to_html).collect()
}

/// Escape text for use in element content or a quoted attribute.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chatha() -> SearchResult {
        SearchResult {
            id: "doc001".to_string(),
            title: "Union of India Vs. M/s G.S. Chatha Rice Mills".to_string(),
            citation: "Civil Appeal No(s). 2176 of 2021".to_string(),
            judgment_date: "2021-03-10".to_string(),
            snippet: "The core issue revolves around customs tariffs".to_string(),
        }
    }

    #[test]
    fn empty_results_say_so() {
        assert_eq!(render_results(&[]), "<p>No results found</p>");
    }

    #[test]
    fn renders_one_item_per_result() {
        let mut other = chatha();
        other.id = "doc002".to_string();

        let html = render_results(&[chatha(), other]);

        assert_eq!(html.matches(r#"class="result-item""#).count(), 2);
        assert!(html.contains(r#"href="/doc-view/doc001""#));
        assert!(html.contains(r#"href="/doc-view/doc002""#));
        assert!(html.contains("Civil Appeal No(s). 2176 of 2021 • 2021-03-10"));
    }

    #[test]
    fn ids_are_encoded() {
        let mut result = chatha();
        result.id = "a/b c?d".to_string();

        assert_eq!(result.doc_path(), "/doc-view/a%2Fb%20c%3Fd");
    }

    #[test]
    fn non_ascii_ids_are_encoded_as_utf8() {
        let mut result = chatha();
        result.id = "é".to_string();

        assert_eq!(result.doc_path(), "/doc-view/%C3%A9");
    }

    #[test]
    fn uri_component_marks_are_left_alone() {
        let mut result = chatha();
        result.id = "a-b_c.d!e~f*g'h(i)".to_string();

        assert_eq!(result.doc_path(), "/doc-view/a-b_c.d!e~f*g'h(i)");
    }

    #[test]
    fn text_is_escaped() {
        let mut result = chatha();
        result.title = "<script>alert('hi')</script>".to_string();

        let html = result.to_html();

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;hi&#39;)&lt;/script&gt;"));
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let result: SearchResult = serde_json::from_str(r#"{"id": "doc003"}"#).unwrap();

        assert_eq!(result.title, "");
        assert_eq!(result.doc_path(), "/doc-view/doc003");
    }

    #[test]
    fn only_search_pages_show_results() {
        assert!(is_search_results_path("/search_query"));
        assert!(!is_search_results_path("/"));
        assert!(!is_search_results_path("/history"));
    }
}
