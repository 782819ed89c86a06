use chrono::{DateTime, Utc};
use serde_json::Value;
use st_core::{Post, PostSummary, QueryResponse, RawRecord};

/// Map a raw CMS record into a `Post`. Missing or mistyped fields become
/// empty strings, an unparseable timestamp becomes `None`. Never fails.
pub fn normalize_record(record: &RawRecord) -> Post {
    Post {
        id: record.uid.clone(),
        published_at: record
            .first_publication_date
            .as_deref()
            .and_then(parse_timestamp),
        summary: PostSummary {
            title: text_field(&record.data, "title"),
            subtitle: text_field(&record.data, "subtitle"),
            author: text_field(&record.data, "author"),
        },
    }
}

/// Normalize a full page response into posts plus the next cursor.
/// Source ordering is preserved; an empty-string cursor counts as terminal.
pub fn normalize_response(response: &QueryResponse) -> (Vec<Post>, Option<String>) {
    let posts = response.results.iter().map(normalize_record).collect();
    let next_page = response
        .next_page
        .clone()
        .filter(|cursor| !cursor.is_empty());
    (posts, next_page)
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    // Prismic emits "+0000" offsets, which strict RFC 3339 parsing rejects.
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%z"))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn text_field(data: &Value, key: &str) -> String {
    data.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use serde_json::json;

    fn record(value: Value) -> RawRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_normalize_complete_record() {
        let post = normalize_record(&record(json!({
            "uid": "como-utilizar-hooks",
            "first_publication_date": "2021-03-15T19:25:28+0000",
            "data": {
                "title": "Como utilizar Hooks",
                "subtitle": "Pensando em sincronização em vez de ciclos de vida",
                "author": "Joseph Oliveira"
            }
        })));

        assert_eq!(post.id.as_deref(), Some("como-utilizar-hooks"));
        assert_eq!(post.summary.title, "Como utilizar Hooks");
        assert_eq!(post.summary.author, "Joseph Oliveira");
        let published = post.published_at.unwrap();
        assert_eq!((published.year(), published.month(), published.day()), (2021, 3, 15));
    }

    #[test]
    fn test_normalize_rfc3339_timestamp() {
        let post = normalize_record(&record(json!({
            "uid": "a",
            "first_publication_date": "2021-03-15T19:25:28+00:00",
            "data": {}
        })));
        assert!(post.published_at.is_some());
    }

    #[test]
    fn test_missing_fields_become_defaults() {
        let post = normalize_record(&record(json!({ "uid": null })));
        assert!(post.id.is_none());
        assert!(post.published_at.is_none());
        assert_eq!(post.summary, PostSummary::default());
    }

    #[test]
    fn test_mistyped_fields_become_defaults() {
        // Rich-text payloads show up as arrays; never panic on them.
        let post = normalize_record(&record(json!({
            "uid": "weird",
            "first_publication_date": "not a date",
            "data": {
                "title": [{"type": "heading1", "text": "Oops"}],
                "subtitle": 42,
                "author": null
            }
        })));
        assert_eq!(post.id.as_deref(), Some("weird"));
        assert!(post.published_at.is_none());
        assert_eq!(post.summary, PostSummary::default());
    }

    #[test]
    fn test_normalize_response_preserves_order() {
        let response: QueryResponse = serde_json::from_value(json!({
            "results": [
                {"uid": "b", "data": {"title": "B"}},
                {"uid": "a", "data": {"title": "A"}}
            ],
            "next_page": "https://cms.example/page2"
        }))
        .unwrap();

        let (posts, next_page) = normalize_response(&response);
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].id.as_deref(), Some("b"));
        assert_eq!(posts[1].id.as_deref(), Some("a"));
        assert_eq!(next_page.as_deref(), Some("https://cms.example/page2"));
    }

    #[test]
    fn test_empty_cursor_is_terminal() {
        let response: QueryResponse =
            serde_json::from_value(json!({ "results": [], "next_page": "" })).unwrap();
        let (_, next_page) = normalize_response(&response);
        assert!(next_page.is_none());
    }
}
