//! Picks the first usable book out of a volumes search response.
//!
//! Items are scanned in order; the first one carrying both a title and an
//! author wins, and its `imageLinks.thumbnail` (if any) becomes the cover.
//! Later items are never consulted.

use serde_json::Value;

use crate::error::LookupError;
use crate::lookup::{BookResult, SelectionOutcome};

/// Select a book from a raw payload. Every failure collapses into `NotFound`.
pub fn select(payload: Option<&str>) -> SelectionOutcome {
    match try_select(payload) {
        Ok(book) => SelectionOutcome::Found(book),
        Err(e) => {
            tracing::debug!(reason = %e, "no usable book in response");
            SelectionOutcome::NotFound
        }
    }
}

/// Like [`select`] but keeps the reason a payload produced no book.
pub fn try_select(payload: Option<&str>) -> Result<BookResult, LookupError> {
    let body = payload.ok_or(LookupError::Transport)?;
    let root: Value =
        serde_json::from_str(body).map_err(|e| LookupError::MalformedPayload(e.to_string()))?;
    let root = root.as_object().ok_or_else(|| {
        LookupError::MalformedPayload("response root is not an object".to_string())
    })?;
    let items = match root.get("items") {
        Some(Value::Array(items)) => items,
        // A search with no hits omits "items" entirely.
        None | Some(Value::Null) => return Err(LookupError::NoQualifyingItem),
        Some(_) => {
            return Err(LookupError::MalformedPayload(
                "\"items\" is not an array".to_string(),
            ))
        }
    };

    items
        .iter()
        .enumerate()
        .find_map(|(i, item)| {
            let book = candidate(item);
            if book.is_none() {
                tracing::debug!(index = i, "skipping item without title and author");
            }
            book
        })
        .ok_or(LookupError::NoQualifyingItem)
}

fn candidate(item: &Value) -> Option<BookResult> {
    let info = item.get("volumeInfo")?.as_object()?;
    let title = display_string(info.get("title")?)?;
    let author = display_string(info.get("authors")?)?;
    let cover_url = info
        .get("imageLinks")
        .and_then(|links| links.get("thumbnail"))
        .and_then(display_string);
    BookResult::new(title, author, cover_url)
}

/// Strings are used verbatim; other values (the real API sends `authors` as
/// an array) are shown as their compact JSON text. Null and empty strings
/// count as missing. Applies alike to title, authors and thumbnail.
fn display_string(v: &Value) -> Option<String> {
    match v {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use serde_json::json;

    fn found(title: &str, author: &str, cover: Option<&str>) -> SelectionOutcome {
        SelectionOutcome::Found(BookResult::new(title, author, cover.map(String::from)).unwrap())
    }

    #[test]
    fn single_item_without_cover() {
        let payload = r#"{"items":[{"volumeInfo":{"title":"Dune","authors":"Frank Herbert"}}]}"#;
        assert_eq!(select(Some(payload)), found("Dune", "Frank Herbert", None));
    }

    #[test]
    fn skips_item_missing_authors() {
        let payload = r#"{"items":[{"volumeInfo":{"title":"X"}},{"volumeInfo":{"title":"Y","authors":"Z","imageLinks":{"thumbnail":"http://img"}}}]}"#;
        assert_eq!(select(Some(payload)), found("Y", "Z", Some("http://img")));
    }

    #[test]
    fn empty_items_is_not_found() {
        assert_eq!(select(Some(r#"{"items":[]}"#)), SelectionOutcome::NotFound);
        assert!(matches!(
            try_select(Some(r#"{"items":[]}"#)),
            Err(LookupError::NoQualifyingItem)
        ));
    }

    #[test]
    fn absent_payload_is_not_found() {
        assert_eq!(select(None), SelectionOutcome::NotFound);
        assert!(matches!(try_select(None), Err(LookupError::Transport)));
    }

    #[test]
    fn missing_items_field_is_not_found() {
        assert_eq!(select(Some(r#"{"kind":"books#volumes","totalItems":0}"#)), SelectionOutcome::NotFound);
    }

    #[test]
    fn malformed_payloads() {
        for body in ["", "not json", "[1,2,3]x", r#"{"items":"nope"}"#] {
            assert_eq!(select(Some(body)), SelectionOutcome::NotFound, "{body}");
        }
        assert!(matches!(
            try_select(Some("not json")),
            Err(LookupError::MalformedPayload(_))
        ));
    }

    #[test]
    fn first_qualifying_item_wins_over_richer_later_item() {
        let payload = json!({"items": [
            {"volumeInfo": {"title": "A", "authors": "B"}},
            {"volumeInfo": {"title": "C", "authors": "D", "imageLinks": {"thumbnail": "http://c"}}}
        ]})
        .to_string();
        assert_eq!(select(Some(&payload)), found("A", "B", None));
    }

    #[test]
    fn structurally_broken_items_are_skipped() {
        let payload = json!({"items": [
            42,
            {"noVolumeInfo": true},
            {"volumeInfo": "string instead of object"},
            {"volumeInfo": {"title": null, "authors": "Nobody"}},
            {"volumeInfo": {"title": "", "authors": "Nobody"}},
            {"volumeInfo": {"title": "Emma", "authors": ["Jane Austen"], "imageLinks": 7}}
        ]})
        .to_string();
        assert_eq!(select(Some(&payload)), found("Emma", r#"["Jane Austen"]"#, None));
    }

    #[test]
    fn thumbnail_is_coerced_like_title_and_authors() {
        let payload = json!({"items": [
            {"volumeInfo": {"title": "T", "authors": "A", "imageLinks": {"thumbnail": 5, "smallThumbnail": "http://s"}}}
        ]})
        .to_string();
        assert_eq!(select(Some(&payload)), found("T", "A", Some("5")));

        let payload = json!({"items": [
            {"volumeInfo": {"title": "T", "authors": "A", "imageLinks": {"thumbnail": null}}}
        ]})
        .to_string();
        assert_eq!(select(Some(&payload)), found("T", "A", None));
    }

    #[test]
    fn non_object_root_is_malformed() {
        for body in ["[1,2]", r#""hi""#, "42", "null"] {
            assert!(
                matches!(try_select(Some(body)), Err(LookupError::MalformedPayload(_))),
                "{body}"
            );
            assert_eq!(select(Some(body)), SelectionOutcome::NotFound);
        }
    }

    #[derive(Debug, Clone)]
    enum Item {
        Qualifying(String, String),
        TitleOnly(String),
        AuthorOnly(String),
        Broken,
    }

    impl Item {
        fn to_json(&self) -> Value {
            match self {
                Item::Qualifying(t, a) => json!({"volumeInfo": {"title": t, "authors": a}}),
                Item::TitleOnly(t) => json!({"volumeInfo": {"title": t}}),
                Item::AuthorOnly(a) => json!({"volumeInfo": {"authors": a}}),
                Item::Broken => json!([{"volumeInfo": null}]),
            }
        }
    }

    fn item() -> impl Strategy<Value = Item> {
        let word = "[a-zA-Z][a-zA-Z ]{0,11}";
        prop_oneof![
            (word, word).prop_map(|(t, a)| Item::Qualifying(t, a)),
            word.prop_map(Item::TitleOnly),
            word.prop_map(Item::AuthorOnly),
            Just(Item::Broken),
        ]
    }

    fn payload(items: &[Item]) -> String {
        json!({ "items": items.iter().map(Item::to_json).collect::<Vec<_>>() }).to_string()
    }

    proptest! {
        #[test]
        fn picks_first_qualifying_item(items in prop::collection::vec(item(), 0..12)) {
            let expected = items.iter().find_map(|i| match i {
                Item::Qualifying(t, a) => Some(found(t, a, None)),
                _ => None,
            }).unwrap_or(SelectionOutcome::NotFound);
            prop_assert_eq!(select(Some(&payload(&items))), expected);
        }

        #[test]
        fn broken_items_do_not_change_outcome(
            items in prop::collection::vec(item(), 0..12),
            at in 0usize..12,
        ) {
            let mut with_broken = items.clone();
            with_broken.insert(at.min(items.len()), Item::Broken);
            prop_assert_eq!(
                select(Some(&payload(&with_broken))),
                select(Some(&payload(&items)))
            );
        }
    }
}
