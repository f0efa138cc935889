use serde_json::{Value, json};
use snipnest_collection::{ApiError, SnippetApi, SnippetSession};
use snipnest_types::{RawSnippet, SnippetDraft, SnippetId, SnippetPatch, wire};

/// In-memory stand-in for the REST backend. Records are kept in wire form so
/// every fetch exercises the tolerant decode path.
struct MockSnippetApi {
    records: Vec<Value>,
    next_id: i64,
    rate_limit: Option<u64>,
}

impl MockSnippetApi {
    fn new(records: Vec<Value>) -> Self {
        MockSnippetApi {
            records,
            next_id: 100,
            rate_limit: None,
        }
    }

    fn position(&self, id: &SnippetId) -> Option<usize> {
        let wire_id = serde_json::to_value(id).expect("id serializes");
        self.records.iter().position(|r| r.get("id") == Some(&wire_id))
    }

    fn throttled(&self) -> Result<(), ApiError> {
        match self.rate_limit {
            Some(retry_after) => Err(ApiError::RateLimited { retry_after }),
            None => Ok(()),
        }
    }
}

impl SnippetApi for MockSnippetApi {
    fn fetch_snippets(&mut self) -> Result<Vec<RawSnippet>, ApiError> {
        self.throttled()?;
        wire::decode_snippets(&Value::Array(self.records.clone()).to_string())
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn create_snippet(&mut self, draft: &SnippetDraft) -> Result<RawSnippet, ApiError> {
        self.throttled()?;
        let id = self.next_id;
        self.next_id += 1;
        let record = json!({
            "id": id,
            "title": draft.title,
            "content": draft.content,
            "language": draft.language,
            "tags": draft.tags,
            "favourite": draft.favourite,
            "is_public": draft.is_public,
            "created_at": format!("2025-03-{:02}T00:00:00Z", id % 28 + 1),
        });
        self.records.push(record.clone());
        serde_json::from_value(record).map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn update_snippet(&mut self, id: &SnippetId, patch: &SnippetPatch) -> Result<(), ApiError> {
        self.throttled()?;
        let idx = self
            .position(id)
            .ok_or_else(|| ApiError::Request(format!("no snippet {id}")))?;
        let record = &mut self.records[idx];
        record["title"] = json!(patch.title);
        record["content"] = json!(patch.content);
        record["language"] = json!(patch.language);
        record["tags"] = json!(patch.tags);
        record["favourite"] = json!(patch.favourite);
        record["is_public"] = json!(patch.is_public);
        Ok(())
    }

    fn delete_snippet(&mut self, id: &SnippetId) -> Result<(), ApiError> {
        self.throttled()?;
        // The backend's DELETE is idempotent: deleting a gone record is fine.
        if let Some(idx) = self.position(id) {
            self.records.remove(idx);
        }
        Ok(())
    }

    fn set_favourite(&mut self, id: &SnippetId, favourite: bool) -> Result<(), ApiError> {
        self.throttled()?;
        let idx = self
            .position(id)
            .ok_or_else(|| ApiError::Request(format!("no snippet {id}")))?;
        self.records[idx]["favourite"] = json!(favourite);
        Ok(())
    }
}

/// A fetch-all payload with the tag and timestamp drift seen in production.
fn messy_records() -> Vec<Value> {
    vec![
        json!({"id": 1, "title": "Auth helper", "content": "def auth(): pass",
               "language": "python", "tags": ["api", "jwt"],
               "favourite": false, "is_public": true,
               "created_at": "2025-01-15T10:30:00Z"}),
        json!({"id": 2, "title": "Flex center", "content": ".c { display: flex }",
               "language": "css", "tags": "[\"layout\", \"flexbox\"]",
               "favourite": true, "is_public": false,
               "created_at": "2025-01-13"}),
        json!({"id": 3, "title": "Join query", "content": "SELECT 1;",
               "language": "sql", "tags": "{database,joins}",
               "favourite": false, "is_public": true,
               "created_at": "2025-01-11 08:45:00"}),
    ]
}

fn session() -> SnippetSession<MockSnippetApi> {
    init_tracing();
    let mut session = SnippetSession::new(MockSnippetApi::new(messy_records()));
    session.refresh().expect("initial refresh");
    session
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init()
        .ok();
}

#[test]
fn test_refresh_normalizes_all_tag_shapes() {
    let session = session();
    let collection = session.collection();
    assert_eq!(collection.len(), 3);

    let tags_of = |id: i64| {
        collection
            .get(&SnippetId::Int(id))
            .map(|s| s.tags.clone())
            .unwrap()
    };
    assert_eq!(tags_of(1), vec!["api", "jwt"]);
    assert_eq!(tags_of(2), vec!["layout", "flexbox"]);
    assert_eq!(tags_of(3), vec!["database", "joins"]);

    assert_eq!(
        collection.all_tags(),
        vec!["api", "database", "flexbox", "joins", "jwt", "layout"]
    );
}

#[test]
fn test_created_snippet_is_immediately_visible() {
    let mut session = session();
    let mut draft = SnippetDraft::new("Stream demo", "names.stream()", "java");
    draft.tags = vec!["streams".to_string()];

    let id = session.create(draft).expect("create");
    let visible = session.collection().visible();
    assert!(visible.iter().any(|s| s.id == id));
    assert!(session.collection().all_languages().contains(&"java".to_string()));
}

#[test]
fn test_edit_propagates_to_view() {
    let mut session = session();
    let id = SnippetId::Int(1);
    let mut patch = SnippetPatch::from(session.collection().get(&id).unwrap());
    patch.title = "Auth middleware".to_string();
    patch.is_public = false;

    session.edit(&id, patch).expect("edit");
    let edited = session.collection().get(&id).unwrap();
    assert_eq!(edited.title, "Auth middleware");
    assert!(!edited.is_public);
}

#[test]
fn test_toggle_favourite_round_trip() {
    let mut session = session();
    let id = SnippetId::Int(3);

    assert!(session.toggle_favourite(&id).expect("first toggle"));
    // Favourite now sorts ahead of the older favourite-free records.
    assert!(session.collection().visible()[0].favourite);

    assert!(!session.toggle_favourite(&id).expect("second toggle"));
}

#[test]
fn test_delete_after_delete_is_noop_success() {
    let mut session = session();
    let id = SnippetId::Int(2);

    session.delete(&id).expect("first delete");
    assert!(session.collection().get(&id).is_none());

    // The backend confirms again, the record is already gone locally: no-op.
    session.delete(&id).expect("second delete");
    assert_eq!(session.collection().len(), 2);
}

#[test]
fn test_rate_limit_passes_through_untouched() {
    let mut session = session();
    session.api_mut().rate_limit = Some(30);

    match session.refresh() {
        Err(ApiError::RateLimited { retry_after }) => assert_eq!(retry_after, 30),
        other => panic!("expected rate limit, got {other:?}"),
    }

    // The cache is untouched by the failed refresh.
    assert_eq!(session.collection().len(), 3);
}

#[test]
fn test_unknown_id_is_a_contract_violation() {
    let mut session = session();
    let missing = SnippetId::Int(999);
    match session.toggle_favourite(&missing) {
        Err(ApiError::Collection(err)) => {
            assert_eq!(err.to_string(), "snippet 999 not found")
        }
        other => panic!("expected collection error, got {other:?}"),
    }
}
