use std::sync::Arc;

use larder_core::media::InMemoryMediaStore;
use larder_core::webhook::{Destination, DispatchOutcome, RecordingTransport, WebhookPayload};
use larder_core::{
    ArticlePublicationHook, Collection, DocumentId, DocumentStore, LarderError,
    MediaRecord, MemoryDocumentStore, Operation, WebhookConfig, WebhookDispatcher, WebhookEvent,
    WritePipeline,
};
use serde_json::{json, Value};

const LOCAL_HOOK: &str = "http://localhost:4321/api/rebuild";

struct Harness {
    pipeline: WritePipeline,
    transport: Arc<RecordingTransport>,
    media: Arc<InMemoryMediaStore>,
}

fn harness(store: MemoryDocumentStore, config: WebhookConfig) -> Harness {
    let media = Arc::new(
        InMemoryMediaStore::new().with_record(MediaRecord::new(1, Some("A sponge cake"))),
    );
    let transport = Arc::new(RecordingTransport::responding(200));
    let pipeline = WritePipeline::new(
        Box::new(store),
        ArticlePublicationHook::new(media.clone()),
        WebhookDispatcher::new(config, transport.clone()),
    );
    Harness {
        pipeline,
        transport,
        media,
    }
}

fn cake() -> Value {
    json!({
        "title": "Cake",
        "slug": "cake",
        "date": "2024-01-01",
        "readyForPublication": true,
        "excerpt": "A simple sponge.",
        "contentV2": {"root": {"type": "root", "children": [
            {"type": "paragraph", "children": [{"type": "text", "text": "A cake."}]}
        ]}},
        "featuredMedia": 1
    })
}

#[test]
fn publishable_article_commits_and_dispatches_once() {
    let h = harness(MemoryDocumentStore::new(), WebhookConfig::production(LOCAL_HOOK));

    let outcome = h.pipeline.write(Collection::Articles, None, cake()).unwrap();

    assert_eq!(outcome.operation, Operation::Create);
    assert_eq!(outcome.dispatch, DispatchOutcome::Delivered { status: 200 });
    assert_eq!(h.transport.call_count(), 1);
    let request = &h.transport.requests()[0];
    assert_eq!(request.body["operation"], "create");
    assert_eq!(request.body["slug"], "cake");
    assert_eq!(request.body["id"], outcome.document["id"]);
    assert_eq!(h.media.lookup_count(), 1);
}

#[test]
fn second_write_is_an_update() {
    let h = harness(MemoryDocumentStore::new(), WebhookConfig::production(LOCAL_HOOK));
    let created = h.pipeline.write(Collection::Articles, None, cake()).unwrap();
    let id = DocumentId::from_value(&created.document["id"]).unwrap();

    let updated = h
        .pipeline
        .write(Collection::Articles, Some(&id), json!({"excerpt": "Now with jam."}))
        .unwrap();

    assert_eq!(updated.operation, Operation::Update);
    assert_eq!(updated.document["title"], "Cake");
    assert_eq!(updated.document["excerpt"], "Now with jam.");
    let requests = h.transport.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].body["operation"], "update");
}

#[test]
fn failed_checklist_stores_and_sends_nothing() {
    let h = harness(MemoryDocumentStore::new(), WebhookConfig::production(LOCAL_HOOK));
    let mut draft = cake();
    draft["slug"] = json!("My Slug!");
    draft["featuredMedia"] = json!(99);

    let err = h.pipeline.write(Collection::Articles, None, draft).unwrap_err();

    match &err {
        LarderError::Validation { collection, issues } => {
            assert_eq!(*collection, Collection::Articles);
            let paths: Vec<&str> = issues.iter().map(|i| i.path.as_str()).collect();
            assert_eq!(paths, vec!["slug", "featuredMedia"]);
            assert_eq!(issues[1].message, "Featured media is missing alt text in Media.");
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
    assert_eq!(h.transport.call_count(), 0);
    assert!(h
        .pipeline
        .store()
        .find(Collection::Articles, &DocumentId::from(1))
        .unwrap()
        .is_none());
}

#[test]
fn adding_modern_content_to_legacy_article_is_revalidated() {
    let stored = json!({
        "id": 7,
        "title": "Cake",
        "slug": "cake",
        "date": "2024-01-01",
        "readyForPublication": true,
        "content": "<p>Legacy body</p>"
    });
    let store = MemoryDocumentStore::new().with_document(Collection::Articles, stored);
    let h = harness(store, WebhookConfig::production(LOCAL_HOOK));

    // Adding modern content pulls in the excerpt and media requirements.
    let err = h
        .pipeline
        .write(
            Collection::Articles,
            Some(&DocumentId::from(7)),
            json!({"recipeBlocks": [{"blockType": "recipeCard", "title": "Cake", "servings": "8",
                "ingredients": [{"quantity": "3", "item": "eggs"}],
                "steps": [{"instruction": "Whisk."}]}]}),
        )
        .unwrap_err();
    let paths: Vec<&str> = err.issues().unwrap().iter().map(|i| i.path.as_str()).collect();
    assert_eq!(paths, vec!["excerpt", "featuredMedia"]);
    assert_eq!(h.transport.call_count(), 0);
}

#[test]
fn other_collections_skip_the_checklist() {
    let h = harness(MemoryDocumentStore::new(), WebhookConfig::production(LOCAL_HOOK));

    let outcome = h
        .pipeline
        .write(Collection::Authors, None, json!({"name": "Jo Baker", "title": ""}))
        .unwrap();

    assert!(outcome.dispatch.is_delivered());
    let request = &h.transport.requests()[0];
    assert_eq!(request.body["collection"], "authors");
    assert_eq!(request.body["slug"], "Jo Baker");
}

#[test]
fn development_mode_commits_without_dispatch() {
    let config = WebhookConfig {
        url: LOCAL_HOOK.to_string(),
        ..WebhookConfig::default()
    };
    let h = harness(MemoryDocumentStore::new(), config);

    let outcome = h.pipeline.write(Collection::Tags, None, json!({"slug": "vegan"})).unwrap();

    assert_eq!(outcome.dispatch, DispatchOutcome::SkippedNotProduction);
    assert_eq!(h.transport.call_count(), 0);
    assert_eq!(outcome.document["slug"], "vegan");
}

#[test]
fn rejected_dispatch_does_not_fail_the_write() {
    let media = Arc::new(InMemoryMediaStore::new());
    let transport = Arc::new(RecordingTransport::responding_with(500, "upstream down"));
    let pipeline = WritePipeline::new(
        Box::new(MemoryDocumentStore::new()),
        ArticlePublicationHook::new(media),
        WebhookDispatcher::new(
            WebhookConfig::production("https://api.github.com/repos/acme/site/dispatches")
                .with_token("ghp_x"),
            transport.clone(),
        ),
    );

    let outcome = pipeline
        .write(Collection::Media, None, json!({"alt": "Pie", "url": "/m/pie.jpg"}))
        .unwrap();

    assert!(matches!(outcome.dispatch, DispatchOutcome::Rejected { status: 500, .. }));
    assert_eq!(transport.requests()[0].body["event_type"], "payload-update");
}

#[test]
fn remote_envelope_shape() {
    let event = WebhookEvent::new(Collection::Articles, Operation::Update)
        .with_id(42)
        .with_slug("cake");
    let payload = WebhookPayload::for_destination(&event, Destination::Remote);
    insta::assert_yaml_snapshot!(payload, @r###"
    event_type: payload-update
    client_payload:
      collection: articles
      operation: update
      id: 42
      slug: cake
    "###);
}
