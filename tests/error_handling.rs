use copycheck::{
    AnalysisOrchestrator, FingerprintRegistry, InMemoryBlobStore, PipelineError, RenderOverrides,
    Service, StaticRenderer, UpstreamError,
};
use std::sync::Arc;

fn orchestrator_with(
    store: Arc<InMemoryBlobStore>,
    renderer: Arc<StaticRenderer>,
) -> AnalysisOrchestrator {
    AnalysisOrchestrator::new(store, renderer, Arc::new(FingerprintRegistry::new()))
}

fn ok_renderer() -> Arc<StaticRenderer> {
    Arc::new(StaticRenderer::new(&b"PNG"[..]))
}

#[tokio::test]
async fn blank_document_id_is_rejected_before_fetching() {
    let store = Arc::new(InMemoryBlobStore::new());
    store.set_offline(true);
    let orchestrator = orchestrator_with(store, ok_renderer());

    assert!(matches!(
        orchestrator.submit("").await,
        Err(PipelineError::Validation(_))
    ));
    assert!(matches!(
        orchestrator.submit("   ").await,
        Err(PipelineError::Validation(_))
    ));
}

#[tokio::test]
async fn missing_document_is_document_not_found() {
    let orchestrator = orchestrator_with(Arc::new(InMemoryBlobStore::new()), ok_renderer());

    let err = orchestrator.submit("missing.txt").await.unwrap_err();
    assert_eq!(err, PipelineError::DocumentNotFound("missing.txt".into()));
    assert!(orchestrator.retrieve("missing.txt").is_none());
}

#[tokio::test]
async fn offline_blob_store_is_upstream_unavailable() {
    let store = Arc::new(InMemoryBlobStore::new());
    store.insert("doc.txt", "content");
    store.set_offline(true);
    let orchestrator = orchestrator_with(store, ok_renderer());

    let err = orchestrator.submit("doc.txt").await.unwrap_err();
    assert!(matches!(
        err,
        PipelineError::UpstreamUnavailable {
            service: Service::BlobStore,
            ..
        }
    ));
}

#[tokio::test]
async fn blob_store_status_is_forwarded() {
    let store = Arc::new(InMemoryBlobStore::new());
    store.fail_with("doc.txt", UpstreamError::status(500, "disk on fire"));
    let orchestrator = orchestrator_with(store, ok_renderer());

    let err = orchestrator.submit("doc.txt").await.unwrap_err();
    assert_eq!(
        err,
        PipelineError::Upstream {
            service: Service::BlobStore,
            status: 500,
            reason: "disk on fire".into(),
        }
    );
}

#[tokio::test]
async fn failed_submission_leaves_earlier_result_in_place() {
    let store = Arc::new(InMemoryBlobStore::new());
    store.insert("doc.txt", "content");
    let orchestrator = orchestrator_with(store.clone(), ok_renderer());

    let stored = orchestrator.submit("doc.txt").await.unwrap();
    store.set_offline(true);
    orchestrator.submit("doc.txt").await.unwrap_err();

    assert_eq!(orchestrator.retrieve("doc.txt"), Some(stored));
}

#[tokio::test]
async fn empty_document_has_nothing_to_render() {
    let store = Arc::new(InMemoryBlobStore::new());
    store.insert("empty.txt", "");
    store.insert("blank.txt", " \n\t ");
    let renderer = ok_renderer();
    let orchestrator = orchestrator_with(store, renderer.clone());

    for id in ["empty.txt", "blank.txt"] {
        let err = orchestrator
            .render_word_cloud(id, &RenderOverrides::default())
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::Validation(_)), "{id}: {err}");
    }
    assert_eq!(renderer.calls(), 0);
}

#[tokio::test]
async fn invalid_render_options_are_rejected_before_fetching() {
    let store = Arc::new(InMemoryBlobStore::new());
    store.set_offline(true);
    let renderer = ok_renderer();
    let orchestrator = orchestrator_with(store, renderer.clone());

    let overrides = RenderOverrides {
        width: Some(0),
        ..RenderOverrides::default()
    };
    let err = orchestrator
        .render_word_cloud("doc.txt", &overrides)
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::Validation(_)));
    assert_eq!(renderer.calls(), 0);
}

#[tokio::test]
async fn word_cloud_for_missing_document_is_not_found() {
    let renderer = ok_renderer();
    let orchestrator = orchestrator_with(Arc::new(InMemoryBlobStore::new()), renderer.clone());

    let err = orchestrator
        .render_word_cloud("missing.txt", &RenderOverrides::default())
        .await
        .unwrap_err();
    assert_eq!(err, PipelineError::DocumentNotFound("missing.txt".into()));
    assert_eq!(renderer.calls(), 0);
}

#[tokio::test]
async fn renderer_failure_keeps_status_and_body() {
    let store = Arc::new(InMemoryBlobStore::new());
    store.insert("doc.txt", "some words");
    let renderer = Arc::new(StaticRenderer::failing(UpstreamError::status(
        400,
        "text rejected by renderer",
    )));
    let orchestrator = orchestrator_with(store, renderer);

    let err = orchestrator
        .render_word_cloud("doc.txt", &RenderOverrides::default())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        PipelineError::Upstream {
            service: Service::Renderer,
            status: 400,
            reason: "text rejected by renderer".into(),
        }
    );
}

#[tokio::test]
async fn unreachable_renderer_is_upstream_unavailable() {
    let store = Arc::new(InMemoryBlobStore::new());
    store.insert("doc.txt", "some words");
    let renderer = Arc::new(StaticRenderer::failing(UpstreamError::unreachable(
        "connection refused",
    )));
    let orchestrator = orchestrator_with(store, renderer);

    let err = orchestrator
        .render_word_cloud("doc.txt", &RenderOverrides::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        PipelineError::UpstreamUnavailable {
            service: Service::Renderer,
            ..
        }
    ));
}
