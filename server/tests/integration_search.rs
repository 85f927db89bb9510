use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use lexis_server::{build_app, build_router, AppState, ServerConfig};
use serde_json::Value;
use std::fs;
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

fn write_corpus(dir: &std::path::Path) -> ServerConfig {
    let doc0 = dir.join("rust.txt");
    let doc1 = dir.join("learning.txt");
    let doc2 = dir.join("garden.txt");
    fs::write(&doc0, "Rust is great. Rust systems programming is fast.").unwrap();
    fs::write(&doc1, "Learning rust takes time. Practice helps.").unwrap();
    fs::write(&doc2, "Tomatoes grow in the garden. Water them daily.").unwrap();
    let listing = dir.join("index.txt");
    fs::write(&listing, format!("{}\n{}\n{}\n", doc0.display(), doc1.display(), doc2.display())).unwrap();

    let summaries = dir.join("plot_summaries.txt");
    let metadata = dir.join("movie.metadata.tsv");
    fs::write(
        &summaries,
        "1\tAstronauts travel through a wormhole to find a new home.\n\
         2\tAstronauts stranded on a distant planet try to find a way home.\n\
         3\tA chef opens a small restaurant in Paris.\n",
    )
    .unwrap();
    fs::write(&metadata, "1\t/m/1\tInterstellar\t2014-11-07\n2\t/m/2\tThe Martian\t2015\n3\t/m/3\tChef\t\n").unwrap();

    ServerConfig {
        listing: Some(listing),
        movie_summaries: Some(summaries),
        movie_metadata: Some(metadata),
        ..ServerConfig::default()
    }
}

fn app_with_token() -> (TempDir, Router) {
    let dir = tempdir().unwrap();
    let config = write_corpus(dir.path());
    let state = AppState::from_config(&config).with_admin_token(Some("secret".into()));
    (dir, build_router(state))
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

fn admin_post(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .header("X-ADMIN-TOKEN", "secret")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn search_returns_ranked_results() {
    let dir = tempdir().unwrap();
    let config = write_corpus(dir.path());
    let app = build_app(&config).unwrap();

    let (status, json) = get(&app, "/search?q=rust&k=2").await;
    assert_eq!(status, StatusCode::OK);
    let arr = json["results"].as_array().unwrap();
    assert_eq!(arr.len(), 2);
    assert_eq!(arr[0]["doc_id"].as_u64().unwrap(), 0);
    assert_eq!(arr[1]["doc_id"].as_u64().unwrap(), 1);
    assert!(arr[0]["snippet"].as_str().unwrap().contains("<em>Rust</em>"));
}

#[tokio::test]
async fn doc_endpoint_returns_text() {
    let (_dir, app) = app_with_token();
    let (status, json) = get(&app, "/doc/2").await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["text"].as_str().unwrap().starts_with("Tomatoes"));

    let (status, _) = get(&app, "/doc/9").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn summarize_returns_sentences_in_excerpt_order() {
    let (_dir, app) = app_with_token();
    let (status, json) = get(&app, "/summarize?q=rust%20programming&words=50").await;
    assert_eq!(status, StatusCode::OK);
    let sentences = json["sentences"].as_array().unwrap();
    assert!(!sentences.is_empty());
    let keys: Vec<(String, u64)> = sentences
        .iter()
        .map(|s| (s["document"].as_str().unwrap().to_string(), s["position"].as_u64().unwrap()))
        .collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
}

#[tokio::test]
async fn recommend_skips_the_queried_movie() {
    let (_dir, app) = app_with_token();
    let (status, json) = get(&app, "/recommend?title=Interstellar&k=2").await;
    assert_eq!(status, StatusCode::OK);
    let results = json["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["title"], "The Martian");
    assert!(results.iter().all(|r| r["title"] != "Interstellar"));

    let (status, json) = get(&app, "/recommend?title=Gravity").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("Gravity"));
}

#[tokio::test]
async fn appended_documents_need_a_commit() {
    let (_dir, app) = app_with_token();

    let (status, json) = send(&app, admin_post("/index/documents", r#"[{"name":"extra.txt","text":"Gardening with rust tools."}]"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["normalized"], false);

    let (status, _) = get(&app, "/search?q=rust").await;
    assert_eq!(status, StatusCode::CONFLICT);
    let (status, _) = get(&app, "/summarize?q=rust").await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, json) = send(&app, admin_post("/index/commit", "")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["documents"], 4);

    let (status, json) = get(&app, "/search?q=gardening").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["results"][0]["name"], "extra.txt");
}

#[tokio::test]
async fn admin_endpoints_require_token() {
    let (_dir, app) = app_with_token();
    let req = Request::post("/index/commit").header("X-ADMIN-TOKEN", "wrong").body(Body::empty()).unwrap();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
