//! Grammar and translation clients against mocked HTTP backends
//! Run with: cargo test --test backends_test

use std::sync::{Arc, Once};
use std::time::Duration;

use lingo_bot::application::errors::{GrammarError, TranslateError};
use lingo_bot::application::services::grammar_service::{CHECK_FAILED, NO_ISSUES};
use lingo_bot::application::services::translation_service::{NOT_ENGLISH, TRANSLATE_FAILED};
use lingo_bot::application::services::{GrammarService, LanguageFilter, TranslationService};
use lingo_bot::domain::entities::QuotedText;
use lingo_bot::domain::traits::{GrammarChecker, Translator};
use lingo_bot::infrastructure::grammar::LanguageToolClient;
use lingo_bot::infrastructure::language::WhatlangDetector;
use lingo_bot::infrastructure::translation::google::MAX_CHARS;
use lingo_bot::infrastructure::translation::GoogleTranslator;
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

static INIT: Once = Once::new();

fn ensure_init() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

fn languagetool(server: &MockServer) -> LanguageToolClient {
    LanguageToolClient::with_base_url(format!("{}/v2", server.uri()), "en-US", Duration::from_secs(5))
}

fn google(server: &MockServer) -> GoogleTranslator {
    GoogleTranslator::with_base_url(server.uri(), "en", "fa", Duration::from_secs(5))
}

fn quoted(text: &str) -> QuotedText {
    QuotedText::Text(text.to_string())
}

#[tokio::test]
async fn test_languagetool_check_parses_matches() {
    ensure_init();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/check"))
        .and(body_string_contains("language=en-US"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "matches": [{
                "message": "Possible spelling mistake found.",
                "offset": 6,
                "length": 3,
                "replacements": [{"value": "the"}],
                "rule": {"id": "MORFOLOGIK_RULE_EN_US"}
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let issues = languagetool(&server).check("I saw teh cat.").await.unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].offset, 6);
    assert_eq!(issues[0].replacements, vec!["the"]);
}

#[tokio::test]
async fn test_grammar_workflow_over_http() {
    ensure_init();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/check"))
        .and(body_string_contains("teh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "matches": [{"message": "typo", "offset": 6, "length": 3, "replacements": [{"value": "the"}]}]
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v2/check"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"matches": []})))
        .mount(&server)
        .await;

    let service = GrammarService::new(Arc::new(languagetool(&server)));

    let reply = service.reply_for(&quoted("I saw teh cat.")).await;
    assert_eq!(reply.text(), "I saw the cat.");

    let reply = service.reply_for(&quoted(reply.text())).await;
    assert_eq!(reply.text(), NO_ISSUES);
}

#[tokio::test]
async fn test_languagetool_rate_limit() {
    ensure_init();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/check"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = languagetool(&server).check("anything").await.unwrap_err();
    assert!(matches!(err, GrammarError::RateLimited));

    let reply = GrammarService::new(Arc::new(languagetool(&server))).reply_for(&quoted("anything")).await;
    assert_eq!(reply.text(), CHECK_FAILED);
}

#[tokio::test]
async fn test_languagetool_malformed_response() {
    ensure_init();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/check"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not valid json"))
        .mount(&server)
        .await;

    let err = languagetool(&server).check("anything").await.unwrap_err();
    assert!(matches!(err, GrammarError::Parse(_)));
}

#[tokio::test]
async fn test_google_translate_request_and_parse() {
    ensure_init();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/translate_a/single"))
        .and(query_param("sl", "en"))
        .and(query_param("tl", "fa"))
        .and(query_param("q", "Good morning."))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            [["صبح بخیر.", "Good morning.", null, null, 10]], null, "en"
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let translated = google(&server).translate("Good morning.").await.unwrap();
    assert_eq!(translated, "صبح بخیر.");
}

#[tokio::test]
async fn test_google_server_error() {
    ensure_init();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/translate_a/single"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = google(&server).translate("Good morning.").await.unwrap_err();
    assert!(matches!(err, TranslateError::Api(_)));
}

#[tokio::test]
async fn test_translation_workflow_failure_is_generic() {
    ensure_init();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/translate_a/single"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>captcha</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let filter = LanguageFilter::new(Arc::new(WhatlangDetector::new()));
    let service = TranslationService::new(Arc::new(google(&server)), filter);
    let reply = service
        .reply_for(&quoted("I would like to know where the nearest train station is located."))
        .await;
    assert_eq!(reply.text(), TRANSLATE_FAILED);
}

#[tokio::test]
async fn test_non_english_never_reaches_translator() {
    ensure_init();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/translate_a/single"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([[["x", "y"]]])))
        .expect(0)
        .mount(&server)
        .await;

    let filter = LanguageFilter::new(Arc::new(WhatlangDetector::new()));
    let service = TranslationService::new(Arc::new(google(&server)), filter);
    let reply = service
        .reply_for(&quoted(
            "Vorrei sapere dove si trova la stazione ferroviaria piu vicina e quando parte il \
             prossimo treno per Roma, perche domani mattina devo essere in ufficio molto presto \
             e non voglio arrivare in ritardo alla riunione con il direttore",
        ))
        .await;
    assert_eq!(reply.text(), NOT_ENGLISH);
}

#[tokio::test]
async fn test_short_english_is_translated_over_http() {
    ensure_init();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/translate_a/single"))
        .and(query_param("q", "Good morning."))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            [["صبح بخیر.", "Good morning.", null, null, 10]], null, "en"
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let filter = LanguageFilter::new(Arc::new(WhatlangDetector::new()));
    let service = TranslationService::new(Arc::new(google(&server)), filter);
    let reply = service.reply_for(&quoted("Good morning.")).await;
    assert_eq!(reply.text(), "صبح بخیر.");
}

#[tokio::test]
async fn test_google_length_limit_is_exclusive() {
    ensure_init();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/translate_a/single"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([[["ok", "a"]]])))
        .expect(1)
        .mount(&server)
        .await;

    let translator = google(&server);
    assert_eq!(translator.translate(&"a".repeat(MAX_CHARS - 1)).await.unwrap(), "ok");

    let err = translator.translate(&"a".repeat(MAX_CHARS)).await.unwrap_err();
    assert!(matches!(err, TranslateError::InvalidLength { .. }));
}
