//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: YAML settings + stored credentials →
//! paged HTTP requests → totals → JSON export

use market_history::auth::{AuthContext, CredentialStore};
use market_history::cli::{offer_logout, resolve_credentials, CredentialSource};
use market_history::config::HistoryConfig;
use market_history::engine::HistoryEngine;
use market_history::output::{top_transactions, write_export};
use market_history::Error;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::io::Cursor;
use std::time::{Duration, Instant};
use tempfile::tempdir;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const HISTORY_PATH: &str = "/market/myhistory/render/";

fn row(indicator: &str, price: &str, name: &str) -> String {
    format!(
        r#"<div class="market_listing_row market_recent_listing_row">
            <div class="market_listing_left_cell market_listing_gainorloss">{indicator}</div>
            <div class="market_listing_their_price">
                <span class="market_table_value"><span class="market_listing_price">{price}</span></span>
            </div>
            <div class="market_listing_item_name_block">
                <span class="market_listing_item_name">{name}</span>
            </div>
        </div>"#
    )
}

fn settings(server: &MockServer, page_size: u32, delay_ms: u64) -> String {
    format!(
        "endpoint: {}{HISTORY_PATH}\npage_size: {page_size}\npage_delay_ms: {delay_ms}\ntimeout_secs: 5\n",
        server.uri()
    )
}

// ============================================================================
// Full Run
// ============================================================================

#[tokio::test]
async fn test_full_run_to_export() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    let config_path = dir.path().join("settings.yaml");
    std::fs::write(&config_path, settings(&server, 2, 50)).unwrap();
    let config = HistoryConfig::from_file(&config_path).unwrap();

    let store = CredentialStore::new(dir.path().join("credentials.json"));
    let saved = AuthContext::builder()
        .session_id("abc")
        .login_secure("xyz")
        .machine_auth("tok")
        .steam_id("76561198000000000")
        .build()
        .unwrap();
    assert!(store.save(&saved));

    let cookie = "sessionid=abc; steamLoginSecure=xyz; steamMachineAuth76561198000000000=tok";
    let pages = [
        (0, format!("{}{}", row("-", "$1.00", "ItemA"), row("+", "$2.50", "ItemB"))),
        (2, format!("{}{}", row("+", "$0.99", "ItemC"), row("", "$7.00", "Listing"))),
        (4, row("-", "$10.005", "ItemD")),
    ];
    for (start, html) in pages {
        Mock::given(method("GET"))
            .and(path(HISTORY_PATH))
            .and(query_param("start", start.to_string()))
            .and(query_param("count", "2"))
            .and(header("cookie", cookie))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"success": true, "total_count": 5, "results_html": html})),
            )
            .expect(1)
            .mount(&server)
            .await;
    }

    let mut input = Cursor::new(Vec::new());
    let mut out = Vec::new();
    let (auth, source) = resolve_credentials(None, &store, &mut input, &mut out).unwrap();
    assert_eq!(source, CredentialSource::Stored);

    let started = Instant::now();
    let result = HistoryEngine::new(&config, auth).unwrap().run().await.unwrap();

    // Two pauses of 50ms between three pages
    assert!(started.elapsed() >= Duration::from_millis(100));

    let top: Vec<_> = top_transactions(&result, 2).iter().map(|r| r.name.clone()).collect();
    assert_eq!(top, vec!["ItemD", "ItemB"]);

    let export_path = dir.path().join("out").join("history.json");
    write_export(&export_path, &result).unwrap();
    let exported: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&export_path).unwrap()).unwrap();

    assert_eq!(
        exported["summary"],
        json!({
            "totalSales": 11.01,
            "totalPurchases": 3.49,
            "grandTotal": 14.5,
            "currency": "$",
            "itemCount": 4
        })
    );
    assert_eq!(
        exported["transactions"][3],
        json!({"name": "ItemD", "price": 10.005, "formattedPrice": "$10.01", "type": "sale"})
    );
}

// ============================================================================
// Rejected Session
// ============================================================================

#[tokio::test]
async fn test_rejected_session_then_logout() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path(HISTORY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
        .expect(1)
        .mount(&server)
        .await;

    let config = HistoryConfig::from_yaml(&settings(&server, 500, 0)).unwrap();
    let store = CredentialStore::new(dir.path().join("credentials.json"));
    let auth = AuthContext::new("stale", "stale").unwrap();
    assert!(store.save(&auth));

    let err = HistoryEngine::new(&config, auth).unwrap().run().await.unwrap_err();
    assert!(matches!(err, Error::AuthenticationFailed { .. }));

    let mut out = Vec::new();
    let deleted = offer_logout(&store, &mut Cursor::new(b"yes\n".to_vec()), &mut out).unwrap();
    assert!(deleted);
    assert!(store.load().is_none());
}

#[tokio::test]
async fn test_server_error_is_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(HISTORY_PATH))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .expect(1)
        .mount(&server)
        .await;

    let config = HistoryConfig::from_yaml(&settings(&server, 500, 0)).unwrap();
    let auth = AuthContext::new("a", "b").unwrap();
    let err = HistoryEngine::new(&config, auth).unwrap().run().await.unwrap_err();

    assert_eq!(err.to_string(), "HTTP 502: Bad Gateway");
}
