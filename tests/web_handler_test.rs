#![cfg(feature = "web")]
//! Web handler integration tests.
//!
//! Tests cover:
//! - Company listing with search and sector filters
//! - Dashboard views, including the empty-selection sentinel
//! - Legacy financial-info and stock price endpoints
//! - JSON error bodies

mod common;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use stockboard::adapters::web::{AppState, build_router};
use stockboard::domain::directory::CompanyDirectory;
use stockboard::domain::selection::Selection;
use tower::ServiceExt;

use common::*;

fn create_test_app() -> Router {
    let market_data = MockMarketData::new()
        .with_prices(
            "AAPL",
            &[("2024-01-01", 1.0), ("2024-01-02", 2.0), ("2024-01-03", 3.0)],
        )
        .with_eps("AAPL", &[("2023-12-31", Some(6.4))])
        .with_eps("MSFT", &[("2022-12-31", Some(9.1))])
        .with_error("FAIL", "connection refused");

    let state = AppState::new(CompanyDirectory::builtin(), Arc::new(fixture_provider()))
        .with_market_data(Arc::new(market_data))
        .with_default_selection(Selection::from_ids(["samsung", "kia"]));

    build_router(state)
}

async fn get(uri: &str) -> (StatusCode, Value) {
    let response = create_test_app()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

mod company_tests {
    use super::*;

    #[tokio::test]
    async fn lists_all_companies() {
        let (status, json) = get("/api/companies").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().unwrap().len(), CompanyDirectory::builtin().len());
    }

    #[tokio::test]
    async fn filters_by_ticker_and_sector() {
        let (_, json) = get("/api/companies?search=005930").await;
        assert_eq!(json[0]["id"], "samsung");

        let (_, json) = get("/api/companies?sector=semiconductor").await;
        let ids: Vec<&str> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, ["samsung", "sk_hynix"]);
    }

    #[tokio::test]
    async fn unknown_sector_is_bad_request() {
        let (status, json) = get("/api/companies?sector=shipping").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("shipping"));
    }
}

mod dashboard_tests {
    use super::*;

    #[tokio::test]
    async fn default_selection_when_ids_absent() {
        let (status, json) = get("/api/dashboard/target").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ready");
        assert_eq!(json["data"]["blocks"][0]["company_id"], "samsung");
        assert_eq!(json["data"]["blocks"][1]["company_id"], "kia");
    }

    #[tokio::test]
    async fn blank_ids_is_empty_sentinel() {
        for view in ["daily", "target", "metrics", "news", "all"] {
            let (status, json) = get(&format!("/api/dashboard/{view}?ids=")).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(json, serde_json::json!({ "status": "empty" }), "view {view}");
        }
    }

    #[tokio::test]
    async fn metrics_follow_requested_order() {
        let (_, json) = get("/api/dashboard/metrics?ids=kia,samsung").await;
        let eps = &json["data"]["groups"][0];
        assert_eq!(eps["key"], "Eps");
        assert_eq!(eps["bars"][0]["company_id"], "kia");
        assert_eq!(eps["bars"][0]["color_index"], 0);
        assert_eq!(eps["bars"][1]["company_id"], "samsung");
    }

    #[tokio::test]
    async fn news_sort_parameter() {
        let (_, json) = get("/api/dashboard/news?ids=samsung,kia&news_sort=elapsed").await;
        assert_eq!(json["data"]["sort"], "elapsed");
        assert_eq!(json["data"]["items"][0]["relative_time_label"], "2시간 전");
        assert_eq!(json["data"]["items"][0]["company_name"], "기아");
    }

    #[tokio::test]
    async fn duplicate_ids_are_rejected() {
        let (status, json) = get("/api/dashboard/daily?ids=kia,kia").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("kia"));
    }

    #[tokio::test]
    async fn unknown_view_is_not_found() {
        let (status, _) = get("/api/dashboard/chart").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

mod market_data_tests {
    use super::*;

    #[tokio::test]
    async fn financial_info_by_symbol() {
        let (status, json) = get("/api/financial-info/AAPL").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json[0]["Date"], "2023-12-31");
        assert_eq!(json[0]["EPS"], 6.4);
    }

    #[tokio::test]
    async fn financial_info_unknown_symbol_is_empty_list() {
        let (status, json) = get("/api/financial-info/ZZZ").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, serde_json::json!([]));
    }

    #[tokio::test]
    async fn financial_info_source_failure_is_bad_gateway() {
        let (status, json) = get("/api/financial-info/FAIL").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn merged_eps_history() {
        let (status, json) = get("/api/financial-info?symbols=AAPL,MSFT").await;
        assert_eq!(status, StatusCode::OK);
        let data = &json["data"];
        assert_eq!(data["x_axis_keys"], serde_json::json!(["2022-12-31", "2023-12-31"]));
        assert_eq!(data["columns"][0]["label"], "AAPL EPS");
        assert_eq!(data["columns"][0]["values"], serde_json::json!([null, 6.4]));
        assert_eq!(data["columns"][1]["values"], serde_json::json!([9.1, null]));
    }

    #[tokio::test]
    async fn merged_eps_history_all_failed_is_empty() {
        let (status, json) = get("/api/financial-info?symbols=FAIL,ZZZ").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, serde_json::json!({"status": "empty"}));
    }

    #[tokio::test]
    async fn stock_prices_with_range() {
        let (status, json) =
            get("/stocks/AAPL?start_date=2024-01-02&end_date=2024-01-02").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().unwrap().len(), 1);
        assert_eq!(json[0]["Close"], 2.0);
    }

    #[tokio::test]
    async fn stock_prices_unreadable_bound_is_ignored() {
        let (_, json) = get("/stocks/AAPL?start_date=yesterday").await;
        assert_eq!(json.as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn stock_prices_no_data_is_not_found() {
        let (status, json) = get("/stocks/ZZZ").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "no data for ZZZ");
    }
}

#[tokio::test]
async fn unknown_route_is_json_not_found() {
    let (status, json) = get("/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Page not found");
}
