use subscription_service::routes::TotalCostResponse;

use crate::helpers::{netflix_subscription, TestApp};

#[tokio::test]
async fn total_cost_sums_the_prices_of_matching_subscriptions() {
    let test_app = TestApp::spawn_app().await;
    let mut february = netflix_subscription();
    february["start_date"] = serde_json::json!("2024-02-01");

    test_app.create_subscription(netflix_subscription()).await;
    test_app.create_subscription(february).await;

    let response = test_app
        .get_total_cost(&[("user_id", "u1"), ("service_name", "Netflix")])
        .await;

    assert_eq!(200, response.status().as_u16());

    let total: TotalCostResponse = response.json().await.unwrap();

    assert_eq!(total.total_cost, 30);
}

#[tokio::test]
async fn total_cost_only_counts_exact_matches() {
    let test_app = TestApp::spawn_app().await;
    let test_cases = vec![
        serde_json::json!({"service_name": "Netflix", "price": 15, "user_id": "u1", "start_date": "2024-01-01"}),
        serde_json::json!({"service_name": "netflix", "price": 100, "user_id": "u1", "start_date": "2024-01-01"}),
        serde_json::json!({"service_name": "Netflix", "price": 200, "user_id": "u2", "start_date": "2024-01-01"}),
        serde_json::json!({"service_name": "Spotify", "price": 400, "user_id": "u1", "start_date": "2024-01-01"}),
    ];

    for body in test_cases {
        test_app.create_subscription(body).await;
    }

    let total: TotalCostResponse = test_app
        .get_total_cost(&[("user_id", "u1"), ("service_name", "Netflix")])
        .await
        .json()
        .await
        .unwrap();

    assert_eq!(total.total_cost, 15);
}

#[tokio::test]
async fn total_cost_ignores_the_subscription_period() {
    let test_app = TestApp::spawn_app().await;
    let mut ended = netflix_subscription();
    ended["end_date"] = serde_json::json!("2024-01-31");

    test_app.create_subscription(netflix_subscription()).await;
    test_app.create_subscription(ended).await;

    let total: TotalCostResponse = test_app
        .get_total_cost(&[("user_id", "u1"), ("service_name", "Netflix")])
        .await
        .json()
        .await
        .unwrap();

    assert_eq!(total.total_cost, 30);
}

#[tokio::test]
async fn total_cost_is_zero_without_matches() {
    let test_app = TestApp::spawn_app().await;

    test_app.create_subscription(netflix_subscription()).await;

    let test_cases = vec![
        vec![("user_id", "u9"), ("service_name", "Netflix")],
        vec![("user_id", "u1"), ("service_name", "Hulu")],
        vec![],
    ];

    for query in test_cases {
        let response = test_app.get_total_cost(&query).await;

        assert_eq!(200, response.status().as_u16());

        let body: serde_json::Value = response.json().await.unwrap();

        assert_eq!(body, serde_json::json!({"total_cost": 0}), "query: {:?}", query);
    }
}

#[tokio::test]
async fn total_route_takes_precedence_over_the_id_route() {
    let test_app = TestApp::spawn_app().await;

    let response = test_app.get_subscription("total").await;

    assert_eq!(200, response.status().as_u16());

    let body: serde_json::Value = response.json().await.unwrap();

    assert!(body.get("total_cost").is_some());
}

#[tokio::test]
async fn total_cost_returns_400_with_a_message_when_query_is_malformed() {
    let test_app = TestApp::spawn_app().await;

    let response = test_app
        .get_total_cost(&[("user_id", "u1"), ("user_id", "u2"), ("service_name", "Netflix")])
        .await;

    assert_eq!(400, response.status().as_u16());
    assert_eq!(
        response
            .headers()
            .get("Content-Type")
            .and_then(|value| value.to_str().ok()),
        Some("application/json")
    );

    let body: serde_json::Value = response.json().await.unwrap();

    assert!(body["message"].as_str().unwrap().contains("user_id"));
}
