use serde_json::{json, Value};

mod common;
use common::utils::{spawn_app, TestApp, ESTEGHLAL, FOREST, SAO_PAULO};

async fn leaderboard(test_app: &TestApp, token: &str) -> Vec<Value> {
    let response = test_app.get("/leaderboard", token).await;
    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.expect("Failed to parse response");
    body["data"].as_array().expect("leaderboard array").clone()
}

#[tokio::test]
async fn leaderboard_is_empty_without_predictions() {
    let test_app = spawn_app().await;
    let user = test_app.create_test_user().await;

    assert!(leaderboard(&test_app, &user.token).await.is_empty());
}

#[tokio::test]
async fn leaderboard_awards_exact_and_outcome_points() {
    let test_app = spawn_app().await;
    let admin = test_app.create_admin().await;
    let exact = test_app.create_test_user().await;
    let outcome = test_app.create_test_user().await;
    let wrong = test_app.create_test_user().await;

    // Sao Paulo 2-1, Esteghlal 0-0, Forest has no result yet
    test_app
        .submit_predictions(
            &wrong.token,
            json!({
                SAO_PAULO: { "home": 0, "away": 2 },
                ESTEGHLAL: { "home": 2, "away": 0 },
                FOREST: { "home": 1, "away": 1 }
            }),
        )
        .await;
    test_app
        .submit_predictions(
            &outcome.token,
            json!({
                SAO_PAULO: { "home": 3, "away": 1 },
                ESTEGHLAL: { "home": 1, "away": 1 }
            }),
        )
        .await;
    test_app
        .submit_predictions(
            &exact.token,
            json!({
                SAO_PAULO: { "home": 2, "away": 1 },
                ESTEGHLAL: { "home": 3, "away": 0 }
            }),
        )
        .await;

    assert_eq!(200, test_app.post_result(&admin.token, SAO_PAULO, 2, 1).await.status().as_u16());
    assert_eq!(200, test_app.post_result(&admin.token, ESTEGHLAL, 0, 0).await.status().as_u16());

    let entries = leaderboard(&test_app, &exact.token).await;

    let rows: Vec<(&str, i64)> = entries
        .iter()
        .map(|e| (e["user_id"].as_str().unwrap(), e["points"].as_i64().unwrap()))
        .collect();
    assert_eq!(
        rows,
        vec![
            (exact.user_id.as_str(), 5),
            (outcome.user_id.as_str(), 4),
            (wrong.user_id.as_str(), 0),
        ]
    );
    assert_eq!(entries[0]["email"], exact.email.as_str());
    assert_eq!(entries[0]["rank"], 1);
    assert_eq!(entries[2]["predictions"], 3);
}

#[tokio::test]
async fn equal_points_keep_first_submission_order() {
    let test_app = spawn_app().await;
    let admin = test_app.create_admin().await;
    let early = test_app.create_test_user().await;
    let late = test_app.create_test_user().await;

    test_app
        .submit_predictions(&early.token, json!({ SAO_PAULO: { "home": 1, "away": 0 } }))
        .await;
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    test_app
        .submit_predictions(&late.token, json!({ SAO_PAULO: { "home": 4, "away": 0 } }))
        .await;
    test_app.post_result(&admin.token, SAO_PAULO, 2, 1).await;

    let entries = leaderboard(&test_app, &late.token).await;

    assert_eq!(entries[0]["user_id"], early.user_id.as_str());
    assert_eq!(entries[1]["user_id"], late.user_id.as_str());
    assert_eq!(entries[0]["points"], 2);
    assert_eq!(entries[1]["points"], 2);
    assert_eq!(entries[1]["rank"], 1);
}

#[tokio::test]
async fn resubmission_replaces_earlier_guess() {
    let test_app = spawn_app().await;
    let admin = test_app.create_admin().await;
    let user = test_app.create_test_user().await;

    test_app
        .submit_predictions(&user.token, json!({ SAO_PAULO: { "home": 2, "away": 1 } }))
        .await;
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    test_app
        .submit_predictions(&user.token, json!({ SAO_PAULO: { "home": 2, "away": 1 } }))
        .await;
    test_app.post_result(&admin.token, SAO_PAULO, 2, 1).await;

    let entries = leaderboard(&test_app, &user.token).await;

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["points"], 5);
    assert_eq!(entries[0]["predictions"], 3);
}

#[tokio::test]
async fn only_admins_can_post_results() {
    let test_app = spawn_app().await;
    let user = test_app.create_test_user().await;
    let admin = test_app.create_admin().await;

    let forbidden = test_app.post_result(&user.token, SAO_PAULO, 1, 0).await;
    let unknown = test_app.post_result(&admin.token, "2025-03-09-nobody-nothing", 1, 0).await;
    let negative = test_app.post_result(&admin.token, SAO_PAULO, -1, 0).await;

    assert_eq!(403, forbidden.status().as_u16());
    assert_eq!(404, unknown.status().as_u16());
    assert_eq!(400, negative.status().as_u16());

    let forbidden_body: Value = forbidden.json().await.expect("Error body should be JSON");
    assert_eq!(forbidden_body["success"], false);
    assert_eq!(forbidden_body["message"], "Insufficient privileges");

    let results = test_app.get("/results", &user.token).await;
    let body: Value = results.json().await.expect("Failed to parse response");
    assert!(body["data"].as_array().expect("results array").is_empty());
}

#[tokio::test]
async fn posting_a_result_twice_corrects_it() {
    let test_app = spawn_app().await;
    let admin = test_app.create_admin().await;

    test_app.post_result(&admin.token, FOREST, 1, 1).await;
    test_app.post_result(&admin.token, FOREST, 2, 0).await;

    let response = test_app.get("/results", &admin.token).await;
    let body: Value = response.json().await.expect("Failed to parse response");
    let results = body["data"].as_array().expect("results array");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["fixture_id"], FOREST);
    assert_eq!(results[0]["home_team"], "Nottingham Forest");
    assert_eq!(results[0]["home_goals"], 2);
}
