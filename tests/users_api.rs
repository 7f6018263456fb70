use axum::http::{Method, StatusCode};
use serde_json::json;

mod helpers;

#[tokio::test]
async fn test_register_login_me() -> anyhow::Result<()> {
    let app = helpers::setup().await?;

    let res = app
        .post(
            "/api/users/",
            None,
            json!({
                "email": "john@foodgram.test",
                "username": "john",
                "first_name": "John",
                "last_name": "Doe",
                "password": "my_password",
            }),
        )
        .await?;
    assert_eq!(res.status, StatusCode::CREATED);
    let body = res.json();
    assert_eq!(body["username"], "john");
    assert!(body.get("password").is_none());
    assert!(body.get("is_subscribed").is_none());

    let res = app
        .post(
            "/api/auth/token/login/",
            None,
            json!({"email": "john@foodgram.test", "password": "wrong_password"}),
        )
        .await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let res = app
        .post(
            "/api/auth/token/login/",
            None,
            json!({"email": "JOHN@foodgram.test", "password": "my_password"}),
        )
        .await?;
    assert_eq!(res.status, StatusCode::OK);
    let token = res.json()["auth_token"]
        .as_str()
        .unwrap_or_default()
        .to_owned();

    let res = app.get("/api/users/me/", Some(&token)).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()["email"], "john@foodgram.test");
    assert_eq!(res.json()["avatar"], serde_json::Value::Null);

    let res = app.get("/api/users/me/", None).await?;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    let res = app
        .post("/api/auth/token/logout/", Some(&token), json!({}))
        .await?;
    assert_eq!(res.status, StatusCode::NO_CONTENT);

    let res = app.get("/api/users/me/", Some(&token)).await?;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    let res = app
        .post("/api/auth/token/logout/", Some(&token), json!({}))
        .await?;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn test_register_rejects_duplicates() -> anyhow::Result<()> {
    let app = helpers::setup().await?;
    app.user("john").await?;

    let res = app
        .post(
            "/api/users/",
            None,
            json!({
                "email": "john@foodgram.test",
                "username": "other",
                "first_name": "John",
                "last_name": "Doe",
                "password": "my_password",
            }),
        )
        .await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let res = app
        .post(
            "/api/users/",
            None,
            json!({
                "email": "invalid",
                "username": "bad name!",
                "first_name": "John",
                "last_name": "Doe",
                "password": "my_password",
            }),
        )
        .await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    let body = res.json();
    assert!(body["email"].is_array());
    assert!(body["username"].is_array());

    Ok(())
}

#[tokio::test]
async fn test_invalid_token_is_unauthorized() -> anyhow::Result<()> {
    let app = helpers::setup().await?;

    let res = app.get("/api/recipes/", Some("not-a-token")).await?;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    let res = app.get("/api/recipes/", None).await?;
    assert_eq!(res.status, StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn test_set_password() -> anyhow::Result<()> {
    let app = helpers::setup().await?;
    let (_, token) = app.user("john").await?;

    let res = app
        .post(
            "/api/users/set_password/",
            Some(&token),
            json!({"new_password": "new_password", "current_password": "nope_nope"}),
        )
        .await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let res = app
        .post(
            "/api/users/set_password/",
            Some(&token),
            json!({"new_password": "new_password", "current_password": "my_password"}),
        )
        .await?;
    assert_eq!(res.status, StatusCode::NO_CONTENT);

    let res = app.get("/api/users/me/", Some(&token)).await?;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    let res = app
        .post(
            "/api/auth/token/login/",
            None,
            json!({"email": "john@foodgram.test", "password": "new_password"}),
        )
        .await?;
    assert_eq!(res.status, StatusCode::OK);
    let token = res.json()["auth_token"]
        .as_str()
        .unwrap_or_default()
        .to_owned();

    let res = app.get("/api/users/me/", Some(&token)).await?;
    assert_eq!(res.status, StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn test_avatar() -> anyhow::Result<()> {
    let app = helpers::setup().await?;
    let (_, token) = app.user("john").await?;

    let res = app
        .request(
            Method::PUT,
            "/api/users/me/avatar/",
            Some(&token),
            Some(json!({})),
        )
        .await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let res = app
        .request(
            Method::PUT,
            "/api/users/me/avatar/",
            Some(&token),
            Some(json!({"avatar": helpers::PNG})),
        )
        .await?;
    assert_eq!(res.status, StatusCode::OK);
    assert!(
        res.json()["avatar"]
            .as_str()
            .unwrap_or_default()
            .starts_with("http://testserver/media/users/")
    );

    let res = app.get("/api/users/me/", Some(&token)).await?;
    assert!(res.json()["avatar"].is_string());

    let res = app.delete("/api/users/me/avatar/", Some(&token)).await?;
    assert_eq!(res.status, StatusCode::NO_CONTENT);

    let res = app.get("/api/users/me/", Some(&token)).await?;
    assert_eq!(res.json()["avatar"], serde_json::Value::Null);

    Ok(())
}

#[tokio::test]
async fn test_subscriptions() -> anyhow::Result<()> {
    let app = helpers::setup().await?;
    let (john_id, john) = app.user("john").await?;
    let (jane_id, jane) = app.user("jane").await?;
    for _ in 0..3 {
        app.recipe(&jane, &[(1, 10)]).await?;
    }

    let res = app
        .post(&format!("/api/users/{john_id}/subscribe/"), Some(&john), json!({}))
        .await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let uri = format!("/api/users/{jane_id}/subscribe/?recipes_limit=2");
    let res = app.post(&uri, Some(&john), json!({})).await?;
    assert_eq!(res.status, StatusCode::CREATED);
    let body = res.json();
    assert_eq!(body["id"], jane_id);
    assert_eq!(body["is_subscribed"], true);
    assert_eq!(body["recipes_count"], 3);
    assert_eq!(body["recipes"].as_array().map(Vec::len), Some(2));

    let res = app.post(&uri, Some(&john), json!({})).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let res = app
        .get(&format!("/api/users/{jane_id}/"), Some(&john))
        .await?;
    assert_eq!(res.json()["is_subscribed"], true);

    let res = app.get("/api/users/subscriptions/", Some(&john)).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()["count"], 1);
    assert_eq!(res.json()["results"][0]["username"], "jane");

    let res = app
        .delete(&format!("/api/users/{jane_id}/subscribe/"), Some(&john))
        .await?;
    assert_eq!(res.status, StatusCode::NO_CONTENT);

    let res = app
        .delete(&format!("/api/users/{jane_id}/subscribe/"), Some(&john))
        .await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let res = app
        .post("/api/users/999/subscribe/", Some(&john), json!({}))
        .await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_user_list_is_public() -> anyhow::Result<()> {
    let app = helpers::setup().await?;
    app.user("john").await?;
    app.user("jane").await?;

    let res = app.get("/api/users/?limit=1", None).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()["count"], 2);
    assert_eq!(res.json()["results"][0]["username"], "john");
    assert_eq!(res.json()["results"][0]["is_subscribed"], false);

    let res = app.get("/api/users/abc/", None).await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_health() -> anyhow::Result<()> {
    let app = helpers::setup().await?;

    let res = app.get("/health", None).await?;
    assert_eq!(res.status, StatusCode::OK);

    let res = app.get("/ready", None).await?;
    assert_eq!(res.status, StatusCode::OK);

    Ok(())
}
