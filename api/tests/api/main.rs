mod community;
mod members;

use test_helpers::spawn_app;

#[tokio::test]
async fn health_check() -> anyhow::Result<()> {
    let app = spawn_app().await;

    app.client.health_check().await?;

    Ok(())
}

#[tokio::test]
async fn unknown_user_cannot_log_in() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let result = app
        .client
        .login(&payloads::requests::LoginCredentials {
            username: "mallory".into(),
        })
        .await;
    test_helpers::assert_status_code(result, reqwest::StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn user_profile_follows_the_session() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let result = app.client.user_profile().await;
    test_helpers::assert_status_code(result, reqwest::StatusCode::UNAUTHORIZED);

    app.login_alice().await?;
    let profile = app.client.user_profile().await?;
    assert_eq!(profile.username, "alice");
    assert_eq!(profile.email, "alice@example.org");

    app.client.logout().await?;
    let result = app.client.user_profile().await;
    test_helpers::assert_status_code(result, reqwest::StatusCode::UNAUTHORIZED);
    Ok(())
}
