use reqwest::StatusCode;

use payloads::{
    CommunityId, MembershipAccess, MembershipStatus, Visibility,
    requests::{CommunityDraft, DraftError, DraftField},
};

use test_helpers::{assert_status_code, biosyslit, spawn_app};

#[tokio::test]
async fn create_community() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let community_id = app.create_test_community().await?;
    assert_eq!(community_id.0, "biosyslit");
    Ok(())
}

#[tokio::test]
async fn create_from_draft_without_website() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_alice().await?;

    let draft = CommunityDraft {
        id: "biosyslit".into(),
        title: "BLR".into(),
        description: "d".into(),
        community_type: "event".into(),
        website: String::new(),
        visibility: "public".into(),
    };
    let request = draft.to_request().expect("draft is valid");
    let community = app.client.create_community(&request).await?;

    assert_eq!(community.website, None);
    assert_eq!(community.visibility, Visibility::Public);
    Ok(())
}

#[tokio::test]
async fn create_requires_login() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let result = app.client.create_community(&biosyslit()).await;

    assert_status_code(result, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn duplicate_id_is_a_field_error() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.create_test_community().await?;

    let error = app
        .client
        .create_community(&biosyslit())
        .await
        .expect_err("id is taken");

    let body = error.error_body().expect("structured error body");
    assert_eq!(body.errors.len(), 1);
    assert_eq!(body.errors[0].field, "id");
    assert!(body.message.is_none());
    Ok(())
}

#[tokio::test]
async fn server_checks_lengths_too() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_alice().await?;

    let mut details = biosyslit();
    details.title = "T".repeat(121);
    details.website = Some("not a url".into());
    let error = app
        .client
        .create_community(&details)
        .await
        .expect_err("title too long");

    let mut fields: Vec<_> = error
        .error_body()
        .expect("structured error body")
        .errors
        .into_iter()
        .map(|e| (e.field, e.message))
        .collect();
    fields.sort();
    assert_eq!(
        fields,
        [
            ("title".to_string(), "Must be 120 characters or less".to_string()),
            ("website".to_string(), "Must be a valid URL".to_string()),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn ids_must_be_path_safe() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_alice().await?;

    for id in ["a/b", "x?y", "h#1"] {
        let mut draft = CommunityDraft::from(&biosyslit());
        draft.id = id.into();
        assert_eq!(
            draft.validate().get(&DraftField::Id),
            Some(&DraftError::InvalidIdentifier),
            "{id}"
        );

        let mut details = biosyslit();
        details.id = CommunityId::from(id);
        let error = app
            .client
            .create_community(&details)
            .await
            .expect_err("id has url characters");
        let body = error.error_body().expect("structured error body");
        assert_eq!(body.errors.len(), 1, "{id}");
        assert_eq!(body.errors[0].field, "id");
        assert_eq!(
            body.errors[0].message,
            "Only letters, numbers, hyphens and underscores are allowed"
        );
    }

    // whatever the form accepts, its creator can manage
    let mut details = biosyslit();
    details.id = CommunityId::from("BLR_2024-events");
    let community = app.client.create_community(&details).await?;
    let access = app
        .client
        .get_memberships(&community.id, MembershipStatus::Accepted, false)
        .await?;
    assert!(matches!(access, MembershipAccess::Granted(_)));
    Ok(())
}
