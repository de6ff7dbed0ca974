use reqwest::StatusCode;

use payloads::{
    CommunityId, MembershipAccess, MembershipId, MembershipStatus,
    RequestAction, RequestType, Role,
    requests::{self, InviteDraft},
};

use test_helpers::{TestApp, assert_status_code, spawn_app};

async fn resolve(
    app: &TestApp,
    community_id: &CommunityId,
    membership_id: &MembershipId,
    action: RequestAction,
    role: Role,
    message: Option<&str>,
) -> Result<(), payloads::ClientError> {
    app.client
        .resolve_request(
            community_id,
            membership_id,
            action,
            &requests::ResolveRequest {
                role,
                message: message.map(str::to_string),
            },
        )
        .await
}

#[tokio::test]
async fn new_community_lists_only_its_creator() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let community_id = app.create_test_community().await?;

    let members = app
        .memberships(&community_id, MembershipStatus::Accepted)
        .await?;
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].display_name(), "alice");
    assert_eq!(members[0].role, Role::Admin);

    // an empty list is still a granted listing
    let pending = app
        .client
        .get_memberships(&community_id, MembershipStatus::Pending, true)
        .await?;
    let MembershipAccess::Granted(list) = pending else {
        panic!("admin should be able to list requests");
    };
    assert!(list.for_status(MembershipStatus::Pending).is_empty());
    Ok(())
}

#[tokio::test]
async fn non_admin_listing_is_denied() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let community_id = app.create_test_community().await?;

    app.login_bob().await?;
    let access = app
        .client
        .get_memberships(&community_id, MembershipStatus::Accepted, false)
        .await?;
    assert_eq!(access, MembershipAccess::Denied(StatusCode::NOT_FOUND));

    app.client.logout().await?;
    let access = app
        .client
        .get_memberships(&community_id, MembershipStatus::Accepted, false)
        .await?;
    assert_eq!(access, MembershipAccess::Denied(StatusCode::UNAUTHORIZED));
    Ok(())
}

#[tokio::test]
async fn unknown_community_is_denied() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.login_alice().await?;

    let access = app
        .client
        .get_memberships(
            &CommunityId::from("nowhere"),
            MembershipStatus::Accepted,
            false,
        )
        .await?;
    assert_eq!(access, MembershipAccess::Denied(StatusCode::NOT_FOUND));
    Ok(())
}

#[tokio::test]
async fn join_and_accept() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let community_id = app.create_test_community().await?;

    app.login_bob().await?;
    app.client
        .request_membership(
            &community_id,
            &requests::CreateMembershipRequest::join(),
        )
        .await?;
    // asking twice is rejected while the first request is pending
    let result = app
        .client
        .request_membership(
            &community_id,
            &requests::CreateMembershipRequest::join(),
        )
        .await;
    assert_status_code(result, StatusCode::BAD_REQUEST);

    app.login_alice().await?;
    let bob = app
        .find_membership(&community_id, MembershipStatus::Pending, "bob")
        .await?;
    let request = bob.request.as_ref().expect("requests are included");
    assert_eq!(request.request_type, RequestType::Request);

    resolve(
        &app,
        &community_id,
        &bob.id,
        RequestAction::Accept,
        Role::Curator,
        Some("Welcome"),
    )
    .await?;

    let bob = app
        .find_membership(&community_id, MembershipStatus::Accepted, "bob")
        .await?;
    assert_eq!(bob.role, Role::Curator);
    assert_eq!(bob.comments()[0].message, "Welcome");
    assert!(
        app.memberships(&community_id, MembershipStatus::Pending)
            .await?
            .is_empty()
    );

    // resolving again fails
    let result = resolve(
        &app,
        &community_id,
        &bob.id,
        RequestAction::Reject,
        Role::Member,
        None,
    )
    .await;
    assert_status_code(result, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn rejected_request_keeps_its_comment() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let community_id = app.create_community_with_requests().await?;

    let rejected = app
        .memberships(&community_id, MembershipStatus::Rejected)
        .await?;
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0].display_name(), "carol");
    assert_eq!(rejected[0].comments()[0].message, "Not a research group");

    let pending = app
        .memberships(&community_id, MembershipStatus::Pending)
        .await?;
    let mut names: Vec<_> = pending.iter().map(|m| m.display_name()).collect();
    names.sort();
    assert_eq!(names, ["bob", "dave"]);
    Ok(())
}

#[tokio::test]
async fn members_tab_omits_requests() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let community_id = app.create_community_with_requests().await?;

    let access = app
        .client
        .get_memberships(&community_id, MembershipStatus::Pending, false)
        .await?;
    let MembershipAccess::Granted(list) = access else {
        panic!("alice administers the community");
    };
    assert!(
        list.for_status(MembershipStatus::Pending)
            .iter()
            .all(|m| m.request.is_none())
    );
    Ok(())
}

#[tokio::test]
async fn only_admins_resolve_join_requests() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let community_id = app.create_community_with_requests().await?;
    let bob = app
        .membership_id(&community_id, MembershipStatus::Pending, "bob")
        .await?;

    app.login_carol().await?;
    let result = resolve(
        &app,
        &community_id,
        &bob,
        RequestAction::Accept,
        Role::Admin,
        None,
    )
    .await;
    assert_status_code(result, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn invitee_accepts_with_offered_role() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let community_id = app.create_community_with_requests().await?;
    let dave = app
        .find_membership(
            &community_id,
            MembershipStatus::Pending,
            "dave@example.org",
        )
        .await?;
    let request = dave.request.as_ref().expect("requests are included");
    assert_eq!(request.request_type, RequestType::Invitation);

    // the administrator cannot answer on dave's behalf
    let result = resolve(
        &app,
        &community_id,
        &dave.id,
        RequestAction::Accept,
        Role::Admin,
        None,
    )
    .await;
    assert_status_code(result, StatusCode::NOT_FOUND);

    app.login_dave().await?;
    resolve(
        &app,
        &community_id,
        &dave.id,
        RequestAction::Accept,
        Role::Admin,
        None,
    )
    .await?;

    app.login_alice().await?;
    let dave = app
        .find_membership(&community_id, MembershipStatus::Accepted, "dave")
        .await?;
    assert_eq!(dave.role, Role::Curator);
    Ok(())
}

#[tokio::test]
async fn invitation_requires_email() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let community_id = app.create_test_community().await?;

    let error = app
        .client
        .request_membership(
            &community_id,
            &requests::CreateMembershipRequest {
                request_type: RequestType::Invitation,
                email: None,
                role: Some(Role::Member),
            },
        )
        .await
        .expect_err("email is required");
    let body = error.error_body().expect("structured error body");
    assert_eq!(body.errors[0].field, "email");
    Ok(())
}

#[tokio::test]
async fn change_role() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let community_id = app.create_community_with_requests().await?;
    let bob = app
        .membership_id(&community_id, MembershipStatus::Pending, "bob")
        .await?;
    resolve(
        &app,
        &community_id,
        &bob,
        RequestAction::Accept,
        Role::Member,
        None,
    )
    .await?;

    app.client
        .change_membership_role(
            &community_id,
            &bob,
            &requests::ChangeRole { role: Role::Admin },
        )
        .await?;

    let bob = app
        .find_membership(&community_id, MembershipStatus::Accepted, "bob")
        .await?;
    assert_eq!(bob.role, Role::Admin);

    // with bob as a second admin alice can step down
    let alice = app
        .membership_id(&community_id, MembershipStatus::Accepted, "alice")
        .await?;
    app.client
        .change_membership_role(
            &community_id,
            &alice,
            &requests::ChangeRole {
                role: Role::Member,
            },
        )
        .await?;
    Ok(())
}

#[tokio::test]
async fn last_admin_is_protected() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let community_id = app.create_test_community().await?;
    let alice = app
        .membership_id(&community_id, MembershipStatus::Accepted, "alice")
        .await?;

    let result = app
        .client
        .change_membership_role(
            &community_id,
            &alice,
            &requests::ChangeRole {
                role: Role::Curator,
            },
        )
        .await;
    assert_status_code(result, StatusCode::BAD_REQUEST);

    let result = app.client.remove_membership(&community_id, &alice).await;
    assert_status_code(result, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn remove_member() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let community_id = app.create_community_with_requests().await?;
    let bob = app
        .membership_id(&community_id, MembershipStatus::Pending, "bob")
        .await?;

    app.client.remove_membership(&community_id, &bob).await?;

    let pending = app
        .memberships(&community_id, MembershipStatus::Pending)
        .await?;
    assert!(pending.iter().all(|m| m.id != bob));

    let result = app.client.remove_membership(&community_id, &bob).await;
    assert_status_code(result, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn members_can_leave() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let community_id = app.create_community_with_requests().await?;
    let bob = app
        .membership_id(&community_id, MembershipStatus::Pending, "bob")
        .await?;

    app.login_bob().await?;
    app.client.remove_membership(&community_id, &bob).await?;

    // and carol cannot remove alice
    app.login_alice().await?;
    let alice = app
        .membership_id(&community_id, MembershipStatus::Accepted, "alice")
        .await?;
    app.login_carol().await?;
    let result = app.client.remove_membership(&community_id, &alice).await;
    assert_status_code(result, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn requests_need_a_login() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let community_id = app.create_test_community().await?;
    app.client.logout().await?;

    let result = app
        .client
        .request_membership(
            &community_id,
            &requests::CreateMembershipRequest::join(),
        )
        .await;
    assert_status_code(result, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn invitee_finds_and_declines_invitation() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let community_id = app.create_community_with_requests().await?;

    app.login_dave().await?;
    let received = app.client.get_received_invitations().await?;
    assert_eq!(received.len(), 1);
    let invitation = &received[0];
    assert_eq!(invitation.community_id, community_id);
    assert_eq!(invitation.community_title, "BLR");
    assert_eq!(invitation.role, Role::Curator);
    assert_eq!(
        &app.client.get_invitation(&invitation.membership_id).await?,
        invitation
    );

    // asking to join while invited points at the invitation instead
    let error = app
        .client
        .request_membership(
            &community_id,
            &requests::CreateMembershipRequest::join(),
        )
        .await
        .expect_err("already invited");
    assert_eq!(
        error.display_message(),
        "Bad request: You have a pending invitation to this community"
    );

    resolve(
        &app,
        &community_id,
        &invitation.membership_id,
        RequestAction::Reject,
        Role::Curator,
        None,
    )
    .await?;
    assert!(app.client.get_received_invitations().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn invitations_are_private_to_the_invitee() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let community_id = app.create_community_with_requests().await?;
    let dave = app
        .membership_id(
            &community_id,
            MembershipStatus::Pending,
            "dave@example.org",
        )
        .await?;

    // alice sent it but is not the invitee
    let result = app.client.get_invitation(&dave).await;
    assert_status_code(result, StatusCode::NOT_FOUND);
    assert!(app.client.get_received_invitations().await?.is_empty());

    app.client.logout().await?;
    let result = app.client.get_received_invitations().await;
    assert_status_code(result, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn invite_from_draft() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let community_id = app.create_test_community().await?;

    let draft = InviteDraft {
        email: "bob@example.org".into(),
        role: "member".into(),
    };
    let request = draft.to_request().expect("draft is valid");
    app.client.request_membership(&community_id, &request).await?;

    let bob = app
        .find_membership(&community_id, MembershipStatus::Pending, "bob")
        .await?;
    assert_eq!(bob.role, Role::Member);

    // a second invitation to the same person is refused
    let result = app.client.request_membership(&community_id, &request).await;
    assert_status_code(result, StatusCode::BAD_REQUEST);

    let mut bad = request.clone();
    bad.email = Some("bob".into());
    let error = app
        .client
        .request_membership(&community_id, &bad)
        .await
        .expect_err("not an email");
    let body = error.error_body().expect("structured error body");
    assert_eq!(body.errors[0].field, "email");
    assert_eq!(body.errors[0].message, "Must be a valid email address");
    Ok(())
}
