//! Development dataset served by the dev-server.
//!
//! Gives the ui something to show on every tab of the members page:
//! - `biosyslit`, administered by alice, with an accepted curator (bob),
//!   a pending join request (carol), a rejected one (dave) and a curator
//!   invitation for dave
//! - `zenodo-events`, administered by bob, which has invited alice

use crate::TestApp;
use anyhow::Result;
use payloads::{
    CommunityId, CommunityType, MembershipStatus, RequestAction, Role,
    Visibility, requests,
};

pub struct DevDataset {
    pub admin_community_id: CommunityId,
    pub other_community_id: CommunityId,
}

impl DevDataset {
    pub async fn create(app: &TestApp) -> Result<Self> {
        tracing::info!("Creating biosyslit, administered by alice");
        let admin_community_id = app.create_test_community().await?;

        for username in ["bob", "carol", "dave"] {
            app.login_as(username).await?;
            app.client
                .request_membership(
                    &admin_community_id,
                    &requests::CreateMembershipRequest::join(),
                )
                .await?;
        }

        app.login_alice().await?;
        let resolutions = [
            ("bob", RequestAction::Accept, Role::Curator, "Welcome aboard"),
            ("dave", RequestAction::Reject, Role::Member, "Spam account"),
        ];
        for (username, action, role, message) in resolutions {
            let membership_id = app
                .membership_id(
                    &admin_community_id,
                    MembershipStatus::Pending,
                    username,
                )
                .await?;
            app.client
                .resolve_request(
                    &admin_community_id,
                    &membership_id,
                    action,
                    &requests::ResolveRequest {
                        role,
                        message: Some(message.to_string()),
                    },
                )
                .await?;
        }

        app.client
            .request_membership(
                &admin_community_id,
                &requests::CreateMembershipRequest::invite(
                    "dave@example.org".into(),
                    Role::Curator,
                ),
            )
            .await?;

        tracing::info!("Creating zenodo-events, administered by bob");
        app.login_bob().await?;
        let other = app
            .client
            .create_community(&requests::CreateCommunity {
                id: "zenodo-events".into(),
                title: "Zenodo events".into(),
                description: "Workshops and conferences".into(),
                community_type: CommunityType::Event,
                website: Some("https://zenodo.org".into()),
                visibility: Visibility::Public,
            })
            .await?;
        app.client
            .request_membership(
                &other.id,
                &requests::CreateMembershipRequest::invite(
                    "alice@example.org".into(),
                    Role::Member,
                ),
            )
            .await?;

        // the browser logs in on its own; leave the client as alice
        app.login_alice().await?;

        Ok(Self {
            admin_community_id,
            other_community_id: other.id,
        })
    }

    pub fn print_summary(&self) {
        tracing::info!("Development data:");
        tracing::info!(
            "   /communities/{}/members  (log in as alice to manage)",
            self.admin_community_id
        );
        tracing::info!(
            "   /communities/{}/members  (alice is not an administrator)",
            self.other_community_id
        );
        tracing::info!("   /invitations  (alice and dave have one each)");
        tracing::info!("   users: alice, bob, carol, dave");
    }
}
