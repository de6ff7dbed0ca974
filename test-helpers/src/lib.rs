pub mod mock;

use api::{Config, store::Store, telemetry};
use payloads::{
    CommunityId, CommunityType, MembershipAccess, MembershipId,
    MembershipStatus, RequestAction, Role, Visibility, requests, responses,
};
use reqwest::StatusCode;

pub struct TestApp {
    #[allow(unused)]
    pub port: u16,
    pub client: payloads::APIClient,
}

/// Functions to populate test data
///
/// Using anyhow::Result lets us get a backtrace from when the error was fist
/// converted to anyhow::Result. Run with RUST_BACKTRACE=1 to view.
impl TestApp {
    pub async fn login_as(&self, username: &str) -> anyhow::Result<()> {
        self.client.logout().await?;
        self.client
            .login(&requests::LoginCredentials {
                username: username.to_string(),
            })
            .await?;
        Ok(())
    }

    pub async fn login_alice(&self) -> anyhow::Result<()> {
        self.login_as("alice").await
    }

    pub async fn login_bob(&self) -> anyhow::Result<()> {
        self.login_as("bob").await
    }

    pub async fn login_carol(&self) -> anyhow::Result<()> {
        self.login_as("carol").await
    }

    pub async fn login_dave(&self) -> anyhow::Result<()> {
        self.login_as("dave").await
    }

    /// Alice creates the `biosyslit` community and stays logged in.
    pub async fn create_test_community(&self) -> anyhow::Result<CommunityId> {
        self.login_alice().await?;
        let community = self.client.create_community(&biosyslit()).await?;
        Ok(community.id)
    }

    /// Alice's community where bob has asked to join, carol's request was
    /// rejected with a comment and dave has been invited as a curator.
    ///
    /// Ends logged in as alice.
    pub async fn create_community_with_requests(
        &self,
    ) -> anyhow::Result<CommunityId> {
        let community_id = self.create_test_community().await?;

        self.login_bob().await?;
        self.client
            .request_membership(
                &community_id,
                &requests::CreateMembershipRequest::join(),
            )
            .await?;

        self.login_carol().await?;
        self.client
            .request_membership(
                &community_id,
                &requests::CreateMembershipRequest::join(),
            )
            .await?;

        self.login_alice().await?;
        let carol = self
            .find_membership(&community_id, MembershipStatus::Pending, "carol")
            .await?;
        self.client
            .resolve_request(
                &community_id,
                &carol.id,
                RequestAction::Reject,
                &requests::ResolveRequest {
                    role: Role::Member,
                    message: Some("Not a research group".into()),
                },
            )
            .await?;

        self.client
            .request_membership(
                &community_id,
                &requests::CreateMembershipRequest::invite(
                    "dave@example.org".into(),
                    Role::Curator,
                ),
            )
            .await?;

        Ok(community_id)
    }

    /// List memberships with the given status, failing if access is denied.
    pub async fn memberships(
        &self,
        community_id: &CommunityId,
        status: MembershipStatus,
    ) -> anyhow::Result<Vec<responses::Membership>> {
        match self
            .client
            .get_memberships(community_id, status, true)
            .await?
        {
            MembershipAccess::Granted(list) => {
                Ok(list.for_status(status).to_vec())
            }
            MembershipAccess::Denied(status) => {
                anyhow::bail!("membership listing denied with {status}")
            }
        }
    }

    /// Find a membership by username or email, as seen by the logged in
    /// administrator.
    pub async fn find_membership(
        &self,
        community_id: &CommunityId,
        status: MembershipStatus,
        name: &str,
    ) -> anyhow::Result<responses::Membership> {
        self.memberships(community_id, status)
            .await?
            .into_iter()
            .find(|m| {
                m.username.as_deref() == Some(name)
                    || m.email.as_deref() == Some(name)
            })
            .ok_or_else(|| {
                anyhow::anyhow!("no {status:?} membership for {name}")
            })
    }

    pub async fn membership_id(
        &self,
        community_id: &CommunityId,
        status: MembershipStatus,
        name: &str,
    ) -> anyhow::Result<MembershipId> {
        Ok(self.find_membership(community_id, status, name).await?.id)
    }
}

pub async fn spawn_app_on_port(port: u16) -> TestApp {
    telemetry::try_init_subscriber(telemetry::get_subscriber("error"));

    let mut config = Config {
        ip: "127.0.0.1".into(),
        port,
        allowed_origins: vec!["*".to_string()],
    };

    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .cookie_store(true)
        .build()
        .unwrap();

    let server = api::build(&mut config, Store::with_demo_users()).unwrap();
    tokio::spawn(server);

    TestApp {
        port: config.port,
        client: payloads::APIClient {
            address: format!("http://127.0.0.1:{}", config.port),
            inner_client: client,
        },
    }
}

/// Use OS-assigned port for parallel testing.
pub async fn spawn_app() -> TestApp {
    spawn_app_on_port(0).await
}

/// Assert that the result of an API action results in a specific status code.
pub fn assert_status_code<T>(
    result: Result<T, payloads::ClientError>,
    expected: StatusCode,
) {
    match result {
        Err(payloads::ClientError::APIError(code, _)) => {
            assert_eq!(code, expected)
        }
        _ => panic!("Expected APIError"),
    };
}

/// The community used throughout the tests.
pub fn biosyslit() -> requests::CreateCommunity {
    requests::CreateCommunity {
        id: "biosyslit".into(),
        title: "BLR".into(),
        description: "Biodiversity Literature Repository".into(),
        community_type: CommunityType::Event,
        website: None,
        visibility: Visibility::Public,
    }
}
