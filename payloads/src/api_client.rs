use crate::{
    CommunityId, MembershipId, MembershipStatus, RequestAction, requests,
    responses,
};
use reqwest::StatusCode;
use serde::Serialize;

type ReqwestResult = Result<reqwest::Response, reqwest::Error>;

/// An API client for interfacing with the backend.
pub struct APIClient {
    pub address: String,
    pub inner_client: reqwest::Client,
}

/// Helper methods for http actions
impl APIClient {
    fn format_url(&self, path: &str) -> String {
        format!("{}/api/{path}", &self.address)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> ReqwestResult {
        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        request.send().await
    }

    async fn post(&self, path: &str, body: &impl Serialize) -> ReqwestResult {
        self.send(self.inner_client.post(self.format_url(path)).json(body))
            .await
    }

    async fn empty_post(&self, path: &str) -> ReqwestResult {
        self.send(self.inner_client.post(self.format_url(path))).await
    }

    async fn put(&self, path: &str, body: &impl Serialize) -> ReqwestResult {
        self.send(self.inner_client.put(self.format_url(path)).json(body))
            .await
    }

    async fn delete(&self, path: &str) -> ReqwestResult {
        self.send(self.inner_client.delete(self.format_url(path))).await
    }

    async fn get(&self, path: &str, query: &impl Serialize) -> ReqwestResult {
        self.send(self.inner_client.get(self.format_url(path)).query(query))
            .await
    }

    async fn empty_get(&self, path: &str) -> ReqwestResult {
        self.send(self.inner_client.get(self.format_url(path))).await
    }
}

fn members_path(community_id: &CommunityId) -> String {
    format!("communities/{community_id}/members")
}

fn membership_path(
    community_id: &CommunityId,
    membership_id: &MembershipId,
) -> String {
    format!("communities/{community_id}/members/requests/{membership_id}")
}

/// Outcome of listing memberships. Only a 200 grants access to the
/// management view; any other status is reported rather than raised.
#[derive(Debug, Clone, PartialEq)]
pub enum MembershipAccess {
    Granted(responses::MembershipList),
    Denied(StatusCode),
}

/// Methods on the backend API
impl APIClient {
    pub async fn health_check(&self) -> Result<(), ClientError> {
        let response = self.empty_get("health_check").await?;
        ok_empty(response).await
    }

    /// Log in as a known user. Only offered by the development API.
    pub async fn login(
        &self,
        details: &requests::LoginCredentials,
    ) -> Result<(), ClientError> {
        let response = self.post("login", details).await?;
        ok_empty(response).await
    }

    pub async fn logout(&self) -> Result<(), ClientError> {
        let response = self.empty_post("logout").await?;
        ok_empty(response).await
    }

    /// The logged in user, or a 401 when there is no session.
    pub async fn user_profile(
        &self,
    ) -> Result<responses::UserProfile, ClientError> {
        let response = self.empty_get("user_profile").await?;
        ok_body(response).await
    }

    pub async fn create_community(
        &self,
        details: &requests::CreateCommunity,
    ) -> Result<responses::Community, ClientError> {
        let response = self.post("communities/", details).await?;
        ok_body(response).await
    }

    /// List the community's memberships with the given status.
    ///
    /// `include_requests` asks the server to attach the request (type and
    /// comments) to each entry.
    pub async fn get_memberships(
        &self,
        community_id: &CommunityId,
        status: MembershipStatus,
        include_requests: bool,
    ) -> Result<MembershipAccess, ClientError> {
        let query = requests::MembersQuery {
            status,
            include_requests,
        };
        let response = self.get(&members_path(community_id), &query).await?;
        match response.status() {
            StatusCode::OK => {
                Ok(MembershipAccess::Granted(response.json().await?))
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                tracing::debug!(%status, %body, "membership listing denied");
                Ok(MembershipAccess::Denied(status))
            }
        }
    }

    /// Ask to join a community, or invite someone as an administrator.
    pub async fn request_membership(
        &self,
        community_id: &CommunityId,
        details: &requests::CreateMembershipRequest,
    ) -> Result<(), ClientError> {
        let response = self.post(&members_path(community_id), details).await?;
        ok_empty(response).await
    }

    pub async fn change_membership_role(
        &self,
        community_id: &CommunityId,
        membership_id: &MembershipId,
        details: &requests::ChangeRole,
    ) -> Result<(), ClientError> {
        let path = membership_path(community_id, membership_id);
        let response = self.put(&path, details).await?;
        ok_empty(response).await
    }

    /// Accept or reject a pending request.
    pub async fn resolve_request(
        &self,
        community_id: &CommunityId,
        membership_id: &MembershipId,
        action: RequestAction,
        details: &requests::ResolveRequest,
    ) -> Result<(), ClientError> {
        let path = format!(
            "{}/{action}",
            membership_path(community_id, membership_id)
        );
        let response = self.post(&path, details).await?;
        ok_empty(response).await
    }

    /// Pending invitations addressed to the logged in user.
    pub async fn get_received_invitations(
        &self,
    ) -> Result<Vec<responses::Invitation>, ClientError> {
        let response = self.empty_get("invitations").await?;
        ok_body(response).await
    }

    /// One invitation, only visible to its invitee.
    pub async fn get_invitation(
        &self,
        membership_id: &MembershipId,
    ) -> Result<responses::Invitation, ClientError> {
        let path = format!("communities/members/requests/{membership_id}");
        let response = self.empty_get(&path).await?;
        ok_body(response).await
    }

    /// Remove a membership or cancel a pending request.
    pub async fn remove_membership(
        &self,
        community_id: &CommunityId,
        membership_id: &MembershipId,
    ) -> Result<(), ClientError> {
        let path = membership_path(community_id, membership_id);
        let response = self.delete(&path).await?;
        ok_empty(response).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// An unhandled API error to display, containing response text.
    #[error("{1}")]
    APIError(StatusCode, String),
    #[error("Network error. Please check your connection.")]
    Network(#[from] reqwest::Error),
}

impl ClientError {
    /// The structured error body, if the server sent one.
    pub fn error_body(&self) -> Option<responses::ErrorBody> {
        match self {
            Self::APIError(_, text) => serde_json::from_str(text).ok(),
            Self::Network(_) => None,
        }
    }

    /// A single line suitable for a page level error slot.
    pub fn display_message(&self) -> String {
        match self.error_body() {
            Some(responses::ErrorBody {
                message: Some(message),
                ..
            }) => message,
            _ => self.to_string(),
        }
    }
}

/// Deserialize a successful request into the desired type, or return an
/// appropriate error.
pub async fn ok_body<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    if !response.status().is_success() {
        return Err(ClientError::APIError(
            response.status(),
            response.text().await?,
        ));
    }
    Ok(response.json::<T>().await?)
}

/// Check that an empty response is OK, returning a ClientError if not.
pub async fn ok_empty(response: reqwest::Response) -> Result<(), ClientError> {
    if !response.status().is_success() {
        return Err(ClientError::APIError(
            response.status(),
            response.text().await?,
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths() {
        let community_id = CommunityId::from("biosyslit");
        let membership_id = MembershipId(uuid::Uuid::nil());
        assert_eq!(
            members_path(&community_id),
            "communities/biosyslit/members"
        );
        assert_eq!(
            membership_path(&community_id, &membership_id),
            "communities/biosyslit/members/requests/\
             00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn error_body_is_parsed_from_api_errors() {
        let error = ClientError::APIError(
            StatusCode::BAD_REQUEST,
            r#"{"errors": [{"field": "id", "message": "taken"}]}"#.into(),
        );
        let body = error.error_body().unwrap();
        assert_eq!(body.errors[0].field, "id");
        assert_eq!(error.display_message(), error.to_string());

        let error = ClientError::APIError(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"message": "Something went wrong"}"#.into(),
        );
        assert_eq!(error.display_message(), "Something went wrong");

        let error =
            ClientError::APIError(StatusCode::NOT_FOUND, "Not found".into());
        assert!(error.error_body().is_none());
        assert_eq!(error.display_message(), "Not found");
    }
}
