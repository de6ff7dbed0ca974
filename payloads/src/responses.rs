use crate::{
    CommunityId, CommunityType, MembershipId, MembershipStatus, RequestType,
    Role, Visibility,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Community {
    pub id: CommunityId,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub community_type: CommunityType,
    #[serde(default)]
    pub website: Option<String>,
    pub visibility: Visibility,
}

/// The logged in user, as returned by `GET /api/user_profile`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub email: String,
}

/// A pending invitation, as seen by the invitee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invitation {
    pub membership_id: MembershipId,
    pub community_id: CommunityId,
    pub community_title: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub message: String,
}

/// The request attached to a pending or rejected membership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipRequest {
    pub request_type: RequestType,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// One row of the members listing.
///
/// Invitations sent to an email address have no user yet, so any of the
/// identifying fields may be missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub id: MembershipId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<MembershipRequest>,
}

impl Membership {
    /// Username, falling back to email and then the raw user id.
    pub fn display_name(&self) -> &str {
        self.username
            .as_deref()
            .or(self.email.as_deref())
            .or(self.user_id.as_deref())
            .unwrap_or("Unknown user")
    }

    pub fn comments(&self) -> &[Comment] {
        self.request
            .as_ref()
            .map(|request| request.comments.as_slice())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipsByStatus {
    #[serde(default)]
    pub accepted: Vec<Membership>,
    #[serde(default)]
    pub pending: Vec<Membership>,
    #[serde(default)]
    pub rejected: Vec<Membership>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipHits {
    pub hits: MembershipsByStatus,
    #[serde(default)]
    pub total: usize,
}

/// Body of `GET /api/communities/{id}/members`, shaped like a search
/// result: `{"hits": {"hits": {"accepted": [...]}, "total": 1}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipList {
    pub hits: MembershipHits,
}

impl MembershipList {
    pub fn with_status(
        status: MembershipStatus,
        memberships: Vec<Membership>,
    ) -> Self {
        let total = memberships.len();
        let mut hits = MembershipsByStatus::default();
        match status {
            MembershipStatus::Accepted => hits.accepted = memberships,
            MembershipStatus::Pending => hits.pending = memberships,
            MembershipStatus::Rejected => hits.rejected = memberships,
        }
        Self {
            hits: MembershipHits { hits, total },
        }
    }

    pub fn for_status(&self, status: MembershipStatus) -> &[Membership] {
        let hits = &self.hits.hits;
        match status {
            MembershipStatus::Accepted => &hits.accepted,
            MembershipStatus::Pending => &hits.pending,
            MembershipStatus::Rejected => &hits.rejected,
        }
    }
}

/// A validation failure reported by the server for one request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// JSON body the API sends with non-success statuses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl ErrorBody {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            errors: Vec::new(),
        }
    }

    pub fn field(field: &str, message: impl Into<String>) -> Self {
        Self {
            message: None,
            errors: vec![FieldError {
                field: field.to_string(),
                message: message.into(),
            }],
        }
    }
}
