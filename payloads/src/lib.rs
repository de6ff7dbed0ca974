pub mod api_client;
pub mod requests;
pub mod responses;

pub use api_client::{APIClient, ClientError, MembershipAccess};

use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The user-chosen identifier of a community, e.g. `biosyslit`.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct CommunityId(pub String);

impl From<&str> for CommunityId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MembershipId(pub Uuid);

/// A fixed set of values offered to the user in a select input.
///
/// `id` is the wire value and `display` the human readable label.
pub trait Choice: Sized + Copy + PartialEq + 'static {
    const ALL: &'static [Self];

    fn id(&self) -> &'static str;

    fn display(&self) -> &'static str;

    fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|choice| choice.id() == id)
    }

    /// Comma separated wire values, used in validation messages.
    fn ids() -> String {
        Self::ALL
            .iter()
            .map(|choice| choice.id())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Implements the string conversions every choice enum needs in terms of
/// its `Choice` impl.
macro_rules! choice_conversions {
    ($ty:ty) => {
        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.id())
            }
        }

        impl std::str::FromStr for $ty {
            type Err = UnknownChoice;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty as Choice>::from_id(s)
                    .ok_or_else(|| UnknownChoice(s.to_string()))
            }
        }
    };
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown choice: {0}")]
pub struct UnknownChoice(pub String);

/// Permission level of a member within a community.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Curator,
    Member,
}

impl Choice for Role {
    const ALL: &'static [Self] = &[Self::Admin, Self::Curator, Self::Member];

    fn id(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Curator => "curator",
            Self::Member => "member",
        }
    }

    fn display(&self) -> &'static str {
        match self {
            Self::Admin => "Administrator",
            Self::Curator => "Curator",
            Self::Member => "Member",
        }
    }
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

choice_conversions!(Role);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommunityType {
    Organization,
    Event,
    Topic,
    Project,
}

impl Choice for CommunityType {
    const ALL: &'static [Self] =
        &[Self::Organization, Self::Event, Self::Topic, Self::Project];

    fn id(&self) -> &'static str {
        match self {
            Self::Organization => "organization",
            Self::Event => "event",
            Self::Topic => "topic",
            Self::Project => "project",
        }
    }

    fn display(&self) -> &'static str {
        match self {
            Self::Organization => "Institution/Organization",
            Self::Event => "Event",
            Self::Topic => "Topic",
            Self::Project => "Project",
        }
    }
}

choice_conversions!(CommunityType);

/// Community-level access policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
    Hidden,
}

impl Choice for Visibility {
    const ALL: &'static [Self] = &[Self::Public, Self::Private, Self::Hidden];

    fn id(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::Hidden => "hidden",
        }
    }

    fn display(&self) -> &'static str {
        match self {
            Self::Public => "Public",
            Self::Private => "Private",
            Self::Hidden => "Hidden",
        }
    }
}

choice_conversions!(Visibility);

/// Where a membership currently stands. Serialized as the single letter
/// code the members endpoint takes in its `status` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MembershipStatus {
    #[serde(rename = "A")]
    Accepted,
    #[serde(rename = "P")]
    Pending,
    #[serde(rename = "R")]
    Rejected,
}

impl MembershipStatus {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Accepted => "A",
            Self::Pending => "P",
            Self::Rejected => "R",
        }
    }

    /// Key of the list holding memberships with this status in a
    /// `responses::MembershipList`.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::Pending => "pending",
            Self::Rejected => "rejected",
        }
    }
}

/// Whether a pending membership was asked for by the user (`Request`) or
/// offered by a community administrator (`Invitation`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RequestType {
    #[display("invitation")]
    Invitation,
    #[display("request")]
    Request,
}

/// How a pending request is resolved. Used as the last path segment of
/// the resolve endpoint.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RequestAction {
    #[display("accept")]
    Accept,
    #[display("reject")]
    Reject,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choices_parse_from_their_ids() {
        assert_eq!("curator".parse::<Role>(), Ok(Role::Curator));
        assert_eq!("hidden".parse::<Visibility>(), Ok(Visibility::Hidden));
        assert_eq!(
            "organization".parse::<CommunityType>(),
            Ok(CommunityType::Organization)
        );
        assert!("owner".parse::<Role>().is_err());
        assert!("Admin".parse::<Role>().is_err());
    }

    #[test]
    fn choice_ids_match_serde() {
        for role in Role::ALL {
            let json = serde_json::to_string(role).unwrap();
            assert_eq!(json, format!("\"{}\"", role.id()));
        }
        assert_eq!(Visibility::ids(), "public, private, hidden");
    }

    #[test]
    fn status_codes() {
        let json = serde_json::to_string(&MembershipStatus::Pending).unwrap();
        assert_eq!(json, "\"P\"");
        assert_eq!(MembershipStatus::Rejected.key(), "rejected");
        assert_eq!(RequestAction::Reject.to_string(), "reject");
    }
}
