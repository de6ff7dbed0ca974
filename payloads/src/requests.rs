use crate::{Choice, CommunityId, CommunityType, RequestType, Role, Visibility};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const COMMUNITY_ID_MAX_LEN: usize = 32;
pub const COMMUNITY_TITLE_MAX_LEN: usize = 120;
pub const COMMUNITY_DESCRIPTION_MAX_LEN: usize = 250;
pub const EMAIL_MAX_LEN: usize = 254;

/// Body of `POST /api/communities/`.
///
/// `website` is left out of the serialized body entirely when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCommunity {
    pub id: CommunityId,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub community_type: CommunityType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub visibility: Visibility,
}

/// Fields of the community creation form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DraftField {
    Id,
    Title,
    Description,
    Type,
    Website,
    Visibility,
}

impl DraftField {
    pub const ALL: [Self; 6] = [
        Self::Id,
        Self::Title,
        Self::Description,
        Self::Type,
        Self::Website,
        Self::Visibility,
    ];

    /// The field name as used in the request body and in server errors.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::Description => "description",
            Self::Type => "type",
            Self::Website => "website",
            Self::Visibility => "visibility",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }
}

/// Why a single draft field was rejected. The display text is what the
/// form shows under the field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error("Required")]
    Required,
    #[error("Must be {0} characters or less")]
    TooLong(usize),
    #[error("Must be one of: {0}")]
    NotOneOf(String),
    #[error("Must be a valid URL")]
    InvalidUrl,
    #[error("Only letters, numbers, hyphens and underscores are allowed")]
    InvalidIdentifier,
    #[error("Must be a valid email address")]
    InvalidEmail,
}

pub type DraftErrors = BTreeMap<DraftField, DraftError>;

/// Unsubmitted community creation form values, exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommunityDraft {
    pub id: String,
    pub title: String,
    pub description: String,
    pub community_type: String,
    pub website: String,
    pub visibility: String,
}

impl Default for CommunityDraft {
    fn default() -> Self {
        Self {
            id: String::new(),
            title: String::new(),
            description: String::new(),
            community_type: CommunityType::Event.id().to_string(),
            website: String::new(),
            visibility: Visibility::Public.id().to_string(),
        }
    }
}

impl CommunityDraft {
    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::Id => &self.id,
            DraftField::Title => &self.title,
            DraftField::Description => &self.description,
            DraftField::Type => &self.community_type,
            DraftField::Website => &self.website,
            DraftField::Visibility => &self.visibility,
        }
    }

    pub fn set(&mut self, field: DraftField, value: String) {
        let slot = match field {
            DraftField::Id => &mut self.id,
            DraftField::Title => &mut self.title,
            DraftField::Description => &mut self.description,
            DraftField::Type => &mut self.community_type,
            DraftField::Website => &mut self.website,
            DraftField::Visibility => &mut self.visibility,
        };
        *slot = value;
    }

    pub fn validate_field(&self, field: DraftField) -> Result<(), DraftError> {
        let value = self.get(field);
        match field {
            DraftField::Id => {
                required_max(value, COMMUNITY_ID_MAX_LEN)?;
                if is_valid_identifier(value) {
                    Ok(())
                } else {
                    Err(DraftError::InvalidIdentifier)
                }
            }
            DraftField::Title => required_max(value, COMMUNITY_TITLE_MAX_LEN),
            DraftField::Description => {
                required_max(value, COMMUNITY_DESCRIPTION_MAX_LEN)
            }
            DraftField::Type => one_of::<CommunityType>(value).map(|_| ()),
            DraftField::Visibility => one_of::<Visibility>(value).map(|_| ()),
            DraftField::Website => {
                if value.is_empty() || is_valid_url(value) {
                    Ok(())
                } else {
                    Err(DraftError::InvalidUrl)
                }
            }
        }
    }

    /// Validate every field, returning the failures keyed by field.
    pub fn validate(&self) -> DraftErrors {
        DraftField::ALL
            .into_iter()
            .filter_map(|field| {
                self.validate_field(field).err().map(|e| (field, e))
            })
            .collect()
    }

    /// Build the request body, dropping empty optional values.
    ///
    /// Fails with every field error if the draft does not validate.
    pub fn to_request(&self) -> Result<CreateCommunity, DraftErrors> {
        let community_type = one_of::<CommunityType>(&self.community_type);
        let visibility = one_of::<Visibility>(&self.visibility);
        let errors = self.validate();
        match (community_type, visibility) {
            (Ok(community_type), Ok(visibility)) if errors.is_empty() => {
                Ok(CreateCommunity {
                    id: CommunityId(self.id.clone()),
                    title: self.title.clone(),
                    description: self.description.clone(),
                    community_type,
                    website: Some(self.website.clone())
                        .filter(|w| !w.is_empty()),
                    visibility,
                })
            }
            _ => Err(errors),
        }
    }
}

impl From<&CreateCommunity> for CommunityDraft {
    fn from(request: &CreateCommunity) -> Self {
        Self {
            id: request.id.0.clone(),
            title: request.title.clone(),
            description: request.description.clone(),
            community_type: request.community_type.id().to_string(),
            website: request.website.clone().unwrap_or_default(),
            visibility: request.visibility.id().to_string(),
        }
    }
}

fn required_max(value: &str, max_len: usize) -> Result<(), DraftError> {
    if value.is_empty() {
        return Err(DraftError::Required);
    }
    if value.chars().count() > max_len {
        return Err(DraftError::TooLong(max_len));
    }
    Ok(())
}

fn one_of<C: Choice>(value: &str) -> Result<C, DraftError> {
    if value.is_empty() {
        return Err(DraftError::Required);
    }
    C::from_id(value).ok_or_else(|| DraftError::NotOneOf(C::ids()))
}

/// Community ids end up as a path segment in every members url, so they
/// are limited to ASCII letters, digits, `-` and `_`.
pub fn is_valid_identifier(value: &str) -> bool {
    value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// `local@domain` with no whitespace and a dot somewhere in the domain.
pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.split_once('.').is_some_and(|(host, tld)| {
                    !host.is_empty() && !tld.is_empty()
                })
        }
        None => false,
    }
}

/// Absolute http(s) or ftp URL with a host.
pub fn is_valid_url(value: &str) -> bool {
    if value.trim() != value {
        return false;
    }
    match reqwest::Url::parse(value) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https" | "ftp")
                && url.host_str().is_some_and(|host| !host.is_empty())
        }
        Err(_) => false,
    }
}

/// Body of `POST /api/communities/{id}/members`.
///
/// A `Request` is the current user asking to join. An `Invitation` is sent
/// by an administrator and names the invitee's email and offered role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateMembershipRequest {
    pub request_type: RequestType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl CreateMembershipRequest {
    pub fn join() -> Self {
        Self {
            request_type: RequestType::Request,
            email: None,
            role: None,
        }
    }

    pub fn invite(email: String, role: Role) -> Self {
        Self {
            request_type: RequestType::Invitation,
            email: Some(email),
            role: Some(role),
        }
    }
}

/// Fields of the invitation form on the members page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InviteField {
    Email,
    Role,
}

impl InviteField {
    pub const ALL: [Self; 2] = [Self::Email, Self::Role];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Role => "role",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }
}

pub type InviteErrors = BTreeMap<InviteField, DraftError>;

/// Unsubmitted invitation: the invitee's email and the offered role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteDraft {
    pub email: String,
    pub role: String,
}

impl Default for InviteDraft {
    fn default() -> Self {
        Self {
            email: String::new(),
            role: Role::Curator.id().to_string(),
        }
    }
}

impl InviteDraft {
    pub fn get(&self, field: InviteField) -> &str {
        match field {
            InviteField::Email => &self.email,
            InviteField::Role => &self.role,
        }
    }

    pub fn set(&mut self, field: InviteField, value: String) {
        match field {
            InviteField::Email => self.email = value,
            InviteField::Role => self.role = value,
        }
    }

    pub fn validate_field(
        &self,
        field: InviteField,
    ) -> Result<(), DraftError> {
        match field {
            InviteField::Email => {
                required_max(&self.email, EMAIL_MAX_LEN)?;
                if is_valid_email(&self.email) {
                    Ok(())
                } else {
                    Err(DraftError::InvalidEmail)
                }
            }
            InviteField::Role => one_of::<Role>(&self.role).map(|_| ()),
        }
    }

    pub fn validate(&self) -> InviteErrors {
        InviteField::ALL
            .into_iter()
            .filter_map(|field| {
                self.validate_field(field).err().map(|e| (field, e))
            })
            .collect()
    }

    pub fn to_request(&self) -> Result<CreateMembershipRequest, InviteErrors> {
        let role = one_of::<Role>(&self.role);
        let errors = self.validate();
        match role {
            Ok(role) if errors.is_empty() => Ok(
                CreateMembershipRequest::invite(self.email.clone(), role),
            ),
            _ => Err(errors),
        }
    }
}

impl From<&CreateMembershipRequest> for InviteDraft {
    fn from(request: &CreateMembershipRequest) -> Self {
        Self {
            email: request.email.clone().unwrap_or_default(),
            role: request.role.unwrap_or(Role::Member).id().to_string(),
        }
    }
}

/// Body of `PUT /api/communities/{id}/members/requests/{membership_id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeRole {
    pub role: Role,
}

/// Body of the accept/reject endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolveRequest {
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Query string of `GET /api/communities/{id}/members`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MembersQuery {
    pub status: crate::MembershipStatus,
    #[serde(default)]
    pub include_requests: bool,
}

/// Login for the development API, which only knows seeded users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub username: String,
}
