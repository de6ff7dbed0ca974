//! In-memory community store.
//!
//! The store is the only place permission rules live. Route handlers
//! resolve the logged in user and hand everything else to the methods here,
//! which either apply the change or return a `StoreError` describing why
//! not.
//!
//! Memberships are kept in insertion order so listings are stable across
//! requests, which the ui relies on when re-rendering a table after a
//! re-fetch.

use derive_more::Display;
use payloads::{
    CommunityId, MembershipId, MembershipStatus, RequestAction, RequestType,
    Role,
    requests::{
        self, CommunityDraft, CreateCommunity, CreateMembershipRequest,
        DraftErrors,
    },
    responses::{self, Comment, Community, Membership},
};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Users every fresh store knows about. Emails are `{username}@example.org`.
pub const DEMO_USERS: &[&str] = &["alice", "bob", "carol", "dave"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub struct UserId(pub u32);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone)]
struct MembershipRecord {
    id: MembershipId,
    community_id: CommunityId,
    user_id: Option<UserId>,
    /// Set for invitations, which may target someone without an account.
    email: Option<String>,
    role: Role,
    status: MembershipStatus,
    request: Option<RequestRecord>,
}

impl MembershipRecord {
    /// A pending invitation sent by an administrator.
    fn is_invitation(&self) -> bool {
        self.status == MembershipStatus::Pending
            && self.request.as_ref().is_some_and(|request| {
                request.request_type == RequestType::Invitation
            })
    }

    fn is_addressed_to(&self, user: &User) -> bool {
        self.user_id == Some(user.id)
            || self.email.as_deref() == Some(user.email.as_str())
    }
}

#[derive(Debug, Clone)]
struct RequestRecord {
    request_type: RequestType,
    comments: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("User not found")]
    UserNotFound,
    #[error("Community not found")]
    CommunityNotFound,
    #[error("Membership not found")]
    MembershipNotFound,
    #[error("Administrator permissions required")]
    RequiresAdmin,
    #[error("Invalid community details")]
    InvalidCommunity(DraftErrors),
    #[error("A community with this identifier already exists")]
    CommunityIdTaken,
    #[error("This is an already existing relationship")]
    AlreadyMember,
    #[error("An email address is required to send an invitation")]
    MissingInviteEmail,
    #[error("Must be a valid email address")]
    InvalidInviteEmail,
    #[error("You have a pending invitation to this community")]
    PendingInvitation,
    #[error("Only the invited user can respond to an invitation")]
    NotInvitee,
    #[error("Membership is not pending")]
    NotPending,
    #[error("A community must keep at least one administrator")]
    LastAdmin,
}

#[derive(Debug, Default)]
pub struct Store {
    users: Vec<User>,
    communities: BTreeMap<CommunityId, Community>,
    memberships: Vec<MembershipRecord>,
}

impl Store {
    pub fn with_demo_users() -> Self {
        let mut store = Self::default();
        for username in DEMO_USERS {
            store.add_user(username, &format!("{username}@example.org"));
        }
        store
    }

    pub fn add_user(&mut self, username: &str, email: &str) -> UserId {
        let id = UserId(self.users.len() as u32 + 1);
        self.users.push(User {
            id,
            username: username.to_string(),
            email: email.to_string(),
        });
        id
    }

    pub fn user(&self, user_id: UserId) -> Result<&User, StoreError> {
        self.users
            .iter()
            .find(|user| user.id == user_id)
            .ok_or(StoreError::UserNotFound)
    }

    pub fn user_by_name(&self, username: &str) -> Result<&User, StoreError> {
        self.users
            .iter()
            .find(|user| user.username == username)
            .ok_or(StoreError::UserNotFound)
    }

    /// Create a community, making the creator its first administrator.
    pub fn create_community(
        &mut self,
        user_id: UserId,
        details: &CreateCommunity,
    ) -> Result<Community, StoreError> {
        self.user(user_id)?;
        let errors = CommunityDraft::from(details).validate();
        if !errors.is_empty() {
            return Err(StoreError::InvalidCommunity(errors));
        }
        if self.communities.contains_key(&details.id) {
            return Err(StoreError::CommunityIdTaken);
        }

        let community = Community {
            id: details.id.clone(),
            title: details.title.clone(),
            description: details.description.clone(),
            community_type: details.community_type,
            website: details.website.clone(),
            visibility: details.visibility,
        };
        self.communities
            .insert(community.id.clone(), community.clone());
        self.memberships.push(MembershipRecord {
            id: MembershipId(Uuid::new_v4()),
            community_id: community.id.clone(),
            user_id: Some(user_id),
            email: None,
            role: Role::Admin,
            status: MembershipStatus::Accepted,
            request: None,
        });
        Ok(community)
    }

    pub fn community(
        &self,
        community_id: &CommunityId,
    ) -> Result<&Community, StoreError> {
        self.communities
            .get(community_id)
            .ok_or(StoreError::CommunityNotFound)
    }

    /// List memberships with the given status. Administrators only.
    pub fn list_memberships(
        &self,
        user_id: UserId,
        community_id: &CommunityId,
        query: &requests::MembersQuery,
    ) -> Result<responses::MembershipList, StoreError> {
        self.require_admin(user_id, community_id)?;
        let memberships = self
            .memberships
            .iter()
            .filter(|m| &m.community_id == community_id)
            .filter(|m| m.status == query.status)
            .map(|m| self.to_response(m, query.include_requests))
            .collect();
        Ok(responses::MembershipList::with_status(query.status, memberships))
    }

    /// Ask to join (any user) or invite someone (administrators only).
    pub fn create_request(
        &mut self,
        user_id: UserId,
        community_id: &CommunityId,
        details: &CreateMembershipRequest,
    ) -> Result<MembershipId, StoreError> {
        self.community(community_id)?;
        let record = match details.request_type {
            RequestType::Request => {
                match self.active_membership_of(user_id, community_id) {
                    Some(m) if m.is_invitation() => {
                        return Err(StoreError::PendingInvitation);
                    }
                    Some(_) => return Err(StoreError::AlreadyMember),
                    None => {}
                }
                MembershipRecord {
                    id: MembershipId(Uuid::new_v4()),
                    community_id: community_id.clone(),
                    user_id: Some(user_id),
                    email: None,
                    role: Role::Member,
                    status: MembershipStatus::Pending,
                    request: Some(RequestRecord {
                        request_type: RequestType::Request,
                        comments: Vec::new(),
                    }),
                }
            }
            RequestType::Invitation => {
                self.require_admin(user_id, community_id)?;
                let email = details
                    .email
                    .clone()
                    .filter(|email| !email.is_empty())
                    .ok_or(StoreError::MissingInviteEmail)?;
                if !requests::is_valid_email(&email) {
                    return Err(StoreError::InvalidInviteEmail);
                }
                let invitee = self
                    .users
                    .iter()
                    .find(|user| user.email == email)
                    .map(|user| user.id);
                let already_related = self.memberships.iter().any(|m| {
                    &m.community_id == community_id
                        && m.status != MembershipStatus::Rejected
                        && (m.email.as_ref() == Some(&email)
                            || (invitee.is_some() && m.user_id == invitee))
                });
                if already_related {
                    return Err(StoreError::AlreadyMember);
                }
                MembershipRecord {
                    id: MembershipId(Uuid::new_v4()),
                    community_id: community_id.clone(),
                    user_id: invitee,
                    email: Some(email),
                    role: details.role.unwrap_or(Role::Member),
                    status: MembershipStatus::Pending,
                    request: Some(RequestRecord {
                        request_type: RequestType::Invitation,
                        comments: Vec::new(),
                    }),
                }
            }
        };
        let id = record.id;
        self.memberships.push(record);
        Ok(id)
    }

    pub fn change_role(
        &mut self,
        user_id: UserId,
        community_id: &CommunityId,
        membership_id: &MembershipId,
        role: Role,
    ) -> Result<(), StoreError> {
        self.require_admin(user_id, community_id)?;
        let index = self.membership_index(community_id, membership_id)?;
        if role != Role::Admin && self.is_last_admin(index) {
            return Err(StoreError::LastAdmin);
        }
        self.memberships[index].role = role;
        Ok(())
    }

    /// Accept or reject a pending membership.
    ///
    /// Join requests are resolved by administrators, who pick the role.
    /// Invitations are resolved by the invitee and keep the offered role.
    pub fn resolve_request(
        &mut self,
        user_id: UserId,
        community_id: &CommunityId,
        membership_id: &MembershipId,
        action: RequestAction,
        details: &requests::ResolveRequest,
    ) -> Result<(), StoreError> {
        self.community(community_id)?;
        let index = self.membership_index(community_id, membership_id)?;
        let record = &self.memberships[index];
        if record.status != MembershipStatus::Pending {
            return Err(StoreError::NotPending);
        }
        let request_type = record
            .request
            .as_ref()
            .map(|request| request.request_type)
            .unwrap_or(RequestType::Request);
        let role = match request_type {
            RequestType::Request => {
                self.require_admin(user_id, community_id)?;
                details.role
            }
            RequestType::Invitation => {
                if !record.is_addressed_to(self.user(user_id)?) {
                    return Err(StoreError::NotInvitee);
                }
                record.role
            }
        };

        let record = &mut self.memberships[index];
        match action {
            RequestAction::Accept => {
                record.status = MembershipStatus::Accepted;
                record.role = role;
                record.user_id.get_or_insert(user_id);
            }
            RequestAction::Reject => record.status = MembershipStatus::Rejected,
        }
        if let Some(message) = details.message.clone() {
            record
                .request
                .get_or_insert(RequestRecord {
                    request_type,
                    comments: Vec::new(),
                })
                .comments
                .push(message);
        }
        Ok(())
    }

    /// Pending invitations addressed to the user, by account or by email.
    pub fn received_invitations(
        &self,
        user_id: UserId,
    ) -> Result<Vec<responses::Invitation>, StoreError> {
        let user = self.user(user_id)?;
        self.memberships
            .iter()
            .filter(|m| m.is_invitation() && m.is_addressed_to(user))
            .map(|m| self.to_invitation(m))
            .collect()
    }

    /// One pending invitation. Anyone but the invitee gets `NotInvitee`.
    pub fn invitation(
        &self,
        user_id: UserId,
        membership_id: &MembershipId,
    ) -> Result<responses::Invitation, StoreError> {
        let user = self.user(user_id)?;
        let record = self
            .memberships
            .iter()
            .find(|m| &m.id == membership_id && m.is_invitation())
            .ok_or(StoreError::MembershipNotFound)?;
        if !record.is_addressed_to(user) {
            return Err(StoreError::NotInvitee);
        }
        self.to_invitation(record)
    }

    /// Remove a membership. Administrators may remove anyone, other users
    /// only their own membership or request.
    pub fn remove_membership(
        &mut self,
        user_id: UserId,
        community_id: &CommunityId,
        membership_id: &MembershipId,
    ) -> Result<(), StoreError> {
        self.community(community_id)?;
        let index = self.membership_index(community_id, membership_id)?;
        let is_own = self.memberships[index].user_id == Some(user_id);
        if !is_own {
            self.require_admin(user_id, community_id)?;
        }
        if self.is_last_admin(index) {
            return Err(StoreError::LastAdmin);
        }
        self.memberships.remove(index);
        Ok(())
    }

    fn require_admin(
        &self,
        user_id: UserId,
        community_id: &CommunityId,
    ) -> Result<(), StoreError> {
        self.community(community_id)?;
        match self.active_membership_of(user_id, community_id) {
            Some(m)
                if m.status == MembershipStatus::Accepted
                    && m.role.is_admin() =>
            {
                Ok(())
            }
            _ => Err(StoreError::RequiresAdmin),
        }
    }

    /// The user's accepted or pending membership, ignoring rejected ones.
    fn active_membership_of(
        &self,
        user_id: UserId,
        community_id: &CommunityId,
    ) -> Option<&MembershipRecord> {
        self.memberships.iter().find(|m| {
            &m.community_id == community_id
                && m.user_id == Some(user_id)
                && m.status != MembershipStatus::Rejected
        })
    }

    fn membership_index(
        &self,
        community_id: &CommunityId,
        membership_id: &MembershipId,
    ) -> Result<usize, StoreError> {
        self.memberships
            .iter()
            .position(|m| {
                &m.id == membership_id && &m.community_id == community_id
            })
            .ok_or(StoreError::MembershipNotFound)
    }

    fn is_last_admin(&self, index: usize) -> bool {
        let record = &self.memberships[index];
        if record.status != MembershipStatus::Accepted
            || !record.role.is_admin()
        {
            return false;
        }
        !self.memberships.iter().enumerate().any(|(i, m)| {
            i != index
                && m.community_id == record.community_id
                && m.status == MembershipStatus::Accepted
                && m.role.is_admin()
        })
    }

    fn to_invitation(
        &self,
        record: &MembershipRecord,
    ) -> Result<responses::Invitation, StoreError> {
        let community = self.community(&record.community_id)?;
        Ok(responses::Invitation {
            membership_id: record.id,
            community_id: community.id.clone(),
            community_title: community.title.clone(),
            role: record.role,
        })
    }

    fn to_response(
        &self,
        record: &MembershipRecord,
        include_request: bool,
    ) -> Membership {
        let user = record.user_id.and_then(|id| self.user(id).ok());
        Membership {
            id: record.id,
            username: user.map(|user| user.username.clone()),
            email: user
                .map(|user| user.email.clone())
                .or_else(|| record.email.clone()),
            user_id: record.user_id.map(|id| id.to_string()),
            role: record.role,
            request: record.request.as_ref().filter(|_| include_request).map(
                |request| responses::MembershipRequest {
                    request_type: request.request_type,
                    comments: request
                        .comments
                        .iter()
                        .map(|message| Comment {
                            message: message.clone(),
                        })
                        .collect(),
                },
            ),
        }
    }
}
