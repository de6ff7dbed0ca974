//! State of the community members page.
//!
//! The page owns a [`MembersPanel`] through `use_reducer`. API calls run in
//! `spawn_local` and report back by dispatching [`MembersAction`]s; the
//! reducer itself never talks to the network. Whenever [`FetchKey`] changes
//! the page issues one listing request for it.

use payloads::{
    CommunityId, MembershipAccess, MembershipId, MembershipStatus, Role,
    responses::{Membership, MembershipList},
};
use reqwest::StatusCode;
use std::collections::HashMap;
use std::rc::Rc;
use yew::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MembersTab {
    #[default]
    Members,
    Requests,
    Rejected,
}

impl MembersTab {
    pub const ALL: [Self; 3] = [Self::Members, Self::Requests, Self::Rejected];

    pub fn status(&self) -> MembershipStatus {
        match self {
            Self::Members => MembershipStatus::Accepted,
            Self::Requests => MembershipStatus::Pending,
            Self::Rejected => MembershipStatus::Rejected,
        }
    }

    pub fn include_requests(&self) -> bool {
        !matches!(self, Self::Members)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Members => "Members",
            Self::Requests => "Requests",
            Self::Rejected => "Rejected",
        }
    }
}

/// Whether the user may manage the community's memberships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Access {
    #[default]
    Unknown,
    Granted,
    Denied,
}

/// Identifies one listing request. A response is only applied while its
/// key is still the panel's current key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchKey {
    pub community_id: CommunityId,
    pub tab: MembersTab,
    pub generation: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MembersPanel {
    pub community_id: CommunityId,
    pub tab: MembersTab,
    pub memberships: Option<MembershipList>,
    pub access: Access,
    /// Roles picked in a row's select but not yet submitted.
    pub role_drafts: HashMap<MembershipId, Role>,
    /// Comments typed for a pending request before accepting or rejecting.
    pub message_drafts: HashMap<MembershipId, String>,
    pub error: Option<String>,
    pub notice: Option<String>,
    pub loading: bool,
    generation: u32,
}

pub enum MembersAction {
    /// Show another community, starting over from the members tab.
    Open(CommunityId),
    SelectTab(MembersTab),
    Loaded {
        key: FetchKey,
        access: MembershipAccess,
    },
    LoadFailed {
        key: FetchKey,
        message: String,
    },
    DraftRole(MembershipId, Role),
    DraftMessage(MembershipId, String),
    Submitting,
    Succeeded {
        notice: String,
        membership_id: Option<MembershipId>,
    },
    Failed(String),
    DismissNotice,
}

impl MembersPanel {
    pub fn new(community_id: CommunityId) -> Self {
        Self {
            community_id,
            tab: MembersTab::default(),
            memberships: None,
            access: Access::default(),
            role_drafts: HashMap::new(),
            message_drafts: HashMap::new(),
            error: None,
            notice: None,
            loading: false,
            generation: 0,
        }
    }

    pub fn fetch_key(&self) -> FetchKey {
        FetchKey {
            community_id: self.community_id.clone(),
            tab: self.tab,
            generation: self.generation,
        }
    }

    /// Rows of the active tab, empty while nothing is loaded.
    pub fn rows(&self) -> &[Membership] {
        self.memberships
            .as_ref()
            .map(|list| list.for_status(self.tab.status()))
            .unwrap_or_default()
    }

    /// The role to show for a row: the unsaved choice if there is one.
    pub fn role_for(&self, membership: &Membership) -> Role {
        self.role_drafts
            .get(&membership.id)
            .copied()
            .unwrap_or(membership.role)
    }

    pub fn message_for(&self, membership_id: &MembershipId) -> &str {
        self.message_drafts
            .get(membership_id)
            .map(String::as_str)
            .unwrap_or_default()
    }

    fn refetch(&mut self) {
        self.memberships = None;
        self.loading = true;
        self.generation = self.generation.wrapping_add(1);
    }
}

impl Reducible for MembersPanel {
    type Action = MembersAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut state = (*self).clone();
        match action {
            MembersAction::Open(community_id) => {
                if community_id == state.community_id {
                    return self;
                }
                // the generation keeps counting so nothing in flight for
                // the previous community can match
                let generation = state.generation.wrapping_add(1);
                state = Self::new(community_id);
                state.generation = generation;
            }
            MembersAction::SelectTab(tab) => {
                if tab == state.tab {
                    return self;
                }
                state.tab = tab;
                state.error = None;
                state.refetch();
            }
            MembersAction::Loaded { key, access } => {
                if key != state.fetch_key() {
                    tracing::debug!(?key, "Dropping stale membership listing");
                    return self;
                }
                state.loading = false;
                match access {
                    MembershipAccess::Granted(list) => {
                        state.access = Access::Granted;
                        state.memberships = Some(list);
                    }
                    MembershipAccess::Denied(status) => {
                        state.memberships = None;
                        if state.access == Access::Granted {
                            state.error = Some(denied_message(status));
                        } else {
                            state.access = Access::Denied;
                        }
                    }
                }
            }
            MembersAction::LoadFailed { key, message } => {
                if key != state.fetch_key() {
                    return self;
                }
                state.loading = false;
                state.error = Some(message);
            }
            MembersAction::DraftRole(membership_id, role) => {
                state.role_drafts.insert(membership_id, role);
            }
            MembersAction::DraftMessage(membership_id, message) => {
                state.message_drafts.insert(membership_id, message);
            }
            MembersAction::Submitting => {
                state.error = None;
                state.notice = None;
                state.loading = true;
            }
            MembersAction::Succeeded {
                notice,
                membership_id,
            } => {
                if let Some(membership_id) = membership_id {
                    state.role_drafts.remove(&membership_id);
                    state.message_drafts.remove(&membership_id);
                }
                state.notice = Some(notice);
                state.refetch();
            }
            MembersAction::Failed(message) => {
                state.loading = false;
                state.error = Some(message);
            }
            MembersAction::DismissNotice => state.notice = None,
        }
        state.into()
    }
}

fn denied_message(status: StatusCode) -> String {
    format!("Could not load memberships ({status})")
}

#[cfg(test)]
mod tests {
    use super::*;
    use payloads::RequestType;
    use payloads::responses::{Comment, MembershipRequest};
    use uuid::Uuid;

    fn membership(username: &str, role: Role) -> Membership {
        Membership {
            id: MembershipId(Uuid::new_v4()),
            username: Some(username.into()),
            email: None,
            user_id: None,
            role,
            request: None,
        }
    }

    fn granted(
        status: MembershipStatus,
        rows: Vec<Membership>,
    ) -> MembershipAccess {
        MembershipAccess::Granted(MembershipList::with_status(status, rows))
    }

    fn biosyslit_panel() -> Rc<MembersPanel> {
        Rc::new(MembersPanel::new(CommunityId::from("biosyslit")))
    }

    fn loaded(
        panel: Rc<MembersPanel>,
        access: MembershipAccess,
    ) -> Rc<MembersPanel> {
        let key = panel.fetch_key();
        panel.reduce(MembersAction::Loaded { key, access })
    }

    #[test]
    fn tabs_map_to_status_and_requests() {
        let queries: Vec<_> = MembersTab::ALL
            .iter()
            .map(|tab| (tab.status().code(), tab.include_requests()))
            .collect();
        assert_eq!(queries, [("A", false), ("P", true), ("R", true)]);
    }

    #[test]
    fn empty_accepted_list_grants_access() {
        let panel = biosyslit_panel();
        assert_eq!(panel.access, Access::Unknown);

        let panel = loaded(panel, granted(MembershipStatus::Accepted, vec![]));

        assert_eq!(panel.access, Access::Granted);
        assert_eq!(panel.tab, MembersTab::Members);
        assert!(panel.memberships.is_some());
        assert!(panel.rows().is_empty());
    }

    #[test]
    fn non_200_denies_access() {
        let panel = biosyslit_panel();
        let panel =
            loaded(panel, MembershipAccess::Denied(StatusCode::NOT_FOUND));

        assert_eq!(panel.access, Access::Denied);
        assert!(panel.memberships.is_none());
        assert!(panel.error.is_none());
    }

    #[test]
    fn tab_switch_clears_list_and_asks_for_one_fetch() {
        let panel = biosyslit_panel();
        let panel = loaded(
            panel,
            granted(
                MembershipStatus::Accepted,
                vec![membership("alice", Role::Admin)],
            ),
        );
        let before = panel.fetch_key();

        let panel =
            panel.reduce(MembersAction::SelectTab(MembersTab::Requests));
        let after = panel.fetch_key();

        assert!(panel.memberships.is_none());
        assert!(panel.loading);
        assert_ne!(before, after);
        assert_eq!(after.tab.status(), MembershipStatus::Pending);
        assert!(after.tab.include_requests());

        // selecting the same tab again does not fetch again
        let panel =
            panel.reduce(MembersAction::SelectTab(MembersTab::Requests));
        assert_eq!(panel.fetch_key(), after);
    }

    #[test]
    fn stale_tab_response_is_dropped() {
        let panel = biosyslit_panel();
        let members_key = panel.fetch_key();
        let panel =
            panel.reduce(MembersAction::SelectTab(MembersTab::Requests));

        let panel = panel.reduce(MembersAction::Loaded {
            key: members_key,
            access: granted(
                MembershipStatus::Accepted,
                vec![membership("alice", Role::Admin)],
            ),
        });

        assert!(panel.memberships.is_none());
        assert_eq!(panel.access, Access::Unknown);
        assert!(panel.loading);
    }

    #[test]
    fn denied_after_granted_is_an_error() {
        let panel = biosyslit_panel();
        let panel = loaded(panel, granted(MembershipStatus::Accepted, vec![]));
        let panel =
            panel.reduce(MembersAction::SelectTab(MembersTab::Rejected));
        let panel =
            loaded(panel, MembershipAccess::Denied(StatusCode::NOT_FOUND));

        assert_eq!(panel.access, Access::Granted);
        assert_eq!(
            panel.error.as_deref(),
            Some("Could not load memberships (404 Not Found)")
        );
    }

    #[test]
    fn opening_another_community_starts_over() {
        let panel = biosyslit_panel();
        let panel = loaded(
            panel,
            granted(
                MembershipStatus::Accepted,
                vec![membership("alice", Role::Admin)],
            ),
        );
        let panel =
            panel.reduce(MembersAction::SelectTab(MembersTab::Requests));
        let in_flight = panel.fetch_key();

        let panel = panel
            .reduce(MembersAction::Open(CommunityId::from("zenodo-events")));
        assert_eq!(panel.tab, MembersTab::Members);
        assert_eq!(panel.access, Access::Unknown);
        assert!(panel.memberships.is_none());
        assert_eq!(panel.fetch_key().community_id.0, "zenodo-events");

        // the old community's response does not land on the new one
        let panel = panel.reduce(MembersAction::Loaded {
            key: in_flight,
            access: granted(MembershipStatus::Pending, vec![]),
        });
        assert_eq!(panel.access, Access::Unknown);

        // so its 404 shows the join button rather than an error
        let panel =
            loaded(panel, MembershipAccess::Denied(StatusCode::NOT_FOUND));
        assert_eq!(panel.access, Access::Denied);
        assert!(panel.error.is_none());

        let key = panel.fetch_key();
        let panel = panel
            .reduce(MembersAction::Open(CommunityId::from("zenodo-events")));
        assert_eq!(panel.fetch_key(), key);
    }

    #[test]
    fn role_drafts_leave_rows_untouched() {
        let bob = membership("bob", Role::Member);
        let panel = biosyslit_panel();
        let panel = loaded(
            panel,
            granted(MembershipStatus::Accepted, vec![bob.clone()]),
        );

        let panel =
            panel.reduce(MembersAction::DraftRole(bob.id, Role::Curator));

        assert_eq!(panel.rows()[0].role, Role::Member);
        assert_eq!(panel.role_for(&panel.rows()[0]), Role::Curator);
    }

    #[test]
    fn success_refetches_active_tab() {
        let mut bob = membership("bob", Role::Member);
        bob.request = Some(MembershipRequest {
            request_type: RequestType::Request,
            comments: vec![Comment {
                message: "Please".into(),
            }],
        });
        let panel = biosyslit_panel();
        let panel = loaded(panel, granted(MembershipStatus::Accepted, vec![]));
        let panel =
            panel.reduce(MembersAction::SelectTab(MembersTab::Requests));
        let panel = loaded(
            panel,
            granted(MembershipStatus::Pending, vec![bob.clone()]),
        );
        let panel =
            panel.reduce(MembersAction::DraftRole(bob.id, Role::Curator));
        let panel =
            panel.reduce(MembersAction::DraftMessage(bob.id, "Welcome".into()));
        let before = panel.fetch_key();

        let panel = panel.reduce(MembersAction::Submitting);
        assert_eq!(panel.fetch_key(), before);
        let panel = panel.reduce(MembersAction::Succeeded {
            notice: "Request accepted".into(),
            membership_id: Some(bob.id),
        });

        assert_eq!(panel.tab, MembersTab::Requests);
        assert_ne!(panel.fetch_key(), before);
        assert_eq!(panel.fetch_key().tab, MembersTab::Requests);
        assert!(panel.memberships.is_none());
        assert!(panel.role_drafts.is_empty());
        assert_eq!(panel.message_for(&bob.id), "");
        assert_eq!(panel.notice.as_deref(), Some("Request accepted"));
    }

    #[test]
    fn failure_keeps_the_list() {
        let panel = biosyslit_panel();
        let panel = loaded(
            panel,
            granted(
                MembershipStatus::Accepted,
                vec![membership("alice", Role::Admin)],
            ),
        );
        let panel = panel.reduce(MembersAction::Submitting);
        let panel = panel.reduce(MembersAction::Failed(
            "A community must keep at least one administrator".into(),
        ));

        assert!(!panel.loading);
        assert_eq!(panel.rows().len(), 1);
        assert!(panel.error.is_some());
    }
}
