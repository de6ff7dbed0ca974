use payloads::responses;
use yewdux::prelude::*;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum AuthState {
    #[default]
    Unknown,
    LoggedOut,
    LoggedIn(String),
}

#[derive(Default, Clone, PartialEq, Store)]
pub struct State {
    pub auth_state: AuthState,

    // Communities created from this browser session, newest first. There is
    // no listing endpoint to fetch them from.
    pub created_communities: Vec<responses::Community>,
}

impl State {
    pub fn username(&self) -> Option<&str> {
        match &self.auth_state {
            AuthState::LoggedIn(username) => Some(username),
            _ => None,
        }
    }

    pub fn add_created_community(&mut self, community: responses::Community) {
        self.created_communities.retain(|c| c.id != community.id);
        self.created_communities.insert(0, community);
    }

    pub fn logout(&mut self) {
        self.auth_state = AuthState::LoggedOut;
    }

    /// Apply the session check made on startup. A login or logout that
    /// happened while the check was in flight wins.
    pub fn restore_session(&mut self, username: Option<String>) {
        if self.auth_state != AuthState::Unknown {
            return;
        }
        self.auth_state = match username {
            Some(username) => AuthState::LoggedIn(username),
            None => AuthState::LoggedOut,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use payloads::{CommunityType, Visibility};

    fn community(id: &str, title: &str) -> responses::Community {
        responses::Community {
            id: id.into(),
            title: title.into(),
            description: "d".into(),
            community_type: CommunityType::Event,
            website: None,
            visibility: Visibility::Public,
        }
    }

    #[test]
    fn newest_community_first_without_duplicates() {
        let mut state = State::default();
        state.add_created_community(community("biosyslit", "BLR"));
        state.add_created_community(community("zenodo", "Zenodo"));
        state.add_created_community(community("biosyslit", "BLR 2"));

        let titles: Vec<_> = state
            .created_communities
            .iter()
            .map(|c| c.title.as_str())
            .collect();
        assert_eq!(titles, ["BLR 2", "Zenodo"]);
    }

    #[test]
    fn username_only_when_logged_in() {
        let mut state = State::default();
        assert_eq!(state.username(), None);
        state.auth_state = AuthState::LoggedIn("alice".into());
        assert_eq!(state.username(), Some("alice"));
        state.logout();
        assert_eq!(state.username(), None);
    }

    #[test]
    fn session_check_resolves_unknown_only() {
        let mut state = State::default();
        state.restore_session(Some("alice".into()));
        assert_eq!(state.auth_state, AuthState::LoggedIn("alice".into()));

        let mut state = State::default();
        state.restore_session(None);
        assert_eq!(state.auth_state, AuthState::LoggedOut);

        // the user logged in as bob before the check came back
        let mut state = State::default();
        state.auth_state = AuthState::LoggedIn("bob".into());
        state.restore_session(None);
        assert_eq!(state.username(), Some("bob"));
    }
}
