use payloads::ClientError;
use reqwest::StatusCode;
use yew::prelude::*;
use yewdux::prelude::*;

use crate::{State, get_api_client};

/// Resolve the auth state from the session cookie once, on startup.
#[hook]
pub fn use_authentication() {
    let (_state, dispatch) = use_store::<State>();

    use_effect_with((), move |_| {
        yew::platform::spawn_local(async move {
            let username = match get_api_client().user_profile().await {
                Ok(profile) => Some(profile.username),
                Err(ClientError::APIError(status, _))
                    if status == StatusCode::UNAUTHORIZED =>
                {
                    None
                }
                Err(e) => {
                    tracing::warn!("Could not check the session: {e}");
                    None
                }
            };
            dispatch.reduce_mut(|state| state.restore_session(username));
        });
    });
}
