use payloads::{ClientError, requests};
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

use crate::{AuthState, Route, State};

/// Username-only login against the development api.
#[function_component]
pub fn LoginPage() -> Html {
    let navigator = use_navigator();
    let (_state, dispatch) = use_store::<State>();

    let username_ref = use_node_ref();
    let error_message = use_state(|| None::<String>);
    let is_loading = use_state(|| false);

    let on_submit = {
        let username_ref = username_ref.clone();
        let error_message = error_message.clone();
        let is_loading = is_loading.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let username = username_ref
                .cast::<HtmlInputElement>()
                .map(|input| input.value().trim().to_string())
                .unwrap_or_default();
            if username.is_empty() {
                error_message.set(Some("Please enter a username".to_string()));
                return;
            }

            let error_message = error_message.clone();
            let is_loading = is_loading.clone();
            let dispatch = dispatch.clone();
            let navigator = navigator.clone();

            yew::platform::spawn_local(async move {
                is_loading.set(true);
                error_message.set(None);

                let credentials = requests::LoginCredentials {
                    username: username.clone(),
                };
                match crate::get_api_client().login(&credentials).await {
                    Ok(()) => {
                        tracing::info!("Logged in as {username}");
                        dispatch.reduce_mut(|state| {
                            state.auth_state = AuthState::LoggedIn(username);
                        });
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::Communities);
                        }
                    }
                    Err(ClientError::APIError(_, _)) => {
                        dispatch.reduce_mut(|state| state.logout());
                        error_message.set(Some("Unknown user".to_string()));
                    }
                    Err(ClientError::Network(e)) => {
                        tracing::error!("Login failed: {e}");
                        error_message.set(Some(
                            "Network error. Please check your connection."
                                .to_string(),
                        ));
                    }
                }

                is_loading.set(false);
            });
        })
    };

    html! {
        <div class="flex items-center justify-center min-h-[60vh]">
            <div class="max-w-md w-full bg-white dark:bg-neutral-800 p-8 rounded-lg shadow-md">
                <div class="mb-8 text-center">
                    <h1 class="text-2xl font-bold text-neutral-900 dark:text-neutral-100 mb-2">
                        {"Log in"}
                    </h1>
                    <p class="text-neutral-600 dark:text-neutral-400">
                        {"Development users: alice, bob, carol, dave"}
                    </p>
                </div>

                <form onsubmit={on_submit} class="space-y-6">
                    if let Some(error) = &*error_message {
                        <div class="p-4 rounded-md bg-red-50 dark:bg-red-900/20 border border-red-200 dark:border-red-800">
                            <p class="text-sm text-red-700 dark:text-red-400">{error}</p>
                        </div>
                    }

                    <div>
                        <label for="username" class="block text-sm font-medium text-neutral-700 dark:text-neutral-300 mb-2">
                            {"Username"}
                        </label>
                        <input
                            ref={username_ref}
                            type="text"
                            id="username"
                            name="username"
                            required={true}
                            class="w-full px-3 py-2 border border-neutral-300 dark:border-neutral-600
                                   rounded-md shadow-sm bg-white dark:bg-neutral-700
                                   text-neutral-900 dark:text-neutral-100
                                   focus:outline-none focus:ring-2 focus:ring-neutral-500 focus:border-neutral-500"
                            placeholder="alice"
                        />
                    </div>

                    <button
                        type="submit"
                        disabled={*is_loading}
                        class="w-full flex justify-center py-2 px-4 border border-transparent
                               rounded-md shadow-sm text-sm font-medium text-white
                               bg-neutral-900 hover:bg-neutral-800
                               dark:bg-neutral-100 dark:text-neutral-900 dark:hover:bg-neutral-200
                               disabled:opacity-50 disabled:cursor-not-allowed"
                    >
                        if *is_loading {
                            {"Logging in..."}
                        } else {
                            {"Log in"}
                        }
                    </button>
                </form>
            </div>
        </div>
    }
}
