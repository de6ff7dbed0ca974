use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

use crate::{AuthState, Route, State};

#[function_component]
pub fn Header() -> Html {
    let (state, dispatch) = use_store::<State>();
    let navigator = use_navigator();

    let on_logout = {
        let dispatch = dispatch.clone();
        Callback::from(move |_: MouseEvent| {
            let dispatch = dispatch.clone();
            let navigator = navigator.clone();
            yew::platform::spawn_local(async move {
                if let Err(e) = crate::get_api_client().logout().await {
                    tracing::warn!("Logout failed: {e}");
                }
                dispatch.reduce_mut(|state| state.logout());
                if let Some(navigator) = navigator {
                    navigator.push(&Route::Login);
                }
            });
        })
    };

    html! {
        <header class="bg-white dark:bg-neutral-800 border-b border-neutral-200 dark:border-neutral-700">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between items-center h-16">
                    <div class="flex items-center space-x-6">
                        <Link<Route> to={Route::Communities} classes="text-xl font-semibold text-neutral-900 dark:text-white">
                            {"Communities"}
                        </Link<Route>>
                        <Link<Route> to={Route::CreateCommunity} classes="text-sm text-neutral-600 hover:text-neutral-900 dark:text-neutral-400 dark:hover:text-neutral-100">
                            {"New community"}
                        </Link<Route>>
                    </div>
                    <div class="flex items-center space-x-4 text-sm">
                        {match &state.auth_state {
                            AuthState::LoggedIn(username) => html! {
                                <>
                                    <Link<Route> to={Route::Invitations} classes="text-neutral-600 hover:text-neutral-900 dark:text-neutral-400 dark:hover:text-neutral-100">
                                        {"Invitations"}
                                    </Link<Route>>
                                    <span class="text-neutral-600 dark:text-neutral-400">{username}</span>
                                    <button
                                        onclick={on_logout}
                                        class="text-neutral-600 hover:text-neutral-900 dark:text-neutral-400 dark:hover:text-neutral-100"
                                    >
                                        {"Log out"}
                                    </button>
                                </>
                            },
                            // nothing until the session check has answered
                            AuthState::Unknown => html! {},
                            AuthState::LoggedOut => html! {
                                <Link<Route> to={Route::Login} classes="text-neutral-600 hover:text-neutral-900 dark:text-neutral-400 dark:hover:text-neutral-100">
                                    {"Log in"}
                                </Link<Route>>
                            },
                        }}
                    </div>
                </div>
            </div>
        </header>
    }
}
