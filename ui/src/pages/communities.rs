use payloads::Choice;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

use crate::{Route, State, components::MarkdownText};

/// Communities created in this session, plus a way to open any community's
/// members page by its identifier.
#[function_component]
pub fn CommunitiesPage() -> Html {
    let (state, _) = use_store::<State>();
    let navigator = use_navigator();
    let id_ref = use_node_ref();

    let on_open = {
        let id_ref = id_ref.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let id = id_ref
                .cast::<HtmlInputElement>()
                .map(|input| input.value().trim().to_string())
                .unwrap_or_default();
            if let Some(navigator) = &navigator
                && !id.is_empty()
            {
                navigator.push(&Route::CommunityMembers { id });
            }
        })
    };

    html! {
        <div class="space-y-8">
            <div class="flex justify-between items-center">
                <h1 class="text-3xl font-bold text-neutral-900 dark:text-neutral-100">
                    {"Communities"}
                </h1>
                <Link<Route>
                    to={Route::CreateCommunity}
                    classes="py-2 px-4 rounded-md text-sm font-medium text-white bg-neutral-900 hover:bg-neutral-800 dark:bg-neutral-100 dark:text-neutral-900"
                >
                    {"Create Community"}
                </Link<Route>>
            </div>

            <form onsubmit={on_open} class="flex gap-3 max-w-md">
                <input
                    ref={id_ref}
                    type="text"
                    placeholder="Community identifier, e.g. biosyslit"
                    class="flex-1 px-3 py-2 border border-neutral-300 dark:border-neutral-600 rounded-md bg-white dark:bg-neutral-700"
                />
                <button
                    type="submit"
                    class="py-2 px-4 rounded-md text-sm border border-neutral-300 dark:border-neutral-600"
                >
                    {"Manage members"}
                </button>
            </form>

            if state.created_communities.is_empty() {
                <p class="text-neutral-600 dark:text-neutral-400">
                    {"You have not created any communities yet."}
                </p>
            } else {
                <div class="space-y-3">
                    {for state.created_communities.iter().map(|community| html! {
                        <div
                            key={community.id.to_string()}
                            class="bg-white dark:bg-neutral-800 p-4 rounded-lg border border-neutral-200 dark:border-neutral-700"
                        >
                            <div class="flex justify-between items-start">
                                <div>
                                    <p class="font-medium text-neutral-900 dark:text-neutral-100">
                                        {&community.title}
                                        <span class="ml-2 text-sm text-neutral-500">{community.id.to_string()}</span>
                                    </p>
                                    <p class="text-xs text-neutral-500 dark:text-neutral-400">
                                        {format!(
                                            "{} · {}",
                                            community.community_type.display(),
                                            community.visibility.display()
                                        )}
                                    </p>
                                </div>
                                <Link<Route>
                                    to={Route::CommunityMembers { id: community.id.to_string() }}
                                    classes="text-sm underline"
                                >
                                    {"Members"}
                                </Link<Route>>
                            </div>
                            <MarkdownText text={community.description.clone()} class="mt-2" />
                        </div>
                    })}
                </div>
            }
        </div>
    }
}
