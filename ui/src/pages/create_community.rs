use payloads::{
    ClientError, CommunityType, Visibility,
    requests::{
        COMMUNITY_DESCRIPTION_MAX_LEN, CommunityDraft, DraftField,
    },
};
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

use crate::components::{RichInput, SelectInput, TextInput, choices};
use crate::forms::{
    FieldHandle, FormAction, FormState, SubmitFailure, SubmitGuard,
    submit_failure,
};
use crate::{Route, State};

#[function_component]
pub fn CreateCommunityPage() -> Html {
    let navigator = use_navigator();
    let (_state, dispatch) = use_store::<State>();

    let form = use_reducer(FormState::<CommunityDraft>::default);
    let error_message = use_state(|| None::<String>);
    let is_submitting = use_state(|| false);
    let guard = use_memo((), |_| SubmitGuard::default());

    let on_submit = {
        let form = form.clone();
        let error_message = error_message.clone();
        let is_submitting = is_submitting.clone();
        let navigator = navigator.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            form.dispatch(FormAction::TouchAll);
            let request = match form.values().to_request() {
                Ok(request) if form.is_valid() => request,
                _ => return,
            };
            if !guard.try_begin() {
                return;
            }
            is_submitting.set(true);
            error_message.set(None);

            let form = form.clone();
            let error_message = error_message.clone();
            let is_submitting = is_submitting.clone();
            let navigator = navigator.clone();
            let dispatch = dispatch.clone();
            let guard = guard.clone();

            yew::platform::spawn_local(async move {
                let api_client = crate::get_api_client();
                match api_client.create_community(&request).await {
                    Ok(community) => {
                        tracing::info!("Created community {}", community.id);
                        dispatch.reduce_mut(|state| {
                            state.add_created_community(community)
                        });
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::Communities);
                        }
                    }
                    Err(e) => {
                        if let ClientError::Network(e) = &e {
                            tracing::error!("Community creation failed: {e}");
                        }
                        match submit_failure::<CommunityDraft>(&e) {
                            SubmitFailure::Fields(errors) => {
                                form.dispatch(FormAction::ServerErrors(errors))
                            }
                            SubmitFailure::Page(message) => {
                                error_message.set(Some(message))
                            }
                        }
                    }
                }

                guard.finish();
                is_submitting.set(false);
            });
        })
    };

    let on_cancel = Callback::from(move |_: MouseEvent| {
        if let Some(navigator) = &navigator {
            navigator.push(&Route::Communities);
        }
    });

    let disabled = *is_submitting;
    let can_submit = form.is_valid() && !*is_submitting;

    html! {
        <div class="flex items-center justify-center">
            <div class="max-w-2xl w-full bg-white dark:bg-neutral-800 p-8 rounded-lg shadow-md">
                <div class="mb-8 text-center">
                    <h1 class="text-2xl font-bold text-neutral-900 dark:text-neutral-100 mb-2">
                        {"Create New Community"}
                    </h1>
                    <p class="text-neutral-600 dark:text-neutral-400">
                        {"You will be the community's first administrator"}
                    </p>
                </div>

                <form onsubmit={on_submit} class="space-y-6">
                    if let Some(error) = &*error_message {
                        <div class="p-4 rounded-md bg-red-50 dark:bg-red-900/20 border border-red-200 dark:border-red-800">
                            <p class="text-sm text-red-700 dark:text-red-400">{error}</p>
                        </div>
                    }

                    <TextInput
                        label="Identifier"
                        placeholder="e.g. biosyslit"
                        field={FieldHandle::new(&form, DraftField::Id, "id")}
                        {disabled}
                    />
                    <TextInput
                        label="Community name"
                        placeholder="e.g. Biodiversity Literature Repository"
                        field={FieldHandle::new(&form, DraftField::Title, "title")}
                        {disabled}
                    />
                    <RichInput
                        label="Description"
                        placeholder="What is this community about? (supports Markdown)"
                        field={FieldHandle::new(&form, DraftField::Description, "description")}
                        max_length={COMMUNITY_DESCRIPTION_MAX_LEN}
                        {disabled}
                    />
                    <SelectInput
                        label="Type"
                        choices={choices::<CommunityType>()}
                        field={FieldHandle::new(&form, DraftField::Type, "type")}
                        {disabled}
                    />
                    <TextInput
                        label="Website"
                        input_type="url"
                        placeholder="https://"
                        field={FieldHandle::new(&form, DraftField::Website, "website")}
                        {disabled}
                    />
                    <SelectInput
                        label="Visibility"
                        choices={choices::<Visibility>()}
                        field={FieldHandle::new(&form, DraftField::Visibility, "visibility")}
                        {disabled}
                    />

                    <div class="flex space-x-3">
                        <button
                            type="button"
                            onclick={on_cancel}
                            disabled={*is_submitting}
                            class="flex-1 py-2 px-4 border border-neutral-300 dark:border-neutral-600
                                   rounded-md shadow-sm text-sm font-medium text-neutral-700 dark:text-neutral-300
                                   bg-white dark:bg-neutral-700 hover:bg-neutral-50 dark:hover:bg-neutral-600
                                   disabled:opacity-50 disabled:cursor-not-allowed
                                   transition-colors duration-200"
                        >
                            {"Cancel"}
                        </button>

                        <button
                            type="submit"
                            disabled={!can_submit}
                            class="flex-1 flex justify-center py-2 px-4 border border-transparent
                                   rounded-md shadow-sm text-sm font-medium text-white
                                   bg-neutral-900 hover:bg-neutral-800
                                   dark:bg-neutral-100 dark:text-neutral-900 dark:hover:bg-neutral-200
                                   disabled:opacity-50 disabled:cursor-not-allowed
                                   transition-colors duration-200"
                        >
                            if *is_submitting {
                                {"Creating..."}
                            } else {
                                {"Create Community"}
                            }
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
