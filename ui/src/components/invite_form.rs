use payloads::{
    ClientError, CommunityId, Role,
    requests::{InviteDraft, InviteField},
};
use yew::prelude::*;

use super::{SelectInput, TextInput, choices};
use crate::forms::{
    FieldHandle, FormAction, FormState, SubmitFailure, SubmitGuard,
    submit_failure,
};
use crate::get_api_client;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub community_id: CommunityId,
    /// Called with a notice once the invitation is sent.
    pub on_invited: Callback<String>,
}

/// Invite someone by email with an offered role. The invitee answers the
/// invitation themselves.
#[function_component]
pub fn InviteForm(props: &Props) -> Html {
    let form = use_reducer(FormState::<InviteDraft>::default);
    let error_message = use_state(|| None::<String>);
    let is_submitting = use_state(|| false);
    let guard = use_memo((), |_| SubmitGuard::default());

    let on_submit = {
        let form = form.clone();
        let error_message = error_message.clone();
        let is_submitting = is_submitting.clone();
        let community_id = props.community_id.clone();
        let on_invited = props.on_invited.clone();

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
            let community_id = community_id.clone();
            let on_invited = on_invited.clone();
            let guard = guard.clone();

            yew::platform::spawn_local(async move {
                let result = get_api_client()
                    .request_membership(&community_id, &request)
                    .await;
                match result {
                    Ok(()) => {
                        let email = request.email.unwrap_or_default();
                        tracing::info!("Invited {email} to {community_id}");
                        form.dispatch(FormAction::Reset);
                        on_invited.emit(format!("Invitation sent to {email}"));
                    }
                    Err(e) => {
                        if let ClientError::Network(e) = &e {
                            tracing::error!("Invitation failed: {e}");
                        }
                        match submit_failure::<InviteDraft>(&e) {
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

    let disabled = *is_submitting;

    html! {
        <form onsubmit={on_submit} class="mb-6 p-4 rounded-lg border border-neutral-200 dark:border-neutral-700 space-y-4">
            <h2 class="text-lg font-medium text-neutral-900 dark:text-neutral-100">
                {"Invite a member"}
            </h2>
            if let Some(error) = &*error_message {
                <div class="p-4 rounded-md bg-red-50 dark:bg-red-900/20 border border-red-200 dark:border-red-800">
                    <p class="text-sm text-red-700 dark:text-red-400">{error}</p>
                </div>
            }
            <div class="grid grid-cols-1 md:grid-cols-3 gap-4 items-start">
                <div class="md:col-span-2">
                    <TextInput
                        label="Email"
                        input_type="email"
                        placeholder="example@email.com"
                        field={FieldHandle::new(&form, InviteField::Email, "email")}
                        {disabled}
                    />
                </div>
                <SelectInput
                    label="Role"
                    choices={choices::<Role>()}
                    field={FieldHandle::new(&form, InviteField::Role, "role")}
                    {disabled}
                />
            </div>
            <button
                type="submit"
                disabled={!form.is_valid() || disabled}
                class="py-2 px-4 rounded-md text-sm font-medium text-white bg-neutral-900 hover:bg-neutral-800 dark:bg-neutral-100 dark:text-neutral-900 dark:hover:bg-neutral-200 disabled:opacity-50 disabled:cursor-not-allowed"
            >
                if disabled {
                    {"Sending..."}
                } else {
                    {"Send invitation"}
                }
            </button>
        </form>
    }
}
