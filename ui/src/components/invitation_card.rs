use payloads::{Choice, RequestAction, responses::Invitation};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub invitation: Invitation,
    pub busy: bool,
    pub on_respond: Callback<RequestAction>,
}

/// One invitation with accept and decline buttons. The offered role is
/// fixed by the administrator who sent it.
#[function_component]
pub fn InvitationCard(props: &Props) -> Html {
    let invitation = &props.invitation;
    let on_accept = props
        .on_respond
        .reform(|_: MouseEvent| RequestAction::Accept);
    let on_decline = props
        .on_respond
        .reform(|_: MouseEvent| RequestAction::Reject);

    html! {
        <div class="p-4 rounded-lg border border-neutral-200 dark:border-neutral-700 flex justify-between items-center">
            <div>
                <p class="font-medium text-neutral-900 dark:text-neutral-100">
                    {&invitation.community_title}
                </p>
                <p class="text-sm text-neutral-600 dark:text-neutral-400">
                    {format!("Invited as {}", invitation.role.display())}
                    {" · "}
                    <Link<Route>
                        to={Route::Invitation { id: invitation.membership_id.to_string() }}
                        classes="underline"
                    >
                        {invitation.community_id.to_string()}
                    </Link<Route>>
                </p>
            </div>
            <div class="space-x-2">
                <button
                    onclick={on_accept}
                    disabled={props.busy}
                    class="px-3 py-1 text-sm rounded bg-neutral-900 hover:bg-neutral-800 dark:bg-neutral-100 dark:hover:bg-neutral-200 text-white dark:text-neutral-900 disabled:opacity-50"
                >
                    {"Accept"}
                </button>
                <button
                    onclick={on_decline}
                    disabled={props.busy}
                    class="px-3 py-1 text-sm rounded bg-neutral-200 hover:bg-neutral-300 dark:bg-neutral-700 dark:hover:bg-neutral-600 text-neutral-900 dark:text-neutral-100 disabled:opacity-50"
                >
                    {"Decline"}
                </button>
            </div>
        </div>
    }
}
