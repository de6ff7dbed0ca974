use payloads::{
    ClientError, CommunityId, MembershipId, RequestAction, Role, requests,
};
use std::future::Future;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::{
    InviteForm, MembersTable, RejectedTable, RequestsTable,
};
use crate::{Route, get_api_client};
use crate::members::{Access, MembersAction, MembersPanel, MembersTab};

#[derive(Properties, PartialEq)]
pub struct Props {
    pub community_id: CommunityId,
}

/// Run one membership mutation and report the outcome to the panel. A
/// success re-fetches the active tab.
fn mutate<F>(
    panel: &UseReducerHandle<MembersPanel>,
    notice: &'static str,
    membership_id: Option<MembershipId>,
    request: F,
) where
    F: Future<Output = Result<(), ClientError>> + 'static,
{
    panel.dispatch(MembersAction::Submitting);
    let panel = panel.clone();
    yew::platform::spawn_local(async move {
        match request.await {
            Ok(()) => panel.dispatch(MembersAction::Succeeded {
                notice: notice.to_string(),
                membership_id,
            }),
            Err(e) => {
                log_failure("Membership update", &e);
                panel.dispatch(MembersAction::Failed(e.display_message()));
            }
        }
    });
}

fn log_failure(action: &str, error: &ClientError) {
    match error {
        ClientError::APIError(status, body) => {
            tracing::warn!(%status, %body, "{action} failed")
        }
        ClientError::Network(e) => tracing::error!("{action} failed: {e}"),
    }
}

#[function_component]
pub fn CommunityMembersPage(props: &Props) -> Html {
    let panel = {
        let community_id = props.community_id.clone();
        use_reducer(move || MembersPanel::new(community_id))
    };

    // Navigating between members pages reuses this component.
    {
        let panel = panel.clone();
        use_effect_with(props.community_id.clone(), move |community_id| {
            panel.dispatch(MembersAction::Open(community_id.clone()));
        });
    }

    // One listing request per fetch key: on mount, on every tab switch,
    // after every successful mutation and when the community changes.
    {
        let panel = panel.clone();
        use_effect_with(panel.fetch_key(), move |key| {
            let key = key.clone();
            yew::platform::spawn_local(async move {
                let result = get_api_client()
                    .get_memberships(
                        &key.community_id,
                        key.tab.status(),
                        key.tab.include_requests(),
                    )
                    .await;
                match result {
                    Ok(access) => {
                        panel.dispatch(MembersAction::Loaded { key, access })
                    }
                    Err(e) => {
                        log_failure("Loading memberships", &e);
                        panel.dispatch(MembersAction::LoadFailed {
                            key,
                            message: e.to_string(),
                        });
                    }
                }
            });
        });
    }

    let on_join = {
        let panel = panel.clone();
        let community_id = props.community_id.clone();
        Callback::from(move |_: MouseEvent| {
            let community_id = community_id.clone();
            mutate(&panel, "Join request sent", None, async move {
                get_api_client()
                    .request_membership(
                        &community_id,
                        &requests::CreateMembershipRequest::join(),
                    )
                    .await
            });
        })
    };

    let on_select_tab = {
        let panel = panel.clone();
        Callback::from(move |tab: MembersTab| {
            panel.dispatch(MembersAction::SelectTab(tab))
        })
    };

    let on_draft_role = {
        let panel = panel.clone();
        Callback::from(move |(membership_id, role): (MembershipId, Role)| {
            panel.dispatch(MembersAction::DraftRole(membership_id, role))
        })
    };

    let on_draft_message = {
        let panel = panel.clone();
        Callback::from(move |(membership_id, message): (MembershipId, String)| {
            panel.dispatch(MembersAction::DraftMessage(membership_id, message))
        })
    };

    let on_confirm_role = {
        let panel = panel.clone();
        let community_id = props.community_id.clone();
        Callback::from(move |(membership_id, role): (MembershipId, Role)| {
            let community_id = community_id.clone();
            mutate(&panel, "Role changed", Some(membership_id), async move {
                get_api_client()
                    .change_membership_role(
                        &community_id,
                        &membership_id,
                        &requests::ChangeRole { role },
                    )
                    .await
            });
        })
    };

    let on_resolve = {
        let panel = panel.clone();
        let community_id = props.community_id.clone();
        Callback::from(
            move |(membership_id, action): (MembershipId, RequestAction)| {
                let Some(membership) =
                    panel.rows().iter().find(|m| m.id == membership_id)
                else {
                    return;
                };
                let details = requests::ResolveRequest {
                    role: panel.role_for(membership),
                    message: Some(panel.message_for(&membership_id))
                        .filter(|message| !message.is_empty())
                        .map(str::to_string),
                };
                let notice = match action {
                    RequestAction::Accept => "Request accepted",
                    RequestAction::Reject => "Request rejected",
                };
                let community_id = community_id.clone();
                mutate(&panel, notice, Some(membership_id), async move {
                    get_api_client()
                        .resolve_request(
                            &community_id,
                            &membership_id,
                            action,
                            &details,
                        )
                        .await
                });
            },
        )
    };

    let on_remove = {
        let panel = panel.clone();
        let community_id = props.community_id.clone();
        Callback::from(move |membership_id: MembershipId| {
            let community_id = community_id.clone();
            mutate(&panel, "Membership removed", Some(membership_id), async move {
                get_api_client()
                    .remove_membership(&community_id, &membership_id)
                    .await
            });
        })
    };

    let on_invited = {
        let panel = panel.clone();
        Callback::from(move |notice: String| {
            panel.dispatch(MembersAction::Succeeded {
                notice,
                membership_id: None,
            })
        })
    };

    let on_dismiss_notice = {
        let panel = panel.clone();
        Callback::from(move |_: MouseEvent| {
            panel.dispatch(MembersAction::DismissNotice)
        })
    };

    let header = html! {
        <div class="mb-6">
            <h1 class="text-3xl font-bold text-neutral-900 dark:text-neutral-100">
                {props.community_id.to_string()}
            </h1>
            <p class="text-neutral-600 dark:text-neutral-400 mt-2">{"Members"}</p>
        </div>
    };

    let messages = html! {
        <>
            if let Some(error) = &panel.error {
                <div class="mb-4 p-4 rounded-md bg-red-50 dark:bg-red-900/20 border border-red-200 dark:border-red-800">
                    <p class="text-sm text-red-700 dark:text-red-400">{error}</p>
                </div>
            }
            if let Some(notice) = &panel.notice {
                <div class="mb-4 p-4 rounded-md bg-green-50 dark:bg-green-900/20 border border-green-200 dark:border-green-800 flex justify-between">
                    <p class="text-sm text-green-700 dark:text-green-400">{notice}</p>
                    <button onclick={on_dismiss_notice} class="text-sm text-green-700 dark:text-green-400">
                        {"Dismiss"}
                    </button>
                </div>
            }
        </>
    };

    if panel.memberships.is_none() && panel.access != Access::Granted {
        let body = match panel.access {
            Access::Denied => html! {
                <div class="text-center py-12 space-y-4">
                    <p class="text-neutral-600 dark:text-neutral-400">
                        {"You are not managing this community."}
                    </p>
                    <button
                        onclick={on_join}
                        disabled={panel.loading}
                        class="py-2 px-4 rounded-md text-sm font-medium text-white bg-neutral-900 hover:bg-neutral-800 dark:bg-neutral-100 dark:text-neutral-900 disabled:opacity-50"
                    >
                        {"Join this community"}
                    </button>
                    <p class="text-sm text-neutral-500 dark:text-neutral-400">
                        {"Invited? Answer it from "}
                        <Link<Route> to={Route::Invitations} classes="underline">
                            {"your invitations"}
                        </Link<Route>>
                        {"."}
                    </p>
                </div>
            },
            _ => html! {
                <div class="text-center py-12">
                    <p class="text-neutral-600 dark:text-neutral-400">{"Loading members..."}</p>
                </div>
            },
        };
        return html! {
            <div>
                {header}
                {messages}
                {body}
            </div>
        };
    }

    let rows = panel.rows().to_vec();
    let busy = panel.loading;
    let table = match (&panel.memberships, panel.tab) {
        (None, _) => html! {
            <div class="text-center py-12">
                <p class="text-neutral-600 dark:text-neutral-400">{"Loading members..."}</p>
            </div>
        },
        (Some(_), MembersTab::Members) => html! {
            <MembersTable
                {rows}
                role_drafts={panel.role_drafts.clone()}
                {busy}
                {on_draft_role}
                {on_confirm_role}
                {on_remove}
            />
        },
        (Some(_), MembersTab::Requests) => html! {
            <>
                <InviteForm
                    community_id={props.community_id.clone()}
                    {on_invited}
                />
                <RequestsTable
                    {rows}
                    role_drafts={panel.role_drafts.clone()}
                    message_drafts={panel.message_drafts.clone()}
                    {busy}
                    {on_draft_role}
                    {on_draft_message}
                    {on_resolve}
                    {on_remove}
                />
            </>
        },
        (Some(_), MembersTab::Rejected) => html! { <RejectedTable {rows} /> },
    };

    html! {
        <div>
            {header}
            <div class="border-b border-neutral-200 dark:border-neutral-700 mb-6">
                <nav class="-mb-px flex space-x-8">
                    {for MembersTab::ALL.iter().map(|tab| {
                        let tab = *tab;
                        let onclick = on_select_tab.reform(move |_: MouseEvent| tab);
                        html! {
                            <button
                                {onclick}
                                class={classes!(
                                    "py-2", "px-1", "border-b-2", "font-medium", "text-sm",
                                    if tab == panel.tab {
                                        "border-neutral-500 text-neutral-600 dark:text-neutral-400"
                                    } else {
                                        "border-transparent text-neutral-500 hover:text-neutral-700 hover:border-neutral-300 dark:text-neutral-400 dark:hover:text-neutral-300"
                                    }
                                )}
                            >
                                {tab.label()}
                            </button>
                        }
                    })}
                </nav>
            </div>
            {messages}
            <div class="overflow-x-auto">
                {table}
            </div>
        </div>
    }
}
