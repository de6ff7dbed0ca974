//! Pages where an invitee answers the invitations addressed to them.

use payloads::{
    ClientError, MembershipId, RequestAction, requests, responses::Invitation,
};
use reqwest::StatusCode;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;
use crate::components::InvitationCard;
use crate::forms::SubmitGuard;
use crate::get_api_client;

/// Accept or decline. The offered role is kept either way.
async fn respond(
    invitation: &Invitation,
    action: RequestAction,
) -> Result<String, ClientError> {
    get_api_client()
        .resolve_request(
            &invitation.community_id,
            &invitation.membership_id,
            action,
            &requests::ResolveRequest {
                role: invitation.role,
                message: None,
            },
        )
        .await?;
    Ok(match action {
        RequestAction::Accept => {
            format!("You joined {}", invitation.community_title)
        }
        RequestAction::Reject => {
            format!("Invitation to {} declined", invitation.community_title)
        }
    })
}

fn load_error(error: &ClientError) -> String {
    if let ClientError::APIError(status, _) = error {
        if *status == StatusCode::UNAUTHORIZED {
            return "Log in to see your invitations.".to_string();
        }
        if *status == StatusCode::NOT_FOUND {
            return "No invitation addressed to you was found.".to_string();
        }
    }
    error.display_message()
}

fn error_box(error: &str) -> Html {
    html! {
        <div class="mb-4 p-4 rounded-md bg-red-50 dark:bg-red-900/20 border border-red-200 dark:border-red-800">
            <p class="text-sm text-red-700 dark:text-red-400">{error}</p>
        </div>
    }
}

fn notice_box(notice: &str) -> Html {
    html! {
        <div class="mb-4 p-4 rounded-md bg-green-50 dark:bg-green-900/20 border border-green-200 dark:border-green-800">
            <p class="text-sm text-green-700 dark:text-green-400">{notice}</p>
        </div>
    }
}

/// Every pending invitation for the logged in user.
#[function_component]
pub fn InvitationsPage() -> Html {
    let invitations = use_state(|| None::<Vec<Invitation>>);
    let error = use_state(|| None::<String>);
    let notice = use_state(|| None::<String>);
    let busy = use_state(|| false);
    let guard = use_memo((), |_| SubmitGuard::default());
    let generation = use_state(|| 0u32);

    {
        let invitations = invitations.clone();
        let error = error.clone();
        use_effect_with(*generation, move |_| {
            yew::platform::spawn_local(async move {
                match get_api_client().get_received_invitations().await {
                    Ok(received) => invitations.set(Some(received)),
                    Err(e) => {
                        tracing::warn!("Loading invitations failed: {e}");
                        error.set(Some(load_error(&e)));
                    }
                }
            });
        });
    }

    let on_respond = {
        let error = error.clone();
        let notice = notice.clone();
        let busy = busy.clone();
        let generation = generation.clone();
        Callback::from(move |response: (Invitation, RequestAction)| {
            let (invitation, action) = response;
            if !guard.try_begin() {
                return;
            }
            busy.set(true);
            error.set(None);
            notice.set(None);
            let error = error.clone();
            let notice = notice.clone();
            let busy = busy.clone();
            let generation = generation.clone();
            let guard = guard.clone();
            yew::platform::spawn_local(async move {
                match respond(&invitation, action).await {
                    Ok(message) => {
                        notice.set(Some(message));
                        generation.set(*generation + 1);
                    }
                    Err(e) => {
                        tracing::warn!("Answering invitation failed: {e}");
                        error.set(Some(e.display_message()));
                    }
                }
                guard.finish();
                busy.set(false);
            });
        })
    };

    let body = match &*invitations {
        None if error.is_none() => html! {
            <p class="text-neutral-600 dark:text-neutral-400">{"Loading invitations..."}</p>
        },
        None => html! {},
        Some(list) if list.is_empty() => html! {
            <p class="text-neutral-600 dark:text-neutral-400">{"No pending invitations."}</p>
        },
        Some(list) => html! {
            <div class="space-y-4">
                {for list.iter().map(|invitation| {
                    let on_respond = {
                        let invitation = invitation.clone();
                        on_respond.reform(move |action: RequestAction| {
                            (invitation.clone(), action)
                        })
                    };
                    html! {
                        <InvitationCard
                            key={invitation.membership_id.to_string()}
                            invitation={invitation.clone()}
                            busy={*busy}
                            {on_respond}
                        />
                    }
                })}
            </div>
        },
    };

    html! {
        <div class="max-w-2xl mx-auto">
            <h1 class="text-3xl font-bold text-neutral-900 dark:text-neutral-100 mb-6">
                {"Invitations"}
            </h1>
            if let Some(error) = &*error {
                {error_box(error)}
            }
            if let Some(notice) = &*notice {
                {notice_box(notice)}
            }
            {body}
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct InvitationProps {
    pub membership_id: MembershipId,
}

/// A single invitation, reached from a link sent to the invitee.
#[function_component]
pub fn InvitationPage(props: &InvitationProps) -> Html {
    let invitation = use_state(|| None::<Invitation>);
    let error = use_state(|| None::<String>);
    let answer = use_state(|| None::<String>);
    let busy = use_state(|| false);
    let guard = use_memo((), |_| SubmitGuard::default());

    {
        let invitation = invitation.clone();
        let error = error.clone();
        use_effect_with(props.membership_id, move |membership_id| {
            let membership_id = *membership_id;
            yew::platform::spawn_local(async move {
                match get_api_client().get_invitation(&membership_id).await {
                    Ok(found) => invitation.set(Some(found)),
                    Err(e) => {
                        tracing::warn!("Loading invitation failed: {e}");
                        error.set(Some(load_error(&e)));
                    }
                }
            });
        });
    }

    let on_respond = {
        let invitation = invitation.clone();
        let error = error.clone();
        let answer = answer.clone();
        let busy = busy.clone();
        Callback::from(move |action: RequestAction| {
            let Some(current) = (*invitation).clone() else {
                return;
            };
            if !guard.try_begin() {
                return;
            }
            busy.set(true);
            error.set(None);
            let error = error.clone();
            let answer = answer.clone();
            let busy = busy.clone();
            let guard = guard.clone();
            yew::platform::spawn_local(async move {
                match respond(&current, action).await {
                    Ok(message) => answer.set(Some(message)),
                    Err(e) => {
                        tracing::warn!("Answering invitation failed: {e}");
                        error.set(Some(e.display_message()));
                    }
                }
                guard.finish();
                busy.set(false);
            });
        })
    };

    let body = match (&*answer, &*invitation) {
        (Some(message), _) => html! {
            <>
                {notice_box(message)}
                <Link<Route> to={Route::Invitations} classes="text-sm underline">
                    {"Back to your invitations"}
                </Link<Route>>
            </>
        },
        (None, Some(invitation)) => html! {
            <InvitationCard
                invitation={invitation.clone()}
                busy={*busy}
                {on_respond}
            />
        },
        (None, None) if error.is_none() => html! {
            <p class="text-neutral-600 dark:text-neutral-400">{"Loading invitation..."}</p>
        },
        (None, None) => html! {},
    };

    html! {
        <div class="max-w-2xl mx-auto">
            <h1 class="text-3xl font-bold text-neutral-900 dark:text-neutral-100 mb-6">
                {"Community invitation"}
            </h1>
            if let Some(error) = &*error {
                {error_box(error)}
            }
            {body}
        </div>
    }
}
