//! One table per members page tab.

use payloads::{
    MembershipId, RequestAction, RequestType, Role, responses::Membership,
};
use std::collections::HashMap;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::{MarkdownText, RoleSelect};

const TABLE_CLASSES: &str =
    "min-w-full divide-y divide-neutral-200 dark:divide-neutral-700";
const HEADER_CLASSES: &str = "px-4 py-2 text-left text-xs font-medium \
     uppercase tracking-wider text-neutral-500 dark:text-neutral-400";
const CELL_CLASSES: &str =
    "px-4 py-3 text-sm text-neutral-900 dark:text-neutral-100 align-top";
const PRIMARY_BUTTON: &str = "px-3 py-1 text-sm rounded bg-neutral-900 \
     hover:bg-neutral-800 dark:bg-neutral-100 dark:hover:bg-neutral-200 \
     text-white dark:text-neutral-900 disabled:opacity-50";
const SECONDARY_BUTTON: &str = "px-3 py-1 text-sm rounded bg-neutral-200 \
     hover:bg-neutral-300 dark:bg-neutral-700 dark:hover:bg-neutral-600 \
     text-neutral-900 dark:text-neutral-100 disabled:opacity-50";
const DANGER_BUTTON: &str = "px-3 py-1 text-sm rounded text-red-700 \
     dark:text-red-400 border border-red-300 dark:border-red-800 \
     hover:bg-red-50 dark:hover:bg-red-900/20 disabled:opacity-50";

fn role_of(
    drafts: &HashMap<MembershipId, Role>,
    membership: &Membership,
) -> Role {
    drafts.get(&membership.id).copied().unwrap_or(membership.role)
}

fn empty_row(columns: usize, text: &'static str) -> Html {
    html! {
        <tr>
            <td colspan={columns.to_string()} class="px-4 py-8 text-center text-sm text-neutral-500 dark:text-neutral-400">
                {text}
            </td>
        </tr>
    }
}

fn comments(membership: &Membership) -> Html {
    let comments = membership.comments();
    if comments.is_empty() {
        return html! {
            <span class="text-neutral-400 dark:text-neutral-500">{"-"}</span>
        };
    }
    html! {
        <ul class="space-y-1">
            {for comments.iter().map(|comment| html! {
                <li><MarkdownText text={comment.message.clone()} /></li>
            })}
        </ul>
    }
}

#[derive(Properties, PartialEq)]
pub struct MembersTableProps {
    pub rows: Vec<Membership>,
    pub role_drafts: HashMap<MembershipId, Role>,
    pub busy: bool,
    pub on_draft_role: Callback<(MembershipId, Role)>,
    pub on_confirm_role: Callback<(MembershipId, Role)>,
    pub on_remove: Callback<MembershipId>,
}

/// Accepted members with a role select, confirm and remove buttons.
#[function_component]
pub fn MembersTable(props: &MembersTableProps) -> Html {
    html! {
        <table class={TABLE_CLASSES}>
            <thead>
                <tr>
                    <th class={HEADER_CLASSES}>{"Member"}</th>
                    <th class={HEADER_CLASSES}>{"Role"}</th>
                    <th class={HEADER_CLASSES}></th>
                </tr>
            </thead>
            <tbody class="divide-y divide-neutral-200 dark:divide-neutral-700">
                if props.rows.is_empty() {
                    {empty_row(3, "No members found in this community.")}
                }
                {for props.rows.iter().map(|membership| {
                    let id = membership.id;
                    let role = role_of(&props.role_drafts, membership);
                    let on_role = props.on_draft_role.reform(move |role: Role| (id, role));
                    let on_confirm =
                        props.on_confirm_role.reform(move |_: MouseEvent| (id, role));
                    let on_remove = props.on_remove.reform(move |_: MouseEvent| id);
                    html! {
                        <tr key={id.to_string()}>
                            <td class={CELL_CLASSES}>{membership.display_name()}</td>
                            <td class={CELL_CLASSES}>
                                <RoleSelect value={role} on_change={on_role} disabled={props.busy} />
                            </td>
                            <td class={classes!(CELL_CLASSES, "space-x-2", "text-right")}>
                                <button
                                    onclick={on_confirm}
                                    disabled={props.busy || role == membership.role}
                                    class={PRIMARY_BUTTON}
                                >
                                    {"Change Role"}
                                </button>
                                <button onclick={on_remove} disabled={props.busy} class={DANGER_BUTTON}>
                                    {"Remove"}
                                </button>
                            </td>
                        </tr>
                    }
                })}
            </tbody>
        </table>
    }
}

#[derive(Properties, PartialEq)]
pub struct RequestsTableProps {
    pub rows: Vec<Membership>,
    pub role_drafts: HashMap<MembershipId, Role>,
    pub message_drafts: HashMap<MembershipId, String>,
    pub busy: bool,
    pub on_draft_role: Callback<(MembershipId, Role)>,
    pub on_draft_message: Callback<(MembershipId, String)>,
    pub on_resolve: Callback<(MembershipId, RequestAction)>,
    pub on_remove: Callback<MembershipId>,
}

/// Pending join requests and invitations.
///
/// Join requests are accepted or rejected here with the chosen role and an
/// optional comment. Invitations wait for the invitee, so they can only be
/// revoked.
#[function_component]
pub fn RequestsTable(props: &RequestsTableProps) -> Html {
    html! {
        <table class={TABLE_CLASSES}>
            <thead>
                <tr>
                    <th class={HEADER_CLASSES}>{"User"}</th>
                    <th class={HEADER_CLASSES}>{"Role"}</th>
                    <th class={HEADER_CLASSES}>{"Type"}</th>
                    <th class={HEADER_CLASSES}>{"Comments"}</th>
                    <th class={HEADER_CLASSES}></th>
                </tr>
            </thead>
            <tbody class="divide-y divide-neutral-200 dark:divide-neutral-700">
                if props.rows.is_empty() {
                    {empty_row(5, "No pending requests.")}
                }
                {for props.rows.iter().map(|membership| {
                    let id = membership.id;
                    let request_type = membership
                        .request
                        .as_ref()
                        .map(|request| request.request_type)
                        .unwrap_or(RequestType::Request);
                    let on_role = props.on_draft_role.reform(move |role: Role| (id, role));
                    let on_message = props.on_draft_message.reform(move |e: InputEvent| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        (id, input.value())
                    });
                    let on_accept = props
                        .on_resolve
                        .reform(move |_: MouseEvent| (id, RequestAction::Accept));
                    let on_reject = props
                        .on_resolve
                        .reform(move |_: MouseEvent| (id, RequestAction::Reject));
                    let on_revoke = props.on_remove.reform(move |_: MouseEvent| id);
                    let message = props.message_drafts.get(&id).cloned().unwrap_or_default();
                    html! {
                        <tr key={id.to_string()}>
                            <td class={CELL_CLASSES}>{membership.display_name()}</td>
                            <td class={CELL_CLASSES}>
                                <RoleSelect
                                    value={role_of(&props.role_drafts, membership)}
                                    on_change={on_role}
                                    disabled={props.busy || request_type == RequestType::Invitation}
                                />
                            </td>
                            <td class={CELL_CLASSES}>{request_type.to_string()}</td>
                            <td class={CELL_CLASSES}>{comments(membership)}</td>
                            <td class={classes!(CELL_CLASSES, "space-y-2", "text-right")}>
                                {match request_type {
                                    RequestType::Request => html! {
                                        <>
                                            <input
                                                type="text"
                                                value={message}
                                                oninput={on_message}
                                                disabled={props.busy}
                                                placeholder="Comment (optional)"
                                                class="w-full px-2 py-1 text-sm border border-neutral-300 dark:border-neutral-600 rounded-md bg-white dark:bg-neutral-700"
                                            />
                                            <div class="space-x-2">
                                                <button onclick={on_accept} disabled={props.busy} class={PRIMARY_BUTTON}>
                                                    {"Accept"}
                                                </button>
                                                <button onclick={on_reject} disabled={props.busy} class={SECONDARY_BUTTON}>
                                                    {"Reject"}
                                                </button>
                                            </div>
                                        </>
                                    },
                                    RequestType::Invitation => html! {
                                        <button onclick={on_revoke} disabled={props.busy} class={DANGER_BUTTON}>
                                            {"Revoke invitation"}
                                        </button>
                                    },
                                }}
                            </td>
                        </tr>
                    }
                })}
            </tbody>
        </table>
    }
}

#[derive(Properties, PartialEq)]
pub struct RejectedTableProps {
    pub rows: Vec<Membership>,
}

#[function_component]
pub fn RejectedTable(props: &RejectedTableProps) -> Html {
    html! {
        <table class={TABLE_CLASSES}>
            <thead>
                <tr>
                    <th class={HEADER_CLASSES}>{"User"}</th>
                    <th class={HEADER_CLASSES}>{"Comments"}</th>
                </tr>
            </thead>
            <tbody class="divide-y divide-neutral-200 dark:divide-neutral-700">
                if props.rows.is_empty() {
                    {empty_row(2, "No rejected requests.")}
                }
                {for props.rows.iter().map(|membership| html! {
                    <tr key={membership.id.to_string()}>
                        <td class={CELL_CLASSES}>{membership.display_name()}</td>
                        <td class={CELL_CLASSES}>{comments(membership)}</td>
                    </tr>
                })}
            </tbody>
        </table>
    }
}
