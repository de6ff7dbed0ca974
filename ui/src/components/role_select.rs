use payloads::{Choice, Role};
use web_sys::HtmlSelectElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub value: Role,
    pub on_change: Callback<Role>,
    #[prop_or_default]
    pub disabled: bool,
}

#[function_component]
pub fn RoleSelect(props: &Props) -> Html {
    let on_change = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let target = e.target_dyn_into::<HtmlSelectElement>();
            if let Some(select) = target
                && let Ok(role) = select.value().parse::<Role>()
            {
                on_change.emit(role);
            }
        })
    };

    html! {
        <select
            onchange={on_change}
            disabled={props.disabled}
            class="px-2 py-1 border border-neutral-300 dark:border-neutral-600 \
                   rounded-md bg-white dark:bg-neutral-700 text-sm \
                   text-neutral-900 dark:text-neutral-100 \
                   focus:outline-none focus:ring-2 focus:ring-neutral-500 \
                   disabled:opacity-50"
        >
            {for Role::ALL.iter().map(|role| html! {
                <option value={role.id()} selected={*role == props.value}>
                    {role.display()}
                </option>
            })}
        </select>
    }
}
