pub mod invitation_card;
pub mod invite_form;
pub mod layout;
pub mod markdown_text;
pub mod membership_tables;
pub mod rich_input;
pub mod role_select;
pub mod select_input;
pub mod text_input;

pub use invitation_card::InvitationCard;
pub use invite_form::InviteForm;
pub use markdown_text::MarkdownText;
pub use membership_tables::{MembersTable, RejectedTable, RequestsTable};
pub use rich_input::RichInput;
pub use role_select::RoleSelect;
pub use select_input::{SelectInput, choices};
pub use text_input::TextInput;

use yew::prelude::*;

use crate::forms::FieldHandle;

const INPUT_CLASSES: &str = "w-full px-3 py-2 border rounded-md shadow-sm \
     bg-white dark:bg-neutral-700 text-neutral-900 dark:text-neutral-100 \
     focus:outline-none focus:ring-2 focus:ring-neutral-500 \
     focus:border-neutral-500 dark:focus:ring-neutral-400 \
     dark:focus:border-neutral-400";

/// Border colour of an input, red while the field shows an error.
fn input_classes(field: &FieldHandle) -> Classes {
    classes!(
        INPUT_CLASSES,
        if field.error.is_some() {
            "border-red-500 dark:border-red-500"
        } else {
            "border-neutral-300 dark:border-neutral-600"
        }
    )
}

/// Label, input and error text shared by every field component.
#[derive(Properties, PartialEq)]
struct FieldWrapperProps {
    pub label: AttrValue,
    pub field: FieldHandle,
    pub children: Html,
}

#[function_component]
fn FieldWrapper(props: &FieldWrapperProps) -> Html {
    let id = format!("field-{}", props.field.name);
    html! {
        <div class={classes!(props.field.error.is_some().then_some("has-error"))}>
            <label
                for={id}
                class="block text-sm font-medium text-neutral-700 dark:text-neutral-300 mb-2"
            >
                {&props.label}
            </label>
            {props.children.clone()}
            if let Some(error) = &props.field.error {
                <p class="mt-1 text-sm text-red-600 dark:text-red-400">{error}</p>
            }
        </div>
    }
}
