use payloads::Choice;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use super::{FieldWrapper, input_classes};
use crate::forms::FieldHandle;

/// `(value, label)` pairs for every variant of a choice enum.
pub fn choices<C: Choice>() -> Vec<(AttrValue, AttrValue)> {
    C::ALL
        .iter()
        .map(|choice| {
            (
                AttrValue::Static(choice.id()),
                AttrValue::Static(choice.display()),
            )
        })
        .collect()
}

#[derive(Properties, PartialEq)]
pub struct Props {
    pub label: AttrValue,
    pub field: FieldHandle,
    pub choices: Vec<(AttrValue, AttrValue)>,
    #[prop_or_default]
    pub disabled: bool,
}

/// Picking an option sets the value and touches the field in one go.
#[function_component]
pub fn SelectInput(props: &Props) -> Html {
    let on_change = {
        let field = props.field.clone();
        Callback::from(move |e: Event| {
            if let Some(select) = e.target_dyn_into::<HtmlSelectElement>() {
                field.on_change.emit(select.value());
                field.on_blur.emit(());
            }
        })
    };

    html! {
        <FieldWrapper label={props.label.clone()} field={props.field.clone()}>
            <select
                id={format!("field-{}", props.field.name)}
                name={props.field.name.clone()}
                disabled={props.disabled}
                onchange={on_change}
                class={input_classes(&props.field)}
            >
                {for props.choices.iter().map(|(value, label)| html! {
                    <option
                        value={value.clone()}
                        selected={*value == props.field.value}
                    >
                        {label}
                    </option>
                })}
            </select>
        </FieldWrapper>
    }
}
