use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::{FieldWrapper, input_classes};
use crate::forms::FieldHandle;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub label: AttrValue,
    pub field: FieldHandle,
    #[prop_or_default]
    pub placeholder: AttrValue,
    #[prop_or(AttrValue::Static("text"))]
    pub input_type: AttrValue,
    #[prop_or_default]
    pub disabled: bool,
}

/// Single line text field. Typing updates the value, leaving the input
/// marks the field as touched.
#[function_component]
pub fn TextInput(props: &Props) -> Html {
    let on_input = {
        let on_change = props.field.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_change.emit(input.value());
        })
    };
    let on_blur = props.field.on_blur.reform(|_: FocusEvent| ());

    html! {
        <FieldWrapper label={props.label.clone()} field={props.field.clone()}>
            <input
                type={props.input_type.clone()}
                id={format!("field-{}", props.field.name)}
                name={props.field.name.clone()}
                value={props.field.value.clone()}
                placeholder={props.placeholder.clone()}
                disabled={props.disabled}
                oninput={on_input}
                onblur={on_blur}
                class={input_classes(&props.field)}
            />
        </FieldWrapper>
    }
}
