//! Markdown editor with preview.

use web_sys::HtmlTextAreaElement;
use yew::prelude::*;

use super::{FieldWrapper, MarkdownText, input_classes};
use crate::forms::FieldHandle;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub label: AttrValue,
    pub field: FieldHandle,
    #[prop_or_default]
    pub placeholder: AttrValue,
    /// Shown under the editor as a character count, when set.
    #[prop_or_default]
    pub max_length: Option<usize>,
    #[prop_or_default]
    pub disabled: bool,
}

#[function_component]
pub fn RichInput(props: &Props) -> Html {
    let show_preview = use_state(|| false);

    let on_input = {
        let on_change = props.field.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let textarea: HtmlTextAreaElement = e.target_unchecked_into();
            on_change.emit(textarea.value());
        })
    };
    let on_blur = props.field.on_blur.reform(|_: FocusEvent| ());

    let on_toggle_preview = {
        let show_preview = show_preview.clone();
        Callback::from(move |_: MouseEvent| show_preview.set(!*show_preview))
    };

    let char_count = props.field.value.chars().count();
    let char_count_class = match props.max_length {
        Some(max) if char_count > max => {
            "text-xs tabular-nums text-red-600 dark:text-red-400"
        }
        _ => "text-xs tabular-nums text-neutral-500 dark:text-neutral-400",
    };

    html! {
        <FieldWrapper label={props.label.clone()} field={props.field.clone()}>
            <div class="space-y-2">
                <div class={classes!(
                    "grid", "gap-4",
                    if *show_preview { "md:grid-cols-2" } else { "grid-cols-1" }
                )}>
                    <textarea
                        id={format!("field-{}", props.field.name)}
                        name={props.field.name.clone()}
                        value={props.field.value.clone()}
                        placeholder={props.placeholder.clone()}
                        disabled={props.disabled}
                        oninput={on_input}
                        onblur={on_blur}
                        class={classes!(
                            input_classes(&props.field),
                            "h-32", "font-mono", "text-sm", "resize-y"
                        )}
                    />
                    if *show_preview {
                        <div class="border border-neutral-300 dark:border-neutral-600
                                    rounded-md p-3 bg-white dark:bg-neutral-800
                                    overflow-auto h-32">
                            if props.field.value.is_empty() {
                                <p class="text-sm text-neutral-400 dark:text-neutral-500 italic">
                                    {"Preview will appear here..."}
                                </p>
                            } else {
                                <MarkdownText text={props.field.value.clone()} />
                            }
                        </div>
                    }
                </div>
                <div class="flex justify-between items-center">
                    <button
                        type="button"
                        onclick={on_toggle_preview}
                        class="text-xs font-medium text-neutral-600 dark:text-neutral-400
                               hover:text-neutral-900 dark:hover:text-neutral-100"
                    >
                        {if *show_preview { "Hide Preview" } else { "Show Preview" }}
                    </button>
                    if let Some(max) = props.max_length {
                        <p class={char_count_class}>
                            {format!("{char_count} / {max}")}
                        </p>
                    }
                </div>
            </div>
        </FieldWrapper>
    }
}
