use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ToastProps {
    pub message: Option<String>,
}

/// Transient feedback banner shown after save/block actions.
#[function_component(Toast)]
pub fn toast(props: &ToastProps) -> Html {
    match &props.message {
        Some(message) => html! {
            <div class="toast">{message}</div>
        },
        None => html! {},
    }
}
