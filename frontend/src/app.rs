use shared::Role;
use yew::prelude::*;

use crate::components::SchedulePage;
use crate::services::api::ApiClient;

// Demo identity until the auth layer wires in the real session
const CURRENT_USER_ID: &str = "psych_demo";

#[function_component(App)]
pub fn app() -> Html {
    let api = use_memo((), |_| ApiClient::new());

    html! {
        <>
            <header class="header">
                <div class="container">
                    <h1>{"My Schedule"}</h1>
                </div>
            </header>

            <main class="main">
                <div class="container">
                    <SchedulePage
                        api={(*api).clone()}
                        role={Role::Psychologist}
                        subject_id={CURRENT_USER_ID.to_string()}
                        psychologist_id={CURRENT_USER_ID.to_string()}
                    />
                </div>
            </main>
        </>
    }
}
