use yew::prelude::*;

use crate::config::AppConfig;
use crate::hooks::use_services;
use crate::pages::{DebtsPage, LoginPage};
use crate::session::SessionStatus;

#[function_component(App)]
pub fn app() -> Html {
    let (services, session) = use_services(AppConfig::from_env());

    match session.status() {
        SessionStatus::Loading => html! {
            <main class="page">
                <p class="muted">{"Carregando sessão..."}</p>
            </main>
        },
        SessionStatus::Anonymous => html! {
            <LoginPage services={services} error={session.error.clone()} />
        },
        SessionStatus::Authenticated(user) => html! {
            <DebtsPage services={services} user_name={user.name.clone()} />
        },
    }
}
