mod debts;
mod login;

pub use debts::DebtsPage;
pub use login::LoginPage;

use yew::prelude::*;

/// Inline status line under a form.
#[derive(Clone, Debug, PartialEq)]
pub enum Status {
    Idle,
    Loading(String),
    Success(String),
    Error(String),
}

impl Status {
    pub fn is_loading(&self) -> bool {
        matches!(self, Status::Loading(_))
    }
}

pub fn status_line(status: &Status) -> Html {
    match status {
        Status::Idle => html! {},
        Status::Loading(message) => html! { <p class="muted">{ message.clone() }</p> },
        Status::Success(message) => html! { <p class="success">{ message.clone() }</p> },
        Status::Error(message) => html! { <p class="error">{ message.clone() }</p> },
    }
}
