use wasm_bindgen_futures::spawn_local;
use web_sys::InputEvent;
use yew::prelude::*;

use super::{status_line, Status};
use crate::hooks::Services;

#[derive(Properties, PartialEq)]
pub struct LoginPageProps {
    pub services: Services,
    /// Last session refresh failure, shown until the user tries again.
    #[prop_or_default]
    pub error: String,
}

/// Exchanges an identity-provider credential for a session.
#[function_component(LoginPage)]
pub fn login_page(props: &LoginPageProps) -> Html {
    let credential = use_state(String::new);
    let status = use_state(|| {
        if props.error.is_empty() {
            Status::Idle
        } else {
            Status::Error(props.error.clone())
        }
    });

    let on_submit = {
        let credential = credential.clone();
        let status = status.clone();
        let session = props.services.session.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let credential_val = credential.trim().to_string();
            if credential_val.is_empty() {
                status.set(Status::Error("Não recebemos o token do Google.".to_string()));
                return;
            }

            status.set(Status::Loading("Finalizando autenticação...".to_string()));
            let status = status.clone();
            let session = session.clone();
            spawn_local(async move {
                match session.login_with_google(&credential_val).await {
                    Ok(user) => {
                        let name = if user.name.is_empty() {
                            "usuário".to_string()
                        } else {
                            user.name
                        };
                        status.set(Status::Success(format!("Bem-vindo, {}!", name)));
                    }
                    Err(err) => status.set(Status::Error(err.to_string())),
                }
            });
        })
    };

    let client_configured = props.services.config.google_client_id.is_some();

    html! {
        <main class="page">
            <section class="login-card" aria-live="polite">
                <div class="card-header">
                    <p class="eyebrow">{"Acesse sua conta"}</p>
                    <h2>{"Entrar com Google"}</h2>
                </div>

                <form class="create-form" onsubmit={on_submit}>
                    <label>
                        <span>{"Credencial Google"}</span>
                        <input
                            type="password"
                            value={(*credential).clone()}
                            oninput={{
                                let credential = credential.clone();
                                Callback::from(move |e: InputEvent| {
                                    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                    credential.set(input.value());
                                })
                            }}
                        />
                    </label>
                    <button type="submit" disabled={status.is_loading()}>
                        { if status.is_loading() { "Conectando..." } else { "Entrar" } }
                    </button>
                </form>

                <div class="status">
                    if *status == Status::Idle {
                        <p class="muted">{"Use sua conta Google para continuar."}</p>
                    }
                    { status_line(&status) }
                    if !client_configured {
                        <p class="warning">
                            {"Configure "}<code>{"LEDGERLY_GOOGLE_CLIENT_ID"}</code>{" para solicitar o token ao Google."}
                        </p>
                    }
                </div>
            </section>
        </main>
    }
}
