use wasm_bindgen_futures::spawn_local;
use web_sys::{Event, InputEvent};
use yew::prelude::*;

use super::{status_line, Status};
use crate::error::ApiError;
use crate::filters::{DebtFilters, FilterPatch, SortField, DEFAULT_PAGE_SIZE};
use crate::format::{format_cents, format_date};
use crate::forms::{submit_debt, DebtForm};
use crate::hooks::{use_debts, use_tags, Services, UseDebtsHandle};
use crate::models::{Debt, DebtType, Tag};
use crate::tag_list::TagList;

#[derive(Properties, PartialEq)]
pub struct DebtsPageProps {
    pub services: Services,
    pub user_name: String,
}

fn input_value(e: InputEvent) -> String {
    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
    input.value()
}

fn select_value(e: Event) -> String {
    let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
    select.value()
}

#[function_component(DebtsPage)]
pub fn debts_page(props: &DebtsPageProps) -> Html {
    let debts = use_debts(
        props.services.api.clone(),
        DebtFilters::with_limit(DEFAULT_PAGE_SIZE),
    );
    let tags = use_tags(props.services.api.clone());

    let show_filters = use_state(|| false);
    let show_create = use_state(|| false);
    let description_filter = use_state(String::new);
    let tag_filter = use_state(String::new);
    let month_filter = use_state(String::new);
    let form = use_state(DebtForm::default);
    let create_status = use_state(|| Status::Idle);
    let new_tag = use_state(String::new);
    let tag_status = use_state(|| Status::Idle);

    let on_page = {
        let debts = debts.clone();
        move |delta: i64| {
            let debts = debts.clone();
            Callback::from(move |_: MouseEvent| {
                debts.reload(FilterPatch::default().page(debts.step_page(delta)));
            })
        }
    };

    let on_description_filter = {
        let debts = debts.clone();
        let description_filter = description_filter.clone();
        Callback::from(move |e: InputEvent| {
            let value = input_value(e);
            description_filter.set(value.clone());
            debts.reload(FilterPatch::default().description(value).page(1));
        })
    };

    let on_tag_filter = {
        let debts = debts.clone();
        let tag_filter = tag_filter.clone();
        Callback::from(move |e: Event| {
            let value = select_value(e);
            let tag_id = value.parse::<i64>().ok();
            tag_filter.set(value);
            debts.reload(FilterPatch::default().tag_id(tag_id).page(1));
        })
    };

    let on_month_filter = {
        let debts = debts.clone();
        let month_filter = month_filter.clone();
        Callback::from(move |e: InputEvent| {
            let value = input_value(e);
            month_filter.set(value.clone());
            debts.reload(FilterPatch::default().due_month(value).page(1));
        })
    };

    let on_create = {
        let api = props.services.api.clone();
        let debts = debts.clone();
        let form = form.clone();
        let create_status = create_status.clone();
        let show_create = show_create.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if let Err(err) = form.validate() {
                create_status.set(Status::Error(err.to_string()));
                return;
            }

            create_status.set(Status::Loading("Criando débito...".to_string()));
            let api = api.clone();
            let debts = debts.clone();
            let form = form.clone();
            let create_status = create_status.clone();
            let show_create = show_create.clone();
            spawn_local(async move {
                match submit_debt(&*api, &form).await {
                    Ok(_) => {
                        create_status.set(Status::Success("Débito criado com sucesso.".to_string()));
                        let mut next = (*form).clone();
                        next.reset();
                        form.set(next);
                        show_create.set(false);
                        debts.reload(FilterPatch::default().page(1));
                    }
                    Err(err) => create_status.set(Status::Error(err.to_string())),
                }
            });
        })
    };

    let on_add_tag = {
        let tags = tags.clone();
        let new_tag = new_tag.clone();
        let tag_status = tag_status.clone();
        let form = form.clone();
        Callback::from(move |_: MouseEvent| {
            tag_status.set(Status::Loading("Criando...".to_string()));
            let new_tag = new_tag.clone();
            let tag_status = tag_status.clone();
            let form = form.clone();
            tags.add_tag(
                (*new_tag).clone(),
                Callback::from(move |result: Result<Tag, ApiError>| match result {
                    Ok(tag) => {
                        let mut next = (*form).clone();
                        next.tag_id = tag.id.to_string();
                        form.set(next);
                        new_tag.set(String::new());
                        tag_status.set(Status::Idle);
                    }
                    Err(err) => tag_status.set(Status::Error(err.to_string())),
                }),
            );
        })
    };

    let on_logout = {
        let session = props.services.session.clone();
        Callback::from(move |_: MouseEvent| session.clear_session())
    };

    let form_text = |apply: fn(&mut DebtForm, String)| {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let mut next = (*form).clone();
            apply(&mut next, input_value(e));
            form.set(next);
        })
    };

    let set_kind = |kind: DebtType| {
        let form = form.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*form).clone();
            next.kind = kind;
            form.set(next);
        })
    };

    let on_form_tag = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let mut next = (*form).clone();
            next.tag_id = select_value(e);
            form.set(next);
        })
    };

    let toggle = |flag: &UseStateHandle<bool>| {
        let flag = flag.clone();
        Callback::from(move |_: MouseEvent| flag.set(!*flag))
    };

    let close_create = {
        let show_create = show_create.clone();
        let create_status = create_status.clone();
        Callback::from(move |_: MouseEvent| {
            show_create.set(false);
            create_status.set(Status::Idle);
        })
    };

    html! {
        <main class="page debts-page">
            <header class="debts-header compact">
                <div class="toolbar">
                    <div class="toolbar-left">
                        <p class="eyebrow">{"Débitos"}</p>
                        <h1>{"Listagem de débitos"}</h1>
                    </div>
                    <div class="toolbar-actions">
                        <span class="muted">{ props.user_name.clone() }</span>
                        <button type="button" class="ghost" onclick={toggle(&show_filters)}>{"Filtros"}</button>
                        <button type="button" class="primary" onclick={toggle(&show_create)}>{"Novo débito"}</button>
                        <button type="button" class="ghost" onclick={on_logout}>{"Sair"}</button>
                    </div>
                </div>
            </header>

            if *show_filters {
                <section class="filters">
                    <label>
                        <span>{"Descrição"}</span>
                        <input
                            type="text"
                            placeholder="Buscar por descrição"
                            value={(*description_filter).clone()}
                            oninput={on_description_filter}
                        />
                    </label>
                    <label>
                        <span>{"Tag"}</span>
                        <select onchange={on_tag_filter}>
                            <option value="" selected={tag_filter.is_empty()}>{"Todas"}</option>
                            { for tags.items.iter().map(|tag| {
                                let value = tag.id.to_string();
                                html! {
                                    <option key={tag.id} selected={*tag_filter == value} value={value.clone()}>{ tag.name.clone() }</option>
                                }
                            }) }
                        </select>
                    </label>
                    <label>
                        <span>{"Mês de vencimento"}</span>
                        <input type="month" value={(*month_filter).clone()} oninput={on_month_filter} />
                    </label>
                </section>
            }

            if *show_create {
                <div class="modal-backdrop" role="dialog" aria-modal="true">
                    <section class="debts-card create-debt modal-panel">
                        <div class="card-header header-inline">
                            <p class="eyebrow">{"Novo lançamento"}</p>
                            <div class="pill-toggle">
                                <button
                                    type="button"
                                    class={classes!((form.kind == DebtType::Payable).then_some("selected"))}
                                    onclick={set_kind(DebtType::Payable)}
                                >
                                    { DebtType::Payable.label() }
                                </button>
                                <button
                                    type="button"
                                    class={classes!((form.kind == DebtType::Receivable).then_some("selected"))}
                                    onclick={set_kind(DebtType::Receivable)}
                                >
                                    { DebtType::Receivable.label() }
                                </button>
                            </div>
                        </div>
                        <form class="create-form" onsubmit={on_create}>
                            <label>
                                <span>{"Descrição"}</span>
                                <input
                                    value={form.description.clone()}
                                    placeholder="Ex: Conta de energia"
                                    oninput={form_text(|f, v| f.description = v)}
                                />
                            </label>
                            <label>
                                <span>{"Valor"}</span>
                                <input
                                    type="number"
                                    min="0"
                                    step="0.01"
                                    placeholder="0,00"
                                    value={form.amount.clone()}
                                    oninput={form_text(|f, v| f.amount = v)}
                                />
                            </label>
                            <label>
                                <span>{"Vencimento"}</span>
                                <input
                                    type="date"
                                    value={form.due_date.clone()}
                                    oninput={form_text(|f, v| f.due_date = v)}
                                />
                            </label>
                            <label>
                                <span>{"Tag"}</span>
                                <select onchange={on_form_tag}>
                                    <option value="" selected={form.tag_id.is_empty()}>{"Selecione uma tag"}</option>
                                    { for tags.items.iter().map(|tag| {
                                        let value = tag.id.to_string();
                                        html! {
                                            <option key={tag.id} selected={form.tag_id == value} value={value.clone()}>{ tag.name.clone() }</option>
                                        }
                                    }) }
                                </select>
                            </label>
                            if tags.loading {
                                <p class="muted">{"Carregando tags..."}</p>
                            }
                            if !tags.error.is_empty() {
                                <p class="error">{ tags.error.clone() }</p>
                            }
                            <div class="tag-create">
                                <input
                                    type="text"
                                    placeholder="Nova tag"
                                    value={(*new_tag).clone()}
                                    oninput={{
                                        let new_tag = new_tag.clone();
                                        Callback::from(move |e: InputEvent| new_tag.set(input_value(e)))
                                    }}
                                />
                                <button type="button" onclick={on_add_tag} disabled={tag_status.is_loading()}>
                                    { if tag_status.is_loading() { "Criando..." } else { "Adicionar" } }
                                </button>
                            </div>
                            if let Status::Error(message) = &*tag_status {
                                <p class="error">{ message.clone() }</p>
                            }
                            <div class="create-actions right">
                                { status_line(&create_status) }
                                <div class="actions-row">
                                    <button type="button" class="ghost" onclick={close_create}>{"Cancelar"}</button>
                                    <button type="submit" disabled={create_status.is_loading()}>
                                        { if create_status.is_loading() { "Salvando..." } else { "Criar débito" } }
                                    </button>
                                </div>
                            </div>
                        </form>
                    </section>
                </div>
            }

            <section class="debts-card">
                if let Status::Success(message) = &*create_status {
                    <p class="success">{ message.clone() }</p>
                }
                if debts.loading {
                    <p class="muted">{"Carregando débitos..."}</p>
                }
                if !debts.error.is_empty() {
                    <p class="error">{ debts.error.clone() }</p>
                }
                if debts.is_empty_result() {
                    <p class="muted">{"Nenhum débito encontrado com esses filtros."}</p>
                }

                if !debts.loading && !debts.items.is_empty() {
                    <table class="debts-table">
                        <thead>
                            <tr>
                                <th class="align-right">{ sort_button(&debts, SortField::Amount, "Valor") }</th>
                                <th>{"Tag"}</th>
                                <th>{"Descrição"}</th>
                                <th class="align-right">{ sort_button(&debts, SortField::DueDate, "Vencimento") }</th>
                                <th>{ sort_button(&debts, SortField::Paid, "Status") }</th>
                            </tr>
                        </thead>
                        <tbody>
                            { for debts.items.iter().map(|debt| debt_row(debt, &tags)) }
                        </tbody>
                    </table>
                }

                <div class="pagination">
                    <button type="button" onclick={on_page(-1)} disabled={debts.page <= 1}>{"Anterior"}</button>
                    <span>{ format!("Página {} de {}", debts.page, debts.page_count()) }</span>
                    <button type="button" onclick={on_page(1)} disabled={debts.page >= debts.page_count()}>{"Próxima"}</button>
                </div>
            </section>
        </main>
    }
}

fn sort_button(debts: &UseDebtsHandle, field: SortField, label: &'static str) -> Html {
    let onclick = {
        let debts = debts.clone();
        Callback::from(move |_: MouseEvent| {
            debts.reload(debts.filters.sort_toggle(field));
        })
    };
    let active = debts.filters.is_sorted_by(field).then_some("active");

    html! {
        <button type="button" class={classes!("sort-button", active)} {onclick}>
            { label }{" "}
            <span class="sort-icon">{ debts.filters.sort_indicator(field) }</span>
        </button>
    }
}

fn debt_row(debt: &Debt, tags: &TagList) -> Html {
    let tag = tags.label_for(debt);
    let kind_class = match debt.kind {
        DebtType::Payable => "pay",
        DebtType::Receivable => "receive",
    };

    html! {
        <tr key={debt.id}>
            <td class="align-right">{ format_cents(debt.amount_cents) }</td>
            <td>{ tag }</td>
            <td>
                <div class="desc-cell">
                    <span class="desc-text">{ debt.description.clone() }</span>
                    <span class={classes!("pill", "subtle", kind_class)}>{ debt.kind.label() }</span>
                </div>
            </td>
            <td class="align-right">{ format_date(&debt.due_date) }</td>
            <td>
                <span class={classes!("status-dot", if debt.paid { "success" } else { "pending" })}>
                    { if debt.paid { "Pago" } else { "Pendente" } }
                </span>
            </td>
        </tr>
    }
}
