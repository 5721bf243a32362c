//! Yew hooks over the controllers. Handles carry a snapshot taken at render time.

use std::ops::Deref;
use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api::{ApiClient, FetchTransport};
use crate::config::AppConfig;
use crate::debt_list::{DebtList, DebtsController};
use crate::error::ApiError;
use crate::filters::{DebtFilters, FilterPatch};
use crate::models::Tag;
use crate::session::{SessionState, SessionStore};
use crate::storage::LocalStorage;
use crate::tag_list::{TagList, TagsController};

pub type BrowserApi = ApiClient<FetchTransport, LocalStorage>;
pub type BrowserSession = SessionStore<FetchTransport, LocalStorage>;

/// Shared services handed down the component tree.
#[derive(Clone)]
pub struct Services {
    pub config: Rc<AppConfig>,
    pub api: Rc<BrowserApi>,
    pub session: Rc<BrowserSession>,
}

impl PartialEq for Services {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.api, &other.api) && Rc::ptr_eq(&self.session, &other.session)
    }
}

/// Builds the services once and starts the session on mount.
#[hook]
pub fn use_services(config: AppConfig) -> (Services, SessionState) {
    let update = use_force_update();
    let services = use_memo(
        move |_| {
            let api = Rc::new(ApiClient::new(
                config.api_base_url.clone(),
                FetchTransport,
                LocalStorage,
            ));
            let session = Rc::new(SessionStore::new(
                api.clone(),
                Rc::new(move || update.force_update()),
            ));
            Services {
                config: Rc::new(config),
                api,
                session,
            }
        },
        (),
    );

    {
        let session = services.session.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    session.init().await;
                });
                || ()
            },
            (),
        );
    }

    let state = services.session.snapshot();
    ((*services).clone(), state)
}

#[derive(Clone)]
pub struct UseDebtsHandle {
    controller: Rc<DebtsController<FetchTransport, LocalStorage>>,
    state: DebtList,
}

impl UseDebtsHandle {
    pub fn reload(&self, patch: FilterPatch) {
        let controller = self.controller.clone();
        spawn_local(async move {
            controller.reload(patch).await;
        });
    }
}

impl Deref for UseDebtsHandle {
    type Target = DebtList;

    fn deref(&self) -> &DebtList {
        &self.state
    }
}

/// Debt list with the given starting filters; fetches once on mount.
#[hook]
pub fn use_debts(api: Rc<BrowserApi>, initial: DebtFilters) -> UseDebtsHandle {
    let update = use_force_update();
    let controller = use_memo(
        move |_| DebtsController::new(api, initial, Rc::new(move || update.force_update())),
        (),
    );

    {
        let controller = controller.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    controller.reload(FilterPatch::default()).await;
                });
                || ()
            },
            (),
        );
    }

    UseDebtsHandle {
        state: controller.snapshot(),
        controller,
    }
}

#[derive(Clone)]
pub struct UseTagsHandle {
    controller: Rc<TagsController<FetchTransport, LocalStorage>>,
    state: TagList,
}

impl UseTagsHandle {
    /// Creates a tag; `done` receives it once the list already contains it.
    pub fn add_tag(&self, name: String, done: Callback<Result<Tag, ApiError>>) {
        let controller = self.controller.clone();
        spawn_local(async move {
            done.emit(controller.add_tag(&name).await);
        });
    }
}

impl Deref for UseTagsHandle {
    type Target = TagList;

    fn deref(&self) -> &TagList {
        &self.state
    }
}

#[hook]
pub fn use_tags(api: Rc<BrowserApi>) -> UseTagsHandle {
    let update = use_force_update();
    let controller = use_memo(
        move |_| TagsController::new(api, Rc::new(move || update.force_update())),
        (),
    );

    {
        let controller = controller.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    controller.reload().await;
                });
                || ()
            },
            (),
        );
    }

    UseTagsHandle {
        state: controller.snapshot(),
        controller,
    }
}
