use std::cell::RefCell;
use std::rc::Rc;

use crate::api::{ApiClient, Transport};
use crate::error::ApiError;
use crate::models::{Debt, Tag};
use crate::storage::KeyValueStore;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TagList {
    pub items: Vec<Tag>,
    pub loading: bool,
    pub error: String,
}

impl TagList {
    pub fn find(&self, id: i64) -> Option<&Tag> {
        self.items.iter().find(|tag| tag.id == id)
    }

    /// Tag name for a table row: the embedded tag, else the loaded one, else the id.
    pub fn label_for(&self, debt: &Debt) -> String {
        debt.tag
            .as_ref()
            .or_else(|| debt.tag_id.and_then(|id| self.find(id)))
            .map(|tag| tag.name.clone())
            .or_else(|| debt.tag_id.map(|id| id.to_string()))
            .unwrap_or_else(|| "-".to_string())
    }
}

/// The user's full tag set. No pagination: every reload fetches everything.
pub struct TagsController<T, S> {
    api: Rc<ApiClient<T, S>>,
    state: RefCell<TagList>,
    on_change: Rc<dyn Fn()>,
}

impl<T: Transport, S: KeyValueStore> TagsController<T, S> {
    pub fn new(api: Rc<ApiClient<T, S>>, on_change: Rc<dyn Fn()>) -> Self {
        Self {
            api,
            state: RefCell::new(TagList::default()),
            on_change,
        }
    }

    pub fn snapshot(&self) -> TagList {
        self.state.borrow().clone()
    }

    pub async fn reload(&self) {
        {
            let mut state = self.state.borrow_mut();
            state.loading = true;
            state.error.clear();
        }
        (self.on_change)();

        let result = self.api.fetch_tags().await;
        *self.state.borrow_mut() = match result {
            Ok(items) => TagList {
                items,
                loading: false,
                error: String::new(),
            },
            Err(err) => {
                tracing::warn!(error = %err, "failed to load tags");
                TagList {
                    items: Vec::new(),
                    loading: false,
                    error: err.to_string(),
                }
            }
        };
        (self.on_change)();
    }

    /// Creates a tag and reloads the list before returning it, so the returned
    /// tag is already part of [`snapshot`](Self::snapshot).
    pub async fn add_tag(&self, name: &str) -> Result<Tag, ApiError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ApiError::Validation("Informe um nome".to_string()));
        }

        let created = self.api.create_tag(name).await?;
        tracing::info!(tag_id = created.id, "tag created");
        self.reload().await;
        Ok(created)
    }
}
