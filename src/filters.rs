//! Debt list filters, partial updates to them, and their query-string encoding.

use url::form_urlencoded;

use crate::models::DebtType;

pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortField {
    Amount,
    DueDate,
    Paid,
}

impl SortField {
    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Amount => "amountCents",
            SortField::DueDate => "dueDate",
            SortField::Paid => "paid",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DebtFilters {
    pub tag_id: Option<i64>,
    pub kind: Option<DebtType>,
    pub paid: Option<bool>,
    pub overdue: Option<bool>,
    pub order: Option<SortOrder>,
    pub order_by: Option<SortField>,
    /// `YYYY-MM`
    pub due_month: Option<String>,
    pub description: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl DebtFilters {
    pub fn with_limit(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Applies `patch` in place: `Keep` leaves a key alone, `Clear` unsets it.
    pub fn merge(&mut self, patch: FilterPatch) {
        patch.tag_id.apply(&mut self.tag_id);
        patch.kind.apply(&mut self.kind);
        patch.paid.apply(&mut self.paid);
        patch.overdue.apply(&mut self.overdue);
        patch.order.apply(&mut self.order);
        patch.order_by.apply(&mut self.order_by);
        patch.due_month.apply(&mut self.due_month);
        patch.description.apply(&mut self.description);
        patch.page.apply(&mut self.page);
        patch.limit.apply(&mut self.limit);
    }

    /// Query pairs for `GET /debts`, only for keys that carry a value.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(tag_id) = self.tag_id {
            pairs.push(("tagId", tag_id.to_string()));
        }
        if let Some(kind) = self.kind {
            pairs.push(("type", kind.as_str().to_string()));
        }
        if let Some(paid) = self.paid {
            pairs.push(("paid", paid.to_string()));
        }
        if let Some(overdue) = self.overdue {
            pairs.push(("overdue", overdue.to_string()));
        }
        if let Some(order) = self.order {
            pairs.push(("order", order.as_str().to_string()));
        }
        if let Some(order_by) = self.order_by {
            pairs.push(("orderBy", order_by.as_str().to_string()));
        }
        if let Some(month) = self.due_month.as_deref().filter(|m| !m.is_empty()) {
            pairs.push(("dueMonth", month.to_string()));
        }
        if let Some(text) = self.description.as_deref().filter(|d| !d.is_empty()) {
            pairs.push(("description", text.to_string()));
        }
        if let Some(page) = self.page.filter(|p| *p > 0) {
            pairs.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit.filter(|l| *l > 0) {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }

    /// Encoded query string with a leading `?`, or empty when nothing is set.
    pub fn to_query(&self) -> String {
        let pairs = self.query_pairs();
        if pairs.is_empty() {
            return String::new();
        }
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &pairs {
            serializer.append_pair(key, value);
        }
        format!("?{}", serializer.finish())
    }

    /// Arrow shown next to a sortable column header.
    pub fn sort_indicator(&self, field: SortField) -> &'static str {
        match (self.order_by, self.order) {
            (Some(active), Some(SortOrder::Asc)) if active == field => "↑",
            (Some(active), Some(SortOrder::Desc)) if active == field => "↓",
            _ => "↕",
        }
    }

    pub fn is_sorted_by(&self, field: SortField) -> bool {
        self.order_by == Some(field) && self.order.is_some()
    }

    /// Patch for a click on `field`'s header: unset → asc → desc → unset.
    /// A different field always starts at asc. Sorting jumps back to page 1.
    pub fn sort_toggle(&self, field: SortField) -> FilterPatch {
        let current = if self.order_by == Some(field) {
            self.order
        } else {
            None
        };
        let next = match current {
            None => Some(SortOrder::Asc),
            Some(SortOrder::Asc) => Some(SortOrder::Desc),
            Some(SortOrder::Desc) => None,
        };

        FilterPatch::default()
            .order(next)
            .order_by(next.map(|_| field))
            .page(1)
    }
}

/// Update for one filter key.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Patch<T> {
    #[default]
    Keep,
    Clear,
    Set(T),
}

impl<T> Patch<T> {
    fn apply(self, slot: &mut Option<T>) {
        match self {
            Patch::Keep => {}
            Patch::Clear => *slot = None,
            Patch::Set(value) => *slot = Some(value),
        }
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Patch::Set(value),
            None => Patch::Clear,
        }
    }
}

/// A partial filter set. Untouched keys keep their current value; passing `None`
/// to a builder method clears the key.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterPatch {
    pub tag_id: Patch<i64>,
    pub kind: Patch<DebtType>,
    pub paid: Patch<bool>,
    pub overdue: Patch<bool>,
    pub order: Patch<SortOrder>,
    pub order_by: Patch<SortField>,
    pub due_month: Patch<String>,
    pub description: Patch<String>,
    pub page: Patch<u32>,
    pub limit: Patch<u32>,
}

impl FilterPatch {
    pub fn tag_id(mut self, value: Option<i64>) -> Self {
        self.tag_id = value.into();
        self
    }

    pub fn kind(mut self, value: Option<DebtType>) -> Self {
        self.kind = value.into();
        self
    }

    pub fn paid(mut self, value: Option<bool>) -> Self {
        self.paid = value.into();
        self
    }

    pub fn overdue(mut self, value: Option<bool>) -> Self {
        self.overdue = value.into();
        self
    }

    pub fn order(mut self, value: Option<SortOrder>) -> Self {
        self.order = value.into();
        self
    }

    pub fn order_by(mut self, value: Option<SortField>) -> Self {
        self.order_by = value.into();
        self
    }

    /// Empty text clears the filter.
    pub fn due_month(mut self, value: impl Into<String>) -> Self {
        self.due_month = non_empty(value.into()).into();
        self
    }

    /// Empty text clears the filter.
    pub fn description(mut self, value: impl Into<String>) -> Self {
        self.description = non_empty(value.into()).into();
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Patch::Set(page);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Patch::Set(limit);
        self
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populated() -> DebtFilters {
        DebtFilters {
            tag_id: Some(4),
            kind: Some(DebtType::Payable),
            paid: Some(false),
            overdue: None,
            order: Some(SortOrder::Desc),
            order_by: Some(SortField::DueDate),
            due_month: Some("2024-05".to_string()),
            description: Some("luz".to_string()),
            page: Some(3),
            limit: Some(10),
        }
    }

    #[test]
    fn empty_patch_preserves_everything() {
        let mut filters = populated();
        filters.merge(FilterPatch::default());
        assert_eq!(filters, populated());
    }

    #[test]
    fn page_patch_changes_only_page() {
        let mut filters = populated();
        filters.merge(FilterPatch::default().page(2));
        assert_eq!(filters.page, Some(2));
        assert_eq!(
            DebtFilters {
                page: Some(3),
                ..filters
            },
            populated()
        );
    }

    #[test]
    fn none_clears_a_key() {
        let mut filters = populated();
        filters.merge(FilterPatch::default().tag_id(None).description(""));
        assert_eq!(filters.tag_id, None);
        assert_eq!(filters.description, None);
        assert_eq!(filters.due_month.as_deref(), Some("2024-05"));
    }

    #[test]
    fn sort_cycles_on_same_field() {
        let mut filters = DebtFilters::with_limit(10);

        filters.merge(filters.sort_toggle(SortField::Amount));
        assert_eq!(filters.order_by, Some(SortField::Amount));
        assert_eq!(filters.order, Some(SortOrder::Asc));
        assert_eq!(filters.sort_indicator(SortField::Amount), "↑");

        filters.merge(filters.sort_toggle(SortField::Amount));
        assert_eq!(filters.order, Some(SortOrder::Desc));
        assert_eq!(filters.sort_indicator(SortField::Amount), "↓");

        filters.merge(filters.sort_toggle(SortField::Amount));
        assert_eq!(filters.order, None);
        assert_eq!(filters.order_by, None);
        assert_eq!(filters.sort_indicator(SortField::Amount), "↕");
    }

    #[test]
    fn switching_field_restarts_at_asc() {
        let mut filters = populated();
        filters.merge(filters.sort_toggle(SortField::Paid));

        assert_eq!(filters.order_by, Some(SortField::Paid));
        assert_eq!(filters.order, Some(SortOrder::Asc));
        assert_eq!(filters.page, Some(1));
        assert!(!filters.is_sorted_by(SortField::DueDate));
        assert_eq!(filters.sort_indicator(SortField::DueDate), "↕");
    }

    #[test]
    fn query_skips_unset_values() {
        assert_eq!(DebtFilters::default().to_query(), "");

        let filters = DebtFilters {
            description: Some(String::new()),
            page: Some(0),
            ..DebtFilters::with_limit(10)
        };
        assert_eq!(filters.to_query(), "?limit=10");
    }

    #[test]
    fn query_keeps_key_order_and_encodes() {
        let filters = DebtFilters {
            description: Some("conta de luz".to_string()),
            ..populated()
        };
        assert_eq!(
            filters.to_query(),
            "?tagId=4&type=PAYABLE&paid=false&order=desc&orderBy=dueDate\
             &dueMonth=2024-05&description=conta+de+luz&page=3&limit=10"
        );
    }
}
