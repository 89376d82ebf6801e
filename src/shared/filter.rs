//! In-memory list filtering shared by every list page.
//!
//! Lists are fetched whole from the backend, then narrowed here with a
//! case-insensitive substring search plus exact-match facets. All predicates
//! are independent, so the result is the intersection regardless of order.

use serde::Deserialize;
use utoipa::IntoParams;

/// Facets a record can be filtered on by exact match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facet {
    Status,
    Kategori,
    Role,
}

/// A record that can be narrowed by [`ListFilterQuery`]
pub trait Filterable {
    /// Text fields the search term is matched against
    fn search_fields(&self) -> Vec<&str>;

    /// Value of the given facet, `None` when the record has no such facet
    fn facet(&self, _facet: Facet) -> Option<&str> {
        None
    }
}

/// Query parameters shared by list endpoints
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ListFilterQuery {
    /// Case-insensitive substring matched against the record's text fields
    pub search: Option<String>,
    /// Exact status (e.g. PENDING); empty, "all" or "semua" disables the filter
    pub status: Option<String>,
    /// Exact category; empty, "all" or "semua" disables the filter
    pub kategori: Option<String>,
    /// Exact user role; empty, "all" or "semua" disables the filter
    pub role: Option<String>,
}

fn active(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .filter(|v| !v.eq_ignore_ascii_case("all") && !v.eq_ignore_ascii_case("semua"))
}

impl ListFilterQuery {
    pub fn search(term: &str) -> Self {
        Self {
            search: Some(term.to_string()),
            ..Default::default()
        }
    }

    pub fn with_status(mut self, status: &str) -> Self {
        self.status = Some(status.to_string());
        self
    }

    pub fn with_kategori(mut self, kategori: &str) -> Self {
        self.kategori = Some(kategori.to_string());
        self
    }

    pub fn with_role(mut self, role: &str) -> Self {
        self.role = Some(role.to_string());
        self
    }

    fn facet_value(&self, facet: Facet) -> Option<&str> {
        match facet {
            Facet::Status => active(&self.status),
            Facet::Kategori => active(&self.kategori),
            Facet::Role => active(&self.role),
        }
    }

    pub fn matches<T: Filterable>(&self, item: &T) -> bool {
        if let Some(term) = active(&self.search) {
            let needle = term.to_lowercase();
            let found = item
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle));
            if !found {
                return false;
            }
        }

        [Facet::Status, Facet::Kategori, Facet::Role]
            .into_iter()
            .all(|facet| match self.facet_value(facet) {
                None => true,
                Some(wanted) => item
                    .facet(facet)
                    .is_some_and(|value| value.eq_ignore_ascii_case(wanted)),
            })
    }

    pub fn apply<T: Filterable>(&self, items: Vec<T>) -> Vec<T> {
        items.into_iter().filter(|item| self.matches(item)).collect()
    }
}
