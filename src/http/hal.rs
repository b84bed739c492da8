//! HAL (`application/hal+json`) representations of to-do items and collections.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::page::{Direction, Page, PageRequest, Sort};
use crate::domain::todo::{DueDate, ToDo, ToDoId};

/// Collection resource path and the `_embedded` relation name.
pub const COLLECTION: &str = "toDo";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Link { pub href: String }

pub type Links = BTreeMap<&'static str, Link>;

/// Builds absolute or server-relative hrefs for the `/toDo` resources.
#[derive(Debug, Clone, Default)]
pub struct LinkBuilder { base: String }

impl LinkBuilder {
    pub fn new(base: impl Into<String>) -> Self { Self { base: base.into() } }

    pub fn collection(&self) -> String { format!("{}/{COLLECTION}", self.base) }

    pub fn item(&self, id: ToDoId) -> String { format!("{}/{COLLECTION}/{id}", self.base) }

    pub fn search(&self) -> String { format!("{}/{COLLECTION}/search", self.base) }

    pub fn find_by_id(&self) -> String { format!("{}/search/findById{{?id}}", self.collection()) }

    pub fn page(&self, request: PageRequest) -> String {
        let Sort { property, direction } = request.sort;
        let direction = match direction { Direction::Asc => "asc", Direction::Desc => "desc" };
        format!(
            "{}?page={}&size={}&sort={},{direction}",
            self.collection(),
            request.number,
            request.size,
            property.json_name(),
        )
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToDoModel {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<DueDate>,
    #[serde(rename = "_links")]
    pub links: Links,
}

impl ToDoModel {
    pub fn new(item: ToDo, links: &LinkBuilder) -> Self {
        let href = links.item(item.id);
        let links = BTreeMap::from([
            ("self", Link { href: href.clone() }),
            (COLLECTION, Link { href }),
        ]);
        Self { title: item.title, description: item.description, due_date: item.due_date, links }
    }
}

#[derive(Debug, Serialize)]
pub struct Embedded {
    #[serde(rename = "toDo")]
    pub to_do: Vec<ToDoModel>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u64,
    pub number: u32,
}

#[derive(Debug, Serialize)]
pub struct CollectionModel {
    #[serde(rename = "_embedded")]
    pub embedded: Embedded,
    #[serde(rename = "_links")]
    pub links: Links,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<PageMetadata>,
}

impl CollectionModel {
    pub fn from_page(page: Page<ToDo>, links: &LinkBuilder) -> Self {
        let request = page.request;
        let mut rels = BTreeMap::from([
            ("self", Link { href: links.page(request) }),
            ("search", Link { href: links.search() }),
        ]);
        let total_pages = page.total_pages();
        if total_pages > 1 {
            let last = u32::try_from(total_pages - 1).unwrap_or(u32::MAX);
            rels.insert("first", Link { href: links.page(PageRequest { number: 0, ..request }) });
            rels.insert("last", Link { href: links.page(PageRequest { number: last, ..request }) });
        }
        if page.has_previous() {
            rels.insert("prev", Link { href: links.page(PageRequest { number: request.number - 1, ..request }) });
        }
        if page.has_next() {
            rels.insert("next", Link { href: links.page(PageRequest { number: request.number + 1, ..request }) });
        }
        let metadata = PageMetadata {
            size: request.size,
            total_elements: page.total_elements,
            total_pages,
            number: request.number,
        };
        Self {
            embedded: Embedded { to_do: page.items.into_iter().map(|t| ToDoModel::new(t, links)).collect() },
            links: rels,
            page: Some(metadata),
        }
    }

    /// Result of a search: embedded items with no paging.
    pub fn search_result(items: Vec<ToDo>, self_href: String, links: &LinkBuilder) -> Self {
        Self {
            embedded: Embedded { to_do: items.into_iter().map(|t| ToDoModel::new(t, links)).collect() },
            links: BTreeMap::from([("self", Link { href: self_href })]),
            page: None,
        }
    }
}
