use crate::domain::page::{Page, PageRequest};
use crate::domain::repository::ToDoRepository;
use crate::domain::todo::{NewToDo, ToDo, ToDoId, ToDoPatch};
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ToDoService: Send + Sync + 'static {
    async fn list(&self) -> Result<Vec<ToDo>>;
    async fn page(&self, request: PageRequest) -> Result<Page<ToDo>>;
    async fn get(&self, id: ToDoId) -> Result<Option<ToDo>>;
    /// Lookup by an id given as text; at most one match.
    async fn find_by_id(&self, id: &str) -> Result<Vec<ToDo>>;
    async fn create(&self, input: NewToDo) -> Result<ToDo>;
    async fn update(&self, id: ToDoId, patch: ToDoPatch) -> Result<Option<ToDo>>;
    async fn delete(&self, id: ToDoId) -> Result<bool>;
    async fn delete_all(&self) -> Result<u64>;
}

#[derive(Clone)]
pub struct ToDoServiceImpl<R: ToDoRepository> {
    repo: R,
}

impl<R: ToDoRepository> ToDoServiceImpl<R> {
    pub fn new(repo: R) -> Self { Self { repo } }
}

#[async_trait]
impl<R: ToDoRepository> ToDoService for ToDoServiceImpl<R> {
    async fn list(&self) -> Result<Vec<ToDo>> { self.repo.list().await }

    async fn page(&self, request: PageRequest) -> Result<Page<ToDo>> { self.repo.page(request).await }

    async fn get(&self, id: ToDoId) -> Result<Option<ToDo>> { self.repo.get(id).await }

    async fn find_by_id(&self, id: &str) -> Result<Vec<ToDo>> {
        let Ok(id) = id.parse::<ToDoId>() else {
            tracing::debug!(id, "findById with non-numeric id");
            return Ok(Vec::new());
        };
        Ok(self.repo.get(id).await?.into_iter().collect())
    }

    async fn create(&self, input: NewToDo) -> Result<ToDo> {
        let item = self.repo.create(input).await?;
        tracing::info!(id = %item.id, "to-do item created");
        Ok(item)
    }

    async fn update(&self, id: ToDoId, patch: ToDoPatch) -> Result<Option<ToDo>> {
        let updated = self.repo.update(id, patch).await?;
        if updated.is_some() {
            tracing::info!(%id, "to-do item updated");
        } else {
            tracing::debug!(%id, "update of unknown to-do item");
        }
        Ok(updated)
    }

    async fn delete(&self, id: ToDoId) -> Result<bool> {
        let deleted = self.repo.delete(id).await?;
        if deleted { tracing::info!(%id, "to-do item deleted"); }
        Ok(deleted)
    }

    async fn delete_all(&self) -> Result<u64> {
        let removed = self.repo.delete_all().await?;
        tracing::info!(removed, "all to-do items deleted");
        Ok(removed)
    }
}
