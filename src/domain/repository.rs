use async_trait::async_trait;
use super::page::{Page, PageRequest};
use super::todo::{NewToDo, ToDo, ToDoId, ToDoPatch};

#[async_trait]
pub trait ToDoRepository: Send + Sync + 'static {
    async fn init(&self) -> anyhow::Result<()>;
    /// Every item in insertion order.
    async fn list(&self) -> anyhow::Result<Vec<ToDo>>;
    async fn page(&self, request: PageRequest) -> anyhow::Result<Page<ToDo>>;
    async fn get(&self, id: ToDoId) -> anyhow::Result<Option<ToDo>>;
    async fn create(&self, input: NewToDo) -> anyhow::Result<ToDo>;
    async fn update(&self, id: ToDoId, patch: ToDoPatch) -> anyhow::Result<Option<ToDo>>;
    async fn delete(&self, id: ToDoId) -> anyhow::Result<bool>;
    /// Returns how many items were removed.
    async fn delete_all(&self) -> anyhow::Result<u64>;
}
