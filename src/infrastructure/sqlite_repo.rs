use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow}, Pool, Row, Sqlite};

use crate::domain::{
    page::{Direction, Page, PageRequest, SortProperty},
    repository::ToDoRepository,
    todo::{DueDate, NewToDo, ToDo, ToDoId, ToDoPatch},
};

#[derive(Clone)]
pub struct SqliteToDoRepository {
    pool: Arc<Pool<Sqlite>>,
}

impl SqliteToDoRepository {
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("invalid DATABASE_URL {database_url:?}"))?
            .create_if_missing(true);
        // An in-memory database lives only while a connection to it is open.
        let pool_options = if is_in_memory(database_url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };
        let pool = pool_options.connect_with(options).await?;
        Ok(Self { pool: Arc::new(pool) })
    }
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.starts_with("sqlite::memory:") || database_url.contains("mode=memory")
}

const COLUMNS: &str = "id, title, description, due_date";

fn order_column(property: SortProperty) -> &'static str {
    match property {
        SortProperty::Id => "id",
        SortProperty::Title => "title",
        SortProperty::Description => "description",
        SortProperty::DueDate => "due_date",
    }
}

#[async_trait]
impl ToDoRepository for SqliteToDoRepository {
    async fn init(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS to_do (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT,
                description TEXT,
                due_date TEXT
            )",
        )
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<ToDo>> {
        let rows = sqlx::query(&format!("SELECT {COLUMNS} FROM to_do ORDER BY id ASC"))
            .fetch_all(&*self.pool)
            .await?;
        rows.iter().map(row_to_to_do).collect()
    }

    async fn page(&self, request: PageRequest) -> Result<Page<ToDo>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM to_do")
            .fetch_one(&*self.pool)
            .await?;
        let direction = match request.sort.direction { Direction::Asc => "ASC", Direction::Desc => "DESC" };
        let sql = format!(
            "SELECT {COLUMNS} FROM to_do ORDER BY {} {direction}, id ASC LIMIT ?1 OFFSET ?2",
            order_column(request.sort.property),
        );
        let offset = i64::try_from(request.offset()).context("page offset out of range")?;
        let rows = sqlx::query(&sql)
            .bind(i64::from(request.size))
            .bind(offset)
            .fetch_all(&*self.pool)
            .await?;
        let items = rows.iter().map(row_to_to_do).collect::<Result<Vec<_>>>()?;
        Ok(Page { items, request, total_elements: u64::try_from(total).unwrap_or_default() })
    }

    async fn get(&self, id: ToDoId) -> Result<Option<ToDo>> {
        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM to_do WHERE id = ?1"))
            .bind(id.0)
            .fetch_optional(&*self.pool)
            .await?;
        row.as_ref().map(row_to_to_do).transpose()
    }

    async fn create(&self, input: NewToDo) -> Result<ToDo> {
        let result = sqlx::query("INSERT INTO to_do (title, description, due_date) VALUES (?1, ?2, ?3)")
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.due_date.map(|d| d.0))
            .execute(&*self.pool)
            .await?;
        Ok(ToDo {
            id: ToDoId(result.last_insert_rowid()),
            title: input.title,
            description: input.description,
            due_date: input.due_date,
        })
    }

    async fn update(&self, id: ToDoId, patch: ToDoPatch) -> Result<Option<ToDo>> {
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM to_do WHERE id = ?1"))
            .bind(id.0)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(row) = row else { return Ok(None) };
        let mut item = row_to_to_do(&row)?;
        patch.apply_to(&mut item);

        sqlx::query("UPDATE to_do SET title = ?2, description = ?3, due_date = ?4 WHERE id = ?1")
            .bind(item.id.0)
            .bind(&item.title)
            .bind(&item.description)
            .bind(item.due_date.map(|d| d.0))
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(Some(item))
    }

    async fn delete(&self, id: ToDoId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM to_do WHERE id = ?1")
            .bind(id.0)
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_all(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM to_do").execute(&*self.pool).await?;
        Ok(result.rows_affected())
    }
}

fn row_to_to_do(row: &SqliteRow) -> Result<ToDo> {
    let due_date: Option<NaiveDateTime> = row.try_get("due_date")?;
    Ok(ToDo {
        id: ToDoId(row.try_get("id")?),
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        due_date: due_date.map(DueDate),
    })
}
