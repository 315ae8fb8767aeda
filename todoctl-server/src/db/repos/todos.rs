//! Todo repository
//!
//! Every write is followed by a re-fetch, so callers always see the row
//! as stored (defaults and trigger-maintained timestamps included).

use chrono::NaiveDateTime;
use sqlx::sqlite::{Sqlite, SqliteConnection};
use sqlx::{Connection, FromRow, QueryBuilder};

use crate::db::Store;
use crate::models::{Frequency, NewTodo, Status, TodoChanges};

/// Todo record from database
#[derive(Debug, Clone, FromRow)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub frequency: Frequency,
    pub status: Status,
    pub goal_date: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}

impl DbError {
    fn todo_not_found(id: i64) -> Self {
        Self::NotFound {
            resource: "todo",
            id: id.to_string(),
        }
    }
}

/// Todo repository over a single connection.
pub struct TodoRepo {
    conn: SqliteConnection,
}

impl TodoRepo {
    /// Open a fresh connection to `store`.
    pub async fn open(store: &Store) -> Result<Self, DbError> {
        Ok(Self {
            conn: store.connect().await?,
        })
    }

    /// Close the underlying connection.
    ///
    /// Dropping the repository also releases it; `close` additionally
    /// reports errors from the shutdown.
    pub async fn close(self) -> Result<(), DbError> {
        self.conn.close().await?;
        Ok(())
    }

    /// List all todos, newest first.
    pub async fn list(&mut self) -> Result<Vec<Todo>, DbError> {
        let todos = sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, title, description, frequency, status, goal_date, created_at, updated_at
            FROM todos
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&mut self.conn)
        .await?;

        Ok(todos)
    }

    /// Get a single todo by id.
    pub async fn get(&mut self, id: i64) -> Result<Todo, DbError> {
        sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, title, description, frequency, status, goal_date, created_at, updated_at
            FROM todos
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&mut self.conn)
        .await?
        .ok_or_else(|| DbError::todo_not_found(id))
    }

    /// Insert a todo and return the stored row.
    pub async fn create(&mut self, todo: &NewTodo) -> Result<Todo, DbError> {
        let result = sqlx::query(
            r#"
            INSERT INTO todos (title, description, frequency, status, goal_date)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(todo.title.as_str())
        .bind(&todo.description)
        .bind(todo.frequency)
        .bind(todo.status)
        .bind(&todo.goal_date)
        .execute(&mut self.conn)
        .await?;

        let id = result.last_insert_rowid();
        tracing::info!(id, "Created todo");

        self.get(id).await
    }

    /// Apply `changes` to an existing todo and return the stored row.
    ///
    /// Only the columns present in `changes` are written, in one statement.
    pub async fn update(&mut self, id: i64, changes: &TodoChanges) -> Result<Todo, DbError> {
        if changes.is_empty() {
            return self.get(id).await;
        }

        let mut builder = QueryBuilder::<Sqlite>::new("UPDATE todos SET ");
        {
            let mut set = builder.separated(", ");
            if let Some(title) = &changes.title {
                set.push("title = ");
                set.push_bind_unseparated(title.as_str().to_owned());
            }
            if let Some(description) = &changes.description {
                set.push("description = ");
                set.push_bind_unseparated(description.clone());
            }
            if let Some(frequency) = changes.frequency {
                set.push("frequency = ");
                set.push_bind_unseparated(frequency);
            }
            if let Some(status) = changes.status {
                set.push("status = ");
                set.push_bind_unseparated(status);
            }
            if let Some(goal_date) = &changes.goal_date {
                set.push("goal_date = ");
                set.push_bind_unseparated(goal_date.clone());
            }
        }
        builder.push(" WHERE id = ");
        builder.push_bind(id);

        let result = builder.build().execute(&mut self.conn).await?;
        if result.rows_affected() == 0 {
            return Err(DbError::todo_not_found(id));
        }
        tracing::debug!(id, "Updated todo");

        self.get(id).await
    }

    /// Delete a todo, failing with `NotFound` if it does not exist.
    pub async fn delete(&mut self, id: i64) -> Result<(), DbError> {
        self.get(id).await?;

        sqlx::query("DELETE FROM todos WHERE id = ?")
            .bind(id)
            .execute(&mut self.conn)
            .await?;
        tracing::info!(id, "Deleted todo");

        Ok(())
    }
}
