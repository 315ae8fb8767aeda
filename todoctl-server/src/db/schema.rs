//! Schema for the todos table

use sqlx::sqlite::SqliteConnection;

/// Create the todos table, its refresh trigger, and indexes.
///
/// Every statement is `IF NOT EXISTS`, so this is safe to run on each start.
pub async fn init(conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    tracing::debug!("Applying todos schema");

    // Timestamps are UTC text with millisecond precision so that
    // lexical order matches chronological order.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS todos (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            description TEXT,
            frequency TEXT NOT NULL
                CHECK (frequency IN ('daily', 'weekly', 'monthly', 'yearly')),
            status TEXT NOT NULL DEFAULT 'open'
                CHECK (status IN ('open', 'in_progress', 'completed')),
            goal_date TEXT,
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now')),
            updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now'))
        )
        "#,
    )
    .execute(&mut *conn)
    .await?;

    // updated_at must strictly increase, even for two updates in the same millisecond
    sqlx::query(
        r#"
        CREATE TRIGGER IF NOT EXISTS update_todos_timestamp
        AFTER UPDATE ON todos
        BEGIN
            UPDATE todos
            SET updated_at = CASE
                WHEN strftime('%Y-%m-%d %H:%M:%f', 'now') > OLD.updated_at
                    THEN strftime('%Y-%m-%d %H:%M:%f', 'now')
                ELSE strftime('%Y-%m-%d %H:%M:%f', OLD.updated_at, '+0.001 seconds')
            END
            WHERE id = NEW.id;
        END
        "#,
    )
    .execute(&mut *conn)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_status ON todos(status)")
        .execute(&mut *conn)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_frequency ON todos(frequency)")
        .execute(&mut *conn)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_goal_date ON todos(goal_date)")
        .execute(&mut *conn)
        .await?;

    Ok(())
}
