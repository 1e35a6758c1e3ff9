use anyhow::Context;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS employees (
        id            INTEGER PRIMARY KEY AUTOINCREMENT,
        name          TEXT    NOT NULL,
        email         TEXT    NOT NULL UNIQUE,
        department    TEXT    NOT NULL,
        joining_date  TEXT    NOT NULL,
        role          TEXT    NOT NULL DEFAULT 'employee',
        leave_balance INTEGER NOT NULL DEFAULT 20 CHECK (leave_balance >= 0)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS leave_requests (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        employee_id INTEGER NOT NULL,
        start_date  TEXT    NOT NULL,
        end_date    TEXT    NOT NULL,
        reason      TEXT    NOT NULL,
        status      TEXT    NOT NULL DEFAULT 'pending',
        days        INTEGER NOT NULL,
        created_at  TEXT    NOT NULL DEFAULT (datetime('now'))
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_leave_requests_employee
        ON leave_requests(employee_id)
    "#,
];

pub async fn init_db(database_url: &str) -> anyhow::Result<SqlitePool> {
    // A :memory: database lives and dies with its connection, so the pool
    // must never rotate it out.
    let max_conns = if database_url.contains(":memory:") { 1 } else { 5 };

    let pool = SqlitePoolOptions::new()
        .max_connections(max_conns)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;

    for stmt in SCHEMA {
        sqlx::query(stmt)
            .execute(&pool)
            .await
            .context("Failed to apply schema")?;
    }

    Ok(pool)
}
