use sqlx::SqlitePool;

use crate::model::{role::Role, user::User};

/// Fails with a unique violation if the username is already present.
pub async fn create_user(
    pool: &SqlitePool,
    username: &str,
    password_hash: &str,
    role: Role,
) -> Result<User, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (username, password, role)
        VALUES (?, ?, ?)
        RETURNING id, username, password, role
        "#,
    )
    .bind(username)
    .bind(password_hash)
    .bind(role.as_ref())
    .fetch_one(pool)
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, role = %user.role, "User created");
    Ok(user)
}

/// Session loader: resolves the identity behind a session.
pub async fn load_user(pool: &SqlitePool, id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT id, username, password, role FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT id, username, password, role FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await
}

pub async fn list_all(pool: &SqlitePool) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT id, username, password, role FROM users ORDER BY id")
        .fetch_all(pool)
        .await
}
