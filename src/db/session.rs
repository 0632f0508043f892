use sqlx::SqlitePool;

pub async fn insert(
    pool: &SqlitePool,
    jti: &str,
    user_id: i64,
    expires_at: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO sessions (jti, user_id, expires_at) VALUES (?, ?, ?)")
        .bind(jti)
        .bind(user_id)
        .bind(expires_at)
        .execute(pool)
        .await?;
    Ok(())
}

/// Drops sessions whose token can no longer verify. Returns how many went.
pub async fn purge_expired(pool: &SqlitePool, now: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
        .bind(now)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// A session is live while it is neither revoked nor expired and still
/// belongs to the user named in the token.
pub async fn is_active(
    pool: &SqlitePool,
    jti: &str,
    user_id: i64,
    now: i64,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM sessions
            WHERE jti = ? AND user_id = ? AND revoked = 0 AND expires_at > ?
        )
        "#,
    )
    .bind(jti)
    .bind(user_id)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Idempotent.
pub async fn revoke(pool: &SqlitePool, jti: &str) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE sessions SET revoked = 1 WHERE jti = ?")
        .bind(jti)
        .execute(pool)
        .await?;
    Ok(())
}
