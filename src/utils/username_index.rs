use anyhow::{Result, anyhow};
use autoscale_cuckoo_filter::CuckooFilter;
use futures::StreamExt;
use moka::future::Cache;
use sqlx::SqlitePool;
use std::sync::{PoisonError, RwLock};
use std::time::Duration;

/// Expected capacity and false-positive rate.
/// Tune these based on real user counts.
const FILTER_CAPACITY: usize = 100_000;
const FALSE_POSITIVE_RATE: f64 = 0.001;

/// Fast path for username availability checks during registration.
///
/// 1. Cuckoo filter: a miss proves the name is free.
/// 2. Moka cache: a hit proves the name is taken.
/// 3. Database: the authority for everything in between.
pub struct UsernameIndex {
    filter: RwLock<CuckooFilter<String>>,
    /// Value is unused, presence means TAKEN
    taken: Cache<String, ()>,
}

/// Folds ASCII case only, the same as the store's `COLLATE NOCASE`.
#[inline]
fn normalize(username: &str) -> String {
    username.trim().to_ascii_lowercase()
}

impl UsernameIndex {
    pub fn new() -> Self {
        Self {
            filter: RwLock::new(CuckooFilter::new(FILTER_CAPACITY, FALSE_POSITIVE_RATE)),
            taken: Cache::builder()
                .max_capacity(500_000) // tune based on memory
                .time_to_live(Duration::from_secs(86400)) // 24h TTL
                .build(),
        }
    }

    /// Check if a username might exist (false positives possible)
    pub fn might_exist(&self, username: &str) -> bool {
        self.filter
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&normalize(username))
    }

    /// Record a username that is now present in the store
    pub async fn mark_taken(&self, username: &str) {
        let username = normalize(username);
        self.filter
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .add(&username);
        self.taken.insert(username, ()).await;
    }

    /// true  => username AVAILABLE
    /// false => username TAKEN
    pub async fn is_available(&self, username: &str, pool: &SqlitePool) -> Result<bool, sqlx::Error> {
        if !self.might_exist(username) {
            return Ok(true);
        }

        let username = normalize(username);
        if self.taken.contains_key(&username) {
            return Ok(false);
        }

        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username = ? LIMIT 1)",
        )
        .bind(&username)
        .fetch_one(pool)
        .await?;

        if exists {
            self.taken.insert(username, ()).await;
        }

        Ok(!exists)
    }

    /// Load every stored username into the filter, streaming in batches
    pub async fn warmup(&self, pool: &SqlitePool, batch_size: usize) -> Result<usize> {
        let mut stream = sqlx::query_as::<_, (String,)>("SELECT username FROM users").fetch(pool);

        let mut batch = Vec::with_capacity(batch_size);
        let mut total = 0usize;

        while let Some(row) = stream.next().await {
            let (username,) = row.map_err(|e| anyhow!("DB row fetch failed: {}", e))?;

            batch.push(normalize(&username));
            total += 1;

            if batch.len() == batch_size {
                self.insert_batch(&batch);
                batch.clear();
            }
        }

        if !batch.is_empty() {
            self.insert_batch(&batch);
        }

        tracing::info!(users = total, "Username filter warmup complete");
        Ok(total)
    }

    fn insert_batch(&self, usernames: &[String]) {
        let mut filter = self.filter.write().unwrap_or_else(PoisonError::into_inner);

        for username in usernames {
            filter.add(username);
        }
    }
}

impl Default for UsernameIndex {
    fn default() -> Self {
        Self::new()
    }
}
