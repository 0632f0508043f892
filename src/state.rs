use actix_governor::{
    GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use anyhow::{Context, Result};
use sqlx::SqlitePool;
use tera::Tera;

use crate::{config::Config, utils::username_index::UsernameIndex, views};

pub type Limiter = GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware>;

/// Per-route limiter settings, built once so every worker shares one bucket.
#[derive(Clone)]
pub struct RateLimits {
    pub login: Limiter,
    pub register: Limiter,
    pub protected: Limiter,
}

impl RateLimits {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            login: build_limiter(config.rate_login_per_min).context("login rate limit")?,
            register: build_limiter(config.rate_register_per_min).context("register rate limit")?,
            protected: build_limiter(config.rate_protected_per_min)
                .context("protected rate limit")?,
        })
    }
}

fn build_limiter(requests_per_min: u32) -> Result<Limiter> {
    let per_ms = (60_000 / u64::from(requests_per_min.max(1))).max(1);
    GovernorConfigBuilder::default()
        .milliseconds_per_request(per_ms)
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .context("burst size and period must be non-zero")
}

pub struct AppState {
    pub pool: SqlitePool,
    pub config: Config,
    pub templates: Tera,
    pub usernames: UsernameIndex,
    pub limits: RateLimits,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: Config) -> Result<Self> {
        Ok(Self {
            templates: views::templates().context("Failed to load templates")?,
            limits: RateLimits::from_config(&config)?,
            usernames: UsernameIndex::new(),
            pool,
            config,
        })
    }
}
