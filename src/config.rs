use std::net::SocketAddr;

use anyhow::{bail, Context, Result};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://todos.db";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    /// Prefix for every generated link; empty means server-relative links.
    pub public_base_url: String,
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl Config {
    /// Reads the process environment (call `dotenvy::dotenv()` first to pick up `.env`).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR must be a socket address such as 127.0.0.1:3000")?;
        let public_base_url = lookup("PUBLIC_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_default();
        let default_page_size = page_size(&lookup, "DEFAULT_PAGE_SIZE", 20)?;
        let max_page_size = page_size(&lookup, "MAX_PAGE_SIZE", 1000)?;
        if default_page_size > max_page_size {
            bail!("DEFAULT_PAGE_SIZE ({default_page_size}) exceeds MAX_PAGE_SIZE ({max_page_size})");
        }
        Ok(Self { database_url, bind_addr, public_base_url, default_page_size, max_page_size })
    }
}

fn page_size(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: u32) -> Result<u32> {
    let Some(raw) = lookup(key) else { return Ok(default) };
    let size: u32 = raw.trim().parse().with_context(|| format!("{key} must be a positive integer, got {raw:?}"))?;
    if size == 0 { bail!("{key} must be greater than zero"); }
    Ok(size)
}
