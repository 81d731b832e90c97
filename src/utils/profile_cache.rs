use anyhow::Result;
use futures_util::StreamExt;
use moka::future::Cache;
use once_cell::sync::Lazy;
use sqlx::MySqlPool;
use std::time::Duration;

use crate::model::profile::Profile;
use crate::store;

/// Employee profiles keyed by id. Every request resolves its viewer profile,
/// so a short TTL keeps role changes visible without hitting the store each
/// time.
pub static PROFILE_CACHE: Lazy<Cache<u64, Profile>> = Lazy::new(|| {
    Cache::builder()
        .max_capacity(50_000)
        .time_to_live(Duration::from_secs(300)) // 5 min TTL
        .build()
});

/// Resolve a viewer's profile, cache-first. `Ok(None)` means the token named
/// a viewer the store does not know, which callers treat as an
/// authentication failure.
pub async fn viewer_profile(pool: &MySqlPool, viewer_id: u64) -> Result<Option<Profile>, sqlx::Error> {
    if let Some(profile) = PROFILE_CACHE.get(&viewer_id).await {
        return Ok(Some(profile));
    }

    let fetched = store::fetch_profile(pool, viewer_id).await?;
    if let Some(profile) = &fetched {
        PROFILE_CACHE.insert(viewer_id, profile.clone()).await;
    }
    Ok(fetched)
}

async fn batch_insert(profiles: &[Profile]) {
    let futures: Vec<_> = profiles
        .iter()
        .map(|p| PROFILE_CACHE.insert(p.id, p.clone()))
        .collect();

    futures::future::join_all(futures).await;
}

/// Load all employee profiles into the in-memory cache (batched).
pub async fn warmup_profile_cache(pool: &MySqlPool, batch_size: usize) -> Result<()> {
    let mut stream = sqlx::query_as::<_, Profile>(
        r#"
        SELECT id, name, email, employee_code, department, role
        FROM employees
        ORDER BY name
        "#,
    )
    .fetch(pool);

    let mut batch = Vec::with_capacity(batch_size);
    let mut total_count = 0usize;

    while let Some(row) = stream.next().await {
        batch.push(row?);
        total_count += 1;

        if batch.len() >= batch_size {
            batch_insert(&batch).await;
            batch.clear();
        }
    }

    if !batch.is_empty() {
        batch_insert(&batch).await;
    }

    tracing::info!("Profile cache warmup complete: {} employees", total_count);

    Ok(())
}
