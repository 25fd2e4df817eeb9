/// Returns a cached value for a key, or computes, caches and returns it.
///
/// `$cache` must provide `get_from_cache` and `set_in_background`; `$block` is a
/// future resolving to `AppResult<T>`. Errors from `$block` are returned through
/// `?` and never cached.
///
/// # Example
/// ```rust,ignore
/// let recs: AppResult<Vec<ScoredTitle>> = cached!(cache, key, 3600, async move {
///     snapshot.recommend_scored(&title, n)
/// });
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $ttl:expr, $block:expr) => {{
        if let Some(cached) = $cache.get_from_cache(&$key).await? {
            Ok(cached)
        } else {
            let value = $block.await?;
            $cache.set_in_background(&$key, &value, $ttl);
            Ok(value)
        }
    }};
}
