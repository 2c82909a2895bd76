use fuzzy_infer::{ImageMetrics, InferenceResult};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Exact bit patterns of the four metrics.
///
/// Two metrics share a key only if they are bit-for-bit identical, so a
/// cached result is always the one a fresh inference would produce.
type MetricsKey = [u64; 4];

fn key(metrics: &ImageMetrics) -> MetricsKey {
    [
        metrics.brightness.to_bits(),
        metrics.contrast.to_bits(),
        metrics.sharpness.to_bits(),
        metrics.noise.to_bits(),
    ]
}

/// Memoized inference results, keyed by metrics
///
/// Bounded: once `capacity` entries are held the whole map is dropped before
/// the next insert.
pub struct InferenceCache {
    cache: Arc<RwLock<HashMap<MetricsKey, Arc<InferenceResult>>>>,
    capacity: usize,
}

impl InferenceCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: Arc::new(RwLock::new(HashMap::new())),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Store the result computed for `metrics`
    pub async fn store(&self, metrics: &ImageMetrics, result: Arc<InferenceResult>) {
        if self.capacity == 0 {
            return;
        }
        let mut cache = self.cache.write().await;
        if cache.len() >= self.capacity && !cache.contains_key(&key(metrics)) {
            tracing::debug!(entries = cache.len(), "Inference cache full, clearing");
            cache.clear();
        }
        cache.insert(key(metrics), result);
    }

    /// Retrieve the cached result for `metrics`
    pub async fn get(&self, metrics: &ImageMetrics) -> Option<Arc<InferenceResult>> {
        let cache = self.cache.read().await;
        cache.get(&key(metrics)).cloned()
    }

    pub async fn len(&self) -> usize {
        self.cache.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.cache.read().await.is_empty()
    }

    pub async fn clear(&self) {
        self.cache.write().await.clear();
    }
}

impl Default for InferenceCache {
    fn default() -> Self {
        Self::new(1024)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_for(metrics: &ImageMetrics) -> Arc<InferenceResult> {
        Arc::new(fuzzy_infer::infer(metrics))
    }

    #[tokio::test]
    async fn test_store_and_get() {
        let cache = InferenceCache::new(4);
        let m = ImageMetrics::new(127.0, 50.0, 70.0, 10.0);
        assert!(cache.get(&m).await.is_none());

        cache.store(&m, result_for(&m)).await;
        let hit = cache.get(&m).await.unwrap();
        assert_eq!(*hit, fuzzy_infer::infer(&m));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_keys_are_exact() {
        let cache = InferenceCache::new(4);
        let m = ImageMetrics::new(127.0, 50.0, 70.0, 10.0);
        cache.store(&m, result_for(&m)).await;

        let nudged = ImageMetrics::new(127.0 + 1e-12, 50.0, 70.0, 10.0);
        assert!(cache.get(&nudged).await.is_none());

        // 0.0 and -0.0 compare equal but are different keys
        let zero = ImageMetrics::new(0.0, 0.0, 0.0, 0.0);
        cache.store(&zero, result_for(&zero)).await;
        assert!(cache.get(&ImageMetrics::new(-0.0, 0.0, 0.0, 0.0)).await.is_none());
    }

    #[tokio::test]
    async fn test_clears_when_full() {
        let cache = InferenceCache::new(2);
        for b in [10.0, 20.0] {
            let m = ImageMetrics::new(b, 50.0, 50.0, 10.0);
            cache.store(&m, result_for(&m)).await;
        }
        assert_eq!(cache.len().await, 2);

        // Overwriting an existing key does not count as growth
        let m = ImageMetrics::new(10.0, 50.0, 50.0, 10.0);
        cache.store(&m, result_for(&m)).await;
        assert_eq!(cache.len().await, 2);

        let m = ImageMetrics::new(30.0, 50.0, 50.0, 10.0);
        cache.store(&m, result_for(&m)).await;
        assert_eq!(cache.len().await, 1);
        assert!(cache.get(&m).await.is_some());
    }

    #[tokio::test]
    async fn test_zero_capacity_stores_nothing() {
        let cache = InferenceCache::new(0);
        let m = ImageMetrics::default();
        cache.store(&m, result_for(&m)).await;
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_clear() {
        let cache = InferenceCache::default();
        let m = ImageMetrics::default();
        cache.store(&m, result_for(&m)).await;
        cache.clear().await;
        assert!(cache.get(&m).await.is_none());
        assert_eq!(cache.capacity(), 1024);
    }
}
