use fuzzy_infer::{EnhancementParameters, ImageMetrics, InferenceResult, KnowledgeBase};
use std::sync::Arc;

use crate::error::ApiError;
use crate::imaging::{analyze, apply_enhancements, RgbaImage};
use crate::services::InferenceCache;

/// Everything produced by one enhancement run
#[derive(Debug, Clone)]
pub struct EnhancementReport {
    /// Metrics of the input image
    pub original_metrics: ImageMetrics,
    /// Full inference trace for `original_metrics`
    pub result: Arc<InferenceResult>,
    /// Enhanced output image
    pub image: RgbaImage,
    /// Metrics of the enhanced image
    pub enhanced_metrics: ImageMetrics,
}

impl EnhancementReport {
    pub fn parameters(&self) -> &EnhancementParameters {
        &self.result.parameters
    }
}

/// Analyze, infer, enhance
///
/// Holds the active knowledge base and, when enabled, the inference cache.
pub struct EnhancementPipeline {
    knowledge_base: Arc<KnowledgeBase>,
    cache: Option<Arc<InferenceCache>>,
}

impl EnhancementPipeline {
    pub fn new(knowledge_base: Arc<KnowledgeBase>, cache: Option<Arc<InferenceCache>>) -> Self {
        Self {
            knowledge_base,
            cache,
        }
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.knowledge_base
    }

    pub fn cache(&self) -> Option<&InferenceCache> {
        self.cache.as_deref()
    }

    /// Infer parameters for `metrics`, consulting the cache first
    pub async fn infer(&self, metrics: &ImageMetrics) -> Arc<InferenceResult> {
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get(metrics).await {
                tracing::trace!(?metrics, "Inference cache hit");
                return hit;
            }
        }

        let result = Arc::new(self.knowledge_base.infer(metrics));
        if let Some(cache) = &self.cache {
            cache.store(metrics, result.clone()).await;
        }
        result
    }

    /// Run the whole pipeline synchronously, bypassing the cache
    pub fn enhance(&self, image: &RgbaImage) -> EnhancementReport {
        let original_metrics = analyze(image);
        let result = Arc::new(self.knowledge_base.infer(&original_metrics));
        let enhanced = apply_enhancements(image, &result.parameters);
        let enhanced_metrics = analyze(&enhanced);

        EnhancementReport {
            original_metrics,
            result,
            image: enhanced,
            enhanced_metrics,
        }
    }

    /// Analyze an image on the blocking pool
    pub async fn analyze_blocking(&self, image: Arc<RgbaImage>) -> Result<ImageMetrics, ApiError> {
        tokio::task::spawn_blocking(move || analyze(&image))
            .await
            .map_err(|e| ApiError::Internal(format!("Analysis task failed: {e}")))
    }

    /// Run the whole pipeline, with pixel work on the blocking pool and
    /// inference through the cache
    pub async fn enhance_blocking(&self, image: RgbaImage) -> Result<EnhancementReport, ApiError> {
        let image = Arc::new(image);
        let original_metrics = self.analyze_blocking(image.clone()).await?;
        let result = self.infer(&original_metrics).await;

        let params = result.parameters;
        let (enhanced, enhanced_metrics) = tokio::task::spawn_blocking(move || {
            let enhanced = apply_enhancements(&image, &params);
            let metrics = analyze(&enhanced);
            (enhanced, metrics)
        })
        .await
        .map_err(|e| ApiError::Internal(format!("Enhancement task failed: {e}")))?;

        tracing::debug!(
            brightness_adj = params.brightness_adj,
            contrast_adj = params.contrast_adj,
            sharpen = params.sharpen,
            denoise = params.denoise,
            fired = result.fired_rules.len(),
            "Enhanced image"
        );

        Ok(EnhancementReport {
            original_metrics,
            result,
            image: enhanced,
            enhanced_metrics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pipeline(cache: bool) -> EnhancementPipeline {
        EnhancementPipeline::new(
            Arc::new(KnowledgeBase::standard().clone()),
            cache.then(|| Arc::new(InferenceCache::new(16))),
        )
    }

    fn dark_image() -> RgbaImage {
        RgbaImage::from_fn(8, 8, |x, y| {
            let v = 10 + ((x + y) % 3) as u8 * 5;
            [v, v, v, 255]
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_cached_infer_matches_fresh() {
        let p = pipeline(true);
        let m = ImageMetrics::new(127.0, 50.0, 70.0, 10.0);

        let first = p.infer(&m).await;
        let second = p.infer(&m).await;
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(*first, KnowledgeBase::standard().infer(&m));
        assert_eq!(p.cache().unwrap().len().await, 1);
    }

    #[tokio::test]
    async fn test_uncached_infer() {
        let p = pipeline(false);
        let m = ImageMetrics::new(127.0, 50.0, 70.0, 10.0);
        let first = p.infer(&m).await;
        let second = p.infer(&m).await;
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(first, second);
    }

    #[test]
    fn test_enhance_brightens_dark_image() {
        let p = pipeline(false);
        let report = p.enhance(&dark_image());

        assert!(report.original_metrics.brightness < 20.0);
        assert!(report.parameters().brightness_adj > 0.0);
        assert!(report.enhanced_metrics.brightness > report.original_metrics.brightness);
        assert_eq!(report.image.width(), 8);
    }

    #[tokio::test]
    async fn test_blocking_matches_sync() {
        let p = pipeline(true);
        let sync = p.enhance(&dark_image());
        let blocking = p.enhance_blocking(dark_image()).await.unwrap();

        assert_eq!(sync.original_metrics, blocking.original_metrics);
        assert_eq!(*sync.result, *blocking.result);
        assert_eq!(sync.image, blocking.image);
        assert_eq!(sync.enhanced_metrics, blocking.enhanced_metrics);
    }
}
