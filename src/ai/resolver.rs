//! Provider fallback resolution.
//!
//! The resolver tries its configured providers sequentially in priority
//! order and returns the first schema-valid success, tagged with that
//! provider's source. Any failure logs a warning and demotes to the next
//! tier. When the chain is exhausted, a deterministic baseline response is
//! synthesized instead; the resolve methods therefore never fail.
//!
//! There are no retries, no backoff, and no provider health caching: a
//! request walks the chain once, top to bottom.

use std::sync::Arc;

use super::{
    baseline, huggingface::HuggingFaceClient, replicate::ReplicateClient, watsonx::WatsonxClient,
    AiProvider, AiSource, ChatPayload, PlanPayload, PlanRequest, VisionPayload,
};
use crate::config::Config;

/// A payload tagged with the tier that produced it.
#[derive(Debug, Clone)]
pub struct Resolved<T> {
    pub source: AiSource,
    pub payload: T,
}

/// Ordered provider chains for each request kind.
///
/// Plan and chat prefer watsonx; vision prefers Hugging Face because its
/// captioning models handle images directly. Both chains end in the same
/// Replicate tier when enabled.
pub struct FallbackResolver {
    text_chain: Vec<Arc<dyn AiProvider>>,
    vision_chain: Vec<Arc<dyn AiProvider>>,
}

impl FallbackResolver {
    /// Build a resolver with explicit chains. Used directly by tests to
    /// inject fake providers.
    pub fn new(
        text_chain: Vec<Arc<dyn AiProvider>>,
        vision_chain: Vec<Arc<dyn AiProvider>>,
    ) -> Self {
        Self {
            text_chain,
            vision_chain,
        }
    }

    /// Build the production chains from configuration.
    ///
    /// A tier with missing credentials is simply absent from the chains;
    /// with no credentials at all, every request resolves to baseline.
    pub fn from_config(config: &Config) -> Self {
        let timeout = config.provider_timeout;

        let watsonx: Option<Arc<dyn AiProvider>> = match (
            config.watsonx_api_key.clone(),
            config.watsonx_project_id.clone(),
        ) {
            (Some(key), Some(project)) => Some(Arc::new(WatsonxClient::new(
                key,
                project,
                config.watsonx_endpoint.clone(),
                timeout,
            ))),
            _ => None,
        };

        let huggingface: Option<Arc<dyn AiProvider>> = config
            .hf_api_key
            .clone()
            .map(|key| Arc::new(HuggingFaceClient::new(key, timeout)) as Arc<dyn AiProvider>);

        let replicate: Option<Arc<dyn AiProvider>> = if config.use_replicate {
            config
                .replicate_api_token
                .clone()
                .map(|token| Arc::new(ReplicateClient::new(token, timeout)) as Arc<dyn AiProvider>)
        } else {
            None
        };

        let text_chain: Vec<Arc<dyn AiProvider>> = [
            watsonx.clone(),
            huggingface.clone(),
            replicate.clone(),
        ]
        .into_iter()
        .flatten()
        .collect();

        let vision_chain: Vec<Arc<dyn AiProvider>> = [huggingface, watsonx, replicate]
            .into_iter()
            .flatten()
            .collect();

        Self::new(text_chain, vision_chain)
    }

    /// Source labels of the text chain, in trial order.
    pub fn text_tiers(&self) -> Vec<AiSource> {
        self.text_chain.iter().map(|p| p.source()).collect()
    }

    /// Resolve a travel-plan request, falling back to a synthesized plan.
    pub async fn resolve_plan(&self, request: &PlanRequest) -> Resolved<PlanPayload> {
        for provider in &self.text_chain {
            match provider.travel_plan(request).await {
                Ok(payload) => {
                    return Resolved {
                        source: provider.source(),
                        payload,
                    }
                }
                Err(e) => {
                    tracing::warn!("{} travel plan failed: {}", provider.source().as_str(), e);
                }
            }
        }

        Resolved {
            source: AiSource::Baseline,
            payload: baseline::travel_plan(request),
        }
    }

    /// Resolve a landmark-identification request.
    pub async fn resolve_vision(&self, image_b64: &str) -> Resolved<VisionPayload> {
        for provider in &self.vision_chain {
            match provider.identify_landmarks(image_b64).await {
                Ok(payload) => {
                    return Resolved {
                        source: provider.source(),
                        payload,
                    }
                }
                Err(e) => {
                    tracing::warn!("{} vision failed: {}", provider.source().as_str(), e);
                }
            }
        }

        Resolved {
            source: AiSource::Baseline,
            payload: baseline::vision(),
        }
    }

    /// Resolve a chat message, falling back to the keyword rule table.
    pub async fn resolve_chat(&self, message: &str) -> Resolved<ChatPayload> {
        for provider in &self.text_chain {
            match provider.chat(message).await {
                Ok(payload) => {
                    return Resolved {
                        source: provider.source(),
                        payload,
                    }
                }
                Err(e) => {
                    tracing::warn!("{} chat failed: {}", provider.source().as_str(), e);
                }
            }
        }

        Resolved {
            source: AiSource::Baseline,
            payload: baseline::chat_reply(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{BudgetRange, ProviderError};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fake provider that either answers with a marker plan/chat payload or
    /// fails, and counts how often it was called.
    struct FakeProvider {
        source: AiSource,
        healthy: bool,
        calls: AtomicUsize,
    }

    impl FakeProvider {
        fn healthy(source: AiSource) -> Arc<Self> {
            Arc::new(Self {
                source,
                healthy: true,
                calls: AtomicUsize::new(0),
            })
        }

        fn failing(source: AiSource) -> Arc<Self> {
            Arc::new(Self {
                source,
                healthy: false,
                calls: AtomicUsize::new(0),
            })
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl AiProvider for FakeProvider {
        fn source(&self) -> AiSource {
            self.source
        }

        async fn travel_plan(&self, request: &PlanRequest) -> Result<PlanPayload, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.healthy {
                Ok(baseline::travel_plan(request))
            } else {
                Err(ProviderError::Unavailable("down".to_string()))
            }
        }

        async fn identify_landmarks(
            &self,
            _image_b64: &str,
        ) -> Result<VisionPayload, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.healthy {
                Ok(baseline::demo_vision())
            } else {
                Err(ProviderError::Malformed("garbage".to_string()))
            }
        }

        async fn chat(&self, message: &str) -> Result<ChatPayload, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.healthy {
                Ok(ChatPayload {
                    answer: format!("{}: {}", self.source.as_str(), message),
                    confidence: 0.9,
                    suggestions: vec![],
                })
            } else {
                Err(ProviderError::Unavailable("down".to_string()))
            }
        }
    }

    fn plan_request() -> PlanRequest {
        PlanRequest {
            destination: "Bali".to_string(),
            duration_days: 3,
            budget_range: BudgetRange::Sedang,
            preferences: vec![],
            departure_city: None,
        }
    }

    fn resolver_of(chain: Vec<Arc<FakeProvider>>) -> FallbackResolver {
        let dyn_chain: Vec<Arc<dyn AiProvider>> = chain
            .into_iter()
            .map(|p| p as Arc<dyn AiProvider>)
            .collect();
        FallbackResolver::new(dyn_chain.clone(), dyn_chain)
    }

    #[tokio::test]
    async fn test_primary_success_is_tagged_primary() {
        let primary = FakeProvider::healthy(AiSource::Watsonx);
        let secondary = FakeProvider::healthy(AiSource::Huggingface);
        let resolver = resolver_of(vec![Arc::clone(&primary), Arc::clone(&secondary)]);

        let resolved = resolver.resolve_plan(&plan_request()).await;
        assert_eq!(resolved.source, AiSource::Watsonx);
        assert_eq!(primary.call_count(), 1);
        // Secondary is never speculatively called.
        assert_eq!(secondary.call_count(), 0);
    }

    #[tokio::test]
    async fn test_primary_failure_demotes_to_secondary() {
        let primary = FakeProvider::failing(AiSource::Watsonx);
        let secondary = FakeProvider::healthy(AiSource::Huggingface);
        let resolver = resolver_of(vec![Arc::clone(&primary), Arc::clone(&secondary)]);

        let resolved = resolver.resolve_chat("halo").await;
        assert_eq!(resolved.source, AiSource::Huggingface);
        assert_eq!(primary.call_count(), 1);
        assert_eq!(secondary.call_count(), 1);
    }

    #[tokio::test]
    async fn test_exhausted_chain_returns_baseline() {
        let first = FakeProvider::failing(AiSource::Watsonx);
        let second = FakeProvider::failing(AiSource::Huggingface);
        let third = FakeProvider::failing(AiSource::Replicate);
        let resolver = resolver_of(vec![first, second, third]);

        let resolved = resolver.resolve_plan(&plan_request()).await;
        assert_eq!(resolved.source, AiSource::Baseline);
        assert_eq!(resolved.payload.destination, "Bali");
    }

    #[tokio::test]
    async fn test_empty_chain_is_baseline_only() {
        let resolver = FallbackResolver::new(vec![], vec![]);

        let plan = resolver.resolve_plan(&plan_request()).await;
        assert_eq!(plan.source, AiSource::Baseline);

        let chat = resolver.resolve_chat("Liburan ke Bali").await;
        assert_eq!(chat.source, AiSource::Baseline);
        assert!(chat.payload.answer.contains("Bali"));

        let vision = resolver.resolve_vision("aGVsbG8=").await;
        assert_eq!(vision.source, AiSource::Baseline);
    }

    #[tokio::test]
    async fn test_malformed_response_also_demotes() {
        // The failing fake returns Malformed for vision; still demotes.
        let first = FakeProvider::failing(AiSource::Huggingface);
        let second = FakeProvider::healthy(AiSource::Watsonx);
        let resolver = resolver_of(vec![first, Arc::clone(&second)]);

        let resolved = resolver.resolve_vision("aGVsbG8=").await;
        assert_eq!(resolved.source, AiSource::Watsonx);
    }

    #[test]
    fn test_from_config_respects_credentials() {
        let mut config = Config::from_lookup(|_| None);
        assert!(FallbackResolver::from_config(&config).text_tiers().is_empty());

        config.hf_api_key = Some("key".to_string());
        let resolver = FallbackResolver::from_config(&config);
        assert_eq!(resolver.text_tiers(), vec![AiSource::Huggingface]);

        config.watsonx_api_key = Some("key".to_string());
        config.watsonx_project_id = Some("project".to_string());
        let resolver = FallbackResolver::from_config(&config);
        assert_eq!(
            resolver.text_tiers(),
            vec![AiSource::Watsonx, AiSource::Huggingface]
        );

        // Token alone is not enough for the Replicate tier.
        config.replicate_api_token = Some("token".to_string());
        let resolver = FallbackResolver::from_config(&config);
        assert_eq!(resolver.text_tiers().len(), 2);

        config.use_replicate = true;
        let resolver = FallbackResolver::from_config(&config);
        assert_eq!(
            resolver.text_tiers(),
            vec![AiSource::Watsonx, AiSource::Huggingface, AiSource::Replicate]
        );
    }
}
