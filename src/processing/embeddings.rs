//! Semantic scoring with Model2Vec embeddings
//!
//! One engine instance is loaded at startup and shared read-only across the
//! batch behind an `Arc`; `StaticModel::encode` takes `&self` and is safe
//! for concurrent inference calls. Inference runs on the blocking pool under
//! a configurable timeout.

use crate::config::Config;
use crate::error::{Result, ResumeRankerError};
use log::info;
use model2vec_rs::model::StaticModel;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub struct EmbeddingEngine {
    model: StaticModel,
    model_name: String,
    timeout: Duration,
}

impl EmbeddingEngine {
    pub fn new(model_path: &Path, config: &Config) -> Result<Self> {
        let start = Instant::now();
        info!("Loading embedding model from: {}", model_path.display());

        let model = StaticModel::from_pretrained(model_path, None, None, None)
            .map_err(|e| ResumeRankerError::ModelLoading(format!("Failed to load model: {}", e)))?;

        info!("Embedding model loaded in {:.2?}", start.elapsed());

        Ok(Self {
            model,
            model_name: config.models.embedding_model.clone(),
            timeout: Duration::from_secs(config.processing.embed_timeout_secs),
        })
    }

    /// Resolve the configured model through the local store (downloading on
    /// first use) and load it.
    pub async fn load(config: &Config) -> Result<Self> {
        let store = crate::processing::model_store::ModelStore::new(config.models_dir().clone());
        let model_path = store.ensure_available(&config.models.embedding_model).await?;
        Self::new(&model_path, config)
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn encode(&self, texts: &[String]) -> Vec<Vec<f32>> {
        self.model.encode(texts)
    }

    pub fn encode_single(&self, text: &str) -> Vec<f32> {
        self.model.encode_single(text)
    }

    /// Cosine similarity between two texts, computed on the blocking pool
    /// within the configured inference budget.
    pub async fn similarity(self: Arc<Self>, a: String, b: String) -> Result<f32> {
        let timeout = self.timeout;
        let engine = Arc::clone(&self);
        let task = tokio::task::spawn_blocking(move || {
            let embeddings = engine.encode(&[a, b]);
            Self::cosine_similarity(&embeddings[0], &embeddings[1])
        });

        match tokio::time::timeout(timeout, task).await {
            Err(_) => Err(ResumeRankerError::EmbeddingTimeout(timeout.as_secs())),
            Ok(Err(join_error)) => Err(ResumeRankerError::Embedding(format!(
                "inference task failed: {}",
                join_error
            ))),
            Ok(Ok(similarity)) => similarity,
        }
    }

    /// Cosine similarity between two embedding vectors. Zero-norm vectors
    /// yield 0.0 rather than NaN.
    pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
        if a.len() != b.len() {
            return Err(ResumeRankerError::Embedding(format!(
                "Embedding dimensions don't match: {} vs {}",
                a.len(),
                b.len()
            )));
        }
        if a.is_empty() {
            return Ok(0.0);
        }

        let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
        let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

        if norm_a == 0.0 || norm_b == 0.0 {
            Ok(0.0)
        } else {
            Ok(dot_product / (norm_a * norm_b))
        }
    }
}
