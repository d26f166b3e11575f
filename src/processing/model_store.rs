//! Local store of Model2Vec embedding models fetched from the Hugging Face Hub

use crate::error::{Result, ResumeRankerError};
use hf_hub::api::tokio::Api;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Files a Model2Vec checkout must carry to be loadable.
const REQUIRED_FILES: [&str; 3] = ["model.safetensors", "tokenizer.json", "config.json"];

#[derive(Debug, Clone)]
pub struct ModelInfo {
    pub name: &'static str,
    pub repo_id: &'static str,
    pub size_mb: u64,
    pub dimensions: u32,
    pub description: &'static str,
}

/// Known embedding models, default first.
pub fn known_models() -> Vec<ModelInfo> {
    vec![
        ModelInfo {
            name: "potion-base-8M",
            repo_id: "minishlab/potion-base-8M",
            size_mb: 33,
            dimensions: 256,
            description: "High-quality Model2Vec embeddings with 8M parameters",
        },
        ModelInfo {
            name: "m2v-base",
            repo_id: "minishlab/M2V_base_output",
            size_mb: 90,
            dimensions: 256,
            description: "Legacy Model2Vec base embeddings model",
        },
        ModelInfo {
            name: "m2v-large",
            repo_id: "minishlab/M2V_large_output",
            size_mb: 250,
            dimensions: 512,
            description: "High-capacity Model2Vec large embeddings model",
        },
    ]
}

pub struct ModelStore {
    models_dir: PathBuf,
}

impl ModelStore {
    pub fn new(models_dir: PathBuf) -> Self {
        Self { models_dir }
    }

    /// Resolve a model by short name or Hub repo id.
    pub fn resolve(&self, name: &str) -> Option<ModelInfo> {
        known_models()
            .into_iter()
            .find(|m| m.name == name || m.repo_id == name)
    }

    pub fn local_path(&self, info: &ModelInfo) -> PathBuf {
        self.models_dir.join(info.name)
    }

    pub async fn is_downloaded(&self, info: &ModelInfo) -> bool {
        let dir = self.local_path(info);
        for file in REQUIRED_FILES {
            if fs::metadata(dir.join(file)).await.is_err() {
                return false;
            }
        }
        true
    }

    /// Fetch the model files from the Hub into the local store.
    pub async fn download(&self, info: &ModelInfo) -> Result<PathBuf> {
        let model_dir = self.local_path(info);
        fs::create_dir_all(&model_dir).await?;

        println!(
            "📥 Downloading embedding model: {} ({} MB) from {}",
            info.name, info.size_mb, info.repo_id
        );

        let api = Api::new().map_err(|e| {
            ResumeRankerError::ModelLoading(format!("Failed to initialize HF API: {}", e))
        })?;
        let repo = api.model(info.repo_id.to_string());

        for file in REQUIRED_FILES {
            let cached = repo.get(file).await.map_err(|e| {
                ResumeRankerError::ModelLoading(format!("Failed to download {}: {}", file, e))
            })?;
            copy_into(&cached, &model_dir.join(file)).await?;
            println!("  ✅ Downloaded: {}", file);
        }

        println!("✅ Embedding model {} ready", info.name);
        Ok(model_dir)
    }

    /// Path to a ready-to-load model, downloading it on first use.
    pub async fn ensure_available(&self, name: &str) -> Result<PathBuf> {
        let info = self.resolve(name).ok_or_else(|| {
            ResumeRankerError::ModelLoading(format!("Unknown embedding model: {}", name))
        })?;

        if self.is_downloaded(&info).await {
            return Ok(self.local_path(&info));
        }
        self.download(&info).await
    }

    pub async fn downloaded_models(&self) -> Vec<ModelInfo> {
        let mut downloaded = Vec::new();
        for info in known_models() {
            if self.is_downloaded(&info).await {
                downloaded.push(info);
            }
        }
        downloaded
    }
}

async fn copy_into(source: &Path, dest: &Path) -> Result<()> {
    fs::copy(source, dest).await?;
    Ok(())
}
