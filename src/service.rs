//! Summary service: normalize, generate, persist
//!
//! One submission runs its stages in order with a single attempt each.

use reqwest::Client;
use tracing::{error, info};

use crate::config::Settings;
use crate::content::{Normalizer, SourceKind};
use crate::llm::{build_provider, SummaryGenerator, SummaryStyle};
use crate::storage::{NewSummary, Repository, Summary};
use crate::{Error, Result};

pub struct SummaryService {
    normalizer: Normalizer,
    /// Unavailable when the provider is misconfigured; only `submit` needs it.
    generator: std::result::Result<SummaryGenerator, String>,
    repository: Repository,
}

impl SummaryService {
    pub fn new(normalizer: Normalizer, generator: SummaryGenerator, repository: Repository) -> Self {
        Self {
            normalizer,
            generator: Ok(generator),
            repository,
        }
    }

    /// Wire the production collaborators around one shared HTTP client.
    ///
    /// A missing API key does not fail here, so history commands keep working
    /// and submissions still validate their input first.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let http = Client::new();
        let generator = build_provider(settings, http.clone())
            .map(SummaryGenerator::new)
            .map_err(|e| format!("{e:#}"));
        let repository = Repository::new(settings).map_err(storage_error)?;

        Ok(Self {
            normalizer: Normalizer::from_settings(&settings.content, http),
            generator,
            repository,
        })
    }

    /// Summarize `input` for `user_id` and store the result.
    pub async fn submit(
        &self,
        user_id: &str,
        kind: SourceKind,
        style: SummaryStyle,
        input: &str,
    ) -> Result<Summary> {
        info!(user_id, kind = kind.as_str(), style = style.as_str(), "Summarize request");

        let content = self.normalizer.normalize(kind, input).await?;
        let generator = self
            .generator
            .as_ref()
            .map_err(|reason| Error::Configuration(reason.clone()))?;
        let summary_text = generator.generate(&content.processed_text, style).await?;

        let record = NewSummary::from_content(user_id, style, content, summary_text);
        let saved = self.repository.save(&record).map_err(storage_error)?;

        info!(id = saved.id, "Summary saved");
        Ok(saved)
    }

    /// Newest-first summaries for `user_id`
    pub fn history(&self, user_id: &str, limit: usize) -> Result<Vec<Summary>> {
        self.repository
            .history(user_id, limit)
            .map_err(storage_error)
    }

    /// Fetch one summary owned by `user_id`
    pub fn get(&self, user_id: &str, id: i64) -> Result<Summary> {
        self.repository
            .get_owned(user_id, id)
            .map_err(storage_error)?
            .into_result()
    }

    /// Delete one summary owned by `user_id`
    pub fn delete(&self, user_id: &str, id: i64) -> Result<()> {
        self.repository
            .delete_owned(user_id, id)
            .map_err(storage_error)?
            .into_result()?;
        info!(id, "Summary deleted");
        Ok(())
    }
}

/// Storage failures are logged and reported as unexpected.
fn storage_error(e: anyhow::Error) -> Error {
    error!(error = %format!("{e:#}"), "Storage error");
    Error::Unexpected(format!("{e:#}"))
}
