use crate::context::AnalysisContext;
use crate::parse;
use crate::prompt::{build_prompt, PromptTemplate};
use llm_interface::LlmProvider;
use psyche_core::{
    AnalysisResult, AppConfig, CommentBatch, CoreError, LlmError, DEFAULT_MAX_COMMENTS,
};
use reddit_client::CommentSource;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

/// Everything an [`Analyzer`] needs besides its collaborators.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerConfig {
    pub model: String,
    pub max_comments: usize,
    pub interests: PromptTemplate,
    pub summary: PromptTemplate,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o".to_string(),
            max_comments: DEFAULT_MAX_COMMENTS,
            interests: PromptTemplate::interests(),
            summary: PromptTemplate::summary(),
        }
    }
}

impl From<&AppConfig> for AnalyzerConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            model: config.model.clone(),
            max_comments: config.max_comments,
            ..Self::default()
        }
    }
}

/// Turns a username into an [`AnalysisResult`].
///
/// Comments are fetched once, then the interest and summary prompts are
/// sent one after the other. Any failure, an elapsed deadline or a
/// cancellation ends the analysis; nothing partial is returned.
pub struct Analyzer<S, P> {
    source: S,
    provider: P,
    config: AnalyzerConfig,
}

impl<S, P> Analyzer<S, P>
where
    S: CommentSource,
    P: LlmProvider,
{
    pub fn new(source: S, provider: P, config: AnalyzerConfig) -> Self {
        Self {
            source,
            provider,
            config,
        }
    }

    pub async fn analyze(
        &self,
        ctx: &AnalysisContext,
        username: &str,
    ) -> Result<AnalysisResult, CoreError> {
        let span = info_span!("analysis", analysis_id = %Uuid::new_v4(), username);

        async {
            let analysis = self.run_steps(ctx, username).await?;
            info!(
                interests = analysis.interests.len(),
                summary_chars = analysis.summary.len(),
                "Analysis completed"
            );
            Ok::<_, CoreError>(analysis)
        }
        .instrument(span)
        .await
    }

    async fn run_steps(
        &self,
        ctx: &AnalysisContext,
        username: &str,
    ) -> Result<AnalysisResult, CoreError> {
        info!("Fetching comments");
        let comments = ctx
            .run(self.source.user_comments(username, self.config.max_comments))
            .await?
            .map_err(CoreError::RetrievalFailed)?;
        if comments.is_empty() {
            warn!("No comments found, analysing an empty transcript");
        }

        info!(comments = comments.len(), "Extracting interests");
        let interests = ctx
            .run(self.extract_interests(&comments))
            .await?
            .map_err(CoreError::InterestExtractionFailed)?;

        info!("Generating summary");
        let summary = ctx
            .run(self.generate_summary(&comments))
            .await?
            .map_err(CoreError::SummaryGenerationFailed)?;

        Ok(AnalysisResult { interests, summary })
    }

    async fn extract_interests(&self, comments: &CommentBatch) -> Result<Vec<String>, LlmError> {
        let request = build_prompt(&self.config.model, &self.config.interests, comments);
        debug!(
            transcript_bytes = request.messages[1].content.len(),
            "Sending interests prompt to {}",
            self.provider.name()
        );
        let response = self.provider.chat(&request).await?;
        parse::interests_from(&response)
    }

    async fn generate_summary(&self, comments: &CommentBatch) -> Result<String, LlmError> {
        let request = build_prompt(&self.config.model, &self.config.summary, comments);
        debug!(
            transcript_bytes = request.messages[1].content.len(),
            "Sending summary prompt to {}",
            self.provider.name()
        );
        let response = self.provider.chat(&request).await?;
        parse::summary_from(&response)
    }
}
