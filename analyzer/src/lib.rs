pub mod context;
pub mod orchestrator;
pub mod parse;
pub mod prompt;

pub use context::{AnalysisContext, CancellationHandle};
pub use orchestrator::{Analyzer, AnalyzerConfig};
pub use parse::{parse_interests, parse_summary};
pub use prompt::{build_prompt, render_transcript, PromptTemplate};
