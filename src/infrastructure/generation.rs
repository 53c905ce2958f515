use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rig::client::{CompletionClient, ProviderClient};
use rig::completion::Prompt;
use rig::providers::openai;

use crate::domain::{ports::TextGeneration, DomainError, GenerationPayload, Result};

const SYSTEM_PROMPT: &str = "You are a helpful job assistant.";

const NO_MATCHES_MESSAGE: &str = "I couldn't find any postings matching your query. \
Try a specific job title or category, add a location or salary range, \
or ask about trending jobs.";

pub struct OpenAiGeneration {
    model: String,
}

impl OpenAiGeneration {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
        }
    }

    pub fn default_model() -> Self {
        Self::new("gpt-4")
    }
}

#[async_trait]
impl TextGeneration for OpenAiGeneration {
    async fn generate(&self, system: &str, prompt: &str) -> Result<String> {
        let client = openai::Client::from_env();
        let agent = client.agent(&self.model).preamble(system).build();
        agent
            .prompt(prompt)
            .await
            .map_err(|e| DomainError::generation(e.to_string()))
    }
}

/// Turns the structured payloads the core produces into prose requests. The
/// payload decides what the collaborator sees; the collaborator decides how
/// the answer reads. An empty fresh search gets the canned guidance message
/// without a provider round trip.
pub struct ResponseGenerator {
    llm: Arc<dyn TextGeneration>,
    system_prompt: String,
    timeout: Duration,
}

impl ResponseGenerator {
    pub fn new(llm: Arc<dyn TextGeneration>, timeout: Duration) -> Self {
        Self {
            llm,
            system_prompt: SYSTEM_PROMPT.to_string(),
            timeout,
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub async fn respond(&self, payload: &GenerationPayload) -> Result<String> {
        let prompt = match payload {
            GenerationPayload::Matches { results, .. } if results.is_empty() => {
                return Ok(NO_MATCHES_MESSAGE.to_string());
            }
            GenerationPayload::Matches { query, results } => {
                let summaries = results
                    .iter()
                    .enumerate()
                    .map(|(i, r)| {
                        let p = &r.posting;
                        format!(
                            "{}. {} at {} - {}. Salary: {} to {} ({}). Description: {}",
                            i + 1,
                            p.business_title,
                            p.agency,
                            p.work_location,
                            p.salary_range_from,
                            p.salary_range_to,
                            p.salary_frequency,
                            p.job_description,
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("\n");
                format!(
                    "The user asked: '{query}'.\n\n\
Here are some relevant job postings:\n{summaries}\n\n\
Provide a helpful response summarizing the best matches."
                )
            }
            GenerationPayload::Trends { query, entries } => {
                let details = entries
                    .iter()
                    .enumerate()
                    .map(|(i, e)| format!("{}. {} ({} listings)", i + 1, e.label, e.count))
                    .collect::<Vec<_>>()
                    .join("\n");
                format!(
                    "The user asked: '{query}'.\n\n\
Here are the top trends:\n{details}\n\n\
Summarize these trends in a conversational tone."
                )
            }
            GenerationPayload::FollowUp {
                query,
                prior_titles,
            } => {
                let titles = prior_titles
                    .iter()
                    .map(|t| format!("- {t}"))
                    .collect::<Vec<_>>()
                    .join("\n");
                format!(
                    "The user previously retrieved the following jobs:\n{titles}\n\n\
The user now asks: '{query}'.\n\
Provide an appropriate response based on these jobs and the new query."
                )
            }
        };

        tokio::time::timeout(self.timeout, self.llm.generate(&self.system_prompt, &prompt))
            .await
            .map_err(|_| DomainError::timeout("text generation timed out"))?
    }
}
