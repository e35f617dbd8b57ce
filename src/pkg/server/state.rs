use std::{sync::Arc, time::Duration};

use crate::{
    conf::{SearchDefaults, Settings},
    pkg::internal::{
        adaptors::jobs::search::JobSearch,
        ai::{
            chat::Advisor,
            generate::{GeminiClient, GenerateOps},
            history::InMemoryConversationStore,
        },
        gateway::Gateway,
    },
    prelude::Result,
};

#[derive(Clone)]
pub struct AppState {
    pub jobs: Arc<JobSearch>,
    pub advisor: Arc<Advisor>,
    pub search_defaults: Arc<SearchDefaults>,
}

impl AppState {
    pub fn new(s: &Settings) -> Result<AppState> {
        let gateway = Gateway::new(Duration::from_secs(s.upstream_timeout_secs))?;
        let gemini = GeminiClient::new(
            gateway.clone(),
            &s.gemini.endpoint,
            &s.gemini.model,
            &s.gemini.api_key,
        )?;
        let jobs = JobSearch::new(gateway, &s.theirstack.url, &s.theirstack.api_key)?;
        Ok(Self::from_parts(jobs, Arc::new(gemini), s.search.clone()))
    }

    pub fn from_parts(
        jobs: JobSearch,
        model: Arc<dyn GenerateOps>,
        search_defaults: SearchDefaults,
    ) -> AppState {
        let store = Arc::new(InMemoryConversationStore::new());
        AppState {
            jobs: Arc::new(jobs),
            advisor: Arc::new(Advisor::new(model, store)),
            search_defaults: Arc::new(search_defaults),
        }
    }
}
