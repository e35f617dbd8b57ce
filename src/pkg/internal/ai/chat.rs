use std::sync::Arc;

use crate::{
    pkg::internal::ai::{
        generate::GenerateOps,
        history::ConversationStore,
        sanitize::sanitize,
        spec::Turn,
    },
    prelude::{Error, Result},
};

/// Sent with every model call.
pub const SYSTEM_INSTRUCTION: &str = r#"
            You are a helpful and informative career advisor for high school students. 
            Your name is **Pathfinder**.
            Your role is to guide students in exploring career paths, understanding educational requirements, and making informed decisions about their future.
            Provide answers that are:
            1. Clear and easy to understand, avoiding technical jargon.
            2. Concise and to the point, without unnecessary elaboration.
            3. Keep answers relatively short, ideally under 5-6 sentences, unless more detail is absolutely necessary.
            4. Always stay within the context of career counseling for high school students. If a question is outside this scope, politely steer the conversation back to career-related topics.
            "#;

/// First turn of every conversation.
pub const GREETING: &str = "Hi there! I'm Pathfinder, your career advisor. I'm here to help you explore career options, understand your interests, and plan your future. What's on your mind today?";

pub struct Advisor {
    model: Arc<dyn GenerateOps>,
    store: Arc<dyn ConversationStore>,
}

impl Advisor {
    pub fn new(model: Arc<dyn GenerateOps>, store: Arc<dyn ConversationStore>) -> Self {
        Advisor { model, store }
    }

    pub fn store(&self) -> &Arc<dyn ConversationStore> {
        &self.store
    }

    /// Runs one chat turn for `chat_id` and returns the sanitized reply.
    ///
    /// The conversation stays locked until the reply is recorded, so turns
    /// for the same id never interleave. If the model call fails the user
    /// turn is kept without a reply.
    pub async fn respond(&self, chat_id: &str, prompt: &str) -> Result<String> {
        let conversation = self.store.entry(chat_id, GREETING).await;
        let mut turns = conversation.lock().await;
        turns.push(Turn::user(prompt));

        let context = &turns[..turns.len() - 1];
        let raw = self
            .model
            .generate(context, SYSTEM_INSTRUCTION, prompt)
            .await
            .map_err(|e| {
                tracing::error!("generation failed for chat {}: {}", chat_id, &e);
                Error::Generation(e.to_string())
            })?;

        let reply = sanitize(&raw);
        turns.push(Turn::model(reply.clone()));
        tracing::info!("Chat ID: {} - User prompt: {}", chat_id, prompt);
        tracing::info!("Generated response: {}", &reply);
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex as StdMutex;

    use super::*;
    use crate::pkg::internal::{
        ai::history::InMemoryConversationStore,
        gateway::GatewayError,
    };

    struct ScriptedModel {
        replies: StdMutex<Vec<core::result::Result<String, GatewayError>>>,
        seen: StdMutex<Vec<(Vec<Turn>, String)>>,
    }

    impl ScriptedModel {
        fn replying(replies: Vec<core::result::Result<String, GatewayError>>) -> Arc<Self> {
            Arc::new(ScriptedModel {
                replies: StdMutex::new(replies.into_iter().rev().collect()),
                seen: StdMutex::new(Vec::new()),
            })
        }
    }

    #[async_trait::async_trait]
    impl GenerateOps for ScriptedModel {
        async fn generate(
            &self,
            history: &[Turn],
            system_instruction: &str,
            prompt: &str,
        ) -> core::result::Result<String, GatewayError> {
            assert_eq!(system_instruction, SYSTEM_INSTRUCTION);
            self.seen
                .lock()
                .unwrap()
                .push((history.to_vec(), prompt.to_string()));
            self.replies
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Ok("no more replies".into()))
        }
    }

    fn advisor(model: Arc<ScriptedModel>) -> Advisor {
        Advisor::new(model, Arc::new(InMemoryConversationStore::new()))
    }

    #[tokio::test]
    async fn test_first_call_seeds_greeting() {
        let model = ScriptedModel::replying(vec![Ok("\"Hi! Ask me anything.\"".into())]);
        let advisor = advisor(model.clone());

        let reply = advisor.respond("c1", "hello").await.unwrap();
        assert_eq!(reply, "Hi! Ask me anything.");

        let history = advisor.store().history("c1").await.unwrap();
        assert_eq!(
            history,
            vec![
                Turn::model(GREETING),
                Turn::user("hello"),
                Turn::model("Hi! Ask me anything."),
            ]
        );

        let seen = model.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, vec![Turn::model(GREETING)]);
        assert_eq!(seen[0].1, "hello");
    }

    #[tokio::test]
    async fn test_history_accumulates_per_id() {
        let model = ScriptedModel::replying(vec![Ok("one".into()), Ok("two".into())]);
        let advisor = advisor(model.clone());

        advisor.respond("c1", "first").await.unwrap();
        advisor.respond("c1", "second").await.unwrap();

        let history = advisor.store().history("c1").await.unwrap();
        assert_eq!(
            history,
            vec![
                Turn::model(GREETING),
                Turn::user("first"),
                Turn::model("one"),
                Turn::user("second"),
                Turn::model("two"),
            ]
        );
        assert_eq!(model.seen.lock().unwrap()[1].0, history[..3].to_vec());
    }

    #[tokio::test]
    async fn test_ids_do_not_share_history() {
        let advisor = advisor(ScriptedModel::replying(vec![]));
        advisor.respond("a", "x").await.unwrap();
        advisor.respond("b", "y").await.unwrap();

        assert_eq!(advisor.store().len().await, 2);
        assert_eq!(advisor.store().history("b").await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_failed_call_keeps_user_turn_only() {
        let model = ScriptedModel::replying(vec![Err(GatewayError::Upstream {
            status: 503,
            body: "overloaded".into(),
        })]);
        let advisor = advisor(model);

        let err = advisor.respond("c1", "hello").await.unwrap_err();
        assert!(matches!(err, Error::Generation(_)));
        assert_eq!(err.status(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().starts_with("Error generating content:"));

        let history = advisor.store().history("c1").await.unwrap();
        assert_eq!(history, vec![Turn::model(GREETING), Turn::user("hello")]);
    }

    #[tokio::test]
    async fn test_empty_prompt_is_forwarded() {
        let model = ScriptedModel::replying(vec![Ok("ok".into())]);
        let advisor = advisor(model.clone());
        advisor.respond("c1", "").await.unwrap();
        assert_eq!(model.seen.lock().unwrap()[0].1, "");
    }

    #[tokio::test]
    async fn test_same_id_requests_are_serialized() {
        let advisor = Arc::new(advisor(ScriptedModel::replying(vec![])));
        let mut tasks = tokio::task::JoinSet::new();
        for n in 0..8 {
            let advisor = advisor.clone();
            tasks.spawn(async move { advisor.respond("busy", &format!("q{n}")).await });
        }
        while let Some(res) = tasks.join_next().await {
            res.unwrap().unwrap();
        }

        let history = advisor.store().history("busy").await.unwrap();
        assert_eq!(history.len(), 1 + 8 * 2);
        for pair in history[1..].chunks(2) {
            assert_eq!(pair[0].role, crate::pkg::internal::ai::spec::Role::User);
            assert_eq!(pair[1], Turn::model("no more replies"));
        }
    }
}
