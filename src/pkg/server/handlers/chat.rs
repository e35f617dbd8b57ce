use axum::{Json, extract::State};
use serde::Deserialize;
use validator::Validate;

use crate::{pkg::server::state::AppState, prelude::Result};

#[derive(Deserialize, Validate)]
pub struct ChatPromptInput {
    #[validate(length(min = 1, message = "Field cannot be empty"))]
    pub chat_id: String,
    pub prompt: String,
}

pub async fn generate(
    State(state): State<AppState>,
    Json(input): Json<ChatPromptInput>,
) -> Result<Json<String>> {
    input.validate()?;
    let reply = state.advisor.respond(&input.chat_id, &input.prompt).await?;
    Ok(Json(reply))
}
