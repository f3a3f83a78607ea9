//! Assistant features on top of a completion provider.
//!
//! Each feature sends a fixed system prompt plus the user's text. When the
//! provider fails the feature answers with its pre-written fallback and tags
//! the reply, so callers branch on `ReplySource` instead of handling errors.

use super::fallback::{self, Story, CRISIS_FALLBACK, REDEMPTION_FALLBACK};
use super::protocol::ChatMessage;
use super::provider::CompletionProvider;
use serde::Serialize;
use tracing::{info, warn};

const MOOD_PROMPT: &str = "You are an empathetic, supportive AI giving motivational advice and grounding tips to teens. Keep your response brief, friendly, and actionable. Include one short grounding tip.";
const CHAT_PROMPT: &str = "You are an empathetic, motivational AI for teens. Provide friendly, actionable advice about life, school, stress, and motivation. Keep responses concise and supportive.";
const CRISIS_PROMPT: &str = "You are an empathetic, caring AI supporting teens in crisis. Always respond with compassion. Include breathing exercises, comforting words, and encourage them to reach out for professional help. Include crisis hotline information.";
const REDEMPTION_PROMPT: &str = "Respond empathetically to a confession. Suggest 1 positive action for today. Encourage transformation and growth. Avoid judgment, keep a friendly tone.";
const INSPIRATION_PROMPT: &str = "Generate a short, inspiring story (3-4 sentences) for a teen with a practical lesson and actionable tip.";
const INSPIRATION_REQUEST: &str = "Tell me an inspiring story to motivate me today.";

/// Title given to stories generated by the provider
pub const GENERATED_STORY_TITLE: &str = "Today's Inspiring Story";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplySource {
    Live,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub text: String,
    pub source: ReplySource,
}

impl Reply {
    pub fn is_fallback(&self) -> bool {
        self.source == ReplySource::Fallback
    }
}

pub struct Assistant<P> {
    provider: P,
}

impl<P: CompletionProvider> Assistant<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    async fn ask(
        &self,
        feature: &str,
        system_prompt: &str,
        user_text: String,
        fallback: impl FnOnce() -> String,
    ) -> Reply {
        let conversation = [ChatMessage::system(system_prompt), ChatMessage::user(user_text)];
        match self.provider.complete(&conversation).await {
            Ok(text) => Reply {
                text,
                source: ReplySource::Live,
            },
            Err(e) => {
                warn!(
                    "Gateway unavailable for {} via {} ({}), using pre-written response",
                    feature,
                    self.provider.name(),
                    e
                );
                Reply {
                    text: fallback(),
                    source: ReplySource::Fallback,
                }
            }
        }
    }

    /// Supportive reply and grounding tip for a mood check-in
    pub async fn mood_support(&self, mood: &str) -> Reply {
        let mood = mood.to_lowercase();
        let request = format!("I'm feeling {} right now. Can you help me feel better?", mood);
        self.ask("mood", MOOD_PROMPT, request, || fallback::mood_fallback(&mood))
            .await
    }

    pub async fn chat(&self, message: &str) -> Reply {
        self.ask("chat", CHAT_PROMPT, message.to_string(), || {
            fallback::chat_fallback().to_string()
        })
        .await
    }

    /// Compassionate reply that always ends in crisis resources when offline
    pub async fn crisis(&self, message: &str) -> Reply {
        info!("Crisis support requested");
        self.ask("crisis", CRISIS_PROMPT, message.to_string(), || {
            CRISIS_FALLBACK.to_string()
        })
        .await
    }

    pub async fn redemption(&self, confession: &str) -> Reply {
        self.ask("redemption", REDEMPTION_PROMPT, confession.to_string(), || {
            REDEMPTION_FALLBACK.to_string()
        })
        .await
    }

    /// A story with lesson and action, parsed from the reply
    pub async fn inspiration(&self) -> (Story, ReplySource) {
        let mut fallback_story = None;
        let reply = self
            .ask(
                "inspiration",
                INSPIRATION_PROMPT,
                INSPIRATION_REQUEST.to_string(),
                || {
                    let story = fallback::inspiration_fallback();
                    let text = story.to_text();
                    fallback_story = Some(story);
                    text
                },
            )
            .await;

        let story = fallback_story.unwrap_or_else(|| Story::parse(GENERATED_STORY_TITLE, &reply.text));
        (story, reply.source)
    }
}
