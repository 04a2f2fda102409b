//! Relay to the hosted generative model.
//!
//! [`ChatModel`] is the seam between the request pipeline and the remote
//! service; [`GeminiModel`] is the production implementation. [`LlmGateway`]
//! pins the persona and turns every failure into [`FALLBACK_MESSAGE`], so
//! handlers never see a remote error.

pub mod gemini;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::error::GatewayError;

pub use gemini::GeminiModel;

/// System instruction sent with every generation call.
pub const PERSONA: &str = "You are a compassionate and understanding mental health support \
chatbot named Phoenix. You are a compassionate and understanding mental health support chatbot \
for students. Your purpose is to listen, provide empathetic responses, and offer helpful, \
non-clinical advice. You should always maintain a calm and encouraging tone. Focus your \
responses on common student issues like academic stress, social anxiety, burnout, and time \
management. Keep your responses brief, clear, and to the point. Do not give medical diagnoses \
or clinical advice. If a user expresses severe distress or suicidal thoughts, you must \
immediately refer them to a professional helpline or counselor.";

/// Reply used whenever the remote call fails.
pub const FALLBACK_MESSAGE: &str =
    "I'm sorry, I'm having trouble connecting to the AI service right now.";

/// A remote text generator.
#[async_trait]
pub trait ChatModel: Send + Sync + 'static {
    async fn generate(&self, system_instruction: &str, user_text: &str) -> Result<String, GatewayError>;
}

/// Persona-pinned, failure-absorbing front of a [`ChatModel`].
#[derive(Clone)]
pub struct LlmGateway {
    model: Arc<dyn ChatModel>,
}

impl std::fmt::Debug for LlmGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("LlmGateway")
    }
}

impl LlmGateway {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    /// One best-effort generation call. Returns the model text verbatim, or
    /// [`FALLBACK_MESSAGE`] after logging the failure.
    pub async fn respond(&self, user_text: &str) -> String {
        match self.model.generate(PERSONA, user_text).await {
            Ok(text) => {
                info!(output_len = text.len(), "model reply received");
                text
            }
            Err(e) => {
                error!(error = %e, "generation call failed; returning fallback");
                FALLBACK_MESSAGE.to_owned()
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::sync::Mutex;
    use tracing_test::traced_test;

    struct Recording {
        reply: Result<String, ()>,
        seen: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl ChatModel for Recording {
        async fn generate(&self, system: &str, text: &str) -> Result<String, GatewayError> {
            self.seen
                .lock()
                .unwrap()
                .push((system.to_owned(), text.to_owned()));
            self.reply.clone().map_err(|_| GatewayError::EmptyResponse)
        }
    }

    #[tokio::test]
    async fn success_is_returned_verbatim_with_persona() {
        let model = Arc::new(Recording {
            reply: Ok("  Try a short walk.\n".into()),
            seen: Mutex::new(Vec::new()),
        });
        let gateway = LlmGateway::new(model.clone());

        assert_eq!(gateway.respond("exam stress").await, "  Try a short walk.\n");
        let seen = model.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, PERSONA);
        assert_eq!(seen[0].1, "exam stress");
    }

    #[tokio::test]
    #[traced_test]
    async fn failure_becomes_fallback() {
        let model = Arc::new(Recording {
            reply: Err(()),
            seen: Mutex::new(Vec::new()),
        });
        let gateway = LlmGateway::new(model);
        assert_eq!(gateway.respond("hello").await, FALLBACK_MESSAGE);
        assert!(logs_contain("generation call failed"));
    }

    #[test]
    fn persona_rules_out_clinical_advice() {
        assert!(PERSONA.contains("Do not give medical diagnoses"));
    }
}
