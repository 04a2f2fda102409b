//! phoenix-core: the decision logic behind the Phoenix chat backend.
//!
//! - [`safety`] intercepts self-harm messages before they reach the model.
//! - [`sentiment`] scores every chat message for the mood tracker.
//! - [`gateway`] relays everything else to the hosted generative model.
//! - [`store`] persists mood scores, chat histories and journals as flat files.

pub mod error;
pub mod gateway;
pub mod safety;
pub mod sentiment;
pub mod store;

pub use error::{GatewayError, StoreError};
pub use gateway::{ChatModel, GeminiModel, LlmGateway};
pub use safety::Verdict;
pub use sentiment::{SentimentScorer, VaderScorer};
pub use store::FsStore;
