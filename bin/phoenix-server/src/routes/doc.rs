use utoipa::OpenApi;

use crate::routes::{chat, health, history, journal, mood, pages};

#[derive(OpenApi)]
#[openapi(info(
    title = "phoenix-server",
    description = "Phoenix wellness companion API",
    version = "0.1.0"
))]
pub struct ApiDoc;

pub fn get_docs() -> utoipa::openapi::OpenApi {
    let mut root = ApiDoc::openapi();
    root.merge(health::HealthApi::openapi());
    root.merge(pages::PagesApi::openapi());
    root.merge(chat::ChatApi::openapi());
    root.merge(mood::MoodApi::openapi());
    root.merge(history::HistoryApi::openapi());
    root.merge(journal::JournalApi::openapi());
    root
}
