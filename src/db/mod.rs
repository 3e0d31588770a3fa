mod history;
mod repository;
mod schema;

pub use history::{normalize_title, SeenTitleStore};
pub use repository::SavedNewsStore;
