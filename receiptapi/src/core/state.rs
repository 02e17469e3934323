use crate::store::ScoreStore;

#[derive(Clone, Debug, Default)]
pub struct AppState {
    /// The score store shared by all request handlers.
    /// Written when a receipt is processed, read when its points are queried.
    pub store: ScoreStore,
}

impl AppState {
    pub fn new(store: ScoreStore) -> Self {
        Self { store }
    }
}
