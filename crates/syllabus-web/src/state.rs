use syllabus_query::QueryContext;

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub context: QueryContext,
}

impl AppState {
    pub fn new(context: QueryContext) -> Self {
        Self { context }
    }
}
