use opentelemetry::{KeyValue, global, metrics::Counter};

#[derive(Clone, Debug)]
pub(crate) struct Metrics {
    pub(crate) delete_requests_total: Counter<u64>,
}

impl Metrics {
    fn new() -> Self {
        let meter = global::meter("inbox-server");
        Self {
            delete_requests_total: meter
                .u64_counter("inbox_conversation_delete_requests_total")
                .with_description("Total conversation deletion requests acknowledged")
                .build(),
        }
    }
}

/// Conversations have no backing record yet, so deletion is acknowledged
/// without touching any state and without checking who is asking.
#[derive(Clone, Debug)]
pub struct ConversationService {
    metrics: Metrics,
}

impl Default for ConversationService {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationService {
    #[must_use]
    pub fn new() -> Self {
        Self { metrics: Metrics::new() }
    }

    #[tracing::instrument(skip(self, conversation_id), fields(conversation_id = %conversation_id))]
    pub fn delete_conversation(&self, conversation_id: &str, user_id: Option<&str>) {
        tracing::info!(user_id = user_id.unwrap_or_default(), "Conversation deletion acknowledged");
        self.metrics
            .delete_requests_total
            .add(1, &[KeyValue::new("has_user_id", user_id.is_some())]);
    }
}
