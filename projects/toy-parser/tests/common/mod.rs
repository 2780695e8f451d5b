use std::sync::Once;
use toy_types::{Token, TokenKind, TokenValue};
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Route `tracing` output to the test writer; filter with `RUST_LOG`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .finish();
        tracing::subscriber::set_global_default(subscriber).expect("setting default tracing subscriber failed");
    });
}

/// Kind and payload of each token, ignoring spans.
pub fn strip_spans(tokens: &[Token]) -> Vec<(TokenKind, TokenValue)> {
    tokens.iter().map(|t| (t.kind, t.value.clone())).collect()
}
