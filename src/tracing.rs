use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Layer};

use crate::config::ServerConfig;

// The AWS SDK and hyper log every connection at info.
const DEFAULT_LOG_DIRECTIVES: &str = "info,aws_config=warn,aws_smithy_runtime=warn,hyper=warn";

/// `RUST_LOG` when set, otherwise [`DEFAULT_LOG_DIRECTIVES`].
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVES))
}

pub fn log_layer<S>(config: &ServerConfig) -> Box<dyn Layer<S> + Send + Sync>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    if !config.structured_logging() {
        return Box::new(tracing_subscriber::fmt::layer().compact());
    }
    Box::new(
        tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .flatten_event(true),
    )
}

pub fn setup_tracing(config: &ServerConfig) {
    let subscriber = tracing_subscriber::registry().with(log_layer(config).with_filter(env_filter()));
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        error!("logger was already initiated, continuing: {:?}", e);
    }
}
