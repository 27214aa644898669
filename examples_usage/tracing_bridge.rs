use std::sync::Arc;

use gelf_logger::stdout_sink::StdoutSink;
use gelf_logger::{EnvConfig, LoggerConfig};
use tracing::{error, info};

/// Route `tracing` events through the GELF logger so libraries that only
/// know `tracing` end up in the same output stream.
fn main() {
    let config = LoggerConfig {
        tracing_bridge: true,
        ..LoggerConfig::from_provider(&EnvConfig::load_bundled())
    };
    gelf_logger::init_with_config(config, Arc::new(StdoutSink)).expect("init logger");

    info!(port = 8080u64, "tracing bridge example started");
    error!(db = "orders", "simulated error sent through the bridge");
    gelf_logger::info("direct calls share the same sink");
}
