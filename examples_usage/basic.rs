use gelf_logger::fields;

fn main() {
    // ENVIRONMENT, LOG_LEVEL and VERSION are read once here.
    let logger = gelf_logger::init().expect("logger already initialized");

    gelf_logger::info("service started");
    gelf_logger::infof!("listening on {}", "0.0.0.0:8080");

    let request = logger.with_fields(fields! { "request_id" => "r-42", "path" => "/orders" });
    request.debug("request received");
    gelf_logger::warnf!(on request, "slow upstream: {} ms", 830);

    let err = std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "inventory service unavailable",
    );
    request
        .with_field("error", gelf_logger::Value::from_error(&err))
        .error("request failed");
}
