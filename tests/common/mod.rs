pub mod tracing {
    use tracing_subscriber::EnvFilter;

    pub fn init_subscriber() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("leptos_publisher_env=trace")),
            )
            .with_test_writer()
            .try_init();
    }
}
