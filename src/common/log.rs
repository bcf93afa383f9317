use tracing_subscriber::EnvFilter;

/// Initializes the global tracing subscriber. Diagnostics go to stderr so
/// stdout stays machine-readable for `--format json` consumers.
pub fn init(verbose: bool) {
    let default_directives = if verbose { "ybx=debug" } else { "ybx=warn" };
    let directives =
        std::env::var("RUST_LOG").unwrap_or_else(|_| default_directives.to_owned());
    let env_filter = EnvFilter::builder().parse_lossy(directives);
    tracing_subscriber::fmt()
        .compact()
        .without_time()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
