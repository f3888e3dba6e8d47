use studypulse::cli::run;
use studypulse::config::ConfigError;

/// Errors from storage, the filesystem or the environment, as opposed to bad input
fn is_internal_error(e: &anyhow::Error) -> bool {
    e.chain().any(|cause| {
        cause.is::<rusqlite::Error>()
            || cause.is::<std::io::Error>()
            || matches!(cause.downcast_ref::<ConfigError>(), Some(ConfigError::NoHomeDir))
    }) || e.to_string().starts_with("Failed to")
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();
    // Colour output on Windows consoles; a failure just means plain text
    let _ = enable_ansi_support::enable_ansi_support();

    if let Err(e) = run() {
        if is_internal_error(&e) {
            eprintln!("Internal error: {}", e);
            let mut source = e.source();
            if source.is_some() {
                eprintln!("\nCaused by:");
                let mut indent = 1;
                while let Some(err) = source {
                    eprintln!("{:indent$}  {}", "", err);
                    source = err.source();
                    indent += 1;
                }
            }
            std::process::exit(2);
        } else {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
