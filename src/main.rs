use anyhow::Result;
use tui_nyt_app::config::AppConfig;
use tui_nyt_app::internal::container::AppContainer;
use tui_nyt_app::internal::ui::app::App;
use tui_nyt_app::tui;

#[tokio::main]
async fn main() -> Result<()> {
    // Configuration decides where and how much we log.
    let config = AppConfig::load();

    // Logs must not reach stdout/stderr while the TUI owns the terminal.
    match tui::init() {
        Ok(terminal) => {
            let log_dir = config.logging.log_directory.as_deref().unwrap_or("logs");
            let file_appender = tracing_appender::rolling::daily(log_dir, "tui-nyt-app.log");
            let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

            // RUST_LOG wins over the configured levels.
            let env_filter = match std::env::var("RUST_LOG") {
                Ok(_) => tracing_subscriber::EnvFilter::from_default_env(),
                Err(_) => tracing_subscriber::EnvFilter::new(config.logging.filter_directives()),
            };

            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(non_blocking)
                .with_ansi(false)
                .compact()
                .init();

            tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting tui-nyt-app");

            let container = AppContainer::new(&config);
            let mut app = App::new(config, &container);
            let res = app.run(terminal).await;

            tui::restore()?;

            if let Err(err) = res {
                tracing::error!("Application error: {:#}", err);
                eprintln!("{err:?}");
            }

            Ok(())
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
                .init();

            eprintln!("Failed to initialize TUI: {e:?}");
            Err(e.into())
        }
    }
}
