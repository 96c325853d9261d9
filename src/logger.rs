use crate::config::Config;
use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    filter::{
        EnvFilter,
        LevelFilter,
    },
    fmt::MakeWriter,
    layer::SubscriberExt,
    Layer,
};

/// The log file name prefix, the date is appended by the appender.
const LOG_FILE_PREFIX: &str = "scryview.log";

/// The stderr only shows warnings unless `verbose` is set, as it shares the terminal with card output.
fn stderr_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::TRACE
    } else {
        LevelFilter::WARN
    }
}

/// Make the subscriber.
///
/// The env filter only applies to the file layer.
/// The stderr layer is filtered by level alone.
fn build_subscriber<E, F>(
    env_filter: EnvFilter,
    verbose: bool,
    stderr_writer: E,
    file_writer: Option<F>,
) -> impl tracing::Subscriber + Send + Sync + 'static
where
    E: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    F: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let stderr_formatting_layer = tracing_subscriber::fmt::layer()
        .with_writer(stderr_writer)
        .with_filter(stderr_level(verbose));

    let file_formatting_layer = file_writer.map(|file_writer| {
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(file_writer)
            .with_filter(env_filter)
    });

    tracing_subscriber::Registry::default()
        .with(file_formatting_layer)
        .with(stderr_formatting_layer)
}

/// Try to setup a logger.
///
/// If a log dir is configured, everything that passes `RUST_LOG` (default `info`) is written to a daily log file.
/// `verbose` shows everything on the stderr.
///
/// The returned guard must be kept alive until the program exits, or buffered log lines are lost.
pub fn setup(config: &Config, verbose: bool) -> anyhow::Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    let (file_writer, worker_guard) = match config.log_dir.as_ref() {
        Some(log_dir) => {
            std::fs::create_dir_all(log_dir)
                .with_context(|| format!("failed to create log dir `{log_dir}`"))?;

            let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
            let (file_writer, worker_guard) = tracing_appender::non_blocking(file_appender);

            (Some(file_writer), Some(worker_guard))
        }
        None => (None, None),
    };

    let subscriber = build_subscriber(env_filter, verbose, std::io::stderr, file_writer);
    tracing::subscriber::set_global_default(subscriber).context("failed to set subscriber")?;

    Ok(worker_guard)
}

#[cfg(test)]
mod test {
    use super::*;
    use parking_lot::Mutex;
    use std::{
        io::Write,
        sync::Arc,
    };
    use tracing::{
        debug,
        info,
        warn,
    };

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Capture {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock()).into_owned()
        }
    }

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Capture {
        type Writer = Capture;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn verbose_stderr_shows_debug() {
        let stderr = Capture::default();
        let file = Capture::default();
        let subscriber =
            build_subscriber(EnvFilter::new("info"), true, stderr.clone(), Some(file.clone()));

        tracing::subscriber::with_default(subscriber, || {
            debug!("verbose debug line");
            info!("verbose info line");
        });

        let stderr = stderr.contents();
        assert!(stderr.contains("verbose debug line"));
        assert!(stderr.contains("verbose info line"));

        let file = file.contents();
        assert!(!file.contains("verbose debug line"));
        assert!(file.contains("verbose info line"));
    }

    #[test]
    fn quiet_stderr_shows_warnings() {
        let stderr = Capture::default();
        let subscriber =
            build_subscriber(EnvFilter::new("info"), false, stderr.clone(), None::<Capture>);

        tracing::subscriber::with_default(subscriber, || {
            info!("quiet info line");
            warn!("quiet warn line");
        });

        let stderr = stderr.contents();
        assert!(!stderr.contains("quiet info line"));
        assert!(stderr.contains("quiet warn line"));
    }
}
