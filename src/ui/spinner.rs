use indicatif::{ProgressBar, ProgressStyle};
use std::{future::Future, io::IsTerminal, time::Duration};

/// Runs `fut` while showing a spinner with `msg`, then clears the line.
/// Works in TTY only; no output when stderr isn't a TTY.
pub(crate) async fn with_spinner<Fut: Future>(msg: impl Into<String>, fut: Fut) -> Fut::Output {
    let pb = if std::io::stderr().is_terminal() {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        pb.set_message(msg.into());
        pb.enable_steady_tick(Duration::from_millis(80));
        Some(pb)
    } else {
        None
    };

    // RAII guard: always clear the spinner line on exit (success or error)
    struct Guard(Option<ProgressBar>);
    impl Drop for Guard {
        fn drop(&mut self) {
            if let Some(pb) = self.0.take() {
                pb.finish_and_clear();
            }
        }
    }
    let _g = Guard(pb);

    fut.await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn passes_the_future_output_through() {
        let out = with_spinner("working...", async { 41 + 1 }).await;
        assert_eq!(out, 42);
    }

    #[tokio::test]
    async fn error_outcomes_pass_through_untouched() {
        let out: anyhow::Result<()> =
            with_spinner("working...", async { anyhow::bail!("boom") }).await;
        assert!(out.is_err());
    }
}
