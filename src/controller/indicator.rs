use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Modal busy indicator shown for the duration of a refresh.
#[cfg_attr(test, mockall::automock)]
pub trait BusyIndicator {
    fn show(&mut self, message: &str);
    fn dismiss(&mut self);
}

/// Terminal spinner. It cannot be cancelled by the user; only the controller
/// dismisses it.
#[derive(Default)]
pub struct SpinnerIndicator {
    spinner: Option<ProgressBar>,
}

impl SpinnerIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    fn is_visible(&self) -> bool {
        self.spinner.is_some()
    }
}

impl BusyIndicator for SpinnerIndicator {
    fn show(&mut self, message: &str) {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            spinner.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));

        if let Some(previous) = self.spinner.replace(spinner) {
            previous.finish_and_clear();
        }
    }

    fn dismiss(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}
