use conffails::progress::{Progress, ProgressCallback};
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Renders workflow progress on standard output: a spinner per phase, plus
/// the per-library status lines. The workflow is strictly sequential, so the
/// renderer is driven directly from the progress callback; the bar state sits
/// behind a mutex only because the callback type is `Fn`.
pub struct UiRenderer {
    mp: MultiProgress,
    state: Mutex<BarState>,
}

#[derive(Default)]
struct BarState {
    active_bar: Option<ProgressBar>,
    base_message: String,
}

impl UiRenderer {
    pub fn new() -> Arc<Self> {
        let mp = MultiProgress::new();
        mp.set_draw_target(ProgressDrawTarget::stdout_with_hz(12));
        Arc::new(Self {
            mp,
            state: Mutex::new(BarState::default()),
        })
    }

    pub fn callback(self: &Arc<Self>) -> ProgressCallback<'static> {
        let ui = Arc::clone(self);
        Box::new(move |progress| ui.handle(progress))
    }

    /// Clears any bar still on screen after the workflow returns.
    pub fn finish(&self) {
        if let Ok(mut state) = self.state.lock() {
            if let Some(bar) = state.active_bar.take() {
                bar.finish_and_clear();
            }
            state.base_message.clear();
        }
    }

    fn handle(&self, progress: Progress) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        match progress {
            Progress::PhaseStart { name } => {
                if let Some(bar) = state.active_bar.take() {
                    bar.finish_and_clear();
                }

                let pb = self.mp.add(ProgressBar::new_spinner());
                pb.enable_steady_tick(Duration::from_millis(80));
                pb.set_style(Self::spinner_style());
                pb.set_message(name.to_string());

                state.active_bar = Some(pb);
                state.base_message = name.to_string();
            }
            Progress::PhaseFinish => {
                if let Some(bar) = state.active_bar.take() {
                    bar.finish_and_clear();
                }

                let final_message = format!("✓ {}", state.base_message);
                self.mp.println(final_message).ok();

                state.base_message.clear();
            }
            Progress::LibraryStart { library } => {
                self.mp
                    .println(format!("Parsing log file of {}...", library))
                    .ok();
            }
            Progress::LibraryDone { library } => {
                self.mp.println(format!("Done with {}!", library)).ok();
                self.mp.println("").ok();
            }
            Progress::Message(msg) => {
                self.mp.println(msg).ok();
            }
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .expect("Invalid template")
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
    }
}
