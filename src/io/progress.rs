//! Terminal progress display for a single collapse run

use crate::io::configuration::{PROGRESS_BAR_WIDTH, PROGRESS_RESOLUTION};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::LazyLock;
use std::time::Duration;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template = format!(
        "[{{elapsed_precise}}] {{msg}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{percent:>3}}%"
    );
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress bar tracking how much of the field has been decided
///
/// Position follows [`crate::Wave::progress`], scaled to
/// [`PROGRESS_RESOLUTION`] steps. A hidden bar accepts every call and draws
/// nothing.
pub struct CollapseProgress {
    bar: ProgressBar,
}

impl CollapseProgress {
    /// Create a visible progress bar on stderr
    pub fn new() -> Self {
        let bar = ProgressBar::new(PROGRESS_RESOLUTION);
        bar.set_style(PROGRESS_STYLE.clone());
        Self { bar }
    }

    /// Create a progress bar that never draws
    pub fn hidden() -> Self {
        let bar =
            ProgressBar::with_draw_target(Some(PROGRESS_RESOLUTION), ProgressDrawTarget::hidden());
        Self { bar }
    }

    /// Announce the catalog the run is collapsing with
    pub fn start(&self, tile_count: usize, width: usize, height: usize) {
        self.bar
            .set_message(format!("{tile_count} tiles -> {width}x{height}"));
        self.bar.set_position(0);
    }

    /// Report the fraction of the field decided so far
    pub fn update(&self, fraction: f32) {
        self.bar.set_position(Self::position(fraction));
    }

    /// Current bar position
    pub fn position_now(&self) -> u64 {
        self.bar.position()
    }

    /// Complete the bar with the total collapse time
    pub fn finish(&self, elapsed: Duration) {
        self.bar.set_position(PROGRESS_RESOLUTION);
        self.bar
            .finish_with_message(format!("solved in {} ms", elapsed.as_millis()));
    }

    /// Map a completion fraction onto bar positions, clamped to the bar
    pub fn position(fraction: f32) -> u64 {
        let clamped = fraction.clamp(0.0, 1.0);
        (f64::from(clamped) * PROGRESS_RESOLUTION as f64).round() as u64
    }
}

impl Default for CollapseProgress {
    fn default() -> Self {
        Self::new()
    }
}
