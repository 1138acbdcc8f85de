use anyhow::anyhow;

use crate::cv_utils;
use crate::pipeline::TallyOutcome;

/// Where the annotated image ends up. The pipeline itself performs no
/// display I/O, so tests and batch callers can skip it entirely.
pub trait ResultSink {
    fn present(&mut self, outcome: &TallyOutcome) -> Result<(), anyhow::Error>;
}

/// Interactive window; blocks until a key is pressed.
pub struct WindowSink {
    pub title: String,
}

impl Default for WindowSink {
    fn default() -> Self {
        Self {
            title: "Clasificacion por K-Means".to_string(),
        }
    }
}

impl ResultSink for WindowSink {
    fn present(&mut self, outcome: &TallyOutcome) -> Result<(), anyhow::Error> {
        cv_utils::show_image(&self.title, &outcome.annotated);
        cv_utils::wait_key(0)?;
        cv_utils::destroy_all_windows();
        Ok(())
    }
}

/// Writes the annotated image to disk instead of opening a window.
pub struct ImageFileSink {
    pub path: String,
}

impl ResultSink for ImageFileSink {
    fn present(&mut self, outcome: &TallyOutcome) -> Result<(), anyhow::Error> {
        let written = cv_utils::write_image(&self.path, &outcome.annotated)?;
        if !written {
            return Err(anyhow!("could not write annotated image to {}", self.path));
        }
        Ok(())
    }
}
