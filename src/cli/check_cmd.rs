//! Check command handler

use std::process::ExitCode;

use crate::infrastructure::audio::CLIP_EXTENSIONS;
use crate::infrastructure::{ClipLibrary, NotifyRustNotifier};

use super::app::{EXIT_ERROR, EXIT_SUCCESS};
use super::args::SessionOptions;
use super::presenter::Presenter;

const TEST_TITLE: &str = "Hang Timer";
const TEST_BODY: &str = "Notifications are enabled.";

/// Verify every configured clip resolves and that notifications can be shown
pub async fn handle_check(options: &SessionOptions, presenter: &Presenter) -> ExitCode {
    let library = ClipLibrary::new(&options.sounds_dir);
    presenter.info(&format!("Sound directory: {}", library.root().display()));

    let mut missing = 0usize;
    for clip in options.scheduler.clip_names() {
        match library.resolve(clip) {
            Some(path) => presenter.success(&format!("{} -> {}", clip, path.display())),
            None => {
                missing += 1;
                presenter.error(&format!(
                    "{} not found (looked for {})",
                    clip,
                    CLIP_EXTENSIONS.join(", ")
                ));
            }
        }
    }

    if options.notify {
        match NotifyRustNotifier::new().show_now(TEST_TITLE, TEST_BODY).await {
            Ok(()) => presenter.success("Test notification sent"),
            Err(e) => presenter.warn(&e.to_string()),
        }
    } else {
        presenter.info("Notifications disabled, skipping test notification");
    }

    if missing > 0 {
        presenter.error(&format!("{} clip(s) missing", missing));
        ExitCode::from(EXIT_ERROR)
    } else {
        presenter.success("All clips found");
        ExitCode::from(EXIT_SUCCESS)
    }
}
