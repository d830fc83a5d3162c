//! Export and delivery pipeline.
//!
//! One export is a straight line: decode the scene markup, draw it onto an
//! offscreen surface, encode PNG, then share it or fall back to a download.
//!
//! ```text
//! Idle -> Rasterizing -> SurfaceReady -> Encoded -> Sharing | Downloading -> Done
//!   any state -> Failed
//! ```
//!
//! Errors short-circuit to the top of [`Exporter::run`], which logs them and
//! records them in the [`ExportReport`]. Nothing is retried.

mod command;
mod lock;
mod platform;

pub use command::CommandShare;
pub use lock::{ExportGuard, ExportLock};
pub use platform::{
    DirectoryDownload, Downloader, NoShare, Notifier, SharePayload, SharePlatform, ShareOutcome,
    SharedFile,
};

use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, error, info, info_span, warn};

use crate::error::{PetalError, Result};
use crate::render::{self, PNG_MIME};

/// Name of the exported image.
pub const DEFAULT_FILE_NAME: &str = "flower.png";

/// Title attached to every share.
pub const DEFAULT_TITLE: &str = "Check out my flower!";

/// Share text used when the caption is empty.
pub const DEFAULT_CAPTION: &str = "Here's a beautiful flower for you!";

/// Shown when sharing is unavailable and the image was downloaded instead.
pub const FALLBACK_NOTICE: &str = "Sharing not supported. The flower was downloaded instead!";

/// Pipeline progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportState {
    Idle,
    Rasterizing,
    SurfaceReady,
    Encoded,
    Sharing,
    Downloading,
    Done,
    Failed,
}

impl ExportState {
    pub fn is_terminal(self) -> bool {
        matches!(self, ExportState::Done | ExportState::Failed)
    }
}

/// How the artifact reached the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "route", rename_all = "lowercase")]
pub enum DeliveryRoute {
    Shared,
    /// The user dismissed the share surface.
    Cancelled,
    Downloaded { path: PathBuf },
}

/// Knobs for one exporter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub file_name: String,
    pub title: String,
    pub default_caption: String,
    pub fallback_notice: String,
    /// Integer upscale applied when rasterizing (minimum 1).
    pub scale: u32,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_FILE_NAME.to_string(),
            title: DEFAULT_TITLE.to_string(),
            default_caption: DEFAULT_CAPTION.to_string(),
            fallback_notice: FALLBACK_NOTICE.to_string(),
            scale: 1,
        }
    }
}

impl ExportOptions {
    /// The share text for a caption: the caption itself unless empty.
    pub fn share_text(&self, caption: &str) -> String {
        if caption.is_empty() {
            self.default_caption.clone()
        } else {
            caption.to_string()
        }
    }
}

/// Result of one export. Produced even when the export failed.
#[derive(Debug)]
pub struct ExportReport {
    /// Every state entered, in order, starting with `Idle`.
    pub trace: Vec<ExportState>,
    pub route: Option<DeliveryRoute>,
    /// Pixel size of the encoded image.
    pub size: Option<(u32, u32)>,
    /// Length of the encoded PNG.
    pub bytes: usize,
    pub error: Option<PetalError>,
    /// Set when the trigger was ignored because another export was running.
    pub skipped: bool,
}

impl ExportReport {
    fn skipped() -> Self {
        Self {
            trace: vec![ExportState::Idle],
            route: None,
            size: None,
            bytes: 0,
            error: None,
            skipped: true,
        }
    }

    pub fn state(&self) -> ExportState {
        self.trace.last().copied().unwrap_or(ExportState::Idle)
    }

    pub fn is_success(&self) -> bool {
        self.state() == ExportState::Done
    }

    pub fn reached(&self, state: ExportState) -> bool {
        self.trace.contains(&state)
    }

    /// Machine-readable view of the report.
    pub fn summary(&self) -> ReportSummary {
        ReportSummary {
            state: self.state(),
            skipped: self.skipped,
            delivery: self.route.clone(),
            width: self.size.map(|(w, _)| w),
            height: self.size.map(|(_, h)| h),
            bytes: self.bytes,
            error: self.error.as_ref().map(|e| e.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub state: ExportState,
    pub skipped: bool,
    pub delivery: Option<DeliveryRoute>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub bytes: usize,
    pub error: Option<String>,
}

/// The encoded image, alive only for one export.
struct Artifact {
    file: SharedFile,
    width: u32,
    height: u32,
}

/// Runs exports against a host's share surface, downloader and notifier.
pub struct Exporter<'a> {
    share: &'a dyn SharePlatform,
    download: &'a dyn Downloader,
    notifier: &'a dyn Notifier,
    options: ExportOptions,
    lock: ExportLock,
}

impl<'a> Exporter<'a> {
    pub fn new(
        share: &'a dyn SharePlatform,
        download: &'a dyn Downloader,
        notifier: &'a dyn Notifier,
    ) -> Self {
        Self {
            share,
            download,
            notifier,
            options: ExportOptions::default(),
            lock: ExportLock::new(),
        }
    }

    pub fn with_options(mut self, options: ExportOptions) -> Self {
        self.options = options;
        self
    }

    /// Share an in-flight flag with other exporters.
    pub fn with_lock(mut self, lock: ExportLock) -> Self {
        self.lock = lock;
        self
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Export scene markup with a caption. Never fails; see the report.
    pub fn run(&self, markup: &str, caption: &str) -> ExportReport {
        let Some(_guard) = self.lock.try_acquire() else {
            debug!("export already in flight, ignoring trigger");
            return ExportReport::skipped();
        };

        let _span = info_span!("export", file = %self.options.file_name).entered();
        let mut progress = Progress::new();
        let mut report = ExportReport {
            trace: Vec::new(),
            route: None,
            size: None,
            bytes: 0,
            error: None,
            skipped: false,
        };

        match self.pipeline(markup, caption, &mut progress, &mut report) {
            Ok(route) => {
                progress.enter(ExportState::Done);
                info!(?route, "export finished");
                report.route = Some(route);
            }
            Err(err) => {
                error!(error = %err, state = ?progress.current(), "export failed");
                progress.enter(ExportState::Failed);
                report.error = Some(err);
            }
        }

        report.trace = progress.into_trace();
        report
    }

    fn pipeline(
        &self,
        markup: &str,
        caption: &str,
        progress: &mut Progress,
        report: &mut ExportReport,
    ) -> Result<DeliveryRoute> {
        let artifact = self.produce(markup, progress)?;
        report.size = Some((artifact.width, artifact.height));
        report.bytes = artifact.file.bytes.len();
        self.deliver(artifact, caption, progress)
    }

    fn produce(&self, markup: &str, progress: &mut Progress) -> Result<Artifact> {
        progress.enter(ExportState::Rasterizing);
        let tree = render::decode(markup)?;

        let image = render::draw(&tree, self.options.scale)?;
        progress.enter(ExportState::SurfaceReady);

        let bytes = render::encode_png(&image)?;
        progress.enter(ExportState::Encoded);

        Ok(Artifact {
            file: SharedFile {
                name: self.options.file_name.clone(),
                mime: PNG_MIME.to_string(),
                bytes,
            },
            width: image.width(),
            height: image.height(),
        })
    }

    fn deliver(
        &self,
        artifact: Artifact,
        caption: &str,
        progress: &mut Progress,
    ) -> Result<DeliveryRoute> {
        let payload = SharePayload {
            title: self.options.title.clone(),
            files: vec![artifact.file],
            text: self.options.share_text(caption),
        };

        if self.share.can_share(&payload) {
            progress.enter(ExportState::Sharing);
            return match self.share.share(&payload)? {
                ShareOutcome::Completed => Ok(DeliveryRoute::Shared),
                ShareOutcome::Cancelled => {
                    debug!("share dismissed by user");
                    Ok(DeliveryRoute::Cancelled)
                }
            };
        }

        let reason = PetalError::ShareUnavailable;
        warn!(%reason, "falling back to download");
        progress.enter(ExportState::Downloading);

        let file = payload.files.first().ok_or(PetalError::ShareUnavailable)?;
        let path = self.download.download(file)?;
        self.notifier.notice(&self.options.fallback_notice);

        Ok(DeliveryRoute::Downloaded { path })
    }
}

/// Records state transitions and logs each one.
struct Progress {
    trace: Vec<ExportState>,
}

impl Progress {
    fn new() -> Self {
        Self {
            trace: vec![ExportState::Idle],
        }
    }

    fn current(&self) -> ExportState {
        self.trace.last().copied().unwrap_or(ExportState::Idle)
    }

    fn enter(&mut self, state: ExportState) {
        debug!(from = ?self.current(), to = ?state, "export state");
        self.trace.push(state);
    }

    fn into_trace(self) -> Vec<ExportState> {
        self.trace
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::compose;
    use crate::types::{FlowerColour, ShapeKind};
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    /// Share surface that records every call.
    #[derive(Default)]
    struct RecordingShare {
        capable: bool,
        outcome: Option<ShareOutcome>,
        checked: RefCell<Vec<SharePayload>>,
        shared: RefCell<Vec<SharePayload>>,
    }

    impl RecordingShare {
        fn capable(outcome: Option<ShareOutcome>) -> Self {
            Self {
                capable: true,
                outcome,
                ..Default::default()
            }
        }
    }

    impl SharePlatform for RecordingShare {
        fn can_share(&self, payload: &SharePayload) -> bool {
            self.checked.borrow_mut().push(payload.clone());
            self.capable
        }

        fn share(&self, payload: &SharePayload) -> Result<ShareOutcome> {
            self.shared.borrow_mut().push(payload.clone());
            self.outcome.ok_or_else(|| PetalError::Delivery {
                message: "permission denied".to_string(),
                help: None,
            })
        }
    }

    #[derive(Default)]
    struct RecordingDownload {
        files: RefCell<Vec<SharedFile>>,
    }

    impl Downloader for RecordingDownload {
        fn download(&self, file: &SharedFile) -> Result<PathBuf> {
            self.files.borrow_mut().push(file.clone());
            Ok(PathBuf::from("downloads").join(&file.name))
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        notices: RefCell<Vec<String>>,
    }

    impl Notifier for RecordingNotifier {
        fn notice(&self, message: &str) {
            self.notices.borrow_mut().push(message.to_string());
        }
    }

    fn daisy() -> String {
        compose(ShapeKind::Daisy, FlowerColour::Red).to_markup()
    }

    #[test]
    fn test_share_when_capable() {
        let share = RecordingShare::capable(Some(ShareOutcome::Completed));
        let download = RecordingDownload::default();
        let notifier = RecordingNotifier::default();
        let exporter = Exporter::new(&share, &download, &notifier);

        let report = exporter.run(&daisy(), "For you");

        assert!(report.is_success());
        assert_eq!(report.route, Some(DeliveryRoute::Shared));
        assert_eq!(
            report.trace,
            vec![
                ExportState::Idle,
                ExportState::Rasterizing,
                ExportState::SurfaceReady,
                ExportState::Encoded,
                ExportState::Sharing,
                ExportState::Done,
            ]
        );

        let shared = share.shared.borrow();
        assert_eq!(shared.len(), 1);
        assert_eq!(shared[0].title, DEFAULT_TITLE);
        assert_eq!(shared[0].text, "For you");
        assert_eq!(shared[0].files.len(), 1);
        assert_eq!(shared[0].files[0].name, "flower.png");
        assert_eq!(shared[0].files[0].mime, "image/png");
        assert!(download.files.borrow().is_empty());
        assert!(notifier.notices.borrow().is_empty());
    }

    #[test]
    fn test_capability_checked_with_exact_payload() {
        let share = RecordingShare::capable(Some(ShareOutcome::Completed));
        let download = RecordingDownload::default();
        let notifier = RecordingNotifier::default();
        Exporter::new(&share, &download, &notifier).run(&daisy(), "");

        assert_eq!(*share.checked.borrow(), *share.shared.borrow());
    }

    #[test]
    fn test_cancelled_share_is_success() {
        let share = RecordingShare::capable(Some(ShareOutcome::Cancelled));
        let download = RecordingDownload::default();
        let notifier = RecordingNotifier::default();

        let report = Exporter::new(&share, &download, &notifier).run(&daisy(), "");

        assert!(report.is_success());
        assert!(report.error.is_none());
        assert_eq!(report.route, Some(DeliveryRoute::Cancelled));
        assert!(download.files.borrow().is_empty());
    }

    #[test]
    fn test_rejected_share_fails_without_fallback() {
        let share = RecordingShare::capable(None);
        let download = RecordingDownload::default();
        let notifier = RecordingNotifier::default();

        let report = Exporter::new(&share, &download, &notifier).run(&daisy(), "");

        assert_eq!(report.state(), ExportState::Failed);
        assert!(matches!(report.error, Some(PetalError::Delivery { .. })));
        assert_eq!(share.shared.borrow().len(), 1);
        assert!(download.files.borrow().is_empty());
        assert!(notifier.notices.borrow().is_empty());
    }

    #[test]
    fn test_fallback_downloads_once() {
        let share = RecordingShare::default();
        let download = RecordingDownload::default();
        let notifier = RecordingNotifier::default();

        let report = Exporter::new(&share, &download, &notifier).run(&daisy(), "");

        assert!(report.is_success());
        assert!(share.shared.borrow().is_empty());
        assert_eq!(download.files.borrow().len(), 1);
        assert_eq!(download.files.borrow()[0].name, "flower.png");
        assert_eq!(*notifier.notices.borrow(), vec![FALLBACK_NOTICE.to_string()]);
        assert_eq!(
            report.route,
            Some(DeliveryRoute::Downloaded {
                path: PathBuf::from("downloads/flower.png")
            })
        );
        assert!(report.reached(ExportState::Downloading));
        assert!(!report.reached(ExportState::Sharing));
    }

    #[test]
    fn test_empty_caption_uses_default_text() {
        let share = RecordingShare::default();
        let download = RecordingDownload::default();
        let notifier = RecordingNotifier::default();

        Exporter::new(&share, &download, &notifier).run(&daisy(), "");

        assert_eq!(share.checked.borrow()[0].text, DEFAULT_CAPTION);
    }

    #[test]
    fn test_decode_failure_stops_pipeline() {
        let share = RecordingShare::capable(Some(ShareOutcome::Completed));
        let download = RecordingDownload::default();
        let notifier = RecordingNotifier::default();

        let report = Exporter::new(&share, &download, &notifier).run("<<garbage>>", "");

        assert_eq!(
            report.trace,
            vec![
                ExportState::Idle,
                ExportState::Rasterizing,
                ExportState::Failed
            ]
        );
        assert!(matches!(
            report.error,
            Some(PetalError::Rasterization { .. })
        ));
        assert!(report.size.is_none());
        assert!(share.checked.borrow().is_empty());
        assert!(share.shared.borrow().is_empty());
        assert!(download.files.borrow().is_empty());
        assert!(notifier.notices.borrow().is_empty());
    }

    #[test]
    fn test_oversized_canvas_fails_before_surface() {
        let share = RecordingShare::capable(Some(ShareOutcome::Completed));
        let download = RecordingDownload::default();
        let notifier = RecordingNotifier::default();
        let huge = r#"<svg xmlns="http://www.w3.org/2000/svg" width="1000000" height="1000000"/>"#;

        let report = Exporter::new(&share, &download, &notifier).run(huge, "");

        assert_eq!(report.state(), ExportState::Failed);
        assert!(matches!(
            report.error,
            Some(PetalError::SurfaceUnavailable {
                width: 1_000_000,
                height: 1_000_000
            })
        ));
        assert!(!report.reached(ExportState::SurfaceReady));
        assert!(share.checked.borrow().is_empty());
        assert!(share.shared.borrow().is_empty());
        assert!(download.files.borrow().is_empty());
    }

    #[test]
    fn test_oversized_scale_fails_before_surface() {
        let share = RecordingShare::capable(Some(ShareOutcome::Completed));
        let download = RecordingDownload::default();
        let notifier = RecordingNotifier::default();
        let options = ExportOptions {
            scale: 100_000,
            ..Default::default()
        };

        let report = Exporter::new(&share, &download, &notifier)
            .with_options(options)
            .run(&daisy(), "");

        assert_eq!(
            report.trace,
            vec![
                ExportState::Idle,
                ExportState::Rasterizing,
                ExportState::Failed
            ]
        );
        assert!(matches!(
            report.error,
            Some(PetalError::SurfaceUnavailable { .. })
        ));
        assert!(share.shared.borrow().is_empty());
        assert!(download.files.borrow().is_empty());
        assert!(notifier.notices.borrow().is_empty());
    }

    #[test]
    fn test_artifact_decodes_to_canvas_size() {
        let share = RecordingShare::capable(Some(ShareOutcome::Completed));
        let download = RecordingDownload::default();
        let notifier = RecordingNotifier::default();
        let options = ExportOptions {
            scale: 2,
            ..Default::default()
        };

        let report = Exporter::new(&share, &download, &notifier)
            .with_options(options)
            .run(&daisy(), "");

        assert_eq!(report.size, Some((200, 200)));
        let shared = share.shared.borrow();
        let png = image::load_from_memory(&shared[0].files[0].bytes).unwrap();
        assert_eq!((png.width(), png.height()), (200, 200));
        assert_eq!(report.bytes, shared[0].files[0].bytes.len());
    }

    #[test]
    fn test_busy_lock_skips_trigger() {
        let share = RecordingShare::capable(Some(ShareOutcome::Completed));
        let download = RecordingDownload::default();
        let notifier = RecordingNotifier::default();
        let lock = ExportLock::new();
        let exporter = Exporter::new(&share, &download, &notifier).with_lock(lock.clone());

        let held = lock.try_acquire().unwrap();
        let report = exporter.run(&daisy(), "");
        assert!(report.skipped);
        assert_eq!(report.state(), ExportState::Idle);
        assert!(share.checked.borrow().is_empty());

        drop(held);
        let report = exporter.run(&daisy(), "");
        assert!(report.is_success());
        assert!(!lock.is_busy());
    }

    #[test]
    fn test_summary_serializes() {
        let share = RecordingShare::default();
        let download = RecordingDownload::default();
        let notifier = RecordingNotifier::default();

        let report = Exporter::new(&share, &download, &notifier).run(&daisy(), "");
        let json = serde_json::to_value(report.summary()).unwrap();

        assert_eq!(json["state"], "done");
        assert_eq!(json["delivery"]["route"], "downloaded");
        assert_eq!(json["width"], 100);
        assert_eq!(json["error"], serde_json::Value::Null);
    }

    #[test]
    fn test_terminal_states() {
        assert!(ExportState::Done.is_terminal());
        assert!(ExportState::Failed.is_terminal());
        assert!(!ExportState::Encoded.is_terminal());
    }
}
