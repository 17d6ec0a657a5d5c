use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use indicatif::{HumanDuration, MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::page::ReadyReport;

#[derive(Debug, Default)]
struct Totals {
    highlighted: AtomicU64,
    copy_buttons: AtomicU64,
    anchors: AtomicU64,
    toc_entries: AtomicU64,
}

pub struct Progress {
    enabled: bool,
    start: Instant,

    mp: Option<MultiProgress>,
    stage: ProgressBar,
    pages: ProgressBar,

    totals: Totals,
}

impl Progress {
    pub fn new(enabled: bool) -> Arc<Self> {
        let start = Instant::now();

        if !enabled {
            return Arc::new(Self {
                enabled: false,
                start,
                mp: None,
                stage: ProgressBar::hidden(),
                pages: ProgressBar::hidden(),
                totals: Totals::default(),
            });
        }

        let mp = MultiProgress::with_draw_target(ProgressDrawTarget::stderr());

        let stage = mp.add(ProgressBar::new_spinner());
        stage.set_style(
            ProgressStyle::with_template("{spinner} {msg}  [{elapsed_precise}]")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        stage.enable_steady_tick(Duration::from_millis(80));
        stage.set_message("starting");

        let pages = mp.add(ProgressBar::new(0));
        pages.set_style(
            ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("##-"),
        );
        pages.set_message("pages");

        Arc::new(Self {
            enabled: true,
            start,
            mp: Some(mp),
            stage,
            pages,
            totals: Totals::default(),
        })
    }

    pub fn set_stage(&self, msg: impl Into<String>) {
        if !self.enabled {
            return;
        }
        self.stage.set_message(msg.into());
    }

    pub fn set_pages_total(&self, total: usize) {
        if self.enabled {
            self.pages.set_length(total as u64);
        }
    }

    pub fn page_done(&self, name: &str, ready: ReadyReport, toc_entries: usize) {
        self.totals
            .highlighted
            .fetch_add(ready.highlighted as u64, Ordering::Relaxed);
        self.totals
            .copy_buttons
            .fetch_add(ready.copy_buttons as u64, Ordering::Relaxed);
        self.totals
            .anchors
            .fetch_add(ready.anchors as u64, Ordering::Relaxed);
        self.totals
            .toc_entries
            .fetch_add(toc_entries as u64, Ordering::Relaxed);

        if self.enabled {
            self.pages.inc(1);
            self.pages.set_message(name.to_string());
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "highlighted {} | copy buttons {} | anchors {} | toc entries {}",
            self.totals.highlighted.load(Ordering::Relaxed),
            self.totals.copy_buttons.load(Ordering::Relaxed),
            self.totals.anchors.load(Ordering::Relaxed),
            self.totals.toc_entries.load(Ordering::Relaxed),
        )
    }

    pub fn finish(&self) {
        if !self.enabled {
            return;
        }
        self.stage.finish_with_message("done");
        self.pages.finish_and_clear();
        if let Some(mp) = &self.mp {
            let _ = mp.println(format!(
                "Done in {}: {}",
                HumanDuration(self.start.elapsed()),
                self.summary()
            ));
        }
    }
}
