//! Client-side enhancements for rendered notebook pages: highlighting
//! hookup, copy buttons on code blocks, smooth in-page scrolling, a
//! persisted dark theme toggle and a generated table of contents.
//!
//! The routines run against a [`Page`], which owns the parsed document and a
//! [`Host`] providing the browser capabilities. The `notebook-enhance` binary
//! drives them with [`HeadlessHost`] to pre-render pages offline.

mod builtin;
mod cli;
pub mod config;
pub mod dom;
pub mod enhance;
pub mod highlighter;
pub mod host;
pub mod invariants;
pub mod page;
mod progress;
pub mod storage;

use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::Context as _;

pub use cli::{Args as CliArgs, ProgressMode};
pub use config::EnhanceConfig;
pub use host::{HeadlessHost, Host};
pub use page::{ClickAction, ClickOutcome, Page, ReadyReport};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};

pub async fn run(args: CliArgs) -> anyhow::Result<()> {
    tokio::task::LocalSet::new().run_until(render_all(args)).await
}

async fn render_all(args: CliArgs) -> anyhow::Result<()> {
    use std::io::IsTerminal as _;

    let progress_enabled = match args.progress {
        ProgressMode::Always => true,
        ProgressMode::Never => false,
        ProgressMode::Auto => std::io::stderr().is_terminal(),
    };
    let progress = progress::Progress::new(progress_enabled);
    progress.set_pages_total(args.input.len());

    progress.set_stage("loading config");
    let config = match &args.config {
        Some(path) => EnhanceConfig::from_json_file(path)?,
        None => EnhanceConfig::default(),
    };
    let storage: Rc<dyn KeyValueStore> = match &args.state {
        Some(path) => Rc::new(JsonFileStore::open(path)?),
        None => Rc::new(MemoryStore::new()),
    };

    let out_paths = output_paths(&args.out, &args.input)?;
    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("create {}", args.out.display()))?;

    let mut toggle_pending = args.toggle_theme;
    let res = async {
        for (input, out_path) in args.input.iter().zip(&out_paths) {
            progress.set_stage(format!("rendering {}", input.display()));
            let page = Page::parse(
                &std::fs::read_to_string(input)
                    .with_context(|| format!("read {}", input.display()))?,
                HeadlessHost::new(storage.clone()),
                config.clone(),
            );

            let html = render_page(&page, &mut toggle_pending, &progress, input).await?;
            invariants::assert_enhanced(&html, &config)
                .with_context(|| format!("check {}", input.display()))?;

            std::fs::write(out_path, html)
                .with_context(|| format!("write {}", out_path.display()))?;
        }
        anyhow::Ok(())
    }
    .await;

    if toggle_pending {
        tracing::warn!("--toggle-theme set but no page has a theme toggle control");
    }
    progress.finish();
    tracing::info!(pages = args.input.len(), "{}", progress.summary());
    res
}

async fn render_page(
    page: &Page<HeadlessHost>,
    toggle_pending: &mut bool,
    progress: &progress::Progress,
    input: &Path,
) -> anyhow::Result<String> {
    let ready = page.ready().unwrap_or_default();

    if *toggle_pending && ready.theme_toggle {
        if let Some(toggle) = dom::element_by_id(page.document(), &page.config().theme_toggle_id)
        {
            page.click(&toggle).await;
            *toggle_pending = false;
        }
    }

    let toc_entries = page.loaded().unwrap_or_default();
    tracing::info!(
        page = %input.display(),
        highlighted = ready.highlighted,
        copy_buttons = ready.copy_buttons,
        anchors = ready.anchors,
        toc_entries,
        "page enhanced"
    );

    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    progress.page_done(&name, ready, toc_entries);
    page.to_html()
}

/// Maps every input to `out_dir/<file name>`, refusing two inputs that would
/// land on the same output file.
fn output_paths(out_dir: &Path, inputs: &[PathBuf]) -> anyhow::Result<Vec<PathBuf>> {
    let mut seen: HashMap<&OsStr, &Path> = HashMap::new();
    let mut paths = Vec::with_capacity(inputs.len());
    for input in inputs {
        let name = input
            .file_name()
            .with_context(|| format!("{} has no file name", input.display()))?;
        if let Some(first) = seen.insert(name, input) {
            anyhow::bail!(
                "{} and {} would both be written to {}",
                first.display(),
                input.display(),
                out_dir.join(name).display()
            );
        }
        paths.push(out_dir.join(name));
    }
    Ok(paths)
}
