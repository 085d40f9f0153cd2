use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use catln_cli::output::{OutputFormat, format_view, write_output};
use catln_cli::summary::page_table;
use catln_cli::view::build_view;
use catln_model::{Document, decode_payload};
use catln_render::RenderOptions;
use catln_source::{
    DirectorySource, DocumentSource, HttpSource, HttpSourceConfig, LoadState, Loader, Route, View,
};
use tracing::{info, info_span};

use crate::cli::{Cli, Command, OutputFormatArg, SourceArgs};
use crate::spinner::Spinner;

type BoxedSource = Box<dyn DocumentSource + Send + Sync>;

/// Result of a successful run; an error view still counts as a failure.
pub struct RunStatus {
    pub failed: bool,
}

pub fn run(cli: &Cli) -> Result<RunStatus> {
    let source = open_source(&cli.source)?;
    let route = match &cli.command {
        Command::Pages => return run_pages(source),
        Command::Typecheck => Route::new(View::Typecheck),
        Command::Desugar => Route::new(View::Desugar),
        Command::Constrain => Route::new(View::Constrain),
        Command::Llvm => Route::new(View::Llvm),
        Command::Docs { page: Some(page) } => Route::docs_page(page.clone()),
        Command::Docs { page: None } => Route::new(View::Docs),
        Command::Route { path } => {
            Route::parse(path).with_context(|| format!("parse route '{path}'"))?
        }
    };
    run_route(source, &route, cli)
}

fn open_source(args: &SourceArgs) -> Result<BoxedSource> {
    if let Some(dir) = &args.dir {
        info!(dir = %dir.display(), "reading dumps from directory");
        return Ok(Box::new(DirectorySource::new(dir.clone())));
    }
    let config =
        HttpSourceConfig::new(args.url.clone()).with_timeout(Duration::from_secs(args.timeout));
    info!(url = %config.base_url, "reading dumps from server");
    let source = HttpSource::new(config).context("create HTTP client")?;
    Ok(Box::new(source))
}

fn load(source: BoxedSource, path: &str) -> LoadState {
    let mut loader = Loader::new(source);
    loader.load(path);
    let spinner = Spinner::start(format!("Loading {path}"));
    let state = loader.wait().clone();
    spinner.finish();
    state
}

fn run_route(source: BoxedSource, route: &Route, cli: &Cli) -> Result<RunStatus> {
    let span = info_span!("render", route = %route);
    let _guard = span.enter();

    let state = load(source, route.source_path());
    let options = RenderOptions::new().with_raw_meta(cli.raw_meta);
    let outcome = build_view(route, &state, options);
    if !outcome.view.diagnostics.is_empty() {
        info!(
            count = outcome.view.diagnostics.len(),
            "some nodes could not be rendered"
        );
    }

    let format = match cli.format {
        OutputFormatArg::Text => OutputFormat::Text,
        OutputFormatArg::Html => OutputFormat::Html,
    };
    let rendered = format_view(&outcome.view, format).context("format view")?;
    write_output(cli.output.as_deref(), &rendered).context("write output")?;
    Ok(RunStatus {
        failed: outcome.failed,
    })
}

fn run_pages(source: BoxedSource) -> Result<RunStatus> {
    let span = info_span!("pages");
    let _guard = span.enter();

    let path = View::Docs.source_path();
    let loaded = match load(source, path) {
        LoadState::Ready(loaded) => loaded,
        LoadState::Error(error) => return Err(anyhow::Error::new(error).context("load pages")),
        LoadState::Pending => return Err(anyhow!("load of {path} did not finish")),
    };
    let data = loaded
        .data
        .ok_or_else(|| anyhow!("the server sent no pages"))?;
    let document: Document = decode_payload(View::Docs.name(), data).context("decode pages")?;
    let table = page_table(&document);
    println!("{table}");
    Ok(RunStatus { failed: false })
}
