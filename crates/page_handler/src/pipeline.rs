//! Jobs: what to fetch, what to filter, and what to hand back.

use anyhow::Context as _;
use css::{filter_used_css_in, merge_and_optimize, minify_css, try_filter_used_css};
use futures::future::join_all;
use html::{Document, extract_stylesheet_refs};
use log::{error, info, warn};
use url::Url;

use crate::cdn::CdnClient;
use crate::config::PipelineOptions;
use crate::error::PipelineError;
use crate::render::fetch_rendered;
use crate::report::{MERGED_FILE_NAME, StylesheetReport};
use crate::url::fetch_text;

/// Where a stylesheet or a page comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    Text(String),
    Url(Url),
}

impl Source {
    const fn url(&self) -> Option<&Url> {
        match self {
            Self::Url(url) => Some(url),
            Self::Text(_) => None,
        }
    }
}

/// One run of the tool.
///
/// The inputs decide the mode:
/// - page only: every stylesheet the page links is fetched and filtered
/// - page and stylesheet: the stylesheet is filtered against the page
/// - stylesheet only: the stylesheet is minified
#[derive(Clone, Debug, Default)]
pub struct Job {
    pub css: Option<Source>,
    pub html: Option<Source>,
    pub options: PipelineOptions,
}

impl Job {
    #[must_use]
    pub const fn new(css: Option<Source>, html: Option<Source>, options: PipelineOptions) -> Self {
        Self { css, html, options }
    }

    /// Run the job.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::Fetch`] when the stylesheet or the page cannot be downloaded
    /// - [`PipelineError::NothingToProcess`] when both inputs are blank
    /// - [`PipelineError::Css`] when a single stylesheet cannot be parsed
    /// - [`PipelineError::Remote`] when an upload fails
    pub async fn run(&self) -> Result<Vec<StylesheetReport>, PipelineError> {
        let css = match &self.css {
            Some(Source::Url(url)) => fetch_text(url)
                .await
                .context("The download of the CSS file has failed")
                .map_err(PipelineError::Fetch)?,
            Some(Source::Text(text)) => text.clone(),
            None => String::new(),
        };
        let html = match &self.html {
            Some(Source::Url(url)) => {
                let page = if self.options.use_static_html {
                    fetch_text(url).await
                } else {
                    fetch_rendered(url).await
                };
                page.context("The download of the HTML file has failed")
                    .map_err(PipelineError::Fetch)?
            }
            Some(Source::Text(text)) => text.clone(),
            None => String::new(),
        };

        let css = css.trim();
        let html = html.trim();
        let mut reports = match (html.is_empty(), css.is_empty()) {
            (true, true) => return Err(PipelineError::NothingToProcess),
            (false, true) => {
                let base = self.html.as_ref().and_then(Source::url);
                self.crawl_page(html, base).await
            }
            (false, false) => vec![StylesheetReport::single(try_filter_used_css(
                html,
                css,
                &self.options.usage,
            )?)],
            (true, false) => vec![StylesheetReport::single(minify_css(css)?)],
        };

        if self.options.cdn_mode {
            upload_reports(&mut reports, &self.options).await?;
        }
        Ok(reports)
    }

    async fn crawl_page(&self, html: &str, base: Option<&Url>) -> Vec<StylesheetReport> {
        let document = Document::parse(html);
        let refs = extract_stylesheet_refs(&document, base);
        info!("Page links {} stylesheets", refs.len());

        let downloads = join_all(refs.iter().map(|stylesheet| fetch_text(&stylesheet.url))).await;
        let mut reports: Vec<StylesheetReport> = refs
            .iter()
            .zip(downloads)
            .map(|(stylesheet, download)| {
                let path = Some(stylesheet.url.to_string());
                match download {
                    Ok(text) => {
                        let outcome = filter_used_css_in(&document, &text, &self.options.usage);
                        StylesheetReport {
                            path,
                            used_css: outcome.css,
                            parse_error: outcome.parse_error,
                            cdn_url: None,
                        }
                    }
                    Err(err) => {
                        error!("The download of {} has failed: {err:#}", stylesheet.url);
                        StylesheetReport {
                            path,
                            parse_error: true,
                            ..StylesheetReport::default()
                        }
                    }
                }
            })
            .collect();

        if self.options.merge_all {
            reports.push(merge_reports(&reports, &self.options));
        }
        reports
    }
}

fn merge_reports(reports: &[StylesheetReport], options: &PipelineOptions) -> StylesheetReport {
    let sources: Vec<&str> = reports
        .iter()
        .filter(|report| !report.parse_error)
        .map(|report| report.used_css.as_str())
        .collect();
    let path = Some(MERGED_FILE_NAME.to_owned());
    match merge_and_optimize(&sources, &options.consolidate_options()) {
        Ok(used_css) => StylesheetReport {
            path,
            used_css,
            ..StylesheetReport::default()
        },
        Err(err) => {
            error!("Consolidating the page stylesheets failed: {err}");
            StylesheetReport {
                path,
                parse_error: true,
                ..StylesheetReport::default()
            }
        }
    }
}

async fn upload_reports(
    reports: &mut [StylesheetReport],
    options: &PipelineOptions,
) -> Result<(), PipelineError> {
    let client = CdnClient::new(&options.cdn_endpoint, options.api_key.as_deref().unwrap_or_default())?;
    for report in reports.iter_mut() {
        if report.used_css.is_empty() {
            warn!("Not uploading empty result for {}", report.file_name());
            continue;
        }
        let upload = client.upload(&report.used_css, &report.file_name()).await?;
        report.cdn_url = Some(upload.url);
    }
    Ok(())
}

/// Fetch `urls` in order and consolidate them into one stylesheet.
///
/// The report's path is [`MERGED_FILE_NAME`]; in CDN mode it also carries
/// the upload URL.
///
/// # Errors
///
/// - [`PipelineError::NothingToProcess`] when `urls` is empty
/// - [`PipelineError::Fetch`] when any source cannot be downloaded
/// - [`PipelineError::Css`] when the concatenation cannot be parsed
/// - [`PipelineError::Remote`] when the upload fails
pub async fn consolidate_urls(
    urls: &[Url],
    options: &PipelineOptions,
) -> Result<StylesheetReport, PipelineError> {
    if urls.is_empty() {
        return Err(PipelineError::NothingToProcess);
    }
    let downloads = join_all(urls.iter().map(fetch_text)).await;
    let mut sources: Vec<String> = Vec::with_capacity(downloads.len());
    for (url, download) in urls.iter().zip(downloads) {
        let text = download
            .with_context(|| format!("The download of the CSS file {url} has failed"))
            .map_err(PipelineError::Fetch)?;
        sources.push(text);
    }

    let used_css = merge_and_optimize(&sources, &options.consolidate_options())?;
    let mut reports = [StylesheetReport {
        path: Some(MERGED_FILE_NAME.to_owned()),
        used_css,
        ..StylesheetReport::default()
    }];
    if options.cdn_mode {
        upload_reports(&mut reports, options).await?;
    }
    let [report] = reports;
    Ok(report)
}
