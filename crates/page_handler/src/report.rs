use url::Url;

/// Name used for uploads when a result has no stylesheet path.
pub const DEFAULT_FILE_NAME: &str = "style.css";

/// Path of the report holding every page-crawl result consolidated.
pub const MERGED_FILE_NAME: &str = "merged.css";

/// One pipeline result.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StylesheetReport {
    /// Stylesheet URL in page-crawl mode, `None` for a single stylesheet.
    pub path: Option<String>,
    pub used_css: String,
    /// The stylesheet could not be downloaded or parsed.
    pub parse_error: bool,
    pub cdn_url: Option<String>,
}

impl StylesheetReport {
    #[must_use]
    pub fn single(used_css: String) -> Self {
        Self {
            used_css,
            ..Self::default()
        }
    }

    /// Last segment of `path`, or [`DEFAULT_FILE_NAME`].
    #[must_use]
    pub fn file_name(&self) -> String {
        self.path
            .as_deref()
            .and_then(|path| match Url::parse(path) {
                Ok(url) => url
                    .path_segments()
                    .and_then(|mut segments| segments.next_back())
                    .map(str::to_owned),
                Err(_) => path.rsplit('/').next().map(str::to_owned),
            })
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_FILE_NAME.to_owned())
    }
}
