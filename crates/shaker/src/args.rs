use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Error};
use clap::Parser;
use css::{OrderingMode, WhitelistRule};
use page_handler::PipelineOptions;
use page_handler::url::resolve_location;
use page_handler::{Job, Source};
use url::Url;

/// Remove the CSS a page does not use, or consolidate several stylesheets
#[derive(Parser, Debug)]
#[command(name = "shaker", version, about)]
pub struct Args {
    /// Stylesheet to filter or minify (URL or local path)
    #[arg(long)]
    pub css: Option<String>,

    /// Page the stylesheet is checked against (URL or local path)
    #[arg(long)]
    pub html: Option<String>,

    /// Write a single result here instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Directory receiving one file per stylesheet in page-crawl mode
    #[arg(long, default_value = ".")]
    pub dest_dir: PathBuf,

    /// JSON file with selectors to keep: [{"kind":"equals"|"containing","pattern":"..."}]
    #[arg(long)]
    pub whitelist: Option<PathBuf>,

    /// Consolidate these stylesheets, in order, into one
    #[arg(long, num_args = 1.., conflicts_with_all = ["css", "html"])]
    pub merge: Vec<String>,

    /// Render the page in headless Chrome before checking selectors
    #[arg(long)]
    pub render: bool,

    /// Indented output instead of minified
    #[arg(long)]
    pub pretty: bool,

    /// Drop selectors with vendor pseudo-elements (::-moz, ::-webkit, ::-ms-)
    #[arg(long)]
    pub remove_vendor: bool,

    /// In page-crawl mode, also write every result consolidated into merged.css
    #[arg(long)]
    pub merge_all: bool,

    /// Order rules by line and column when merging, not by column only
    #[arg(long)]
    pub full_ordering: bool,

    /// Upload results to the CDN
    #[arg(long)]
    pub cdn: bool,

    /// API key for CDN uploads (defaults to SHAKER_API_KEY)
    #[arg(long)]
    pub api_key: Option<String>,
}

impl Args {
    /// Environment settings overridden by the flags that were given.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the whitelist file cannot be read or is not valid JSON.
    pub fn pipeline_options(&self) -> Result<PipelineOptions, Error> {
        let mut options = PipelineOptions::from_env();
        if self.render {
            options.use_static_html = false;
        }
        if self.pretty {
            options.usage.minify_output = false;
        }
        if self.remove_vendor {
            options.usage.remove_vendor_pseudo_classes = true;
        }
        if self.merge_all {
            options.merge_all = true;
        }
        if self.full_ordering {
            options.ordering = OrderingMode::Full;
        }
        if self.cdn {
            options.cdn_mode = true;
        }
        if let Some(key) = &self.api_key {
            options.api_key = Some(key.clone());
        }
        if let Some(path) = &self.whitelist {
            options.usage.whitelist = load_whitelist(path)?;
        }
        Ok(options)
    }

    /// # Errors
    ///
    /// Returns `Err` if a location is neither a URL nor a usable path.
    pub fn job(&self, options: PipelineOptions) -> Result<Job, Error> {
        Ok(Job::new(
            self.css.as_deref().map(source).transpose()?,
            self.html.as_deref().map(source).transpose()?,
            options,
        ))
    }

    /// # Errors
    ///
    /// Returns `Err` if a location is neither a URL nor a usable path.
    pub fn merge_urls(&self) -> Result<Vec<Url>, Error> {
        self.merge.iter().map(|location| resolve_location(location)).collect()
    }
}

fn source(location: &str) -> Result<Source, Error> {
    resolve_location(location).map(Source::Url)
}

fn load_whitelist(path: &Path) -> Result<Vec<WhitelistRule>, Error> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read whitelist {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid whitelist {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use css::WhitelistKind;
    use tempfile::TempDir;

    #[test]
    fn merge_conflicts_with_single_inputs() {
        assert!(Args::try_parse_from(["shaker", "--merge", "a.css", "--css", "b.css"]).is_err());
        let args = Args::try_parse_from(["shaker", "--merge", "a.css", "https://x.test/b.css"]);
        assert!(args.is_ok_and(|args| args.merge.len() == 2));
    }

    #[test]
    fn flags_override_options() -> Result<(), Error> {
        let dir = TempDir::new()?;
        let whitelist = dir.path().join("keep.json");
        fs::write(&whitelist, r#"[{"kind":"equals","pattern":".open"}]"#)?;
        let args = Args::try_parse_from([
            "shaker".into(),
            "--pretty".into(),
            "--full-ordering".into(),
            "--whitelist".into(),
            whitelist.into_os_string(),
        ])?;
        let options = args.pipeline_options()?;
        assert!(!options.usage.minify_output);
        assert_eq!(options.ordering, OrderingMode::Full);
        assert_eq!(options.usage.whitelist[0].kind, WhitelistKind::Equals);
        Ok(())
    }

    #[test]
    fn malformed_whitelist_is_an_error() -> Result<(), Error> {
        let dir = TempDir::new()?;
        let whitelist = dir.path().join("keep.json");
        fs::write(&whitelist, "{not json")?;
        assert!(load_whitelist(&whitelist).is_err());
        Ok(())
    }
}
