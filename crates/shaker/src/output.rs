use std::fs;
use std::io::{self, Write as _};
use std::path::Path;

use anyhow::{Context as _, Error};
use log::{error, info};
use page_handler::StylesheetReport;

/// Write a result without a stylesheet path to `out`, or to stdout.
pub fn write_single(report: &StylesheetReport, out: Option<&Path>) -> Result<(), Error> {
    if let Some(url) = &report.cdn_url {
        info!("{} is served from {url}", report.file_name());
    }
    match out {
        Some(path) => fs::write(path, &report.used_css)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(report.used_css.as_bytes())?;
            stdout.write_all(b"\n")?;
            Ok(())
        }
    }
}

/// Write pipeline results: single results like [`write_single`], page-crawl
/// results one file per stylesheet inside `dest_dir`.
pub fn write_reports(
    reports: &[StylesheetReport],
    out: Option<&Path>,
    dest_dir: &Path,
) -> Result<(), Error> {
    if let [report] = reports
        && report.path.is_none()
    {
        return write_single(report, out);
    }

    fs::create_dir_all(dest_dir)
        .with_context(|| format!("Failed to create {}", dest_dir.display()))?;
    for report in reports {
        let name = report.file_name();
        if report.parse_error {
            error!("Skipping {name}: it could not be downloaded or parsed");
            continue;
        }
        let target = dest_dir.join(&name);
        fs::write(&target, &report.used_css)
            .with_context(|| format!("Failed to write {}", target.display()))?;
        match &report.cdn_url {
            Some(url) => info!("Wrote {} (CDN: {url})", target.display()),
            None => info!("Wrote {}", target.display()),
        }
    }
    Ok(())
}
