use std::path::Path;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use rusqlite::Connection;
use tracing::{info, warn};

use crate::config::Settings;
use crate::db::{self, FileRecord};
use crate::fetch;
use crate::parser::links::extension_of;
use crate::parser::InstituteRecord;
use crate::semester::Semester;
use crate::storage;

pub struct DownloadStats {
    pub total: usize,
    pub ok: usize,
    pub errors: usize,
}

/// Download the selected semester's files for every institute, saving each
/// to disk and recording the outcome per file. A failed download is warned
/// and recorded; it never aborts the rest of the run.
pub async fn download_semester(
    conn: &Connection,
    client: &Client,
    settings: &Settings,
    records: &[InstituteRecord],
    semester: Semester,
) -> Result<DownloadStats> {
    let total: usize = records.iter().map(|r| r.links_for(semester).len()).sum();

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")?
            .progress_chars("=> "),
    );

    let mut ok = 0usize;
    let mut errors = 0usize;
    let root = Path::new(&settings.download_dir);

    for record in records {
        let mut outcomes = Vec::new();

        for (index, link) in record.links_for(semester).iter().enumerate() {
            let url = format!("{}{}", settings.base_url, link);
            let extension = extension_of(link).unwrap_or_else(|| "xls".into());

            let outcome = match fetch::fetch_file(client, &url).await {
                Ok(bytes) => {
                    match storage::save_file(root, &record.name, index, &extension, &bytes) {
                        Ok(path) => {
                            ok += 1;
                            FileRecord {
                                institute: record.name.clone(),
                                semester: semester.number(),
                                url: link.clone(),
                                path: Some(path.display().to_string()),
                                error: None,
                            }
                        }
                        Err(e) => {
                            errors += 1;
                            warn!(institute = %record.name, %url, "save failed: {e}");
                            FileRecord {
                                institute: record.name.clone(),
                                semester: semester.number(),
                                url: link.clone(),
                                path: None,
                                error: Some(e.to_string()),
                            }
                        }
                    }
                }
                Err(e) => {
                    errors += 1;
                    warn!(institute = %record.name, %url, "download failed: {e}");
                    FileRecord {
                        institute: record.name.clone(),
                        semester: semester.number(),
                        url: link.clone(),
                        path: None,
                        error: Some(e.to_string()),
                    }
                }
            };

            outcomes.push(outcome);
            pb.inc(1);
        }

        db::save_file_records(conn, &outcomes)?;
    }

    pb.finish_and_clear();
    info!("Downloaded {} files ({} ok, {} errors)", total, ok, errors);

    Ok(DownloadStats { total, ok, errors })
}
