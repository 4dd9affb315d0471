use std::{fmt, sync::Arc};

use chrono::Local;
use tokio::{
    sync::Semaphore,
    task::{spawn_blocking, JoinSet},
};
use tracing::error;

use crate::config::Config;
use crate::feed::FeedWriter;
use crate::item::Record;
use crate::parse::{disambiguate_doclinks, parse_exhibits, parse_worksheet, PendingRecord};
use crate::pipeline::normalize;
use crate::request::{request_detail, request_worksheet, Session};
use crate::{info_time, Result};

/// Tally of a finished crawl.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CrawlReport {
    /// Data rows found on the worksheet.
    pub rows_discovered: usize,
    /// Worksheet rows skipped because they couldn't be parsed.
    pub rows_failed: usize,
    /// Records dropped because their registrant page couldn't be fetched or parsed.
    pub records_failed: usize,
    pub records_emitted: usize,
    /// Emitted records whose `exhibit_urls` ended up null.
    pub records_without_exhibits: usize,
}

impl fmt::Display for CrawlReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rows, {} emitted ({} without exhibits), {} bad rows, {} failed records",
            self.rows_discovered,
            self.records_emitted,
            self.records_without_exhibits,
            self.rows_failed,
            self.records_failed
        )
    }
}

/// Crawls the registry and writes every record to the feed configured in `config`.
pub async fn process_site(config: &Config) -> Result<CrawlReport> {
    let start_time = Local::now();
    info_time!("Started scraping");

    let mut feed = match &config.output {
        Some(path) => FeedWriter::create(path).await?,
        None => FeedWriter::stdout(),
    };
    let report = crawl(config, &mut feed).await?;
    feed.close().await?;

    info_time!(start_time, "Finished scraping: {}", report);
    Ok(report)
}

/// Runs both stages of the crawl within one session, writing records in worksheet order.
///
/// A worksheet row that can't be parsed is skipped. A record whose registrant page fails is
/// dropped. Both are logged and counted in the report. Only a failure to open the session or
/// fetch the worksheet aborts the crawl.
pub async fn crawl(config: &Config, feed: &mut FeedWriter) -> Result<CrawlReport> {
    let session = Session::open(config).await?;
    let mut report = CrawlReport::default();

    let pending = discover_records(&session, config, &mut report).await?;
    resolve_records(&session, config, pending, feed, &mut report).await?;
    Ok(report)
}

/// Stage one: fetch the worksheet and turn its rows into records waiting for exhibits.
async fn discover_records(
    session: &Session,
    config: &Config,
    report: &mut CrawlReport,
) -> Result<Vec<PendingRecord>> {
    let html = request_worksheet(session, config).await?;

    let start_time = Local::now();
    let registry_base = config.registry_base.clone();
    let rows = spawn_blocking(move || parse_worksheet(&html, &registry_base)).await??;
    report.rows_discovered = rows.len();

    let mut pending = Vec::with_capacity(rows.len());
    for (row_num, row) in rows.into_iter().enumerate() {
        match row {
            Ok(record) => pending.push(record),
            Err(err) => {
                error!(row = row_num, "Skipping worksheet row: {err}");
                report.rows_failed += 1;
            }
        }
    }
    info_time!(start_time, "Parsed {} worksheet rows", report.rows_discovered);
    Ok(pending)
}

/// Stage two: fetch every registrant page on a bounded pool of tasks.
///
/// Finished records are written as soon as every row before them is done, so the feed
/// stays in the order of `pending` and a crash mid-run keeps what was already resolved.
async fn resolve_records(
    session: &Session,
    config: &Config,
    pending: Vec<PendingRecord>,
    feed: &mut FeedWriter,
    report: &mut CrawlReport,
) -> Result<()> {
    let start_time = Local::now();
    let permits = Arc::new(Semaphore::new(config.workers.max(1)));
    let total = pending.len();

    let mut task_set = JoinSet::new();
    let mut slots: Vec<Option<(String, Result<Record>)>> = (0..total).map(|_| None).collect();
    for (index, item) in pending.into_iter().enumerate() {
        task_set.spawn({
            let session = session.clone();
            let permits = permits.clone();
            let docs_base = config.docs_base.clone();

            async move {
                let detail_url = item.detail_url.clone();
                let res = resolve_record(&session, &permits, item, docs_base).await;
                (index, detail_url, res)
            }
        });
    }

    let emitted_before = feed.written();
    let mut next = 0;
    while let Some(task) = task_set.join_next().await {
        let (index, detail_url, res) = task?;
        slots[index] = Some((detail_url, res));

        while let Some((detail_url, res)) = slots.get_mut(next).and_then(Option::take) {
            next += 1;
            match res {
                Ok(record) => {
                    if record.exhibit_urls.is_none() {
                        report.records_without_exhibits += 1;
                    }
                    feed.write(&record).await?;
                }
                Err(err) => {
                    error!(url = %detail_url, "Failed to resolve record: {err}");
                    report.records_failed += 1;
                }
            }
        }
    }
    report.records_emitted = feed.written() - emitted_before;
    info_time!(start_time, "Resolved {} registrant pages", total);

    Ok(())
}

async fn resolve_record(
    session: &Session,
    permits: &Semaphore,
    item: PendingRecord,
    docs_base: String,
) -> Result<Record> {
    let html = {
        let _permit = permits.acquire().await?;
        request_detail(session, &item.detail_url).await?
    };

    let doclinks = spawn_blocking(move || parse_exhibits(&html, &docs_base)).await??;
    let mut record = item.record;
    let doclinks = disambiguate_doclinks(&record, doclinks);
    record.exhibit_urls = Some(doclinks);

    Ok(normalize(record))
}
