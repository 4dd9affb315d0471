use chrono::NaiveDate;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::item::{ExhibitLink, Record};
use crate::{Error, Result};

const ROWS: &str = r#"table[class="apexir_WORKSHEET_DATA"] tr[class="odd"], table[class="apexir_WORKSHEET_DATA"] tr[class="even"]"#;
const DATE_FORMAT: &str = "%m/%d/%Y";

const LINK: &str = "LINK BREAK_COUNTRY_NAME";
const STATE: &str = "STATE BREAK_COUNTRY_NAME";
const REG_NUMBER: &str = "REG_NUMBER BREAK_COUNTRY_NAME";
const ADDRESS: &str = "ADDRESS_1 BREAK_COUNTRY_NAME";
const FP_NAME: &str = "FP_NAME BREAK_COUNTRY_NAME";
const FP_REG_DATE: &str = "FP_REG_DATE BREAK_COUNTRY_NAME";
const REGISTRANT: &str = "REGISTRANT_NAME BREAK_COUNTRY_NAME";
const DOCLINK: &str = "DOCLINK";
const DATE_STAMPED: &str = "DATE_STAMPED";

/// A parsed worksheet row still waiting for its exhibits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRecord {
    pub record: Record,
    /// Registrant page listing the exhibits for this row.
    pub detail_url: String,
}

/// Parses the full worksheet of registrations.
/// Every data row gets its own result, so one malformed row doesn't spoil the page.
pub fn parse_worksheet(html: &str, registry_base: &str) -> Result<Vec<Result<PendingRecord>>> {
    let doc = Html::parse_document(html);
    let base = parse_base(registry_base)?;

    let rows = worksheet_rows(&doc)?
        .into_iter()
        .map(|row| parse_principal_row(row, &base))
        .collect();
    Ok(rows)
}

/// Parses a registrant's page into its exhibit links, in table order.
pub fn parse_exhibits(html: &str, docs_base: &str) -> Result<Vec<ExhibitLink>> {
    let doc = Html::parse_document(html);
    let base = parse_base(docs_base)?;

    worksheet_rows(&doc)?
        .into_iter()
        .map(|row| parse_exhibit_row(row, &base))
        .collect()
}

/// Returns the `odd` and `even` data rows of the APEX worksheet table in document order.
/// A page without the table has no rows.
pub fn worksheet_rows(doc: &Html) -> Result<Vec<ElementRef<'_>>> {
    let row_selector = create_selector(ROWS)?;
    Ok(doc.select(&row_selector).collect())
}

/// Collects the direct text of every cell whose `headers` starts with `header`.
/// Each piece of text is trimmed and the pieces are joined with `\r\n`.
pub fn extract_field(row: ElementRef<'_>, header: &str) -> Result<String> {
    let cell_selector = create_selector(&format!(r#"td[headers^="{header}"]"#))?;

    let pieces: Vec<&str> = row
        .select(&cell_selector)
        .flat_map(|cell| cell.children())
        .filter_map(|node| node.value().as_text())
        .map(|text| text.trim())
        .collect();
    Ok(pieces.join("\r\n"))
}

pub fn parse_principal_row(row: ElementRef<'_>, registry_base: &Url) -> Result<PendingRecord> {
    let link_selector = create_selector(&format!(r#"td[headers^="{LINK}"] a[href]"#))?;
    let href = row
        .select(&link_selector)
        .next()
        .and_then(|a| a.value().attr("href"))
        .ok_or(Error::ParseMissingCell(LINK))?;

    let url = join_url(registry_base, href)?;
    let country = decode_country(href);
    let date = parse_date(&extract_field(row, FP_REG_DATE)?)?;

    let record = Record {
        url: url.clone(),
        country,
        state: Some(extract_field(row, STATE)?),
        reg_num: extract_field(row, REG_NUMBER)?,
        address: Some(extract_field(row, ADDRESS)?),
        foreign_principal: extract_field(row, FP_NAME)?,
        date,
        registrant: extract_field(row, REGISTRANT)?,
        exhibit_urls: None,
    };
    Ok(PendingRecord {
        record,
        // The same registrant page is fetched once per principal.
        detail_url: url,
    })
}

pub fn parse_exhibit_row(row: ElementRef<'_>, docs_base: &Url) -> Result<ExhibitLink> {
    let anchor_selector = create_selector(&format!(r#"td[headers="{DOCLINK}"] a"#))?;
    let anchor = row
        .select(&anchor_selector)
        .next()
        .ok_or(Error::ParseMissingCell(DOCLINK))?;

    let foreign_principal = anchor
        .text()
        .next()
        .ok_or(Error::ParseMissingCell(DOCLINK))?
        .trim()
        .to_string();
    let href = anchor
        .value()
        .attr("href")
        .ok_or(Error::ParseMissingCell(DOCLINK))?;

    Ok(ExhibitLink {
        date: parse_date(&extract_field(row, DATE_STAMPED)?)?,
        foreign_principal,
        exhibit_url: join_url(docs_base, href)?,
    })
}

/// Hook for narrowing a registrant's exhibits down to the ones filed for `record`'s principal.
///
/// A registrant page lists the exhibits of every principal it represents, and the
/// link text doesn't reliably match the principal's name (typos, joint filings).
/// Until a matching rule has been checked against real site data every link is kept.
pub fn disambiguate_doclinks(_record: &Record, doclinks: Vec<ExhibitLink>) -> Vec<ExhibitLink> {
    doclinks
}

#[inline]
fn create_selector(sel_str: &str) -> Result<Selector> {
    Selector::parse(sel_str).map_err(|_| Error::ParseInvalidSelector(sel_str.into()))
}

fn parse_base(base: &str) -> Result<Url> {
    Url::parse(base).map_err(|source| Error::UrlBase {
        base: base.into(),
        source,
    })
}

fn join_url(base: &Url, href: &str) -> Result<String> {
    base.join(href)
        .map(String::from)
        .map_err(|source| Error::UrlJoin {
            base: base.to_string(),
            href: href.into(),
            source,
        })
}

/// The country is the last comma-separated argument of the registrant link.
/// Invalid UTF-8 in the decoded bytes is replaced rather than failing the row.
fn decode_country(href: &str) -> String {
    let segment = href.rsplit(',').next().unwrap_or(href);
    let bytes = urlencoding::decode_binary(segment.as_bytes());
    String::from_utf8_lossy(&bytes).into_owned()
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|source| Error::ParseDate {
        value: value.into(),
        format: DATE_FORMAT,
        source,
    })
}
