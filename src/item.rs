//! Records emitted by the crawl.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One active foreign principal registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub url: String,
    pub country: String,
    pub state: Option<String>,
    pub reg_num: String,
    pub address: Option<String>,
    pub foreign_principal: String,
    #[serde(with = "stamp")]
    pub date: NaiveDate,
    pub registrant: String,
    pub exhibit_urls: Option<Vec<ExhibitLink>>,
}

/// A document filed alongside a registration.
///
/// `foreign_principal` is the text printed next to the link and may not
/// match the owning [`Record`] exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExhibitLink {
    #[serde(with = "stamp")]
    pub date: NaiveDate,
    pub foreign_principal: String,
    pub exhibit_url: String,
}

/// Dates go out as midnight timestamps: `2014-07-03 00:00:00`.
mod stamp {
    use chrono::{NaiveDate, NaiveDateTime};
    use serde::{de, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";
    const MIDNIGHT: &str = "%Y-%m-%d 00:00:00";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(MIDNIGHT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT)
            .map(|stamp| stamp.date())
            .map_err(de::Error::custom)
    }
}
