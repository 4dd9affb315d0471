use std::path::PathBuf;

use serde_json::{json, Value};

pub fn fixture_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(relative)
}

pub fn load_fixture(relative: &str) -> String {
    std::fs::read_to_string(fixture_path(relative))
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", relative))
}

/// The two registrations served by `worksheet.html`, as written to the feed
/// when links resolve against the live site.
pub fn expected_records() -> Vec<Value> {
    vec![
        json!({
            "address": "8105 Ainsworth Avenue\r\nSpringfield\u{a0}\u{a0}22152",
            "country": "AFGHANISTAN",
            "date": "2014-07-03 00:00:00",
            "exhibit_urls": [{
                "date": "2014-07-03 00:00:00",
                "exhibit_url": "http://www.fara.gov/docs/6065-Exhibit-AB-20140703-5.pdf",
                "foreign_principal": "Transformatin and Continuity"
            }],
            "foreign_principal": "Transformation and Continuity",
            "reg_num": "6065",
            "registrant": "Roberti + White, LLC",
            "state": "VA",
            "url": "https://efile.fara.gov/pls/apex/f?p=171:200:0::NO:RP,200:P200_REG_NUMBER,P200_DOC_TYPE,P200_COUNTRY:6065,Exhibit%20AB,AFGHANISTAN"
        }),
        json!({
            "address": "House #3 MRRD Road\r\nDarul Aman\r\nKabul",
            "country": "AFGHANISTAN",
            "date": "2014-05-05 00:00:00",
            "exhibit_urls": [{
                "date": "2014-05-05 00:00:00",
                "exhibit_url": "http://www.fara.gov/docs/5945-Exhibit-AB-20140505-10.pdf",
                "foreign_principal": "Transformation and Continuity, Ajmal Ghani"
            }],
            "foreign_principal": "Transformation and Continuity, Ajmal Ghani",
            "reg_num": "5945",
            "registrant": "Fenton Communications",
            "state": null,
            "url": "https://efile.fara.gov/pls/apex/f?p=171:200:0::NO:RP,200:P200_REG_NUMBER,P200_DOC_TYPE,P200_COUNTRY:5945,Exhibit%20AB,AFGHANISTAN"
        }),
    ]
}

pub const RECORD_KEYS: [&str; 9] = [
    "url",
    "country",
    "state",
    "reg_num",
    "address",
    "foreign_principal",
    "date",
    "registrant",
    "exhibit_urls",
];
