use std::time::Duration;

use fara::config::Config;
use wiremock::matchers::{body_string_contains, header_exists, method, path};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

use super::fixtures::load_fixture;

pub const START_QUERY: &str = "p=171:130:0::NO:RP,130:P130_DATERANGE:N";
pub const SESSION_COOKIE: &str = "ORA_WWV_APP_171=ORA_WWV-test-session; path=/";

/// Matches requests whose raw query string contains the given text.
pub struct QueryContains(pub String);

impl Match for QueryContains {
    fn matches(&self, request: &Request) -> bool {
        request
            .url
            .query()
            .map_or(false, |query| query.contains(self.0.as_str()))
    }
}

/// Config pointing every site url at the mock server. Document links keep the live base.
pub fn mock_config(server: &MockServer, num_responses: usize) -> Config {
    let uri = server.uri();
    Config {
        start_url: format!("{uri}/pls/apex/f?{START_QUERY}"),
        form_url: format!("{uri}/pls/apex/wwv_flow.show"),
        registry_base: format!("{uri}/pls/apex/"),
        num_responses,
        workers: 2,
        timeout: Duration::from_secs(5),
        ..Config::default()
    }
}

/// Serves the start page, setting the session cookie.
pub async fn mount_start_page(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/pls/apex/f"))
        .and(QueryContains("171:130".into()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(load_fixture("start.html"))
                .insert_header("content-type", "text/html; charset=utf-8")
                .insert_header("set-cookie", SESSION_COOKIE),
        )
        .expect(1)
        .mount(server)
        .await;
}

/// Serves `html` for the worksheet form, only to clients carrying a cookie and
/// asking for `num_responses` rows.
pub async fn mount_worksheet(server: &MockServer, num_responses: usize, html: String) {
    Mock::given(method("POST"))
        .and(path("/pls/apex/wwv_flow.show"))
        .and(header_exists("cookie"))
        .and(body_string_contains("p_request=APXWGT"))
        .and(body_string_contains(format!(
            "p_widget_num_return={num_responses}"
        )))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .expect(1)
        .mount(server)
        .await;
}

/// Serves a registrant page for the registration number `reg_num`.
pub async fn mount_detail(server: &MockServer, reg_num: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/pls/apex/f"))
        .and(QueryContains(format!("COUNTRY:{reg_num},")))
        .respond_with(response)
        .mount(server)
        .await;
}

pub fn html_page(fixture: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(load_fixture(fixture))
        .insert_header("content-type", "text/html; charset=utf-8")
}
