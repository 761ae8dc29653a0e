//! Shared test helpers: a scripted translation backend and feed fixtures.

use crate::config::Config;
use crate::error::TranslationError;
use crate::translator::TranslationBackend;
use async_trait::async_trait;
use std::sync::Mutex;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Backend answering `KO(<text>)`, failing for any text containing `fail_on`
#[derive(Default)]
pub(crate) struct StubBackend {
    fail_on: Option<String>,
    calls: Mutex<Vec<String>>,
}

impl StubBackend {
    pub(crate) fn failing_on(marker: &str) -> Self {
        Self {
            fail_on: Some(marker.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TranslationBackend for StubBackend {
    async fn translate(
        &self,
        text: &str,
        _source: &str,
        _target: &str,
    ) -> Result<String, TranslationError> {
        self.calls.lock().unwrap().push(text.to_string());
        if let Some(marker) = &self.fail_on
            && text.contains(marker.as_str())
        {
            return Err(TranslationError::Request("quota exceeded".into()));
        }
        Ok(format!("KO({})", text))
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

/// RSS document with `count` fully populated items numbered from 1
pub(crate) fn rss_feed(count: usize) -> String {
    let items: String = (1..=count)
        .map(|n| {
            format!(
                r#"<item>
    <title>Story {n}</title>
    <link>https://techcrunch.com/story-{n}/</link>
    <pubDate>Mon, 0{d} Jan 2024 09:00:00 +0000</pubDate>
    <description><![CDATA[<p>Body of <b>story {n}</b></p>]]></description>
</item>
"#,
                d = (n % 9) + 1
            )
        })
        .collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
<channel>
<title>TechCrunch</title>
<link>https://techcrunch.com</link>
<description>Startup and Technology News</description>
{items}</channel>
</rss>"#
    )
}

/// Serve `body` at `/feed/` on `server`
pub(crate) async fn mount_feed(server: &MockServer, body: String) {
    Mock::given(method("GET"))
        .and(path("/feed/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/rss+xml; charset=utf-8")
                .set_body_string(body),
        )
        .mount(server)
        .await;
}

/// Default configuration pointing at the mock server's feed
pub(crate) fn config_for(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.feed.url = format!("{}/feed/", server.uri());
    config
}
