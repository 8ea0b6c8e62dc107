pub mod alert;
pub mod error;
pub mod fetch;
pub mod github;
pub mod mapper;
pub mod preview;
pub mod render;
pub mod report;

pub use alert::{Alert, Draft};
pub use error::{Error, Result};
pub use fetch::{AlertPage, AlertSource, GitHubAlertSource, PageInfo, PageRequest};
pub use github::GitHubClient;

use tracing::{info, instrument, warn};

#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub owner: String,
    pub repo: String,
    pub page: PageRequest,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            owner: "cumet04".to_string(),
            repo: "dependabot-issues".to_string(),
            page: PageRequest::first(10),
        }
    }
}

/// Concatenated markdown for every alert whose automated update failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub content: String,
    pub fetched: usize,
    pub drafted: usize,
    pub page_info: PageInfo,
}

pub struct Reporter {
    source: Box<dyn AlertSource>,
    options: ReportOptions,
}

impl Reporter {
    pub fn new(source: impl AlertSource + 'static, options: ReportOptions) -> Self {
        Self {
            source: Box::new(source),
            options,
        }
    }

    /// Fetch one page of open alerts and format the failed updates.
    ///
    /// Exactly one page is requested. When GitHub reports more alerts the
    /// remainder is left out and a warning is logged.
    #[instrument(skip(self), fields(owner = %self.options.owner, repo = %self.options.repo, source = self.source.name()))]
    pub async fn build(&self) -> Result<Report> {
        let page = self
            .source
            .fetch(&self.options.owner, &self.options.repo, &self.options.page)
            .await?;

        if page.page_info.has_next_page {
            warn!(
                fetched = page.alerts.len(),
                end_cursor = ?page.page_info.end_cursor,
                "more open alerts exist beyond this page and are not included"
            );
        }

        let drafts = report::draft_failures(&page.alerts)?;
        let content = report::concat_bodies(&drafts);
        info!(fetched = page.alerts.len(), drafted = drafts.len(), "built report");

        Ok(Report {
            content,
            fetched: page.alerts.len(),
            drafted: drafts.len(),
            page_info: page.page_info.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    struct FakeSource {
        page: AlertPage,
        calls: Arc<Mutex<Vec<(String, String, PageRequest)>>>,
    }

    #[async_trait]
    impl AlertSource for FakeSource {
        async fn fetch(&self, owner: &str, repo: &str, page: &PageRequest) -> Result<AlertPage> {
            self.calls
                .lock()
                .unwrap()
                .push((owner.to_string(), repo.to_string(), page.clone()));
            Ok(self.page.clone())
        }

        fn name(&self) -> &str {
            "fake"
        }
    }

    struct FailingSource;

    #[async_trait]
    impl AlertSource for FailingSource {
        async fn fetch(&self, _owner: &str, _repo: &str, _page: &PageRequest) -> Result<AlertPage> {
            Err(Error::GraphQl("[{\"message\":\"Bad credentials\"}]".to_string()))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    fn alert(number: u64, update_error_body: &str) -> Alert {
        Alert {
            number,
            update_error_body: update_error_body.to_string(),
            description: format!("description of alert {number}"),
            title: format!("advisory {number}"),
            alert_link: mapper::alert_link("https://github.com/o/r", number),
            ..Alert::default()
        }
    }

    fn reporter_with(alerts: Vec<Alert>, has_next_page: bool) -> (Reporter, Arc<Mutex<Vec<(String, String, PageRequest)>>>) {
        let calls = Arc::new(Mutex::new(vec![]));
        let source = FakeSource {
            page: AlertPage {
                repository_url: "https://github.com/o/r".to_string(),
                alerts,
                page_info: PageInfo {
                    has_next_page,
                    end_cursor: has_next_page.then(|| "next".to_string()),
                },
            },
            calls: calls.clone(),
        };
        (Reporter::new(source, ReportOptions::default()), calls)
    }

    #[test]
    fn report_options_default_targets_canonical_repository() {
        let opts = ReportOptions::default();
        assert_eq!(opts.owner, "cumet04");
        assert_eq!(opts.repo, "dependabot-issues");
        assert_eq!(opts.page, PageRequest::first(10));
    }

    #[tokio::test]
    async fn build_reports_only_failed_updates() {
        let (reporter, _) = reporter_with(vec![alert(1, ""), alert(2, "module not found")], false);
        let report = reporter.build().await.unwrap();

        assert_eq!(report.fetched, 2);
        assert_eq!(report.drafted, 1);
        assert_eq!(report.content.matches("Original Alert:").count(), 1);
        assert!(report.content.contains("[#2 advisory 2](https://github.com/o/r/security/dependabot/2)"));
        assert!(report.content.contains("description of alert 2"));
        assert!(report.content.contains("module not found"));
        assert!(!report.content.contains("description of alert 1"));
    }

    #[tokio::test]
    async fn build_with_no_alerts_is_empty() {
        let (reporter, _) = reporter_with(vec![], false);
        let report = reporter.build().await.unwrap();
        assert_eq!(report.content, "");
        assert_eq!(report.fetched, 0);
        assert_eq!(report.drafted, 0);
    }

    #[tokio::test]
    async fn build_requests_exactly_one_page() {
        let (reporter, calls) = reporter_with(vec![alert(1, "x")], true);
        let report = reporter.build().await.unwrap();

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "cumet04");
        assert_eq!(calls[0].1, "dependabot-issues");
        assert_eq!(calls[0].2, PageRequest::first(10));
        assert!(report.page_info.has_next_page);
        assert_eq!(report.page_info.end_cursor.as_deref(), Some("next"));
    }

    #[tokio::test]
    async fn build_keeps_fetch_order() {
        let (reporter, _) = reporter_with(vec![alert(7, "b"), alert(3, "a")], false);
        let content = reporter.build().await.unwrap().content;
        let seven = content.find("[#7 ").unwrap();
        let three = content.find("[#3 ").unwrap();
        assert!(seven < three);
    }

    #[tokio::test]
    async fn build_propagates_fetch_errors() {
        let reporter = Reporter::new(FailingSource, ReportOptions::default());
        let err = reporter.build().await.unwrap_err();
        assert!(err.to_string().contains("Bad credentials"));
    }
}
