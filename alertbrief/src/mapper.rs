use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::alert::Alert;

/// One `vulnerabilityAlerts` node as returned by the GitHub GraphQL API.
///
/// Every field is optional so that a missing or null nested object maps to
/// empty values instead of failing the whole page.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAlert {
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub number: Option<u64>,
    #[serde(default)]
    pub dependabot_update: Option<RawDependabotUpdate>,
    #[serde(default)]
    pub security_advisory: Option<RawAdvisory>,
    #[serde(default)]
    pub security_vulnerability: Option<RawVulnerability>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawDependabotUpdate {
    #[serde(default)]
    pub error: Option<RawUpdateError>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawUpdateError {
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub error_type: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawAdvisory {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub permalink: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawVulnerability {
    #[serde(default)]
    pub vulnerable_version_range: Option<String>,
    #[serde(default)]
    pub package: Option<RawPackage>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawPackage {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub ecosystem: Option<String>,
}

/// Web link to an alert on the repository's security tab.
pub fn alert_link(repository_url: &str, number: u64) -> String {
    format!("{repository_url}/security/dependabot/{number}")
}

pub fn map_alert(raw: RawAlert, repository_url: &str) -> Alert {
    let number = raw.number.unwrap_or_default();
    let error = raw
        .dependabot_update
        .and_then(|update| update.error)
        .unwrap_or_default();
    let advisory = raw.security_advisory.unwrap_or_default();
    let vulnerability = raw.security_vulnerability.unwrap_or_default();
    let package = vulnerability.package.unwrap_or_default();

    let alert = Alert {
        created_at: raw.created_at,
        number,
        update_error_body: error.body.unwrap_or_default(),
        update_error_title: error.title.unwrap_or_default(),
        update_error_type: error.error_type.unwrap_or_default(),
        title: advisory.summary.unwrap_or_default(),
        advisory_link: advisory.permalink.unwrap_or_default(),
        description: advisory.description.unwrap_or_default(),
        package: package.name.unwrap_or_default(),
        ecosystem: package.ecosystem.unwrap_or_default(),
        affected_versions: vulnerability.vulnerable_version_range.unwrap_or_default(),
        alert_link: alert_link(repository_url, number),
    };

    debug!(
        number = alert.number,
        package = %alert.package,
        has_update_error = !alert.update_error_body.is_empty(),
        "mapped alert"
    );
    alert
}
