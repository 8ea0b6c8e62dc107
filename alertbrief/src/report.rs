use askama::Template;
use tracing::{debug, instrument};

use crate::alert::{Alert, Draft};
use crate::error::Result;
use crate::render::render;

#[derive(Template)]
#[template(
    source = "[{{ alert.ecosystem }}] Security Alert: {{ alert.package }} {{ alert.affected_versions }}",
    ext = "txt"
)]
struct DraftTitle<'a> {
    alert: &'a Alert,
}

#[derive(Template)]
#[template(
    source = "
Original Alert: [#{{ alert.number }} {{ alert.title }}]({{ alert.alert_link }})

## Description
{{ alert.description }}

## Dependabot error
⚠️**{{ alert.update_error_title }}**

{{ alert.update_error_body }}
",
    ext = "md"
)]
struct DraftBody<'a> {
    alert: &'a Alert,
}

/// Only alerts whose automated update failed are reported.
pub fn needs_report(alert: &Alert) -> bool {
    !alert.update_error_body.is_empty()
}

/// Render the title and markdown body for one alert.
pub fn format_alert(alert: &Alert) -> Result<Draft<'_>> {
    let title = render("draft title", &DraftTitle { alert })?;
    let body = render("draft body", &DraftBody { alert })?;
    Ok(Draft { alert, title, body })
}

/// Format every alert that [`needs_report`], keeping the input order.
#[instrument(skip(alerts), fields(alerts = alerts.len()))]
pub fn draft_failures(alerts: &[Alert]) -> Result<Vec<Draft<'_>>> {
    let drafts = alerts
        .iter()
        .filter(|alert| needs_report(alert))
        .map(format_alert)
        .collect::<Result<Vec<_>>>()?;
    debug!(drafts = drafts.len(), skipped = alerts.len() - drafts.len(), "drafted failed updates");
    Ok(drafts)
}

pub fn concat_bodies(drafts: &[Draft<'_>]) -> String {
    drafts.iter().fold(String::new(), |mut content, draft| {
        content.push_str(&draft.body);
        content.push('\n');
        content
    })
}
