//! Strategic summary panel.
//!
//! One independent fetch of the AI brief on mount; no filter
//! interaction and no retry. An `error` field embedded in an otherwise
//! valid response displays exactly like a transport failure.

use dioxus::prelude::*;

use crate::api;

#[component]
pub fn StrategicSummaryPanel() -> Element {
    let summary = use_resource(move || async move {
        let result = api().strategic_summary().await;
        if let Err(err) = &result {
            tracing::error!("Failed to fetch strategic summary: {err}");
        }
        result
    });

    match &*summary.read() {
        None => rsx! {
            div { class: "panel-status", "Generating AI strategic briefing..." }
        },
        Some(Err(_)) => rsx! {
            div { class: "panel-status error-text", "Could not load AI strategic summary." }
        },
        Some(Ok(summary)) => match summary.failure() {
            Some(message) => rsx! {
                div { class: "panel-status error-text", "{message}" }
            },
            None => rsx! {
                div { class: "summary-panel",
                    section {
                        h4 { "High-Level Analysis" }
                        p { class: "summary-analysis", "\"{summary.analysis}\"" }
                    }
                    div { class: "summary-grid",
                        section {
                            h4 { class: "summary-opportunity", "Strategic Opportunity" }
                            p { "{summary.opportunity}" }
                        }
                        section {
                            h4 { class: "summary-threat", "Strategic Threat" }
                            p { "{summary.threat}" }
                        }
                    }
                    section {
                        h4 { class: "summary-suggested", "Suggested Social Media Response" }
                        div { class: "suggested-post",
                            p { "{summary.suggested_post}" }
                        }
                    }
                }
            },
        },
    }
}
