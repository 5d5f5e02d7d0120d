//! Root application component.
//!
//! Owns the session gate and the orchestrated fetch cycle: the gate
//! resolves first, data cycles only run while it reports Authenticated,
//! and a newer cycle always supersedes an in-flight one.

use dioxus::prelude::*;

use wardpulse_core::{
    normalize, CycleOutcome, CycleTracker, DashboardData, FetchError, FilterSelection,
    SessionGate, SessionStatus,
};

use crate::api;
use crate::components::map_view::MapView;
use crate::components::summary::StrategicSummaryPanel;
use crate::components::{facet_options, DataTable, FilterBar, Header, LoginPage};
use crate::theme::ThemedRoot;

#[component]
pub fn App() -> Element {
    let mut gate = use_signal(SessionGate::new);
    let filters = use_signal(FilterSelection::default);
    let mut data = use_signal(DashboardData::new);
    let mut cycles = use_signal(CycleTracker::new);

    // One-shot status check at mount; fail-closed on any transport
    // error. Not retried.
    use_future(move || async move {
        gate.write().begin_check();
        match api().status().await {
            Ok(logged_in) => gate.write().resolve_check(logged_in),
            Err(err) => {
                tracing::warn!("Status check failed: {err}");
                gate.write().fail_check();
            }
        }
    });

    // Orchestrated fetch cycle: re-runs whenever the session status or
    // the filter selection changes, and fetches only while
    // authenticated.
    use_effect(move || {
        let status = gate.read().status();
        let selection = filters();

        match status {
            SessionStatus::Authenticated => {}
            SessionStatus::Unauthenticated => {
                // No stale data survives a logout.
                data.write().clear();
                return;
            }
            SessionStatus::Unknown | SessionStatus::Checking => return,
        }

        let cycle = cycles.write().begin();
        data.write().begin_cycle();
        // The ward catalogue is fetched once per session; analytics go
        // out every cycle with the snapshotted selection.
        let fetch_wards = !data.peek().wards().is_populated();

        spawn(async move {
            let client = api();

            let outcome = async {
                let wards = if fetch_wards {
                    normalize::ward_names(&client.wards().await?)
                } else {
                    None
                };
                let rows = client.analytics(&selection).await?;
                Ok::<_, FetchError>(CycleOutcome::Loaded { rows, wards })
            }
            .await
            .unwrap_or_else(CycleOutcome::Failed);

            if let CycleOutcome::Failed(err) = &outcome {
                tracing::error!("Data fetch cycle failed: {err}");
            }
            let expired =
                matches!(&outcome, CycleOutcome::Failed(err) if err.is_session_expired());

            let applied = {
                let tracker = cycles.peek();
                data.write().publish(&tracker, cycle, outcome)
            };
            if applied && expired {
                gate.write().mark_unauthenticated();
            }
        });
    });

    let status = gate.read().status();
    let resolving = gate.read().is_resolving();
    let (rows, ward_options, error, loading, has_loaded, last_updated) = {
        let snapshot = data.read();
        (
            snapshot.rows().to_vec(),
            snapshot.wards().names().to_vec(),
            snapshot.error().map(str::to_string),
            snapshot.is_loading(),
            snapshot.has_loaded(),
            snapshot
                .last_updated()
                .map(|stamp| stamp.format("%H:%M:%S").to_string()),
        )
    };
    let emotion_options = facet_options(&rows, |row| row.emotion.as_str());
    let city_options = facet_options(&rows, |row| row.city.as_str());

    rsx! {
        ThemedRoot {
            if resolving {
                div { class: "auth-screen", "Authenticating..." }
            } else if status != SessionStatus::Authenticated {
                LoginPage {
                    notice: error.clone(),
                    on_success: move |_| {
                        data.write().clear_error();
                        gate.write().mark_authenticated();
                    },
                }
            } else {
                div { class: "dashboard",
                    Header {
                        last_updated,
                        on_logout: move |_| {
                            spawn(async move {
                                if let Err(err) = api().logout().await {
                                    tracing::warn!("Logout request failed: {err}");
                                }
                                gate.write().mark_unauthenticated();
                            });
                        },
                    }
                    main { class: "dashboard-main",
                        if loading && !has_loaded {
                            div { class: "loading-screen", "Loading dashboard data..." }
                        } else {
                            if loading {
                                div { class: "updating-banner", "Updating data..." }
                            }
                            if let Some(message) = error {
                                div { class: "error-banner", "{message}" }
                            }
                            FilterBar {
                                filters,
                                emotions: emotion_options,
                                cities: city_options,
                                wards: ward_options,
                            }
                            div { class: "panel-grid",
                                section { class: "panel",
                                    h2 { "Ward Sentiment Map" }
                                    MapView {}
                                }
                                section { class: "panel",
                                    h2 { "AI Strategic Briefing" }
                                    StrategicSummaryPanel {}
                                }
                            }
                            section { class: "panel",
                                h2 { "Discourse Feed" }
                                DataTable { rows }
                            }
                        }
                    }
                }
            }
        }
    }
}
