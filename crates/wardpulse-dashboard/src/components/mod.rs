use dioxus::prelude::*;

use wardpulse_core::{AnalyticsRow, Facet, FilterSelection, ALL};

use crate::api;
use crate::theme::ThemeSwitcher;

pub mod map_view;
pub mod summary;

/// Header with title, refresh stamp, theme switcher, and logout.
#[component]
pub fn Header(last_updated: Option<String>, on_logout: EventHandler<()>) -> Element {
    rsx! {
        header { class: "header",
            div { class: "header-title",
                h1 { "WardPulse: Discourse Analytics" }
                if let Some(stamp) = last_updated {
                    span { class: "header-stamp", "Data as of {stamp}" }
                }
            }
            div { class: "header-actions",
                ThemeSwitcher {}
                button {
                    class: "logout-button",
                    onclick: move |_| on_logout.call(()),
                    "Log out"
                }
            }
        }
    }
}

/// Login form; invokes `on_success` once the backend accepts the
/// credentials. The optional notice explains a forced expiry.
#[component]
pub fn LoginPage(notice: Option<String>, on_success: EventHandler<()>) -> Element {
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut submitting = use_signal(|| false);
    let mut failure = use_signal(|| None::<String>);

    rsx! {
        div { class: "login-screen",
            div { class: "login-card",
                h1 { "WardPulse" }
                p { class: "login-subtitle", "Ward discourse analytics" }
                if let Some(message) = notice {
                    div { class: "login-notice", "{message}" }
                }
                if let Some(message) = failure() {
                    div { class: "login-notice error-text", "{message}" }
                }
                input {
                    r#type: "text",
                    placeholder: "Username",
                    value: "{username}",
                    oninput: move |event| username.set(event.value()),
                }
                input {
                    r#type: "password",
                    placeholder: "Password",
                    value: "{password}",
                    oninput: move |event| password.set(event.value()),
                }
                button {
                    class: "login-button",
                    disabled: submitting(),
                    onclick: move |_| {
                        if submitting() {
                            return;
                        }
                        submitting.set(true);
                        failure.set(None);
                        let user = username();
                        let pass = password();
                        spawn(async move {
                            match api().login(&user, &pass).await {
                                Ok(()) => on_success.call(()),
                                Err(err) => failure.set(Some(err.display_message())),
                            }
                            submitting.set(false);
                        });
                    },
                    if submitting() { "Signing in..." } else { "Sign in" }
                }
            }
        }
    }
}

/// Facet selects plus free-text search over the loaded rows.
#[component]
pub fn FilterBar(
    mut filters: Signal<FilterSelection>,
    emotions: Vec<String>,
    cities: Vec<String>,
    wards: Vec<String>,
) -> Element {
    let selection = filters();

    rsx! {
        div { class: "filter-bar",
            FacetSelect {
                label: "Emotion",
                value: selection.emotion.clone(),
                options: emotions,
                on_change: move |value| filters.write().set_facet(Facet::Emotion, value),
            }
            FacetSelect {
                label: "City",
                value: selection.city.clone(),
                options: cities,
                on_change: move |value| filters.write().set_facet(Facet::City, value),
            }
            FacetSelect {
                label: "Ward",
                value: selection.ward.clone(),
                options: wards,
                on_change: move |value| filters.write().set_facet(Facet::Ward, value),
            }
            input {
                class: "search-input",
                r#type: "search",
                placeholder: "Search post text...",
                value: "{selection.search_term}",
                oninput: move |event| filters.write().set_search_term(event.value()),
            }
        }
    }
}

/// One facet dropdown. The "All" sentinel always leads the options.
#[component]
fn FacetSelect(
    label: String,
    value: String,
    options: Vec<String>,
    on_change: EventHandler<String>,
) -> Element {
    let mut entries = vec![ALL.to_string()];
    entries.extend(options.into_iter().filter(|entry| entry != ALL));

    rsx! {
        label { class: "facet-select",
            span { class: "facet-label", "{label}" }
            select {
                value: "{value}",
                onchange: move |event| on_change.call(event.value()),
                for entry in entries {
                    option {
                        value: "{entry}",
                        selected: entry == value,
                        "{entry}"
                    }
                }
            }
        }
    }
}

/// Tabular view of the analytics rows.
#[component]
pub fn DataTable(rows: Vec<AnalyticsRow>) -> Element {
    let empty = rows.is_empty();
    let display_rows: Vec<_> = rows
        .into_iter()
        .map(|row| {
            let drivers = format_drivers(&row.drivers);
            (row.id, row.text, row.emotion, drivers, row.city, row.timestamp)
        })
        .collect();

    rsx! {
        div { class: "table-wrap",
            table { class: "data-table",
                thead {
                    tr {
                        th { "Text" }
                        th { "Emotion" }
                        th { "Drivers" }
                        th { "City" }
                        th { "Timestamp" }
                    }
                }
                tbody {
                    if empty {
                        tr {
                            td { class: "table-empty", colspan: "5",
                                "No posts match the current filters."
                            }
                        }
                    }
                    for (id, text, emotion, drivers, city, timestamp) in display_rows {
                        tr { key: "{id}",
                            td { class: "text-cell", "{text}" }
                            td { class: "emotion-cell", "{emotion}" }
                            td { class: "drivers-cell", "{drivers}" }
                            td { "{city}" }
                            td { "{timestamp}" }
                        }
                    }
                }
            }
        }
    }
}

/// Join driver phrases for table display.
fn format_drivers(drivers: &[String]) -> String {
    if drivers.is_empty() {
        "N/A".to_string()
    } else {
        drivers.join(", ")
    }
}

/// Distinct, sorted facet values present in the loaded rows.
pub(crate) fn facet_options<F>(rows: &[AnalyticsRow], facet: F) -> Vec<String>
where
    F: Fn(&AnalyticsRow) -> &str,
{
    let mut values: Vec<String> = rows
        .iter()
        .map(|row| facet(row).to_string())
        .filter(|value| !value.is_empty())
        .collect();
    values.sort();
    values.dedup();
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(emotion: &str, city: &str) -> AnalyticsRow {
        AnalyticsRow {
            emotion: emotion.to_string(),
            city: city.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_facet_options_dedup_and_sort() {
        let rows = [
            row("Anger", "Hyderabad"),
            row("Joy", "Hyderabad"),
            row("Anger", "Secunderabad"),
        ];
        assert_eq!(facet_options(&rows, |r| r.emotion.as_str()), ["Anger", "Joy"]);
        assert_eq!(
            facet_options(&rows, |r| r.city.as_str()),
            ["Hyderabad", "Secunderabad"]
        );
    }

    #[test]
    fn test_facet_options_skip_empty_values() {
        let rows = [row("", "Hyderabad"), row("Hope", "")];
        assert_eq!(facet_options(&rows, |r| r.emotion.as_str()), ["Hope"]);
        assert_eq!(facet_options(&rows, |r| r.city.as_str()), ["Hyderabad"]);
    }

    #[test]
    fn test_format_drivers() {
        assert_eq!(format_drivers(&[]), "N/A");
        assert_eq!(
            format_drivers(&["potholes".to_string(), "traffic".to_string()]),
            "potholes, traffic"
        );
    }
}
