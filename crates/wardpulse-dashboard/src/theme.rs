// Theme system for Dioxus Desktop
//
// Uses a wrapper div with a data-theme attribute instead of web_sys
// since this is a desktop application.

use dioxus::prelude::*;

/// Available themes
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// CSS data-theme attribute value
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            Theme::Dark => "Dark",
            Theme::Light => "Light",
        }
    }

    /// All available themes
    pub fn all() -> &'static [Theme] {
        &[Theme::Dark, Theme::Light]
    }
}

/// Global theme signal
pub static CURRENT_THEME: GlobalSignal<Theme> = Signal::global(Theme::default);

/// Theme switcher component - renders a dropdown for theme selection
#[component]
pub fn ThemeSwitcher() -> Element {
    let current_theme = *CURRENT_THEME.read();

    rsx! {
        div { class: "theme-switcher",
            label { class: "theme-label", "Theme" }
            select {
                class: "theme-select",
                value: current_theme.as_str(),
                onchange: move |event| {
                    let new_theme = match event.value().as_str() {
                        "light" => Theme::Light,
                        _ => Theme::Dark,
                    };
                    *CURRENT_THEME.write() = new_theme;
                },
                for theme in Theme::all() {
                    option {
                        value: theme.as_str(),
                        selected: *theme == current_theme,
                        "{theme.display_name()}"
                    }
                }
            }
        }
    }
}

/// Themed wrapper component - wraps children with a data-theme attribute
#[component]
pub fn ThemedRoot(children: Element) -> Element {
    let theme = *CURRENT_THEME.read();

    rsx! {
        div {
            "data-theme": theme.as_str(),
            style: "min-height: 100vh; width: 100%;",
            {children}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_attribute_values() {
        assert_eq!(Theme::Dark.as_str(), "dark");
        assert_eq!(Theme::Light.as_str(), "light");
    }

    #[test]
    fn test_all_themes_listed() {
        assert_eq!(Theme::all().len(), 2);
    }
}
