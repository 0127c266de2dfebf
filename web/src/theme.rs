use crate::utils::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub const ATTR_NAME: &'static str = "data-theme";

    pub(crate) const fn scheme(self) -> &'static str {
        use Theme::*;
        match self {
            Light => "light",
            Dark => "dark",
        }
    }

    /// Preference cycle used by the header toggle: system, light, dark.
    pub(crate) const fn next(theme: Option<Self>) -> Option<Self> {
        use Theme::*;
        match theme {
            None => Some(Light),
            Some(Light) => Some(Dark),
            Some(Dark) => None,
        }
    }

    fn update_html(theme: Option<Self>) {
        use gloo::utils::document;
        let Some(html) = document().document_element() else {
            log::error!("no root element to apply theme to");
            return;
        };
        if let Some(theme) = theme {
            let scheme = theme.scheme();
            log::debug!("theme-scheme: {}", scheme);
            if let Err(err) = html.set_attribute(Self::ATTR_NAME, scheme) {
                log::error!("failed to set theme: {:?}", err);
            }
        } else {
            log::debug!("no theme preference");
            if let Err(err) = html.remove_attribute(Self::ATTR_NAME) {
                log::error!("failed to set theme: {:?}", err);
            }
        }
    }

    pub(crate) fn current() -> Option<Self> {
        LocalOrDefault::local_or_default()
    }

    pub(crate) fn init() {
        Self::update_html(Self::current());
    }

    pub(crate) fn apply(theme: Option<Self>) {
        theme.local_save();
        Self::update_html(theme);
    }
}

impl StorageKey for Theme {
    const KEY: &'static str = "squaregame:theme";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_cycles_through_system_preference() {
        assert_eq!(Theme::next(None), Some(Theme::Light));
        assert_eq!(Theme::next(Some(Theme::Light)), Some(Theme::Dark));
        assert_eq!(Theme::next(Some(Theme::Dark)), None);
    }

    #[test]
    fn storage_key_is_namespaced() {
        assert_eq!(<Theme as StorageKey>::KEY, "squaregame:theme");
    }
}
