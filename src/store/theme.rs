use serde::{Deserialize, Serialize};

use super::{Reducer, Store};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeAction {
    Toggle,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl Reducer for Theme {
    type Action = ThemeAction;

    fn reduce(self, action: ThemeAction) -> Self {
        match action {
            ThemeAction::Toggle => self.toggled(),
        }
    }
}

impl Store<Theme> {
    pub fn toggle_theme(&mut self) {
        self.dispatch(ThemeAction::Toggle);
    }

    pub fn theme(&self) -> Theme {
        *self.state()
    }
}
