use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{ChartError, ChartResult};
use crate::model::Theme;

use super::{base_option, merge_value};

/// Key of the theme-dependent text color in template overrides.
pub const COLOR_KEY: &str = "color";

/// Text color resolved per theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeColorPair {
    pub light: String,
    pub dark: String,
}

impl ThemeColorPair {
    #[must_use]
    pub fn uniform(color: impl Into<String>) -> Self {
        let color = color.into();
        Self {
            light: color.clone(),
            dark: color,
        }
    }

    #[must_use]
    pub fn resolve(&self, theme: Theme) -> &str {
        match theme {
            Theme::Light => &self.light,
            Theme::Dark => &self.dark,
        }
    }
}

/// Deep-cloned template handed to one option build.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseTemplate {
    pub option: Value,
    pub theme_color: Option<ThemeColorPair>,
}

impl Default for BaseTemplate {
    fn default() -> Self {
        Self {
            option: base_option(),
            theme_color: None,
        }
    }
}

/// Holds the merged base template shared by every chart of a chart set.
///
/// Builders never see the registry's own tree: [`TemplateRegistry::snapshot`]
/// always returns a deep clone.
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    theme_toggle: bool,
    template: BaseTemplate,
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::new(false)
    }
}

impl TemplateRegistry {
    /// `theme_toggle` mirrors whether the host offers a light/dark switch;
    /// when it does, color overrides must provide both variants.
    #[must_use]
    pub fn new(theme_toggle: bool) -> Self {
        Self {
            theme_toggle,
            template: BaseTemplate::default(),
        }
    }

    #[must_use]
    pub fn theme_toggle(&self) -> bool {
        self.theme_toggle
    }

    /// Deep-merges `overrides` into the built-in template and replaces the
    /// cached one. On error the previous template stays in place.
    pub fn set_base_template(&mut self, overrides: &Value) -> ChartResult<()> {
        let Some(override_map) = overrides.as_object() else {
            return Err(ChartError::Validation(
                "template overrides must be a JSON object".to_owned(),
            ));
        };

        let theme_color = match override_map.get(COLOR_KEY) {
            Some(color) => Some(self.parse_color(color)?),
            None => None,
        };

        let mut option = base_option();
        let mut tree_overrides = override_map.clone();
        tree_overrides.remove(COLOR_KEY);
        merge_value(&mut option, &Value::Object(tree_overrides));

        debug!(
            keys = override_map.len(),
            has_theme_color = theme_color.is_some(),
            "base template replaced"
        );
        self.template = BaseTemplate {
            option,
            theme_color,
        };
        Ok(())
    }

    /// Restores the built-in template.
    pub fn reset(&mut self) {
        self.template = BaseTemplate::default();
    }

    #[must_use]
    pub fn snapshot(&self) -> BaseTemplate {
        self.template.clone()
    }

    #[must_use]
    pub fn theme_color(&self) -> Option<&ThemeColorPair> {
        self.template.theme_color.as_ref()
    }

    fn parse_color(&self, color: &Value) -> ChartResult<ThemeColorPair> {
        match color {
            Value::Array(items) if self.theme_toggle => match items.as_slice() {
                [Value::String(light), Value::String(dark)] => Ok(ThemeColorPair {
                    light: light.clone(),
                    dark: dark.clone(),
                }),
                _ => Err(ChartError::Validation(
                    "color must be a [light, dark] pair of strings when the theme toggle is enabled"
                        .to_owned(),
                )),
            },
            _ if self.theme_toggle => Err(ChartError::Validation(
                "a single color cannot be used when the theme toggle is enabled; pass [light, dark]"
                    .to_owned(),
            )),
            Value::String(single) => Ok(ThemeColorPair::uniform(single.clone())),
            Value::Array(items) => match items.first() {
                Some(Value::String(first)) => Ok(ThemeColorPair::uniform(first.clone())),
                _ => Err(ChartError::Validation(
                    "color override must contain a color string".to_owned(),
                )),
            },
            other => Err(ChartError::Validation(format!(
                "unsupported color override: {other}"
            ))),
        }
    }
}
