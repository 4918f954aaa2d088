// File: crates/pie-core/src/theme.rs
// Summary: Theme tags (own presentation settings layered over values inherited from a parent) and their resolution.

use serde::{Deserialize, Serialize};

use crate::types::{Dimension, HEIGHT, WIDTH};

pub const DARK_SHADOW: &str = "0 -2px 10px rgba(0, 0, 0, 1)";
pub const LIGHT_SHADOW: &str = "rgba(0, 0, 0, 0.16) 0px 1px 4px";

/// Presentation settings the user edits directly. Every field is optional so
/// a partial update only touches what it names.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dark_shadow: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_font_color: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_background_color: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<Dimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<Dimension>,
}

impl ThemeSettings {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Theme values pushed down by the enclosing container.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentTheme {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_font_color: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_background_color: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_widgets_color: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widgets_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_widgets_background: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widgets_background: Option<String>,
}

/// Parent values as stored in the tag bag (`parent*` prefixed where the name
/// would otherwise clash with an own setting).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InheritedTheme {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_font_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_custom_font_color: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_custom_background_color: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_widgets_color: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widgets_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_widgets_background: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widgets_background: Option<String>,
}

impl From<&ParentTheme> for InheritedTheme {
    fn from(p: &ParentTheme) -> Self {
        Self {
            parent_font_color: p.font_color.clone(),
            parent_custom_font_color: p.custom_font_color,
            parent_background_color: p.background_color.clone(),
            parent_custom_background_color: p.custom_background_color,
            custom_widgets_color: p.custom_widgets_color,
            widgets_color: p.widgets_color.clone(),
            custom_widgets_background: p.custom_widgets_background,
            widgets_background: p.widgets_background.clone(),
        }
    }
}

/// The widget's tag bag.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemeTags {
    #[serde(flatten)]
    pub own: ThemeSettings,
    #[serde(flatten)]
    pub inherited: InheritedTheme,
}

/// Concrete presentation values after precedence is applied.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedTheme {
    /// `None` leaves the host default in place.
    pub text_color: Option<String>,
    pub background_color: Option<String>,
    pub box_shadow: &'static str,
    pub width: Dimension,
    pub height: Dimension,
}

impl ThemeTags {
    /// Tags every new widget starts with.
    pub fn initial() -> Self {
        Self {
            own: ThemeSettings {
                dark_shadow: Some(false),
                height: Some(Dimension::Px(HEIGHT)),
                ..ThemeSettings::default()
            },
            inherited: InheritedTheme::default(),
        }
    }

    /// Overwrite every own setting present in `update`.
    pub fn merge(&mut self, update: &ThemeSettings) {
        let own = &mut self.own;
        if update.dark_shadow.is_some() {
            own.dark_shadow = update.dark_shadow;
        }
        if update.custom_font_color.is_some() {
            own.custom_font_color = update.custom_font_color;
        }
        if update.font_color.is_some() {
            own.font_color = update.font_color.clone();
        }
        if update.custom_background_color.is_some() {
            own.custom_background_color = update.custom_background_color;
        }
        if update.background_color.is_some() {
            own.background_color = update.background_color.clone();
        }
        if update.width.is_some() {
            own.width = update.width;
        }
        if update.height.is_some() {
            own.height = update.height;
        }
    }

    /// Replace every inherited value with the parent's current ones.
    pub fn inherit(&mut self, parent: &ParentTheme) {
        self.inherited = InheritedTheme::from(parent);
    }

    /// Own custom colour, then the container's widget colour, then the
    /// parent's custom colour.
    pub fn resolve(&self) -> ResolvedTheme {
        let own = &self.own;
        let inh = &self.inherited;
        let text_color = pick(&[
            (own.custom_font_color, &own.font_color),
            (inh.custom_widgets_color, &inh.widgets_color),
            (inh.parent_custom_font_color, &inh.parent_font_color),
        ]);
        let background_color = pick(&[
            (own.custom_background_color, &own.background_color),
            (inh.custom_widgets_background, &inh.widgets_background),
            (inh.parent_custom_background_color, &inh.parent_background_color),
        ]);
        ResolvedTheme {
            text_color,
            background_color,
            box_shadow: if own.dark_shadow.unwrap_or(false) { DARK_SHADOW } else { LIGHT_SHADOW },
            width: own.width.unwrap_or(Dimension::Px(WIDTH)),
            height: own.height.unwrap_or(Dimension::Px(HEIGHT)),
        }
    }
}

/// First enabled layer decides, even when its colour is unset.
fn pick(layers: &[(Option<bool>, &Option<String>)]) -> Option<String> {
    layers
        .iter()
        .find(|(enabled, _)| enabled.unwrap_or(false))
        .and_then(|(_, color)| (*color).clone())
        .filter(|c| !c.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn initial_tags_use_light_shadow_and_default_size() {
        let theme = ThemeTags::initial().resolve();
        assert_eq!(theme.box_shadow, LIGHT_SHADOW);
        assert_eq!(theme.width, Dimension::Px(700.0));
        assert_eq!(theme.height, Dimension::Px(500.0));
        assert_eq!(theme.text_color, None);
    }

    #[test]
    fn own_colour_beats_inherited() {
        let mut tags = ThemeTags::initial();
        tags.inherit(&ParentTheme {
            custom_widgets_color: Some(true),
            widgets_color: Some("#111".into()),
            custom_font_color: Some(true),
            font_color: Some("#222".into()),
            ..ParentTheme::default()
        });
        assert_eq!(tags.resolve().text_color.as_deref(), Some("#111"));

        tags.merge(&ThemeSettings { custom_font_color: Some(true), font_color: Some("#fff".into()), ..Default::default() });
        assert_eq!(tags.resolve().text_color.as_deref(), Some("#fff"));
    }

    #[test]
    fn parent_colour_is_the_last_resort() {
        let mut tags = ThemeTags::default();
        tags.inherit(&ParentTheme {
            custom_background_color: Some(true),
            background_color: Some("#000".into()),
            ..ParentTheme::default()
        });
        assert_eq!(tags.resolve().background_color.as_deref(), Some("#000"));
        // a custom flag without its colour falls through
        tags.merge(&ThemeSettings { background_color: Some("#abc".into()), ..Default::default() });
        assert_eq!(tags.resolve().background_color.as_deref(), Some("#000"));
    }

    #[test]
    fn merge_keeps_unnamed_settings() {
        let mut tags = ThemeTags::initial();
        tags.merge(&ThemeSettings { dark_shadow: Some(true), ..Default::default() });
        assert_eq!(tags.own.height, Some(Dimension::Px(500.0)));
        assert_eq!(tags.resolve().box_shadow, DARK_SHADOW);
    }

    #[test]
    fn tag_bag_serializes_flat() {
        let mut tags = ThemeTags::initial();
        tags.inherit(&ParentTheme { widgets_color: Some("#123".into()), ..ParentTheme::default() });
        let v = serde_json::to_value(&tags).unwrap();
        assert_eq!(v, json!({ "darkShadow": false, "height": 500.0, "widgetsColor": "#123" }));
        let back: ThemeTags = serde_json::from_value(v).unwrap();
        assert_eq!(back, tags);
    }
}
