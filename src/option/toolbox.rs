use serde_json::{Map, Value, json};
use tracing::warn;

use crate::model::{EnlargeShrink, Language};
use crate::template::{
    ENLARGE_ICON, FEATURE_DATA_ZOOM, FEATURE_DELETE, FEATURE_ENLARGE_SHRINK, FEATURE_RESTORE,
    FEATURE_SAVE_AS_IMAGE, SHRINK_ICON,
};

/// Mutable access to one toolbox feature of an option tree.
///
/// A missing toolbox or feature is reported as a warning and yields `None`;
/// customization hooks are optional and never fail the build.
pub(super) fn feature_mut<'a>(option: &'a mut Value, feature: &str) -> Option<&'a mut Map<String, Value>> {
    let Some(features) = option
        .get_mut("toolbox")
        .and_then(|toolbox| toolbox.get_mut("feature"))
        .and_then(Value::as_object_mut)
    else {
        warn!(feature, "toolbox is not defined in the chart option; skipping customization");
        return None;
    };
    let found = features.get_mut(feature).and_then(Value::as_object_mut);
    if found.is_none() {
        warn!(feature, "toolbox feature is not defined in the current template; skipping customization");
    }
    found
}

pub(super) fn set_feature_field(option: &mut Value, feature: &str, field: &str, value: Value) -> bool {
    match feature_mut(option, feature) {
        Some(entry) => {
            entry.insert(field.to_owned(), value);
            true
        }
        None => false,
    }
}

struct Titles {
    zoom: &'static str,
    zoom_back: &'static str,
    restore: &'static str,
    save_as_image: &'static str,
    delete: &'static str,
    enlarge: &'static str,
    shrink: &'static str,
}

const fn titles(language: Language) -> Titles {
    match language {
        Language::ZhCn => Titles {
            zoom: "区域缩放",
            zoom_back: "区域缩放还原",
            restore: "还原",
            save_as_image: "保存为图片",
            delete: "删除",
            enlarge: "放大",
            shrink: "缩小",
        },
        Language::EnUs => Titles {
            zoom: "Zoom",
            zoom_back: "Zoom Reset",
            restore: "Restore",
            save_as_image: "Save as Image",
            delete: "Delete",
            enlarge: "Enlarge",
            shrink: "Shrink",
        },
    }
}

/// Writes localized titles into every built-in toolbox feature present.
pub(super) fn apply_language(option: &mut Value, language: Language, state: EnlargeShrink) {
    let titles = titles(language);
    set_feature_field(
        option,
        FEATURE_DATA_ZOOM,
        "title",
        json!({ "zoom": titles.zoom, "back": titles.zoom_back }),
    );
    set_feature_field(option, FEATURE_RESTORE, "title", json!(titles.restore));
    set_feature_field(option, FEATURE_SAVE_AS_IMAGE, "title", json!(titles.save_as_image));
    set_feature_field(option, FEATURE_DELETE, "title", json!(titles.delete));
    apply_enlarge_shrink(option, language, state);
}

/// Switches the enlarge/shrink button between its two faces.
pub(super) fn apply_enlarge_shrink(option: &mut Value, language: Language, state: EnlargeShrink) {
    let titles = titles(language);
    let (title, icon) = match state {
        EnlargeShrink::Enlarge => (titles.enlarge, ENLARGE_ICON),
        EnlargeShrink::Shrink => (titles.shrink, SHRINK_ICON),
    };
    if let Some(feature) = feature_mut(option, FEATURE_ENLARGE_SHRINK) {
        feature.insert("title".to_owned(), json!(title));
        feature.insert("icon".to_owned(), json!(icon));
    }
}
