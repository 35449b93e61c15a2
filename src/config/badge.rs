use serde::{Deserialize, Serialize};

const DEFAULT_COPY_ICON_CLASS: &str = "fa fa-copy";
const DEFAULT_CHECK_ICON_CLASS: &str = "fa fa-check text-success";

// Options handed to the copy-to-clipboard badge script. Read from the
// config in snake_case, written to the page in the script's camelCase.
#[derive(Deserialize, Serialize, PartialEq, Eq, Clone, Debug)]
#[serde(default, deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct BadgeOptions {
    pub load_delay: u64,
    pub copy_icon_class: String,
    pub check_icon_class: String,
}

impl Default for BadgeOptions {
    fn default() -> Self {
        Self {
            load_delay: 0,
            copy_icon_class: DEFAULT_COPY_ICON_CLASS.into(),
            check_icon_class: DEFAULT_CHECK_ICON_CLASS.into(),
        }
    }
}
