//! Page-overridable shell strings.
//!
//! A host page can embed a JSON blob to rebrand the save dialog; every
//! field falls back to the stock wording.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub save_dialog_title: String,
    pub save_placeholder: String,
    pub save_confirm_label: String,
    pub save_validation_message: String,
    pub save_suffix: String,
    pub saved_notice_template: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            save_dialog_title: "Save with file name?".to_string(),
            save_placeholder: "MyAwesomeCircuit".to_string(),
            save_confirm_label: "Save".to_string(),
            save_validation_message: "You need to write the name for the save file!"
                .to_string(),
            save_suffix: ".json".to_string(),
            saved_notice_template: "File {file} saved!".to_string(),
        }
    }
}

impl ShellConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Text of the post-save confirmation dialog.
    pub fn saved_notice(&self, filename: &str) -> String {
        self.saved_notice_template.replace("{file}", filename)
    }
}
