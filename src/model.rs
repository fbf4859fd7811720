use serde::{Deserialize, Serialize};

use crate::menu::{ActionResponse, MenuAction};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchAccessConfig {
    /// Offer caret movement, selection and clipboard actions on text fields.
    #[serde(default = "default_true")]
    pub improved_text_input: bool,
}

impl Default for SwitchAccessConfig {
    fn default() -> Self {
        Self {
            improved_text_input: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// A scripted run of menu actions against simulated text fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Script {
    pub version: u32,
    #[serde(default)]
    pub config: SwitchAccessConfig,
    pub fields: Vec<FieldSpec>,
    /// Index into `fields` of the focused field.
    #[serde(default)]
    pub focus: usize,
    pub actions: Vec<MenuAction>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSpec {
    pub text: String,
    /// Initial caret offset in chars. Defaults to the end of `text`.
    #[serde(default)]
    pub caret: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSummary {
    pub id: String,
    pub text: String,
    pub anchor: usize,
    pub focus: usize,
    pub selected_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerSummary {
    pub currently_selecting: bool,
    pub sel_start_index: Option<usize>,
    pub sel_end_index: Option<usize>,
    pub selection_exists: bool,
    pub clipboard_has_data: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplaySummary {
    pub responses: Vec<ActionResponse>,
    pub fields: Vec<FieldSummary>,
    pub clipboard: Option<String>,
    pub tracker: TrackerSummary,
}
