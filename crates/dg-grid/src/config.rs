//! Declarative grid configuration
//!
//! Presentation settings the view consumes as-is: enumerated keys with
//! declared defaults, pushed wholesale on change. Nothing here computes
//! styling.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Which headers the view draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HeaderVisibility {
    #[default]
    All,
    Row,
    Column,
    None,
}

/// Where column auto-fit measures cell content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum AutoFitArea {
    RowHeader,
    Body,
    #[default]
    All,
}

/// Column auto-fit parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoFitParams {
    pub area: AutoFitArea,
    /// Extra pixels added to every resized column
    pub padding: u32,
    /// Cap on the number of columns to resize; `None` resizes all
    #[serde(rename = "numCols")]
    pub num_cols: Option<u32>,
}

impl Default for AutoFitParams {
    fn default() -> Self {
        Self {
            area: AutoFitArea::All,
            padding: 30,
            num_cols: None,
        }
    }
}

/// Color-valued style keys recognized by the view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GridStyle {
    pub void_color: Option<String>,
    pub background_color: Option<String>,
    pub row_background_color: Option<String>,
    pub column_background_color: Option<String>,
    pub grid_line_color: Option<String>,
    pub vertical_grid_line_color: Option<String>,
    pub horizontal_grid_line_color: Option<String>,
    pub header_background_color: Option<String>,
    pub header_grid_line_color: Option<String>,
    pub selection_fill_color: Option<String>,
    pub selection_border_color: Option<String>,
    pub cursor_fill_color: Option<String>,
    pub cursor_border_color: Option<String>,
}

/// Grid-level presentation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub base_row_size: u32,
    pub base_column_size: u32,
    pub base_row_header_size: u32,
    pub base_column_header_size: u32,
    pub header_visibility: HeaderVisibility,
    /// Custom widths by column display name
    pub column_widths: AHashMap<String, u32>,
    pub auto_fit_columns: bool,
    pub auto_fit_params: AutoFitParams,
    pub horizontal_stripes: bool,
    pub vertical_stripes: bool,
    pub grid_style: GridStyle,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            base_row_size: 20,
            base_column_size: 64,
            base_row_header_size: 64,
            base_column_header_size: 20,
            header_visibility: HeaderVisibility::All,
            column_widths: AHashMap::new(),
            auto_fit_columns: false,
            auto_fit_params: AutoFitParams::default(),
            horizontal_stripes: false,
            vertical_stripes: false,
            grid_style: GridStyle::default(),
        }
    }
}
