//! Logical messages crossing the view boundary
//!
//! Both directions are tagged by `event_type` on the wire. Outbound
//! messages are state pushes and change notifications; inbound messages
//! are edits, clicks and data requests originating in the view.

use dg_core::{CellValue, FieldName, SelectionMode, SelectionRegion};
use serde::{Deserialize, Serialize};

use crate::config::GridConfig;
use crate::transform::Transform;
use crate::wire::WireDataset;

/// Model → view messages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "kebab-case")]
pub enum OutboundMessage {
    /// A single cell changed model-side
    CellChanged {
        row: usize,
        column: FieldName,
        column_index: Option<usize>,
        value: CellValue,
    },
    /// A whole row changed model-side
    RowChanged { row: usize, value: Vec<CellValue> },
    /// Full selection state (regions plus mode)
    SelectionChanged {
        selections: Vec<SelectionRegion>,
        mode: SelectionMode,
    },
    /// Full transform list
    TransformsChanged { transforms: Vec<Transform> },
    /// Wholesale dataset replacement
    DataReplaced {
        data: WireDataset,
        row_count: usize,
    },
    /// Answer to a `data-request`, carrying the serialized sub-range
    DataReply {
        value: WireDataset,
        r1: usize,
        r2: usize,
        c1: usize,
        c2: usize,
    },
    /// The underlying data changed; re-request what you need
    Tick,
    /// Full presentation settings
    ConfigChanged { config: GridConfig },
}

/// View → model messages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "kebab-case")]
pub enum InboundMessage {
    /// The user edited a cell in the view
    CellChanged {
        row: usize,
        column_index: usize,
        value: CellValue,
    },
    /// The user clicked a cell; notification only, no mutation
    CellClick {
        region: String,
        column: FieldName,
        column_index: Option<usize>,
        row: usize,
        primary_key_row: CellValue,
        cell_value: CellValue,
    },
    /// Viewport-windowed data request in streaming mode
    DataRequest {
        r1: usize,
        r2: usize,
        c1: usize,
        c2: usize,
    },
    /// Row ordinals currently visible after view-side transforms
    VisibleRows { rows: Vec<usize> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outbound_tagging() {
        let message = OutboundMessage::CellChanged {
            row: 3,
            column: FieldName::from("A"),
            column_index: Some(0),
            value: CellValue::Int(42),
        };
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            serde_json::json!({
                "event_type": "cell-changed",
                "row": 3,
                "column": "A",
                "column_index": 0,
                "value": 42,
            })
        );

        assert_eq!(
            serde_json::to_value(OutboundMessage::Tick).unwrap(),
            serde_json::json!({"event_type": "tick"})
        );
    }

    #[test]
    fn test_inbound_parsing() {
        let message: InboundMessage = serde_json::from_value(serde_json::json!({
            "event_type": "cell-changed",
            "row": 1,
            "column_index": 0,
            "value": "edited",
        }))
        .unwrap();
        assert_eq!(
            message,
            InboundMessage::CellChanged {
                row: 1,
                column_index: 0,
                value: CellValue::from("edited"),
            }
        );

        let message: InboundMessage = serde_json::from_value(serde_json::json!({
            "event_type": "data-request",
            "r1": 0, "r2": 10, "c1": 2, "c2": 4,
        }))
        .unwrap();
        assert_eq!(
            message,
            InboundMessage::DataRequest {
                r1: 0,
                r2: 10,
                c1: 2,
                c2: 4
            }
        );
    }

    #[test]
    fn test_selection_state_shape() {
        let message = OutboundMessage::SelectionChanged {
            selections: vec![SelectionRegion::new(2, 1, 0, 0)],
            mode: SelectionMode::Cell,
        };
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            serde_json::json!({
                "event_type": "selection-changed",
                "selections": [{"r1": 0, "c1": 0, "r2": 2, "c2": 1}],
                "mode": "cell",
            })
        );
    }
}
