//! Circuit frames as streamed by the algorithm service.

use serde::{Deserialize, Serialize};

use qcanvas_scene::GlyphKind;

use crate::error::{FrameError, FrameResult};

/// What sits at one (column, qubit line) cell.
///
/// On the wire this is a bare integer: `0`, `1` and `3` are the three gate
/// codes, anything else is an empty cell. `Empty` serializes as `2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum GateCode {
    Empty,
    ControlZero,
    ControlOne,
    Target,
}

impl GateCode {
    pub const fn from_code(code: i64) -> Self {
        match code {
            0 => GateCode::ControlZero,
            1 => GateCode::ControlOne,
            3 => GateCode::Target,
            _ => GateCode::Empty,
        }
    }

    pub const fn code(self) -> i64 {
        match self {
            GateCode::ControlZero => 0,
            GateCode::ControlOne => 1,
            GateCode::Empty => 2,
            GateCode::Target => 3,
        }
    }

    /// The glyph drawn for this cell, if any.
    pub const fn glyph(self) -> Option<GlyphKind> {
        match self {
            GateCode::Target => Some(GlyphKind::Target),
            GateCode::ControlOne => Some(GlyphKind::ControlOne),
            GateCode::ControlZero => Some(GlyphKind::ControlZero),
            GateCode::Empty => None,
        }
    }
}

impl From<i64> for GateCode {
    fn from(code: i64) -> Self {
        GateCode::from_code(code)
    }
}

impl From<GateCode> for i64 {
    fn from(code: GateCode) -> Self {
        code.code()
    }
}

/// One time step: a gate code per qubit line, top to bottom.
pub type Column = Vec<GateCode>;

/// One streamed snapshot of the best circuit found so far.
///
/// Deserializing rejects `total_epochs == 0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCircuitFrame")]
pub struct CircuitFrame {
    pub epoch: u64,
    pub total_epochs: u64,
    /// Columns left to right. `None` when the producer sent no circuit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circuit: Option<Vec<Column>>,
}

/// Wire shape of a frame before validation.
#[derive(Deserialize)]
struct RawCircuitFrame {
    epoch: u64,
    total_epochs: u64,
    #[serde(default)]
    circuit: Option<Vec<Column>>,
}

impl TryFrom<RawCircuitFrame> for CircuitFrame {
    type Error = FrameError;

    fn try_from(raw: RawCircuitFrame) -> FrameResult<Self> {
        if raw.total_epochs == 0 {
            return Err(FrameError::InvalidTotalEpochs { epoch: raw.epoch });
        }
        Ok(Self {
            epoch: raw.epoch,
            total_epochs: raw.total_epochs,
            circuit: raw.circuit,
        })
    }
}

impl CircuitFrame {
    pub fn new(epoch: u64, total_epochs: u64, circuit: Vec<Column>) -> Self {
        Self {
            epoch,
            total_epochs,
            circuit: Some(circuit),
        }
    }

    /// Build a frame from raw wire codes.
    pub fn from_codes<C, R>(epoch: u64, total_epochs: u64, columns: C) -> Self
    where
        C: IntoIterator<Item = R>,
        R: IntoIterator<Item = i64>,
    {
        let circuit = columns
            .into_iter()
            .map(|column| column.into_iter().map(GateCode::from_code).collect())
            .collect();
        Self::new(epoch, total_epochs, circuit)
    }

    /// Decode one `data:` payload.
    pub fn from_json(payload: &str) -> FrameResult<Self> {
        let raw: RawCircuitFrame = serde_json::from_str(payload)?;
        raw.try_into()
    }

    /// Decode a frame embedded in a larger JSON document.
    pub fn from_value(value: serde_json::Value) -> FrameResult<Self> {
        let raw: RawCircuitFrame = serde_json::from_value(value)?;
        raw.try_into()
    }

    pub fn to_json(&self) -> FrameResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Columns of the circuit; empty when absent.
    pub fn columns(&self) -> &[Column] {
        self.circuit.as_deref().unwrap_or(&[])
    }

    /// Whether drawing this frame would change anything.
    pub fn is_empty(&self) -> bool {
        self.columns().is_empty()
    }

    /// Number of glyph-bearing cells.
    pub fn gate_count(&self) -> usize {
        self.columns()
            .iter()
            .flatten()
            .filter(|code| code.glyph().is_some())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_code_mapping() {
        assert_eq!(GateCode::from_code(0), GateCode::ControlZero);
        assert_eq!(GateCode::from_code(1), GateCode::ControlOne);
        assert_eq!(GateCode::from_code(2), GateCode::Empty);
        assert_eq!(GateCode::from_code(3), GateCode::Target);
        assert_eq!(GateCode::from_code(-1), GateCode::Empty);
        assert_eq!(GateCode::from_code(42), GateCode::Empty);
    }

    #[test]
    fn test_glyph_for_each_code() {
        assert_eq!(GateCode::Target.glyph(), Some(GlyphKind::Target));
        assert_eq!(GateCode::ControlOne.glyph(), Some(GlyphKind::ControlOne));
        assert_eq!(GateCode::ControlZero.glyph(), Some(GlyphKind::ControlZero));
        assert_eq!(GateCode::Empty.glyph(), None);
    }

    #[test]
    fn test_decode_frame() {
        let payload = r#"{"total_epochs": 50, "epoch": 3, "circuit": [[1, 1, 3], [0, 2, 3]]}"#;
        let frame = CircuitFrame::from_json(payload).unwrap();
        assert_eq!(frame.epoch, 3);
        assert_eq!(frame.total_epochs, 50);
        assert_eq!(
            frame.columns()[1],
            vec![GateCode::ControlZero, GateCode::Empty, GateCode::Target]
        );
        assert_eq!(frame.gate_count(), 5);
    }

    #[test]
    fn test_missing_or_null_circuit() {
        let missing = CircuitFrame::from_json(r#"{"epoch": 1, "total_epochs": 2}"#).unwrap();
        assert!(missing.circuit.is_none());
        assert!(missing.is_empty());

        let null = CircuitFrame::from_json(r#"{"epoch": 1, "total_epochs": 2, "circuit": null}"#)
            .unwrap();
        assert!(null.is_empty());
    }

    #[test]
    fn test_reject_malformed() {
        assert!(CircuitFrame::from_json(r#"{"epoch": 1, "total_ep"#).is_err());
        assert!(CircuitFrame::from_json(r#"{"epoch": 1}"#).is_err());
        assert!(CircuitFrame::from_json(r#"{"epoch": -1, "total_epochs": 2}"#).is_err());
        assert!(
            CircuitFrame::from_json(r#"{"epoch": 1, "total_epochs": 2, "circuit": [["3"]]}"#)
                .is_err()
        );
    }

    #[test]
    fn test_reject_zero_total_epochs() {
        let err = CircuitFrame::from_json(r#"{"epoch": 0, "total_epochs": 0, "circuit": []}"#)
            .unwrap_err();
        assert!(matches!(err, FrameError::InvalidTotalEpochs { epoch: 0 }));
    }

    #[test]
    fn test_serde_rejects_zero_total_epochs() {
        let result: Result<CircuitFrame, _> =
            serde_json::from_str(r#"{"epoch": 1, "total_epochs": 0, "circuit": [[3, 1]]}"#);
        assert!(result.is_err());

        let value = serde_json::json!({ "epoch": 4, "total_epochs": 0 });
        let err = CircuitFrame::from_value(value).unwrap_err();
        assert!(matches!(err, FrameError::InvalidTotalEpochs { epoch: 4 }));
    }

    #[test]
    fn test_from_value_accepts_valid_frame() {
        let value = serde_json::json!({ "epoch": 1, "total_epochs": 2, "circuit": [[3, 1]] });
        let frame = CircuitFrame::from_value(value).unwrap();
        assert_eq!(frame, CircuitFrame::from_codes(1, 2, [[3, 1]]));
    }

    #[test]
    fn test_encode_uses_wire_codes() {
        let frame = CircuitFrame::from_codes(2, 2, [[1, 5]]);
        assert_eq!(
            frame.to_json().unwrap(),
            r#"{"epoch":2,"total_epochs":2,"circuit":[[1,2]]}"#
        );
    }
}
