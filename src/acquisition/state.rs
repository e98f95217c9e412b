//! Acquisition FSM State Definitions

use std::fmt;

/// One stage of the acquisition workflow, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Stage {
    /// Profile reference -> canonical account id
    ResolveIdentity = 0,
    /// Inventory existence check
    FetchInventory = 1,
    /// Price enrichment (settling delay)
    EnrichPrices = 2,
    /// Final settling delay
    Finalize = 3,
}

impl Stage {
    pub const ALL: [Stage; 4] = [
        Stage::ResolveIdentity,
        Stage::FetchInventory,
        Stage::EnrichPrices,
        Stage::Finalize,
    ];

    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Stage::ALL.get(index).copied()
    }

    /// User-facing label shown next to the step
    pub fn label(&self) -> &'static str {
        match self {
            Stage::ResolveIdentity => "Определяем ваш SteamID",
            Stage::FetchInventory => "Отправляем запрос на получение предметов",
            Stage::EnrichPrices => "Добавляем цены к предметам",
            Stage::Finalize => "Готово",
        }
    }

    /// FSM state while this stage is running
    pub fn running_state(&self) -> AcquisitionState {
        match self {
            Stage::ResolveIdentity => AcquisitionState::ResolvingIdentity,
            Stage::FetchInventory => AcquisitionState::FetchingInventory,
            Stage::EnrichPrices => AcquisitionState::EnrichingPrices,
            Stage::Finalize => AcquisitionState::Finalizing,
        }
    }
}

/// Acquisition FSM States
///
/// ```text
/// IDLE → RESOLVING_IDENTITY → FETCHING_INVENTORY → ENRICHING_PRICES → FINALIZING → READY
///               ↓                     ↓                   ↓                ↓
///                ──────────────────── FAILED(stage) ──────────────────────
/// ```
///
/// Terminal states: READY, FAILED. A new run always starts over from IDLE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AcquisitionState {
    Idle,
    ResolvingIdentity,
    FetchingInventory,
    EnrichingPrices,
    Finalizing,
    /// Terminal: inventory ready for display
    Ready,
    /// Terminal: the given stage failed, later stages never ran
    Failed(Stage),
}

impl AcquisitionState {
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, AcquisitionState::Ready | AcquisitionState::Failed(_))
    }

    #[inline]
    pub fn is_in_progress(&self) -> bool {
        self.stage().is_some()
    }

    /// Stage being executed, if any
    pub fn stage(&self) -> Option<Stage> {
        match self {
            AcquisitionState::ResolvingIdentity => Some(Stage::ResolveIdentity),
            AcquisitionState::FetchingInventory => Some(Stage::FetchInventory),
            AcquisitionState::EnrichingPrices => Some(Stage::EnrichPrices),
            AcquisitionState::Finalizing => Some(Stage::Finalize),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AcquisitionState::Idle => "IDLE",
            AcquisitionState::ResolvingIdentity => "RESOLVING_IDENTITY",
            AcquisitionState::FetchingInventory => "FETCHING_INVENTORY",
            AcquisitionState::EnrichingPrices => "ENRICHING_PRICES",
            AcquisitionState::Finalizing => "FINALIZING",
            AcquisitionState::Ready => "READY",
            AcquisitionState::Failed(_) => "FAILED",
        }
    }
}

impl fmt::Display for AcquisitionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AcquisitionState::Failed(stage) => write!(f, "FAILED({})", stage.index()),
            other => f.write_str(other.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(AcquisitionState::Ready.is_terminal());
        assert!(AcquisitionState::Failed(Stage::FetchInventory).is_terminal());

        assert!(!AcquisitionState::Idle.is_terminal());
        assert!(!AcquisitionState::ResolvingIdentity.is_terminal());
        assert!(!AcquisitionState::Finalizing.is_terminal());
    }

    #[test]
    fn test_stage_roundtrip() {
        for stage in Stage::ALL {
            assert_eq!(Stage::from_index(stage.index()), Some(stage));
            assert_eq!(stage.running_state().stage(), Some(stage));
            assert!(stage.running_state().is_in_progress());
        }
        assert!(Stage::from_index(4).is_none());
    }

    #[test]
    fn test_stage_order() {
        assert!(Stage::ResolveIdentity < Stage::FetchInventory);
        assert!(Stage::EnrichPrices < Stage::Finalize);
    }

    #[test]
    fn test_display() {
        assert_eq!(AcquisitionState::Idle.to_string(), "IDLE");
        assert_eq!(AcquisitionState::Ready.to_string(), "READY");
        assert_eq!(
            AcquisitionState::Failed(Stage::ResolveIdentity).to_string(),
            "FAILED(0)"
        );
    }
}
