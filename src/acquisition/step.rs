//! Loading steps shown on the progress surface

use serde::Serialize;

use super::state::Stage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Pending,
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadingStep {
    pub status: StepStatus,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl LoadingStep {
    fn pending(message: &'static str) -> Self {
        Self {
            status: StepStatus::Pending,
            message,
            error_message: None,
        }
    }
}

/// The four workflow steps
///
/// Invariants maintained by [`LoadingSteps::update`]:
/// - changing a step resets every later step to `Pending`
/// - `error_message` is only set on a step in `Error`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LoadingSteps {
    steps: [LoadingStep; 4],
}

impl Default for LoadingSteps {
    fn default() -> Self {
        Self {
            steps: Stage::ALL.map(|stage| LoadingStep::pending(stage.label())),
        }
    }
}

impl LoadingSteps {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one step's status; later steps go back to pending
    pub fn update(&mut self, stage: Stage, status: StepStatus, error_message: Option<String>) {
        let index = stage.index();
        for (i, step) in self.steps.iter_mut().enumerate() {
            if i == index {
                step.status = status;
                step.error_message = if status == StepStatus::Error {
                    error_message.clone()
                } else {
                    None
                };
            } else if i > index {
                step.status = StepStatus::Pending;
                step.error_message = None;
            }
        }
    }

    /// Every step back to pending, errors cleared
    pub fn reset(&mut self) {
        for step in &mut self.steps {
            step.status = StepStatus::Pending;
            step.error_message = None;
        }
    }

    pub fn get(&self, stage: Stage) -> &LoadingStep {
        &self.steps[stage.index()]
    }

    pub fn status(&self, stage: Stage) -> StepStatus {
        self.get(stage).status
    }

    pub fn iter(&self) -> impl Iterator<Item = &LoadingStep> {
        self.steps.iter()
    }

    pub fn all_pending(&self) -> bool {
        self.steps.iter().all(|s| s.status == StepStatus::Pending)
    }

    pub fn all_succeeded(&self) -> bool {
        self.steps.iter().all(|s| s.status == StepStatus::Success)
    }

    /// First step in `Error`, with its message
    pub fn failed(&self) -> Option<(Stage, &LoadingStep)> {
        self.steps
            .iter()
            .enumerate()
            .find(|(_, s)| s.status == StepStatus::Error)
            .and_then(|(i, s)| Stage::from_index(i).map(|stage| (stage, s)))
    }

    pub fn loading_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| s.status == StepStatus::Loading)
            .count()
    }
}
