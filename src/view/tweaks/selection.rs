//! Selection handling
//!
//! Decides what happens when the user picks a tweak: booleans flip in place,
//! actions run, and number, string and choice tweaks are handed to the
//! presenter to open a detail screen.

use super::model::{NumberValue, Tweak, TweakValue, ValueKind};

/// Capabilities the hosting UI offers to the dispatcher
pub trait TweakPresenter {
    /// Redraw the row showing the tweak with this identifier
    fn refresh_row(&mut self, identifier: &str);

    /// Open a detail/edit screen for a single tweak
    fn present_detail(&mut self, request: DetailRequest);
}

/// Current value handed to a detail screen
#[derive(Debug, Clone, PartialEq)]
pub enum DetailValue {
    Number(f64),
    Text(String),
}

/// Bounds of a number tweak
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NumberBounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
}

impl From<&NumberValue> for NumberBounds {
    fn from(number: &NumberValue) -> Self {
        Self {
            min: number.min,
            max: number.max,
            step: number.step,
        }
    }
}

/// Payload of a "present detail screen" request
#[derive(Debug, Clone, PartialEq)]
pub struct DetailRequest {
    pub identifier: String,
    pub name: String,
    pub kind: ValueKind,
    pub current: DetailValue,
    /// Allowed values, for choice tweaks
    pub choices: Option<Vec<String>>,
    /// Bounds, for number tweaks
    pub bounds: Option<NumberBounds>,
}

/// What the dispatcher did with a selection
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionOutcome {
    /// A boolean was flipped to the contained value
    Toggled(bool),
    ActionInvoked,
    DetailPresented,
}

/// Configuration problems found while handling a selection
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SelectionError {
    #[error("tweak '{identifier}' has unrecognized value kind '{kind}'")]
    UnrecognizedKind { identifier: String, kind: String },

    #[error("choice tweak '{identifier}' declares no choices")]
    EmptyChoices { identifier: String },

    #[error("choice tweak '{identifier}' has selected '{selected}', which is not one of its choices")]
    UnknownSelectedChoice { identifier: String, selected: String },

    #[error("no tweak at row {collection_row}/{tweak_row} of the current results")]
    RowOutOfRange {
        collection_row: usize,
        tweak_row: usize,
    },
}

/// Handle the user selecting `tweak`.
///
/// On error nothing is mutated and the presenter is not called.
pub fn handle_selection(
    tweak: &mut Tweak,
    presenter: &mut dyn TweakPresenter,
) -> Result<SelectionOutcome, SelectionError> {
    let outcome = match &mut tweak.value {
        TweakValue::Bool(value) => {
            *value = !*value;
            let toggled = *value;
            tracing::debug!("toggled {} to {}", tweak.identifier, toggled);
            presenter.refresh_row(&tweak.identifier);
            SelectionOutcome::Toggled(toggled)
        }
        TweakValue::Action(action) => {
            tracing::debug!("invoking action {}", tweak.identifier);
            action.invoke();
            presenter.refresh_row(&tweak.identifier);
            SelectionOutcome::ActionInvoked
        }
        TweakValue::Number(number) => {
            presenter.present_detail(DetailRequest {
                identifier: tweak.identifier.clone(),
                name: tweak.name.clone(),
                kind: ValueKind::Number,
                current: DetailValue::Number(number.value),
                choices: None,
                bounds: Some(NumberBounds::from(&*number)),
            });
            SelectionOutcome::DetailPresented
        }
        TweakValue::Text(text) => {
            presenter.present_detail(DetailRequest {
                identifier: tweak.identifier.clone(),
                name: tweak.name.clone(),
                kind: ValueKind::Text,
                current: DetailValue::Text(text.clone()),
                choices: None,
                bounds: None,
            });
            SelectionOutcome::DetailPresented
        }
        TweakValue::Choice(choice) => {
            if choice.choices.is_empty() {
                tracing::error!("choice tweak {} declares no choices", tweak.identifier);
                return Err(SelectionError::EmptyChoices {
                    identifier: tweak.identifier.clone(),
                });
            }
            if !choice.choices.contains(&choice.selected) {
                tracing::error!(
                    "choice tweak {} has selected {:?} outside its choices",
                    tweak.identifier,
                    choice.selected
                );
                return Err(SelectionError::UnknownSelectedChoice {
                    identifier: tweak.identifier.clone(),
                    selected: choice.selected.clone(),
                });
            }
            presenter.present_detail(DetailRequest {
                identifier: tweak.identifier.clone(),
                name: tweak.name.clone(),
                kind: ValueKind::Choice,
                current: DetailValue::Text(choice.selected.clone()),
                choices: Some(choice.choices.clone()),
                bounds: None,
            });
            SelectionOutcome::DetailPresented
        }
        TweakValue::Unrecognized { kind } => {
            tracing::error!(
                "tweak {} has unrecognized value kind {:?}",
                tweak.identifier,
                kind
            );
            return Err(SelectionError::UnrecognizedKind {
                identifier: tweak.identifier.clone(),
                kind: kind.clone(),
            });
        }
    };

    if matches!(outcome, SelectionOutcome::DetailPresented) {
        tracing::debug!("presented detail screen for {}", tweak.identifier);
    }
    Ok(outcome)
}
