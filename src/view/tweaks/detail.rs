//! Detail screen state for number, string and choice tweaks
//!
//! Opened from a [`DetailRequest`]; holds the working value while the user
//! edits and writes it back to the tweak on commit.

use super::model::{Tweak, TweakValue, ValueKind};
use super::selection::{DetailRequest, DetailValue, NumberBounds};

/// Errors raised when committing a detail screen
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum DetailError {
    #[error("'{0}' is not a valid number")]
    InvalidNumber(String),

    #[error("'{0}' is not one of the allowed choices")]
    UnknownChoice(String),

    #[error("tweak '{identifier}' is a {found}, the editor was opened for a {expected}")]
    KindMismatch {
        identifier: String,
        expected: ValueKind,
        found: ValueKind,
    },

    #[error("no tweak with identifier '{0}'")]
    UnknownTweak(String),

    #[error("editor was opened for '{expected}', not '{found}'")]
    IdentifierMismatch { expected: String, found: String },
}

/// State of an open detail screen
#[derive(Debug, Clone, PartialEq)]
pub struct DetailEditorState {
    /// Identifier of the tweak being edited
    pub identifier: String,
    /// Title shown on the screen
    pub title: String,
    pub kind: ValueKind,
    /// Text buffer, used by string and number editors
    pub input: String,
    /// Allowed values (choice editors only)
    pub choices: Vec<String>,
    /// Selected choice index
    pub selected: usize,
    pub bounds: NumberBounds,
    original: DetailValue,
}

fn format_number(value: f64) -> String {
    value.to_string()
}

impl DetailEditorState {
    pub fn from_request(request: DetailRequest) -> Self {
        let choices = request.choices.unwrap_or_default();
        let (input, selected) = match &request.current {
            DetailValue::Number(n) => (format_number(*n), 0),
            DetailValue::Text(s) => {
                let selected = choices.iter().position(|c| c == s).unwrap_or(0);
                (s.clone(), selected)
            }
        };

        Self {
            identifier: request.identifier,
            title: request.name,
            kind: request.kind,
            input,
            choices,
            selected,
            bounds: request.bounds.unwrap_or_default(),
            original: request.current,
        }
    }

    /// Value the screen was opened with
    pub fn original(&self) -> &DetailValue {
        &self.original
    }

    /// Working value as currently edited
    pub fn value(&self) -> DetailValue {
        match self.kind {
            ValueKind::Number => match self.input.trim().parse::<f64>() {
                Ok(n) => DetailValue::Number(n),
                Err(_) => DetailValue::Text(self.input.clone()),
            },
            ValueKind::Choice => {
                DetailValue::Text(self.choices.get(self.selected).cloned().unwrap_or_default())
            }
            ValueKind::Text | ValueKind::Bool | ValueKind::Action | ValueKind::Unrecognized => {
                DetailValue::Text(self.input.clone())
            }
        }
    }

    pub fn is_modified(&self) -> bool {
        self.value() != self.original
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn insert_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    fn current_number(&self) -> f64 {
        match self.input.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => n,
            _ => match self.original {
                DetailValue::Number(n) => n,
                DetailValue::Text(_) => 0.0,
            },
        }
    }

    fn clamp(&self, value: f64) -> f64 {
        let mut value = value;
        if let Some(min) = self.bounds.min {
            value = value.max(min);
        }
        if let Some(max) = self.bounds.max {
            value = value.min(max);
        }
        value
    }

    fn step_by(&mut self, direction: f64) {
        if self.kind != ValueKind::Number {
            return;
        }
        let step = match self.bounds.step {
            Some(step) if step.is_finite() && step > 0.0 => step,
            _ => 1.0,
        };
        let next = self.clamp(self.current_number() + direction * step);
        self.input = format_number(next);
    }

    /// Increase a number by its step
    pub fn step_up(&mut self) {
        self.step_by(1.0);
    }

    /// Decrease a number by its step
    pub fn step_down(&mut self) {
        self.step_by(-1.0);
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.choices.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Select a choice by index; out-of-range indices are ignored
    pub fn select_choice(&mut self, index: usize) -> bool {
        if index < self.choices.len() {
            self.selected = index;
            true
        } else {
            false
        }
    }

    /// Restore the value the screen was opened with
    pub fn revert(&mut self) {
        match &self.original {
            DetailValue::Number(n) => self.input = format_number(*n),
            DetailValue::Text(s) => {
                self.input = s.clone();
                if let Some(idx) = self.choices.iter().position(|c| c == s) {
                    self.selected = idx;
                }
            }
        }
    }

    /// Validate the working value and write it into `tweak`.
    ///
    /// Numbers are clamped to the tweak's bounds. On error `tweak` is left
    /// untouched.
    pub fn commit(&self, tweak: &mut Tweak) -> Result<(), DetailError> {
        if tweak.identifier != self.identifier {
            return Err(DetailError::IdentifierMismatch {
                expected: self.identifier.clone(),
                found: tweak.identifier.clone(),
            });
        }
        let found = tweak.kind();
        if found != self.kind {
            return Err(DetailError::KindMismatch {
                identifier: tweak.identifier.clone(),
                expected: self.kind,
                found,
            });
        }

        match &mut tweak.value {
            TweakValue::Number(number) => {
                let parsed = self
                    .input
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|n| n.is_finite())
                    .ok_or_else(|| DetailError::InvalidNumber(self.input.clone()))?;
                number.value = number.clamp(parsed);
            }
            TweakValue::Text(text) => {
                *text = self.input.clone();
            }
            TweakValue::Choice(choice) => {
                let wanted = self.choices.get(self.selected).cloned().unwrap_or_default();
                if !choice.choices.contains(&wanted) {
                    return Err(DetailError::UnknownChoice(wanted));
                }
                choice.selected = wanted;
            }
            // Kinds that never open a detail screen
            TweakValue::Bool(_) | TweakValue::Action(_) | TweakValue::Unrecognized { .. } => {
                return Err(DetailError::KindMismatch {
                    identifier: self.identifier.clone(),
                    expected: self.kind,
                    found,
                });
            }
        }

        tracing::debug!(
            "committed {} = {}",
            tweak.identifier,
            tweak.value.display_value()
        );
        Ok(())
    }
}
