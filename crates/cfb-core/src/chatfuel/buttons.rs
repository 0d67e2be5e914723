//! Bounded button collections shared by messages and cards.

use serde_json::Value;

use crate::{
    chatfuel::{button::Button, limits::MAX_BUTTONS},
    errors::{ButtonError, MessageError},
};

/// Up to three buttons, in the order they were given.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ButtonSet {
    buttons: Vec<Button>,
}

impl ButtonSet {
    pub fn new(buttons: Vec<Button>) -> Result<Self, MessageError> {
        let mut set = Self::default();
        set.replace(buttons)?;
        Ok(set)
    }

    /// Replaces the stored buttons; the old ones are kept if the new list is too long.
    pub fn replace(&mut self, buttons: Vec<Button>) -> Result<(), MessageError> {
        if buttons.len() > MAX_BUTTONS {
            return Err(MessageError::TooManyButtons(buttons.len()));
        }
        self.buttons = buttons;
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    pub fn as_slice(&self) -> &[Button] {
        &self.buttons
    }

    pub fn finalize(&self) -> Result<Vec<Value>, ButtonError> {
        self.buttons.iter().map(Button::finalize).collect()
    }
}

/// Mixes a bounded `buttons()` setter into any builder that embeds a [`ButtonSet`].
pub trait HasButtons: Sized {
    fn button_set(&self) -> &ButtonSet;

    fn button_set_mut(&mut self) -> &mut ButtonSet;

    /// Replaces the attached buttons. Fails with `TooManyButtons` past three.
    fn buttons(mut self, buttons: Vec<Button>) -> Result<Self, MessageError> {
        self.button_set_mut().replace(buttons)?;
        Ok(self)
    }
}
