use crate::error::workflow::InvalidInput;

/// Rejects blank free-text input; `field` names it in the user-facing message.
pub fn require_filled(field: &'static str, value: &str) -> Result<(), InvalidInput> {
    if value.trim().is_empty() {
        Err(InvalidInput::Blank(field))
    } else {
        Ok(())
    }
}
