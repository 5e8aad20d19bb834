use crate::error::{StatsError, StatsResult};

// maximum length of measure, view and tag names
pub(crate) const NAME_MAX_LENGTH: usize = 255;
// maximum length of measure unit
const UNIT_MAX_LENGTH: usize = 63;

// validation error strings
pub(crate) const NAME_EMPTY: &str = "name must be non-empty";
pub(crate) const NAME_LENGTH: &str = "name must be at most 255 characters";
pub(crate) const NAME_NOT_PRINTABLE: &str = "name must contain only printable ASCII characters";
pub(crate) const VALUE_LENGTH: &str = "tag value must be at most 255 characters";
pub(crate) const VALUE_NOT_PRINTABLE: &str =
    "tag value must contain only printable ASCII characters";
pub(crate) const UNIT_LENGTH: &str = "unit must be less than 64 characters";
pub(crate) const UNIT_INVALID_CHAR: &str = "characters in unit must be ASCII";

pub(crate) fn is_printable(s: &str) -> bool {
    s.bytes().all(|b| (b' '..=b'~').contains(&b))
}

/// Validates a measure, view or tag key name.
pub(crate) fn validate_name(name: &str) -> StatsResult<()> {
    let reason = if name.is_empty() {
        NAME_EMPTY
    } else if name.len() > NAME_MAX_LENGTH {
        NAME_LENGTH
    } else if !is_printable(name) {
        NAME_NOT_PRINTABLE
    } else {
        return Ok(());
    };
    Err(StatsError::InvalidName {
        name: name.to_owned(),
        reason,
    })
}

/// Returns the broken rule if `value` can't be used as a tag value.
pub(crate) fn tag_value_error(value: &str) -> Option<&'static str> {
    if value.len() > NAME_MAX_LENGTH {
        Some(VALUE_LENGTH)
    } else if !is_printable(value) {
        Some(VALUE_NOT_PRINTABLE)
    } else {
        None
    }
}

pub(crate) fn validate_unit(unit: &str) -> StatsResult<()> {
    let reason = if unit.len() > UNIT_MAX_LENGTH {
        UNIT_LENGTH
    } else if unit.contains(|c: char| !c.is_ascii()) {
        UNIT_INVALID_CHAR
    } else {
        return Ok(());
    };
    Err(StatsError::InvalidUnit {
        unit: unit.to_owned(),
        reason,
    })
}
