//! Team validation

use thiserror::Error;

/// Errors that can occur during team validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TeamValidationError {
    #[error("Team name cannot be empty")]
    EmptyName,

    #[error("Team name cannot exceed {0} characters")]
    NameTooLong(usize),

    #[error("Sport cannot be empty")]
    EmptySport,

    #[error("Sport cannot exceed {0} characters")]
    SportTooLong(usize),

    #[error("Subgroup name cannot be empty")]
    EmptySubgroupName,

    #[error("Subgroup name cannot exceed {0} characters")]
    SubgroupNameTooLong(usize),
}

const MAX_TEAM_NAME_LENGTH: usize = 100;
const MAX_SPORT_LENGTH: usize = 100;
const MAX_SUBGROUP_NAME_LENGTH: usize = 100;

/// Validate a team name
pub fn validate_team_name(name: &str) -> Result<(), TeamValidationError> {
    if name.is_empty() {
        return Err(TeamValidationError::EmptyName);
    }

    if name.len() > MAX_TEAM_NAME_LENGTH {
        return Err(TeamValidationError::NameTooLong(MAX_TEAM_NAME_LENGTH));
    }

    Ok(())
}

/// Validate a sport label
pub fn validate_sport(sport: &str) -> Result<(), TeamValidationError> {
    if sport.is_empty() {
        return Err(TeamValidationError::EmptySport);
    }

    if sport.len() > MAX_SPORT_LENGTH {
        return Err(TeamValidationError::SportTooLong(MAX_SPORT_LENGTH));
    }

    Ok(())
}

/// Validate a subgroup name
pub fn validate_subgroup_name(name: &str) -> Result<(), TeamValidationError> {
    if name.is_empty() {
        return Err(TeamValidationError::EmptySubgroupName);
    }

    if name.len() > MAX_SUBGROUP_NAME_LENGTH {
        return Err(TeamValidationError::SubgroupNameTooLong(
            MAX_SUBGROUP_NAME_LENGTH,
        ));
    }

    Ok(())
}
