//! Annotation lookup on schema elements

use crate::config::SunsetConfig;
use crate::error::{SunsetError, SunsetResult};
use crate::sunset::Sunset;
use sunset_schema::{HasDirectives, Schema};

/// Read the sunset annotation attached to `element`
///
/// Only the first instance of the configured directive is considered.
///
/// # Returns
/// `None` when the element carries no such directive
///
/// # Errors
/// `SunsetError::InvalidDirective` when the directive's arguments are rejected
/// by the configured parser
pub fn read_sunset<E>(schema: &Schema, element: &E, config: &SunsetConfig) -> SunsetResult<Option<Sunset>>
where
    E: HasDirectives + ?Sized,
{
    let Some(args) = schema
        .directives(element, config.directive_name())
        .into_iter()
        .next()
    else {
        return Ok(None);
    };

    config
        .parse(args)
        .map(Some)
        .map_err(|source| SunsetError::InvalidDirective {
            directive: config.directive_name().to_string(),
            location: element.describe(),
            source,
        })
}
