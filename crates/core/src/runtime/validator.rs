//! Startup phase of property validation.

use crate::errors::{PropertyProblem, StartupError};
use crate::runtime::resolver::{ConfigValueSource, TypeResolver};
use crate::steps::PropertyTypeMap;

/// Check every property against every type it is injected as.
///
/// All problems are collected before failing, so a single startup attempt
/// reports the complete set of misconfigured properties.
pub fn validate_properties<R, V>(
    properties: &PropertyTypeMap,
    resolver: &R,
    values: &V,
) -> Result<(), StartupError>
where
    R: TypeResolver + ?Sized,
    V: ConfigValueSource + ?Sized,
{
    let mut problems = Vec::new();

    for (property, types) in properties.iter() {
        // an empty value counts as missing
        let raw = values
            .raw_value(property)
            .filter(|value| !value.trim().is_empty());

        for type_name in types {
            let Some(converter) = resolver.resolve(type_name) else {
                problems.push(PropertyProblem::UnknownType {
                    property: property.clone(),
                    type_name: type_name.clone(),
                });
                continue;
            };

            match &raw {
                None => problems.push(PropertyProblem::Missing {
                    property: property.clone(),
                    type_name: type_name.clone(),
                }),
                Some(raw) => {
                    if let Err(message) = converter.convert(raw) {
                        problems.push(PropertyProblem::Conversion {
                            property: property.clone(),
                            type_name: type_name.clone(),
                            message,
                        });
                    }
                }
            }
        }
    }

    if problems.is_empty() {
        tracing::info!("Validated {} config properties", properties.len());
        return Ok(());
    }

    for problem in &problems {
        tracing::error!("{}", problem);
    }
    Err(StartupError::InvalidProperties { problems })
}
