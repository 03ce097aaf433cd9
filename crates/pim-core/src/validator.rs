//! Locale and scope checks against an attribute's declaration.
//!
//! Two levels exist. [`validate_locale`] / [`validate_scope`] are strict and
//! used when a caller addresses a value slot (query filters): a localizable
//! attribute must be given a locale, a scopable one a channel.
//! [`check_value_context`] is the product value invariant, where an absent
//! locale or scope is always allowed.

use thiserror::Error;

use crate::attribute::Attribute;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttributeValidationError {
    #[error("Attribute \"{attribute}\" expects a locale, none given.")]
    LocaleExpected { attribute: String },

    #[error("Attribute \"{attribute}\" does not expect a locale, \"{locale}\" given.")]
    UnexpectedLocale { attribute: String, locale: String },

    #[error(
        "Attribute \"{attribute}\" is locale specific and expects one of the locales \"{}\", \"{locale}\" given.",
        .available.join(", ")
    )]
    LocaleNotAvailable {
        attribute: String,
        locale: String,
        available: Vec<String>,
    },

    #[error("Attribute \"{attribute}\" expects a scope, none given.")]
    ScopeExpected { attribute: String },

    #[error("Attribute \"{attribute}\" does not expect a scope, \"{scope}\" given.")]
    UnexpectedScope { attribute: String, scope: String },
}

/// Strict locale check.
///
/// # Errors
///
/// Returns [`AttributeValidationError`] when a localizable attribute gets no
/// locale, a non-localizable one gets a locale, or a locale-specific one gets
/// a locale outside its set.
pub fn validate_locale(
    attribute: &Attribute,
    locale: Option<&str>,
) -> Result<(), AttributeValidationError> {
    match (attribute.localizable, locale) {
        (true, None) => Err(AttributeValidationError::LocaleExpected {
            attribute: attribute.code.clone(),
        }),
        (false, Some(locale)) => Err(AttributeValidationError::UnexpectedLocale {
            attribute: attribute.code.clone(),
            locale: locale.to_string(),
        }),
        (true, Some(locale)) => check_locale_specific(attribute, locale),
        (false, None) => Ok(()),
    }
}

/// Strict scope check.
///
/// # Errors
///
/// Returns [`AttributeValidationError`] when a scopable attribute gets no
/// scope or a non-scopable one gets a scope.
pub fn validate_scope(
    attribute: &Attribute,
    scope: Option<&str>,
) -> Result<(), AttributeValidationError> {
    match (attribute.scopable, scope) {
        (true, None) => Err(AttributeValidationError::ScopeExpected {
            attribute: attribute.code.clone(),
        }),
        (false, Some(scope)) => Err(AttributeValidationError::UnexpectedScope {
            attribute: attribute.code.clone(),
            scope: scope.to_string(),
        }),
        _ => Ok(()),
    }
}

/// Product value invariant: `None` is always accepted for both dimensions.
///
/// # Errors
///
/// Returns [`AttributeValidationError`] when a scope is set on a
/// non-scopable attribute, a locale on a non-localizable one, or a locale
/// outside a locale-specific attribute's set.
pub fn check_value_context(
    attribute: &Attribute,
    scope: Option<&str>,
    locale: Option<&str>,
) -> Result<(), AttributeValidationError> {
    if let Some(scope) = scope {
        if !attribute.scopable {
            return Err(AttributeValidationError::UnexpectedScope {
                attribute: attribute.code.clone(),
                scope: scope.to_string(),
            });
        }
    }

    if let Some(locale) = locale {
        if !attribute.localizable {
            return Err(AttributeValidationError::UnexpectedLocale {
                attribute: attribute.code.clone(),
                locale: locale.to_string(),
            });
        }
        check_locale_specific(attribute, locale)?;
    }

    Ok(())
}

fn check_locale_specific(
    attribute: &Attribute,
    locale: &str,
) -> Result<(), AttributeValidationError> {
    if attribute.is_locale_specific() && !attribute.has_locale_specific(locale) {
        return Err(AttributeValidationError::LocaleNotAvailable {
            attribute: attribute.code.clone(),
            locale: locale.to_string(),
            available: attribute.available_locales.iter().cloned().collect(),
        });
    }
    Ok(())
}
