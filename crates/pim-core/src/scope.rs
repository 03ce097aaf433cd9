//! Null-as-wildcard matching of values against a channel/locale pair, and the
//! index field-path convention built on the same tokens.
//!
//! A value with no scope applies to every channel, a value with no locale to
//! every locale. In index paths those "any" slots are written with the
//! [`ALL_CHANNELS`] / [`ALL_LOCALES`] sentinels.

use crate::attribute::Attribute;
use crate::value::ProductValue;

pub const ALL_LOCALES: &str = "<all_locales>";
pub const ALL_CHANNELS: &str = "<all_channels>";

/// Whether a value stored for `(value_scope, value_locale)` applies to the
/// `(channel, locale)` pair.
#[must_use]
pub fn applies(
    attribute: &Attribute,
    value_scope: Option<&str>,
    value_locale: Option<&str>,
    channel: &str,
    locale: &str,
) -> bool {
    if value_scope.is_some_and(|scope| scope != channel) {
        return false;
    }

    if value_locale.is_some_and(|l| l != locale) {
        return false;
    }

    !attribute.is_locale_specific() || attribute.has_locale_specific(locale)
}

#[must_use]
pub fn value_applies(value: &ProductValue, channel: &str, locale: &str) -> bool {
    applies(
        value.attribute(),
        value.scope(),
        value.locale(),
        channel,
        locale,
    )
}

#[must_use]
pub fn locale_token(locale: Option<&str>) -> &str {
    locale.unwrap_or(ALL_LOCALES)
}

#[must_use]
pub fn channel_token(channel: Option<&str>) -> &str {
    channel.unwrap_or(ALL_CHANNELS)
}

/// Top-level key of an attribute in the index document: `<code>-<type>`.
#[must_use]
pub fn field_key(attribute_code: &str, type_token: &str) -> String {
    format!("{attribute_code}-{type_token}")
}

/// Full index path:
/// `values.<code>-<type>.<locale_token>.<scope_token>`.
#[must_use]
pub fn field_path(
    attribute_code: &str,
    type_token: &str,
    locale: Option<&str>,
    channel: Option<&str>,
) -> String {
    format!(
        "values.{}.{}.{}",
        field_key(attribute_code, type_token),
        locale_token(locale),
        channel_token(channel)
    )
}
