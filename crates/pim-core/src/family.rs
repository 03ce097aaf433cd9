use std::sync::Arc;

use crate::attribute::Attribute;
use crate::channel::Channel;

/// "Is `attribute` required on `channel`" for one family.
///
/// Attribute and channel are shared catalog references, not owned.
#[derive(Debug, Clone)]
pub struct AttributeRequirement {
    pub attribute: Arc<Attribute>,
    pub channel: Arc<Channel>,
    pub required: bool,
}

impl AttributeRequirement {
    #[must_use]
    pub fn attribute_code(&self) -> &str {
        &self.attribute.code
    }

    #[must_use]
    pub fn channel_code(&self) -> &str {
        &self.channel.code
    }
}

#[derive(Debug, Clone)]
pub struct Family {
    pub code: String,
    requirements: Vec<AttributeRequirement>,
}

impl Family {
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            requirements: Vec::new(),
        }
    }

    /// Adds or replaces the requirement for `(attribute, channel)`.
    pub fn set_requirement(
        &mut self,
        attribute: Arc<Attribute>,
        channel: Arc<Channel>,
        required: bool,
    ) {
        if let Some(existing) = self.requirements.iter_mut().find(|r| {
            r.attribute.code == attribute.code && r.channel.code == channel.code
        }) {
            existing.required = required;
            return;
        }

        self.requirements.push(AttributeRequirement {
            attribute,
            channel,
            required,
        });
    }

    #[must_use]
    pub fn with_requirement(
        mut self,
        attribute: Arc<Attribute>,
        channel: Arc<Channel>,
        required: bool,
    ) -> Self {
        self.set_requirement(attribute, channel, required);
        self
    }

    #[must_use]
    pub fn requirements(&self) -> &[AttributeRequirement] {
        &self.requirements
    }

    /// Codes of the attributes required on `channel_code`, in declaration order.
    pub fn required_attribute_codes<'a>(
        &'a self,
        channel_code: &'a str,
    ) -> impl Iterator<Item = &'a str> + 'a {
        self.requirements
            .iter()
            .filter(move |r| r.required && r.channel.code == channel_code)
            .map(AttributeRequirement::attribute_code)
    }
}
