//! Property interpolation
//!
//! Step fields that depend on request properties are written as templates
//! with `${name}` placeholders and rendered against the resolved property
//! map at plan time. A placeholder without a matching property is a hard
//! error rather than an empty substitution.

use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::core::properties::PropertyValue;
use crate::error::TemplateError;

/// A string with `${name}` placeholders
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Template(String);

impl Template {
    /// Wrap a template string
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    /// The raw, unrendered template text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Render the template against a property map.
    ///
    /// Only string-valued properties can be interpolated; referencing a
    /// command-list property is an error.
    pub fn render(&self, props: &BTreeMap<String, PropertyValue>) -> Result<String, TemplateError> {
        let re = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("valid placeholder regex");

        let mut last_end = 0;
        let mut output = String::new();

        for cap in re.captures_iter(&self.0) {
            let full_match = cap.get(0).expect("capture 0 always present");
            let name = &cap[1];

            output.push_str(&self.0[last_end..full_match.start()]);

            let value = props.get(name).ok_or_else(|| TemplateError::UnknownProperty {
                name: name.to_string(),
                template: self.0.clone(),
            })?;
            let text = value.as_str().ok_or_else(|| TemplateError::NotAString {
                name: name.to_string(),
                template: self.0.clone(),
            })?;
            output.push_str(text);

            last_end = full_match.end();
        }

        output.push_str(&self.0[last_end..]);
        Ok(output)
    }
}

impl From<&str> for Template {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl std::fmt::Display for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn props(pairs: &[(&str, &str)]) -> BTreeMap<String, PropertyValue> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), PropertyValue::from(*v)))
            .collect()
    }

    #[test]
    fn test_render_single_placeholder() {
        let template = Template::new("build/${project}");
        let rendered = template.render(&props(&[("project", "Game")])).unwrap();
        assert_eq!(rendered, "build/Game");
    }

    #[test]
    fn test_render_multiple_placeholders() {
        let template = Template::new("build/${target}_${config}");
        let rendered = template
            .render(&props(&[("target", "win_x64"), ("config", "Release")]))
            .unwrap();
        assert_eq!(rendered, "build/win_x64_Release");
    }

    #[test]
    fn test_render_without_placeholders_is_identity() {
        let template = Template::new("build/ce_sdks");
        let rendered = template.render(&BTreeMap::new()).unwrap();
        assert_eq!(rendered, "build/ce_sdks");
    }

    #[test]
    fn test_unknown_property_is_an_error() {
        let template = Template::new("git@${repository}");
        let err = template.render(&BTreeMap::new()).unwrap_err();
        assert_eq!(
            err,
            TemplateError::UnknownProperty {
                name: "repository".to_string(),
                template: "git@${repository}".to_string(),
            }
        );
    }

    #[test]
    fn test_command_list_property_cannot_be_interpolated() {
        let mut map = BTreeMap::new();
        map.insert(
            "mk_sdklink_cmd".to_string(),
            PropertyValue::Argv(vec!["ln".to_string(), "-s".to_string()]),
        );
        let template = Template::new("run ${mk_sdklink_cmd}");
        let err = template.render(&map).unwrap_err();
        assert!(matches!(err, TemplateError::NotAString { .. }));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Text without placeholders renders to itself
        #[test]
        fn prop_plain_text_is_untouched(text in "[a-zA-Z0-9 ./_-]{0,40}") {
            let template = Template::new(text.clone());
            prop_assert_eq!(template.render(&BTreeMap::new()).unwrap(), text);
        }

        /// A defined placeholder is replaced by exactly its value
        #[test]
        fn prop_placeholder_substitution(
            name in "[a-z_][a-z0-9_]{0,10}",
            value in "[a-zA-Z0-9/._-]{0,20}",
        ) {
            let template = Template::new(format!("pre/${{{name}}}/post"));
            let mut map = BTreeMap::new();
            map.insert(name, PropertyValue::from(value.clone()));
            prop_assert_eq!(template.render(&map).unwrap(), format!("pre/{value}/post"));
        }
    }
}
