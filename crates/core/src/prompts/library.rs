use crate::init::templates::{get_template, list_templates};
use gray_matter::engine::YAML;
use gray_matter::Matter;
use ng_protocol::prompt_models::{PromptTemplate, Stage};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PromptError {
    #[error("No prompt template registered for stage '{0}'")]
    Missing(&'static str),
}

/// Parse a Markdown prompt file with YAML front matter.
///
/// The front matter supplies `name`, `stage` and `description`; the body
/// becomes the template text.
pub fn parse_prompt_markdown(content: &str) -> Result<PromptTemplate, String> {
    let matter = Matter::<YAML>::new();
    let result = matter.parse(content);

    let mut template: PromptTemplate = result
        .data
        .ok_or_else(|| "Missing YAML front matter".to_string())?
        .deserialize()
        .map_err(|e| format!("Failed to deserialize front matter: {}", e))?;

    template.body = result.content.trim().to_string();
    Ok(template)
}

/// Substitute `{{name}}` placeholders. Unknown names render as empty strings.
pub fn render_template(body: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(body.len());
    let mut rest = body;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];

        match after_open.find("}}") {
            Some(end) => {
                let key = after_open[..end].trim();
                let value = vars
                    .iter()
                    .find(|(name, _)| *name == key)
                    .map(|(_, value)| *value)
                    .unwrap_or("");
                out.push_str(value);
                rest = &after_open[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}

/// One template per stage: embedded defaults, then overrides.
#[derive(Debug, Clone)]
pub struct PromptLibrary {
    templates: HashMap<Stage, PromptTemplate>,
}

impl PromptLibrary {
    /// Library with only the embedded defaults.
    pub fn embedded() -> Self {
        let mut templates = HashMap::new();

        for path in list_templates("prompts/") {
            let Some(content) = get_template(&path) else {
                continue;
            };
            match parse_prompt_markdown(&content) {
                Ok(template) => {
                    templates.insert(template.stage, template);
                }
                Err(reason) => {
                    tracing::warn!(path = %path, %reason, "skipping embedded prompt");
                }
            }
        }

        Self { templates }
    }

    /// Embedded defaults, with each override replacing the default for its stage.
    pub fn with_overrides(overrides: &[PromptTemplate]) -> Self {
        let mut library = Self::embedded();
        for template in overrides {
            tracing::debug!(stage = template.stage.name(), name = %template.name, "prompt override");
            library.templates.insert(template.stage, template.clone());
        }
        library
    }

    pub fn template(&self, stage: Stage) -> Option<&PromptTemplate> {
        self.templates.get(&stage)
    }

    /// Render the template for `stage` with the given placeholder values.
    pub fn render(&self, stage: Stage, vars: &[(&str, &str)]) -> Result<String, PromptError> {
        let template = self
            .template(stage)
            .ok_or(PromptError::Missing(stage.name()))?;
        Ok(render_template(&template.body, vars))
    }
}

impl Default for PromptLibrary {
    fn default() -> Self {
        Self::embedded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_library_covers_every_stage() {
        let library = PromptLibrary::embedded();
        for stage in Stage::ALL {
            assert!(
                library.template(stage).is_some(),
                "missing embedded prompt for {}",
                stage.name()
            );
        }
    }

    #[test]
    fn test_render_substitutes_placeholders() {
        let rendered = render_template(
            "Request: \"{{request}}\" Context: {{ context }}",
            &[("request", "backup"), ("context", "{}")],
        );
        assert_eq!(rendered, "Request: \"backup\" Context: {}");
    }

    #[test]
    fn test_render_missing_value_is_empty() {
        let rendered = render_template("a{{missing}}b", &[]);
        assert_eq!(rendered, "ab");
    }

    #[test]
    fn test_render_unclosed_placeholder_is_literal() {
        let rendered = render_template("keep {{this", &[("this", "x")]);
        assert_eq!(rendered, "keep {{this");
    }

    #[test]
    fn test_intent_prompt_contains_query() {
        let library = PromptLibrary::embedded();
        let prompt = library
            .render(Stage::IntentExtraction, &[("query", "check Core-Switch-01")])
            .unwrap();
        assert!(prompt.contains("User Query: \"check Core-Switch-01\""));
    }

    #[test]
    fn test_override_replaces_default() {
        let custom = PromptTemplate {
            name: "custom".to_string(),
            stage: Stage::LogAnalysis,
            description: String::new(),
            body: "Only: {{logs}}".to_string(),
        };
        let library = PromptLibrary::with_overrides(&[custom]);

        let prompt = library.render(Stage::LogAnalysis, &[("logs", "%LINK-3")]).unwrap();
        assert_eq!(prompt, "Only: %LINK-3");
        assert_eq!(library.template(Stage::LogAnalysis).map(|t| t.name.as_str()), Some("custom"));
        assert!(library.template(Stage::SecurityAudit).is_some());
    }

    #[test]
    fn test_parse_prompt_markdown() {
        let content = "---\nname: audit\nstage: security-audit\n---\n\nAudit {{config}}\n";
        let template = parse_prompt_markdown(content).unwrap();
        assert_eq!(template.name, "audit");
        assert_eq!(template.stage, Stage::SecurityAudit);
        assert_eq!(template.description, "");
        assert_eq!(template.body, "Audit {{config}}");
    }

    #[test]
    fn test_parse_prompt_markdown_without_front_matter() {
        let err = parse_prompt_markdown("plain").unwrap_err();
        assert!(err.contains("Missing YAML front matter"));
    }
}
