//! Placeholder marker parsing for document shells.
//!
//! `{{name}}` markers substitute with HTML escaping, `{{{name}}}` markers
//! substitute verbatim. The reserved `body` outlet may appear at most once.

use std::collections::HashMap;
use std::mem;

use super::types::{Requirement, Segment, Template, TemplateError, TemplateResult, BODY_OUTLET};

/// Builder for compiling a document shell with per-placeholder requirements.
///
/// Placeholders not declared here are optional and default to the empty
/// string when no context value is supplied.
pub struct TemplateBuilder {
    source: String,
    requirements: HashMap<String, Requirement>,
}

impl TemplateBuilder {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            requirements: HashMap::new(),
        }
    }

    /// Declare a placeholder that must resolve at assembly time.
    pub fn mandatory(mut self, name: impl Into<String>) -> Self {
        self.requirements.insert(name.into(), Requirement::Mandatory);
        self
    }

    /// Declare a placeholder as optional (the default for undeclared names).
    pub fn optional(mut self, name: impl Into<String>) -> Self {
        self.requirements.insert(name.into(), Requirement::Optional);
        self
    }

    /// Compile the shell, validating placeholder syntax.
    pub fn build(self) -> TemplateResult<Template> {
        let segments = parse_segments(&self.source)?;

        let outlets = segments
            .iter()
            .filter(|s| matches!(s, Segment::Placeholder { name, .. } if name == BODY_OUTLET))
            .count();
        if outlets > 1 {
            return Err(TemplateError::MalformedTemplate(format!(
                "body outlet {{{{{}}}}} appears {} times, ambiguous injection point",
                BODY_OUTLET, outlets
            )));
        }

        Ok(Template {
            segments,
            requirements: self.requirements,
            source_len: self.source.len(),
        })
    }
}

impl Template {
    /// Compile a shell with every auxiliary placeholder treated as optional.
    pub fn parse(source: impl Into<String>) -> TemplateResult<Template> {
        TemplateBuilder::new(source).build()
    }
}

fn parse_segments(source: &str) -> TemplateResult<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut rest = source;

    while let Some(idx) = rest.find("{{") {
        literal.push_str(&rest[..idx]);
        rest = &rest[idx..];
        let offset = source.len() - rest.len();

        let raw = rest.starts_with("{{{");
        let (open, close) = if raw { ("{{{", "}}}") } else { ("{{", "}}") };
        let after = &rest[open.len()..];

        let Some(end) = after.find(close) else {
            return Err(TemplateError::MalformedTemplate(format!(
                "unterminated placeholder marker at byte offset {}",
                offset
            )));
        };

        let name = validate_name(after[..end].trim(), offset)?;

        if !literal.is_empty() {
            segments.push(Segment::Literal(mem::take(&mut literal)));
        }
        segments.push(Segment::Placeholder {
            name: name.to_string(),
            raw,
        });

        rest = &after[end + close.len()..];
    }

    literal.push_str(rest);
    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }

    Ok(segments)
}

fn validate_name(name: &str, offset: usize) -> TemplateResult<&str> {
    if name.is_empty() {
        return Err(TemplateError::MalformedTemplate(format!(
            "empty placeholder name at byte offset {}",
            offset
        )));
    }
    if !name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(TemplateError::MalformedTemplate(format!(
            "invalid placeholder name {:?} at byte offset {}",
            name, offset
        )));
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_literal_only() {
        let template = Template::parse("<html><body>static</body></html>").unwrap();
        assert_eq!(template.placeholder_count(), 0);
        assert!(!template.has_body_outlet());
    }

    #[test]
    fn test_parse_escaped_and_raw_markers() {
        let template = Template::parse("<title>{{title}}</title>{{{meta}}}").unwrap();

        assert_eq!(
            template.segments,
            vec![
                Segment::Literal("<title>".to_string()),
                Segment::Placeholder {
                    name: "title".to_string(),
                    raw: false,
                },
                Segment::Literal("</title>".to_string()),
                Segment::Placeholder {
                    name: "meta".to_string(),
                    raw: true,
                },
            ]
        );
    }

    #[test]
    fn test_parse_trims_inner_whitespace() {
        let template = Template::parse("{{ title }}").unwrap();
        assert_eq!(template.placeholder_names(), vec!["title"]);
    }

    #[test]
    fn test_parse_unterminated_marker() {
        let err = Template::parse("<head>{{title</head>").unwrap_err();
        assert!(matches!(err, TemplateError::MalformedTemplate(_)));
    }

    #[test]
    fn test_parse_unterminated_raw_marker() {
        // A raw open with only a double close never terminates.
        let err = Template::parse("{{{meta}}").unwrap_err();
        assert!(matches!(err, TemplateError::MalformedTemplate(_)));
    }

    #[test]
    fn test_parse_empty_name() {
        let err = Template::parse("{{}}").unwrap_err();
        assert!(matches!(err, TemplateError::MalformedTemplate(_)));
    }

    #[test]
    fn test_parse_rejects_name_with_spaces() {
        let err = Template::parse("{{not a name}}").unwrap_err();
        assert!(matches!(err, TemplateError::MalformedTemplate(_)));
    }

    #[test]
    fn test_parse_rejects_nested_marker() {
        let err = Template::parse("{{a{{b}}").unwrap_err();
        assert!(matches!(err, TemplateError::MalformedTemplate(_)));
    }

    #[test]
    fn test_parse_duplicate_body_outlet() {
        let err = Template::parse("{{body}}{{body}}").unwrap_err();
        assert!(matches!(err, TemplateError::MalformedTemplate(_)));
    }

    #[test]
    fn test_parse_duplicate_auxiliary_placeholder_is_legal() {
        let template = Template::parse("{{title}} and {{title}}").unwrap();
        assert_eq!(template.placeholder_names(), vec!["title"]);
    }

    #[test]
    fn test_single_braces_are_literal() {
        let template = Template::parse("if (a) { b } else { c }").unwrap();
        assert_eq!(template.placeholder_count(), 0);
    }
}
