//! Single-pass placeholder substitution.

use super::types::{
    RenderContext, RenderedDocument, Requirement, Segment, Template, TemplateError,
    TemplateResult, BODY_OUTLET,
};

impl Template {
    /// Assemble the final document from the body fragment and per-request
    /// context.
    ///
    /// The fragment is inserted verbatim at the body outlet (it is already
    /// rendered markup). Auxiliary placeholders take their context value,
    /// HTML-escaped unless the marker is raw; optional placeholders without
    /// a value resolve to the empty string; a mandatory placeholder without
    /// a value fails with `MissingPlaceholderValue` and no output is
    /// produced.
    ///
    /// Pure function of its inputs: identical inputs produce byte-identical
    /// output. Substituted values are never re-scanned for markers.
    pub fn assemble(
        &self,
        fragment: &str,
        context: &RenderContext,
    ) -> TemplateResult<RenderedDocument> {
        let mut out = String::with_capacity(self.source_len + fragment.len());

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder { name, raw } => {
                    if name == BODY_OUTLET {
                        out.push_str(fragment);
                    } else if let Some(value) = context.get(name) {
                        if *raw {
                            out.push_str(value);
                        } else {
                            push_escaped(&mut out, value);
                        }
                    } else {
                        match self.requirement(name) {
                            Requirement::Optional => {}
                            Requirement::Mandatory => {
                                return Err(TemplateError::MissingPlaceholderValue(
                                    name.clone(),
                                ));
                            }
                        }
                    }
                }
            }
        }

        Ok(RenderedDocument::new(out))
    }
}

/// Escape text for insertion into HTML element or attribute content.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    push_escaped(&mut out, input);
    out
}

fn push_escaped(out: &mut String, input: &str) {
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::TemplateBuilder;

    const SHELL: &str = "<html><head>{{meta}}</head><body>{{body}}</body></html>";

    #[test]
    fn test_assemble_fragment_and_meta() {
        let template = Template::parse(SHELL).unwrap();
        let context = RenderContext::new().with("meta", "");

        let document = template.assemble("<div>Hello</div>", &context).unwrap();
        assert_eq!(
            document.as_str(),
            "<html><head></head><body><div>Hello</div></body></html>"
        );
    }

    #[test]
    fn test_assemble_omitted_optional_resolves_empty() {
        let template = Template::parse(SHELL).unwrap();
        let context = RenderContext::new();

        let document = template.assemble("<div>Hello</div>", &context).unwrap();
        assert_eq!(
            document.as_str(),
            "<html><head></head><body><div>Hello</div></body></html>"
        );
    }

    #[test]
    fn test_assemble_declared_optional_matches_default() {
        let template = TemplateBuilder::new("<p>{{note}}</p>{{body}}")
            .optional("note")
            .build()
            .unwrap();

        let document = template.assemble("", &RenderContext::new()).unwrap();
        assert_eq!(document.as_str(), "<p></p>");
    }

    #[test]
    fn test_assemble_missing_mandatory_fails() {
        let template = TemplateBuilder::new("<title>{{title}}</title>{{body}}")
            .mandatory("title")
            .build()
            .unwrap();

        let err = template
            .assemble("<div>Hello</div>", &RenderContext::new())
            .unwrap_err();
        assert_eq!(
            err,
            TemplateError::MissingPlaceholderValue("title".to_string())
        );
    }

    #[test]
    fn test_assemble_no_placeholders_is_identity() {
        let source = "<html><body>static page</body></html>";
        let template = Template::parse(source).unwrap();

        let context = RenderContext::new().with("anything", "value");
        let document = template.assemble("<div>ignored</div>", &context).unwrap();
        assert_eq!(document.as_str(), source);
    }

    #[test]
    fn test_assemble_is_deterministic() {
        let template = Template::parse(SHELL).unwrap();
        let context = RenderContext::new().with("meta", "<meta charset=\"utf-8\">");

        let first = template.assemble("<p>x</p>", &context).unwrap();
        let second = template.assemble("<p>x</p>", &context).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_assemble_escapes_double_brace_values() {
        let template = Template::parse("<title>{{title}}</title>{{body}}").unwrap();
        let context = RenderContext::new().with("title", "<Hello/>");

        let document = template.assemble("", &context).unwrap();
        assert_eq!(document.as_str(), "<title>&lt;Hello/&gt;</title>");
    }

    #[test]
    fn test_assemble_raw_values_pass_through() {
        let template = Template::parse("<head>{{{meta}}}</head>{{body}}").unwrap();
        let context = RenderContext::new().with("meta", "<meta charset=\"utf-8\">");

        let document = template.assemble("", &context).unwrap();
        assert_eq!(
            document.as_str(),
            "<head><meta charset=\"utf-8\"></head>"
        );
    }

    #[test]
    fn test_assemble_body_is_verbatim() {
        let template = Template::parse("{{body}}").unwrap();
        let fragment = "<script>let x = 1 && 2;</script>";

        let document = template.assemble(fragment, &RenderContext::new()).unwrap();
        assert_eq!(document.as_str(), fragment);
    }

    #[test]
    fn test_assemble_empty_fragment_is_legal() {
        let template = Template::parse(SHELL).unwrap();
        let document = template.assemble("", &RenderContext::new()).unwrap();
        assert_eq!(document.as_str(), "<html><head></head><body></body></html>");
    }

    #[test]
    fn test_assemble_leaves_no_markers() {
        let template = TemplateBuilder::new(
            "<html><head><title>{{title}}</title>{{{meta}}}</head><body>{{body}}</body></html>",
        )
        .mandatory("title")
        .build()
        .unwrap();

        let context = RenderContext::new()
            .with("title", "Home")
            .with("meta", "<meta name=\"x\">");
        let document = template.assemble("<div>ok</div>", &context).unwrap();

        assert!(!document.as_str().contains("{{"));
        assert!(!document.as_str().contains("}}"));
    }

    #[test]
    fn test_assemble_repeated_placeholder_substituted_each_time() {
        let template = Template::parse("{{title}}|{{title}}").unwrap();
        let context = RenderContext::new().with("title", "x");

        let document = template.assemble("", &context).unwrap();
        assert_eq!(document.as_str(), "x|x");
    }

    #[test]
    fn test_assemble_does_not_rescan_substituted_values() {
        let template = Template::parse("{{{value}}}").unwrap();
        let context = RenderContext::new().with("value", "{{title}}");

        let document = template.assemble("", &context).unwrap();
        assert_eq!(document.as_str(), "{{title}}");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<a href=\"x\">&'</a>"),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain text"), "plain text");
    }
}
