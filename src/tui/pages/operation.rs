//! # Operation Page
//!
//! Everything about one route, as a single scrollable text:
//!
//! ```text
//! GET /pets/{petId}
//! Info for a pet
//!
//! Parameters
//!   path
//!     petId*  integer(int64)  1 <= n
//! Responses
//!   200  OK
//!     application/json
//!       Pet  object
//!         id*  integer(int64)
//!         tags  array of Tag
//!           name  string
//! Security
//!   api_key
//! ```
//!
//! Schemas are drawn as indented trees: `allOf` is merged before display,
//! `oneOf` alternatives are numbered, and a circular `$ref` stops the
//! descent with its component name.

use std::borrow::Cow;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};

use super::heading;
use crate::core::document::{
    Header, MediaTypeContent, Parameter, RequestBody, Response, Route, SecurityRequirement,
};
use crate::core::schema::{
    Schema, constraint_strings, merge_all_of, type_string, value_string, values_string,
};
use crate::tui::markdown;
use crate::tui::theme::Theme;

/// Nesting limit for schema trees. Cycles are already cut by the loader;
/// this only bounds very deep acyclic documents.
const MAX_SCHEMA_DEPTH: usize = 16;

pub fn operation_text(operation_id: &str, route: Option<&Route>, theme: &Theme) -> Text<'static> {
    let Some(route) = route else {
        return placeholder(operation_id);
    };

    let mut lines = vec![title_line(route, theme)];
    if !route.summary.is_empty() {
        lines.push(Line::from(Span::styled(
            route.summary.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
    }
    if !route.tags.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("tags: {}", route.tags.join(", ")),
            dim(),
        )));
    }
    if !route.description.trim().is_empty() {
        lines.push(Line::default());
        lines.extend(markdown_lines(&route.description, 0, theme));
    }

    if route.has_parameters() {
        lines.push(Line::default());
        lines.push(heading("Parameters", theme));
        let groups = [
            ("path", &route.path_parameters),
            ("query", &route.query_parameters),
            ("header", &route.header_parameters),
            ("cookie", &route.cookie_parameters),
        ];
        for (label, params) in groups {
            if params.is_empty() {
                continue;
            }
            lines.push(Line::from(Span::styled(format!("  {label}"), theme.accent_style())));
            for param in params {
                parameter_lines(param, theme, &mut lines);
            }
        }
    }

    if let Some(body) = &route.request_body {
        lines.push(Line::default());
        request_body_lines(body, theme, &mut lines);
    }

    if !route.responses.is_empty() {
        lines.push(Line::default());
        lines.push(heading("Responses", theme));
        for response in &route.responses {
            response_lines(response, theme, &mut lines);
        }
    }

    if let Some(security) = &route.security {
        lines.push(Line::default());
        lines.push(heading("Security", theme));
        lines.extend(security_lines(security));
    }

    Text::from(lines)
}

fn placeholder(operation_id: &str) -> Text<'static> {
    let message = if operation_id.is_empty() {
        "This operation has no operationId and cannot be looked up.".to_string()
    } else {
        format!("No operation with id \"{operation_id}\".")
    };
    Text::from(vec![
        Line::from(Span::styled(message, Style::default().fg(Color::Yellow))),
        Line::from(Span::styled("Press Backspace to go back.", dim())),
    ])
}

fn dim() -> Style {
    Style::default().fg(Color::DarkGray)
}

fn pad(indent: usize) -> Span<'static> {
    Span::raw(" ".repeat(indent))
}

fn title_line(route: &Route, theme: &Theme) -> Line<'static> {
    let path_style = if route.deprecated {
        theme.deprecated_style()
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let mut spans = vec![
        Span::styled(route.method.clone(), theme.method_style(&route.method)),
        Span::raw(" "),
        Span::styled(route.path.clone(), path_style),
    ];
    if route.deprecated {
        spans.push(Span::styled(
            "  DEPRECATED",
            Style::default().fg(theme.deprecated).add_modifier(Modifier::BOLD),
        ));
    }
    Line::from(spans)
}

/// Markdown rendered and shifted right by `indent` columns.
fn markdown_lines(text: &str, indent: usize, theme: &Theme) -> Vec<Line<'static>> {
    markdown::render(text, Color::Reset, theme.accent)
        .lines
        .into_iter()
        .map(|mut line| {
            if indent > 0 {
                line.spans.insert(0, pad(indent));
            }
            line
        })
        .collect()
}

/// Plain, dimmed description lines for schema nodes.
fn description_lines(text: &str, indent: usize, out: &mut Vec<Line<'static>>) {
    let text = text.trim_end();
    if text.is_empty() {
        return;
    }
    let indented = textwrap::indent(text, &" ".repeat(indent));
    out.extend(
        indented
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), dim()))),
    );
}

fn parameter_lines(param: &Parameter, theme: &Theme, out: &mut Vec<Line<'static>>) {
    let schema = param.schema.as_ref().map(effective);
    out.push(property_line(
        4,
        &param.name,
        param.required,
        param.deprecated,
        schema.as_deref(),
        theme,
    ));
    if !param.description.trim().is_empty() {
        out.extend(markdown_lines(&param.description, 6, theme));
    }
    if let Some(schema) = schema.as_deref() {
        schema_body(schema, 6, theme, out, 0);
    }
}

fn request_body_lines(body: &RequestBody, theme: &Theme, out: &mut Vec<Line<'static>>) {
    let mut title = heading("Request body", theme);
    if body.required {
        title.push_span(Span::styled(" (required)", dim()));
    }
    out.push(title);
    if !body.description.trim().is_empty() {
        out.extend(markdown_lines(&body.description, 2, theme));
    }
    for content in &body.contents {
        content_lines(content, 2, theme, out);
    }
}

fn response_lines(response: &Response, theme: &Theme, out: &mut Vec<Line<'static>>) {
    let mut line = Line::from(vec![
        pad(2),
        Span::styled(response.status_code.clone(), status_style(&response.status_code)),
    ]);
    let mut description = markdown_lines(&response.description, 0, theme).into_iter();
    if let Some(first) = description.next() {
        line.push_span(Span::raw("  "));
        line.spans.extend(first.spans);
    }
    out.push(line);
    out.extend(description.map(|mut l| {
        l.spans.insert(0, pad(4));
        l
    }));

    if !response.headers.is_empty() {
        out.push(Line::from(vec![pad(4), Span::styled("headers", theme.accent_style())]));
        for header in &response.headers {
            header_lines(header, theme, out);
        }
    }
    for content in &response.contents {
        content_lines(content, 4, theme, out);
    }
}

fn header_lines(header: &Header, theme: &Theme, out: &mut Vec<Line<'static>>) {
    let schema = header.schema.as_ref().map(effective);
    out.push(property_line(
        6,
        &header.name,
        header.required,
        header.deprecated,
        schema.as_deref(),
        theme,
    ));
    description_lines(&header.description, 8, out);
}

fn content_lines(
    content: &MediaTypeContent,
    indent: usize,
    theme: &Theme,
    out: &mut Vec<Line<'static>>,
) {
    out.push(Line::from(vec![
        pad(indent),
        Span::styled(content.media_type.clone(), theme.accent_style()),
    ]));
    let Some(schema) = content.schema.as_ref() else {
        return;
    };
    let schema = effective(schema);
    let summary = summary_spans(&schema, theme);
    if !summary.is_empty() {
        let mut root = vec![pad(indent + 2)];
        root.extend(summary);
        out.push(Line::from(root));
    }
    description_lines(&schema.description, indent + 2, out);
    schema_body(&schema, indent + 4, theme, out, 0);
}

fn security_lines(requirements: &[SecurityRequirement]) -> Vec<Line<'static>> {
    if requirements.is_empty() {
        return vec![Line::from(vec![pad(2), Span::styled("none", dim())])];
    }
    // Each requirement is an alternative; schemes inside one apply together
    requirements
        .iter()
        .map(|req| {
            let mut spans = vec![pad(2)];
            for (i, scheme) in req.schemes.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::styled(" + ", dim()));
                }
                spans.push(Span::styled(
                    scheme.key.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ));
                if !scheme.scopes.is_empty() {
                    spans.push(Span::styled(format!(" [{}]", scheme.scopes.join(", ")), dim()));
                }
            }
            Line::from(spans)
        })
        .collect()
}

fn status_style(code: &str) -> Style {
    let color = match code.as_bytes().first() {
        Some(b'1') => Color::Blue,
        Some(b'2') => Color::Green,
        Some(b'3') => Color::Cyan,
        Some(b'4') => Color::Yellow,
        Some(b'5') => Color::Red,
        _ => Color::Gray,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// The schema as displayed: `allOf` merged, keeping the outer node's own
/// description, flags and properties.
fn effective(schema: &Schema) -> Cow<'_, Schema> {
    let Some(mut merged) = merge_all_of(schema) else {
        return Cow::Borrowed(schema);
    };
    if merged.schema_type.is_empty() {
        merged.schema_type = schema.schema_type.clone();
    }
    if merged.description.is_empty() {
        merged.description = schema.description.clone();
    }
    if merged.ref_name.is_none() {
        merged.ref_name = schema.ref_name.clone();
    }
    merged.nullable |= schema.nullable;
    merged.deprecated |= schema.deprecated;
    merged.read_only |= schema.read_only;
    merged.write_only |= schema.write_only;
    for (name, prop) in &schema.properties {
        if merged.property(name).is_none() {
            merged.properties.push((name.clone(), prop.clone()));
        }
    }
    merged.required.extend(schema.required.iter().cloned());
    merged.one_of.extend(schema.one_of.iter().cloned());
    if merged.items.is_none() {
        merged.items = schema.items.clone();
    }
    Cow::Owned(merged)
}

/// `Pet  object  nullable  enum [a, b]  default a`
fn summary_spans(schema: &Schema, theme: &Theme) -> Vec<Span<'static>> {
    let mut label = type_string(schema);
    if label.is_empty() && !schema.properties.is_empty() {
        label = "object".to_string();
    }

    let mut spans = Vec::new();
    if let Some(name) = &schema.ref_name {
        if !schema.is_stub() && *name != label {
            spans.push(Span::styled(
                format!("{name}  "),
                Style::default().add_modifier(Modifier::ITALIC),
            ));
        }
    }
    if !label.is_empty() {
        spans.push(Span::styled(label, theme.accent_style()));
    }
    if schema.circular {
        spans.push(Span::styled(" (circular)", dim()));
    } else if schema.truncated {
        spans.push(Span::styled(" (not expanded)", dim()));
    }
    if schema.nullable {
        spans.push(Span::styled("  nullable", dim()));
    }
    for constraint in constraint_strings(schema) {
        spans.push(Span::styled(format!("  {constraint}"), dim()));
    }
    if !schema.enum_values.is_empty() {
        spans.push(Span::styled(
            format!("  enum {}", values_string(&schema.enum_values)),
            dim(),
        ));
    }
    if let Some(default) = &schema.default {
        spans.push(Span::styled(format!("  default {}", value_string(default)), dim()));
    }
    if schema.read_only {
        spans.push(Span::styled("  read-only", dim()));
    }
    if schema.write_only {
        spans.push(Span::styled("  write-only", dim()));
    }
    if schema.deprecated {
        spans.push(Span::styled("  deprecated", Style::default().fg(theme.deprecated)));
    }
    spans
}

fn property_line(
    indent: usize,
    name: &str,
    required: bool,
    deprecated: bool,
    schema: Option<&Schema>,
    theme: &Theme,
) -> Line<'static> {
    let name_style = if deprecated || schema.is_some_and(|s| s.deprecated) {
        theme.deprecated_style()
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let mut spans = vec![pad(indent), Span::styled(name.to_string(), name_style)];
    if required {
        spans.push(Span::styled("*", Style::default().fg(Color::Red)));
    }
    if let Some(schema) = schema {
        spans.push(Span::raw("  "));
        spans.extend(summary_spans(schema, theme));
    }
    Line::from(spans)
}

/// Children of an already-effective schema: properties, array items and
/// `oneOf` alternatives.
fn schema_body(
    schema: &Schema,
    indent: usize,
    theme: &Theme,
    out: &mut Vec<Line<'static>>,
    depth: usize,
) {
    if depth >= MAX_SCHEMA_DEPTH || schema.is_stub() {
        return;
    }

    for (name, prop) in &schema.properties {
        let prop = effective(prop);
        out.push(property_line(
            indent,
            name,
            schema.is_required(name),
            false,
            Some(&prop),
            theme,
        ));
        description_lines(&prop.description, indent + 2, out);
        schema_body(&prop, indent + 2, theme, out, depth + 1);
    }

    if let Some(items) = schema.items.as_deref() {
        let items = effective(items);
        schema_body(&items, indent, theme, out, depth + 1);
    }

    if !schema.one_of.is_empty() {
        out.push(Line::from(vec![pad(indent), Span::styled("one of:", dim())]));
        for (i, alt) in schema.one_of.iter().enumerate() {
            let alt = effective(alt);
            let mut spans = vec![pad(indent + 2), Span::styled(format!("{}. ", i + 1), dim())];
            spans.extend(summary_spans(&alt, theme));
            out.push(Line::from(spans));
            description_lines(&alt.description, indent + 5, out);
            schema_body(&alt, indent + 5, theme, out, depth + 1);
        }
    }
}
