//! Document info page: title block, contact and license, description,
//! security schemes.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};

use super::{field, heading};
use crate::core::document::{Document, OAuthFlow, SecurityScheme};
use crate::tui::markdown;
use crate::tui::theme::Theme;

pub fn info_text(doc: &Document, theme: &Theme) -> Text<'static> {
    let info = &doc.info;
    let mut lines = vec![Line::from(vec![
        Span::styled(
            info.title.clone(),
            theme.accent_style().add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {}", info.version), Style::default().fg(Color::DarkGray)),
    ])];

    lines.extend(field("OpenAPI", &info.openapi_version));
    lines.extend(field("Source", &doc.meta.full_path));
    lines.extend(field("Terms of service", &info.terms_of_service));

    let contact = join_non_empty(&[&info.contact_name, &info.contact_email, &info.contact_url]);
    lines.extend(field("Contact", &contact));

    let license = match (info.license_name.is_empty(), info.license_url.is_empty()) {
        (false, false) => format!("{} ({})", info.license_name, info.license_url),
        (false, true) => info.license_name.clone(),
        (true, _) => info.license_url.clone(),
    };
    lines.extend(field("License", &license));

    let docs = join_non_empty(&[&info.external_docs_description, &info.external_docs_url]);
    lines.extend(field("External docs", &docs));

    lines.extend(field(
        "Operations",
        &format!("{} in {} tags", doc.route_count(), doc.non_empty_tags().count()),
    ));

    if !info.description.trim().is_empty() {
        lines.push(Line::default());
        lines.extend(markdown::render(&info.description, Color::Reset, theme.accent).lines);
    }

    if !doc.security_schemes.is_empty() {
        lines.push(Line::default());
        lines.push(heading("Security schemes", theme));
        for scheme in &doc.security_schemes {
            lines.extend(scheme_lines(scheme, theme));
        }
    }

    Text::from(lines)
}

fn join_non_empty(parts: &[&String]) -> String {
    parts
        .iter()
        .filter(|p| !p.is_empty())
        .map(|p| p.as_str())
        .collect::<Vec<_>>()
        .join(" · ")
}

fn scheme_lines(scheme: &SecurityScheme, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(vec![
        Span::raw("  "),
        Span::styled(scheme.key.clone(), Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(format!("  {}", scheme.scheme_type), theme.accent_style()),
    ])];

    let dim = Style::default().fg(Color::DarkGray);
    let mut detail = |label: &str, value: &str| {
        if !value.is_empty() {
            lines.push(Line::from(Span::styled(format!("    {label}: {value}"), dim)));
        }
    };
    detail("description", &scheme.description);
    detail("name", &scheme.name);
    detail("in", &scheme.location);
    detail("scheme", &scheme.scheme);
    detail("bearer format", &scheme.bearer_format);
    detail("OpenID Connect URL", &scheme.open_id_connect_url);

    if let Some(flows) = &scheme.flows {
        let named = [
            ("implicit", &flows.implicit),
            ("password", &flows.password),
            ("client credentials", &flows.client_credentials),
            ("authorization code", &flows.authorization_code),
        ];
        for (name, flow) in named {
            if let Some(flow) = flow {
                lines.extend(flow_lines(name, flow));
            }
        }
    }
    lines
}

fn flow_lines(name: &str, flow: &OAuthFlow) -> Vec<Line<'static>> {
    let dim = Style::default().fg(Color::DarkGray);
    let mut lines = vec![Line::from(Span::raw(format!("    {name} flow")))];
    for (label, url) in [
        ("authorization URL", &flow.authorization_url),
        ("token URL", &flow.token_url),
        ("refresh URL", &flow.refresh_url),
    ] {
        if !url.is_empty() {
            lines.push(Line::from(Span::styled(format!("      {label}: {url}"), dim)));
        }
    }
    for scope in &flow.scopes {
        lines.push(Line::from(vec![
            Span::raw(format!("      {}", scope.name)),
            Span::styled(format!("  {}", scope.detail), dim),
        ]));
    }
    lines
}
