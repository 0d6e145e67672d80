//! README generation from composable markdown sections

use crate::selection::{Selection, WorkspaceLayout};

/// A titled block of the generated README
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub lines: Vec<String>,
    pub heading_level: usize,
}

impl Section {
    /// Section at the default heading level (2)
    pub fn new(title: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            title: title.into(),
            lines,
            heading_level: 2,
        }
    }
}

/// Render a markdown document: a level-1 heading for the title, then each
/// section in order. Pure function, no I/O.
pub fn compose(title: &str, sections: &[Section]) -> String {
    let mut out = format!("# {}\n", title);

    for section in sections {
        out.push('\n');
        out.push_str(&"#".repeat(section.heading_level));
        out.push(' ');
        out.push_str(&section.title);
        out.push('\n');
        out.push('\n');
        for line in &section.lines {
            out.push_str(line);
            out.push('\n');
        }
    }

    out
}

/// Build the README sections for a scaffolded project: a fixed intro plus
/// one section per enabled capability.
pub fn project_sections(layout: &WorkspaceLayout, selection: &Selection) -> Vec<Section> {
    let mut sections = vec![Section::new(
        "About this project",
        vec![
            "This monorepo was generated with `create-monorepo`.".to_string(),
            format!(
                "Sub-packages live under the `{}/` and `{}/` workspaces; the root npm scripts orchestrate them.",
                layout.main, layout.secondary
            ),
        ],
    )];

    if let Some(backend) = selection.backend {
        sections.push(Section::new(
            format!("Backend ({})", backend),
            vec![
                format!("The {} backend lives in `{}/backend`. Start it with:", backend, layout.main),
                "```sh".to_string(),
                "npm run start:backend".to_string(),
                "```".to_string(),
                format!(
                    "See [`{main}/backend`]({main}/backend) for framework-specific docs.",
                    main = layout.main
                ),
            ],
        ));
    }

    if let Some(frontend) = selection.frontend {
        sections.push(Section::new(
            format!("Frontend ({})", frontend),
            vec![
                format!(
                    "The {} frontend lives in `{}/frontend` (scaffolded with Vite). Start it with:",
                    frontend, layout.main
                ),
                "```sh".to_string(),
                "npm run start:frontend".to_string(),
                "```".to_string(),
                format!(
                    "See [`{main}/frontend`]({main}/frontend) for the generated app.",
                    main = layout.main
                ),
            ],
        ));
    }

    if selection.tokens_helper {
        sections.push(Section::new(
            "Design Tokens Helper",
            vec![
                format!(
                    "A style-dictionary tokens package lives in `{}/tokens`. Rebuild the tokens with:",
                    layout.secondary
                ),
                "```sh".to_string(),
                "npm run build:tokens".to_string(),
                "```".to_string(),
                format!(
                    "See [`{secondary}/tokens`]({secondary}/tokens) for the token sources.",
                    secondary = layout.secondary
                ),
            ],
        ));
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::{BackendKind, FrontendKind};

    fn section_titles(sections: &[Section]) -> Vec<&str> {
        sections.iter().map(|s| s.title.as_str()).collect()
    }

    #[test]
    fn test_compose_is_deterministic() {
        let sections = vec![
            Section::new("One", vec!["first".to_string()]),
            Section::new("Two", vec!["second".to_string()]),
        ];
        assert_eq!(compose("Doc", &sections), compose("Doc", &sections));
    }

    #[test]
    fn test_compose_renders_headings_in_order() {
        let sections = vec![
            Section::new("One", vec!["first".to_string()]),
            Section {
                title: "Deep".to_string(),
                lines: vec!["nested".to_string()],
                heading_level: 3,
            },
        ];
        let doc = compose("Doc", &sections);
        assert!(doc.starts_with("# Doc\n"));
        let one = doc.find("\n## One\n").unwrap();
        let deep = doc.find("\n### Deep\n").unwrap();
        assert!(one < deep);
        assert!(doc.contains("first\n"));
        assert!(doc.contains("nested\n"));
    }

    #[test]
    fn test_helper_only_selection_yields_exactly_two_sections() {
        let selection = Selection {
            backend: None,
            frontend: None,
            tokens_helper: true,
            tooling: false,
        };
        let sections = project_sections(&WorkspaceLayout::default(), &selection);
        assert_eq!(
            section_titles(&sections),
            ["About this project", "Design Tokens Helper"]
        );
    }

    #[test]
    fn test_each_capability_adds_exactly_its_section() {
        let layout = WorkspaceLayout::default();
        let full = Selection {
            backend: Some(BackendKind::Django),
            frontend: Some(FrontendKind::React),
            tokens_helper: true,
            tooling: true,
        };
        assert_eq!(
            section_titles(&project_sections(&layout, &full)),
            [
                "About this project",
                "Backend (django)",
                "Frontend (react)",
                "Design Tokens Helper"
            ]
        );

        let no_frontend = Selection {
            frontend: None,
            ..full.clone()
        };
        assert_eq!(
            section_titles(&project_sections(&layout, &no_frontend)),
            ["About this project", "Backend (django)", "Design Tokens Helper"]
        );
    }

    #[test]
    fn test_sections_link_to_workspace_dirs() {
        let layout = WorkspaceLayout {
            main: "packages".to_string(),
            secondary: "libs".to_string(),
        };
        let selection = Selection {
            backend: Some(BackendKind::Laravel),
            frontend: None,
            tokens_helper: true,
            tooling: false,
        };
        let doc = compose("proj", &project_sections(&layout, &selection));
        assert!(doc.contains("(packages/backend)"));
        assert!(doc.contains("(libs/tokens)"));
    }
}
