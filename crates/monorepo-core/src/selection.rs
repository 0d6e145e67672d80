//! User selection model for a scaffolding run

use std::fmt;
use std::str::FromStr;

/// Names of the two top-level workspace directories.
///
/// Chosen (or defaulted) once at the start of a run, immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceLayout {
    /// Directory grouping the app packages (backend, frontend)
    pub main: String,
    /// Directory grouping helper packages (tokens)
    pub secondary: String,
}

impl Default for WorkspaceLayout {
    fn default() -> Self {
        Self {
            main: "apps".to_string(),
            secondary: "helpers".to_string(),
        }
    }
}

impl WorkspaceLayout {
    /// Workspace directories in registration order
    pub fn dirs(&self) -> [&str; 2] {
        [&self.main, &self.secondary]
    }

    /// ASCII tree preview of the resulting project structure
    pub fn preview_tree(&self) -> String {
        format!(
            ".\n\
             ├── {}/\n\
             │   ├── backend\n\
             │   └── frontend\n\
             ├── {}/\n\
             │   └── tokens\n\
             └── package.json",
            self.main, self.secondary
        )
    }
}

/// Supported backend frameworks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    Laravel,
    Django,
    Fastify,
}

impl BackendKind {
    pub const ALL: [BackendKind; 3] = [
        BackendKind::Laravel,
        BackendKind::Django,
        BackendKind::Fastify,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            BackendKind::Laravel => "laravel",
            BackendKind::Django => "django",
            BackendKind::Fastify => "fastify",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for BackendKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "laravel" => Ok(BackendKind::Laravel),
            "django" => Ok(BackendKind::Django),
            "fastify" => Ok(BackendKind::Fastify),
            _ => Err(()),
        }
    }
}

/// Supported frontend frameworks, each mapping to a Vite template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrontendKind {
    Vanilla,
    React,
    ReactTs,
    Vue,
    Svelte,
    Solid,
    Qwik,
    Preact,
    Lit,
}

impl FrontendKind {
    pub const ALL: [FrontendKind; 9] = [
        FrontendKind::Vanilla,
        FrontendKind::React,
        FrontendKind::ReactTs,
        FrontendKind::Vue,
        FrontendKind::Svelte,
        FrontendKind::Solid,
        FrontendKind::Qwik,
        FrontendKind::Preact,
        FrontendKind::Lit,
    ];

    /// The Vite template name passed to `npm create vite`
    pub fn template(&self) -> &'static str {
        match self {
            FrontendKind::Vanilla => "vanilla",
            FrontendKind::React => "react",
            FrontendKind::ReactTs => "react-ts",
            FrontendKind::Vue => "vue",
            FrontendKind::Svelte => "svelte",
            FrontendKind::Solid => "solid",
            FrontendKind::Qwik => "qwik",
            FrontendKind::Preact => "preact",
            FrontendKind::Lit => "lit",
        }
    }

    /// React templates ship test setups that expect a DOM shim
    pub fn needs_dom_shim(&self) -> bool {
        matches!(self, FrontendKind::React | FrontendKind::ReactTs)
    }
}

impl fmt::Display for FrontendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.template())
    }
}

impl FromStr for FrontendKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|kind| kind.template().eq_ignore_ascii_case(s))
            .copied()
            .ok_or(())
    }
}

/// The full user decision set.
///
/// Built once from flags and prompts before scaffolding starts; read-only
/// from then on.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub backend: Option<BackendKind>,
    pub frontend: Option<FrontendKind>,
    pub tokens_helper: bool,
    pub tooling: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_kind_round_trips_through_str() {
        for kind in BackendKind::ALL {
            assert_eq!(kind.display_name().parse::<BackendKind>(), Ok(kind));
        }
        assert!("none".parse::<BackendKind>().is_err());
        assert!("rails".parse::<BackendKind>().is_err());
    }

    #[test]
    fn test_frontend_kind_round_trips_through_str() {
        for kind in FrontendKind::ALL {
            assert_eq!(kind.template().parse::<FrontendKind>(), Ok(kind));
        }
        assert_eq!("React-TS".parse::<FrontendKind>(), Ok(FrontendKind::ReactTs));
        assert!("angular".parse::<FrontendKind>().is_err());
    }

    #[test]
    fn test_dom_shim_only_for_react_variants() {
        for kind in FrontendKind::ALL {
            let expected = matches!(kind, FrontendKind::React | FrontendKind::ReactTs);
            assert_eq!(kind.needs_dom_shim(), expected);
        }
    }

    #[test]
    fn test_default_layout() {
        let layout = WorkspaceLayout::default();
        assert_eq!(layout.dirs(), ["apps", "helpers"]);
        assert!(layout.preview_tree().contains("├── apps/"));
        assert!(layout.preview_tree().contains("└── package.json"));
    }
}
