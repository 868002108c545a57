//! The check catalog.
//!
//! Checks are data, not logic: adding a tool, port, or resource floor is
//! a new entry here, never a new branch in the engine. Order is
//! significant only for display grouping.

/// Recommended/minimum floors for a resource check, in gigabytes.
///
/// At or above `recommended_gb` passes; at or above `minimum_gb` but below
/// recommended warns; below `minimum_gb` fails.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResourceThresholds {
    pub recommended_gb: f64,
    pub minimum_gb: f64,
}

/// What one check probes. Carried entirely as data.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckKind {
    /// Host OS is one of the supported platforms.
    OperatingSystem,

    /// Host architecture is one of the tested architectures.
    Architecture,

    /// Total physical memory against [`ResourceThresholds`].
    Memory(ResourceThresholds),

    /// Free disk space in the working directory against [`ResourceThresholds`].
    Disk(ResourceThresholds),

    /// Run a version command and compare against a floor.
    ToolVersion {
        /// Command whose output carries the version banner.
        command: &'static str,
        /// Semantic version floor, if any.
        min_version: Option<&'static str>,
        /// Extraction pattern override; must capture exactly one group.
        version_pattern: Option<&'static str>,
        /// Alternate command tried when the primary check fails outright.
        fallback_command: Option<&'static str>,
    },

    /// A daemon answers its status command with exit code 0.
    DaemonReachable { command: &'static str },

    /// Memory allocated to a daemon, parsed from its status output.
    DaemonMemory {
        command: &'static str,
        recommended_gb: f64,
    },

    /// A local TCP port is expected to be free.
    PortFree { port: u16 },
}

/// A registry entry describing what to validate, not the outcome.
///
/// Stateless and reusable across runs; every check produces exactly one
/// result per run.
#[derive(Debug, Clone, PartialEq)]
pub struct Check {
    /// Human-readable check identifier.
    pub name: &'static str,
    /// What to probe.
    pub kind: CheckKind,
    /// Whether a failure here fails the overall run.
    pub required: bool,
}

impl Check {
    /// A required check.
    pub fn required(name: &'static str, kind: CheckKind) -> Self {
        Self {
            name,
            kind,
            required: true,
        }
    }

    /// An informational check that never affects the overall outcome.
    pub fn optional(name: &'static str, kind: CheckKind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }
}

/// An ordered group of checks under a display heading.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub name: &'static str,
    pub checks: Vec<Check>,
}

/// The fixed, ordered catalog of checks.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckRegistry {
    categories: Vec<Category>,
}

/// Shorthand for the common tool-with-floor entry.
fn tool(command: &'static str, min_version: &'static str) -> CheckKind {
    CheckKind::ToolVersion {
        command,
        min_version: Some(min_version),
        version_pattern: None,
        fallback_command: None,
    }
}

impl CheckRegistry {
    /// Build a registry from explicit categories.
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// The standard development-environment battery.
    pub fn standard() -> Self {
        let categories = vec![
            Category {
                name: "System Requirements",
                checks: vec![
                    Check::required("Operating System", CheckKind::OperatingSystem),
                    Check::required("Architecture", CheckKind::Architecture),
                    Check::required(
                        "System Memory",
                        CheckKind::Memory(ResourceThresholds {
                            recommended_gb: 16.0,
                            minimum_gb: 8.0,
                        }),
                    ),
                    Check::required(
                        "Disk Space",
                        CheckKind::Disk(ResourceThresholds {
                            recommended_gb: 100.0,
                            minimum_gb: 50.0,
                        }),
                    ),
                ],
            },
            Category {
                name: "Core Tools",
                checks: vec![
                    Check::required("git", tool("git --version", "2.40")),
                    Check::required("docker", tool("docker --version", "24.0")),
                    Check::required(
                        "docker compose",
                        CheckKind::ToolVersion {
                            command: "docker compose version",
                            min_version: Some("2.20"),
                            version_pattern: None,
                            // Older installs ship the standalone v1-style binary.
                            fallback_command: Some("docker-compose --version"),
                        },
                    ),
                ],
            },
            Category {
                name: "Programming Languages",
                checks: vec![
                    Check::required("python3", tool("python3 --version", "3.12")),
                    Check::optional("python (alias)", tool("python --version", "3.12")),
                    Check::required(
                        "java",
                        CheckKind::ToolVersion {
                            command: "java -version",
                            min_version: Some("21"),
                            version_pattern: Some(r#"version "(\d+)"#),
                            fallback_command: None,
                        },
                    ),
                    Check::required("node", tool("node --version", "18.0")),
                ],
            },
            Category {
                name: "Package Managers",
                checks: vec![
                    Check::required("poetry", tool("poetry --version", "1.7")),
                    Check::required("mvn", tool("mvn --version", "3.9")),
                    Check::required("npm", tool("npm --version", "9.0")),
                ],
            },
            Category {
                name: "Docker Configuration",
                checks: vec![
                    Check::required(
                        "Docker Daemon",
                        CheckKind::DaemonReachable {
                            command: "docker info",
                        },
                    ),
                    Check::required(
                        "Docker Memory",
                        CheckKind::DaemonMemory {
                            command: "docker info",
                            recommended_gb: 8.0,
                        },
                    ),
                ],
            },
            Category {
                name: "Network Ports",
                checks: [8000, 8080, 5432, 6379, 9092, 9200]
                    .into_iter()
                    .map(|port| Check {
                        name: port_name(port),
                        kind: CheckKind::PortFree { port },
                        required: false,
                    })
                    .collect(),
            },
            Category {
                name: "IDE Tools",
                checks: vec![Check::optional("code", tool("code --version", "1.80"))],
            },
        ];

        Self { categories }
    }

    /// Categories in display order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Total number of registered checks.
    pub fn check_count(&self) -> usize {
        self.categories.iter().map(|c| c.checks.len()).sum()
    }
}

impl Default for CheckRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

/// Static display names for the fixed port set.
fn port_name(port: u16) -> &'static str {
    match port {
        8000 => "Port 8000",
        8080 => "Port 8080",
        5432 => "Port 5432",
        6379 => "Port 6379",
        9092 => "Port 9092",
        9200 => "Port 9200",
        _ => "Port",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_has_all_categories_in_order() {
        let registry = CheckRegistry::standard();
        let names: Vec<&str> = registry.categories().iter().map(|c| c.name).collect();
        assert_eq!(
            names,
            vec![
                "System Requirements",
                "Core Tools",
                "Programming Languages",
                "Package Managers",
                "Docker Configuration",
                "Network Ports",
                "IDE Tools",
            ]
        );
    }

    #[test]
    fn port_checks_are_never_required() {
        let registry = CheckRegistry::standard();
        let ports = registry
            .categories()
            .iter()
            .find(|c| c.name == "Network Ports")
            .unwrap();
        assert_eq!(ports.checks.len(), 6);
        assert!(ports.checks.iter().all(|c| !c.required));
    }

    #[test]
    fn ide_tools_are_optional() {
        let registry = CheckRegistry::standard();
        let ide = registry
            .categories()
            .iter()
            .find(|c| c.name == "IDE Tools")
            .unwrap();
        assert!(ide.checks.iter().all(|c| !c.required));
    }

    #[test]
    fn compose_check_carries_legacy_fallback() {
        let registry = CheckRegistry::standard();
        let core = registry
            .categories()
            .iter()
            .find(|c| c.name == "Core Tools")
            .unwrap();
        let compose = core
            .checks
            .iter()
            .find(|c| c.name == "docker compose")
            .unwrap();
        match &compose.kind {
            CheckKind::ToolVersion {
                fallback_command, ..
            } => {
                assert_eq!(*fallback_command, Some("docker-compose --version"));
            }
            other => panic!("expected ToolVersion, got {:?}", other),
        }
    }

    #[test]
    fn java_check_uses_pattern_override() {
        let registry = CheckRegistry::standard();
        let langs = registry
            .categories()
            .iter()
            .find(|c| c.name == "Programming Languages")
            .unwrap();
        let java = langs.checks.iter().find(|c| c.name == "java").unwrap();
        match &java.kind {
            CheckKind::ToolVersion {
                version_pattern, ..
            } => assert!(version_pattern.is_some()),
            other => panic!("expected ToolVersion, got {:?}", other),
        }
    }

    #[test]
    fn memory_thresholds_match_documented_floors() {
        let registry = CheckRegistry::standard();
        let system = registry
            .categories()
            .iter()
            .find(|c| c.name == "System Requirements")
            .unwrap();
        let memory = system
            .checks
            .iter()
            .find(|c| c.name == "System Memory")
            .unwrap();
        assert_eq!(
            memory.kind,
            CheckKind::Memory(ResourceThresholds {
                recommended_gb: 16.0,
                minimum_gb: 8.0,
            })
        );
    }

    #[test]
    fn check_count_covers_every_category() {
        let registry = CheckRegistry::standard();
        assert_eq!(
            registry.check_count(),
            registry
                .categories()
                .iter()
                .map(|c| c.checks.len())
                .sum::<usize>()
        );
        // 4 system + 3 core + 4 languages + 3 managers + 2 docker + 6 ports + 1 ide
        assert_eq!(registry.check_count(), 23);
    }

    #[test]
    fn custom_registry_is_constructible() {
        let registry = CheckRegistry::new(vec![Category {
            name: "Only Ports",
            checks: vec![Check::optional("Port 8000", CheckKind::PortFree { port: 8000 })],
        }]);
        assert_eq!(registry.check_count(), 1);
    }
}
