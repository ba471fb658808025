//! Port-binding line matcher.
//!
//! Compose descriptors are scanned as plain text, one line at a time. A line
//! is a port binding when it looks like a `ports:` list item:
//!
//! ```text
//!       - "3232:3232"
//!       - "${PORT:-8081}:8081"
//!       - 8000:80/tcp
//! ```
//!
//! Only the host side is of interest. It is either a literal port or an
//! environment placeholder, and a placeholder only yields a port when it
//! carries a `:-DEFAULT` branch.

use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, warn};

fn line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            concat!(
                r#"^[\s-]*["']?"#,
                r"(?:\$\{(?P<placeholder>[^}]+)\}|(?P<literal>[0-9]+))",
                r":(?P<container>[0-9]+)(?:/(?P<protocol>tcp|udp))?",
                r#"["']?$"#,
            ),
        )
        .expect("port line pattern is valid")
    })
}

fn default_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?P<name>[^:]+):-(?P<default>[0-9]+)$")
            .expect("placeholder pattern is valid")
    })
}

// ============================================================================
// HostSpec
// ============================================================================

/// Host side of a `host:container` binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostSpec {
    /// A literal port, e.g. `3232`.
    Literal(String),
    /// An environment placeholder, e.g. `${PORT:-8081}` or `${HOST_PORT}`.
    Placeholder {
        name: String,
        default: Option<String>,
    },
}

impl HostSpec {
    fn placeholder(body: &str) -> Self {
        match default_regex().captures(body) {
            Some(caps) => HostSpec::Placeholder {
                name: caps["name"].to_string(),
                default: Some(caps["default"].to_string()),
            },
            None => HostSpec::Placeholder {
                name: body.split(':').next().unwrap_or(body).to_string(),
                default: None,
            },
        }
    }

    /// The digits naming the host port, if any.
    pub fn digits(&self) -> Option<&str> {
        match self {
            HostSpec::Literal(digits) => Some(digits),
            HostSpec::Placeholder { default, .. } => default.as_deref(),
        }
    }
}

// ============================================================================
// PortLine
// ============================================================================

/// Transport protocol suffix of a binding (`/tcp` or `/udp`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Tcp,
    Udp,
}

/// A single line recognized as a port binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortLine {
    pub host: HostSpec,
    pub container: String,
    pub protocol: Option<Protocol>,
}

impl PortLine {
    /// Parse one line of descriptor text.
    ///
    /// Trailing whitespace (including a `\r` from CRLF files) is ignored.
    pub fn parse(line: &str) -> Option<Self> {
        let caps = line_regex().captures(line.trim_end())?;

        let host = match (caps.name("literal"), caps.name("placeholder")) {
            (Some(literal), _) => HostSpec::Literal(literal.as_str().to_string()),
            (None, Some(body)) => HostSpec::placeholder(body.as_str()),
            (None, None) => return None,
        };

        let protocol = caps.name("protocol").map(|p| match p.as_str() {
            "udp" => Protocol::Udp,
            _ => Protocol::Tcp,
        });

        Some(Self {
            host,
            container: caps["container"].to_string(),
            protocol,
        })
    }

    /// Resolve the host port of this binding.
    ///
    /// Returns `None` for placeholders without a default. Values above 65535
    /// are kept as written; only digit runs overflowing `u32` are dropped.
    pub fn host_port(&self) -> Option<u32> {
        let Some(digits) = self.host.digits() else {
            debug!(host = ?self.host, "Placeholder without default, no host port");
            return None;
        };

        match digits.parse::<u32>() {
            Ok(port) => Some(port),
            Err(_) => {
                warn!(value = digits, "Host port overflows u32, skipping");
                None
            }
        }
    }
}

/// Extract every host port declared in a descriptor, in text order.
pub fn extract_host_ports(text: &str) -> Vec<u32> {
    text.lines()
        .filter_map(PortLine::parse)
        .filter_map(|line| line.host_port())
        .collect()
}
