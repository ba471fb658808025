//! List command - show the host ports used by each app.

use std::io::Write;

use anyhow::Result;
use portmap_core::{Config, PortBinding, PortScanner};

pub async fn run(config: &Config, json: bool) -> Result<()> {
    let scanner = PortScanner::from_config(config);
    let bindings = scanner.scan(&config.apps_dir).await;

    let stdout = std::io::stdout();
    render(&mut stdout.lock(), &bindings, json)
}

fn render(out: &mut impl Write, bindings: &[PortBinding], json: bool) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(bindings)?)?;
        return Ok(());
    }

    writeln!(out, "Used Ports:")?;
    if bindings.is_empty() {
        writeln!(out, "No ports found.")?;
        return Ok(());
    }

    for binding in bindings {
        writeln!(out, "{}", binding)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(bindings: &[PortBinding], json: bool) -> String {
        let mut out = Vec::new();
        render(&mut out, bindings, json).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_render_text() {
        let bindings = vec![PortBinding::new(3232, "web"), PortBinding::new(8081, "api")];
        assert_eq!(rendered(&bindings, false), "Used Ports:\n3232:web\n8081:api\n");
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(rendered(&[], false), "Used Ports:\nNo ports found.\n");
    }

    #[test]
    fn test_render_json() {
        let bindings = vec![PortBinding::new(80, "proxy")];
        let parsed: serde_json::Value = serde_json::from_str(&rendered(&bindings, true)).unwrap();
        assert_eq!(parsed, serde_json::json!([{ "port": 80, "app": "proxy" }]));
    }
}
