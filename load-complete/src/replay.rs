//! Event scripts: one JSON object per line, `{"at": "1.5s", "event": ...}`,
//! where `at` is the offset from the start of the script.

use std::time::Duration;

use eyre::{ensure, Result, WrapErr};
use serde::{Deserialize, Deserializer};
use tokio::sync::mpsc::UnboundedSender;
use tokio::time::{self, Instant};
use tracing::warn;

use crate::host::Event;

#[derive(Debug, PartialEq, Deserialize)]
pub struct ScriptEntry {
    #[serde(deserialize_with = "humantime_duration")]
    pub at: Duration,
    pub event: Event,
}

fn humantime_duration<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    let text = String::deserialize(deserializer)?;
    humantime::parse_duration(&text).map_err(serde::de::Error::custom)
}

/// Parses a script. Blank lines and lines starting with `//` are skipped.
/// Offsets must not go backwards.
pub fn parse_script(text: &str) -> Result<Vec<ScriptEntry>> {
    let mut entries: Vec<ScriptEntry> = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with("//") {
            continue;
        }
        let entry: ScriptEntry = serde_json::from_str(line)
            .wrap_err_with(|| format!("invalid script entry on line {}", index + 1))?;
        if let Some(previous) = entries.last() {
            ensure!(
                entry.at >= previous.at,
                "line {}: offset {:?} is before the previous one ({:?})",
                index + 1,
                entry.at,
                previous.at
            );
        }
        entries.push(entry);
    }
    Ok(entries)
}

/// Sends every entry at its offset. Dropping `tx` at the end closes the
/// event channel.
pub async fn play(entries: Vec<ScriptEntry>, tx: UnboundedSender<Event>) {
    let start = Instant::now();
    for ScriptEntry { at, event } in entries {
        time::sleep_until(start + at).await;
        if tx.send(event).is_err() {
            warn!("frame loop stopped before the script ended");
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use load_complete::Argb;

    #[test]
    fn test_parse_script() {
        let script = r##"
            // spin for a bit, then complete in red
            {"at": "0s", "event": "StartLoading"}
            {"at": "1s 500ms", "event": {"SetColor": {"color": "#ff0000"}}}

            {"at": "2s", "event": "Complete"}
        "##;
        let entries = parse_script(script).unwrap();
        assert_eq!(
            entries,
            vec![
                ScriptEntry {
                    at: Duration::ZERO,
                    event: Event::StartLoading
                },
                ScriptEntry {
                    at: Duration::from_millis(1500),
                    event: Event::SetColor { color: Argb::RED }
                },
                ScriptEntry {
                    at: Duration::from_secs(2),
                    event: Event::Complete
                },
            ]
        );
    }

    #[test]
    fn test_rejects_going_backwards() {
        let script = r#"{"at": "2s", "event": "StartLoading"}
{"at": "1s", "event": "Dismiss"}"#;
        let err = parse_script(script).unwrap_err();
        assert!(err.to_string().contains("line 2"), "{err}");
    }

    #[test]
    fn test_reports_bad_line() {
        let script = r#"{"at": "soon", "event": "StartLoading"}"#;
        let err = parse_script(script).unwrap_err();
        assert_eq!(err.to_string(), "invalid script entry on line 1");
    }
}
