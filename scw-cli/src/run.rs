//! Filter command
//!
//! Reads the runners document, resolves the selected machines and prints
//! their ids.

use std::io::{BufReader, BufWriter, Read, Write};

use anyhow::{Context, Result};
use scw_core::{RunnersDocument, filter_machines};
use tracing::{debug, warn};

use crate::config::{Config, InputSource};

/// Run the filter against the configured input, writing ids to `out`
pub fn run(config: &Config, stdin: impl Read, out: impl Write) -> Result<()> {
    let table = config
        .machines
        .load()
        .context("Failed to load machine table")?;
    debug!("Loaded {} machine(s)", table.len());

    let document = match &config.input {
        InputSource::Stdin => RunnersDocument::from_reader(BufReader::new(stdin)),
        InputSource::File(path) => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("Failed to open runners document {}", path.display()))?;
            RunnersDocument::from_reader(BufReader::new(file))
        }
    }
    .context("Failed to read runners document")?;

    if !config.mode.is_recognized() {
        warn!(
            "Unrecognized mode {:?}, expected one of ONLINE_NBUSY, ONLINE_BUSY, ONLINE, OFFLINE; selecting nothing",
            config.mode.to_string()
        );
    }

    let ids = filter_machines(&config.mode, &document.runners, &table)
        .context("Failed to select machines")?;
    write_ids(&ids, out).context("Failed to write machine ids")
}

/// Write one id per line
fn write_ids(ids: &[String], out: impl Write) -> std::io::Result<()> {
    let mut out = BufWriter::new(out);
    for id in ids {
        writeln!(out, "{}", id)?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MachineSource;
    use scw_core::{FilterError, SelectionMode};

    const LISTING: &str = r#"{
        "total_count": 3,
        "runners": [
            { "id": 1, "name": "Ternoa-Build-Machine-0", "status": "online", "busy": false },
            { "id": 2, "name": "Ternoa-Build-Machine-1", "status": "offline", "busy": false },
            { "id": 3, "name": "Ternoa-Build-Machine-2", "status": "online", "busy": true }
        ]
    }"#;

    fn config(mode: &str) -> Config {
        Config {
            mode: SelectionMode::parse(mode),
            machines: MachineSource::Builtin,
            input: InputSource::Stdin,
        }
    }

    fn run_to_string(config: &Config, input: &str) -> Result<String> {
        let mut out = Vec::new();
        run(config, input.as_bytes(), &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn test_prints_one_id_per_line() {
        let output = run_to_string(&config("ONLINE"), LISTING).unwrap();
        assert_eq!(
            output,
            "14930b12-a780-4dd0-a131-069f5d6024bd\na1a60d32-19ce-47ee-8f40-635a925ba11d\n"
        );
    }

    #[test]
    fn test_offline() {
        let output = run_to_string(&config("OFFLINE"), LISTING).unwrap();
        assert_eq!(output, "bd7c96b0-bbb6-4796-977a-703256554787\n");
    }

    #[test]
    fn test_unrecognized_mode_prints_nothing() {
        let output = run_to_string(&config("BOGUS"), LISTING).unwrap();
        assert!(output.is_empty());
    }

    #[test]
    fn test_malformed_input_prints_nothing() {
        let mut out = Vec::new();
        let err = run(&config("ONLINE"), "{ \"runners\": [".as_bytes(), &mut out).unwrap_err();

        assert!(out.is_empty());
        let cause = err.downcast_ref::<FilterError>().unwrap();
        assert!(matches!(cause, FilterError::InvalidDocument(_)));
    }

    #[test]
    fn test_missing_runners_key() {
        let err = run_to_string(&config("ONLINE"), "{}").unwrap_err();
        let cause = err.downcast_ref::<FilterError>().unwrap();
        assert!(matches!(cause, FilterError::MissingField { field: "runners" }));
    }

    #[test]
    fn test_custom_machine_table_and_input_file() {
        let dir = std::env::temp_dir();
        let pid = std::process::id();
        let machines = dir.join(format!("scw-cli-machines-{pid}.json"));
        let runners = dir.join(format!("scw-cli-runners-{pid}.json"));

        std::fs::write(
            &machines,
            r#"[{ "name": "Other-Build-Machine-0", "id": "0f8e2a5c-6a64-4f39-9a55-3c1d2e4b7a10" }]"#,
        )
        .unwrap();
        std::fs::write(
            &runners,
            r#"{ "runners": [
                { "name": "Ternoa-Build-Machine-0", "status": "online", "busy": false },
                { "name": "Other-Build-Machine-0", "status": "online", "busy": false }
            ] }"#,
        )
        .unwrap();

        let config = Config {
            mode: SelectionMode::OnlineNotBusy,
            machines: MachineSource::File(machines.clone()),
            input: InputSource::File(runners.clone()),
        };
        let output = run_to_string(&config, "").unwrap();

        std::fs::remove_file(&machines).ok();
        std::fs::remove_file(&runners).ok();

        assert_eq!(output, "0f8e2a5c-6a64-4f39-9a55-3c1d2e4b7a10\n");
    }

    #[test]
    fn test_missing_input_file() {
        let config = Config {
            input: InputSource::File("/nonexistent/runners.json".into()),
            ..config("ONLINE")
        };
        assert!(run_to_string(&config, "").is_err());
    }

    #[test]
    fn test_unrecognized_mode_with_incomplete_runner() {
        let output =
            run_to_string(&config("BOGUS"), r#"{ "runners": [{ "name": "x", "busy": false }] }"#)
                .unwrap();
        assert!(output.is_empty());
    }

    #[test]
    fn test_offline_runner_without_busy_flag() {
        let input = r#"{ "runners": [
            { "name": "Ternoa-Build-Machine-0", "status": "online", "busy": false },
            { "name": "y", "status": "offline" }
        ] }"#;
        let output = run_to_string(&config("ONLINE_NBUSY"), input).unwrap();
        assert_eq!(output, "14930b12-a780-4dd0-a131-069f5d6024bd\n");
    }

    #[test]
    fn test_missing_field_prints_nothing() {
        let input = r#"{ "runners": [
            { "name": "Ternoa-Build-Machine-0", "status": "online", "busy": false },
            { "name": "y", "status": "online" }
        ] }"#;
        let mut out = Vec::new();
        let err = run(&config("ONLINE_NBUSY"), input.as_bytes(), &mut out).unwrap_err();

        assert!(out.is_empty());
        let cause = err.downcast_ref::<FilterError>().unwrap();
        assert!(matches!(
            cause,
            FilterError::MissingRunnerField {
                index: 1,
                field: "busy"
            }
        ));
    }

    #[test]
    fn test_ids_printed_verbatim() {
        let machines = std::env::temp_dir().join(format!(
            "scw-cli-verbatim-{}.json",
            std::process::id()
        ));
        std::fs::write(
            &machines,
            r#"[
                { "name": "a", "id": "14930B12-A780-4DD0-A131-069F5D6024BD" },
                { "name": "b", "id": "bd7c96b0bbb64796977a703256554787" },
                { "name": "c", "id": "fr-par-1/14930b12" }
            ]"#,
        )
        .unwrap();

        let config = Config {
            machines: MachineSource::File(machines.clone()),
            ..config("OFFLINE")
        };
        let input = r#"{ "runners": [
            { "name": "a", "status": "offline", "busy": false },
            { "name": "b", "status": "offline", "busy": false },
            { "name": "c", "status": "offline", "busy": false }
        ] }"#;
        let output = run_to_string(&config, input);
        std::fs::remove_file(&machines).ok();

        assert_eq!(
            output.unwrap(),
            "14930B12-A780-4DD0-A131-069F5D6024BD\nbd7c96b0bbb64796977a703256554787\nfr-par-1/14930b12\n"
        );
    }
}
