#[cfg(test)]
mod tests {
    use predicates::prelude::*;
    use std::path::Path;
    use tempfile::TempDir;
    use test_case::test_case;

    fn owntracks_filter_command<I, S>(
        config_dir: &Path,
        args: I,
    ) -> Result<assert_cmd::Command, Box<dyn std::error::Error>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<std::ffi::OsStr>,
    {
        let mut cmd = assert_cmd::Command::cargo_bin("owntracks-filter")?;
        cmd.arg("--config")
            .arg(config_dir.join("owntracks-filter.toml"))
            .args(args)
            .env_remove("RUST_LOG");
        Ok(cmd)
    }

    fn write_config(dir: &TempDir, content: &str) -> std::io::Result<()> {
        std::fs::write(dir.path().join("owntracks-filter.toml"), content)
    }

    #[test]
    fn run_help() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let mut cmd = owntracks_filter_command(dir.path(), ["--help"])?;

        cmd.assert()
            .success()
            .stdout(predicate::str::contains("Usage"));

        Ok(())
    }

    #[test_case(r#"{"batt": 15}"#, false)]
    #[test_case(r#"{"batt": 85}"#, true)]
    #[test_case(r#"{"batt": "20"}"#, false)]
    #[test_case(r#"{"batt": "21"}"#, true)]
    #[test_case(r#"{"lat": 1.0}"#, false)]
    #[test_case("not-json", false)]
    #[test_case(r#"{"batt": null}"#, false)]
    fn testing_a_single_message(
        payload: &str,
        forwarded: bool,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let mut cmd = owntracks_filter_command(
            dir.path(),
            ["test", "--topic", "owntracks/u/d", "--payload", payload],
        )?;

        let expected = format!("[owntracks/u/d] {payload}\n");
        if forwarded {
            cmd.assert().success().stdout(predicate::eq(expected));
        } else {
            cmd.assert().success().stdout(predicate::str::is_empty());
        }

        Ok(())
    }

    #[test]
    fn testing_messages_read_from_stdin() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let mut cmd = owntracks_filter_command(dir.path(), ["test", "--show-ignored"])?;
        cmd.write_stdin(
            r#"[owntracks/alice/phone] {"batt": 15}
[owntracks/alice/phone] {"batt": 85}

[home/kitchen/temperature] 21.5
this is not a sample
"#,
        );

        cmd.assert()
            .success()
            .stdout(predicate::eq(
                "[owntracks/alice/phone] {\"batt\": 85}\n[home/kitchen/temperature] 21.5\n",
            ))
            .stderr(predicate::str::contains(
                r#"ignored [owntracks/alice/phone] {"batt": 15}"#,
            ))
            .stderr(predicate::str::contains(
                "Fail to parse input message Incorrect message sample: Missing opening bracket",
            ));

        Ok(())
    }

    #[test]
    fn using_configured_filters() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        write_config(
            &dir,
            r#"
[[filters]]
topics = ["owntracks/+/+/event"]
filter = "owntracks-event-filter"
"#,
        )?;
        let mut cmd = owntracks_filter_command(dir.path(), ["test"])?;
        cmd.write_stdin(
            r#"[owntracks/alice/phone/event] {"event": "enter", "desc": "home"}
[owntracks/alice/phone/event] {"lat": 52.1}
[owntracks/alice/phone] {"batt": 5}
"#,
        );

        cmd.assert().success().stdout(predicate::eq(
            "[owntracks/alice/phone/event] {\"event\": \"enter\", \"desc\": \"home\"}\n[owntracks/alice/phone] {\"batt\": 5}\n",
        ));

        Ok(())
    }

    #[test]
    fn listing_the_filters() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let mut cmd = owntracks_filter_command(dir.path(), ["list"])?;

        cmd.assert()
            .success()
            .stdout(predicate::str::contains("owntracks-battery-filter"))
            .stdout(predicate::str::contains("owntracks-event-filter"))
            .stdout(predicate::str::contains("owntracks-geo-filter"))
            .stdout(predicate::str::contains("owntracks/#"));

        Ok(())
    }

    #[test]
    fn listing_the_filters_applied_to_a_topic() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        write_config(
            &dir,
            r#"
[[filters]]
topics = ["owntracks/+/+"]
filter = "owntracks-battery-filter"

[[filters]]
topics = ["owntracks/alice/#"]
filter = "owntracks-geo-filter"
"#,
        )?;

        let mut cmd =
            owntracks_filter_command(dir.path(), ["list", "--topic", "owntracks/bob/phone"])?;
        cmd.assert()
            .success()
            .stdout(predicate::eq("owntracks-battery-filter\n"));

        let mut cmd =
            owntracks_filter_command(dir.path(), ["list", "--topic", "owntracks/alice/phone"])?;
        cmd.assert().success().stdout(predicate::eq(
            "owntracks-battery-filter\nowntracks-geo-filter\n",
        ));

        Ok(())
    }

    #[test]
    fn an_unknown_filter_is_an_error() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        write_config(
            &dir,
            r#"
[[filters]]
topics = ["owntracks/#"]
filter = "owntracksBatteryFilter"
"#,
        )?;
        let mut cmd = owntracks_filter_command(dir.path(), ["list"])?;

        cmd.assert()
            .failure()
            .stderr(predicate::str::contains("Unknown filter: owntracksBatteryFilter"));

        Ok(())
    }

    #[test]
    fn payload_requires_a_topic() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let mut cmd = owntracks_filter_command(dir.path(), ["test", "--payload", "{}"])?;

        cmd.assert().failure();

        Ok(())
    }
}
