//! CLI integration tests.
//!
//! Tests cover:
//! - Space extraction from the optimizer command line
//! - Argument parsing for both subcommands
//! - `init-db` creating a store on disk through the CLI
//! - End-to-end `run` with a real shell command and artifact on disk

use clap::Parser;
use hypermanager::cli::{self, Cli, Command};
use hypermanager::domain::error::HypermanagerError;
use rusqlite::Connection;
use std::fs;
use std::path::Path;

fn table_columns(db: &Path) -> Vec<String> {
    let conn = Connection::open(db).unwrap();
    let mut stmt = conn
        .prepare("SELECT name FROM pragma_table_info('hyperopt_results')")
        .unwrap();
    stmt.query_map([], |row| row.get(0))
        .unwrap()
        .map(Result::unwrap)
        .collect()
}

mod space_extraction {
    use super::*;

    #[test]
    fn takes_every_token_after_the_marker() {
        let tokens =
            cli::extract_spaces("optimize --epochs 100 --spaces buy sell roi").unwrap();
        assert_eq!(tokens, vec!["buy", "sell", "roi"]);
    }

    #[test]
    fn sentinel_tokens_pass_through() {
        let tokens = cli::extract_spaces("optimize --spaces all").unwrap();
        assert_eq!(tokens, vec!["all"]);
    }

    #[test]
    fn missing_marker_is_an_error() {
        let err = cli::extract_spaces("optimize --epochs 100").unwrap_err();
        assert!(matches!(err, HypermanagerError::SpacesMissing));
    }

    #[test]
    fn marker_at_end_yields_empty_selection() {
        let tokens = cli::extract_spaces("optimize --spaces").unwrap();
        assert!(tokens.is_empty());
    }

    #[test]
    fn extra_whitespace_is_ignored() {
        let tokens = cli::extract_spaces("optimize   --spaces   buy    sell").unwrap();
        assert_eq!(tokens, vec!["buy", "sell"]);
    }
}

mod argument_parsing {
    use super::*;

    #[test]
    fn run_parses_long_flags() {
        let cli = Cli::try_parse_from([
            "hypermanager",
            "run",
            "--cmd",
            "optimize --spaces buy",
            "--iterations",
            "3",
            "--drop-db",
            "--keep-going",
        ])
        .unwrap();

        match cli.command {
            Command::Run {
                cmd,
                iterations,
                drop_db,
                keep_going,
                ..
            } => {
                assert_eq!(cmd, "optimize --spaces buy");
                assert_eq!(iterations, 3);
                assert!(drop_db);
                assert!(keep_going);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn run_parses_short_flags_and_defaults() {
        let cli = Cli::try_parse_from([
            "hypermanager",
            "run",
            "-x",
            "optimize --spaces default",
        ])
        .unwrap();

        match cli.command {
            Command::Run {
                iterations,
                drop_db,
                keep_going,
                db,
                ..
            } => {
                assert_eq!(iterations, 1);
                assert!(!drop_db);
                assert!(!keep_going);
                assert_eq!(db.to_str().unwrap(), "hyperopt.results.sqlite");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn init_db_requires_spaces() {
        assert!(Cli::try_parse_from(["hypermanager", "init-db"]).is_err());
    }

    #[test]
    fn init_db_takes_multiple_space_tokens() {
        let cli = Cli::try_parse_from([
            "hypermanager",
            "init-db",
            "--spaces",
            "buy",
            "sell",
            "--db",
            "x.sqlite",
        ])
        .unwrap();

        match cli.command {
            Command::InitDb { spaces, db } => {
                assert_eq!(spaces, vec!["buy", "sell"]);
                assert_eq!(db.to_str().unwrap(), "x.sqlite");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}

mod init_db_end_to_end {
    use super::*;

    #[test]
    fn creates_store_with_selected_columns() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("fresh.sqlite");

        let cli = Cli::try_parse_from([
            "hypermanager",
            "init-db",
            "--spaces",
            "default",
            "--db",
            db.to_str().unwrap(),
        ])
        .unwrap();
        let _ = cli::run(cli);

        let columns = table_columns(&db);
        assert_eq!(columns.len(), 14); // 10 fixed + all spaces but trailing
        assert_eq!(columns[0], "id");
        assert_eq!(&columns[10..], &["buy", "sell", "roi", "stoploss"]);
    }

    #[test]
    fn unknown_space_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("fresh.sqlite");

        let cli = Cli::try_parse_from([
            "hypermanager",
            "init-db",
            "--spaces",
            "foo",
            "--db",
            db.to_str().unwrap(),
        ])
        .unwrap();
        let _ = cli::run(cli);

        assert!(!db.exists());
    }
}

mod run_end_to_end {
    use super::*;

    #[test]
    fn real_shell_command_and_artifact_produce_rows() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("results.sqlite");
        let artifact = dir.path().join("hyperopt_results.json");

        fs::write(
            &artifact,
            concat!(
                r#"{"is_best": true, "current_epoch": 1, "loss": -0.8, "#,
                r#""results_metrics": {"trade_count": 5, "avg_profit": 0.2, "#,
                r#""total_profit": 4.0, "profit": 1.0, "duration": 45.0}, "#,
                r#""params_details": {"buy": {"rsi-value": 28}, "sell": {"sell-rsi-value": 72}}}"#,
                "\n",
                r#"{"is_best": false, "current_epoch": 2, "loss": 0.1, "#,
                r#""results_metrics": {"trade_count": 6, "avg_profit": 0.1, "#,
                r#""total_profit": 2.0, "profit": 0.5, "duration": 50.0}, "#,
                r#""params_details": {"buy": {"rsi-value": 35}, "sell": {"sell-rsi-value": 65}}}"#,
                "\n",
            ),
        )
        .unwrap();

        // `true` ignores its arguments; the marker only matters to the
        // harness.
        let cli = Cli::try_parse_from([
            "hypermanager",
            "run",
            "--cmd",
            "true --spaces buy sell",
            "--iterations",
            "2",
            "--drop-db",
            "--db",
            db.to_str().unwrap(),
            "--results",
            artifact.to_str().unwrap(),
        ])
        .unwrap();
        let _ = cli::run(cli);

        let conn = Connection::open(&db).unwrap();
        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM hyperopt_results", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 4);

        let best: String = conn
            .query_row(
                "SELECT best_local_min FROM hyperopt_results WHERE id = 1",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(best, "true");
    }

    #[test]
    fn failing_command_writes_nothing_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("results.sqlite");

        let cli = Cli::try_parse_from([
            "hypermanager",
            "run",
            "--cmd",
            "false --spaces buy",
            "--drop-db",
            "--db",
            db.to_str().unwrap(),
            "--results",
            dir.path().join("never.json").to_str().unwrap(),
        ])
        .unwrap();
        let _ = cli::run(cli);

        let conn = Connection::open(&db).unwrap();
        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM hyperopt_results", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 0);
    }
}
