//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::io::Write;

use clap::Parser;
use sift_core::models::{META_APP_ID, META_PAYMENT_KEYWORD};
use sift_core::{Engine, EngineConfig};

use crate::cli::{Cli, Commands};
use crate::commands::{self, truncate};

fn engine() -> Engine {
    Engine::embedded().unwrap()
}

fn write_temp(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

// ========== Argument Parsing Tests ==========

#[test]
fn test_parse_classify_args() {
    let cli = Cli::parse_from(["sift", "classify", "NETFLIX 13,500원", "--amount", "13500"]);
    match cli.command {
        Commands::Classify {
            text, amount, json, ..
        } => {
            assert_eq!(text, "NETFLIX 13,500원");
            assert_eq!(amount, Some(13500));
            assert!(!json);
        }
        _ => panic!("expected classify"),
    }
}

#[test]
fn test_parse_search_default_k() {
    let cli = Cli::parse_from(["sift", "search", "해지"]);
    match cli.command {
        Commands::Search { query, k, .. } => {
            assert_eq!(query, "해지");
            assert_eq!(k, 3);
        }
        _ => panic!("expected search"),
    }
}

#[test]
fn test_parse_global_flags() {
    let cli = Cli::parse_from(["sift", "catalog", "--config", "engine.toml", "-v"]);
    assert!(cli.verbose);
    assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("engine.toml")));
}

// ========== Engine Loading Tests ==========

#[test]
fn test_open_engine_with_config_file() {
    let file = write_temp("[[services]]\nid = \"TVING\"\naliases = [\"TVING\", \"티빙\"]\n");
    let engine = commands::open_engine(Some(file.path())).unwrap();
    assert_eq!(engine.catalog().len(), 1);
    assert_eq!(
        engine.classify("티빙 결제", None).service.as_deref(),
        Some("TVING")
    );
}

#[test]
fn test_open_engine_invalid_config() {
    let file = write_temp("[matcher]\nthreshold = \"high\"\n");
    assert!(commands::open_engine(Some(file.path())).is_err());
}

// ========== Classify Command Tests ==========

#[test]
fn test_cmd_classify() {
    let engine = engine();
    assert!(commands::cmd_classify(&engine, "NETFLIX*13,500원 승인", None, None, false).is_ok());
    assert!(commands::cmd_classify(&engine, "RANDOM COFFEE 4500", Some(4500), None, true).is_ok());
}

#[test]
fn test_classify_text_extracts_amount() {
    let engine = engine();
    let result = commands::classify_text(&engine, "넷플릭스 13,500원 승인", None, Some("com.kb"));
    assert_eq!(result.service.as_deref(), Some("NETFLIX"));
    assert_eq!(result.amount(), Some(13500));
    assert_eq!(result.metadata[META_APP_ID], "com.kb");
    assert_eq!(result.metadata[META_PAYMENT_KEYWORD], "승인");
}

#[test]
fn test_classify_text_explicit_amount_wins() {
    let engine = engine();
    let result = commands::classify_text(&engine, "넷플릭스 13,500원 승인", Some(9900), Some("com.kb"));
    assert_eq!(result.amount(), Some(9900));
    assert_eq!(result.metadata[META_APP_ID], "com.kb");
    assert!(!result.metadata.contains_key(META_PAYMENT_KEYWORD));
}

#[test]
fn test_cmd_normalize() {
    assert!(commands::cmd_normalize(&engine(), "googlepay*youtube").is_ok());
}

// ========== Search / Catalog Command Tests ==========

#[test]
fn test_cmd_search() {
    let engine = engine();
    assert!(commands::cmd_search(&engine, "해지", 2, false).is_ok());
    assert!(commands::cmd_search(&engine, "해지", 2, true).is_ok());
    assert!(commands::cmd_search(&engine, "", 0, false).is_ok());
}

#[test]
fn test_cmd_catalog() {
    assert!(commands::cmd_catalog(&engine()).is_ok());

    let empty = Engine::from_config(&EngineConfig::default()).unwrap();
    assert!(commands::cmd_catalog(&empty).is_ok());
}

// ========== Batch Command Tests ==========

#[test]
fn test_classify_file_dedupes_by_default() {
    let file = write_temp(
        "app_id,text\n\
         com.kb,\"NETFLIX*13,500원 승인\"\n\
         com.kb,\"NETFLIX*13,500원 승인\"\n\
         com.kb,\"멜론 10,900원 결제\"\n",
    );
    let engine = engine();

    let results = commands::classify_file(&engine, file.path(), false).unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].service.as_deref(), Some("NETFLIX"));
    assert_eq!(results[1].service.as_deref(), Some("MELON"));

    let all = commands::classify_file(&engine, file.path(), true).unwrap();
    assert_eq!(all.len(), 3);
}

#[test]
fn test_classify_file_missing() {
    let dir = tempfile::tempdir().unwrap();
    let result = commands::classify_file(&engine(), &dir.path().join("none.csv"), false);
    assert!(result.is_err());
}

#[test]
fn test_cmd_batch() {
    let file = write_temp("app_id,text\ncom.kb,왓챠 7900원 승인\n");
    assert!(commands::cmd_batch(&engine(), file.path(), false).is_ok());
}

// ========== Utility Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("a longer sentence", 10), "a longe...");
    assert_eq!(truncate("넷플릭스는 일반적으로", 6), "넷플릭...");
}
