//! rolewire — access-policy compiler demo CLI
//!
//! Exercises the compiler and validator against a role document: decompose
//! it into canonical rules, check those rules against space data, or run the
//! full decompose → compose round trip. Every subcommand falls back to the
//! built-in sample data when no files are given.
//!
//! Usage:
//!   cargo run -p demo -- inspect [role.json]
//!   cargo run -p demo -- check [role.json] [--space space.json]
//!   cargo run -p demo -- round-trip [role.json]

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rolewire_compiler::{compose, decompose, UuidRuleIds};
use rolewire_contracts::error::{RolewireError, RolewireResult};
use rolewire_contracts::role::StoredRole;
use rolewire_contracts::rule::{Rule, RuleScope};
use rolewire_validate::collect_incomplete_rules;

mod sample;

use sample::SpaceData;

// ── CLI definition ────────────────────────────────────────────────────────────

/// rolewire — two-way compiler between stored role policies and editable
/// rules, with completeness validation against current space data.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "rolewire access-policy compiler demo",
    long_about = "Decomposes stored role policies into canonical rules, validates their\n\
                  references against space data, and recomposes them deterministically."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decompose a role document and print its canonical rules.
    Inspect {
        /// Role document JSON; the built-in sample role when omitted.
        role: Option<PathBuf>,
    },
    /// Report rules whose references no longer resolve.
    Check {
        /// Role document JSON; the built-in sample role when omitted.
        role: Option<PathBuf>,
        /// Space data JSON; the built-in sample space when omitted.
        #[arg(long)]
        space: Option<PathBuf>,
    },
    /// Decompose, recompose, and compare against the original document.
    RoundTrip {
        /// Role document JSON; the built-in sample role when omitted.
        role: Option<PathBuf>,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Structured logging; set RUST_LOG=debug to watch the compiler work.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    print_banner();

    let result = match cli.command {
        Command::Inspect { role } => run_inspect(role.as_deref()),
        Command::Check { role, space } => run_check(role.as_deref(), space.as_deref()),
        Command::RoundTrip { role } => run_round_trip(role.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Demo error: {}", e);
        std::process::exit(1);
    }
}

// ── Subcommands ───────────────────────────────────────────────────────────────

fn run_inspect(role_path: Option<&Path>) -> RolewireResult<()> {
    let role = load_role(role_path)?;
    let model = decompose(&role, &mut UuidRuleIds);

    println!("Role '{}' (id {}, version {})", model.name, model.id, model.version);
    if let Some(description) = &model.description {
        println!("  {}", description);
    }
    println!();

    if !model.ui_compatible {
        println!("Some policies cannot be edited as rules; the raw policy text is kept:");
        println!("{}", model.policy_string);
        println!();
    }

    for (label, rules) in [
        ("Entries, allowed", &model.entries.allowed),
        ("Entries, denied", &model.entries.denied),
        ("Assets, allowed", &model.assets.allowed),
        ("Assets, denied", &model.assets.denied),
    ] {
        if rules.is_empty() {
            continue;
        }
        println!("{}:", label);
        for rule in rules {
            println!("  - {}", describe_rule(rule));
        }
    }

    if model.metadata_tag_rule_exists() {
        println!();
        println!("This role contains tag-scoped rules.");
    }

    Ok(())
}

fn run_check(role_path: Option<&Path>, space_path: Option<&Path>) -> RolewireResult<()> {
    let role = load_role(role_path)?;
    let space = load_space(space_path)?;
    let model = decompose(&role, &mut UuidRuleIds);

    let incomplete = collect_incomplete_rules(
        &model,
        &space.content_types,
        &space.entity_ids,
        &space.locales,
        &space.tag_ids,
    );

    if incomplete.is_empty() {
        println!("All rule references resolve against the current space data.");
        return Ok(());
    }

    println!("{} rule(s) reference data that no longer exists:", incomplete.len());
    for (rule_id, missing) in &incomplete {
        let labels: Vec<&str> = missing.iter().map(|m| m.label()).collect();
        match model.rules().find(|rule| &rule.id == rule_id) {
            Some(rule) => {
                println!("  - {}", describe_rule(rule));
                println!("      missing: {}", labels.join(", "));
            }
            None => println!("  - rule {} missing: {}", rule_id, labels.join(", ")),
        }
    }

    Ok(())
}

fn run_round_trip(role_path: Option<&Path>) -> RolewireResult<()> {
    let role = load_role(role_path)?;
    let model = decompose(&role, &mut UuidRuleIds);
    let composed = compose(&model);

    let rule_count = model.rules().count();
    println!(
        "{} stored policies decomposed into {} rules (editable as rules: {}).",
        role.policy_slice().len(),
        rule_count,
        if model.ui_compatible { "yes" } else { "no" }
    );

    let original = to_json(&role)?;
    let reproduced = to_json(&composed)?;

    if original == reproduced {
        println!("Round trip reproduced the stored document exactly.");
    } else {
        println!("Round trip produced a canonicalized document:");
        println!("{}", serde_json::to_string_pretty(&reproduced).unwrap_or_default());
    }

    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn load_role(path: Option<&Path>) -> RolewireResult<StoredRole> {
    match path {
        Some(path) => StoredRole::from_json_str(&read_file(path)?),
        None => sample::sample_role(),
    }
}

fn load_space(path: Option<&Path>) -> RolewireResult<SpaceData> {
    match path {
        Some(path) => {
            serde_json::from_str(&read_file(path)?).map_err(|e| RolewireError::MalformedDocument {
                reason: format!("failed to parse space data: {}", e),
            })
        }
        None => sample::sample_space(),
    }
}

fn read_file(path: &Path) -> RolewireResult<String> {
    std::fs::read_to_string(path).map_err(|e| RolewireError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn to_json(role: &StoredRole) -> RolewireResult<serde_json::Value> {
    serde_json::to_value(role).map_err(|e| RolewireError::MalformedDocument {
        reason: format!("failed to serialize role document: {}", e),
    })
}

/// One-line human summary of a rule.
fn describe_rule(rule: &Rule) -> String {
    let mut parts = vec![rule.action.to_string()];

    match rule.scope {
        RuleScope::Any => {}
        RuleScope::CurrentUser => parts.push("own content only".to_string()),
        RuleScope::EntityId => {
            if let Some(id) = &rule.entity_id {
                parts.push(format!("entity '{}'", id));
            }
        }
        RuleScope::MetadataTagId => {
            if let Some(ids) = &rule.metadata_tag_ids {
                parts.push(format!("tagged {}", ids.join("/")));
            }
        }
        RuleScope::MetadataTagType => {
            if let Some(types) = &rule.metadata_tag_types {
                parts.push(format!("tag types {}", types.join("/")));
            }
        }
    }

    if let Some(content_type) = rule.content_type.as_only() {
        parts.push(format!("content type '{}'", content_type));
    }

    if let Some(path) = &rule.path {
        if path.is_metadata_tags() {
            parts.push("metadata tags".to_string());
        } else {
            parts.push(format!("field {}, locale {}", path.field, path.locale));
        }
    }

    format!("[{}] {}", rule.id, parts.join(", "))
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("rolewire — access-policy compiler");
    println!("=================================");
    println!();
    println!("Stored policies → decompose → canonical rules → compose → stored policies");
    println!();
}
