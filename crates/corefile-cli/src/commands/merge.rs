//! The merge command
//!
//! A pure, store-free merge of an explicit rules file into a Corefile.

use std::fs;
use std::path::Path;

use colored::Colorize;
use corefile_blocks::{LineDiff, Rule, Vocabulary, merge_with_report};
use serde::Deserialize;

use super::EXIT_OK;
use crate::cli::MergeArgs;
use crate::error::Result;

/// On-disk layout of a rules file.
#[derive(Debug, Default, Deserialize)]
struct RulesFile {
    #[serde(default, alias = "rules")]
    rule: Vec<Rule>,
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| corefile_meta::Error::io(path, e).into())
}

fn load_vocabulary(config: Option<&Path>) -> Result<Vocabulary> {
    let vocabulary = match config {
        Some(path) => corefile_meta::load_config(path)?.vocabulary,
        None => Vocabulary::default(),
    };
    vocabulary.validate()?;
    Ok(vocabulary)
}

/// Run the merge command
pub fn run_merge(args: &MergeArgs) -> Result<i32> {
    let vocabulary = load_vocabulary(args.config.as_deref())?;
    let current = read_text(&args.corefile)?;
    let rules: RulesFile = corefile_meta::load_structured(&args.rules)?;

    let merged = merge_with_report(&current, &rules.rule, &args.excluded, &vocabulary);
    tracing::debug!(rules = merged.rule_count, placement = ?merged.placement, "Merged rules file");

    if args.diff {
        print!("{}", LineDiff::compute(&current, &merged.text).unified());
        return Ok(EXIT_OK);
    }

    if !args.in_place {
        print!("{}", merged.text);
        return Ok(EXIT_OK);
    }

    if merged.text == current {
        println!(
            "{} {} is already up to date.",
            "OK".green().bold(),
            args.corefile.display()
        );
        return Ok(EXIT_OK);
    }

    fs::write(&args.corefile, &merged.text)
        .map_err(|e| corefile_meta::Error::io(&args.corefile, e))?;
    println!(
        "{} Wrote {} rule(s) to {}",
        "OK".green().bold(),
        merged.rule_count,
        args.corefile.display()
    );
    Ok(EXIT_OK)
}
