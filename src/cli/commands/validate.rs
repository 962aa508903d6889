//! ct-skills validate - Check skill frontmatter against the validation rules

use clap::Args;
use console::style;
use serde::Serialize;
use tracing::debug;

use crate::app::AppContext;
use crate::cli::output::{OutputFormat, emit_json, emit_jsonl, robot_failed, robot_ok};
use crate::core::dependencies::DependencyResolver;
use crate::error::{Result, SkillsError};
use crate::lint::{Severity, ValidationEngine, ValidationIssue, ValidationResult};

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Skill to validate (all skills when omitted)
    pub skill: Option<String>,

    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,

    /// Also report dependency cycles across the index
    #[arg(long)]
    pub cycles: bool,
}

#[derive(Debug, Serialize)]
struct SkillOutcome<'a> {
    name: &'a str,
    valid: bool,
    issues: &'a [ValidationIssue],
}

#[derive(Debug, Serialize)]
struct ValidateOutput<'a> {
    skills: Vec<SkillOutcome<'a>>,
    valid_count: usize,
    total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    cycles: Option<&'a [Vec<String>]>,
}

pub fn run(ctx: &AppContext, args: &ValidateArgs) -> Result<()> {
    let library = &ctx.library;
    let engine = ValidationEngine::new(ctx.config.validation.to_engine_config(args.strict));

    let results: Vec<(String, ValidationResult)> = match &args.skill {
        Some(name) => vec![(
            name.clone(),
            engine.validate(name, library.registry(), library.protocols()),
        )],
        None => engine
            .validate_all(library.registry(), library.protocols())
            .entries,
    };

    let cycles = if args.cycles {
        Some(DependencyResolver::new(library.registry()).find_cycles())
    } else {
        None
    };

    let valid_count = results.iter().filter(|(_, r)| r.valid).count();
    let cycle_count = cycles.as_ref().map_or(0, Vec::len);
    let passed = valid_count == results.len() && cycle_count == 0;
    debug!(
        target: "validate",
        total = results.len(),
        valid = valid_count,
        cycles = cycle_count,
        strict = engine.config().strict,
        "validation finished"
    );

    let outcomes: Vec<SkillOutcome<'_>> = results
        .iter()
        .map(|(name, result)| SkillOutcome {
            name,
            valid: result.valid,
            issues: &result.issues,
        })
        .collect();

    match ctx.output_format {
        OutputFormat::Json => {
            let output = ValidateOutput {
                skills: outcomes,
                valid_count,
                total: results.len(),
                cycles: cycles.as_deref(),
            };
            if passed {
                emit_json(&robot_ok(output))?;
            } else {
                emit_json(&robot_failed(output))?;
            }
        }
        OutputFormat::Jsonl => emit_jsonl(&outcomes)?,
        OutputFormat::Plain => {
            for outcome in &outcomes {
                for line in plain_lines(outcome) {
                    println!("{line}");
                }
            }
            for cycle in cycles.iter().flatten() {
                println!("cycle\t{}", cycle.join(" -> "));
            }
        }
        OutputFormat::Human => {
            print_human(args.skill.is_some(), &outcomes, valid_count);
            if let Some(cycles) = &cycles {
                print_cycles(cycles);
            }
        }
    }

    if passed {
        Ok(())
    } else {
        Err(SkillsError::ValidationFailed(format!(
            "{} of {} skills failed validation, {cycle_count} dependency cycle(s)",
            results.len() - valid_count,
            results.len()
        )))
    }
}

fn print_human(single: bool, outcomes: &[SkillOutcome<'_>], valid_count: usize) {
    for outcome in outcomes {
        // The full listing only shows skills that have something to say
        if !single && outcome.issues.is_empty() {
            continue;
        }
        let label = if outcome.valid {
            style("PASS:").green().bold()
        } else {
            style("FAIL:").red().bold()
        };
        println!("{label} {}", outcome.name);
        for issue in outcome.issues {
            println!("{}", issue_line(issue));
        }
    }

    if !single {
        println!("\n{valid_count}/{} skills valid", outcomes.len());
    }
}

fn print_cycles(cycles: &[Vec<String>]) {
    if cycles.is_empty() {
        println!("No dependency cycles.");
        return;
    }
    for cycle in cycles {
        println!(
            "{} {}",
            style("CYCLE:").red().bold(),
            cycle.join(" -> ")
        );
    }
}

fn issue_line(issue: &ValidationIssue) -> String {
    let level = match issue.severity {
        Severity::Error => style("ERROR").red().to_string(),
        Severity::Warn => style("WARN ").yellow().to_string(),
    };
    format!("  {level} [{}] {}", issue.field, issue.message)
}

fn plain_lines(outcome: &SkillOutcome<'_>) -> Vec<String> {
    if outcome.issues.is_empty() {
        return vec![format!("{}\tok", outcome.name)];
    }
    outcome
        .issues
        .iter()
        .map(|issue| {
            format!(
                "{}\t{}\t{}\t{}",
                outcome.name, issue.severity, issue.field, issue.message
            )
        })
        .collect()
}
