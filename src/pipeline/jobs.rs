//! File jobs.
//!
//! Each job follows the same workflow:
//! 1. Read the whole input table
//! 2. Transform it in memory
//! 3. Write the output table (atomically)
//! 4. Return a report, or log and return the error
//!
//! A job never leaves a partial output behind.

use std::collections::HashMap;

use crate::augmentation::{
    assign_splits, backtranslate, class_counts, select_rows, AugmentationPlan, ClassCount,
    Translator, TRAIN_SPLIT,
};
use crate::config::JobConfig;
use crate::error::Result;
use crate::logging::structured::LogContext;
use crate::preprocessing::Normalizer;
use crate::redaction::{PrivacyFilter, RedactionStats};

use super::context::{JobContext, JobReport};
use super::table::Table;

/// What a transform did to the table.
#[derive(Debug, Default)]
struct Outcome {
    cells_changed: usize,
    redactions: Option<RedactionStats>,
}

/// Redact PII in every column except the first.
pub fn filter_file(config: &JobConfig) -> Result<JobReport> {
    let job = JobContext::new("filter");
    let filter = PrivacyFilter::new();
    run_job(&job, config, |table| Ok(filter_table(&job, &filter, table)))
}

/// Stem and strip stopwords from the configured text column.
pub fn normalize_file(config: &JobConfig, normalizer: &Normalizer) -> Result<JobReport> {
    let job = JobContext::new("normalize");
    run_job(&job, config, |table| {
        let column = table.require_column(&config.text_column, &config.input)?;
        Ok(normalize_table(&job, normalizer, table, column))
    })
}

/// Balance the training split with backtranslated rows.
pub fn augment_file(config: &JobConfig, translator: &dyn Translator) -> Result<JobReport> {
    let job = JobContext::new("augment");
    run_job(&job, config, |table| augment_table(&job, config, translator, table))
}

fn run_job<F>(job: &JobContext, config: &JobConfig, transform: F) -> Result<JobReport>
where
    F: FnOnce(&mut Table) -> Result<Outcome>,
{
    let ctx = job.log_context();
    log::info!(
        "{} JOB_START kind={} input={} output={}",
        ctx,
        job.kind,
        config.input.display(),
        config.output.display()
    );

    match execute(job, config, transform) {
        Ok(report) => {
            log::info!(
                "{} JOB_COMPLETE kind={} rows_read={} rows_written={} cells_changed={} elapsed_ms={}",
                ctx,
                report.kind,
                report.rows_read,
                report.rows_written,
                report.cells_changed,
                report.elapsed_ms()
            );
            Ok(report)
        }
        Err(e) => {
            crate::log_error!(ctx, "JOB_FAILED", kind = job.kind, error = e.to_string());
            Err(e)
        }
    }
}

fn execute<F>(job: &JobContext, config: &JobConfig, transform: F) -> Result<JobReport>
where
    F: FnOnce(&mut Table) -> Result<Outcome>,
{
    let delimiter = config.delimiter_byte();
    let mut table = Table::read(&config.input, delimiter)?;
    let rows_read = table.rows.len();

    let outcome = transform(&mut table)?;
    table.write(&config.output, delimiter)?;

    let report = job.finish(rows_read, table.rows.len(), outcome.cells_changed);
    Ok(match outcome.redactions {
        Some(stats) => report.with_redactions(stats),
        None => report,
    })
}

fn filter_table(job: &JobContext, filter: &PrivacyFilter, table: &mut Table) -> Outcome {
    let mut totals = RedactionStats::default();
    let mut cells_changed = 0;

    for (index, row) in table.rows.iter_mut().enumerate() {
        let ctx = job.row_context(index + 1);
        for cell in row.iter_mut().skip(1) {
            let (redacted, stats) = filter.redact(cell, &ctx);
            if stats.total_entities() > 0 {
                cells_changed += 1;
                totals.merge(&stats);
                *cell = redacted;
            }
        }
    }

    log::info!(
        "{} PII_SUMMARY phones={} emails={} postal_codes={} dates={} cells_changed={}",
        job.log_context(),
        totals.phones_found,
        totals.emails_found,
        totals.postal_codes_found,
        totals.dates_found,
        cells_changed
    );

    Outcome {
        cells_changed,
        redactions: Some(totals),
    }
}

fn normalize_table(
    job: &JobContext,
    normalizer: &Normalizer,
    table: &mut Table,
    column: usize,
) -> Outcome {
    let mut cells_changed = 0;

    for row in 0..table.rows.len() {
        let original = table.cell(row, column);
        let normalized = normalizer.normalize(original);
        if normalized != original {
            cells_changed += 1;
            table.set_cell(row, column, normalized);
        }
    }

    crate::log_debug!(job.log_context(), "NORMALIZE_SUMMARY", cells_changed = cells_changed);

    Outcome {
        cells_changed,
        redactions: None,
    }
}

fn augment_table(
    job: &JobContext,
    config: &JobConfig,
    translator: &dyn Translator,
    table: &mut Table,
) -> Result<Outcome> {
    let ctx = job.log_context();
    let text_column = table.require_column(&config.text_column, &config.input)?;
    let label_column = table.require_column(&config.label_column, &config.input)?;

    let split_column = match table.column_index(&config.split_column) {
        Some(column) => column,
        None => {
            let column = table.add_column(&config.split_column, TRAIN_SPLIT);
            for (row, split) in assign_splits(table.rows.len(), config.test_fraction)
                .into_iter()
                .enumerate()
            {
                table.set_cell(row, column, split.to_string());
            }
            log::info!(
                "{} SPLIT_ASSIGNED column={} test_fraction={}",
                ctx,
                config.split_column,
                config.test_fraction
            );
            column
        }
    };

    let flag_column = match table.column_index(&config.augment_flag_column) {
        Some(column) => {
            for row in 0..table.rows.len() {
                table.set_cell(row, column, "False".to_string());
            }
            column
        }
        None => table.add_column(&config.augment_flag_column, "False"),
    };

    let train_rows: Vec<usize> = (0..table.rows.len())
        .filter(|&row| table.cell(row, split_column) == TRAIN_SPLIT)
        .collect();

    let before = class_counts(train_rows.iter().map(|&row| table.cell(row, label_column)));
    log_distribution(&ctx, "before", &before);

    let plan = AugmentationPlan::from_counts(&before);
    log::info!(
        "{} BALANCE_PLAN target={} rows_to_generate={}",
        ctx,
        plan.target,
        plan.total_needed()
    );

    let mut rows_by_label: HashMap<&str, Vec<usize>> = HashMap::new();
    for &row in &train_rows {
        rows_by_label
            .entry(table.cell(row, label_column))
            .or_default()
            .push(row);
    }

    let mut augmented = Vec::with_capacity(plan.total_needed());
    for (label, needed) in &plan.needed {
        let sources = rows_by_label
            .get(label.as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        log::info!("{} AUGMENT_CLASS label={:?} rows={}", ctx, label, needed);

        for source in select_rows(sources, *needed) {
            let row_ctx = job.row_context(source + 1);
            let paraphrase = backtranslate(translator, table.cell(source, text_column), &row_ctx);

            let mut row = table.rows[source].clone();
            let width = row.len().max(flag_column + 1).max(split_column + 1).max(text_column + 1);
            row.resize(width, String::new());
            row[text_column] = paraphrase;
            row[flag_column] = "True".to_string();
            row[split_column] = TRAIN_SPLIT.to_string();
            augmented.push(row);
        }
    }

    let generated = augmented.len();
    table.rows.extend(augmented);

    let after = class_counts(
        (0..table.rows.len())
            .filter(|&row| table.cell(row, split_column) == TRAIN_SPLIT)
            .map(|row| table.cell(row, label_column)),
    );
    log_distribution(&ctx, "after", &after);

    Ok(Outcome {
        cells_changed: generated,
        redactions: None,
    })
}

fn log_distribution(ctx: &LogContext, stage: &str, counts: &[ClassCount]) {
    let summary: Vec<String> = counts
        .iter()
        .map(|c| format!("{:?}={}", c.label, c.count))
        .collect();
    log::info!(
        "{} CLASS_DISTRIBUTION stage={} {}",
        ctx,
        stage,
        summary.join(" ")
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[&[&str]]) -> Table {
        let mut table = Table::new(rows[0].iter().map(|s| s.to_string()).collect());
        table.rows = rows[1..]
            .iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect();
        table
    }

    #[test]
    fn test_filter_table_skips_first_column() {
        let job = JobContext::new("filter");
        let mut t = table(&[
            &["id", "text", "notes"],
            &["0612345678", "bel 0612345678", "geen"],
            &["2", "mail a@b.nl", "1234 AB, Utrecht"],
        ]);

        let outcome = filter_table(&job, &PrivacyFilter::new(), &mut t);

        assert_eq!(t.rows[0], vec!["0612345678", "bel <PHONE>", "geen"]);
        assert_eq!(t.rows[1], vec!["2", "mail <EMAIL>", "<POSTALCODE>, Utrecht"]);
        assert_eq!(outcome.cells_changed, 3);
        let stats = outcome.redactions.unwrap();
        assert_eq!(stats.phones_found, 1);
        assert_eq!(stats.total_entities(), 3);
    }

    #[test]
    fn test_normalize_table_only_touches_text_column() {
        let job = JobContext::new("normalize");
        let mut t = table(&[&["id", "combined_text"], &["de", "de en het"]]);
        let outcome = normalize_table(&job, &Normalizer::new(), &mut t, 1);
        assert_eq!(t.rows[0], vec!["de", ""]);
        assert_eq!(outcome.cells_changed, 1);
    }
}
