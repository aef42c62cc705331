//! End-to-end file jobs against scratch files.

use std::fs;
use std::path::PathBuf;

use privacy_filter::augmentation::{Lang, Translator};
use privacy_filter::{
    augment_file, filter_file, normalize_file, JobConfig, Normalizer, PipelineError,
    TranslateError,
};

struct Scratch {
    dir: PathBuf,
}

impl Scratch {
    fn new() -> Self {
        let dir = std::env::temp_dir().join(format!("privacy-filter-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, contents).unwrap();
        path
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.dir);
    }
}

/// Prefixes the text instead of translating it.
struct EchoTranslator;

impl Translator for EchoTranslator {
    fn translate(&self, text: &str, _from: Lang, to: Lang) -> Result<String, TranslateError> {
        if to == Lang::Dutch {
            Ok(format!("parafrase: {}", text))
        } else {
            Ok(text.to_string())
        }
    }
}

#[test]
fn filter_job_redacts_all_but_first_column() {
    privacy_filter::init_logger();
    let scratch = Scratch::new();
    let input = scratch.write(
        "raw.csv",
        "ticket;combined_text;contact\n\
         0612345678;Bel mij op 06-12345678;jan.jansen@example.nl\n\
         2;Afspraak op 5 januari 2024.;1234 AB, Amsterdam\n",
    );
    let output = scratch.path("filtered.csv");

    let report = filter_file(&JobConfig::new(&input, &output)).unwrap();

    let written = fs::read_to_string(&output).unwrap();
    assert_eq!(
        written,
        "ticket;combined_text;contact\n\
         0612345678;Bel mij op <PHONE>;<EMAIL>\n\
         2;Afspraak op <DATE>.;<POSTALCODE>, Amsterdam\n"
    );
    assert_eq!(report.rows_read, 2);
    assert_eq!(report.rows_written, 2);
    assert_eq!(report.cells_changed, 4);
    assert_eq!(report.redactions.unwrap().total_entities(), 4);
}

#[test]
fn filter_job_missing_input_fails_without_output() {
    let scratch = Scratch::new();
    let output = scratch.path("out.csv");

    let err = filter_file(&JobConfig::new(scratch.path("absent.csv"), &output)).unwrap_err();

    assert!(matches!(err, PipelineError::Io { .. }));
    assert!(!output.exists());
    assert_eq!(fs::read_dir(&scratch.dir).unwrap().count(), 0);
}

#[test]
fn filter_job_from_json_config() {
    let scratch = Scratch::new();
    let input = scratch.write("in.csv", "id,text\n1,mail a@b.nl\n");
    let output = scratch.path("out.csv");
    let config_path = scratch.write(
        "job.json",
        &serde_json::json!({
            "input": input,
            "output": output,
            "delimiter": ","
        })
        .to_string(),
    );

    let config = JobConfig::from_json_file(&config_path).unwrap();
    filter_file(&config).unwrap();

    assert_eq!(fs::read_to_string(&output).unwrap(), "id,text\n1,mail <EMAIL>\n");
}

#[test]
fn normalize_job_rewrites_text_column() {
    let scratch = Scratch::new();
    let input = scratch.write("in.csv", "id;combined_text\n1;De en het\n2;<PHONE> niet\n");
    let output = scratch.path("out.csv");

    let report = normalize_file(&JobConfig::new(&input, &output), &Normalizer::new()).unwrap();

    assert_eq!(fs::read_to_string(&output).unwrap(), "id;combined_text\n1;\n2;\n");
    assert_eq!(report.cells_changed, 2);
    assert!(report.redactions.is_none());
}

#[test]
fn normalize_job_requires_text_column() {
    let scratch = Scratch::new();
    let input = scratch.write("in.csv", "id;body\n1;tekst\n");
    let output = scratch.path("out.csv");

    let err = normalize_file(&JobConfig::new(&input, &output), &Normalizer::new()).unwrap_err();

    assert!(matches!(err, PipelineError::MissingColumn { ref column, .. } if column == "combined_text"));
    assert!(!output.exists());
}

#[test]
fn augment_job_balances_training_split() {
    let scratch = Scratch::new();
    let input = scratch.write(
        "in.csv",
        "id;combined_text;Issue Type;split\n\
         1;storing a;Storing;train\n\
         2;storing b;Storing;train\n\
         3;storing c;Storing;train\n\
         4;storing d;Storing;train\n\
         5;vraag a;Vraag;train\n\
         6;vraag b;Vraag;train\n\
         7;klacht a;Klacht;train\n\
         8;klacht b;Klacht;test\n",
    );
    let output = scratch.path("out.csv");

    let report = augment_file(&JobConfig::new(&input, &output), &EchoTranslator).unwrap();

    // Train counts: Storing 4, Vraag 2, Klacht 1 -> median 2, one Klacht row added.
    assert_eq!(report.rows_read, 8);
    assert_eq!(report.rows_written, 9);

    let written = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines[0], "id;combined_text;Issue Type;split;is_augmented");
    assert_eq!(lines[1], "1;storing a;Storing;train;False");
    assert_eq!(lines[9], "7;parafrase: klacht a;Klacht;train;True");
}

#[test]
fn augment_job_assigns_split_when_missing() {
    let scratch = Scratch::new();
    let mut csv = String::from("id;combined_text;Issue Type\n");
    for i in 0..10 {
        csv.push_str(&format!("{};tekst {};A\n", i, i));
    }
    let input = scratch.write("in.csv", &csv);
    let output = scratch.path("out.csv");

    let report = augment_file(&JobConfig::new(&input, &output), &EchoTranslator).unwrap();

    assert_eq!(report.rows_written, 10);
    let written = fs::read_to_string(&output).unwrap();
    assert!(written.starts_with("id;combined_text;Issue Type;split;is_augmented\n"));
    assert_eq!(written.matches(";test;").count(), 2);
    assert_eq!(written.matches(";train;").count(), 8);
}
