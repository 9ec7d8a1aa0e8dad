use cladesort::batch::{BatchConfig, BatchError, ProcessingErrorKind, run_batch};
use cladesort::classify::Label;
use cladesort::taxonomy::Taxonomy;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const FIXTURES: [&str; 7] = [
    "malformed.nwk",
    "missing_taxon.nwk",
    "paraphyletic_arthrobotrys.nwk",
    "polytomy_all_genera.nwk",
    "sister_arthrobotrys_dactylellina.nwk",
    "sister_arthrobotrys_drechslerella.nwk",
    "sister_dactylellina_drechslerella.nwk",
];

/// Copies all fixtures into a fresh input folder.
fn setup_input(dir: &TempDir) -> PathBuf {
    let input = dir.path().join("trees");
    fs::create_dir(&input).unwrap();
    for name in FIXTURES {
        fs::copy(Path::new("tests").join("fixtures").join(name), input.join(name)).unwrap();
    }
    input
}

fn read_summary(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_batch_buckets_and_summary() {
    let dir = TempDir::new().unwrap();
    let input = setup_input(&dir);
    let output = dir.path().join("out");

    let report = run_batch(&BatchConfig::new(&input, &output), &Taxonomy::default()).unwrap();

    assert_eq!(report.labels.len(), 5);
    assert_eq!(report.errors.len(), 2);
    let failed: Vec<_> = report.errors.iter().map(|e| e.file.as_str()).collect();
    assert_eq!(failed, vec!["malformed.nwk", "missing_taxon.nwk"]);
    assert!(matches!(report.errors[0].kind, ProcessingErrorKind::Parse(_)));
    assert!(matches!(report.errors[1].kind, ProcessingErrorKind::Classify(_)));

    // Buckets
    for label in Label::final_labels(3) {
        assert!(output.join(label.to_string()).is_dir(), "{}", label);
    }
    assert!(output.join("tree1").join("sister_arthrobotrys_dactylellina.nwk").is_file());
    assert!(output.join("tree2").join("sister_arthrobotrys_drechslerella.nwk").is_file());
    assert!(output.join("tree3").join("sister_dactylellina_drechslerella.nwk").is_file());
    assert!(output.join("other").join("polytomy_all_genera.nwk").is_file());
    assert!(output.join("unclassified").join("paraphyletic_arthrobotrys.nwk").is_file());
    assert!(!output.join("unclassified").join("malformed.nwk").exists());

    // Copies are byte-identical
    assert_eq!(
        fs::read(input.join("polytomy_all_genera.nwk")).unwrap(),
        fs::read(output.join("other").join("polytomy_all_genera.nwk")).unwrap()
    );

    // Summary
    assert_eq!(report.summary_path, output.join("tree_classification_summary.csv"));
    assert_eq!(
        read_summary(&report.summary_path),
        vec![
            "Tree File,Classification",
            "paraphyletic_arthrobotrys.nwk,unclassified",
            "polytomy_all_genera.nwk,other",
            "sister_arthrobotrys_dactylellina.nwk,tree1",
            "sister_arthrobotrys_drechslerella.nwk,tree2",
            "sister_dactylellina_drechslerella.nwk,tree3",
        ]
    );

    let counts = report.counts(3);
    assert_eq!(counts[&Label::Signature(1)], 1);
    assert_eq!(counts[&Label::Other], 1);
}

#[test]
fn test_parallel_matches_sequential() {
    let dir = TempDir::new().unwrap();
    let input = setup_input(&dir);
    let taxonomy = Taxonomy::default();

    let sequential = run_batch(
        &BatchConfig::new(&input, dir.path().join("seq")),
        &taxonomy,
    )
    .unwrap();
    let parallel = run_batch(
        &BatchConfig::new(&input, dir.path().join("par")).with_jobs(4),
        &taxonomy,
    )
    .unwrap();

    assert_eq!(sequential.labels, parallel.labels);
    assert_eq!(
        read_summary(&sequential.summary_path),
        read_summary(&parallel.summary_path)
    );
    assert_eq!(sequential.errors.len(), parallel.errors.len());
}

#[test]
fn test_no_copy_writes_summary_only() {
    let dir = TempDir::new().unwrap();
    let input = setup_input(&dir);
    let output = dir.path().join("out");
    let config = BatchConfig::new(&input, &output)
        .with_copy_files(false)
        .with_summary_name("labels.csv");

    let report = run_batch(&config, &Taxonomy::default()).unwrap();

    assert_eq!(report.summary_path, output.join("labels.csv"));
    assert!(report.summary_path.is_file());
    assert!(!output.join("tree1").exists());
    assert_eq!(read_summary(&report.summary_path).len(), 6);
}

#[test]
fn test_subfolders_and_non_tree_files() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("trees");
    fs::create_dir_all(input.join("archive")).unwrap();
    fs::copy(
        Path::new("tests").join("fixtures").join("polytomy_all_genera.nwk"),
        input.join("archive").join("hidden.nwk"),
    )
    .unwrap();
    fs::write(input.join("notes.txt"), "not a tree").unwrap();
    fs::write(input.join("x.nwk"), "((x1,x2),((y1,y2),(z1,z2)));").unwrap();

    let taxonomy = Taxonomy::from_toml_str(
        "[taxa]\nx1 = \"X\"\nx2 = \"X\"\ny1 = \"Y\"\ny2 = \"Y\"\nz1 = \"Z\"\nz2 = \"Z\"\n",
    )
    .unwrap();
    let report = run_batch(&BatchConfig::new(&input, dir.path().join("out")), &taxonomy).unwrap();

    assert_eq!(report.labels.len(), 1);
    assert_eq!(report.labels["x.nwk"], Label::Signature(3));
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].file, "notes.txt");
    assert!(report.errors[0].to_string().starts_with("Error processing notes.txt:"));
}

#[test]
fn test_empty_input_folder() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("empty");
    fs::create_dir(&input).unwrap();
    let output = dir.path().join("out");

    let report = run_batch(&BatchConfig::new(&input, &output), &Taxonomy::default()).unwrap();

    assert!(report.labels.is_empty());
    assert!(report.errors.is_empty());
    assert_eq!(read_summary(&report.summary_path), vec!["Tree File,Classification"]);
    assert!(output.join("unclassified").is_dir());
}

#[test]
fn test_missing_input_folder_is_fatal() {
    let dir = TempDir::new().unwrap();
    let config = BatchConfig::new(dir.path().join("nope"), dir.path().join("out"));
    let err = run_batch(&config, &Taxonomy::default()).unwrap_err();
    assert!(matches!(err, BatchError::InputNotFound(_)));
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_unwritable_output_is_fatal() {
    let dir = TempDir::new().unwrap();
    let input = setup_input(&dir);
    // A file where the output folder should go
    let output = dir.path().join("out");
    fs::write(&output, "occupied").unwrap();

    let err = run_batch(&BatchConfig::new(&input, &output), &Taxonomy::default()).unwrap_err();
    assert!(matches!(err, BatchError::CreateOutput { .. }));
}

#[test]
fn test_deeply_nested_trees_do_not_stop_batch() {
    const DEPTH: usize = 20_000;
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("trees");
    fs::create_dir(&input).unwrap();

    // Ladder of unregistered leaves around a tree1 core
    let core = fs::read_to_string(
        Path::new("tests").join("fixtures").join("sister_arthrobotrys_dactylellina.nwk"),
    )
    .unwrap();
    let core = core.trim().strip_suffix(';').unwrap();
    let mut ladder = "(".repeat(DEPTH);
    ladder.push_str(core);
    for i in 0..DEPTH {
        ladder.push_str(&format!(",out{})", i));
    }
    ladder.push(';');
    fs::write(input.join("a_ladder.nwk"), ladder).unwrap();

    // Never closed
    fs::write(input.join("b_unclosed.nwk"), "(".repeat(5 * DEPTH)).unwrap();
    fs::copy(
        Path::new("tests").join("fixtures").join("sister_dactylellina_drechslerella.nwk"),
        input.join("c_ok.nwk"),
    )
    .unwrap();

    let config = BatchConfig::new(&input, dir.path().join("out")).with_jobs(2);
    let report = run_batch(&config, &Taxonomy::default()).unwrap();

    assert_eq!(report.labels["a_ladder.nwk"], Label::Signature(1));
    assert_eq!(report.labels["c_ok.nwk"], Label::Signature(3));
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].file, "b_unclosed.nwk");
    assert!(matches!(report.errors[0].kind, ProcessingErrorKind::Parse(_)));
}
