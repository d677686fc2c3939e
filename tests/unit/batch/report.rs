use super::*;

fn report() -> BatchReport {
    BatchReport {
        outcomes: vec![
            DocOutcome {
                source: PathBuf::from("/blog/a.md"),
                status: DocStatus::Written {
                    output: PathBuf::from("/out/a.png"),
                },
            },
            DocOutcome {
                source: PathBuf::from("/blog/b.md"),
                status: DocStatus::Failed {
                    error: PinError::MissingField {
                        field: "image",
                        doc: PathBuf::from("/blog/b.md"),
                    },
                },
            },
            DocOutcome {
                source: PathBuf::from("/blog/c.md"),
                status: DocStatus::Skipped,
            },
        ],
    }
}

#[test]
fn counts_by_status() {
    let r = report();
    assert_eq!((r.written(), r.failed(), r.skipped()), (1, 1, 1));
    assert!(!r.all_succeeded());

    let failures: Vec<_> = r.failures().map(|(p, e)| (p.to_path_buf(), e.kind())).collect();
    assert_eq!(failures, vec![(PathBuf::from("/blog/b.md"), "missing_field")]);
}

#[test]
fn empty_report_succeeds() {
    assert!(BatchReport::default().all_succeeded());
}

#[test]
fn json_lists_documents_with_status_tags() {
    let json = report().to_json().unwrap();
    let v: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(v["written"], 1);
    assert_eq!(v["failed"], 1);
    assert_eq!(v["skipped"], 1);

    let docs = v["documents"].as_array().unwrap();
    assert_eq!(docs[0]["status"], "written");
    assert_eq!(docs[0]["output"], "/out/a.png");
    assert_eq!(docs[1]["status"], "failed");
    assert_eq!(docs[1]["error"]["kind"], "missing_field");
    assert_eq!(docs[2]["status"], "skipped");
    assert_eq!(docs[2]["source"], "/blog/c.md");
}
