use super::*;
use crate::logic::dataset::read_kdd;
use crate::logic::dataset::tests::kdd_line;

fn table_with_labels(labels: &[&str]) -> Table {
    let text: String = labels.iter().map(|l| kdd_line(l) + "\n").collect();
    read_kdd(text.as_bytes()).unwrap()
}

fn text_values(table: &Table, name: &str) -> Vec<Option<String>> {
    table.column(name).unwrap().data.as_text().unwrap().to_vec()
}

#[test]
fn test_documented_scenario() {
    let raw = table_with_labels(&["normal.", "neptune.", "rootkit.", "unknownattack."]);
    let derived = add_targets(&raw).unwrap();

    assert_eq!(binary_target(&derived).unwrap(), &[0, 1, 1, 1]);
    assert_eq!(
        text_values(&derived, MULTI_TARGET),
        vec![None, Some("dos".to_string()), Some("u2r".to_string()), None]
    );
    assert_eq!(
        family_target(&derived).unwrap(),
        vec![None, Some(AttackFamily::Dos), Some(AttackFamily::U2r), None]
    );
}

#[test]
fn test_attack_name_null_for_normal() {
    let raw = table_with_labels(&["normal.", "smurf."]);
    let derived = add_targets(&raw).unwrap();

    assert_eq!(
        text_values(&derived, ATTACK_NAME),
        vec![None, Some("smurf.".to_string())]
    );
}

#[test]
fn test_normal_match_is_exact() {
    let raw = table_with_labels(&["normal", "Normal.", "normal."]);
    let derived = add_targets(&raw).unwrap();
    assert_eq!(binary_target(&derived).unwrap(), &[1, 1, 0]);
}

#[test]
fn test_derive_does_not_mutate_input() {
    let raw = table_with_labels(&["normal.", "back."]);
    let before = raw.clone();
    let derived = add_targets(&raw).unwrap();

    assert_eq!(raw, before);
    assert_eq!(derived.n_cols(), raw.n_cols() + 3);
    for column in raw.columns() {
        assert_eq!(derived.column(&column.name), Some(column));
    }
}

#[test]
fn test_derive_is_idempotent() {
    let raw = table_with_labels(&["normal.", "ipsweep.", "mystery."]);
    let once = add_targets(&raw).unwrap();
    let twice = add_targets(&once).unwrap();

    assert_eq!(once, twice);
    assert_eq!(twice.n_cols(), raw.n_cols() + 3);
}

#[test]
fn test_error_policy_rejects_unknown() {
    let raw = table_with_labels(&["normal.", "mystery.", "mystery."]);
    let deriver = TargetDeriver::new(UnknownLabelPolicy::Error);

    match deriver.derive(&raw) {
        Err(KddError::UnknownLabel { label, count }) => {
            assert_eq!(label, "mystery.");
            assert_eq!(count, 2);
        }
        other => panic!("Expected UnknownLabel, got {:?}", other),
    }

    let known = table_with_labels(&["normal.", "satan."]);
    assert!(deriver.derive(&known).is_ok());
}

#[test]
fn test_null_policy_keeps_rows() {
    let raw = table_with_labels(&["mystery.", "pod."]);
    let derived = TargetDeriver::new(UnknownLabelPolicy::Null).derive(&raw).unwrap();
    assert_eq!(derived.n_rows(), 2);
    assert_eq!(family_target(&derived).unwrap(), vec![None, Some(AttackFamily::Dos)]);
}

#[test]
fn test_policy_parse() {
    assert_eq!(UnknownLabelPolicy::parse("WARN"), Some(UnknownLabelPolicy::Warn));
    assert_eq!(UnknownLabelPolicy::parse("strict"), Some(UnknownLabelPolicy::Error));
    assert_eq!(UnknownLabelPolicy::parse("null"), Some(UnknownLabelPolicy::Null));
    assert_eq!(UnknownLabelPolicy::parse("drop"), None);
    assert_eq!(UnknownLabelPolicy::default(), UnknownLabelPolicy::Warn);
}

#[test]
fn test_label_stats() {
    let raw = table_with_labels(&["normal.", "normal.", "neptune.", "mystery.", "mystery.", "odd."]);
    let stats = label_stats(&raw).unwrap();

    assert_eq!(stats.total, 6);
    assert_eq!(stats.normal, 2);
    assert_eq!(stats.attack, 4);
    assert_eq!(
        stats.unknown,
        vec![("mystery.".to_string(), 2), ("odd.".to_string(), 1)]
    );
    assert_eq!(stats.unknown_rows(), 3);
}

#[test]
fn test_prepare_multiclass() {
    let raw = table_with_labels(&["normal.", "neptune.", "rootkit.", "unknownattack."]);
    let derived = add_targets(&raw).unwrap();
    let multi = prepare_multiclass(&derived).unwrap();

    assert_eq!(multi.n_rows(), 3);
    assert_eq!(
        multiclass_target(&multi).unwrap(),
        vec![
            TrafficClass::Normal,
            TrafficClass::Attack(AttackFamily::Dos),
            TrafficClass::Attack(AttackFamily::U2r),
        ]
    );
    // Derived table itself keeps its null normal family
    assert_eq!(text_values(&derived, MULTI_TARGET)[0], None);
}

#[test]
fn test_multiclass_target_requires_preparation() {
    let derived = add_targets(&table_with_labels(&["normal.", "smurf."])).unwrap();
    assert!(multiclass_target(&derived).is_err());
}

#[test]
fn test_missing_label_column() {
    let raw = table_with_labels(&["normal."]).drop_columns(&[LABEL_COLUMN]);
    assert!(matches!(add_targets(&raw), Err(KddError::ColumnNotFound(_))));
}

#[test]
fn test_every_table_label_gets_its_family() {
    use crate::logic::schema::ATTACK_FAMILY_TABLE;

    let labels: Vec<&str> = ATTACK_FAMILY_TABLE.iter().map(|(l, _)| *l).collect();
    let derived = TargetDeriver::new(UnknownLabelPolicy::Error)
        .derive(&table_with_labels(&labels))
        .unwrap();

    let families = family_target(&derived).unwrap();
    assert_eq!(families.len(), ATTACK_FAMILY_TABLE.len());
    for ((label, family), derived_family) in ATTACK_FAMILY_TABLE.iter().zip(&families) {
        assert_eq!(*derived_family, Some(*family), "{}", label);
        assert_eq!(*derived_family, lookup_family(label), "{}", label);
    }
    assert!(binary_target(&derived).unwrap().iter().all(|&b| b == 1));
}
