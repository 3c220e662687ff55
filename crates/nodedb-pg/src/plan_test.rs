use super::*;

fn reversible(version: i64, description: &str) -> [MigrationInfo; 2] {
    [
        MigrationInfo {
            version,
            description: description.to_string(),
            reversible_down: false,
        },
        MigrationInfo {
            version,
            description: description.to_string(),
            reversible_down: true,
        },
    ]
}

fn simple(version: i64, description: &str) -> MigrationInfo {
    MigrationInfo {
        version,
        description: description.to_string(),
        reversible_down: false,
    }
}

fn sample_set() -> Vec<MigrationInfo> {
    let mut set = Vec::new();
    set.extend(reversible(1, "init"));
    set.extend(reversible(2, "add exit root"));
    set.push(simple(3, "backfill"));
    set
}

fn versions(plan: &[PlannedMigration]) -> Vec<i64> {
    plan.iter().map(|p| p.version).collect()
}

fn applied(versions: &[i64]) -> BTreeSet<i64> {
    versions.iter().copied().collect()
}

#[test]
fn test_up_on_empty_database_plans_everything_in_order() {
    let plan = plan_migrations(
        &sample_set(),
        &BTreeSet::new(),
        MigrationDirection::Up,
        MAX_PLAN_MIGRATIONS,
    )
    .unwrap();
    assert_eq!(versions(&plan), vec![1, 2, 3]);
    assert_eq!(plan[1].description, "add exit root");
}

#[test]
fn test_up_skips_applied() {
    let plan = plan_migrations(
        &sample_set(),
        &applied(&[1]),
        MigrationDirection::Up,
        MAX_PLAN_MIGRATIONS,
    )
    .unwrap();
    assert_eq!(versions(&plan), vec![2, 3]);
}

#[test]
fn test_up_when_current_is_empty() {
    let plan = plan_migrations(
        &sample_set(),
        &applied(&[1, 2, 3]),
        MigrationDirection::Up,
        MAX_PLAN_MIGRATIONS,
    )
    .unwrap();
    assert!(plan.is_empty());
}

#[test]
fn test_down_reverts_newest_first_and_skips_simple() {
    let plan = plan_migrations(
        &sample_set(),
        &applied(&[1, 2, 3]),
        MigrationDirection::Down,
        MAX_PLAN_MIGRATIONS,
    )
    .unwrap();
    assert_eq!(versions(&plan), vec![2, 1]);
}

#[test]
fn test_down_on_empty_database_is_empty() {
    let plan = plan_migrations(
        &sample_set(),
        &BTreeSet::new(),
        MigrationDirection::Down,
        MAX_PLAN_MIGRATIONS,
    )
    .unwrap();
    assert!(plan.is_empty());
}

#[test]
fn test_unsorted_input_is_ordered() {
    let mut set = sample_set();
    set.reverse();
    let plan = plan_migrations(&set, &BTreeSet::new(), MigrationDirection::Up, 10).unwrap();
    assert_eq!(versions(&plan), vec![1, 2, 3]);
}

#[test]
fn test_limit_truncates() {
    let plan = plan_migrations(&sample_set(), &BTreeSet::new(), MigrationDirection::Up, 2).unwrap();
    assert_eq!(versions(&plan), vec![1, 2]);
}

#[test]
fn test_unknown_applied_version_is_plan_error() {
    let err = plan_migrations(
        &sample_set(),
        &applied(&[1, 42]),
        MigrationDirection::Up,
        MAX_PLAN_MIGRATIONS,
    )
    .unwrap_err();
    assert!(matches!(err, DbError::PlanError(_)));
    assert!(err.to_string().contains("42"));
}
