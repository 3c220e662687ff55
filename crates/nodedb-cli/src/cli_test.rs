use super::*;
use clap::CommandFactory;

#[test]
fn verify_cli_args() {
    // Validates the entire command tree: short flag conflicts,
    // duplicate args, and other clap definition errors.
    Cli::command().debug_assert();
}

#[test]
fn test_migrate_up_defaults_to_state() {
    let cli = Cli::try_parse_from(["nodedb", "migrate", "up"]).unwrap();
    match cli.command {
        Commands::Migrate(args) => {
            assert_eq!(args.direction, DirectionArg::Up);
            assert_eq!(args.target.set, "state");
            assert!(args.target.migrations_dir.is_none());
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_check_down_for_pool() {
    let cli = Cli::try_parse_from([
        "nodedb", "-c", "/etc/nodedb.yml", "check", "--set", "pool", "-d", "down",
    ])
    .unwrap();
    assert_eq!(cli.global.config, "/etc/nodedb.yml");
    match cli.command {
        Commands::Check(args) => {
            assert_eq!(args.target.set, "pool");
            assert_eq!(
                MigrationDirection::from(args.direction),
                MigrationDirection::Down
            );
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_migrate_requires_direction() {
    assert!(Cli::try_parse_from(["nodedb", "migrate"]).is_err());
    assert!(Cli::try_parse_from(["nodedb", "migrate", "sideways"]).is_err());
}

#[test]
fn test_plan_with_migrations_dir() {
    let cli = Cli::try_parse_from([
        "nodedb",
        "plan",
        "--migrations-dir",
        "./db/migrations/state",
        "--json",
    ])
    .unwrap();
    match cli.command {
        Commands::Plan(args) => {
            assert_eq!(
                args.target.migrations_dir.as_deref(),
                Some("./db/migrations/state")
            );
            assert!(args.json);
            assert_eq!(args.direction, DirectionArg::Up);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}
