use super::*;

fn local_config() -> DbConfig {
    DbConfig {
        host: "127.0.0.1".to_string(),
        port: "5432".to_string(),
        user: "pool_user".to_string(),
        password: "pool_password".to_string(),
        name: "pool_db".to_string(),
        max_conns: 4,
        enable_log: false,
    }
}

#[test]
fn test_parse_pool_descriptor() {
    let descriptor =
        PoolDescriptor::parse("postgres://pool_user:pw@db.internal:5433/pool_db?pool_max_conns=7")
            .unwrap();
    assert_eq!(descriptor.max_conns, Some(7));
    assert_eq!(descriptor.connect_options.get_host(), "db.internal");
    assert_eq!(descriptor.connect_options.get_port(), 5433);
    assert_eq!(descriptor.connect_options.get_username(), "pool_user");
    assert_eq!(descriptor.connect_options.get_database(), Some("pool_db"));
}

#[test]
fn test_parse_without_pool_size() {
    let descriptor = PoolDescriptor::parse("postgres://u:pw@localhost:5432/state_db").unwrap();
    assert_eq!(descriptor.max_conns, None);
}

#[test]
fn test_parse_keeps_driver_parameters() {
    let descriptor = PoolDescriptor::parse(
        "postgres://u:pw@localhost:5432/db?application_name=nodedb&pool_max_conns=2",
    )
    .unwrap();
    assert_eq!(descriptor.max_conns, Some(2));
    assert_eq!(
        descriptor.connect_options.get_application_name(),
        Some("nodedb")
    );
}

#[test]
fn test_parse_rejects_bad_pool_size() {
    for bad in ["0", "many", "-3"] {
        let err = PoolDescriptor::parse(&format!(
            "postgres://u:pw@localhost:5432/db?pool_max_conns={bad}"
        ))
        .unwrap_err();
        assert!(matches!(err, DbError::ConfigError(_)), "{bad}: {err}");
    }
}

#[test]
fn test_parse_rejects_garbage_and_foreign_scheme() {
    assert!(matches!(
        PoolDescriptor::parse("not a url").unwrap_err(),
        DbError::ConfigError(_)
    ));
    assert!(matches!(
        PoolDescriptor::parse("mysql://u:pw@localhost:3306/db").unwrap_err(),
        DbError::ConfigError(_)
    ));
}

#[test]
fn test_descriptor_from_config_round_trip() {
    let config = local_config();
    let descriptor = PoolDescriptor::parse(&config.pool_url().unwrap()).unwrap();
    assert_eq!(descriptor.max_conns, Some(4));
    assert_eq!(descriptor.connect_options.get_database(), Some("pool_db"));
}

#[test]
fn test_database_name_with_reserved_characters_round_trips() {
    for name in ["orders#2024", "orders?sslmode=disable", "a/b", "50%"] {
        let config = DbConfig {
            name: name.to_string(),
            ..local_config()
        };
        let descriptor = PoolDescriptor::parse(&config.pool_url().unwrap()).unwrap();
        assert_eq!(descriptor.connect_options.get_database(), Some(name));
        assert_eq!(descriptor.max_conns, Some(4));
    }
}

#[test]
fn test_statement_logging_follows_enable_log() {
    let base = PoolDescriptor::parse("postgres://u:pw@localhost:5432/db")
        .unwrap()
        .connect_options;

    let off = format!("{:?}", with_statement_logging(base.clone(), false));
    assert!(off.contains("LogSettings { statements_level: Off"), "{off}");
    assert!(off.contains("slow_statements_level: Off"), "{off}");

    let on = format!(
        "{:?}",
        with_statement_logging(base.disable_statement_logging(), true)
    );
    assert!(on.contains("LogSettings { statements_level: Debug"), "{on}");
    assert!(on.contains("slow_statements_level: Warn"), "{on}");
}

#[tokio::test]
async fn test_open_pool_bad_port_is_config_error() {
    let config = DbConfig {
        port: "not-a-port".to_string(),
        ..local_config()
    };
    let err = open_pool(&config).await.unwrap_err();
    assert!(matches!(err, DbError::ConfigError(_)), "{err}");
    assert!(err.to_string().starts_with("[D001]"));
}

#[tokio::test]
async fn test_open_pool_missing_field_is_config_error() {
    let config = DbConfig {
        user: String::new(),
        ..local_config()
    };
    assert!(matches!(
        open_pool(&config).await.unwrap_err(),
        DbError::ConfigError(_)
    ));
}

#[tokio::test]
async fn test_open_connection_refused_is_connection_error() {
    // Port 1 is reserved (tcpmux) and not served on test machines.
    let config = DbConfig {
        port: "1".to_string(),
        ..local_config()
    };
    let err = open_connection(&config).await.unwrap_err();
    assert!(matches!(err, DbError::ConnectionError(_)), "{err}");
    assert!(!err.to_string().contains("pool_password"));
}
