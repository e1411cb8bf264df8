use fundingportal::config::{parse_flag, split_origins, Config};

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.bind_addr.to_string(), "127.0.0.1:3000");
    assert_eq!(config.cors_origins, vec!["http://localhost:3000"]);
    assert!(config.demo_fallback);
    assert!(config.database_url.starts_with("sqlite:"));
}

#[test]
fn test_split_origins() {
    assert_eq!(
        split_origins("http://localhost:3000, https://portal.example.org,"),
        vec!["http://localhost:3000", "https://portal.example.org"]
    );
}

#[test]
fn test_parse_flag() {
    assert!(parse_flag("true").unwrap());
    assert!(parse_flag(" YES ").unwrap());
    assert!(parse_flag("1").unwrap());
    assert!(!parse_flag("false").unwrap());
    assert!(!parse_flag("0").unwrap());
    assert!(parse_flag("maybe").is_err());
}
