//! Integration tests for crawler-config

use crawler_config::domains::platform::DEFAULT_USER_AGENT;
use crawler_config::*;
use std::io::Write;
use std::time::Duration;
use temp_env::with_vars;

const RECOGNISED: &[&str] = &[
    "DOUYIN_ACCEPT_LANGUAGE",
    "DOUYIN_USER_AGENT",
    "DOUYIN_REFERER",
    "DOUYIN_COOKIE",
    "DOUYIN_HTTP_PROXY",
    "DOUYIN_HTTPS_PROXY",
    "TIKTOK_ACCEPT_LANGUAGE",
    "TIKTOK_USER_AGENT",
    "TIKTOK_REFERER",
    "TIKTOK_COOKIE",
    "TIKTOK_HTTP_PROXY",
    "TIKTOK_HTTPS_PROXY",
    "API_HOST",
    "API_PORT",
    "API_DEBUG",
    "API_WORKERS",
    "API_TIMEOUT",
    "LOG_LEVEL",
    "LOG_FORMAT",
];

/// Every recognised variable unset, except the given ones
fn only(set: &[(&'static str, &'static str)]) -> Vec<(&'static str, Option<&'static str>)> {
    RECOGNISED
        .iter()
        .map(|key| {
            let value = set.iter().find(|(k, _)| k == key).map(|(_, v)| *v);
            (*key, value)
        })
        .collect()
}

fn env_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_empty_environment_gives_documented_defaults() {
    with_vars(only(&[]), || {
        let config = ConfigLoader::without_env_file().load().unwrap();

        let douyin = config.douyin_headers();
        assert_eq!(douyin.accept_language, "zh-CN,zh;q=0.9");
        assert_eq!(douyin.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(douyin.referer, "https://www.douyin.com/");
        assert_eq!(douyin.cookie, "");
        assert_eq!(config.douyin_proxies(), &Proxies::default());

        let tiktok = config.tiktok_headers();
        assert_eq!(tiktok.accept_language, "en-US,en;q=0.9");
        assert_eq!(tiktok.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(tiktok.referer, "https://www.tiktok.com/");
        assert_eq!(tiktok.cookie, "");
        assert!(config.tiktok_proxies().http.is_none());
        assert!(config.tiktok_proxies().https.is_none());

        let api = config.api_settings();
        assert_eq!(api.host, "0.0.0.0");
        assert_eq!(api.port, 8000);
        assert!(!api.debug);
        assert_eq!(api.workers, 1);
        assert_eq!(api.timeout, Duration::from_secs(60));
    });
}

#[test]
fn test_tiktok_cookie_only() {
    with_vars(only(&[("TIKTOK_COOKIE", "abc123")]), || {
        let config = ConfigLoader::without_env_file().load().unwrap();

        let mut expected = Headers::defaults_for(Platform::Tiktok);
        expected.cookie = "abc123".to_string();
        assert_eq!(config.tiktok_headers(), &expected);
        assert_eq!(config.tiktok_headers().get("Cookie"), Some("abc123"));

        assert_eq!(
            config.douyin_headers(),
            &Headers::defaults_for(Platform::Douyin)
        );
        assert_eq!(config.api_settings(), &ApiConfig::default());
    });
}

#[test]
fn test_values_are_taken_verbatim() {
    let vars = only(&[
        ("DOUYIN_ACCEPT_LANGUAGE", "  ja-JP "),
        ("DOUYIN_USER_AGENT", "custom-agent/1.0"),
        ("DOUYIN_COOKIE", "ttwid=1%7Cabc; odin_tt=xyz"),
        ("DOUYIN_HTTP_PROXY", "http://127.0.0.1:7890"),
        ("TIKTOK_HTTPS_PROXY", "socks5://10.0.0.2:1080"),
        ("API_HOST", "127.0.0.1"),
    ]);

    with_vars(vars, || {
        let config = ConfigLoader::without_env_file().load().unwrap();
        assert_eq!(config.douyin_headers().accept_language, "  ja-JP ");
        assert_eq!(config.douyin_headers().user_agent, "custom-agent/1.0");
        assert_eq!(config.douyin_headers().cookie, "ttwid=1%7Cabc; odin_tt=xyz");
        assert_eq!(
            config.douyin_proxies().for_scheme("http"),
            Some("http://127.0.0.1:7890")
        );
        assert_eq!(config.douyin_proxies().for_scheme("https"), None);
        assert_eq!(
            config.tiktok_proxies().https.as_deref(),
            Some("socks5://10.0.0.2:1080")
        );
        assert_eq!(config.api_settings().host, "127.0.0.1");
    });
}

#[test]
fn test_api_debug_flag() {
    for value in ["true", "TRUE", "True"] {
        with_vars(only(&[("API_DEBUG", value)]), || {
            let config = ConfigLoader::without_env_file().load().unwrap();
            assert!(config.api_settings().debug, "{} should enable debug", value);
        });
    }

    for value in ["False", "1", "yes", "on", ""] {
        with_vars(only(&[("API_DEBUG", value)]), || {
            let config = ConfigLoader::without_env_file().load().unwrap();
            assert!(!config.api_settings().debug, "{:?} should not enable debug", value);
        });
    }
}

#[test]
fn test_malformed_port_is_fatal() {
    with_vars(only(&[("API_PORT", "abc")]), || {
        let err = ConfigLoader::without_env_file().load().unwrap_err();
        assert!(matches!(err, ConfigError::EnvError { .. }));
        assert_eq!(err.variable(), Some("API_PORT"));
        assert!(err.to_string().contains("API_PORT"));
    });
}

#[test]
fn test_malformed_workers_and_timeout_are_fatal() {
    with_vars(only(&[("API_WORKERS", "two")]), || {
        let err = ConfigLoader::without_env_file().load().unwrap_err();
        assert_eq!(err.variable(), Some("API_WORKERS"));
    });

    with_vars(only(&[("API_TIMEOUT", "1.5")]), || {
        let err = ConfigLoader::without_env_file().load().unwrap_err();
        assert_eq!(err.variable(), Some("API_TIMEOUT"));
    });
}

#[test]
fn test_empty_port_is_fatal() {
    with_vars(only(&[("API_PORT", "")]), || {
        let err = ConfigLoader::without_env_file().load().unwrap_err();
        assert!(matches!(err, ConfigError::EnvError { .. }));
        assert_eq!(err.variable(), Some("API_PORT"));
    });
}

#[test]
fn test_negative_workers_are_rejected() {
    with_vars(only(&[("API_WORKERS", "-1")]), || {
        let err = ConfigLoader::without_env_file().load().unwrap_err();
        assert_eq!(err.variable(), Some("API_WORKERS"));
    });
}

#[test]
fn test_zero_workers_and_timeout_load() {
    with_vars(only(&[("API_WORKERS", "0"), ("API_TIMEOUT", "0")]), || {
        let config = ConfigLoader::without_env_file().load().unwrap();
        assert_eq!(config.api_settings().workers, 0);
        assert_eq!(config.api_settings().timeout_secs(), 0);
    });
}

#[test]
fn test_env_file_supplies_missing_values() {
    let file = env_file(
        "# crawler settings\n\
         DOUYIN_COOKIE=from_file\n\
         API_PORT=9001\n\
         API_DEBUG=true\n",
    );

    with_vars(only(&[]), || {
        let config = ConfigLoader::with_env_file(file.path()).load().unwrap();
        assert_eq!(config.douyin_headers().cookie, "from_file");
        assert_eq!(config.api_settings().port, 9001);
        assert!(config.api_settings().debug);
    });
}

#[test]
fn test_process_environment_wins_over_env_file() {
    let file = env_file("TIKTOK_REFERER=https://file.example/\nAPI_PORT=9001\n");

    with_vars(only(&[("TIKTOK_REFERER", "https://process.example/")]), || {
        let config = ConfigLoader::with_env_file(file.path()).load().unwrap();
        assert_eq!(config.tiktok_headers().referer, "https://process.example/");
        assert_eq!(config.api_settings().port, 9001);
    });
}

#[test]
fn test_env_file_does_not_modify_process_environment() {
    let file = env_file("DOUYIN_COOKIE=from_file\n");

    with_vars(only(&[]), || {
        let config = ConfigLoader::with_env_file(file.path()).load().unwrap();
        assert_eq!(config.douyin_headers().cookie, "from_file");
        assert!(std::env::var("DOUYIN_COOKIE").is_err());
    });
}

#[test]
fn test_missing_env_file_is_ignored() {
    let dir = tempfile::tempdir().unwrap();

    with_vars(only(&[]), || {
        let config = ConfigLoader::with_env_file(dir.path().join(".env"))
            .load()
            .unwrap();
        assert_eq!(config, CrawlerConfig::default());
    });
}

#[test]
fn test_malformed_env_file_is_an_error() {
    let file = env_file("THIS LINE IS NOT AN ASSIGNMENT\n");

    with_vars(only(&[]), || {
        let err = ConfigLoader::with_env_file(file.path()).load().unwrap_err();
        assert!(matches!(err, ConfigError::EnvFileError(_)));
    });
}

#[test]
fn test_malformed_integer_in_env_file_is_fatal() {
    let file = env_file("API_WORKERS=many\n");

    with_vars(only(&[]), || {
        let err = ConfigLoader::with_env_file(file.path()).load().unwrap_err();
        assert_eq!(err.variable(), Some("API_WORKERS"));
    });
}

#[test]
fn test_identical_snapshots_give_equal_configs() {
    let env = EnvSnapshot::from_pairs([
        ("DOUYIN_COOKIE", "a"),
        ("TIKTOK_HTTP_PROXY", "http://proxy:3128"),
        ("API_WORKERS", "8"),
    ]);

    let first = ConfigLoader::from_snapshot(&env).unwrap();
    let second = ConfigLoader::from_snapshot(&env.clone()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_config_is_shareable_across_threads() {
    let config = std::sync::Arc::new(CrawlerConfig::default());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let config = std::sync::Arc::clone(&config);
            std::thread::spawn(move || config.api_settings().port)
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 8000);
    }
}
