use serial_test::serial;
use yoga_studio::backend::BackendConfig;
use yoga_studio::settings::Settings;

const VARS: &[&str] = &[
    "APP_BACKEND_URL",
    "APP_BACKEND_KEY",
    "APP_PORT",
    "APP_DEBUG",
    "APP_REQUEST_TIMEOUT_SECS",
];

fn clear_env() {
    for var in VARS {
        unsafe { std::env::remove_var(var) };
    }
}

#[test]
#[serial]
fn test_defaults_are_demo_mode() {
    clear_env();

    let settings = Settings::from_env().unwrap();

    assert_eq!(settings.port, 8080);
    assert!(!settings.debug);
    assert!(settings.enable_swagger);
    assert_eq!(settings.request_timeout_secs, 10);
    assert!(matches!(
        settings.backend(),
        BackendConfig::Unconfigured { .. }
    ));
}

#[test]
#[serial]
fn test_reads_backend_from_env() {
    clear_env();
    unsafe {
        std::env::set_var("APP_BACKEND_URL", "https://abcd.supabase.co");
        std::env::set_var("APP_BACKEND_KEY", "anon-key-123");
        std::env::set_var("APP_PORT", "9090");
        std::env::set_var("APP_DEBUG", "true");
    }

    let settings = Settings::from_env().unwrap();
    clear_env();

    assert_eq!(settings.port, 9090);
    assert!(settings.debug);
    assert!(settings.backend().is_configured());
}

#[test]
#[serial]
fn test_placeholder_env_is_demo_mode() {
    clear_env();
    unsafe {
        std::env::set_var("APP_BACKEND_URL", "https://your-project.supabase.co");
        std::env::set_var("APP_BACKEND_KEY", "your-anon-key");
    }

    let settings = Settings::from_env().unwrap();
    clear_env();

    assert!(!settings.backend().is_configured());
}
