//! Endpoint lifecycle driven by configuration loaded from documents

use rvoip_persist_core::ConfigDocument;
use rvoip_ua_config::logging::setup_logging;
use rvoip_ua_config::{
    AccountConfig, Endpoint, EpConfig, LibState, TransportConfig, TransportType, UaError,
};
use serial_test::serial;

fn quiet() -> EpConfig {
    let mut ep_cfg = EpConfig::default();
    ep_cfg.log_config.console_level = 0;
    ep_cfg
}

#[test]
#[serial(endpoint)]
fn init_from_loaded_document() {
    let mut ep_cfg = quiet();
    ep_cfg.ua_config.max_calls = 61;
    ep_cfg.ua_config.user_agent = "Just JSON Test".to_string();

    let mut doc = ConfigDocument::new();
    doc.write_object(&ep_cfg).unwrap();
    let loaded: EpConfig = ConfigDocument::from_json_str(&doc.save_string().unwrap())
        .unwrap()
        .read_object()
        .unwrap();

    let mut ep = Endpoint::lib_create().unwrap();
    ep.lib_init(&loaded).unwrap();
    assert_eq!(ep.state(), LibState::Initialized);
    assert_eq!(ep.config(), Some(&ep_cfg));
}

#[test]
#[serial(endpoint)]
fn full_lifecycle_with_transports() {
    let mut ep = Endpoint::lib_create().unwrap();
    ep.lib_init(&quiet()).unwrap();

    let udp = ep
        .transport_create(TransportType::Udp, &TransportConfig::with_port(5060))
        .unwrap();
    ep.lib_start().unwrap();

    // Transports may still be added once started
    let tls = ep
        .transport_create(TransportType::Tls, &TransportConfig::with_port(5061))
        .unwrap();
    let ids: Vec<_> = ep.transports().map(|t| t.id).collect();
    assert_eq!(ids, vec![udp, tls]);

    ep.lib_destroy();
    assert_eq!(ep.state(), LibState::Destroyed);
    assert!(!Endpoint::instance_exists());
    assert!(matches!(
        ep.transport_create(TransportType::Udp, &TransportConfig::default()),
        Err(UaError::InvalidState { .. })
    ));
}

#[test]
#[serial(endpoint)]
fn account_media_transport_is_accepted() {
    let mut acc_cfg = AccountConfig::new("sip:test@pjsip.org");
    acc_cfg.media_config.transport_config.port = 4000;
    acc_cfg.media_config.transport_config.port_range = 100;

    let mut ep = Endpoint::lib_create().unwrap();
    ep.lib_init(&quiet()).unwrap();
    let id = ep
        .transport_create(TransportType::Udp, &acc_cfg.media_config.transport_config)
        .unwrap();
    assert_eq!(ep.transport_info(id).unwrap().config.last_port(), 4100);
}

#[test]
#[serial(endpoint)]
fn existing_subscriber_leaves_log_file_alone() {
    // Whatever ran first in this process, a subscriber is in place after this
    setup_logging(&quiet().log_config).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("THE.LOG");
    std::fs::write(&path, "earlier log\n").unwrap();

    let mut ep_cfg = quiet();
    ep_cfg.log_config.filename = path.to_string_lossy().into_owned();
    assert!(!setup_logging(&ep_cfg.log_config).unwrap());

    let mut ep = Endpoint::lib_create().unwrap();
    ep.lib_init(&ep_cfg).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "earlier log\n");

    // Nothing is created for a file that did not exist either
    let absent = dir.path().join("absent").join("THE.LOG");
    ep_cfg.log_config.filename = absent.to_string_lossy().into_owned();
    assert!(!setup_logging(&ep_cfg.log_config).unwrap());
    assert!(!absent.exists());
}
