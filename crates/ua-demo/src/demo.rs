//! The demo programs
//!
//! Each demo writes its report to `out` so the binary can print to stdout
//! while tests capture the text.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};
use rvoip_persist_core::ConfigDocument;
use rvoip_ua_config::{
    AccountConfig, AuthCredInfo, Endpoint, EpConfig, SipHeader, TransportConfig, TransportType,
};
use tracing::{debug, info};

/// The account written by the account demo
pub fn sample_account() -> AccountConfig {
    let mut acc_cfg = AccountConfig::new("\"Just Test\" <sip:test@pjsip.org>")
        .with_registrar("sip:pjsip.org")
        .with_proxy("<sip:sip.pjsip.org;transport=tcp>")
        .with_proxy("<sip:sip.pjsip.org;transport=tls>")
        .with_credential(AuthCredInfo::new("digest", "*", "test", "passwd"));
    acc_cfg
        .reg_config
        .headers
        .push(SipHeader::new("X-Header", "User header"));
    acc_cfg.media_config.transport_config.tls_config.ciphers = vec![1, 2, 3];
    acc_cfg
}

/// The endpoint configuration written by the endpoint demo
pub fn sample_endpoint() -> EpConfig {
    let mut ep_cfg = EpConfig::default();
    ep_cfg.ua_config.max_calls = 61;
    ep_cfg.ua_config.user_agent = "Just JSON Test".to_string();
    ep_cfg.ua_config.stun_server = vec![
        "stun1.pjsip.org".to_string(),
        "stun2.pjsip.org".to_string(),
    ];
    ep_cfg.log_config.filename = "THE.LOG".to_string();
    ep_cfg
}

/// Write the sample account, reload it from text and write it again.
///
/// Both renderings are printed and must describe the same tree.
pub fn run_account_demo(out: &mut impl Write) -> Result<()> {
    let mut ep = Endpoint::lib_create()?;

    let mut jdoc = ConfigDocument::new();
    jdoc.write_object(&sample_account())?;
    let original = jdoc.save_string()?;
    writeln!(out, "Original:\n{}\n", original)?;

    let rdoc = ConfigDocument::from_json_str(&original).context("reloading account text")?;
    let acc_cfg: AccountConfig = rdoc.read_object()?;

    let mut wdoc = ConfigDocument::new();
    wdoc.write_object(&acc_cfg)?;
    let parsed = wdoc.save_string()?;
    writeln!(out, "Parsed:\n{}\n", parsed)?;

    if wdoc != jdoc {
        bail!("parsed account differs from the original");
    }

    ep.lib_destroy();
    Ok(())
}

/// Round-trip the sample endpoint configuration through text and through
/// the file at `path`, deleting the file afterwards.
pub fn run_endpoint_demo(out: &mut impl Write, path: &Path) -> Result<()> {
    let mut ep = Endpoint::lib_create()?;

    let mut jdoc = ConfigDocument::new();
    jdoc.write_object(&sample_endpoint())?;
    let text = jdoc.save_string()?;
    writeln!(out, "{}\n", text)?;

    let mut ep_cfg = EpConfig::default();
    ConfigDocument::from_json_str(&text)?.read_object_into(&mut ep_cfg)?;

    let mut wdoc = ConfigDocument::new();
    wdoc.write_object(&ep_cfg)?;
    writeln!(out, "{}\n", wdoc.save_string()?)?;

    wdoc.save_file(path)
        .with_context(|| format!("saving {}", path.display()))?;
    debug!("Saved endpoint config to {}", path.display());

    let from_file = read_and_delete(path)?;
    if from_file != ep_cfg {
        bail!("endpoint config read from {} differs", path.display());
    }

    ep.lib_destroy();
    Ok(())
}

/// Read the endpoint config saved at `path`, then delete the file.
///
/// The file is removed whether or not it reads back.
fn read_and_delete(path: &Path) -> Result<EpConfig> {
    let mut from_file = EpConfig::default();
    let loaded =
        ConfigDocument::from_file(path).and_then(|doc| doc.read_object_into(&mut from_file));
    std::fs::remove_file(path).with_context(|| format!("deleting {}", path.display()))?;
    loaded.with_context(|| format!("reading {}", path.display()))?;
    Ok(from_file)
}

/// Bring the library up with one UDP transport and an account config, then
/// shut it down. No registration is sent.
pub fn run_lifecycle_demo(out: &mut impl Write) -> Result<()> {
    let mut ep = Endpoint::lib_create()?;

    let mut ep_cfg = EpConfig::default();
    ep_cfg.log_config.level = 4;
    ep.lib_init(&ep_cfg)?;

    ep.transport_create(TransportType::Udp, &TransportConfig::with_port(5060))?;
    ep.lib_start()?;
    writeln!(out, "*** STARTED ***")?;

    let acc_cfg = AccountConfig::new("sip:test1@pjsip.org")
        .with_registrar("sip:pjsip.org")
        .with_credential(AuthCredInfo::new("digest", "*", "test1", "test1"));
    info!(
        id = %acc_cfg.id_uri,
        registrar = %acc_cfg.reg_config.registrar_uri,
        "Account configured"
    );

    writeln!(out, "*** SHUTTING DOWN ***")?;
    ep.lib_destroy();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // The endpoint slot is process-wide, so the demos run one after another
    #[test]
    fn demos_in_sequence() {
        let mut out = Vec::new();
        run_account_demo(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Original:\n{"));
        assert!(text.contains("\nParsed:\n{"));
        assert!(text.contains("\"X-Header\""));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jsontest.js");
        let mut out = Vec::new();
        run_endpoint_demo(&mut out, &path).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("Just JSON Test").count(), 2);
        assert!(!path.exists());

        let mut out = Vec::new();
        run_lifecycle_demo(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "*** STARTED ***\n*** SHUTTING DOWN ***\n"
        );

        // A file that cannot be written aborts the demo and frees the endpoint
        let bad = dir.path().join("missing").join("jsontest.js");
        let err = run_endpoint_demo(&mut Vec::new(), &bad).unwrap_err();
        assert!(format!("{:#}", err).contains("saving"));
        assert!(!Endpoint::instance_exists());
    }

    #[test]
    fn unreadable_saved_file_is_still_deleted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jsontest.js");

        std::fs::write(&path, r#"{"EpConfig": {"UaConfig": {}}}"#).unwrap();
        let err = read_and_delete(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("reading"));
        assert!(!path.exists());

        std::fs::write(&path, "{ not json").unwrap();
        assert!(read_and_delete(&path).is_err());
        assert!(!path.exists());
    }
}
