//! Endpoint configuration records
//!
//! # Key Components
//!
//! - **EpConfig** - everything [`Endpoint::lib_init`](crate::Endpoint::lib_init) needs
//! - **UaConfig** - user-agent settings: call limits, DNS, STUN, outbound proxies
//! - **LogConfig** - log verbosity and destination
//! - **MediaConfig** - media clock, framing, echo cancellation and jitter buffer
//!
//! ```text
//! EpConfig
//! ├── UaConfig     maxCalls, userAgent, stunServer[], ...
//! ├── LogConfig    level, consoleLevel, filename, ...
//! └── MediaConfig  clockRate, ptime, ecTailLen, jb*, ...
//! ```
//!
//! # Usage
//!
//! ```rust
//! use rvoip_persist_core::ConfigDocument;
//! use rvoip_ua_config::EpConfig;
//!
//! let mut ep_cfg = EpConfig::default();
//! ep_cfg.ua_config.max_calls = 61;
//! ep_cfg.ua_config.user_agent = "Just JSON Test".to_string();
//! ep_cfg.ua_config.stun_server.push("stun1.pjsip.org".to_string());
//! ep_cfg.log_config.filename = "THE.LOG".to_string();
//!
//! let mut doc = ConfigDocument::new();
//! doc.write_object(&ep_cfg).unwrap();
//! assert_eq!(
//!     doc.get("EpConfig.UaConfig.userAgent").and_then(|v| v.as_str()),
//!     Some("Just JSON Test")
//! );
//! assert_eq!(doc.read_object::<EpConfig>().unwrap(), ep_cfg);
//! ```

use rvoip_persist_core::Persistent;
use serde::{Deserialize, Serialize};

/// User-agent settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UaConfig {
    /// Maximum number of simultaneous calls
    pub max_calls: u32,
    /// Number of worker threads the library may run
    pub thread_cnt: u32,
    /// Poll only from the application's main thread
    pub main_thread_only: bool,
    /// DNS servers used for SIP resolution; empty uses the OS resolver
    pub nameserver: Vec<String>,
    /// Proxies every outgoing request is routed through
    pub outbound_proxies: Vec<String>,
    /// User-Agent header value; empty uses the library default
    pub user_agent: String,
    /// STUN servers, tried in order
    pub stun_server: Vec<String>,
    pub stun_try_ipv6: bool,
    /// Carry on when no STUN server answers
    pub stun_ignore_failure: bool,
    /// 0 = off, 1 = NAT type attribute, 2 = also the description
    pub nat_type_in_sdp: u32,
    /// Accept NOTIFY for message waiting without a subscription
    pub mwi_unsolicited_enabled: bool,
}

impl Default for UaConfig {
    fn default() -> Self {
        Self {
            max_calls: 4,
            thread_cnt: 1,
            main_thread_only: false,
            nameserver: Vec::new(),
            outbound_proxies: Vec::new(),
            user_agent: String::new(),
            stun_server: Vec::new(),
            stun_try_ipv6: false,
            stun_ignore_failure: true,
            nat_type_in_sdp: 1,
            mwi_unsolicited_enabled: true,
        }
    }
}

impl Persistent for UaConfig {
    const CONTAINER_NAME: &'static str = "UaConfig";
}

/// Logging settings.
///
/// Levels follow the classic 0..=6 scale: 0 disables logging, 1 is errors
/// only, 6 is the most verbose trace output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogConfig {
    /// Log SIP messages as they are sent and received
    pub msg_logging: bool,
    /// Verbosity of everything that is logged
    pub level: u32,
    /// Verbosity of what reaches the console
    pub console_level: u32,
    /// Bit mask of decorations added to each line
    pub decor: u32,
    /// Also write the log to this file; empty disables file logging
    pub filename: String,
    /// Open flags for `filename`, see [`LogConfig::APPEND`]
    pub file_flags: u32,
}

impl LogConfig {
    /// `file_flags` bit: append to an existing log file instead of truncating it
    pub const APPEND: u32 = 0x1108;

    /// Whether the log file should be appended to
    pub fn appends(&self) -> bool {
        self.file_flags & Self::APPEND == Self::APPEND
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            msg_logging: true,
            level: 5,
            console_level: 4,
            decor: 25328,
            filename: String::new(),
            file_flags: 0,
        }
    }
}

impl Persistent for LogConfig {
    const CONTAINER_NAME: &'static str = "LogConfig";
}

/// Media settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaConfig {
    /// Internal conference bridge clock rate in Hz
    pub clock_rate: u32,
    /// Sound device clock rate; 0 follows `clock_rate`
    pub snd_clock_rate: u32,
    pub channel_count: u32,
    /// Audio frame length in milliseconds
    pub audio_frame_ptime: u32,
    pub max_media_ports: u32,
    pub has_ioqueue: bool,
    pub thread_cnt: u32,
    /// Media quality, 1 (fastest) to 10 (best)
    pub quality: u32,
    /// Packetization time override; 0 keeps codec defaults
    pub ptime: u32,
    pub no_vad: bool,
    /// iLBC frame mode, 20 or 30 milliseconds
    pub ilbc_mode: u32,
    /// Percentage of transmitted packets to drop, for testing
    pub tx_drop_pct: u32,
    /// Percentage of received packets to drop, for testing
    pub rx_drop_pct: u32,
    pub ec_options: u32,
    /// Echo canceller tail length in milliseconds; 0 disables it
    pub ec_tail_len: u32,
    pub snd_rec_latency: u32,
    pub snd_play_latency: u32,
    /// Jitter buffer tuning; -1 keeps the codec defaults
    pub jb_init: i32,
    pub jb_min_pre: i32,
    pub jb_max_pre: i32,
    pub jb_max: i32,
    /// Seconds of idleness before the sound device is closed; -1 never closes it
    pub snd_auto_close_time: i32,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            clock_rate: 16000,
            snd_clock_rate: 0,
            channel_count: 1,
            audio_frame_ptime: 20,
            max_media_ports: 254,
            has_ioqueue: true,
            thread_cnt: 1,
            quality: 8,
            ptime: 0,
            no_vad: false,
            ilbc_mode: 30,
            tx_drop_pct: 0,
            rx_drop_pct: 0,
            ec_options: 0,
            ec_tail_len: 200,
            snd_rec_latency: 100,
            snd_play_latency: 140,
            jb_init: -1,
            jb_min_pre: -1,
            jb_max_pre: -1,
            jb_max: -1,
            snd_auto_close_time: 1,
        }
    }
}

impl Persistent for MediaConfig {
    const CONTAINER_NAME: &'static str = "MediaConfig";
}

/// Complete endpoint configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EpConfig {
    #[serde(rename = "UaConfig")]
    pub ua_config: UaConfig,
    #[serde(rename = "LogConfig")]
    pub log_config: LogConfig,
    #[serde(rename = "MediaConfig")]
    pub med_config: MediaConfig,
}

impl Persistent for EpConfig {
    const CONTAINER_NAME: &'static str = "EpConfig";
}
