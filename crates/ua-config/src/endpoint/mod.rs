//! Endpoint lifecycle
//!
//! The [`Endpoint`] is the library's top-level handle. Only one may be live
//! in a process at a time. It moves through a fixed sequence of states:
//!
//! ```text
//! lib_create()      lib_init(&EpConfig)       lib_start()
//!      │                    │                      │
//!      ▼                    ▼                      ▼
//!   Created ───────▶ Initialized ────────────▶ Started
//!      │                    │                      │
//!      └────────────────────┴──────────┬───────────┘
//!                                      ▼ lib_destroy() / drop
//!                                  Destroyed
//! ```
//!
//! Transports can be created once the endpoint is initialized. They are
//! bookkeeping only: validated and assigned an id, but no socket is bound.
//!
//! ```rust
//! use rvoip_ua_config::{Endpoint, EpConfig, LibState, TransportConfig, TransportType};
//!
//! # fn main() -> Result<(), rvoip_ua_config::UaError> {
//! let mut ep = Endpoint::lib_create()?;
//! let mut ep_cfg = EpConfig::default();
//! ep_cfg.log_config.console_level = 0;
//! ep.lib_init(&ep_cfg)?;
//!
//! let udp = ep.transport_create(TransportType::Udp, &TransportConfig::with_port(5060))?;
//! ep.lib_start()?;
//! assert_eq!(ep.state(), LibState::Started);
//! assert_eq!(ep.transports().count(), 1);
//!
//! ep.transport_close(udp)?;
//! ep.lib_destroy();
//! assert_eq!(ep.state(), LibState::Destroyed);
//! # Ok(())
//! # }
//! ```

mod config;

pub use config::{EpConfig, LogConfig, MediaConfig, UaConfig};

use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info, warn};

use crate::error::{UaError, UaResult};
use crate::logging;
use crate::transport::{TransportConfig, TransportId, TransportType};

/// Set while an endpoint is live in this process
static INSTANCE_LIVE: AtomicBool = AtomicBool::new(false);

/// Lifecycle state of an [`Endpoint`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LibState {
    Created,
    Initialized,
    Started,
    Destroyed,
}

impl fmt::Display for LibState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LibState::Created => "created",
            LibState::Initialized => "initialized",
            LibState::Started => "started",
            LibState::Destroyed => "destroyed",
        };
        f.write_str(name)
    }
}

/// A transport registered with the endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportInfo {
    pub id: TransportId,
    pub transport_type: TransportType,
    pub config: TransportConfig,
}

/// The library handle
#[derive(Debug)]
pub struct Endpoint {
    state: LibState,
    config: Option<EpConfig>,
    transports: BTreeMap<TransportId, TransportInfo>,
    next_transport_id: i32,
}

impl Endpoint {
    /// Create the library instance.
    ///
    /// Fails with [`UaError::InvalidState`] while another endpoint is live.
    pub fn lib_create() -> UaResult<Self> {
        if INSTANCE_LIVE
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("Refusing to create a second endpoint");
            return Err(UaError::invalid_state("an endpoint instance already exists"));
        }

        info!("Endpoint created");
        Ok(Self {
            state: LibState::Created,
            config: None,
            transports: BTreeMap::new(),
            next_transport_id: 0,
        })
    }

    /// Whether some endpoint is currently live in this process
    pub fn instance_exists() -> bool {
        INSTANCE_LIVE.load(Ordering::Acquire)
    }

    /// Current lifecycle state
    pub fn state(&self) -> LibState {
        self.state
    }

    /// Configuration given to [`lib_init`](Self::lib_init), if it has run
    pub fn config(&self) -> Option<&EpConfig> {
        self.config.as_ref()
    }

    /// Initialize the library with `config`.
    ///
    /// Installs logging from `config.log_config` unless a tracing subscriber
    /// is already in place.
    pub fn lib_init(&mut self, config: &EpConfig) -> UaResult<()> {
        self.expect_state(&[LibState::Created], "lib_init")?;

        if config.ua_config.max_calls == 0 {
            warn!("Rejecting endpoint config with maxCalls = 0");
            return Err(UaError::invalid_argument("maxCalls must be at least 1"));
        }

        logging::setup_logging(&config.log_config)?;

        self.config = Some(config.clone());
        self.state = LibState::Initialized;
        info!(
            max_calls = config.ua_config.max_calls,
            user_agent = %config.ua_config.user_agent,
            "Endpoint initialized"
        );
        Ok(())
    }

    /// Start the library
    pub fn lib_start(&mut self) -> UaResult<()> {
        self.expect_state(&[LibState::Initialized], "lib_start")?;
        self.state = LibState::Started;
        info!(transports = self.transports.len(), "Endpoint started");
        Ok(())
    }

    /// Register a transport and return its id.
    ///
    /// The port range must stay within 65535, and two transports of the same
    /// type may not claim the same non-zero port.
    pub fn transport_create(
        &mut self,
        transport_type: TransportType,
        config: &TransportConfig,
    ) -> UaResult<TransportId> {
        self.expect_state(&[LibState::Initialized, LibState::Started], "transport_create")?;

        if config.last_port() > u16::MAX as u32 {
            warn!(port = config.port, range = config.port_range, "Port range out of bounds");
            return Err(UaError::invalid_argument(format!(
                "port {} with range {} exceeds 65535",
                config.port, config.port_range
            )));
        }

        if config.port != 0 {
            let clash = self
                .transports
                .values()
                .any(|t| t.transport_type == transport_type && t.config.port == config.port);
            if clash {
                warn!(%transport_type, port = config.port, "Port already in use");
                return Err(UaError::invalid_argument(format!(
                    "{} transport on port {} already exists",
                    transport_type, config.port
                )));
            }
        }

        let id = TransportId(self.next_transport_id);
        self.next_transport_id += 1;
        self.transports.insert(
            id,
            TransportInfo {
                id,
                transport_type,
                config: config.clone(),
            },
        );

        info!(%id, %transport_type, port = config.port, "Transport created");
        Ok(id)
    }

    /// Remove a transport
    pub fn transport_close(&mut self, id: TransportId) -> UaResult<()> {
        match self.transports.remove(&id) {
            Some(info) => {
                debug!(%id, transport_type = %info.transport_type, "Transport closed");
                Ok(())
            }
            None => Err(UaError::TransportNotFound { id: id.0 }),
        }
    }

    /// Look up a transport by id
    pub fn transport_info(&self, id: TransportId) -> UaResult<&TransportInfo> {
        self.transports
            .get(&id)
            .ok_or(UaError::TransportNotFound { id: id.0 })
    }

    /// Live transports in creation order
    pub fn transports(&self) -> impl Iterator<Item = &TransportInfo> {
        self.transports.values()
    }

    /// Shut the library down. Calling it again does nothing.
    pub fn lib_destroy(&mut self) {
        if self.state == LibState::Destroyed {
            return;
        }

        let closed = self.transports.len();
        self.transports.clear();
        self.state = LibState::Destroyed;
        INSTANCE_LIVE.store(false, Ordering::Release);
        info!(closed_transports = closed, "Endpoint destroyed");
    }

    fn expect_state(&self, allowed: &[LibState], operation: &str) -> UaResult<()> {
        if allowed.contains(&self.state) {
            return Ok(());
        }
        warn!(state = %self.state, "{} rejected", operation);
        Err(UaError::invalid_state(format!(
            "{} is not allowed while the endpoint is {}",
            operation, self.state
        )))
    }
}

impl Drop for Endpoint {
    fn drop(&mut self) {
        self.lib_destroy();
    }
}
