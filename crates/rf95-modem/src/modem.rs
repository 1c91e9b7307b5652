//! The modem handle.
//!
//! A [`Modem`] owns one connection to the firmware. Every operation takes
//! `&mut self`, so exchanges on one handle never interleave. Share a handle
//! between threads by wrapping it in a `Mutex`.

use rf95_protocol::{assemble_status, Command, Status};
use tracing::{debug, trace, warn};

use crate::config::ModemConfig;
use crate::dispatch::Dispatch;
use crate::error::ModemResult;

/// Handle to one rf95modem.
#[derive(Debug)]
pub struct Modem<D> {
    dispatch: D,
    config: ModemConfig,
    /// Cached MTU; 0 until fetched.
    mtu: usize,
}

impl<D: Dispatch> Modem<D> {
    /// Create a modem handle with the default configuration.
    pub fn new(dispatch: D) -> Self {
        Self::with_config(dispatch, ModemConfig::default())
    }

    /// Create a modem handle with an explicit configuration.
    pub fn with_config(dispatch: D, config: ModemConfig) -> Self {
        Modem {
            dispatch,
            config,
            mtu: 0,
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &ModemConfig {
        &self.config
    }

    /// Get the dispatch collaborator.
    pub fn dispatch_mut(&mut self) -> &mut D {
        &mut self.dispatch
    }

    /// Release the dispatch collaborator.
    pub fn into_inner(self) -> D {
        self.dispatch
    }

    /// The cached MTU, if one has been fetched.
    pub fn cached_mtu(&self) -> Option<usize> {
        (self.mtu != 0).then_some(self.mtu)
    }

    /// Query the modem status with `AT+INFO`.
    ///
    /// Either every field of the returned [`Status`] was decoded from this
    /// exchange, or an error is returned. Nothing is retried.
    pub fn fetch_status(&mut self) -> ModemResult<Status> {
        match self.exchange_status() {
            Ok(status) => {
                debug!("Modem: fetched {}", status);
                Ok(status)
            }
            Err(e) => {
                warn!("Modem: status fetch failed: {}", e);
                Err(e)
            }
        }
    }

    fn exchange_status(&mut self) -> ModemResult<Status> {
        let expected = self.config.status_lines;
        let lines = self.dispatch.send_multiline(&Command::Info, expected)?;
        Ok(assemble_status(&lines, expected)?)
    }

    /// The modem's MTU in bytes.
    ///
    /// Served from the cache when possible; otherwise fetched once and
    /// cached for the lifetime of the handle.
    pub fn mtu(&mut self) -> ModemResult<usize> {
        if self.mtu == 0 {
            self.update_mtu()?;
        } else {
            trace!("Modem: MTU cache hit ({})", self.mtu);
        }
        Ok(self.mtu)
    }

    /// Fetch the MTU again, replacing the cached value.
    ///
    /// On error the previous cache entry is kept.
    pub fn refresh_mtu(&mut self) -> ModemResult<usize> {
        self.update_mtu()?;
        Ok(self.mtu)
    }

    fn update_mtu(&mut self) -> ModemResult<()> {
        let status = self.fetch_status()?;
        self.mtu = status.mtu;
        debug!("Modem: cached MTU {}", self.mtu);
        Ok(())
    }
}
