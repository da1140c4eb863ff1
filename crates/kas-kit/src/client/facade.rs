//! The request façade shared by all resource clients.

use std::fmt;
use std::sync::Arc;

use super::args::{Arg, resolve};
use super::call::Call;
use super::endpoint::{Endpoint, build_request};
use super::transport::Transport;
use crate::error::Error;
use crate::types::AccessOptions;

/// Access options plus the transport, shared (cheaply cloned) by every
/// resource client of one [`Kas`](crate::Kas).
#[derive(Clone)]
pub struct Facade {
    access: Arc<AccessOptions>,
    transport: Arc<dyn Transport>,
}

impl Facade {
    pub fn new(access: AccessOptions, transport: Arc<dyn Transport>) -> Self {
        Self {
            access: Arc::new(access),
            transport,
        }
    }

    pub fn access(&self) -> &AccessOptions {
        &self.access
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Resolve, normalize and validate `args` for `endpoint`, and return the
    /// prepared call.
    ///
    /// Every validation error is returned here, before anything reaches the
    /// transport.
    pub fn prepare<T>(&self, endpoint: &Endpoint, args: Vec<Arg>) -> Result<Call<T>, Error> {
        let mut resolved = resolve(args, endpoint.params)?;
        let request = build_request(endpoint, &resolved, &self.access)?;
        Ok(Call::new(
            self.transport.clone(),
            request,
            resolved.callback.take(),
        ))
    }
}

impl fmt::Debug for Facade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Facade")
            .field("access", &self.access)
            .finish_non_exhaustive()
    }
}
