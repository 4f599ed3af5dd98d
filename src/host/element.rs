//! Host element owning the active plugin.
//!
//! Mediates plugin activation and teardown and forwards viewer operations
//! to the active plugin.

use crate::core::{Error, Result};
use crate::host::state::HostState;
use crate::plugin::contract::Plugin;
use crate::plugin::descriptor::{PluginContext, PluginDescriptor};
use crate::plugin::registry::PluginRegistry;
use crate::view::{HostSnapshot, RenderData, ViewConfig};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::sync::Mutex;

/// Outcome of an activation request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActivationOutcome {
    /// The requested plugin is now active
    Activated,
    /// A newer request superseded this one before it completed
    Superseded,
}

/// A live plugin instance, exclusively owned by one host.
struct ActivePlugin {
    name: String,
    instance: Box<dyn Plugin>,
}

struct HostInner {
    active: Option<ActivePlugin>,
    context: PluginContext,
}

/// The viewer surface that hosts at most one active plugin.
///
/// Operations issued against a single host are processed in submission
/// order. A newer activation request supersedes a still-pending older one:
/// the older request abandons its work at the next suspension point,
/// releases anything it built, and reports
/// [`ActivationOutcome::Superseded`].
pub struct HostElement {
    registry: Arc<PluginRegistry>,
    ops: Mutex<HostInner>,
    state: RwLock<HostState>,
    pending: RwLock<Option<String>>,
    tickets: AtomicU64,
    destroyed: AtomicBool,
    activation_timeout: Option<Duration>,
    host_id: String,
}

impl HostElement {
    /// Create a host wired to the process-wide registry.
    pub fn new() -> Self {
        Self::with_registry(PluginRegistry::global())
    }

    /// Create a host wired to an explicit registry.
    pub fn with_registry(registry: Arc<PluginRegistry>) -> Self {
        let context = PluginContext::new(0, 0);
        let host_id = context.host_id().to_string();
        Self {
            registry,
            ops: Mutex::new(HostInner {
                active: None,
                context,
            }),
            state: RwLock::new(HostState::Unattached),
            pending: RwLock::new(None),
            tickets: AtomicU64::new(0),
            destroyed: AtomicBool::new(false),
            activation_timeout: None,
            host_id,
        }
    }

    /// Impose a deadline on plugin activation.
    ///
    /// Expiry releases any partially built instance, returns the host to
    /// idle, and fails the request with [`Error::ActivationTimeout`].
    pub fn with_activation_timeout(mut self, timeout: Duration) -> Self {
        self.activation_timeout = Some(timeout);
        self
    }

    /// Identifier of this host surface.
    pub fn host_id(&self) -> &str {
        &self.host_id
    }

    /// Current lifecycle state.
    pub fn state(&self) -> HostState {
        *self.state.read().unwrap()
    }

    /// Name last requested for activation, while a request is pending.
    pub fn pending_plugin_name(&self) -> Option<String> {
        self.pending.read().unwrap().clone()
    }

    /// Name of the active plugin, if any.
    pub async fn active_plugin_name(&self) -> Option<String> {
        self.ops.lock().await.active.as_ref().map(|a| a.name.clone())
    }

    /// Attach the host surface to its display tree.
    pub async fn attach(&self) -> Result<()> {
        if self.destroyed.load(Ordering::SeqCst) {
            return Err(Error::HostDestroyed);
        }
        let _inner = self.ops.lock().await;
        match self.state() {
            HostState::Unattached => {
                self.set_state(HostState::Idle);
                Ok(())
            }
            state => Err(Error::invalid_state("attach", state)),
        }
    }

    /// Activate the named plugin.
    ///
    /// Resolves the name against the registry, tears down any current
    /// plugin, instantiates the new one, and makes it the sole active
    /// plugin. A failed resolution leaves the prior plugin in place
    /// untouched. Requesting the already-active plugin is a no-op.
    pub async fn activate(&self, name: &str) -> Result<ActivationOutcome> {
        if self.destroyed.load(Ordering::SeqCst) {
            return Err(Error::HostDestroyed);
        }
        let ticket = self.tickets.fetch_add(1, Ordering::SeqCst) + 1;
        *self.pending.write().unwrap() = Some(name.to_string());

        let mut inner = self.ops.lock().await;

        // A newer request arrived while this one waited its turn.
        if self.superseded(ticket) {
            return Ok(ActivationOutcome::Superseded);
        }
        if self.destroyed.load(Ordering::SeqCst) {
            self.clear_pending_if_latest(ticket);
            return Err(Error::HostDestroyed);
        }

        let state = self.state();
        if !state.accepts_activation() {
            self.clear_pending_if_latest(ticket);
            return Err(Error::invalid_state("activate", state));
        }

        // Requesting the already-active plugin is a no-op.
        if let Some(active) = &inner.active {
            if active.name == name {
                self.clear_pending_if_latest(ticket);
                return Ok(ActivationOutcome::Activated);
            }
        }

        let descriptor = match self.registry.lookup(name) {
            Some(descriptor) => descriptor,
            None => {
                self.clear_pending_if_latest(ticket);
                tracing::warn!(host = %self.host_id, plugin = %name, "activation of unknown plugin");
                return Err(Error::UnknownPlugin(name.to_string()));
            }
        };

        // Tear down the current plugin before the new one goes live.
        if inner.active.is_some() {
            self.set_state(HostState::Deactivating);
            self.delete_active(&mut inner).await;
        }

        self.set_state(HostState::Activating);
        let outcome = self.run_activation(&mut inner, ticket, name, &descriptor).await;
        self.clear_pending_if_latest(ticket);
        match &outcome {
            Ok(ActivationOutcome::Activated) => self.set_state(HostState::Active),
            Ok(ActivationOutcome::Superseded) | Err(_) => self.set_state(HostState::Idle),
        }
        outcome
    }

    /// Render data through the active plugin.
    pub async fn render(&self, data: &RenderData, config: &ViewConfig) -> Result<()> {
        let mut inner = self.require_live().await?;
        let state = self.state();
        let active = inner
            .active
            .as_mut()
            .ok_or_else(|| Error::invalid_state("render", state))?;
        active.instance.render(data, config).await
    }

    /// Propagate new surface dimensions to the active plugin.
    pub async fn resize(&self, width: u32, height: u32) -> Result<()> {
        let mut inner = self.require_live().await?;
        let state = self.state();
        let active = inner
            .active
            .as_mut()
            .ok_or_else(|| Error::invalid_state("resize", state))?;
        active.instance.resize(width, height).await?;
        inner.context.set_dimensions(width, height);
        Ok(())
    }

    /// Clear the active plugin's drawn output.
    pub async fn clear(&self) -> Result<()> {
        let mut inner = self.require_live().await?;
        let state = self.state();
        let active = inner
            .active
            .as_mut()
            .ok_or_else(|| Error::invalid_state("clear", state))?;
        active.instance.clear().await
    }

    /// Capture the viewer state as a restorable snapshot.
    pub async fn save(&self) -> Result<HostSnapshot> {
        let mut inner = self.require_live().await?;
        let state = self.state();
        let active = inner
            .active
            .as_mut()
            .ok_or_else(|| Error::invalid_state("save", state))?;
        let config = active.instance.save().await?;
        Ok(HostSnapshot::new(&active.name, config))
    }

    /// Restore a snapshot, activating its plugin if necessary.
    pub async fn restore(&self, snapshot: &HostSnapshot) -> Result<()> {
        if self.destroyed.load(Ordering::SeqCst) {
            return Err(Error::HostDestroyed);
        }
        let state = self.state();
        if !state.accepts_activation() {
            return Err(Error::invalid_state("restore", state));
        }

        let current = {
            let inner = self.ops.lock().await;
            inner.active.as_ref().map(|a| a.name.clone())
        };
        if current.as_deref() != Some(snapshot.plugin.as_str()) {
            match self.activate(&snapshot.plugin).await? {
                ActivationOutcome::Activated => {}
                // A newer request owns the host now; nothing to restore into.
                ActivationOutcome::Superseded => return Ok(()),
            }
        }

        let mut inner = self.require_live().await?;
        match inner.active.as_mut() {
            Some(active) if active.name == snapshot.plugin => {
                active.instance.restore(&snapshot.config).await
            }
            // The host moved on between activation and delegation.
            _ => Ok(()),
        }
    }

    /// Destroy the host surface.
    ///
    /// Tears down the active plugin exactly once and permanently
    /// invalidates the host; every later operation fails with
    /// [`Error::HostDestroyed`].
    pub async fn destroy(&self) -> Result<()> {
        if self.destroyed.swap(true, Ordering::SeqCst) {
            return Err(Error::HostDestroyed);
        }
        let mut inner = self.ops.lock().await;
        self.delete_active(&mut inner).await;
        *self.pending.write().unwrap() = None;
        self.set_state(HostState::Destroyed);
        tracing::info!(host = %self.host_id, "host destroyed");
        Ok(())
    }

    async fn run_activation(
        &self,
        inner: &mut HostInner,
        ticket: u64,
        name: &str,
        descriptor: &PluginDescriptor,
    ) -> Result<ActivationOutcome> {
        let ctx = inner.context.clone();
        let build = async {
            let mut instance = descriptor.instantiate(&ctx).await?;
            instance.activate(&ctx).await?;
            Ok::<Box<dyn Plugin>, Error>(instance)
        };

        let built = match self.activation_timeout {
            Some(limit) => match tokio::time::timeout(limit, build).await {
                Ok(result) => result,
                Err(_) => {
                    tracing::warn!(host = %self.host_id, plugin = %name, "plugin activation timed out");
                    return Err(Error::ActivationTimeout(name.to_string()));
                }
            },
            None => build.await,
        };
        let mut instance = built?;

        // The world may have moved on while the plugin was being built.
        if self.destroyed.load(Ordering::SeqCst) {
            self.release(name, &mut instance).await;
            return Err(Error::HostDestroyed);
        }
        if self.superseded(ticket) {
            self.release(name, &mut instance).await;
            tracing::debug!(host = %self.host_id, plugin = %name, "activation superseded");
            return Ok(ActivationOutcome::Superseded);
        }

        inner.active = Some(ActivePlugin {
            name: name.to_string(),
            instance,
        });
        tracing::info!(host = %self.host_id, plugin = %name, "plugin activated");
        Ok(ActivationOutcome::Activated)
    }

    /// Acquire the operation lock for a delegating operation.
    async fn require_live(&self) -> Result<tokio::sync::MutexGuard<'_, HostInner>> {
        if self.destroyed.load(Ordering::SeqCst) {
            return Err(Error::HostDestroyed);
        }
        let inner = self.ops.lock().await;
        // Destruction may have won the race for the lock.
        if self.destroyed.load(Ordering::SeqCst) {
            return Err(Error::HostDestroyed);
        }
        Ok(inner)
    }

    async fn delete_active(&self, inner: &mut HostInner) {
        if let Some(mut active) = inner.active.take() {
            if let Err(e) = active.instance.delete().await {
                tracing::warn!(host = %self.host_id, plugin = %active.name, error = %e, "plugin teardown failed");
            }
        }
    }

    async fn release(&self, name: &str, instance: &mut Box<dyn Plugin>) {
        if let Err(e) = instance.delete().await {
            tracing::warn!(host = %self.host_id, plugin = %name, error = %e, "abandoned instance teardown failed");
        }
    }

    fn superseded(&self, ticket: u64) -> bool {
        self.tickets.load(Ordering::SeqCst) != ticket
    }

    fn clear_pending_if_latest(&self, ticket: u64) {
        if self.tickets.load(Ordering::SeqCst) == ticket {
            *self.pending.write().unwrap() = None;
        }
    }

    fn set_state(&self, next: HostState) {
        *self.state.write().unwrap() = next;
        tracing::debug!(host = %self.host_id, state = %next, "host state");
    }
}

impl Default for HostElement {
    fn default() -> Self {
        Self::new()
    }
}
