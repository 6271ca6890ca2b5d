use crate::{
    core::geo::LatLng,
    prelude::Duration,
    traits::{LocationAccuracy, LocationSource},
};
use crossbeam_channel::{unbounded, Receiver, Sender};
use serde::{Deserialize, Serialize};
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

/// One batch of position fixes, oldest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationUpdate {
    pub fixes: Vec<LatLng>,
}

/// Outcome of an authorization request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AuthorizationStatus {
    #[default]
    NotDetermined,
    WhenInUse,
    Denied,
}

/// Location source that reports a known device position over a channel
///
/// Starting updates sends the current position, either right away or from a
/// background thread after `fix_delay`. Stopping updates invalidates any fix
/// still in flight. The host drains the receiver on its dispatch thread.
pub struct ChannelLocationSource {
    update_tx: Sender<LocationUpdate>,
    device_position: Option<LatLng>,
    service_enabled: bool,
    /// Answer given when authorization is requested
    grant: AuthorizationStatus,
    authorization: AuthorizationStatus,
    accuracy: LocationAccuracy,
    fix_delay: Option<Duration>,
    updating: bool,
    /// Bumped on every start and stop so stale delayed fixes are dropped
    subscription: Arc<AtomicU64>,
}

impl ChannelLocationSource {
    /// Creates a source and the receiver its fixes arrive on
    pub fn channel(device_position: Option<LatLng>) -> (Self, Receiver<LocationUpdate>) {
        let (update_tx, update_rx) = unbounded();
        let source = Self {
            update_tx,
            device_position,
            service_enabled: true,
            grant: AuthorizationStatus::WhenInUse,
            authorization: AuthorizationStatus::NotDetermined,
            accuracy: LocationAccuracy::default(),
            fix_delay: None,
            updating: false,
            subscription: Arc::new(AtomicU64::new(0)),
        };
        (source, update_rx)
    }

    pub fn with_service_enabled(mut self, enabled: bool) -> Self {
        self.service_enabled = enabled;
        self
    }

    /// What the user answers to the authorization prompt
    pub fn with_grant(mut self, grant: AuthorizationStatus) -> Self {
        self.grant = grant;
        self
    }

    /// Deliver fixes from a background thread after a delay
    pub fn with_fix_delay(mut self, delay: Duration) -> Self {
        self.fix_delay = Some(delay);
        self
    }

    pub fn authorization(&self) -> AuthorizationStatus {
        self.authorization
    }

    pub fn is_updating(&self) -> bool {
        self.updating
    }

    fn send_fix(&self, position: LatLng) {
        let update = LocationUpdate {
            fixes: vec![position],
        };

        match self.fix_delay {
            None => {
                if self.update_tx.send(update).is_err() {
                    log::warn!("location receiver dropped, fix discarded");
                }
            }
            Some(delay) => {
                let update_tx = self.update_tx.clone();
                let subscription = Arc::clone(&self.subscription);
                let generation = subscription.load(Ordering::SeqCst);
                std::thread::spawn(move || {
                    std::thread::sleep(delay);
                    if subscription.load(Ordering::SeqCst) == generation {
                        if update_tx.send(update).is_err() {
                            log::warn!("location receiver dropped, delayed fix discarded");
                        }
                    } else {
                        log::debug!("subscription ended before fix was ready");
                    }
                });
            }
        }
    }
}

impl LocationSource for ChannelLocationSource {
    fn set_desired_accuracy(&mut self, accuracy: LocationAccuracy) {
        self.accuracy = accuracy;
    }

    fn request_when_in_use_authorization(&mut self) {
        if self.authorization == AuthorizationStatus::NotDetermined {
            self.authorization = self.grant;
            log::info!("location authorization: {:?}", self.authorization);
        }
    }

    fn is_service_enabled(&self) -> bool {
        self.service_enabled
    }

    fn start_updating(&mut self) {
        self.subscription.fetch_add(1, Ordering::SeqCst);
        self.updating = true;

        if self.authorization != AuthorizationStatus::WhenInUse {
            log::debug!("location not authorized, no fix will be delivered");
            return;
        }
        match self.device_position {
            Some(position) => {
                log::debug!("reporting {} at {:?} accuracy", position, self.accuracy);
                self.send_fix(position)
            }
            None => log::debug!("no device position known yet"),
        }
    }

    fn stop_updating(&mut self) {
        self.subscription.fetch_add(1, Ordering::SeqCst);
        self.updating = false;
    }
}
