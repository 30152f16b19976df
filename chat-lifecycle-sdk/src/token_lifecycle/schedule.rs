use crate::internal_event::InternalEvent;
use crate::models::config::Config;
use log::{debug, trace, warn};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// `tokio::time::interval` can't tick every zero seconds.
const MIN_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Timers started once notifications are allowed: two delayed registration requests and the device token poll.
/// Expiries are posted to the event loop, nothing runs on the timer tasks themselves.
#[derive(Debug, Default)]
pub(crate) struct Schedule {
    reregistrations: Vec<JoinHandle<()>>,
    poll: Option<JoinHandle<()>>,
}

impl Schedule {
    pub(crate) fn start(
        &mut self,
        config: &Config,
        internal_tx: &mpsc::UnboundedSender<InternalEvent>,
    ) {
        self.cancel();

        let delays = [
            config.first_reregistration_delay,
            config.second_reregistration_delay,
        ];

        for (attempt, delay) in (1u8..).zip(delays) {
            let internal_tx = internal_tx.clone();
            self.reregistrations.push(tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                if internal_tx
                    .send(InternalEvent::ReregistrationDue { attempt })
                    .is_err()
                {
                    trace!("Event loop is gone, dropping registration attempt {attempt}");
                }
            }));
        }

        let mut period = config.device_token_poll_interval;
        if period < MIN_POLL_INTERVAL {
            warn!("Device token poll interval of {period:?} is too short, polling every {MIN_POLL_INTERVAL:?}");
            period = MIN_POLL_INTERVAL;
        }

        let internal_tx = internal_tx.clone();
        self.poll = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                interval.tick().await;
                if internal_tx.send(InternalEvent::DeviceTokenPollTick).is_err() {
                    break;
                }
            }
        }));
    }

    pub(crate) fn stop_poll(&mut self) {
        if let Some(poll) = self.poll.take() {
            debug!("Stopping device token poll");
            poll.abort();
        }
    }

    pub(crate) fn cancel(&mut self) {
        for reregistration in self.reregistrations.drain(..) {
            reregistration.abort();
        }

        self.stop_poll();
    }
}

impl Drop for Schedule {
    fn drop(&mut self) {
        self.cancel();
    }
}
