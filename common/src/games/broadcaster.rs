use std::future::Future;

use super::tictactoe::ControllerSnapshot;

pub trait GameBroadcaster: Send + Sync + Clone + 'static {
    fn broadcast_state(&self, snapshot: ControllerSnapshot) -> impl Future<Output = ()> + Send;
}
