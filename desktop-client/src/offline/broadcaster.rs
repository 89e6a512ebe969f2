use common::games::GameBroadcaster;
use common::games::tictactoe::ControllerSnapshot;
use crate::state::SharedState;

#[derive(Clone)]
pub struct LocalBroadcaster {
    shared_state: SharedState,
}

impl LocalBroadcaster {
    pub fn new(shared_state: SharedState) -> Self {
        Self { shared_state }
    }
}

impl GameBroadcaster for LocalBroadcaster {
    async fn broadcast_state(&self, snapshot: ControllerSnapshot) {
        self.shared_state.update_snapshot(snapshot);
    }
}
