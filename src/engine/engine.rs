use std::sync::mpsc::{Receiver, Sender};

use tracing::{debug, info};

use crate::engine::protocol::{EngineCommand, EngineResponse};
use crate::engine::session::Session;

/// Owns the session on its own thread and answers every command with a fresh view.
pub struct Engine {
    rx: Receiver<EngineCommand>,
    tx: Sender<EngineResponse>,
    session: Session,
    /// Wakes the UI after each published view.
    notify: Option<Box<dyn Fn() + Send>>,
}

impl Engine {
    pub fn new(
        rx: Receiver<EngineCommand>,
        tx: Sender<EngineResponse>,
        session: Session,
    ) -> Self {
        Self {
            rx,
            tx,
            session,
            notify: None,
        }
    }

    pub fn with_notify(mut self, notify: impl Fn() + Send + 'static) -> Self {
        self.notify = Some(Box::new(notify));
        self
    }

    fn publish(&self) -> bool {
        let sent = self
            .tx
            .send(EngineResponse::View(Box::new(self.session.view())))
            .is_ok();
        if let Some(notify) = &self.notify {
            notify();
        }
        sent
    }

    pub fn run(&mut self) {
        info!("engine_started");
        if !self.publish() {
            return;
        }

        while let Ok(cmd) = self.rx.recv() {
            self.handle(cmd);
            if !self.publish() {
                break;
            }
        }

        info!("engine_stopped");
    }

    fn handle(&mut self, cmd: EngineCommand) {
        match cmd {
            EngineCommand::NewGame { class_id } => self.session.new_game(&class_id),
            EngineCommand::Perform(action) => {
                self.session.perform(&action);
            }
            EngineCommand::SaveNew { label } => self.session.save_new(label.trim()),
            EngineCommand::QuickSave { id } => self.session.quick_save(id.as_deref()),
            EngineCommand::LoadSave { id } => self.session.load(id.as_deref()),
            EngineCommand::DeleteSave { id } => self.session.delete(id.as_deref()),
            EngineCommand::SelectSave { id } => {
                debug!(?id, "save_selected");
                self.session.select_save(id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::apply_action::Action;
    use crate::model::world::World;
    use crate::storage::kv::MemoryStore;
    use crate::storage::saves::SaveManager;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::mpsc;

    #[test]
    fn engine_answers_each_command_with_a_view() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();
        let session = Session::new(
            World::builtin(),
            SaveManager::new(Box::new(MemoryStore::default())),
            StdRng::seed_from_u64(3),
        );

        let handle = std::thread::spawn(move || Engine::new(cmd_rx, resp_tx, session).run());

        cmd_tx
            .send(EngineCommand::NewGame {
                class_id: "wanderer".into(),
            })
            .expect("send");
        cmd_tx
            .send(EngineCommand::Perform(Action::Travel {
                exit: "trail".into(),
            }))
            .expect("send");
        drop(cmd_tx);

        let views: Vec<_> = resp_rx
            .iter()
            .map(|EngineResponse::View(view)| view)
            .collect();
        handle.join().expect("engine thread");

        assert_eq!(views.len(), 3);
        assert!(views[0].state.player_class_id.is_none());
        assert_eq!(views[1].class_name, "Wanderer");
        assert_eq!(
            views[2].location.as_ref().map(|l| l.title.as_str()),
            Some("Wind-Raked Ridge")
        );
    }
}
