//! Dashboard state and event handling.
//!
//! One struct holds the supervisor's process table plus the selection; all
//! mutation happens in the `handle_*`/`apply` methods on the control loop.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use wrun_core::supervisor::{ManagedProcess, ProcessEvent, Supervisor};

pub struct App {
    supervisor: Supervisor,
    /// Index into the process table; the corresponding pane is the only one
    /// rendered.
    selected: usize,
}

impl App {
    /// The first spawned package starts out selected.
    pub fn new(supervisor: Supervisor) -> Self {
        Self {
            supervisor,
            selected: 0,
        }
    }

    pub fn into_supervisor(self) -> Supervisor {
        self.supervisor
    }

    pub fn processes(&self) -> &[ManagedProcess] {
        self.supervisor.processes()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_process(&self) -> Option<&ManagedProcess> {
        self.supervisor.processes().get(self.selected)
    }

    pub fn selected_name(&self) -> Option<&str> {
        self.selected_process().map(|p| p.name.as_str())
    }

    /// Handle one key event; returns true when the operator asked to quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return true;
            }
            // Selection moves one step and clamps at the ends; no wrap.
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down => {
                let max = self.supervisor.processes().len().saturating_sub(1);
                self.selected = (self.selected + 1).min(max);
            }
            _ => {}
        }
        false
    }

    /// Apply one supervisor event; returns true when something visible
    /// changed. Output for a non-selected package only grows its buffer.
    pub fn apply(&mut self, event: ProcessEvent) -> bool {
        match event {
            ProcessEvent::Output { name, chunk } => {
                let visible = self.selected_name() == Some(name.as_str());
                self.supervisor.append_log(&name, chunk);
                visible
            }
            ProcessEvent::Exited { name, code } => {
                self.supervisor.record_exit(&name, code);
                let line = match code {
                    Some(code) => format!("exited with code {}", code),
                    None => "exited on signal".to_string(),
                };
                self.supervisor.append_log(&name, line);
                // The status column in the package list changes regardless
                // of which pane is visible.
                true
            }
        }
    }
}
